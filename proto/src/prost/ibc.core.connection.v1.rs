/// ConnectionEnd defines a stateful object on a chain connected to another
/// separate one.
/// NOTE: there must only be 2 defined ConnectionEnds to establish
/// a connection between two chains.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConnectionEnd {
    /// client associated with this connection.
    #[prost(string, tag="1")]
    pub client_id: ::prost::alloc::string::String,
    /// IBC version which can be utilised to determine encodings or protocols for
    /// channels or packets utilising this connection.
    #[prost(message, repeated, tag="2")]
    pub versions: ::prost::alloc::vec::Vec<Version>,
    /// current state of the connection end.
    #[prost(enumeration="State", tag="3")]
    pub state: i32,
    /// counterparty chain associated with this connection.
    #[prost(message, optional, tag="4")]
    pub counterparty: ::core::option::Option<Counterparty>,
}
/// Counterparty defines the counterparty chain associated with a connection end.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Counterparty {
    /// identifies the client on the counterparty chain associated with a given
    /// connection.
    #[prost(string, tag="1")]
    pub client_id: ::prost::alloc::string::String,
    /// identifies the connection end on the counterparty chain associated with a
    /// given connection.
    #[prost(string, tag="2")]
    pub connection_id: ::prost::alloc::string::String,
    /// commitment prefix of the counterparty chain's store, either a
    /// MerklePrefix or a SignaturePrefix.
    #[prost(message, optional, tag="3")]
    pub prefix: ::core::option::Option<::prost_types::Any>,
}
/// Version defines the versioning scheme used to negotiate the IBC verison in
/// the connection handshake.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Version {
    /// unique version identifier
    #[prost(string, tag="1")]
    pub identifier: ::prost::alloc::string::String,
    /// list of features compatible with the specified identifier
    #[prost(string, repeated, tag="2")]
    pub features: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
/// MsgConnectionOpenInit defines the msg sent by an account on Chain A to
/// initialize a connection with Chain B.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgConnectionOpenInit {
    #[prost(string, tag="1")]
    pub connection_id: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub client_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag="3")]
    pub counterparty: ::core::option::Option<Counterparty>,
}
/// MsgConnectionOpenTry defines a msg sent by a Relayer to try to open a
/// connection on Chain B.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgConnectionOpenTry {
    #[prost(string, tag="1")]
    pub connection_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag="2")]
    pub counterparty: ::core::option::Option<Counterparty>,
    #[prost(string, tag="3")]
    pub client_id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag="4")]
    pub counterparty_versions: ::prost::alloc::vec::Vec<Version>,
    /// proof of the initialization the connection on Chain A: `UNINITIALIZED ->
    /// INIT`
    #[prost(message, optional, tag="5")]
    pub proof_init: ::core::option::Option<::prost_types::Any>,
    /// proof of client consensus state
    #[prost(message, optional, tag="6")]
    pub proof_consensus: ::core::option::Option<::prost_types::Any>,
    #[prost(message, optional, tag="7")]
    pub proof_height: ::core::option::Option<super::super::client::v1::Height>,
    #[prost(message, optional, tag="8")]
    pub consensus_height: ::core::option::Option<super::super::client::v1::Height>,
}
/// MsgConnectionOpenAck defines a msg sent by a Relayer to Chain A to
/// acknowledge the change of connection state to TRYOPEN on Chain B.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgConnectionOpenAck {
    #[prost(string, tag="1")]
    pub connection_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag="2")]
    pub version: ::core::option::Option<Version>,
    /// proof of the initialization the connection on Chain B: `UNINITIALIZED ->
    /// TRYOPEN`
    #[prost(message, optional, tag="3")]
    pub proof_try: ::core::option::Option<::prost_types::Any>,
    /// proof of client consensus state
    #[prost(message, optional, tag="4")]
    pub proof_consensus: ::core::option::Option<::prost_types::Any>,
    #[prost(message, optional, tag="5")]
    pub proof_height: ::core::option::Option<super::super::client::v1::Height>,
    #[prost(message, optional, tag="6")]
    pub consensus_height: ::core::option::Option<super::super::client::v1::Height>,
}
/// MsgConnectionOpenConfirm defines a msg sent by a Relayer to Chain B to
/// acknowledge the change of connection state to OPEN on Chain A.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgConnectionOpenConfirm {
    #[prost(string, tag="1")]
    pub connection_id: ::prost::alloc::string::String,
    /// proof for the change of the connection state on Chain A: `INIT -> OPEN`
    #[prost(message, optional, tag="2")]
    pub proof_ack: ::core::option::Option<::prost_types::Any>,
    #[prost(message, optional, tag="3")]
    pub proof_height: ::core::option::Option<super::super::client::v1::Height>,
}
/// State defines if a connection is in one of the following states:
/// INIT, TRYOPEN, OPEN or UNINITIALIZED.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum State {
    /// Default State
    UninitializedUnspecified = 0,
    /// A connection end has just started the opening handshake.
    Init = 1,
    /// A connection end has acknowledged the handshake step on the counterparty
    /// chain.
    Tryopen = 2,
    /// A connection end has completed the handshake.
    Open = 3,
}
