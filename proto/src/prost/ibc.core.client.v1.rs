/// Height is a monotonically increasing data type that can be compared
/// against another Height for the purposes of updating and freezing clients.
///
/// The revision number identifies the chain's current fork (it increments on
/// every upgrade that resets block heights), the revision height is the block
/// height within that revision.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Height {
    /// the revision that the client is currently on
    #[prost(uint64, tag="1")]
    pub revision_number: u64,
    /// the height within the given revision
    #[prost(uint64, tag="2")]
    pub revision_height: u64,
}
/// MsgSubmitMisbehaviour defines a message used to submit evidence of light
/// client misbehaviour and freeze the offending client.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgSubmitMisbehaviour {
    /// client unique identifier
    #[prost(string, tag="1")]
    pub client_id: ::prost::alloc::string::String,
    /// misbehaviour used for freezing the light client
    #[prost(message, optional, tag="2")]
    pub misbehaviour: ::core::option::Option<::prost_types::Any>,
}
