use ibc_verify_proto::ibc::core::connection::v1::MsgConnectionOpenAck as RawMsgConnectionOpenAck;
use ibc_verify_proto::protobuf::Protobuf;

use crate::core::ics02_client::height::optional_height;
use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::msgs::decode_proof;
use crate::core::ics03_connection::version::Version;
use crate::core::ics23_commitment::commitment::CommitmentProof;
use crate::core::ics24_host::identifier::ConnectionId;
use crate::tx_msg::Msg;
use crate::Height;

pub const TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenAck";

/// Message definition `MsgConnectionOpenAck`  (i.e., `ConnOpenAck` datagram).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenAck {
    pub connection_id: ConnectionId,
    pub version: Version,
    /// Proof that the counterparty stored its connection end in state `TRYOPEN`.
    pub proof_try: CommitmentProof,
    pub proof_consensus: CommitmentProof,
    pub proof_height: Height,
    pub consensus_height: Height,
}

impl Msg for MsgConnectionOpenAck {
    type Raw = RawMsgConnectionOpenAck;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl Protobuf<RawMsgConnectionOpenAck> for MsgConnectionOpenAck {}

impl TryFrom<RawMsgConnectionOpenAck> for MsgConnectionOpenAck {
    type Error = Error;

    fn try_from(msg: RawMsgConnectionOpenAck) -> Result<Self, Self::Error> {
        Ok(Self {
            connection_id: msg
                .connection_id
                .parse()
                .map_err(Error::invalid_identifier)?,
            version: msg.version.ok_or_else(Error::missing_version)?.try_into()?,
            proof_try: decode_proof(msg.proof_try, "try")?,
            proof_consensus: decode_proof(msg.proof_consensus, "consensus")?,
            proof_height: optional_height(msg.proof_height)
                .ok_or_else(Error::missing_proof_height)?,
            consensus_height: optional_height(msg.consensus_height)
                .ok_or_else(Error::missing_consensus_height)?,
        })
    }
}

impl From<MsgConnectionOpenAck> for RawMsgConnectionOpenAck {
    fn from(ics_msg: MsgConnectionOpenAck) -> Self {
        RawMsgConnectionOpenAck {
            connection_id: ics_msg.connection_id.as_str().to_string(),
            version: Some(ics_msg.version.into()),
            proof_try: Some(ics_msg.proof_try.into()),
            proof_consensus: Some(ics_msg.proof_consensus.into()),
            proof_height: Some(ics_msg.proof_height.into()),
            consensus_height: Some(ics_msg.consensus_height.into()),
        }
    }
}
