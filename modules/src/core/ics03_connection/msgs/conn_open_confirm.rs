use ibc_verify_proto::ibc::core::connection::v1::MsgConnectionOpenConfirm as RawMsgConnectionOpenConfirm;
use ibc_verify_proto::protobuf::Protobuf;

use crate::core::ics02_client::height::optional_height;
use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::msgs::decode_proof;
use crate::core::ics23_commitment::commitment::CommitmentProof;
use crate::core::ics24_host::identifier::ConnectionId;
use crate::tx_msg::Msg;
use crate::Height;

pub const TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenConfirm";

///
/// Message definition for `MsgConnectionOpenConfirm` (i.e., `ConnOpenConfirm` datagram).
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenConfirm {
    pub connection_id: ConnectionId,
    /// Proof that the counterparty stored its connection end in state `OPEN`.
    pub proof_ack: CommitmentProof,
    pub proof_height: Height,
}

impl Msg for MsgConnectionOpenConfirm {
    type Raw = RawMsgConnectionOpenConfirm;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl Protobuf<RawMsgConnectionOpenConfirm> for MsgConnectionOpenConfirm {}

impl TryFrom<RawMsgConnectionOpenConfirm> for MsgConnectionOpenConfirm {
    type Error = Error;

    fn try_from(msg: RawMsgConnectionOpenConfirm) -> Result<Self, Self::Error> {
        Ok(Self {
            connection_id: msg
                .connection_id
                .parse()
                .map_err(Error::invalid_identifier)?,
            proof_ack: decode_proof(msg.proof_ack, "ack")?,
            proof_height: optional_height(msg.proof_height)
                .ok_or_else(Error::missing_proof_height)?,
        })
    }
}

impl From<MsgConnectionOpenConfirm> for RawMsgConnectionOpenConfirm {
    fn from(ics_msg: MsgConnectionOpenConfirm) -> Self {
        RawMsgConnectionOpenConfirm {
            connection_id: ics_msg.connection_id.as_str().to_string(),
            proof_ack: Some(ics_msg.proof_ack.into()),
            proof_height: Some(ics_msg.proof_height.into()),
        }
    }
}
