use ibc_verify_proto::ibc::core::connection::v1::MsgConnectionOpenTry as RawMsgConnectionOpenTry;
use ibc_verify_proto::protobuf::Protobuf;

use crate::core::ics02_client::height::optional_height;
use crate::core::ics03_connection::connection::Counterparty;
use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::msgs::decode_proof;
use crate::core::ics03_connection::version::Version;
use crate::core::ics23_commitment::commitment::CommitmentProof;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::tx_msg::Msg;
use crate::Height;

pub const TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenTry";

///
/// Message definition `MsgConnectionOpenTry`  (i.e., `ConnOpenTry` datagram).
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgConnectionOpenTry {
    pub connection_id: ConnectionId,
    pub counterparty: Counterparty,
    pub client_id: ClientId,
    pub counterparty_versions: Vec<Version>,
    /// Proof that the counterparty stored its connection end in state `INIT`.
    pub proof_init: CommitmentProof,
    /// Proof of the consensus state the counterparty's client stores for this chain.
    pub proof_consensus: CommitmentProof,
    pub proof_height: Height,
    pub consensus_height: Height,
}

impl Msg for MsgConnectionOpenTry {
    type Raw = RawMsgConnectionOpenTry;

    fn type_url(&self) -> String {
        TYPE_URL.to_string()
    }
}

impl Protobuf<RawMsgConnectionOpenTry> for MsgConnectionOpenTry {}

impl TryFrom<RawMsgConnectionOpenTry> for MsgConnectionOpenTry {
    type Error = Error;

    fn try_from(msg: RawMsgConnectionOpenTry) -> Result<Self, Self::Error> {
        let counterparty_versions = msg
            .counterparty_versions
            .into_iter()
            .map(Version::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        if counterparty_versions.is_empty() {
            return Err(Error::empty_versions());
        }

        Ok(Self {
            connection_id: msg
                .connection_id
                .parse()
                .map_err(Error::invalid_identifier)?,
            counterparty: msg
                .counterparty
                .ok_or_else(Error::missing_counterparty)?
                .try_into()?,
            client_id: msg.client_id.parse().map_err(Error::invalid_identifier)?,
            counterparty_versions,
            proof_init: decode_proof(msg.proof_init, "init")?,
            proof_consensus: decode_proof(msg.proof_consensus, "consensus")?,
            proof_height: optional_height(msg.proof_height)
                .ok_or_else(Error::missing_proof_height)?,
            consensus_height: optional_height(msg.consensus_height)
                .ok_or_else(Error::missing_consensus_height)?,
        })
    }
}

impl From<MsgConnectionOpenTry> for RawMsgConnectionOpenTry {
    fn from(ics_msg: MsgConnectionOpenTry) -> Self {
        RawMsgConnectionOpenTry {
            connection_id: ics_msg.connection_id.as_str().to_string(),
            counterparty: Some(ics_msg.counterparty.into()),
            client_id: ics_msg.client_id.as_str().to_string(),
            counterparty_versions: ics_msg
                .counterparty_versions
                .into_iter()
                .map(Into::into)
                .collect(),
            proof_init: Some(ics_msg.proof_init.into()),
            proof_consensus: Some(ics_msg.proof_consensus.into()),
            proof_height: Some(ics_msg.proof_height.into()),
            consensus_height: Some(ics_msg.consensus_height.into()),
        }
    }
}

#[cfg(test)]
pub mod test_util {
    use ibc_verify_proto::ibc::core::connection::v1::MsgConnectionOpenTry as RawMsgConnectionOpenTry;

    use crate::core::ics03_connection::msgs::test_util::{
        get_dummy_proof, get_dummy_raw_counterparty, get_dummy_raw_height,
    };
    use crate::core::ics03_connection::version::get_compatible_versions;

    /// Returns a dummy message, for testing only.
    pub fn get_dummy_raw_msg_conn_open_try(
        proof_height: u64,
        consensus_height: u64,
    ) -> RawMsgConnectionOpenTry {
        RawMsgConnectionOpenTry {
            connection_id: "srcconnection".to_string(),
            counterparty: Some(get_dummy_raw_counterparty("destconnection")),
            client_id: "07-tendermint-0".to_string(),
            counterparty_versions: get_compatible_versions()
                .into_iter()
                .map(Into::into)
                .collect(),
            proof_init: get_dummy_proof(),
            proof_consensus: get_dummy_proof(),
            proof_height: get_dummy_raw_height(proof_height),
            consensus_height: get_dummy_raw_height(consensus_height),
        }
    }
}
