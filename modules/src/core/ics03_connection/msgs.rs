//! Message definitions for the connection handshake datagrams (`ConnOpenInit`, `ConnOpenTry`,
//! `ConnOpenAck`, `ConnOpenConfirm`).
//!
//! Proofs arrive as `Any` envelopes and are decoded into a concrete [`CommitmentProof`] while the
//! message itself is decoded, so handlers only ever see typed proofs.

use ibc_verify_proto::google::protobuf::Any;

use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::msgs::conn_open_ack::MsgConnectionOpenAck;
use crate::core::ics03_connection::msgs::conn_open_confirm::MsgConnectionOpenConfirm;
use crate::core::ics03_connection::msgs::conn_open_init::MsgConnectionOpenInit;
use crate::core::ics03_connection::msgs::conn_open_try::MsgConnectionOpenTry;
use crate::core::ics23_commitment::commitment::CommitmentProof;

pub mod conn_open_ack;
pub mod conn_open_confirm;
pub mod conn_open_init;
pub mod conn_open_try;

/// Enumeration of all possible messages that the ICS3 protocol processes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionMsg {
    ConnectionOpenInit(MsgConnectionOpenInit),
    ConnectionOpenTry(Box<MsgConnectionOpenTry>),
    ConnectionOpenAck(Box<MsgConnectionOpenAck>),
    ConnectionOpenConfirm(MsgConnectionOpenConfirm),
}

/// Extracts the proof `name` from its envelope. An absent envelope is an error.
pub(crate) fn decode_proof(raw: Option<Any>, name: &str) -> Result<CommitmentProof, Error> {
    let raw = raw.ok_or_else(|| Error::missing_proof(name.to_string()))?;
    CommitmentProof::try_from(raw).map_err(Error::invalid_proof)
}


#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::core::ics03_connection::error::ErrorDetail;

    #[test]
    fn unknown_proof_envelope_is_an_invalid_proof() {
        let raw = Any {
            type_url: "/ibc.core.commitment.v1.Unknown".to_string(),
            value: vec![1, 2, 3],
        };
        let err = decode_proof(Some(raw), "init").unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidProof(_)));
    }

    #[test]
    fn absent_proof_is_reported_by_name() {
        let err = decode_proof(None, "ack").unwrap_err();
        match err.detail() {
            ErrorDetail::MissingProof(e) => assert_eq!(e.proof, "ack"),
            e => panic!("unexpected error {}", e),
        }
    }
}
