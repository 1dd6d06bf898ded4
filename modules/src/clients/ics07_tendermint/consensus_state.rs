use serde::{Deserialize, Serialize};
use tendermint::validator::Set as ValidatorSet;

use ibc_verify_proto::ibc::core::commitment::v1::MerkleRoot;
use ibc_verify_proto::ibc::lightclients::tendermint::v1::ConsensusState as RawConsensusState;
use ibc_verify_proto::protobuf::Protobuf;

use crate::clients::ics07_tendermint::error::Error;
use crate::clients::ics07_tendermint::header::Header;
use crate::core::ics02_client::client_consensus::AnyConsensusState;
use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::timestamp::Timestamp;

/// A trusted snapshot of the counterparty chain at one height: when it was produced, its
/// application state root, and the validators trusted to sign what follows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    pub timestamp: Timestamp,
    pub root: CommitmentRoot,
    pub validator_set: ValidatorSet,
}

impl ConsensusState {
    pub fn new(root: CommitmentRoot, timestamp: Timestamp, validator_set: ValidatorSet) -> Self {
        Self {
            timestamp,
            root,
            validator_set,
        }
    }
}

impl crate::core::ics02_client::client_consensus::ConsensusState for ConsensusState {
    fn client_type(&self) -> ClientType {
        ClientType::Tendermint
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn wrap_any(self) -> AnyConsensusState {
        AnyConsensusState::Tendermint(self)
    }
}

impl Protobuf<RawConsensusState> for ConsensusState {}

impl TryFrom<RawConsensusState> for ConsensusState {
    type Error = Error;

    fn try_from(raw: RawConsensusState) -> Result<Self, Self::Error> {
        let timestamp = raw
            .timestamp
            .ok_or_else(|| Error::missing_raw_field("timestamp".to_string()))?
            .try_into()
            .map_err(Error::invalid_raw_timestamp)?;

        Ok(Self {
            timestamp,
            root: raw
                .root
                .ok_or_else(|| Error::missing_raw_field("root".to_string()))?
                .hash
                .into(),
            validator_set: raw
                .validator_set
                .ok_or_else(|| Error::missing_raw_field("validator_set".to_string()))?
                .try_into()
                .map_err(Error::invalid_validator_set)?,
        })
    }
}

impl From<ConsensusState> for RawConsensusState {
    fn from(value: ConsensusState) -> Self {
        RawConsensusState {
            timestamp: Some(value.timestamp.into()),
            root: Some(MerkleRoot {
                hash: value.root.into_vec(),
            }),
            validator_set: Some(value.validator_set.into()),
        }
    }
}

impl From<Header> for ConsensusState {
    fn from(header: Header) -> Self {
        Self {
            timestamp: header.timestamp(),
            root: header.app_hash(),
            validator_set: header.validator_set,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::core::ics24_host::identifier::ChainId;
    use crate::test_utils::{header, test_validator};

    #[test]
    fn header_becomes_a_consensus_state_that_survives_encoding() {
        let vals = [test_validator("1", 10), test_validator("2", 10)];
        let h = header(
            &ChainId::new("chain-b".to_string(), 0),
            4,
            Timestamp::from_seconds(1_000),
            b"app",
            &vals,
        );

        let cs = ConsensusState::from(h.clone());
        assert_eq!(cs.root.as_bytes(), b"app");
        assert_eq!(cs.timestamp, Timestamp::from_seconds(1_000));
        assert_eq!(cs.validator_set.hash(), h.signed_header.header.validators_hash);

        let decoded = ConsensusState::decode_vec(&cs.encode_vec()).unwrap();
        assert_eq!(decoded.validator_set.hash(), cs.validator_set.hash());
        assert_eq!(decoded.root, cs.root);
    }
}
