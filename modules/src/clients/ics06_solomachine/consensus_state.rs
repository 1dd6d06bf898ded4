use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use ibc_verify_proto::ibc::lightclients::solomachine::v1::ConsensusState as RawConsensusState;
use ibc_verify_proto::protobuf::Protobuf;

use crate::clients::ics06_solomachine::error::Error;
use crate::core::ics02_client::client_consensus::AnyConsensusState;
use crate::core::ics02_client::client_type::ClientType;
use crate::timestamp::Timestamp;

/// The key currently trusted to sign for the solo machine. The diversifier keeps signatures
/// made for one client from being replayed against another sharing the key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    pub public_key: [u8; 32],
    pub diversifier: String,
    pub timestamp: Timestamp,
}

impl ConsensusState {
    pub fn new(public_key: [u8; 32], diversifier: String, timestamp: Timestamp) -> Self {
        Self {
            public_key,
            diversifier,
            timestamp,
        }
    }

    pub fn verify_signature(&self, message: &[u8], signature: &[u8]) -> Result<(), Error> {
        let key = VerifyingKey::from_bytes(&self.public_key)
            .map_err(|e| Error::invalid_public_key(e.to_string()))?;
        let signature = Signature::from_slice(signature).map_err(Error::invalid_signature)?;
        key.verify(message, &signature)
            .map_err(Error::invalid_signature)
    }
}

impl crate::core::ics02_client::client_consensus::ConsensusState for ConsensusState {
    fn client_type(&self) -> ClientType {
        ClientType::SoloMachine
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn wrap_any(self) -> AnyConsensusState {
        AnyConsensusState::SoloMachine(self)
    }
}

impl Protobuf<RawConsensusState> for ConsensusState {}

impl TryFrom<RawConsensusState> for ConsensusState {
    type Error = Error;

    fn try_from(raw: RawConsensusState) -> Result<Self, Self::Error> {
        let public_key: [u8; 32] = raw.public_key.as_slice().try_into().map_err(|_| {
            Error::invalid_public_key(format!("expected 32 bytes, got {}", raw.public_key.len()))
        })?;

        Ok(Self {
            public_key,
            diversifier: raw.diversifier,
            timestamp: Timestamp::from_nanoseconds(raw.timestamp),
        })
    }
}

impl From<ConsensusState> for RawConsensusState {
    fn from(value: ConsensusState) -> Self {
        RawConsensusState {
            public_key: value.public_key.to_vec(),
            diversifier: value.diversifier,
            timestamp: value.timestamp.nanoseconds(),
        }
    }
}
