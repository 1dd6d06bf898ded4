use serde::{Deserialize, Serialize};

use ibc_verify_proto::ibc::lightclients::solomachine::v1::ClientState as RawClientState;
use ibc_verify_proto::protobuf::Protobuf;

use crate::clients::ics06_solomachine::consensus_state::ConsensusState;
use crate::clients::ics06_solomachine::error::Error;
use crate::core::ics02_client::client_state::AnyClientState;
use crate::core::ics02_client::client_type::ClientType;
use crate::Height;

/// A solo machine's heights are its signature sequence numbers, all in revision zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    pub sequence: u64,
    /// Zero while the client is active.
    pub frozen_sequence: u64,
    pub consensus_state: ConsensusState,
}

impl ClientState {
    pub fn new(sequence: u64, consensus_state: ConsensusState) -> Self {
        Self {
            sequence,
            frozen_sequence: 0,
            consensus_state,
        }
    }

    pub fn with_frozen_sequence(self, sequence: u64) -> Self {
        Self {
            frozen_sequence: sequence,
            ..self
        }
    }

    /// Proofs must be signed at the client's current sequence.
    pub fn verify_height(&self, height: Height) -> Result<(), Error> {
        if self.frozen_sequence != 0 {
            return Err(Error::client_frozen(self.frozen_sequence));
        }
        if height.revision_height != self.sequence {
            return Err(Error::sequence_mismatch(
                self.sequence,
                height.revision_height,
            ));
        }
        Ok(())
    }
}

impl crate::core::ics02_client::client_state::ClientState for ClientState {
    fn client_type(&self) -> ClientType {
        ClientType::SoloMachine
    }

    fn latest_height(&self) -> Height {
        Height::new(0, self.sequence)
    }

    fn frozen_height(&self) -> Option<Height> {
        (self.frozen_sequence != 0).then(|| Height::new(0, self.frozen_sequence))
    }

    fn wrap_any(self) -> AnyClientState {
        AnyClientState::SoloMachine(self)
    }
}

impl Protobuf<RawClientState> for ClientState {}

impl TryFrom<RawClientState> for ClientState {
    type Error = Error;

    fn try_from(raw: RawClientState) -> Result<Self, Self::Error> {
        Ok(Self {
            sequence: raw.sequence,
            frozen_sequence: raw.frozen_sequence,
            consensus_state: raw
                .consensus_state
                .ok_or_else(|| Error::missing_raw_field("consensus_state".to_string()))?
                .try_into()?,
        })
    }
}

impl From<ClientState> for RawClientState {
    fn from(value: ClientState) -> Self {
        RawClientState {
            sequence: value.sequence,
            frozen_sequence: value.frozen_sequence,
            consensus_state: Some(value.consensus_state.into()),
        }
    }
}
