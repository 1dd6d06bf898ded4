use core::fmt::Debug;

use serde::{Deserialize, Serialize};

use ibc_verify_proto::google::protobuf::Any;
use ibc_verify_proto::protobuf::Protobuf;

use crate::clients::ics06_solomachine::consensus_state::ConsensusState as SoloMachineConsensusState;
use crate::clients::ics07_tendermint::consensus_state::ConsensusState as TmConsensusState;
use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics02_client::error::Error;
use crate::timestamp::Timestamp;

pub const TENDERMINT_CONSENSUS_STATE_TYPE_URL: &str =
    "/ibc.lightclients.tendermint.v1.ConsensusState";
pub const SOLOMACHINE_CONSENSUS_STATE_TYPE_URL: &str =
    "/ibc.lightclients.solomachine.v1.ConsensusState";

pub trait ConsensusState: Clone + Debug + Send + Sync {
    /// Type of client associated with this consensus state (eg. Tendermint)
    fn client_type(&self) -> ClientType;

    /// The timestamp of the consensus state
    fn timestamp(&self) -> Timestamp;

    /// Wrap into an `AnyConsensusState`
    fn wrap_any(self) -> AnyConsensusState;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnyConsensusState {
    Tendermint(TmConsensusState),
    SoloMachine(SoloMachineConsensusState),
}

impl AnyConsensusState {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::Tendermint(cs_state) => cs_state.timestamp,
            Self::SoloMachine(cs_state) => cs_state.timestamp,
        }
    }

    pub fn client_type(&self) -> ClientType {
        match self {
            AnyConsensusState::Tendermint(_cs) => ClientType::Tendermint,
            AnyConsensusState::SoloMachine(_cs) => ClientType::SoloMachine,
        }
    }
}

impl Protobuf<Any> for AnyConsensusState {}

impl TryFrom<Any> for AnyConsensusState {
    type Error = Error;

    fn try_from(value: Any) -> Result<Self, Self::Error> {
        match value.type_url.as_str() {
            TENDERMINT_CONSENSUS_STATE_TYPE_URL => Ok(AnyConsensusState::Tendermint(
                TmConsensusState::decode_vec(&value.value)
                    .map_err(Error::decode_raw_consensus_state)?,
            )),

            SOLOMACHINE_CONSENSUS_STATE_TYPE_URL => Ok(AnyConsensusState::SoloMachine(
                SoloMachineConsensusState::decode_vec(&value.value)
                    .map_err(Error::decode_raw_consensus_state)?,
            )),

            _ => Err(Error::unknown_consensus_state_type(value.type_url)),
        }
    }
}

impl From<AnyConsensusState> for Any {
    fn from(value: AnyConsensusState) -> Self {
        match value {
            AnyConsensusState::Tendermint(value) => Any {
                type_url: TENDERMINT_CONSENSUS_STATE_TYPE_URL.to_string(),
                value: value.encode_vec(),
            },
            AnyConsensusState::SoloMachine(value) => Any {
                type_url: SOLOMACHINE_CONSENSUS_STATE_TYPE_URL.to_string(),
                value: value.encode_vec(),
            },
        }
    }
}

impl ConsensusState for AnyConsensusState {
    fn client_type(&self) -> ClientType {
        self.client_type()
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp()
    }

    fn wrap_any(self) -> AnyConsensusState {
        self
    }
}

impl From<TmConsensusState> for AnyConsensusState {
    fn from(cs: TmConsensusState) -> Self {
        Self::Tendermint(cs)
    }
}

impl From<SoloMachineConsensusState> for AnyConsensusState {
    fn from(cs: SoloMachineConsensusState) -> Self {
        Self::SoloMachine(cs)
    }
}
