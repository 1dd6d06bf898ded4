use core::fmt::Debug;

use serde::{Deserialize, Serialize};

use ibc_verify_proto::google::protobuf::Any;
use ibc_verify_proto::protobuf::Protobuf;

use crate::clients::ics06_solomachine::client_state::ClientState as SoloMachineClientState;
use crate::clients::ics07_tendermint::client_state::ClientState as TmClientState;
use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics02_client::error::Error;
use crate::Height;

pub const TENDERMINT_CLIENT_STATE_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.ClientState";
pub const SOLOMACHINE_CLIENT_STATE_TYPE_URL: &str =
    "/ibc.lightclients.solomachine.v1.ClientState";

pub trait ClientState: Clone + Debug + Send + Sync {
    /// Type of client associated with this state (eg. Tendermint)
    fn client_type(&self) -> ClientType;

    /// Latest height of consensus state
    fn latest_height(&self) -> Height;

    /// Height at which misbehaviour froze the client, if any.
    fn frozen_height(&self) -> Option<Height>;

    /// Freeze status of the client
    fn is_frozen(&self) -> bool {
        self.frozen_height().is_some()
    }

    /// Wrap into an `AnyClientState`
    fn wrap_any(self) -> AnyClientState;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnyClientState {
    Tendermint(TmClientState),
    SoloMachine(SoloMachineClientState),
}

impl AnyClientState {
    pub fn latest_height(&self) -> Height {
        match self {
            Self::Tendermint(tm_state) => tm_state.latest_height(),
            Self::SoloMachine(sm_state) => ClientState::latest_height(sm_state),
        }
    }

    pub fn frozen_height(&self) -> Option<Height> {
        match self {
            Self::Tendermint(tm_state) => tm_state.frozen_height,
            Self::SoloMachine(sm_state) => sm_state.frozen_height(),
        }
    }

    pub fn client_type(&self) -> ClientType {
        match self {
            Self::Tendermint(state) => state.client_type(),
            Self::SoloMachine(state) => state.client_type(),
        }
    }
}

impl Protobuf<Any> for AnyClientState {}

impl TryFrom<Any> for AnyClientState {
    type Error = Error;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            TENDERMINT_CLIENT_STATE_TYPE_URL => Ok(AnyClientState::Tendermint(
                TmClientState::decode_vec(&raw.value).map_err(Error::decode_raw_client_state)?,
            )),

            SOLOMACHINE_CLIENT_STATE_TYPE_URL => Ok(AnyClientState::SoloMachine(
                SoloMachineClientState::decode_vec(&raw.value)
                    .map_err(Error::decode_raw_client_state)?,
            )),

            _ => Err(Error::unknown_client_state_type(raw.type_url)),
        }
    }
}

impl From<AnyClientState> for Any {
    fn from(value: AnyClientState) -> Self {
        match value {
            AnyClientState::Tendermint(value) => Any {
                type_url: TENDERMINT_CLIENT_STATE_TYPE_URL.to_string(),
                value: value.encode_vec(),
            },
            AnyClientState::SoloMachine(value) => Any {
                type_url: SOLOMACHINE_CLIENT_STATE_TYPE_URL.to_string(),
                value: value.encode_vec(),
            },
        }
    }
}

impl ClientState for AnyClientState {
    fn client_type(&self) -> ClientType {
        self.client_type()
    }

    fn latest_height(&self) -> Height {
        self.latest_height()
    }

    fn frozen_height(&self) -> Option<Height> {
        self.frozen_height()
    }

    fn wrap_any(self) -> AnyClientState {
        self
    }
}

impl From<TmClientState> for AnyClientState {
    fn from(cs: TmClientState) -> Self {
        Self::Tendermint(cs)
    }
}

impl From<SoloMachineClientState> for AnyClientState {
    fn from(cs: SoloMachineClientState) -> Self {
        Self::SoloMachine(cs)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::core::ics02_client::error::ErrorDetail;
    use crate::test_utils::SoloMachineSigner;

    #[test]
    fn any_envelope_carries_the_client_kind() {
        let state: AnyClientState =
            SoloMachineClientState::new(1, SoloMachineSigner::new(3, "d").consensus_state())
                .into();
        let any: Any = state.clone().into();
        assert_eq!(any.type_url, SOLOMACHINE_CLIENT_STATE_TYPE_URL);
        assert_eq!(AnyClientState::try_from(any).unwrap(), state);
    }

    #[test]
    fn unknown_type_url_is_rejected() {
        let err = AnyClientState::try_from(Any {
            type_url: "/ibc.mock.ClientState".to_string(),
            value: vec![],
        })
        .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::UnknownClientStateType(_)));
    }

    #[test]
    fn garbage_payload_is_a_decode_error() {
        let err = AnyClientState::try_from(Any {
            type_url: TENDERMINT_CLIENT_STATE_TYPE_URL.to_string(),
            value: vec![0xff, 0xff, 0xff],
        })
        .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::DecodeRawClientState(_)));
    }
}
