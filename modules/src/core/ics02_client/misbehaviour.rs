use core::fmt::Debug;

use serde::{Deserialize, Serialize};

use ibc_verify_proto::google::protobuf::Any;
use ibc_verify_proto::protobuf::Protobuf;

use crate::clients::ics06_solomachine::misbehaviour::{
    Misbehaviour as SoloMachineMisbehaviour, SOLOMACHINE_MISBEHAVIOUR_TYPE_URL,
};
use crate::clients::ics07_tendermint::misbehaviour::{
    Misbehaviour as TmMisbehaviour, TENDERMINT_MISBEHAVIOUR_TYPE_URL,
};
use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics02_client::error::Error;
use crate::core::ics24_host::identifier::ClientId;
use crate::Height;

pub trait Misbehaviour: Clone + Debug + Send + Sync {
    /// The client the evidence is submitted against.
    fn client_id(&self) -> &ClientId;

    /// The height of the conflicting claims.
    fn height(&self) -> Height;

    fn wrap_any(self) -> AnyMisbehaviour;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnyMisbehaviour {
    Tendermint(TmMisbehaviour),
    SoloMachine(SoloMachineMisbehaviour),
}

impl AnyMisbehaviour {
    pub fn client_type(&self) -> ClientType {
        match self {
            Self::Tendermint(_) => ClientType::Tendermint,
            Self::SoloMachine(_) => ClientType::SoloMachine,
        }
    }
}

impl Misbehaviour for AnyMisbehaviour {
    fn client_id(&self) -> &ClientId {
        match self {
            Self::Tendermint(misbehaviour) => misbehaviour.client_id(),
            Self::SoloMachine(misbehaviour) => misbehaviour.client_id(),
        }
    }

    fn height(&self) -> Height {
        match self {
            Self::Tendermint(misbehaviour) => misbehaviour.height(),
            Self::SoloMachine(misbehaviour) => misbehaviour.height(),
        }
    }

    fn wrap_any(self) -> AnyMisbehaviour {
        self
    }
}

impl Protobuf<Any> for AnyMisbehaviour {}

impl TryFrom<Any> for AnyMisbehaviour {
    type Error = Error;

    fn try_from(raw: Any) -> Result<Self, Error> {
        match raw.type_url.as_str() {
            TENDERMINT_MISBEHAVIOUR_TYPE_URL => Ok(AnyMisbehaviour::Tendermint(
                TmMisbehaviour::decode_vec(&raw.value).map_err(Error::decode_raw_misbehaviour)?,
            )),

            SOLOMACHINE_MISBEHAVIOUR_TYPE_URL => Ok(AnyMisbehaviour::SoloMachine(
                SoloMachineMisbehaviour::decode_vec(&raw.value)
                    .map_err(Error::decode_raw_misbehaviour)?,
            )),

            _ => Err(Error::unknown_misbehaviour_type(raw.type_url)),
        }
    }
}

impl From<AnyMisbehaviour> for Any {
    fn from(value: AnyMisbehaviour) -> Self {
        match value {
            AnyMisbehaviour::Tendermint(misbehaviour) => Any {
                type_url: TENDERMINT_MISBEHAVIOUR_TYPE_URL.to_string(),
                value: misbehaviour.encode_vec(),
            },
            AnyMisbehaviour::SoloMachine(misbehaviour) => Any {
                type_url: SOLOMACHINE_MISBEHAVIOUR_TYPE_URL.to_string(),
                value: misbehaviour.encode_vec(),
            },
        }
    }
}

impl From<TmMisbehaviour> for AnyMisbehaviour {
    fn from(misbehaviour: TmMisbehaviour) -> Self {
        Self::Tendermint(misbehaviour)
    }
}

impl From<SoloMachineMisbehaviour> for AnyMisbehaviour {
    fn from(misbehaviour: SoloMachineMisbehaviour) -> Self {
        Self::SoloMachine(misbehaviour)
    }
}

impl core::fmt::Display for AnyMisbehaviour {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        match self {
            AnyMisbehaviour::Tendermint(tm) => write!(f, "{}", tm),
            AnyMisbehaviour::SoloMachine(sm) => write!(f, "{}", sm),
        }
    }
}

/// The height checks every misbehaviour check starts with, before looking at the evidence.
///
/// A frozen client only accepts evidence of a strictly earlier fault, so the frozen height can
/// only move down. The trusted consensus state the evidence is checked against must not be newer
/// than the evidence.
pub fn check_evidence_height(
    frozen_height: Option<Height>,
    loaded_height: Height,
    evidence_height: Height,
) -> Result<(), Error> {
    if let Some(frozen_height) = frozen_height {
        if frozen_height <= evidence_height {
            return Err(Error::client_already_frozen(frozen_height, evidence_height));
        }
    }

    if loaded_height > evidence_height {
        return Err(Error::invalid_height(loaded_height, evidence_height));
    }

    Ok(())
}
