use core::str::FromStr;

use serde::{Deserialize, Serialize};

use ibc_verify_proto::ibc::lightclients::solomachine::v1::{
    Misbehaviour as RawMisbehaviour, SignatureAndData as RawSignatureAndData,
};
use ibc_verify_proto::protobuf::Protobuf;

use crate::clients::ics06_solomachine::error::Error;
use crate::core::ics02_client::misbehaviour::AnyMisbehaviour;
use crate::core::ics24_host::identifier::ClientId;
use crate::Height;

pub const SOLOMACHINE_MISBEHAVIOUR_TYPE_URL: &str =
    "/ibc.lightclients.solomachine.v1.Misbehaviour";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureAndData {
    pub signature: Vec<u8>,
    pub data: Vec<u8>,
    pub timestamp: u64,
}

/// Two signatures by the solo machine over different data at the same sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misbehaviour {
    pub client_id: ClientId,
    pub sequence: u64,
    pub signature_one: SignatureAndData,
    pub signature_two: SignatureAndData,
}

impl Misbehaviour {
    pub fn validate_basic(&self) -> Result<(), Error> {
        if self.sequence == 0 {
            return Err(Error::invalid_misbehaviour(
                "sequence cannot be zero".to_string(),
            ));
        }

        for (name, sig) in [("one", &self.signature_one), ("two", &self.signature_two)] {
            if sig.signature.is_empty() {
                return Err(Error::invalid_misbehaviour(format!(
                    "signature {} is empty",
                    name
                )));
            }
            if sig.data.is_empty() {
                return Err(Error::invalid_misbehaviour(format!(
                    "data signed by signature {} is empty",
                    name
                )));
            }
        }

        if self.signature_one.data == self.signature_two.data {
            return Err(Error::invalid_misbehaviour(
                "both signatures are over the same data".to_string(),
            ));
        }

        Ok(())
    }
}

impl crate::core::ics02_client::misbehaviour::Misbehaviour for Misbehaviour {
    fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    fn height(&self) -> Height {
        Height::new(0, self.sequence)
    }

    fn wrap_any(self) -> AnyMisbehaviour {
        AnyMisbehaviour::SoloMachine(self)
    }
}

impl Protobuf<RawMisbehaviour> for Misbehaviour {}

impl TryFrom<RawMisbehaviour> for Misbehaviour {
    type Error = Error;

    fn try_from(raw: RawMisbehaviour) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: ClientId::from_str(&raw.client_id)
                .map_err(Error::invalid_client_identifier)?,
            sequence: raw.sequence,
            signature_one: raw
                .signature_one
                .ok_or_else(|| Error::missing_raw_field("signature_one".to_string()))?
                .into(),
            signature_two: raw
                .signature_two
                .ok_or_else(|| Error::missing_raw_field("signature_two".to_string()))?
                .into(),
        })
    }
}

impl From<Misbehaviour> for RawMisbehaviour {
    fn from(value: Misbehaviour) -> Self {
        RawMisbehaviour {
            client_id: value.client_id.to_string(),
            sequence: value.sequence,
            signature_one: Some(value.signature_one.into()),
            signature_two: Some(value.signature_two.into()),
        }
    }
}

impl From<RawSignatureAndData> for SignatureAndData {
    fn from(raw: RawSignatureAndData) -> Self {
        Self {
            signature: raw.signature,
            data: raw.data,
            timestamp: raw.timestamp,
        }
    }
}

impl From<SignatureAndData> for RawSignatureAndData {
    fn from(value: SignatureAndData) -> Self {
        Self {
            signature: value.signature,
            data: value.data,
            timestamp: value.timestamp,
        }
    }
}

impl core::fmt::Display for Misbehaviour {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{} sequence: {}", self.client_id, self.sequence)
    }
}
