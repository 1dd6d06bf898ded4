use serde::{Deserialize, Serialize};

use ibc_verify_proto::ibc::core::commitment::v1::{
    SignaturePrefix as RawSignaturePrefix, SignatureProof as RawSignatureProof,
};
use ibc_verify_proto::protobuf::Protobuf;

use crate::core::ics23_commitment::error::Error;

pub const SIGNATURE_PROOF_TYPE_URL: &str = "/ibc.core.commitment.v1.SignatureProof";
pub const SIGNATURE_PREFIX_TYPE_URL: &str = "/ibc.core.commitment.v1.SignaturePrefix";

/// A proof consisting of a single signature over the proven key and value.
///
/// The proof only carries its payload. Checking the signature needs the signer's public key and
/// the exact sign bytes, both of which belong to the client that consumes the proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureProof {
    pub signature: Vec<u8>,
}

impl SignatureProof {
    pub fn new(signature: Vec<u8>) -> Self {
        Self { signature }
    }

    pub fn is_empty(&self) -> bool {
        self.signature.is_empty()
    }

    pub fn validate_basic(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::invalid_proof("signature cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Protobuf<RawSignatureProof> for SignatureProof {}

impl TryFrom<RawSignatureProof> for SignatureProof {
    type Error = Error;

    fn try_from(raw: RawSignatureProof) -> Result<Self, Self::Error> {
        Ok(Self {
            signature: raw.signature,
        })
    }
}

impl From<SignatureProof> for RawSignatureProof {
    fn from(proof: SignatureProof) -> Self {
        Self {
            signature: proof.signature,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePrefix {
    pub key_prefix: Vec<u8>,
}

impl Protobuf<RawSignaturePrefix> for SignaturePrefix {}

impl TryFrom<RawSignaturePrefix> for SignaturePrefix {
    type Error = Error;

    fn try_from(raw: RawSignaturePrefix) -> Result<Self, Self::Error> {
        Ok(Self {
            key_prefix: raw.key_prefix,
        })
    }
}

impl From<SignaturePrefix> for RawSignaturePrefix {
    fn from(prefix: SignaturePrefix) -> Self {
        Self {
            key_prefix: prefix.key_prefix,
        }
    }
}
