use core::fmt;

use prost_types::Any;
use serde::{Deserialize, Serialize};
use subtle_encoding::hex;

use ibc_verify_proto::protobuf::Protobuf;

use crate::core::ics23_commitment::error::Error;
use crate::core::ics23_commitment::merkle::{
    MerklePath, MerklePrefix, MerkleProof, MERKLE_PREFIX_TYPE_URL, MERKLE_PROOF_TYPE_URL,
};
use crate::core::ics23_commitment::signature::{
    SignaturePrefix, SignatureProof, SIGNATURE_PREFIX_TYPE_URL, SIGNATURE_PROOF_TYPE_URL,
};

/// The store namespace IBC state is committed under on chains backed by a Merkle store.
pub const DEFAULT_PREFIX: &[u8] = b"ibc";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommitmentType {
    Signature,
    Merkle,
}

impl fmt::Display for CommitmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signature => write!(f, "signature"),
            Self::Merkle => write!(f, "merkle"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitmentRoot {
    bytes: Vec<u8>,
}

impl fmt::Debug for CommitmentRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = hex::encode_upper(&self.bytes);
        f.debug_tuple("CommitmentRoot")
            .field(&String::from_utf8_lossy(&hex))
            .finish()
    }
}

impl CommitmentRoot {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: Vec::from(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for CommitmentRoot {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

/// The namespace a counterparty commits its IBC state under.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitmentPrefix {
    Merkle(MerklePrefix),
    Signature(SignaturePrefix),
}

impl CommitmentPrefix {
    pub fn merkle(key_prefix: Vec<u8>) -> Self {
        Self::Merkle(MerklePrefix { key_prefix })
    }

    pub fn signature(key_prefix: Vec<u8>) -> Self {
        Self::Signature(SignaturePrefix { key_prefix })
    }

    pub fn commitment_type(&self) -> CommitmentType {
        match self {
            Self::Merkle(_) => CommitmentType::Merkle,
            Self::Signature(_) => CommitmentType::Signature,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Merkle(p) => &p.key_prefix,
            Self::Signature(p) => &p.key_prefix,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl Default for CommitmentPrefix {
    fn default() -> Self {
        Self::merkle(DEFAULT_PREFIX.to_vec())
    }
}

impl fmt::Debug for CommitmentPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(self.as_bytes()) {
            Ok(s) => write!(f, "{}({})", self.commitment_type(), s),
            Err(_) => write!(f, "{}({:?})", self.commitment_type(), self.as_bytes()),
        }
    }
}

impl TryFrom<Any> for CommitmentPrefix {
    type Error = Error;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        let decode_failure = |e: ibc_verify_proto::protobuf::Error| {
            Error::invalid_prefix(format!("{}: {}", raw.type_url, e))
        };

        match raw.type_url.as_str() {
            MERKLE_PREFIX_TYPE_URL => MerklePrefix::decode_vec(&raw.value)
                .map(Self::Merkle)
                .map_err(decode_failure),
            SIGNATURE_PREFIX_TYPE_URL => SignaturePrefix::decode_vec(&raw.value)
                .map(Self::Signature)
                .map_err(decode_failure),
            _ => Err(Error::invalid_prefix(format!(
                "unknown prefix type {}",
                raw.type_url
            ))),
        }
    }
}

impl From<CommitmentPrefix> for Any {
    fn from(prefix: CommitmentPrefix) -> Self {
        match prefix {
            CommitmentPrefix::Merkle(p) => Any {
                type_url: MERKLE_PREFIX_TYPE_URL.to_string(),
                value: p.encode_vec(),
            },
            CommitmentPrefix::Signature(p) => Any {
                type_url: SIGNATURE_PREFIX_TYPE_URL.to_string(),
                value: p.encode_vec(),
            },
        }
    }
}

/// A proof of (non-)membership, closed over the commitment schemes this crate understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitmentProof {
    Signature(SignatureProof),
    Merkle(MerkleProof),
}

impl CommitmentProof {
    pub fn commitment_type(&self) -> CommitmentType {
        match self {
            Self::Signature(_) => CommitmentType::Signature,
            Self::Merkle(_) => CommitmentType::Merkle,
        }
    }

    /// Verifies that `value` is stored under `path` in the state committed to by `root`.
    ///
    /// A signature proof accepts unconditionally: its signature is only meaningful against the
    /// signer's key and sign bytes, which the consuming client checks.
    pub fn verify_membership(
        &self,
        root: &CommitmentRoot,
        path: &MerklePath,
        value: &[u8],
    ) -> Result<(), Error> {
        match self {
            Self::Signature(_) => Ok(()),
            Self::Merkle(proof) => proof.verify_membership(root, path, value),
        }
    }

    /// Verifies that nothing is stored under `path` in the state committed to by `root`.
    pub fn verify_non_membership(
        &self,
        root: &CommitmentRoot,
        path: &MerklePath,
    ) -> Result<(), Error> {
        match self {
            Self::Signature(_) => Ok(()),
            Self::Merkle(proof) => proof.verify_non_membership(root, path),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Signature(proof) => proof.is_empty(),
            Self::Merkle(proof) => proof.is_empty(),
        }
    }

    pub fn validate_basic(&self) -> Result<(), Error> {
        match self {
            Self::Signature(proof) => proof.validate_basic(),
            Self::Merkle(proof) => proof.validate_basic(),
        }
    }
}

impl From<MerkleProof> for CommitmentProof {
    fn from(proof: MerkleProof) -> Self {
        Self::Merkle(proof)
    }
}

impl From<SignatureProof> for CommitmentProof {
    fn from(proof: SignatureProof) -> Self {
        Self::Signature(proof)
    }
}

/// Extracts a concrete proof from its envelope. An unknown type URL or an undecodable payload
/// is an invalid proof.
impl TryFrom<Any> for CommitmentProof {
    type Error = Error;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        let decode_failure = |e: ibc_verify_proto::protobuf::Error| {
            Error::invalid_proof(format!("malformed {} payload: {}", raw.type_url, e))
        };

        match raw.type_url.as_str() {
            SIGNATURE_PROOF_TYPE_URL => SignatureProof::decode_vec(&raw.value)
                .map(Self::Signature)
                .map_err(decode_failure),
            MERKLE_PROOF_TYPE_URL => MerkleProof::decode_vec(&raw.value)
                .map(Self::Merkle)
                .map_err(decode_failure),
            _ => Err(Error::invalid_proof(format!(
                "unknown proof type {}",
                raw.type_url
            ))),
        }
    }
}

impl From<CommitmentProof> for Any {
    fn from(proof: CommitmentProof) -> Self {
        match proof {
            CommitmentProof::Signature(p) => Any {
                type_url: SIGNATURE_PROOF_TYPE_URL.to_string(),
                value: p.encode_vec(),
            },
            CommitmentProof::Merkle(p) => Any {
                type_url: MERKLE_PROOF_TYPE_URL.to_string(),
                value: p.encode_vec(),
            },
        }
    }
}
