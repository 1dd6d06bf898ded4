use ics23::commitment_proof::Proof;
use ics23::{
    calculate_existence_root, verify_membership, verify_non_membership, CommitmentProof,
    HostFunctionsManager, NonExistenceProof,
};
use serde::{Deserialize, Serialize};

use ibc_verify_proto::ibc::core::commitment::v1::{
    MerklePath as RawMerklePath, MerklePrefix as RawMerklePrefix, MerkleProof as RawMerkleProof,
};
use ibc_verify_proto::protobuf::Protobuf;

use crate::core::ics23_commitment::commitment::{CommitmentPrefix, CommitmentRoot};
use crate::core::ics23_commitment::error::Error;
use crate::core::ics23_commitment::specs::ProofSpecs;
use crate::store::merkle_map::value_hash;

pub const MERKLE_PROOF_TYPE_URL: &str = "/ibc.core.commitment.v1.MerkleProof";
pub const MERKLE_PREFIX_TYPE_URL: &str = "/ibc.core.commitment.v1.MerklePrefix";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePrefix {
    pub key_prefix: Vec<u8>,
}

impl Protobuf<RawMerklePrefix> for MerklePrefix {}

impl TryFrom<RawMerklePrefix> for MerklePrefix {
    type Error = Error;

    fn try_from(raw: RawMerklePrefix) -> Result<Self, Self::Error> {
        Ok(Self {
            key_prefix: raw.key_prefix,
        })
    }
}

impl From<MerklePrefix> for RawMerklePrefix {
    fn from(prefix: MerklePrefix) -> Self {
        Self {
            key_prefix: prefix.key_prefix,
        }
    }
}

/// Keys to prove, outermost store first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    pub key_path: Vec<String>,
}

impl core::fmt::Display for MerklePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.key_path.join("/"))
    }
}

impl From<MerklePath> for RawMerklePath {
    fn from(path: MerklePath) -> Self {
        Self {
            key_path: path.key_path,
        }
    }
}

/// Scopes `path` under the store namespace named by `prefix`.
pub fn apply_prefix(prefix: &CommitmentPrefix, path: String) -> Result<MerklePath, Error> {
    if prefix.is_empty() {
        return Err(Error::empty_commitment_prefix());
    }

    let store = String::from_utf8(prefix.as_bytes().to_vec())
        .map_err(|e| Error::invalid_prefix(e.to_string()))?;

    Ok(MerklePath {
        key_path: vec![store, path],
    })
}

/// A chain of proofs, ordered from leaf to root, one per key of a [`MerklePath`].
///
/// Stores commit to the hash of each value, so every level proves the hash of the value (or of
/// the subroot) computed by the level below.
#[derive(Clone, Debug, PartialEq)]
pub struct MerkleProof {
    pub proofs: Vec<CommitmentProof>,
}

// `ics23::CommitmentProof` only derives `PartialEq`, but contains no floating-point fields.
impl Eq for MerkleProof {}

impl MerkleProof {
    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    pub fn validate_basic(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::invalid_proof("merkle proof has no steps".to_string()));
        }
        Ok(())
    }

    pub fn verify_membership(
        &self,
        root: &CommitmentRoot,
        path: &MerklePath,
        value: &[u8],
    ) -> Result<(), Error> {
        let specs = ProofSpecs::default();
        self.check_shape(&specs, root, path)?;
        self.verify_chain(&specs, root, path, value_hash(value), 0)
    }

    pub fn verify_non_membership(
        &self,
        root: &CommitmentRoot,
        path: &MerklePath,
    ) -> Result<(), Error> {
        let specs = ProofSpecs::default();
        self.check_shape(&specs, root, path)?;

        let (proof, spec, key) = match (
            self.proofs.first(),
            specs.iter().next(),
            path.key_path.last(),
        ) {
            (Some(proof), Some(spec), Some(key)) => (proof, spec, key),
            _ => return Err(Error::invalid_proof("empty merkle proof".to_string())),
        };

        match &proof.proof {
            Some(Proof::Nonexist(non_existence_proof)) => {
                let subroot = calculate_non_existence_root(non_existence_proof)?;

                if !verify_non_membership::<HostFunctionsManager>(
                    proof,
                    spec,
                    &subroot,
                    key.as_bytes(),
                ) {
                    return Err(Error::verification_failure(key.clone()));
                }

                // The sub-store commits to the hash of its root one level up.
                self.verify_chain(&specs, root, path, value_hash(&subroot), 1)
            }
            _ => Err(Error::invalid_proof(
                "first step of a non-membership proof must prove absence".to_string(),
            )),
        }
    }

    fn check_shape(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
    ) -> Result<(), Error> {
        if root.is_empty() {
            return Err(Error::empty_commitment_root());
        }
        self.validate_basic()?;
        if self.proofs.len() != specs.len() {
            return Err(Error::number_of_specs_mismatch(self.proofs.len(), specs.len()));
        }
        if self.proofs.len() != path.key_path.len() {
            return Err(Error::proof_path_mismatch(
                self.proofs.len(),
                path.key_path.len(),
            ));
        }
        Ok(())
    }

    /// Checks every level from `start_index` up, feeding each computed subroot to the next.
    fn verify_chain(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
        value: Vec<u8>,
        start_index: usize,
    ) -> Result<(), Error> {
        let mut subroot = value.clone();
        let mut value = value;

        // Keys run root to leaf.
        for ((proof, spec), key) in self
            .proofs
            .iter()
            .zip(specs.iter())
            .zip(path.key_path.iter().rev())
            .skip(start_index)
        {
            match &proof.proof {
                Some(Proof::Exist(existence_proof)) => {
                    subroot = calculate_existence_root::<HostFunctionsManager>(existence_proof)
                        .map_err(|e| Error::invalid_proof(e.to_string()))?;

                    if !verify_membership::<HostFunctionsManager>(
                        proof,
                        spec,
                        &subroot,
                        key.as_bytes(),
                        &value,
                    ) {
                        return Err(Error::verification_failure(key.clone()));
                    }
                    value = value_hash(&subroot);
                }
                _ => {
                    return Err(Error::invalid_proof(
                        "non-existence step above the leaf level".to_string(),
                    ))
                }
            }
        }

        if root.as_bytes() != subroot.as_slice() {
            return Err(Error::root_mismatch());
        }
        Ok(())
    }
}

fn calculate_non_existence_root(proof: &NonExistenceProof) -> Result<Vec<u8>, Error> {
    let neighbour = proof
        .left
        .as_ref()
        .or(proof.right.as_ref())
        .ok_or_else(|| Error::invalid_proof("absence proof has no neighbours".to_string()))?;

    calculate_existence_root::<HostFunctionsManager>(neighbour)
        .map_err(|e| Error::invalid_proof(e.to_string()))
}

impl Protobuf<RawMerkleProof> for MerkleProof {}

impl TryFrom<RawMerkleProof> for MerkleProof {
    type Error = Error;

    fn try_from(raw: RawMerkleProof) -> Result<Self, Self::Error> {
        if raw.proofs.iter().any(|p| p.proof.is_none()) {
            return Err(Error::invalid_proof("empty proof step".to_string()));
        }
        Ok(Self { proofs: raw.proofs })
    }
}

impl From<MerkleProof> for RawMerkleProof {
    fn from(proof: MerkleProof) -> Self {
        Self {
            proofs: proof.proofs,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::core::ics23_commitment::error::ErrorDetail;
    use crate::store::MultiStore;

    fn committed() -> (MultiStore, CommitmentRoot) {
        let mut store = MultiStore::new();
        store.set("ibc", "connections/connection-0", b"open");
        store.set("ibc", "connections/connection-2", b"init");
        store.set("params", "max_validators", b"100");
        let root = CommitmentRoot::from_bytes(&store.root());
        (store, root)
    }

    fn ibc_path(key: &str) -> MerklePath {
        apply_prefix(&CommitmentPrefix::default(), key.to_string()).expect("valid prefix")
    }

    #[test]
    fn apply_prefix_rejects_empty_prefix() {
        let empty = CommitmentPrefix::Merkle(MerklePrefix { key_prefix: vec![] });
        assert!(apply_prefix(&empty, "connections/c1".to_string()).is_err());
        assert_eq!(
            ibc_path("connections/c1").key_path,
            vec!["ibc".to_string(), "connections/c1".to_string()]
        );
    }

    #[test]
    fn membership_requires_one_step_per_key() {
        let (mut store, root) = committed();
        let mut proof = store.prove("ibc", b"connections/connection-0").expect("present");
        proof.proofs.pop();
        assert!(proof
            .verify_membership(&root, &ibc_path("connections/connection-0"), b"open")
            .is_err());
    }

    #[test]
    fn membership_fails_against_another_root() {
        let (mut store, _) = committed();
        let proof = store.prove("ibc", b"connections/connection-0").expect("present");
        store.set("ibc", "connections/connection-1", b"try");
        let later = CommitmentRoot::from_bytes(&store.root());
        assert!(proof
            .verify_membership(&later, &ibc_path("connections/connection-0"), b"open")
            .is_err());
    }

    #[test]
    fn non_membership_rejects_non_adjacent_neighbours() {
        let (mut store, root) = committed();
        let mut proof = store
            .prove_absence("ibc", b"connections/connection-1")
            .expect("absent");
        assert!(proof
            .verify_non_membership(&root, &ibc_path("connections/connection-1"))
            .is_ok());

        if let Some(Proof::Nonexist(step)) = &mut proof.proofs[0].proof {
            step.right = None;
        }
        assert!(proof
            .verify_non_membership(&root, &ibc_path("connections/connection-1"))
            .is_err());
    }

    #[test]
    fn membership_is_checked_against_the_store_spec() {
        let (mut store, root) = committed();
        let path = ibc_path("connections/connection-0");
        let proof = store.prove("ibc", b"connections/connection-0").expect("present");
        assert!(proof.verify_membership(&root, &path, b"open").is_ok());

        // Same root, but the leaf claims to prehash its value: the store proof spec refuses it.
        let mut relabelled = proof.clone();
        if let Some(Proof::Exist(step)) = &mut relabelled.proofs[0].proof {
            if let Some(leaf) = step.leaf.as_mut() {
                leaf.prehash_value = ics23::HashOp::Sha256 as i32;
            }
        }
        let err = relabelled
            .verify_membership(&root, &path, b"open")
            .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::VerificationFailure(_)));

        let err = proof.verify_membership(&root, &path, b"init").unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::VerificationFailure(_)));
    }

    #[test]
    fn absence_step_cannot_sit_above_the_leaf() {
        let (mut store, root) = committed();
        let absence = store
            .prove_absence("ibc", b"connections/connection-1")
            .expect("absent");
        let mut proof = store.prove("ibc", b"connections/connection-0").expect("present");
        proof.proofs[1] = absence.proofs[0].clone();

        let err = proof
            .verify_membership(&root, &ibc_path("connections/connection-0"), b"open")
            .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidProof(_)));
    }

    #[test]
    fn raw_conversion_preserves_steps() {
        let (mut store, _) = committed();
        let proof = store
            .prove_absence("ibc", b"connections/connection-1")
            .expect("absent");
        let decoded = MerkleProof::decode_vec(&proof.encode_vec()).expect("decodes");
        assert_eq!(decoded, proof);
    }
}
