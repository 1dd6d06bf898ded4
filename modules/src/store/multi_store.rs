use std::collections::BTreeMap;

use ics23::commitment_proof::Proof;
use ics23::CommitmentProof;

use crate::core::ics23_commitment::merkle::MerkleProof;
use crate::store::merkle_map::MerkleMap;

/// A set of named sub-stores committed under one application hash.
///
/// The application hash is the [`MerkleMap`] root over `(store name, sub-store root)` pairs, so
/// a proof for a key is two chained steps: the key in its sub-store, then the sub-store root in
/// the outer map.
#[derive(Clone, Debug, Default)]
pub struct MultiStore {
    stores: BTreeMap<String, MerkleMap>,
}

impl MultiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_mut(&mut self, name: &str) -> &mut MerkleMap {
        self.stores.entry(name.to_string()).or_default()
    }

    pub fn set(&mut self, store: &str, key: impl Into<Vec<u8>>, value: &[u8]) {
        self.store_mut(store).set(key, value)
    }

    /// The application hash. Sorts every sub-store that has pending inserts.
    pub fn root(&mut self) -> Vec<u8> {
        self.outer().hash()
    }

    /// Chained membership proof for `key` in sub-store `store`, ordered leaf to root.
    pub fn prove(&mut self, store: &str, key: &[u8]) -> Option<MerkleProof> {
        let inner = self.stores.get(store)?.prove(key)?;
        let outer = self.outer().prove(store.as_bytes())?;

        Some(MerkleProof {
            proofs: vec![
                commitment_proof(Proof::Exist(inner)),
                commitment_proof(Proof::Exist(outer)),
            ],
        })
    }

    /// Chained non-membership proof for `key` in sub-store `store`: absence in the sub-store,
    /// then membership of the sub-store root.
    pub fn prove_absence(&mut self, store: &str, key: &[u8]) -> Option<MerkleProof> {
        let inner = self.stores.get(store)?.prove_absence(key)?;
        let outer = self.outer().prove(store.as_bytes())?;

        Some(MerkleProof {
            proofs: vec![
                commitment_proof(Proof::Nonexist(inner)),
                commitment_proof(Proof::Exist(outer)),
            ],
        })
    }

    fn outer(&mut self) -> MerkleMap {
        let mut outer = MerkleMap::new();
        for (name, store) in self.stores.iter_mut() {
            outer.set(name.as_bytes(), &store.hash());
        }
        outer
    }
}

fn commitment_proof(proof: Proof) -> CommitmentProof {
    CommitmentProof { proof: Some(proof) }
}
