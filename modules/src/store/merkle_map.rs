use std::borrow::Cow;

use ics23::{ExistenceProof, NonExistenceProof};
use prost::encoding::encode_varint;
use sha2::{Digest, Sha256};

use crate::core::ics23_commitment::specs::leaf_op;
use crate::store::simple_merkle::{hash_from_byte_slices, proofs_from_byte_slices};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct KvPair {
    key: Vec<u8>,
    value_hash: Vec<u8>,
}

/// An insertion-ordered list of key/value-hash pairs whose root is independent of the order
/// of insertion.
///
/// Values are hashed on [`MerkleMap::set`] and never kept raw. The pairs are sorted lazily:
/// `set` clears the `sorted` flag and [`MerkleMap::hash`] sorts only when the flag is clear.
/// Keys are expected to be unique; a duplicate key is appended as a second pair, not merged.
#[derive(Clone, Debug, Default)]
pub struct MerkleMap {
    kvs: Vec<KvPair>,
    sorted: bool,
}

impl MerkleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<Vec<u8>>, value: &[u8]) {
        self.sorted = false;
        self.kvs.push(KvPair {
            key: key.into(),
            value_hash: value_hash(value),
        });
    }

    pub fn len(&self) -> usize {
        self.kvs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kvs.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The Merkle root over the sorted leaves `kv_pair_bytes(key, value_hash)`.
    pub fn hash(&mut self) -> Vec<u8> {
        self.sort();
        hash_from_byte_slices(&leaves(&self.kvs))
    }

    /// Proves that `key` is present. The proven value is the hash of the stored value. Returns
    /// `None` if the key is absent.
    pub fn prove(&self, key: &[u8]) -> Option<ExistenceProof> {
        let kvs = self.sorted_pairs();
        let index = kvs.iter().position(|kv| kv.key == key)?;
        Some(existence_proof(&kvs, index))
    }

    /// Proves that `key` is absent by exhibiting its sorted neighbours. Returns `None` if the key
    /// is present or the map is empty.
    pub fn prove_absence(&self, key: &[u8]) -> Option<NonExistenceProof> {
        let kvs = self.sorted_pairs();
        if kvs.is_empty() || kvs.iter().any(|kv| kv.key == key) {
            return None;
        }

        let right = kvs.partition_point(|kv| kv.key.as_slice() < key);

        Some(NonExistenceProof {
            key: key.to_vec(),
            left: right.checked_sub(1).map(|i| existence_proof(&kvs, i)),
            right: (right < kvs.len()).then(|| existence_proof(&kvs, right)),
        })
    }

    fn sort(&mut self) {
        if !self.sorted {
            self.kvs.sort();
            self.sorted = true;
        }
    }

    fn sorted_pairs(&self) -> Cow<'_, [KvPair]> {
        if self.sorted {
            Cow::Borrowed(&self.kvs)
        } else {
            let mut kvs = self.kvs.clone();
            kvs.sort();
            Cow::Owned(kvs)
        }
    }
}

pub fn value_hash(value: &[u8]) -> Vec<u8> {
    Sha256::digest(value).to_vec()
}

/// Leaf encoding: `varint(len(key)) || key || varint(len(value_hash)) || value_hash`.
pub fn kv_pair_bytes(key: &[u8], value_hash: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(key.len() + value_hash.len() + 20);
    encode_varint(key.len() as u64, &mut buf);
    buf.extend_from_slice(key);
    encode_varint(value_hash.len() as u64, &mut buf);
    buf.extend_from_slice(value_hash);
    buf
}

fn leaves(kvs: &[KvPair]) -> Vec<Vec<u8>> {
    kvs.iter()
        .map(|kv| kv_pair_bytes(&kv.key, &kv.value_hash))
        .collect()
}

fn existence_proof(kvs: &[KvPair], index: usize) -> ExistenceProof {
    let (_, mut paths) = proofs_from_byte_slices(&leaves(kvs));

    ExistenceProof {
        key: kvs[index].key.clone(),
        value: kvs[index].value_hash.clone(),
        leaf: Some(leaf_op()),
        path: paths.swap_remove(index),
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use ics23::commitment_proof::Proof;
    use ics23::{
        calculate_existence_root, verify_membership, verify_non_membership, CommitmentProof,
        HostFunctionsManager,
    };

    use super::*;
    use crate::core::ics23_commitment::specs::store_spec;
    use crate::store::simple_merkle::empty_hash;

    fn map_of(pairs: &[(&str, &str)]) -> MerkleMap {
        let mut map = MerkleMap::new();
        for (k, v) in pairs {
            map.set(k.as_bytes(), v.as_bytes());
        }
        map
    }

    #[test]
    fn root_is_independent_of_insertion_order() {
        let mut first = map_of(&[("b", "2"), ("a", "1"), ("c", "3")]);
        let mut second = map_of(&[("a", "1"), ("c", "3"), ("b", "2")]);
        assert_eq!(first.hash(), second.hash());

        let pairs: Vec<(String, String)> = (0..40)
            .map(|i| (format!("key/{}", i * 7 % 40), format!("value-{}", i)))
            .collect();
        let mut forward = MerkleMap::new();
        let mut backward = MerkleMap::new();
        for (k, v) in pairs.iter() {
            forward.set(k.as_bytes(), v.as_bytes());
        }
        for (k, v) in pairs.iter().rev() {
            backward.set(k.as_bytes(), v.as_bytes());
        }
        assert_eq!(forward.hash(), backward.hash());
    }

    #[test]
    fn hash_is_idempotent_and_memoizes_the_sort() {
        let mut map = map_of(&[("b", "2"), ("a", "1")]);
        assert!(!map.is_sorted());

        let first = map.hash();
        assert!(map.is_sorted());
        assert_eq!(map.hash(), first);

        map.set("c", b"3");
        assert!(!map.is_sorted());
        assert_ne!(map.hash(), first);
    }

    #[test]
    fn values_change_the_root() {
        let mut one = map_of(&[("a", "1")]);
        let mut other = map_of(&[("a", "2")]);
        assert_ne!(one.hash(), other.hash());
    }

    #[test]
    fn empty_map_hashes_to_empty_root() {
        assert_eq!(MerkleMap::new().hash(), empty_hash());
    }

    #[test]
    fn duplicate_keys_are_appended() {
        let mut map = map_of(&[("a", "1"), ("a", "2")]);
        assert_eq!(map.len(), 2);
        let mut single = map_of(&[("a", "1")]);
        assert_ne!(map.hash(), single.hash());
    }

    #[test]
    fn leaf_encoding_is_varint_length_prefixed() {
        let vh = value_hash(b"1");
        let leaf = kv_pair_bytes(b"a", &vh);
        assert_eq!(leaf[0], 1);
        assert_eq!(leaf[1], b'a');
        assert_eq!(leaf[2], 32);
        assert_eq!(&leaf[3..], vh.as_slice());

        let long_key = vec![b'k'; 200];
        let leaf = kv_pair_bytes(&long_key, &vh);
        assert_eq!(&leaf[..2], &[0xc8, 0x01]);
    }

    fn exists(proof: ExistenceProof) -> CommitmentProof {
        CommitmentProof {
            proof: Some(Proof::Exist(proof)),
        }
    }

    fn absent(proof: NonExistenceProof) -> CommitmentProof {
        CommitmentProof {
            proof: Some(Proof::Nonexist(proof)),
        }
    }

    #[test]
    fn existence_proofs_reconstruct_the_root() {
        let mut map = map_of(&[("d", "4"), ("b", "2"), ("a", "1"), ("c", "3"), ("e", "5")]);
        let root = map.hash();
        for (key, value) in [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")] {
            let proof = map.prove(key.as_bytes()).expect("key is present");
            assert_eq!(
                calculate_existence_root::<HostFunctionsManager>(&proof).unwrap(),
                root
            );
            assert!(verify_membership::<HostFunctionsManager>(
                &exists(proof),
                &store_spec(),
                &root,
                key.as_bytes(),
                &value_hash(value.as_bytes()),
            ));
        }
        assert!(map.prove(b"z").is_none());
    }

    #[test]
    fn existence_proof_does_not_vouch_for_the_raw_value() {
        let mut map = map_of(&[("a", "1"), ("b", "2")]);
        let root = map.hash();
        let proof = exists(map.prove(b"a").expect("a is present"));
        assert!(!verify_membership::<HostFunctionsManager>(
            &proof,
            &store_spec(),
            &root,
            b"a",
            b"1",
        ));
    }

    #[test]
    fn absence_proofs_bracket_the_missing_key() {
        let mut map = map_of(&[("b", "2"), ("d", "4"), ("f", "6")]);
        let root = map.hash();
        let verifies = |proof: &NonExistenceProof, key: &[u8]| {
            verify_non_membership::<HostFunctionsManager>(
                &absent(proof.clone()),
                &store_spec(),
                &root,
                key,
            )
        };

        let middle = map.prove_absence(b"c").expect("c is absent");
        assert_eq!(middle.left.as_ref().map(|p| p.key.clone()), Some(b"b".to_vec()));
        assert_eq!(middle.right.as_ref().map(|p| p.key.clone()), Some(b"d".to_vec()));
        assert!(verifies(&middle, b"c"));

        let leftmost = map.prove_absence(b"a").expect("a is absent");
        assert!(leftmost.left.is_none());
        assert!(verifies(&leftmost, b"a"));

        let rightmost = map.prove_absence(b"g").expect("g is absent");
        assert!(rightmost.right.is_none());
        assert!(verifies(&rightmost, b"g"));

        // Neighbours that are not adjacent leave room for the key.
        let mut gap = middle.clone();
        gap.right = map.prove(b"f");
        assert!(!verifies(&gap, b"c"));

        assert!(map.prove_absence(b"d").is_none());
        assert!(MerkleMap::new().prove_absence(b"a").is_none());
    }
}
