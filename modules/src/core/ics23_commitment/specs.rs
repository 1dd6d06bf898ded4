//! Proof specs describing how the host's Merkle store lays out its leaves and inner nodes.

use ics23::{HashOp, InnerOp, LeafOp, LengthOp, ProofSpec};

/// Prefix byte of an inner node: `sha256(0x01 || left || right)`.
pub const INNER_PREFIX: u8 = 1;

/// Prefix byte of a leaf: `sha256(0x00 || varint(len(key)) || key || varint(len(value)) || value)`.
pub const LEAF_PREFIX: u8 = 0;

/// The leaf layout of a store.
///
/// Stores keep only the hash of each value, so the proven value is that hash and is not
/// hashed again inside the leaf.
pub fn leaf_op() -> LeafOp {
    LeafOp {
        hash: HashOp::Sha256 as i32,
        prehash_key: HashOp::NoHash as i32,
        prehash_value: HashOp::NoHash as i32,
        length: LengthOp::VarProto as i32,
        prefix: vec![LEAF_PREFIX],
    }
}

/// The inner step hashing `node` as the left child of `sibling`.
pub fn left_child_op(sibling: &[u8]) -> InnerOp {
    InnerOp {
        hash: HashOp::Sha256 as i32,
        prefix: vec![INNER_PREFIX],
        suffix: sibling.to_vec(),
    }
}

/// The inner step hashing `node` as the right child of `sibling`.
pub fn right_child_op(sibling: &[u8]) -> InnerOp {
    let mut prefix = Vec::with_capacity(sibling.len() + 1);
    prefix.push(INNER_PREFIX);
    prefix.extend_from_slice(sibling);
    InnerOp {
        hash: HashOp::Sha256 as i32,
        prefix,
        suffix: vec![],
    }
}

/// Spec of a single store: the tendermint binary tree with the leaf layout of [`leaf_op`].
pub fn store_spec() -> ProofSpec {
    ProofSpec {
        leaf_spec: Some(leaf_op()),
        ..ics23::tendermint_spec()
    }
}

/// One spec per level of a chained proof, ordered leaf to root.
#[derive(Clone, Debug, PartialEq)]
pub struct ProofSpecs {
    specs: Vec<ProofSpec>,
}

impl ProofSpecs {
    /// Specs for a key held in a sub-store, committed under the application hash.
    pub fn multi_store() -> Self {
        Self {
            specs: vec![store_spec(), store_spec()],
        }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProofSpec> {
        self.specs.iter()
    }
}

impl Default for ProofSpecs {
    fn default() -> Self {
        Self::multi_store()
    }
}

impl From<Vec<ProofSpec>> for ProofSpecs {
    fn from(specs: Vec<ProofSpec>) -> Self {
        Self { specs }
    }
}
