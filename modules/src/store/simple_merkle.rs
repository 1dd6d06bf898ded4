//! Binary Merkle tree over byte slices, following RFC 6962.
//!
//! Leaves and inner nodes are domain separated (`0x00` and `0x01` prefixes). Each level pairs
//! adjacent nodes from the left; an odd trailing node is promoted unchanged to the next level.

use ics23::InnerOp;
use sha2::{Digest, Sha256};

use crate::core::ics23_commitment::specs::{
    left_child_op, right_child_op, INNER_PREFIX, LEAF_PREFIX,
};

/// Root of a tree with no leaves: the hash of the empty string.
pub fn empty_hash() -> Vec<u8> {
    Sha256::digest(b"").to_vec()
}

pub fn leaf_hash(leaf: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(leaf);
    hasher.finalize().to_vec()
}

pub fn inner_hash(left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update([INNER_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().to_vec()
}

/// Computes the Merkle root of the given items, in the given order.
pub fn hash_from_byte_slices<T: AsRef<[u8]>>(items: &[T]) -> Vec<u8> {
    let leaves = items.iter().map(|item| leaf_hash(item.as_ref())).collect();
    let levels = build_levels(leaves);
    root_of(&levels)
}

/// Computes the root of the given items together with, for each item, the inner steps leading
/// from its leaf hash up to the root. Levels where the node is promoted without a sibling
/// contribute no step.
pub fn proofs_from_byte_slices<T: AsRef<[u8]>>(items: &[T]) -> (Vec<u8>, Vec<Vec<InnerOp>>) {
    let leaves: Vec<Vec<u8>> = items.iter().map(|item| leaf_hash(item.as_ref())).collect();
    let total = leaves.len();
    let levels = build_levels(leaves);
    let root = root_of(&levels);

    let paths = (0..total).map(|index| path_of(&levels, index)).collect();

    (root, paths)
}

fn build_levels(leaves: Vec<Vec<u8>>) -> Vec<Vec<Vec<u8>>> {
    let mut levels = vec![leaves];
    loop {
        let top = &levels[levels.len() - 1];
        if top.len() <= 1 {
            return levels;
        }
        let next = next_level(top);
        levels.push(next);
    }
}

fn next_level(level: &[Vec<u8>]) -> Vec<Vec<u8>> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => inner_hash(left, right),
            _ => pair[0].clone(),
        })
        .collect()
}

fn root_of(levels: &[Vec<Vec<u8>>]) -> Vec<u8> {
    levels
        .last()
        .and_then(|top| top.first())
        .cloned()
        .unwrap_or_else(empty_hash)
}

fn path_of(levels: &[Vec<Vec<u8>>], mut index: usize) -> Vec<InnerOp> {
    let mut path = vec![];
    for level in &levels[..levels.len() - 1] {
        if index % 2 == 1 {
            path.push(right_child_op(&level[index - 1]));
        } else if index + 1 < level.len() {
            path.push(left_child_op(&level[index + 1]));
        }
        index /= 2;
    }
    path
}
