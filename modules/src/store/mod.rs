//! Deterministic state commitment for the host chain.
//!
//! A [`MerkleMap`] turns an unordered set of key/value pairs into a single root hash. A
//! [`MultiStore`] applies the same construction twice: once per named sub-store, then over the
//! `(store name, sub-store root)` pairs, yielding the application hash committed in a block.

pub mod merkle_map;
pub mod multi_store;
pub mod simple_merkle;

pub use merkle_map::MerkleMap;
pub use multi_store::MultiStore;
