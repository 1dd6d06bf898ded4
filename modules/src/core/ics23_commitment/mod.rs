//! ICS 23: Commitment proofs, prefixes and roots.

pub mod commitment;
pub mod error;
pub mod merkle;
pub mod signature;
pub mod specs;
