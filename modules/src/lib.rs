#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![allow(clippy::large_enum_variant)]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

//! Verification core of an inter-blockchain communication stack.
//!
//! - ICS 02: Client, including misbehaviour submission
//! - ICS 03: Connection handshake
//! - ICS 06: Solo Machine Client
//! - ICS 07: Tendermint Client
//! - ICS 23: Vector Commitment Scheme
//! - ICS 24: Host Requirements
//! - ICS 26: Routing
//!
//! The [`store`] module builds the Merkle state roots the commitment proofs are checked against.

pub mod clients;
pub mod core;
pub mod events;
pub mod handler;
pub mod macros;
pub mod store;
pub mod timestamp;
pub mod tx_msg;

/// Re-export of ICS 002 Height domain type
pub type Height = crate::core::ics02_client::height::Height;

#[cfg(any(test, feature = "mocks"))]
pub mod test_utils;

#[cfg(any(test, feature = "mocks"))]
pub mod mock; // Context mock and the underlying host chain: for testing all handlers.
