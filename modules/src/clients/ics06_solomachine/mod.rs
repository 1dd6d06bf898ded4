//! ICS 06: Solo Machine Client verifies the state of a single signer, such as a phone or a
//! hardware wallet, which proves state by signing it.

pub mod client_def;
pub mod client_state;
pub mod consensus_state;
pub mod error;
pub mod misbehaviour;
pub mod sign_bytes;
