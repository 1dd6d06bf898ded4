//! ICS 02: Client implementation for verifying remote IBC-enabled chains.

pub mod client_consensus;
pub mod client_def;
pub mod client_state;
pub mod client_type;
pub mod context;
pub mod error;
pub mod events;
pub mod handler;
pub mod height;
pub mod misbehaviour;
pub mod msgs;
pub mod trust_threshold;
