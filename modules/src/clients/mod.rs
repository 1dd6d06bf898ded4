//! Light clients the verification core knows how to drive.

pub mod ics06_solomachine;
pub mod ics07_tendermint;
