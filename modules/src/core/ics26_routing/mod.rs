//! ICS 26: Routing module keeps a lookup table of modules and hands every incoming message to the
//! handler of the module it belongs to.

pub mod context;
pub mod error;
pub mod handler;
pub mod msgs;
