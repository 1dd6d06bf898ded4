//! Implementation of a global context mock. Used in testing handlers of all IBC modules.

pub mod context;
pub mod host;
