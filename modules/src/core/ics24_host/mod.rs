//! ICS 24: Host defines the identifiers and the store paths a chain hosting the verification
//! core commits its state under.

pub use path::Path;

pub mod error;
pub mod identifier;
pub mod path;
pub mod validate;
