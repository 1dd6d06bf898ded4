//! ibc-verify-proto gives the verification core access to its raw, protobuf-encoded wire types.

// This module setup is necessary because the prost definitions contain "super::" calls for
// dependencies between packages.

#![deny(trivial_casts, trivial_numeric_casts, unused_import_braces)]
#![allow(clippy::large_enum_variant)]
#![forbid(unsafe_code)]

pub mod protobuf;

pub mod google {
    pub mod protobuf {
        pub use prost_types::{Any, Duration, Timestamp};
    }
}

pub mod ibc {
    pub mod core {
        pub mod client {
            pub mod v1 {
                include!("prost/ibc.core.client.v1.rs");
            }
        }
        pub mod commitment {
            pub mod v1 {
                include!("prost/ibc.core.commitment.v1.rs");
            }
        }
        pub mod connection {
            pub mod v1 {
                include!("prost/ibc.core.connection.v1.rs");
            }
        }
    }
    pub mod lightclients {
        pub mod tendermint {
            pub mod v1 {
                include!("prost/ibc.lightclients.tendermint.v1.rs");
            }
        }
        pub mod solomachine {
            pub mod v1 {
                include!("prost/ibc.lightclients.solomachine.v1.rs");
            }
        }
    }
}
