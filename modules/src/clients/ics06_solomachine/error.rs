use flex_error::{define_error, DisplayOnly};

use crate::core::ics24_host::error::ValidationError;

define_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    Error {
        InvalidPublicKey
            { reason: String }
            | e | { format_args!("invalid ed25519 public key: {}", e.reason) },

        InvalidSignature
            [ DisplayOnly<ed25519_dalek::SignatureError> ]
            | _ | { "signature does not verify against the solo machine public key" },

        InvalidClientIdentifier
            [ ValidationError ]
            | _ | { "invalid client identifier" },

        MissingRawField
            { field: String }
            | e | { format_args!("missing raw field: {}", e.field) },

        InvalidMisbehaviour
            { reason: String }
            | e | { format_args!("invalid misbehaviour: {}", e.reason) },

        SequenceMismatch
            { expected: u64, found: u64 }
            | e | {
                format_args!("proof is for sequence {1} but the client is at sequence {0}",
                    e.expected, e.found)
            },

        ClientFrozen
            { frozen_sequence: u64 }
            | e | { format_args!("solo machine client is frozen at sequence {}", e.frozen_sequence) },
    }
}
