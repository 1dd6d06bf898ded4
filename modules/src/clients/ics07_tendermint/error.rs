use flex_error::{define_error, DisplayOnly};
use tendermint_light_client_verifier::errors::VerificationError;

use crate::core::ics24_host::error::ValidationError;
use crate::timestamp::TimestampError;
use crate::Height;

define_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    Error {
        InvalidTrustingPeriod
            { reason: String }
            | e | { format_args!("invalid trusting period: {}", e.reason) },

        InvalidUnbondingPeriod
            { reason: String }
            | e | { format_args!("invalid unbonding period: {}", e.reason) },

        InvalidTrustThreshold
            { reason: String }
            | e | { format_args!("invalid trust threshold: {}", e.reason) },

        Validation
            { reason: String }
            | e | { format_args!("invalid client state: {}", e.reason) },

        InvalidChainIdentifier
            [ ValidationError ]
            | _ | { "invalid chain identifier" },

        InvalidClientIdentifier
            [ ValidationError ]
            | _ | { "invalid client identifier" },

        MissingRawField
            { field: String }
            | e | { format_args!("missing raw field: {}", e.field) },

        InvalidRawTimestamp
            [ TimestampError ]
            | _ | { "invalid raw timestamp" },

        InvalidRawDuration
            { field: String }
            | e | { format_args!("negative duration in raw field: {}", e.field) },

        InvalidRawHeader
            [ DisplayOnly<tendermint::Error> ]
            | _ | { "invalid raw header" },

        InvalidValidatorSet
            [ DisplayOnly<tendermint::Error> ]
            | _ | { "invalid raw validator set" },

        CommitVerification
            [ DisplayOnly<VerificationError> ]
            | _ | { "commit signatures failed verification" },

        InsufficientHeight
            { latest_height: Height, target_height: Height }
            | e | {
                format_args!("the client's latest height {0} is lower than the proof height {1}",
                    e.latest_height, e.target_height)
            },

        ClientFrozen
            { frozen_height: Height, target_height: Height }
            | e | {
                format_args!("the client is frozen at height {0}, at or below the proof height {1}",
                    e.frozen_height, e.target_height)
            },

        InvalidHeader
            { reason: String }
            | e | { format_args!("invalid header: {}", e.reason) },

        InvalidMisbehaviour
            { reason: String }
            | e | { format_args!("invalid misbehaviour: {}", e.reason) },

        DuplicateValidator
            { address: String }
            | e | { format_args!("validator {} signed the commit more than once", e.address) },

        InsufficientVotingPower
            {
                tallied: u64,
                total: u64,
                trust_threshold: String,
            }
            | e | {
                format_args!("signers hold {0} of {1} trusted voting power, which does not exceed the trust threshold {2}",
                    e.tallied, e.total, e.trust_threshold)
            },
    }
}
