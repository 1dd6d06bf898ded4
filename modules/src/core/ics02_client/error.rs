use core::time::Duration;

use flex_error::{define_error, DisplayOnly};

use ibc_verify_proto::protobuf::Error as ProtoError;

use crate::clients::ics06_solomachine::error::Error as Ics06Error;
use crate::clients::ics07_tendermint::error::Error as Ics07Error;
use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics23_commitment::commitment::CommitmentType;
use crate::core::ics23_commitment::error::Error as Ics23Error;
use crate::core::ics24_host::error::ValidationError;
use crate::core::ics24_host::identifier::ClientId;
use crate::Height;

define_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    Error {
        UnknownClientType
            { client_type: String }
            | e | { format_args!("unknown client type: {0}", e.client_type) },

        ClientNotFound
            { client_id: ClientId }
            | e | { format_args!("client not found: {0}", e.client_id) },

        ClientFrozen
            { client_id: ClientId }
            | e | { format_args!("client is frozen: {0}", e.client_id) },

        ConsensusStateNotFound
            { client_id: ClientId, height: Height }
            | e | {
                format_args!("consensus state not found at: {0} at height {1}",
                    e.client_id, e.height)
            },

        ClientArgsTypeMismatch
            { client_type: ClientType }
            | e | {
                format_args!("mismatch between client and arguments types, expected: {0}",
                    e.client_type)
            },

        InvalidCommitmentType
            {
                expected: CommitmentType,
                found: CommitmentType,
            }
            | e | {
                format_args!("client expects {0} commitments but was given {1}",
                    e.expected, e.found)
            },

        UnknownClientStateType
            { client_state_type: String }
            | e | { format_args!("unknown client state type: {0}", e.client_state_type) },

        UnknownConsensusStateType
            { consensus_state_type: String }
            | e | {
                format_args!("unknown client consensus state type: {0}",
                    e.consensus_state_type)
            },

        UnknownMisbehaviourType
            { misbehaviour_type: String }
            | e | { format_args!("unknown misbehaviour type: {0}", e.misbehaviour_type) },

        DecodeRawClientState
            [ DisplayOnly<ProtoError> ]
            | _ | { "error decoding raw client state" },

        DecodeRawConsensusState
            [ DisplayOnly<ProtoError> ]
            | _ | { "error decoding raw consensus state" },

        DecodeRawMisbehaviour
            [ DisplayOnly<ProtoError> ]
            | _ | { "error decoding raw misbehaviour" },

        MissingRawMisbehaviour
            | _ | { "missing raw misbehaviour" },

        InvalidRawClientId
            { client_id: String }
            [ ValidationError ]
            | e | { format_args!("invalid raw client identifier {0}", e.client_id) },

        InvalidTrustThreshold
            { numerator: u64, denominator: u64 }
            | e | {
                format_args!("trust threshold {0}/{1} is not in the range [0, 1)",
                    e.numerator, e.denominator)
            },

        InvalidHeightResult
            | _ | { "height cannot end up zero or negative" },

        ClientAlreadyFrozen
            {
                frozen_height: Height,
                evidence_height: Height,
            }
            | e | {
                format_args!("client is already frozen at height {0}, which is not after the evidence height {1}",
                    e.frozen_height, e.evidence_height)
            },

        InvalidHeight
            {
                loaded_height: Height,
                evidence_height: Height,
            }
            | e | {
                format_args!("trusted consensus state height {0} is greater than the evidence height {1}",
                    e.loaded_height, e.evidence_height)
            },

        UnbondingPeriodExpired
            {
                elapsed: Duration,
                unbonding_period: Duration,
            }
            | e | {
                format_args!("current time is past the unbonding period: {0:?} elapsed since the trusted consensus state, unbonding period is {1:?}",
                    e.elapsed, e.unbonding_period)
            },

        InvalidEvidence
            { reason: String }
            | e | { format_args!("invalid misbehaviour evidence: {0}", e.reason) },

        Tendermint
            [ Ics07Error ]
            | _ | { "tendermint error" },

        SoloMachine
            [ Ics06Error ]
            | _ | { "solo machine error" },

        Ics23Verification
            [ Ics23Error ]
            | _ | { "ics23 commitment error" },
    }
}

impl Error {
    /// Whether this rejects misbehaviour evidence itself: stale, undecodable, structurally
    /// malformed or not attributable to the trusted signers. Unbonding-period expiry counts.
    pub fn is_invalid_evidence(&self) -> bool {
        matches!(
            self.detail(),
            ErrorDetail::InvalidEvidence(_)
                | ErrorDetail::DecodeRawMisbehaviour(_)
                | ErrorDetail::ClientAlreadyFrozen(_)
                | ErrorDetail::UnbondingPeriodExpired(_)
        )
    }
}
