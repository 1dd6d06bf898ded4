use flex_error::{define_error, DisplayOnly};

use ibc_verify_proto::protobuf::Error as ProtoError;

use crate::core::ics02_client::error as client_error;
use crate::core::ics03_connection::connection::State;
use crate::core::ics23_commitment::error::Error as CommitmentError;
use crate::core::ics24_host::error::ValidationError;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::Height;

define_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    Error {
        Ics02Client
            [ client_error::Error ]
            | _ | { "ics02 client error" },

        InvalidState
            {
                connection_id: ConnectionId,
                expected: State,
                found: State,
            }
            | e | {
                format_args!("connection {0} is in state {2}, expected {1}",
                    e.connection_id, e.expected, e.found)
            },

        UnknownState
            { state: i32 }
            | e | { format_args!("connection state is unknown: {}", e.state) },

        ConnectionExistsAlready
            { connection_id: ConnectionId }
            | e | {
                format_args!("connection exists (was initialized) already: {0}",
                    e.connection_id)
            },

        ConnectionMismatch
            { connection_id: ConnectionId }
            | e | {
                format_args!("connection end for identifier {0} does not match the message",
                    e.connection_id)
            },

        UninitializedConnection
            { connection_id: ConnectionId }
            | e | {
                format_args!("connection end for identifier {0} was never initialized",
                    e.connection_id)
            },

        InvalidConsensusHeight
            {
                target_height: Height,
                current_height: Height
            }
            | e | {
                format_args!("consensus height claimed by the client on the other party is too advanced: {0} (host chain current height: {1})",
                    e.target_height, e.current_height)
            },

        StaleConsensusHeight
            {
                target_height: Height,
                oldest_height: Height
            }
            | e | {
                format_args!("consensus height claimed by the client on the other party has been pruned: {0} (host chain oldest height: {1})",
                    e.target_height, e.oldest_height)
            },

        InvalidIdentifier
            [ ValidationError ]
            | _ | { "identifier error" },

        EmptyVersions
            | _ | { "empty supported versions" },

        EmptyFeatures
            | _ | { "empty supported features" },

        NoCommonVersion
            | _ | { "no common version" },

        VersionNotSupported
            { version: String }
            | e | { format_args!("the selected version {} is not supported", e.version) },

        MissingProofHeight
            | _ | { "missing proof height" },

        MissingConsensusHeight
            | _ | { "missing consensus height" },

        MissingProof
            { proof: String }
            | e | { format_args!("missing {} proof", e.proof) },

        InvalidProof
            [ CommitmentError ]
            | _ | { "invalid connection proof" },

        MissingCounterparty
            | _ | { "missing counterparty" },

        MissingCounterpartyPrefix
            | _ | { "missing counterparty prefix" },

        InvalidCounterpartyPrefix
            [ CommitmentError ]
            | _ | { "invalid counterparty prefix" },

        MissingVersion
            | _ | { "missing version" },

        DecodeRawConnectionEnd
            [ DisplayOnly<ProtoError> ]
            | _ | { "error decoding raw connection end" },

        FrozenClient
            { client_id: ClientId }
            | e | {
                format_args!("the client {0} is frozen and cannot verify proofs",
                    e.client_id)
            },

        MissingLocalConsensusState
            { height: Height }
            | e | { format_args!("the local consensus state could not be retrieved for height {}", e.height) },

        ConnectionVerificationFailure
            { connection_id: ConnectionId }
            [ client_error::Error ]
            | e | {
                format_args!("the connection proof verification failed for connection {0}",
                    e.connection_id)
            },

        ConsensusStateVerificationFailure
            { height: Height }
            [ client_error::Error ]
            | e | {
                format_args!("the consensus proof verification failed (height: {0})",
                    e.height)
            },
    }
}

impl Error {
    /// Whether the step was attempted from the wrong prior state, or the stored connection does
    /// not match the one the message refers to.
    pub fn is_invalid_connection_state(&self) -> bool {
        matches!(
            self.detail(),
            ErrorDetail::InvalidState(_)
                | ErrorDetail::ConnectionMismatch(_)
                | ErrorDetail::ConnectionExistsAlready(_)
                | ErrorDetail::UninitializedConnection(_)
        )
    }
}
