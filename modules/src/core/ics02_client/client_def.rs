use crate::clients::ics06_solomachine::client_def::SoloMachineClient;
use crate::clients::ics07_tendermint::client_def::TendermintClient;
use crate::core::ics02_client::client_consensus::{AnyConsensusState, ConsensusState};
use crate::core::ics02_client::client_state::{AnyClientState, ClientState};
use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics02_client::error::Error;
use crate::core::ics02_client::misbehaviour::{AnyMisbehaviour, Misbehaviour};
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics23_commitment::commitment::{CommitmentPrefix, CommitmentProof};
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::downcast;
use crate::timestamp::Timestamp;
use crate::Height;

pub trait ClientDef: Clone {
    type ClientState: ClientState;
    type ConsensusState: ConsensusState;
    type Misbehaviour: Misbehaviour;

    /// Checks that `misbehaviour` proves the chain tracked by this client signed two
    /// conflicting claims, and returns the client state frozen at the height of the fault.
    ///
    /// `consensus_state` is the trusted state stored at `loaded_height`, the greatest height
    /// not after the evidence. `now` is the host's current time.
    fn check_misbehaviour_and_update_state(
        &self,
        client_state: Self::ClientState,
        consensus_state: &Self::ConsensusState,
        loaded_height: Height,
        misbehaviour: Self::Misbehaviour,
        now: Timestamp,
    ) -> Result<Self::ClientState, Error>;

    /// Checks `proof` that the counterparty, at `height`, stores `expected_consensus_state` as
    /// the state its client `client_id` trusts at `consensus_height`. `consensus_state` is what
    /// this client trusts at `height`; its root anchors the proof.
    #[allow(clippy::too_many_arguments)]
    fn verify_client_consensus_state(
        &self,
        client_state: &Self::ClientState,
        consensus_state: &Self::ConsensusState,
        height: Height,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProof,
        client_id: &ClientId,
        consensus_height: Height,
        expected_consensus_state: &AnyConsensusState,
    ) -> Result<(), Error>;

    /// Checks `proof` that the counterparty, at `height`, stores `expected_connection_end` under
    /// `connection_id`.
    #[allow(clippy::too_many_arguments)]
    fn verify_connection_state(
        &self,
        client_state: &Self::ClientState,
        consensus_state: &Self::ConsensusState,
        height: Height,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProof,
        connection_id: &ConnectionId,
        expected_connection_end: &ConnectionEnd,
    ) -> Result<(), Error>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyClient {
    Tendermint(TendermintClient),
    SoloMachine(SoloMachineClient),
}

impl AnyClient {
    pub fn from_client_type(client_type: ClientType) -> AnyClient {
        match client_type {
            ClientType::Tendermint => Self::Tendermint(TendermintClient::default()),
            ClientType::SoloMachine => Self::SoloMachine(SoloMachineClient::default()),
        }
    }
}

/// Each arm downcasts every argument to its own kind first, so a mixed-up client never reaches
/// a verification routine.
impl ClientDef for AnyClient {
    type ClientState = AnyClientState;
    type ConsensusState = AnyConsensusState;
    type Misbehaviour = AnyMisbehaviour;

    fn check_misbehaviour_and_update_state(
        &self,
        client_state: AnyClientState,
        consensus_state: &AnyConsensusState,
        loaded_height: Height,
        misbehaviour: AnyMisbehaviour,
        now: Timestamp,
    ) -> Result<AnyClientState, Error> {
        match self {
            Self::Tendermint(client) => {
                let (client_state, (consensus_state, misbehaviour)) = downcast!(
                    client_state => AnyClientState::Tendermint,
                    consensus_state => AnyConsensusState::Tendermint,
                    misbehaviour => AnyMisbehaviour::Tendermint,
                )
                .ok_or_else(|| Error::client_args_type_mismatch(ClientType::Tendermint))?;

                let new_state = client.check_misbehaviour_and_update_state(
                    client_state,
                    consensus_state,
                    loaded_height,
                    misbehaviour,
                    now,
                )?;

                Ok(AnyClientState::Tendermint(new_state))
            }

            Self::SoloMachine(client) => {
                let (client_state, (consensus_state, misbehaviour)) = downcast!(
                    client_state => AnyClientState::SoloMachine,
                    consensus_state => AnyConsensusState::SoloMachine,
                    misbehaviour => AnyMisbehaviour::SoloMachine,
                )
                .ok_or_else(|| Error::client_args_type_mismatch(ClientType::SoloMachine))?;

                let new_state = client.check_misbehaviour_and_update_state(
                    client_state,
                    consensus_state,
                    loaded_height,
                    misbehaviour,
                    now,
                )?;

                Ok(AnyClientState::SoloMachine(new_state))
            }
        }
    }

    fn verify_client_consensus_state(
        &self,
        client_state: &Self::ClientState,
        consensus_state: &Self::ConsensusState,
        height: Height,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProof,
        client_id: &ClientId,
        consensus_height: Height,
        expected_consensus_state: &AnyConsensusState,
    ) -> Result<(), Error> {
        match self {
            Self::Tendermint(client) => {
                let (client_state, consensus_state) = downcast!(
                    client_state => AnyClientState::Tendermint,
                    consensus_state => AnyConsensusState::Tendermint,
                )
                .ok_or_else(|| Error::client_args_type_mismatch(ClientType::Tendermint))?;

                client.verify_client_consensus_state(
                    client_state,
                    consensus_state,
                    height,
                    prefix,
                    proof,
                    client_id,
                    consensus_height,
                    expected_consensus_state,
                )
            }

            Self::SoloMachine(client) => {
                let (client_state, consensus_state) = downcast!(
                    client_state => AnyClientState::SoloMachine,
                    consensus_state => AnyConsensusState::SoloMachine,
                )
                .ok_or_else(|| Error::client_args_type_mismatch(ClientType::SoloMachine))?;

                client.verify_client_consensus_state(
                    client_state,
                    consensus_state,
                    height,
                    prefix,
                    proof,
                    client_id,
                    consensus_height,
                    expected_consensus_state,
                )
            }
        }
    }

    fn verify_connection_state(
        &self,
        client_state: &Self::ClientState,
        consensus_state: &Self::ConsensusState,
        height: Height,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProof,
        connection_id: &ConnectionId,
        expected_connection_end: &ConnectionEnd,
    ) -> Result<(), Error> {
        match self {
            Self::Tendermint(client) => {
                let (client_state, consensus_state) = downcast!(
                    client_state => AnyClientState::Tendermint,
                    consensus_state => AnyConsensusState::Tendermint,
                )
                .ok_or_else(|| Error::client_args_type_mismatch(ClientType::Tendermint))?;

                client.verify_connection_state(
                    client_state,
                    consensus_state,
                    height,
                    prefix,
                    proof,
                    connection_id,
                    expected_connection_end,
                )
            }

            Self::SoloMachine(client) => {
                let (client_state, consensus_state) = downcast!(
                    client_state => AnyClientState::SoloMachine,
                    consensus_state => AnyConsensusState::SoloMachine,
                )
                .ok_or_else(|| Error::client_args_type_mismatch(ClientType::SoloMachine))?;

                client.verify_connection_state(
                    client_state,
                    consensus_state,
                    height,
                    prefix,
                    proof,
                    connection_id,
                    expected_connection_end,
                )
            }
        }
    }
}
