//! What a host must expose for the connection handshake: read access to connection records,
//! the clients backing them and its own history, and write access to store handshake results.

use crate::core::ics02_client::client_consensus::AnyConsensusState;
use crate::core::ics02_client::client_state::AnyClientState;
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::handler::{ConnectionIdState, ConnectionResult};
use crate::core::ics03_connection::version::{get_compatible_versions, pick_version, Version};
use crate::core::ics23_commitment::commitment::CommitmentPrefix;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::Height;

pub trait ConnectionReader {
    /// The record stored under `conn_id`, if any.
    fn connection_end(&self, conn_id: &ConnectionId) -> Option<ConnectionEnd>;

    fn client_state(&self, client_id: &ClientId) -> Result<AnyClientState, Error>;

    fn host_current_height(&self) -> Height;

    /// The earliest host height whose consensus state is still retained.
    fn host_oldest_height(&self) -> Height;

    /// The prefix this host commits its IBC state under. A counterparty proving a record
    /// about this host uses it to build the verification key.
    fn commitment_prefix(&self) -> CommitmentPrefix;

    /// The consensus state `client_id` trusts at `height`.
    fn client_consensus_state(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<AnyConsensusState, Error>;

    /// This host's own consensus state at `height`, as a client tracking it would store it.
    fn host_consensus_state(&self, height: Height) -> Result<AnyConsensusState, Error>;

    /// Versions offered in OpenInit and accepted in OpenTry.
    fn get_compatible_versions(&self) -> Vec<Version> {
        get_compatible_versions()
    }

    fn pick_version(
        &self,
        supported_versions: &[Version],
        counterparty_candidate_versions: &[Version],
    ) -> Result<Version, Error> {
        pick_version(supported_versions, counterparty_candidate_versions)
    }
}

pub trait ConnectionKeeper {
    /// Persists the outcome of a handshake step.
    fn store_connection_result(&mut self, result: ConnectionResult) -> Result<(), Error> {
        self.store_connection(result.connection_id.clone(), &result.connection_end)?;

        // A fresh connection end is also indexed under its client.
        if matches!(result.connection_id_state, ConnectionIdState::New) {
            self.store_connection_to_client(
                result.connection_id,
                result.connection_end.client_id(),
            )?;
        }

        Ok(())
    }

    fn store_connection(
        &mut self,
        connection_id: ConnectionId,
        connection_end: &ConnectionEnd,
    ) -> Result<(), Error>;

    /// Adds `connection_id` to the connections opened on top of `client_id`.
    fn store_connection_to_client(
        &mut self,
        connection_id: ConnectionId,
        client_id: &ClientId,
    ) -> Result<(), Error>;
}
