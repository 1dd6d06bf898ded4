//! An in-memory host chain that every handler can run against in tests.

use std::cmp::min;
use std::collections::{BTreeMap, HashMap};

use ibc_verify_proto::google::protobuf::Any;
use ibc_verify_proto::protobuf::Protobuf;
use tracing::debug;

use crate::clients::ics07_tendermint::client_state::ClientState as TmClientState;
use crate::core::ics02_client::client_consensus::AnyConsensusState;
use crate::core::ics02_client::client_state::AnyClientState;
use crate::core::ics02_client::context::{ClientKeeper, ClientReader};
use crate::core::ics02_client::error::Error as Ics02Error;
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics03_connection::context::{ConnectionKeeper, ConnectionReader};
use crate::core::ics03_connection::error::Error as Ics03Error;
use crate::core::ics03_connection::version::{get_compatible_versions, Version};
use crate::core::ics23_commitment::commitment::{CommitmentPrefix, CommitmentProof};
use crate::core::ics24_host::identifier::{ChainId, ClientId, ConnectionId};
use crate::core::ics24_host::Path;
use crate::core::ics26_routing::context::Ics26Context;
use crate::core::ics26_routing::error::Error as RoutingError;
use crate::core::ics26_routing::handler::deliver;
use crate::events::IbcEvent;
use crate::mock::host::HostBlock;
use crate::store::MultiStore;
use crate::test_utils::{genesis_time, tendermint_client_state_for};
use crate::timestamp::Timestamp;
use crate::Height;

/// Everything the host stores for one client.
#[derive(Clone, Debug, Default)]
pub struct MockClientRecord {
    pub client_state: Option<AnyClientState>,
    pub consensus_states: BTreeMap<Height, AnyConsensusState>,
}

/// A host chain kept entirely in memory, implementing every reader and keeper trait.
///
/// Writes go to plain maps. They become provable once a block is committed, which happens on
/// every [`MockContext::advance_host_chain_height`] and at the end of [`MockContext::deliver`].
#[derive(Clone, Debug)]
pub struct MockContext {
    /// Chain identifier, its revision matches the revision of every height in `history`.
    host_chain_id: ChainId,

    /// How many blocks are retained; older ones are pruned.
    max_history_size: usize,

    /// Height of the newest block.
    latest_height: Height,

    /// Retained blocks, oldest first.
    history: Vec<HostBlock>,

    clients: HashMap<ClientId, MockClientRecord>,

    /// Connections opened on top of each client.
    client_connections: HashMap<ClientId, Vec<ConnectionId>>,

    connections: HashMap<ConnectionId, ConnectionEnd>,

    /// Connection versions this chain offers and accepts.
    compatible_versions: Vec<Version>,
}

/// An empty chain at height 5.
impl Default for MockContext {
    fn default() -> Self {
        Self::new(ChainId::new("mockgaia".to_string(), 0), 5, Height::new(0, 5))
    }
}

/// Test-side controls. Handlers only ever see the context through its reader and keeper traits.
impl MockContext {
    /// A chain at `latest_height` retaining its last `max_history_size` blocks. All of them
    /// commit an empty store.
    pub fn new(host_id: ChainId, max_history_size: usize, latest_height: Height) -> Self {
        assert_ne!(
            max_history_size, 0,
            "a chain retains at least its latest block"
        );

        assert_eq!(
            host_id.version(),
            latest_height.revision_number,
            "chain revision and height revision differ"
        );

        let retained = min(max_history_size as u64, latest_height.revision_height);

        MockContext {
            host_chain_id: host_id,
            max_history_size,
            latest_height,
            history: (0..retained)
                .rev()
                .map(|i| {
                    let height = Height::new(
                        latest_height.revision_number,
                        latest_height.revision_height - i,
                    );
                    HostBlock::new(height, MultiStore::new())
                })
                .collect(),
            clients: Default::default(),
            client_connections: Default::default(),
            connections: Default::default(),
            compatible_versions: get_compatible_versions(),
        }
    }

    pub fn chain_id(&self) -> &ChainId {
        &self.host_chain_id
    }

    /// Replaces the connection versions this chain offers and accepts.
    pub fn with_compatible_versions(mut self, versions: Vec<Version>) -> Self {
        self.compatible_versions = versions;
        self
    }

    /// Associates a client state to this context, replacing any previous one.
    pub fn with_client_state(mut self, client_id: &ClientId, client_state: AnyClientState) -> Self {
        self.clients
            .entry(client_id.clone())
            .or_default()
            .client_state = Some(client_state);
        self
    }

    /// Associates a consensus state at `height` to the client `client_id`.
    pub fn with_consensus_state(
        mut self,
        client_id: &ClientId,
        height: Height,
        consensus_state: AnyConsensusState,
    ) -> Self {
        self.clients
            .entry(client_id.clone())
            .or_default()
            .consensus_states
            .insert(height, consensus_state);
        self
    }

    /// Identifiers of the connections opened on top of `client_id`, in creation order.
    pub fn client_connections(&self, client_id: &ClientId) -> &[ConnectionId] {
        self.client_connections
            .get(client_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Stores `connection_end` under `connection_id`, replacing any previous record.
    pub fn with_connection(
        mut self,
        connection_id: ConnectionId,
        connection_end: ConnectionEnd,
    ) -> Self {
        self.connections.insert(connection_id, connection_end);
        self
    }

    /// The retained block at `target_height`, if the chain has reached that height and has not
    /// pruned it yet.
    pub fn host_block(&self, target_height: Height) -> Option<&HostBlock> {
        let target = target_height.revision_height as usize;
        let latest = self.latest_height.revision_height as usize;

        if target_height.revision_number != self.latest_height.revision_number
            || target > latest
            || target <= latest - self.history.len()
        {
            None
        } else {
            Some(&self.history[self.history.len() + target - latest - 1])
        }
    }

    /// Commits the current state in a new block on top of the chain.
    pub fn advance_host_chain_height(&mut self) {
        let height = self.latest_height.increment();
        let new_block = HostBlock::new(height, self.commit_store());

        debug!(
            chain_id = %self.host_chain_id,
            height = %height,
            root = ?new_block.root(),
            "committed block"
        );

        if self.history.len() >= self.max_history_size {
            // Drop the oldest block.
            self.history.rotate_left(1);
            self.history[self.max_history_size - 1] = new_block;
        } else {
            self.history.push(new_block);
        }
        self.latest_height = height;
    }

    /// Routes a batch of relayed messages and, if every one of them succeeds, commits the
    /// result in a new block.
    pub fn deliver(&mut self, messages: Vec<Any>) -> Result<Vec<IbcEvent>, RoutingError> {
        let events = deliver(self, messages)?;
        self.advance_host_chain_height();
        Ok(events)
    }

    /// Proof that the value stored at `path` was committed in the block at `height`.
    pub fn prove(&self, path: &Path, height: Height) -> Option<CommitmentProof> {
        self.host_block(height)?
            .prove(&self.commitment_prefix(), path)
            .map(Into::into)
    }

    /// Proof that nothing was stored at `path` in the block at `height`.
    pub fn prove_absence(&self, path: &Path, height: Height) -> Option<CommitmentProof> {
        self.host_block(height)?
            .prove_absence(&self.commitment_prefix(), path)
            .map(Into::into)
    }

    /// Brings the tendermint client `client_id` up to date with `counterparty`: the client
    /// learns every block the counterparty retains and trusts its latest height. The client is
    /// created if it does not exist yet.
    pub fn sync_client_with(&mut self, client_id: &ClientId, counterparty: &MockContext) {
        let record = self.clients.entry(client_id.clone()).or_default();

        let client_state = match record.client_state.take() {
            Some(AnyClientState::Tendermint(state)) => TmClientState {
                latest_height: counterparty.latest_height,
                ..state
            },
            _ => tendermint_client_state_for(
                counterparty.host_chain_id.clone(),
                counterparty.latest_height,
            ),
        };
        record.client_state = Some(client_state.into());

        for block in &counterparty.history {
            record
                .consensus_states
                .insert(block.height(), block.consensus_state());
        }
    }

    /// Checks the history window after a test has driven the chain forward.
    pub fn validate(&self) -> Result<(), String> {
        if self.history.len() > self.max_history_size {
            return Err("too many entries".to_string());
        }

        if let Some(last) = self.history.last() {
            if last.height() != self.latest_height {
                return Err("latest height is not updated".to_string());
            }
        }

        for pair in self.history.windows(2) {
            if pair[0].height().increment() != pair[1].height() {
                return Err("headers in history not sequential".to_string());
            }
        }
        Ok(())
    }

    /// The IBC state as committed in a block: client and connection records under their paths.
    fn commit_store(&self) -> MultiStore {
        let prefix = self.commitment_prefix();
        let store_name = String::from_utf8_lossy(prefix.as_bytes()).into_owned();

        let mut store = MultiStore::new();
        for (client_id, record) in &self.clients {
            if let Some(client_state) = &record.client_state {
                let path = Path::ClientState(client_id.clone());
                store.set(&store_name, path.into_bytes(), &client_state.encode_vec());
            }
            for (height, consensus_state) in &record.consensus_states {
                let path = Path::ClientConsensusState {
                    client_id: client_id.clone(),
                    height: *height,
                };
                store.set(&store_name, path.into_bytes(), &consensus_state.encode_vec());
            }
        }
        for (connection_id, connection_end) in &self.connections {
            let path = Path::Connections(connection_id.clone());
            store.set(&store_name, path.into_bytes(), &connection_end.encode_vec());
        }
        store
    }
}

impl Ics26Context for MockContext {}

impl ClientReader for MockContext {
    fn client_state(&self, client_id: &ClientId) -> Result<AnyClientState, Ics02Error> {
        self.clients
            .get(client_id)
            .and_then(|record| record.client_state.clone())
            .ok_or_else(|| Ics02Error::client_not_found(client_id.clone()))
    }

    fn consensus_state(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<AnyConsensusState, Ics02Error> {
        let record = self
            .clients
            .get(client_id)
            .ok_or_else(|| Ics02Error::client_not_found(client_id.clone()))?;

        record
            .consensus_states
            .get(&height)
            .cloned()
            .ok_or_else(|| Ics02Error::consensus_state_not_found(client_id.clone(), height))
    }

    fn consensus_state_lte(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<(Height, AnyConsensusState), Ics02Error> {
        let record = self
            .clients
            .get(client_id)
            .ok_or_else(|| Ics02Error::client_not_found(client_id.clone()))?;

        record
            .consensus_states
            .range(..=height)
            .next_back()
            .map(|(height, consensus_state)| (*height, consensus_state.clone()))
            .ok_or_else(|| Ics02Error::consensus_state_not_found(client_id.clone(), height))
    }

    fn host_timestamp(&self) -> Timestamp {
        self.history
            .last()
            .map(HostBlock::timestamp)
            .unwrap_or_else(genesis_time)
    }

    fn host_height(&self) -> Height {
        self.latest_height
    }
}

impl ClientKeeper for MockContext {
    fn store_client_state(
        &mut self,
        client_id: ClientId,
        client_state: AnyClientState,
    ) -> Result<(), Ics02Error> {
        self.clients.entry(client_id).or_default().client_state = Some(client_state);
        Ok(())
    }

    fn store_consensus_state(
        &mut self,
        client_id: ClientId,
        height: Height,
        consensus_state: AnyConsensusState,
    ) -> Result<(), Ics02Error> {
        self.clients
            .entry(client_id)
            .or_default()
            .consensus_states
            .insert(height, consensus_state);
        Ok(())
    }
}

impl ConnectionReader for MockContext {
    fn connection_end(&self, connection_id: &ConnectionId) -> Option<ConnectionEnd> {
        self.connections.get(connection_id).cloned()
    }

    fn client_state(&self, client_id: &ClientId) -> Result<AnyClientState, Ics03Error> {
        ClientReader::client_state(self, client_id).map_err(Ics03Error::ics02_client)
    }

    fn host_current_height(&self) -> Height {
        self.latest_height
    }

    fn host_oldest_height(&self) -> Height {
        self.history
            .first()
            .map(HostBlock::height)
            .unwrap_or(self.latest_height)
    }

    fn commitment_prefix(&self) -> CommitmentPrefix {
        CommitmentPrefix::default()
    }

    fn get_compatible_versions(&self) -> Vec<Version> {
        self.compatible_versions.clone()
    }

    fn client_consensus_state(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<AnyConsensusState, Ics03Error> {
        self.consensus_state(client_id, height)
            .map_err(Ics03Error::ics02_client)
    }

    fn host_consensus_state(&self, height: Height) -> Result<AnyConsensusState, Ics03Error> {
        self.host_block(height)
            .map(HostBlock::consensus_state)
            .ok_or_else(|| Ics03Error::missing_local_consensus_state(height))
    }
}

impl ConnectionKeeper for MockContext {
    fn store_connection(
        &mut self,
        connection_id: ConnectionId,
        connection_end: &ConnectionEnd,
    ) -> Result<(), Ics03Error> {
        self.connections.insert(connection_id, connection_end.clone());
        Ok(())
    }

    fn store_connection_to_client(
        &mut self,
        connection_id: ConnectionId,
        client_id: &ClientId,
    ) -> Result<(), Ics03Error> {
        let connections = self.client_connections.entry(client_id.clone()).or_default();
        if !connections.contains(&connection_id) {
            connections.push(connection_id);
        }
        Ok(())
    }
}
