//! Blocks of the chain underlying a context mock.

use core::time::Duration;

use crate::clients::ics07_tendermint::consensus_state::ConsensusState as TmConsensusState;
use crate::core::ics02_client::client_consensus::AnyConsensusState;
use crate::core::ics23_commitment::commitment::{CommitmentPrefix, CommitmentRoot};
use crate::core::ics23_commitment::merkle::MerkleProof;
use crate::core::ics24_host::Path;
use crate::store::MultiStore;
use crate::test_utils::{genesis_time, host_validators, validator_set};
use crate::timestamp::Timestamp;
use crate::Height;

/// Seconds between two consecutive blocks of a mock chain.
pub const BLOCK_INTERVAL: Duration = Duration::from_secs(3);

/// A committed block: the IBC state as of this height and the root it hashes to.
#[derive(Clone, Debug)]
pub struct HostBlock {
    height: Height,
    timestamp: Timestamp,
    store: MultiStore,
    root: CommitmentRoot,
}

impl HostBlock {
    /// Commits `store` at `height`. Block times are a fixed interval apart from genesis.
    pub fn new(height: Height, mut store: MultiStore) -> Self {
        let offset = BLOCK_INTERVAL.as_secs().saturating_mul(height.revision_height);
        let timestamp = (genesis_time() + Duration::from_secs(offset)).unwrap_or_else(|_| genesis_time());
        let root = CommitmentRoot::from_bytes(&store.root());

        Self {
            height,
            timestamp,
            store,
            root,
        }
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn root(&self) -> &CommitmentRoot {
        &self.root
    }

    /// The consensus state a tendermint client tracking this chain stores for this block.
    pub fn consensus_state(&self) -> AnyConsensusState {
        TmConsensusState::new(
            self.root.clone(),
            self.timestamp,
            validator_set(&host_validators()),
        )
        .into()
    }

    /// Membership proof of `path` in this block's state, under the store named by `prefix`.
    pub fn prove(&self, prefix: &CommitmentPrefix, path: &Path) -> Option<MerkleProof> {
        let store = String::from_utf8(prefix.as_bytes().to_vec()).ok()?;
        self.store
            .clone()
            .prove(&store, path.to_string().as_bytes())
    }

    /// Non-membership proof of `path` in this block's state.
    pub fn prove_absence(&self, prefix: &CommitmentPrefix, path: &Path) -> Option<MerkleProof> {
        let store = String::from_utf8(prefix.as_bytes().to_vec()).ok()?;
        self.store
            .clone()
            .prove_absence(&store, path.to_string().as_bytes())
    }
}
