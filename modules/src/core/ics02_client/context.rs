//! Client storage as seen by the misbehaviour handler and the connection handshake.

use crate::core::ics02_client::client_consensus::AnyConsensusState;
use crate::core::ics02_client::client_state::AnyClientState;
use crate::core::ics02_client::error::Error;
use crate::core::ics02_client::handler::ClientResult;
use crate::core::ics24_host::identifier::ClientId;
use crate::timestamp::Timestamp;
use crate::Height;

pub trait ClientReader {
    fn client_state(&self, client_id: &ClientId) -> Result<AnyClientState, Error>;

    /// The consensus state stored for `client_id` at exactly `height`.
    fn consensus_state(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<AnyConsensusState, Error>;

    /// The consensus state stored at the greatest height not after `height`, with that height.
    fn consensus_state_lte(
        &self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<(Height, AnyConsensusState), Error>;

    /// Block time of the host, used as the current time when judging evidence.
    fn host_timestamp(&self) -> Timestamp;

    fn host_height(&self) -> Height;
}

pub trait ClientKeeper {
    fn store_client_result(&mut self, handler_res: ClientResult) -> Result<(), Error> {
        match handler_res {
            ClientResult::Misbehaviour(res) => {
                self.store_client_state(res.client_id, res.client_state)
            }
        }
    }

    fn store_client_state(
        &mut self,
        client_id: ClientId,
        client_state: AnyClientState,
    ) -> Result<(), Error>;

    /// Consensus states are write-once per height.
    fn store_consensus_state(
        &mut self,
        client_id: ClientId,
        height: Height,
        consensus_state: AnyConsensusState,
    ) -> Result<(), Error>;
}
