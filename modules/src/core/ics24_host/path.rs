//! Path-space as listed in ICS-024, restricted to the records the verification core reads
//! and writes.

use core::fmt::{Display, Formatter, Result};

use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::Height;

/// The Path enum abstracts out the different sub-paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Path {
    ClientState(ClientId),
    ClientConsensusState {
        client_id: ClientId,
        height: Height,
    },
    ClientConnections(ClientId),
    Connections(ConnectionId),
}

impl Path {
    /// Indication if the path is provable.
    pub fn is_provable(&self) -> bool {
        !matches!(self, Path::ClientConnections(_))
    }

    /// into_bytes implementation
    pub fn into_bytes(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

/// The Display trait adds the `.to_string()` method to the Path struct.
/// This is where the different path strings are constructed.
impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Path::ClientState(id) => write!(f, "clients/{}/clientState", id),
            Path::ClientConsensusState { client_id, height } => write!(
                f,
                "clients/{}/consensusStates/{}",
                client_id, height
            ),
            Path::ClientConnections(id) => write!(f, "clients/{}/connections", id),
            Path::Connections(id) => write!(f, "connections/{}", id),
        }
    }
}
