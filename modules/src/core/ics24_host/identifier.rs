use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics24_host::error::ValidationError;
use crate::core::ics24_host::validate::{
    validate_client_identifier, validate_connection_identifier, validate_identifier,
};

/// A chain identifier of the form `{name}-{revision}`. The revision is `0` when the identifier
/// carries no numeric suffix.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId {
    id: String,
}

impl ChainId {
    pub fn new(name: String, version: u64) -> Self {
        Self {
            id: format!("{}-{}", name, version),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> u64 {
        Self::chain_version(&self.id)
    }

    /// Extracts the revision from an identifier in `{name}-{revision}` format.
    pub fn chain_version(chain_id: &str) -> u64 {
        chain_id
            .rsplit_once('-')
            .and_then(|(_, version)| version.parse().ok())
            .unwrap_or(0)
    }

    pub fn is_epoch_format(chain_id: &str) -> bool {
        chain_id
            .rsplit_once('-')
            .map_or(false, |(name, version)| {
                !name.is_empty() && version.parse::<u64>().is_ok()
            })
    }
}

impl FromStr for ChainId {
    type Err = ValidationError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        validate_identifier(id, 1, 64)?;
        Ok(Self { id: id.to_string() })
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Builds a new client identifier. Client identifiers are deterministically formed from two
    /// elements: a prefix derived from the client type `ctype`, and a monotonically increasing
    /// `counter`; these are separated by a dash "-".
    pub fn new(ctype: ClientType, counter: u64) -> Result<Self, ValidationError> {
        let id = format!("{}-{}", ctype.as_str(), counter);
        Self::from_str(id.as_str())
    }

    /// Get this identifier as a borrowed `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Equivalent to `ClientId::new(ClientType::Tendermint, 0)`.
impl Default for ClientId {
    fn default() -> Self {
        Self(format!("{}-0", ClientType::Tendermint.as_str()))
    }
}

impl FromStr for ClientId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_client_identifier(s).map(|_| Self(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Builds a new connection identifier of the form `connection-{counter}`.
    pub fn new(counter: u64) -> Self {
        Self(format!("{}-{}", Self::prefix(), counter))
    }

    pub fn prefix() -> &'static str {
        "connection"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConnectionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_connection_identifier(s).map(|_| Self(s.to_string()))
    }
}
