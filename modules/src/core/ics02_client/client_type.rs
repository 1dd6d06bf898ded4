use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::ics02_client::error::Error;

/// Type of the client, depending on the specific consensus algorithm.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClientType {
    Tendermint,
    SoloMachine,
}

impl ClientType {
    const TENDERMINT_STR: &'static str = "07-tendermint";
    const SOLOMACHINE_STR: &'static str = "06-solomachine";

    /// Yields the identifier of this client type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tendermint => Self::TENDERMINT_STR,
            Self::SoloMachine => Self::SOLOMACHINE_STR,
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientType({})", self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::TENDERMINT_STR => Ok(Self::Tendermint),
            Self::SOLOMACHINE_STR => Ok(Self::SoloMachine),
            _ => Err(Error::unknown_client_type(s.to_string())),
        }
    }
}
