//! Events emitted by the client module.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics24_host::identifier::ClientId;
use crate::events::IbcEvent;
use crate::Height;

/// The content of the `key` field for the attribute containing the client identifier.
pub const CLIENT_ID_ATTRIBUTE_KEY: &str = "client_id";

/// The content of the `key` field for the attribute containing the client type.
pub const CLIENT_TYPE_ATTRIBUTE_KEY: &str = "client_type";

/// The content of the `key` field for the attribute containing the height.
pub const CONSENSUS_HEIGHT_ATTRIBUTE_KEY: &str = "consensus_height";

/// Common attributes of client events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Host chain height at which the event was emitted.
    pub height: Height,
    pub client_id: ClientId,
    pub client_type: ClientType,
    pub consensus_height: Height,
}

impl Attributes {
    /// Key-value pairs, as they would be attached to an ABCI event.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            (CLIENT_ID_ATTRIBUTE_KEY.to_string(), self.client_id.to_string()),
            (
                CLIENT_TYPE_ATTRIBUTE_KEY.to_string(),
                self.client_type.as_str().to_string(),
            ),
            (
                CONSENSUS_HEIGHT_ATTRIBUTE_KEY.to_string(),
                self.consensus_height.to_string(),
            ),
        ]
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h: {}, cs_h: {}({})",
            self.height, self.client_id, self.consensus_height
        )
    }
}

/// Signals that a client was frozen because of proven misbehaviour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMisbehaviour(pub Attributes);

impl ClientMisbehaviour {
    pub fn client_id(&self) -> &ClientId {
        &self.0.client_id
    }

    pub fn height(&self) -> Height {
        self.0.height
    }
}

impl From<Attributes> for ClientMisbehaviour {
    fn from(attrs: Attributes) -> Self {
        ClientMisbehaviour(attrs)
    }
}

impl From<ClientMisbehaviour> for IbcEvent {
    fn from(v: ClientMisbehaviour) -> Self {
        IbcEvent::ClientMisbehaviour(v)
    }
}
