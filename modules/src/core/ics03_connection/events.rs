//! Events emitted by the connection module, one per successful handshake step.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::events::IbcEvent;
use crate::Height;

/// The content of the `key` field for the attribute containing the connection identifier.
pub const CONN_ID_ATTRIBUTE_KEY: &str = "connection_id";
pub const CLIENT_ID_ATTRIBUTE_KEY: &str = "client_id";
pub const COUNTERPARTY_CONN_ID_ATTRIBUTE_KEY: &str = "counterparty_connection_id";
pub const COUNTERPARTY_CLIENT_ID_ATTRIBUTE_KEY: &str = "counterparty_client_id";

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attributes {
    pub height: Height,
    pub connection_id: Option<ConnectionId>,
    pub client_id: ClientId,
    pub counterparty_connection_id: Option<ConnectionId>,
    pub counterparty_client_id: ClientId,
}

impl Attributes {
    /// Key-value pairs, as they would be attached to an ABCI event. Absent connection
    /// identifiers are left out.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(conn_id) = &self.connection_id {
            pairs.push((CONN_ID_ATTRIBUTE_KEY.to_string(), conn_id.to_string()));
        }
        pairs.push((CLIENT_ID_ATTRIBUTE_KEY.to_string(), self.client_id.to_string()));
        if let Some(conn_id) = &self.counterparty_connection_id {
            pairs.push((
                COUNTERPARTY_CONN_ID_ATTRIBUTE_KEY.to_string(),
                conn_id.to_string(),
            ));
        }
        pairs.push((
            COUNTERPARTY_CLIENT_ID_ATTRIBUTE_KEY.to_string(),
            self.counterparty_client_id.to_string(),
        ));
        pairs
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = |c: &Option<ConnectionId>| c.as_ref().map_or("none".to_string(), |c| c.to_string());
        write!(
            f,
            "h: {}, conn: {}, client: {}, cp_conn: {}, cp_client: {}",
            self.height,
            id(&self.connection_id),
            self.client_id,
            id(&self.counterparty_connection_id),
            self.counterparty_client_id
        )
    }
}

macro_rules! connection_event {
    ($name:ident, $variant:ident) => {
        #[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
        pub struct $name(Attributes);

        impl $name {
            pub fn attributes(&self) -> &Attributes {
                &self.0
            }
            pub fn connection_id(&self) -> Option<&ConnectionId> {
                self.0.connection_id.as_ref()
            }
            pub fn height(&self) -> Height {
                self.0.height
            }
            pub fn set_height(&mut self, height: Height) {
                self.0.height = height;
            }
        }

        impl From<Attributes> for $name {
            fn from(attrs: Attributes) -> Self {
                $name(attrs)
            }
        }

        impl From<$name> for IbcEvent {
            fn from(v: $name) -> Self {
                IbcEvent::$variant(v)
            }
        }
    };
}

connection_event!(OpenInit, OpenInitConnection);
connection_event!(OpenTry, OpenTryConnection);
connection_event!(OpenAck, OpenAckConnection);
connection_event!(OpenConfirm, OpenConfirmConnection);
