use core::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ics02_client::events::{self as ClientEvents};
use crate::core::ics03_connection::events::{self as ConnectionEvents};
use crate::Height;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum IbcEventType {
    ClientMisbehaviour,
    OpenInitConnection,
    OpenTryConnection,
    OpenAckConnection,
    OpenConfirmConnection,
    AppModule,
}

impl IbcEventType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            IbcEventType::ClientMisbehaviour => "client_misbehaviour",
            IbcEventType::OpenInitConnection => "connection_open_init",
            IbcEventType::OpenTryConnection => "connection_open_try",
            IbcEventType::OpenAckConnection => "connection_open_ack",
            IbcEventType::OpenConfirmConnection => "connection_open_confirm",
            IbcEventType::AppModule => "message",
        }
    }
}

impl fmt::Display for IbcEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events produced while processing IBC messages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum IbcEvent {
    ClientMisbehaviour(ClientEvents::ClientMisbehaviour),

    OpenInitConnection(ConnectionEvents::OpenInit),
    OpenTryConnection(ConnectionEvents::OpenTry),
    OpenAckConnection(ConnectionEvents::OpenAck),
    OpenConfirmConnection(ConnectionEvents::OpenConfirm),

    /// Marker emitted once per successfully routed message.
    Message(MessageEvent),
}

impl IbcEvent {
    pub fn event_type(&self) -> IbcEventType {
        match self {
            IbcEvent::ClientMisbehaviour(_) => IbcEventType::ClientMisbehaviour,
            IbcEvent::OpenInitConnection(_) => IbcEventType::OpenInitConnection,
            IbcEvent::OpenTryConnection(_) => IbcEventType::OpenTryConnection,
            IbcEvent::OpenAckConnection(_) => IbcEventType::OpenAckConnection,
            IbcEvent::OpenConfirmConnection(_) => IbcEventType::OpenConfirmConnection,
            IbcEvent::Message(_) => IbcEventType::AppModule,
        }
    }

    /// Host height at which the event was emitted, if the event carries one.
    pub fn height(&self) -> Option<Height> {
        match self {
            IbcEvent::ClientMisbehaviour(ev) => Some(ev.height()),
            IbcEvent::OpenInitConnection(ev) => Some(ev.height()),
            IbcEvent::OpenTryConnection(ev) => Some(ev.height()),
            IbcEvent::OpenAckConnection(ev) => Some(ev.height()),
            IbcEvent::OpenConfirmConnection(ev) => Some(ev.height()),
            IbcEvent::Message(_) => None,
        }
    }
}

impl fmt::Display for IbcEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IbcEvent::ClientMisbehaviour(ev) => write!(f, "ClientMisbehaviour({})", ev.0),
            IbcEvent::OpenInitConnection(ev) => write!(f, "OpenInitConnection({})", ev.attributes()),
            IbcEvent::OpenTryConnection(ev) => write!(f, "OpenTryConnection({})", ev.attributes()),
            IbcEvent::OpenAckConnection(ev) => write!(f, "OpenAckConnection({})", ev.attributes()),
            IbcEvent::OpenConfirmConnection(ev) => {
                write!(f, "OpenConfirmConnection({})", ev.attributes())
            }
            IbcEvent::Message(ev) => write!(f, "Message({})", ev.as_str()),
        }
    }
}

/// The module a routed message was handled by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum MessageEvent {
    Client,
    Connection,
}

impl MessageEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageEvent::Client => "ibc_client",
            MessageEvent::Connection => "ibc_connection",
        }
    }
}

impl From<MessageEvent> for IbcEvent {
    fn from(ev: MessageEvent) -> Self {
        IbcEvent::Message(ev)
    }
}
