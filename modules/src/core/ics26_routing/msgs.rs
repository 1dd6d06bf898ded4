use crate::core::ics02_client::msgs::ClientMsg;
use crate::core::ics03_connection::msgs::ConnectionMsg;

/// Enumeration of all messages that the local ICS26 module is capable of routing.
#[derive(Clone, Debug)]
pub enum Ics26Envelope {
    Ics2Msg(ClientMsg),
    Ics3Msg(ConnectionMsg),
}
