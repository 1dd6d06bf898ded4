//! Messages a relayer submits against a client. The only one the verification core handles is
//! evidence of misbehaviour; client creation and updates happen elsewhere.

use crate::core::ics02_client::msgs::misbehaviour::MsgSubmitMisbehaviour;

pub mod misbehaviour;

/// Every message routed to the client module.
#[derive(Clone, Debug)]
pub enum ClientMsg {
    Misbehaviour(MsgSubmitMisbehaviour),
}
