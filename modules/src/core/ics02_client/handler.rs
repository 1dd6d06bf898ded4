//! Processing of client messages.

use crate::core::ics02_client::context::ClientReader;
use crate::core::ics02_client::error::Error;
use crate::core::ics02_client::msgs::ClientMsg;
use crate::handler::HandlerOutput;

pub mod misbehaviour;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientResult {
    Misbehaviour(misbehaviour::Result),
}

/// Runs the handler of `msg` against a read-only view of the host.
pub fn dispatch<Ctx>(ctx: &Ctx, msg: ClientMsg) -> Result<HandlerOutput<ClientResult>, Error>
where
    Ctx: ClientReader,
{
    match msg {
        ClientMsg::Misbehaviour(msg) => misbehaviour::process(ctx, msg),
    }
}
