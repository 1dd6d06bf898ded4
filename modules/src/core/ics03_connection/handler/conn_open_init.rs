//! Protocol logic specific to ICS3 messages of type `MsgConnectionOpenInit`.

use tracing::info;

use crate::core::ics03_connection::connection::{ConnectionEnd, State};
use crate::core::ics03_connection::context::ConnectionReader;
use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::events::Attributes;
use crate::core::ics03_connection::handler::{ConnectionIdState, ConnectionResult};
use crate::core::ics03_connection::msgs::conn_open_init::MsgConnectionOpenInit;
use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};

pub(crate) fn process<Ctx: ConnectionReader>(
    ctx: &Ctx,
    msg: MsgConnectionOpenInit,
) -> HandlerResult<ConnectionResult, Error> {
    let mut output = HandlerOutput::builder();

    // No connection may exist under this identifier yet.
    if let Some(existing) = ctx.connection_end(&msg.connection_id) {
        if !existing.is_uninitialized() {
            return Err(Error::connection_exists_already(msg.connection_id));
        }
    }

    let new_connection_end = ConnectionEnd::new(
        State::Init,
        msg.client_id.clone(),
        msg.counterparty.clone(),
        ctx.get_compatible_versions(),
    );

    info!(connection_id = %msg.connection_id, client_id = %msg.client_id, "connection initialised");
    output.log("success: no connection found");

    let event_attributes = Attributes {
        height: ctx.host_current_height(),
        connection_id: Some(msg.connection_id.clone()),
        client_id: msg.client_id.clone(),
        counterparty_connection_id: msg.counterparty.connection_id().cloned(),
        counterparty_client_id: msg.counterparty.client_id().clone(),
    };
    output.emit(IbcEvent::OpenInitConnection(event_attributes.into()));

    let result = ConnectionResult {
        connection_id: msg.connection_id,
        connection_id_state: ConnectionIdState::New,
        connection_end: new_connection_end,
    };

    Ok(output.with_result(result))
}
