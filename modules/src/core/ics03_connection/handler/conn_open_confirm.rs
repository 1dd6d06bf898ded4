//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenConfirm`.

use tracing::info;

use crate::core::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
use crate::core::ics03_connection::context::ConnectionReader;
use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::events::Attributes;
use crate::core::ics03_connection::handler::verify::verify_connection_proof;
use crate::core::ics03_connection::handler::{ConnectionIdState, ConnectionResult};
use crate::core::ics03_connection::msgs::conn_open_confirm::MsgConnectionOpenConfirm;
use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};

pub(crate) fn process<Ctx: ConnectionReader>(
    ctx: &Ctx,
    msg: MsgConnectionOpenConfirm,
) -> HandlerResult<ConnectionResult, Error> {
    let mut output = HandlerOutput::builder();

    let mut conn_end = ctx
        .connection_end(&msg.connection_id)
        .filter(|end| !end.is_uninitialized())
        .ok_or_else(|| Error::uninitialized_connection(msg.connection_id.clone()))?;

    if !conn_end.state_matches(&State::TryOpen) {
        return Err(Error::invalid_state(
            msg.connection_id,
            State::TryOpen,
            *conn_end.state(),
        ));
    }

    // What the counterparty must have stored after its OpenAck.
    let expected_conn = ConnectionEnd::new(
        State::Open,
        conn_end.counterparty().client_id().clone(),
        Counterparty::new(
            conn_end.client_id().clone(),
            Some(msg.connection_id.clone()),
            ctx.commitment_prefix(),
        ),
        conn_end.versions().to_vec(),
    );

    verify_connection_proof(
        ctx,
        &conn_end,
        &expected_conn,
        msg.proof_height,
        &msg.proof_ack,
    )?;

    output.log("success: connection verification passed");

    conn_end.set_state(State::Open);

    info!(connection_id = %msg.connection_id, state = %State::Open, "connection advanced");

    let event_attributes = Attributes {
        height: ctx.host_current_height(),
        connection_id: Some(msg.connection_id.clone()),
        client_id: conn_end.client_id().clone(),
        counterparty_connection_id: conn_end.counterparty().connection_id().cloned(),
        counterparty_client_id: conn_end.counterparty().client_id().clone(),
    };
    output.emit(IbcEvent::OpenConfirmConnection(event_attributes.into()));

    let result = ConnectionResult {
        connection_id: msg.connection_id,
        connection_id_state: ConnectionIdState::Reused,
        connection_end: conn_end,
    };

    Ok(output.with_result(result))
}
