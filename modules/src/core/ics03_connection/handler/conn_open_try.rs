//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenTry`.

use tracing::info;

use crate::core::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
use crate::core::ics03_connection::context::ConnectionReader;
use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::events::Attributes;
use crate::core::ics03_connection::handler::verify::{
    check_client_consensus_height, verify_connection_proof, verify_consensus_proof,
};
use crate::core::ics03_connection::handler::{ConnectionIdState, ConnectionResult};
use crate::core::ics03_connection::msgs::conn_open_try::MsgConnectionOpenTry;
use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};

pub(crate) fn process<Ctx: ConnectionReader>(
    ctx: &Ctx,
    msg: MsgConnectionOpenTry,
) -> HandlerResult<ConnectionResult, Error> {
    let mut output = HandlerOutput::builder();

    // A previous OpenInit under the same identifier is only reusable if it describes the very
    // same pair of ends (crossing hellos).
    let connection_id_state = match ctx.connection_end(&msg.connection_id) {
        None => ConnectionIdState::New,
        Some(old_end) if old_end.is_uninitialized() => ConnectionIdState::New,
        Some(old_end) if old_end.state_matches(&State::Init) => {
            if old_end.client_id_matches(&msg.client_id)
                && old_end.counterparty_matches(&msg.counterparty)
            {
                ConnectionIdState::Reused
            } else {
                return Err(Error::connection_mismatch(msg.connection_id));
            }
        }
        Some(old_end) => {
            return Err(Error::invalid_state(
                msg.connection_id,
                State::Init,
                *old_end.state(),
            ))
        }
    };

    check_client_consensus_height(ctx, msg.consensus_height)?;

    let version = ctx.pick_version(&ctx.get_compatible_versions(), &msg.counterparty_versions)?;

    let mut new_connection_end = ConnectionEnd::new(
        State::TryOpen,
        msg.client_id.clone(),
        msg.counterparty.clone(),
        msg.counterparty_versions.clone(),
    );

    // What the counterparty must have stored after its OpenInit.
    let expected_conn = ConnectionEnd::new(
        State::Init,
        msg.counterparty.client_id().clone(),
        Counterparty::new(
            msg.client_id.clone(),
            Some(msg.connection_id.clone()),
            ctx.commitment_prefix(),
        ),
        msg.counterparty_versions.clone(),
    );

    verify_connection_proof(
        ctx,
        &new_connection_end,
        &expected_conn,
        msg.proof_height,
        &msg.proof_init,
    )?;
    verify_consensus_proof(
        ctx,
        &new_connection_end,
        msg.proof_height,
        msg.consensus_height,
        &msg.proof_consensus,
    )?;

    output.log("success: connection verification passed");

    new_connection_end.set_version(version);

    info!(connection_id = %msg.connection_id, state = %State::TryOpen, "connection advanced");

    let event_attributes = Attributes {
        height: ctx.host_current_height(),
        connection_id: Some(msg.connection_id.clone()),
        client_id: msg.client_id.clone(),
        counterparty_connection_id: msg.counterparty.connection_id().cloned(),
        counterparty_client_id: msg.counterparty.client_id().clone(),
    };
    output.emit(IbcEvent::OpenTryConnection(event_attributes.into()));

    let result = ConnectionResult {
        connection_id: msg.connection_id,
        connection_id_state,
        connection_end: new_connection_end,
    };

    Ok(output.with_result(result))
}
