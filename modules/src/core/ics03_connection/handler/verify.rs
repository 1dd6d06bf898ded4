//! ICS3 verification functions, common across the handlers that check counterparty proofs.

use tracing::debug;

use crate::core::ics02_client::client_def::{AnyClient, ClientDef};
use crate::core::ics02_client::client_state::AnyClientState;
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics03_connection::context::ConnectionReader;
use crate::core::ics03_connection::error::Error;
use crate::core::ics23_commitment::commitment::CommitmentProof;
use crate::Height;

/// Loads the client backing `connection_end` and refuses to go further if it is frozen.
fn active_client_state<Ctx: ConnectionReader>(
    ctx: &Ctx,
    connection_end: &ConnectionEnd,
) -> Result<AnyClientState, Error> {
    let client_state = ctx.client_state(connection_end.client_id())?;

    if client_state.frozen_height().is_some() {
        return Err(Error::frozen_client(connection_end.client_id().clone()));
    }

    Ok(client_state)
}

/// Verifies the proof that the counterparty stored `expected_conn` under the connection
/// identifier the local end records for it.
pub fn verify_connection_proof<Ctx: ConnectionReader>(
    ctx: &Ctx,
    connection_end: &ConnectionEnd,
    expected_conn: &ConnectionEnd,
    proof_height: Height,
    proof: &CommitmentProof,
) -> Result<(), Error> {
    let client_state = active_client_state(ctx, connection_end)?;

    let counterparty = connection_end.counterparty();
    let connection_id = counterparty
        .connection_id()
        .ok_or_else(Error::missing_counterparty)?;

    let consensus_state = ctx.client_consensus_state(connection_end.client_id(), proof_height)?;

    debug!(
        client_id = %connection_end.client_id(),
        counterparty_connection_id = %connection_id,
        proof_height = %proof_height,
        "verifying connection proof"
    );

    AnyClient::from_client_type(client_state.client_type())
        .verify_connection_state(
            &client_state,
            &consensus_state,
            proof_height,
            counterparty.prefix(),
            proof,
            connection_id,
            expected_conn,
        )
        .map_err(|e| Error::connection_verification_failure(connection_id.clone(), e))
}

/// Verifies the proof that the counterparty's client for this chain stores, at
/// `consensus_height`, the consensus state this chain actually had at that height.
pub fn verify_consensus_proof<Ctx: ConnectionReader>(
    ctx: &Ctx,
    connection_end: &ConnectionEnd,
    proof_height: Height,
    consensus_height: Height,
    proof: &CommitmentProof,
) -> Result<(), Error> {
    let client_state = active_client_state(ctx, connection_end)?;

    let expected_consensus = ctx
        .host_consensus_state(consensus_height)
        .map_err(|_| Error::missing_local_consensus_state(consensus_height))?;

    let consensus_state = ctx.client_consensus_state(connection_end.client_id(), proof_height)?;

    debug!(
        client_id = %connection_end.client_id(),
        consensus_height = %consensus_height,
        proof_height = %proof_height,
        "verifying consensus state proof"
    );

    AnyClient::from_client_type(client_state.client_type())
        .verify_client_consensus_state(
            &client_state,
            &consensus_state,
            proof_height,
            connection_end.counterparty().prefix(),
            proof,
            connection_end.counterparty().client_id(),
            consensus_height,
            &expected_consensus,
        )
        .map_err(|e| Error::consensus_state_verification_failure(consensus_height, e))
}

/// Checks that `claimed_height` is a height of the local chain that is still retained.
pub fn check_client_consensus_height<Ctx: ConnectionReader>(
    ctx: &Ctx,
    claimed_height: Height,
) -> Result<(), Error> {
    if claimed_height > ctx.host_current_height() {
        // Fail if the consensus height is too advanced.
        return Err(Error::invalid_consensus_height(
            claimed_height,
            ctx.host_current_height(),
        ));
    }

    if claimed_height < ctx.host_oldest_height() {
        // Fail if the consensus height is too old (has been pruned).
        return Err(Error::stale_consensus_height(
            claimed_height,
            ctx.host_oldest_height(),
        ));
    }

    Ok(())
}
