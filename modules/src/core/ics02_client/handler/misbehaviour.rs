use tracing::{debug, info};

use crate::core::ics02_client::client_def::{AnyClient, ClientDef};
use crate::core::ics02_client::client_state::AnyClientState;
use crate::core::ics02_client::context::ClientReader;
use crate::core::ics02_client::error::Error;
use crate::core::ics02_client::events::{Attributes, ClientMisbehaviour};
use crate::core::ics02_client::handler::ClientResult;
use crate::core::ics02_client::misbehaviour::Misbehaviour;
use crate::core::ics02_client::msgs::misbehaviour::MsgSubmitMisbehaviour;
use crate::core::ics24_host::identifier::ClientId;
use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};

/// The frozen client state to persist once the evidence is accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Result {
    pub client_id: ClientId,
    pub client_state: AnyClientState,
}

pub fn process<Ctx: ClientReader>(
    ctx: &Ctx,
    msg: MsgSubmitMisbehaviour,
) -> HandlerResult<ClientResult, Error> {
    let mut output = HandlerOutput::builder();

    let MsgSubmitMisbehaviour {
        client_id,
        misbehaviour,
    } = msg;

    if misbehaviour.client_id() != &client_id {
        return Err(Error::invalid_evidence(format!(
            "evidence targets client {} but was submitted for {}",
            misbehaviour.client_id(),
            client_id
        )));
    }

    let client_state = ctx.client_state(&client_id)?;
    let client_type = client_state.client_type();
    let client_def = AnyClient::from_client_type(client_type);

    let evidence_height = misbehaviour.height();
    let (loaded_height, consensus_state) = ctx.consensus_state_lte(&client_id, evidence_height)?;
    let now = ctx.host_timestamp();

    debug!(
        client_id = %client_id,
        evidence_height = %evidence_height,
        loaded_height = %loaded_height,
        "checking misbehaviour"
    );

    let client_state = client_def.check_misbehaviour_and_update_state(
        client_state,
        &consensus_state,
        loaded_height,
        misbehaviour,
        now,
    )?;

    info!(client_id = %client_id, frozen_height = %evidence_height, "client frozen");

    output.emit(IbcEvent::ClientMisbehaviour(ClientMisbehaviour::from(
        Attributes {
            height: ctx.host_height(),
            client_id: client_id.clone(),
            client_type,
            consensus_height: evidence_height,
        },
    )));
    output.log(format!(
        "success: client {} frozen at height {}",
        client_id, evidence_height
    ));

    let result = ClientResult::Misbehaviour(Result {
        client_id,
        client_state,
    });

    Ok(output.with_result(result))
}
