//! Protocol logic specific to processing ICS3 messages of type `MsgConnectionOpenAck`.

use tracing::info;

use crate::core::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
use crate::core::ics03_connection::context::ConnectionReader;
use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::events::Attributes;
use crate::core::ics03_connection::handler::verify::{
    check_client_consensus_height, verify_connection_proof, verify_consensus_proof,
};
use crate::core::ics03_connection::handler::{ConnectionIdState, ConnectionResult};
use crate::core::ics03_connection::msgs::conn_open_ack::MsgConnectionOpenAck;
use crate::core::ics03_connection::version::is_supported_version;
use crate::events::IbcEvent;
use crate::handler::{HandlerOutput, HandlerResult};

pub(crate) fn process<Ctx: ConnectionReader>(
    ctx: &Ctx,
    msg: MsgConnectionOpenAck,
) -> HandlerResult<ConnectionResult, Error> {
    let mut output = HandlerOutput::builder();

    let mut conn_end = ctx
        .connection_end(&msg.connection_id)
        .filter(|end| !end.is_uninitialized())
        .ok_or_else(|| Error::uninitialized_connection(msg.connection_id.clone()))?;

    // The counterparty may narrow an offered version from INIT to the features it shares. A
    // TRYOPEN end (crossing hellos) must have settled on exactly that version.
    match conn_end.state() {
        State::Init if is_supported_version(conn_end.versions(), &msg.version) => {}
        State::TryOpen if conn_end.versions() == [msg.version.clone()] => {}
        State::Init | State::TryOpen => {
            return Err(Error::version_not_supported(msg.version.to_string()))
        }
        state => {
            return Err(Error::invalid_state(
                msg.connection_id,
                State::Init,
                *state,
            ))
        }
    }

    check_client_consensus_height(ctx, msg.consensus_height)?;

    // What the counterparty must have stored after its OpenTry.
    let expected_conn = ConnectionEnd::new(
        State::TryOpen,
        conn_end.counterparty().client_id().clone(),
        Counterparty::new(
            conn_end.client_id().clone(),
            Some(msg.connection_id.clone()),
            ctx.commitment_prefix(),
        ),
        vec![msg.version.clone()],
    );

    verify_connection_proof(
        ctx,
        &conn_end,
        &expected_conn,
        msg.proof_height,
        &msg.proof_try,
    )?;
    verify_consensus_proof(
        ctx,
        &conn_end,
        msg.proof_height,
        msg.consensus_height,
        &msg.proof_consensus,
    )?;

    output.log("success: connection verification passed");

    conn_end.set_state(State::Open);
    conn_end.set_version(msg.version);

    info!(connection_id = %msg.connection_id, state = %State::Open, "connection advanced");

    let event_attributes = Attributes {
        height: ctx.host_current_height(),
        connection_id: Some(msg.connection_id.clone()),
        client_id: conn_end.client_id().clone(),
        counterparty_connection_id: conn_end.counterparty().connection_id().cloned(),
        counterparty_client_id: conn_end.counterparty().client_id().clone(),
    };
    output.emit(IbcEvent::OpenAckConnection(event_attributes.into()));

    let result = ConnectionResult {
        connection_id: msg.connection_id,
        connection_id_state: ConnectionIdState::Reused,
        connection_end: conn_end,
    };

    Ok(output.with_result(result))
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use crate::core::ics03_connection::connection::{ConnectionEnd, Counterparty, State};
    use crate::core::ics03_connection::error::{Error, ErrorDetail};
    use crate::core::ics03_connection::handler::dispatch;
    use crate::core::ics03_connection::msgs::conn_open_ack::test_util::get_dummy_raw_msg_conn_open_ack;
    use crate::core::ics03_connection::msgs::conn_open_ack::MsgConnectionOpenAck;
    use crate::core::ics03_connection::msgs::ConnectionMsg;
    use crate::core::ics03_connection::version::{get_compatible_versions, Version};
    use crate::core::ics23_commitment::commitment::CommitmentPrefix;
    use crate::core::ics24_host::identifier::{ChainId, ClientId, ConnectionId};
    use crate::mock::context::MockContext;
    use crate::test_utils::{tendermint_client_state, tendermint_consensus_state};
    use crate::Height;

    fn client_id() -> ClientId {
        ClientId::from_str("07-tendermint-0").unwrap()
    }

    fn connection_end(state: State, versions: Vec<Version>) -> ConnectionEnd {
        ConnectionEnd::new(
            state,
            client_id(),
            Counterparty::new(
                ClientId::from_str("07-tendermint-1").unwrap(),
                Some(ConnectionId::from_str("destconnection").unwrap()),
                CommitmentPrefix::default(),
            ),
            versions,
        )
    }

    fn setup(end: Option<ConnectionEnd>) -> (MockContext, MsgConnectionOpenAck) {
        let msg = MsgConnectionOpenAck::try_from(get_dummy_raw_msg_conn_open_ack(1, 8)).unwrap();
        let mut ctx =
            MockContext::new(ChainId::new("chain-a".to_string(), 0), 5, Height::new(0, 10))
                .with_client_state(&client_id(), tendermint_client_state().into())
                .with_consensus_state(
                    &client_id(),
                    Height::new(0, 1),
                    tendermint_consensus_state().into(),
                );
        if let Some(end) = end {
            ctx = ctx.with_connection(msg.connection_id.clone(), end);
        }
        (ctx, msg)
    }

    fn process(ctx: &MockContext, msg: MsgConnectionOpenAck) -> Error {
        dispatch(ctx, ConnectionMsg::ConnectionOpenAck(Box::new(msg))).unwrap_err()
    }

    #[test]
    fn missing_connection_cannot_be_acknowledged() {
        let (ctx, msg) = setup(None);
        let err = process(&ctx, msg);
        assert!(matches!(err.detail(), ErrorDetail::UninitializedConnection(_)));
    }

    #[test]
    fn open_connection_cannot_be_acknowledged_again() {
        let (ctx, msg) = setup(Some(connection_end(State::Open, get_compatible_versions())));
        let err = process(&ctx, msg);
        assert!(matches!(err.detail(), ErrorDetail::InvalidState(_)));
        assert!(err.is_invalid_connection_state());
    }

    #[test]
    fn version_not_offered_by_the_init_end_is_rejected() {
        let offered = vec![Version::new("2".to_string(), vec![])];
        let (ctx, msg) = setup(Some(connection_end(State::Init, offered)));
        let err = process(&ctx, msg);
        assert!(matches!(err.detail(), ErrorDetail::VersionNotSupported(_)));
    }

    #[test]
    fn init_end_accepts_a_version_with_fewer_features() {
        let offered = vec![Version::new(
            "1".to_string(),
            vec![
                "ORDER_ORDERED".to_string(),
                "ORDER_UNORDERED".to_string(),
                "ORDER_EXTRA".to_string(),
            ],
        )];
        let (ctx, msg) = setup(Some(connection_end(State::Init, offered)));
        assert_eq!(msg.version, Version::default());

        // Past the version check, the dummy proof is what fails.
        let err = process(&ctx, msg);
        assert!(matches!(
            err.detail(),
            ErrorDetail::ConnectionVerificationFailure(_)
        ));
    }

    #[test]
    fn tryopen_end_must_hold_exactly_the_acknowledged_version() {
        let mut versions = get_compatible_versions();
        versions.push(Version::new("2".to_string(), vec![]));
        let (ctx, msg) = setup(Some(connection_end(State::TryOpen, versions)));
        let err = process(&ctx, msg);
        assert!(matches!(err.detail(), ErrorDetail::VersionNotSupported(_)));
    }

    #[test]
    fn acceptable_end_still_needs_a_valid_proof() {
        let (ctx, msg) = setup(Some(connection_end(State::Init, get_compatible_versions())));
        let err = process(&ctx, msg);
        assert!(matches!(
            err.detail(),
            ErrorDetail::ConnectionVerificationFailure(_)
        ));
    }
}
