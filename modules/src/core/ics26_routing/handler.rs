use ibc_verify_proto::google::protobuf::Any;
use ibc_verify_proto::protobuf::Protobuf;
use tracing::{debug, warn};

use crate::core::ics02_client::handler::dispatch as ics2_msg_dispatcher;
use crate::core::ics02_client::msgs::misbehaviour;
use crate::core::ics02_client::msgs::ClientMsg;
use crate::core::ics03_connection::handler::dispatch as ics3_msg_dispatcher;
use crate::core::ics03_connection::msgs::{
    conn_open_ack, conn_open_confirm, conn_open_init, conn_open_try, ConnectionMsg,
};
use crate::core::ics26_routing::context::Ics26Context;
use crate::core::ics26_routing::error::Error;
use crate::core::ics26_routing::msgs::Ics26Envelope::{self, Ics2Msg, Ics3Msg};
use crate::events::{IbcEvent, MessageEvent};
use crate::handler::HandlerOutput;

/// Mimics the DeliverTx ABCI interface, but for a single message and at a slightly lower level.
/// No need for authentication info or signature checks here.
///
/// Messages are processed in order against a working copy of `ctx`, each one seeing the writes
/// of those before it. The copy replaces `ctx` only if every message succeeds, so a failing batch
/// leaves no trace.
pub fn deliver<Ctx>(ctx: &mut Ctx, messages: Vec<Any>) -> Result<Vec<IbcEvent>, Error>
where
    Ctx: Ics26Context,
{
    let mut sandbox = ctx.clone();

    let mut events = Vec::new();
    for (index, any_msg) in messages.into_iter().enumerate() {
        debug!(index, type_url = %any_msg.type_url, "routing message");

        let envelope = decode(any_msg)?;
        let mut output = dispatch(&mut sandbox, envelope).map_err(|e| {
            warn!(index, error = %e, "message rejected, discarding batch");
            e
        })?;
        events.append(&mut output.events);
    }

    *ctx = sandbox;

    Ok(events)
}

/// Attempts to convert a message into a [Ics26Envelope] message
pub fn decode(message: Any) -> Result<Ics26Envelope, Error> {
    match message.type_url.as_str() {
        // ICS2 messages
        misbehaviour::TYPE_URL => {
            let domain_msg = misbehaviour::MsgSubmitMisbehaviour::decode_vec(&message.value)
                .map_err(Error::malformed_message_bytes)?;
            Ok(Ics2Msg(ClientMsg::Misbehaviour(domain_msg)))
        }

        // ICS03
        conn_open_init::TYPE_URL => {
            let domain_msg = conn_open_init::MsgConnectionOpenInit::decode_vec(&message.value)
                .map_err(Error::malformed_message_bytes)?;
            Ok(Ics3Msg(ConnectionMsg::ConnectionOpenInit(domain_msg)))
        }
        conn_open_try::TYPE_URL => {
            let domain_msg = conn_open_try::MsgConnectionOpenTry::decode_vec(&message.value)
                .map_err(Error::malformed_message_bytes)?;
            Ok(Ics3Msg(ConnectionMsg::ConnectionOpenTry(Box::new(domain_msg))))
        }
        conn_open_ack::TYPE_URL => {
            let domain_msg = conn_open_ack::MsgConnectionOpenAck::decode_vec(&message.value)
                .map_err(Error::malformed_message_bytes)?;
            Ok(Ics3Msg(ConnectionMsg::ConnectionOpenAck(Box::new(domain_msg))))
        }
        conn_open_confirm::TYPE_URL => {
            let domain_msg =
                conn_open_confirm::MsgConnectionOpenConfirm::decode_vec(&message.value)
                    .map_err(Error::malformed_message_bytes)?;
            Ok(Ics3Msg(ConnectionMsg::ConnectionOpenConfirm(domain_msg)))
        }

        _ => Err(Error::unknown_message_type_url(message.type_url)),
    }
}

/// Top-level ICS dispatch function. Routes incoming IBC messages to their corresponding module.
/// Returns a handler output with empty result of type `HandlerOutput<()>` which contains the log
/// and events produced after processing the input `msg`.
/// If this method returns an error, the runtime is expected to rollback all state modifications
/// made to the context `ctx` during its execution.
pub fn dispatch<Ctx>(ctx: &mut Ctx, msg: Ics26Envelope) -> Result<HandlerOutput<()>, Error>
where
    Ctx: Ics26Context,
{
    let output = match msg {
        Ics2Msg(msg) => {
            let handler_output = ics2_msg_dispatcher(ctx, msg).map_err(Error::ics02_client)?;

            // Apply the result to the context (host chain store).
            ctx.store_client_result(handler_output.result)
                .map_err(Error::ics02_client)?;

            let mut output = HandlerOutput::builder()
                .with_log(handler_output.log)
                .with_events(handler_output.events);
            output.emit(MessageEvent::Client.into());
            output.with_result(())
        }

        Ics3Msg(msg) => {
            let handler_output = ics3_msg_dispatcher(ctx, msg).map_err(Error::ics03_connection)?;

            // Apply any results to the host chain store.
            ctx.store_connection_result(handler_output.result)
                .map_err(Error::ics03_connection)?;

            let mut output = HandlerOutput::builder()
                .with_log(handler_output.log)
                .with_events(handler_output.events);
            output.emit(MessageEvent::Connection.into());
            output.with_result(())
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use ibc_verify_proto::google::protobuf::Any;

    use super::deliver;
    use crate::core::ics03_connection::context::ConnectionReader;
    use crate::core::ics03_connection::msgs::conn_open_init::test_util::get_dummy_raw_msg_conn_open_init;
    use crate::core::ics03_connection::msgs::conn_open_init::MsgConnectionOpenInit;
    use crate::core::ics26_routing::error::ErrorDetail;
    use crate::core::ics24_host::identifier::{ChainId, ConnectionId};
    use crate::events::{IbcEvent, MessageEvent};
    use crate::mock::context::MockContext;
    use crate::tx_msg::Msg;
    use crate::Height;

    fn context() -> MockContext {
        MockContext::new(ChainId::new("chain-a".to_string(), 0), 5, Height::new(0, 10))
    }

    fn open_init(connection_id: &str) -> Any {
        let mut msg = MsgConnectionOpenInit::try_from(get_dummy_raw_msg_conn_open_init()).unwrap();
        msg.connection_id = ConnectionId::from_str(connection_id).unwrap();
        msg.to_any()
    }

    #[test]
    fn routed_message_emits_its_event_and_a_marker() {
        let mut ctx = context();

        let events = deliver(&mut ctx, vec![open_init("c1")]).unwrap();

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], IbcEvent::OpenInitConnection(_)));
        assert_eq!(events[1], IbcEvent::Message(MessageEvent::Connection));
        assert!(ctx
            .connection_end(&ConnectionId::from_str("c1").unwrap())
            .is_some());
    }

    #[test]
    fn later_messages_see_earlier_writes() {
        let mut ctx = context();

        let err = deliver(&mut ctx, vec![open_init("c1"), open_init("c1")]).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::Ics03Connection(_)));
    }

    #[test]
    fn failing_batch_leaves_the_context_untouched() {
        let mut ctx = context();

        let batch = vec![
            open_init("c1"),
            Any {
                type_url: "/ibc.core.channel.v1.MsgChannelOpenInit".to_string(),
                value: vec![],
            },
        ];
        let err = deliver(&mut ctx, batch).unwrap_err();

        assert!(matches!(err.detail(), ErrorDetail::UnknownMessageTypeUrl(_)));
        assert!(ctx
            .connection_end(&ConnectionId::from_str("c1").unwrap())
            .is_none());
    }

    #[test]
    fn undecodable_message_is_malformed() {
        let mut ctx = context();

        let mut msg = open_init("c1");
        msg.value = vec![0xff; 4];
        let err = deliver(&mut ctx, vec![msg]).unwrap_err();

        assert!(matches!(err.detail(), ErrorDetail::MalformedMessageBytes(_)));
    }
}
