//! This module implements the processing logic for ICS3 (connection open handshake) messages.

use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics03_connection::context::ConnectionReader;
use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::msgs::ConnectionMsg;
use crate::core::ics24_host::identifier::ConnectionId;
use crate::handler::HandlerOutput;

pub mod conn_open_ack;
pub mod conn_open_confirm;
pub mod conn_open_init;
pub mod conn_open_try;
pub mod verify;

/// Defines the possible states of a connection identifier in a `ConnectionResult`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionIdState {
    /// Specifies that the handler allocated a new connection identifier.
    New,

    /// The connection identifier was already in use by an end this handler advanced.
    Reused,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionResult {
    /// The identifier for the connection which the handler processed.
    pub connection_id: ConnectionId,

    /// The state of the connection identifier (whether it was newly generated or not).
    pub connection_id_state: ConnectionIdState,

    /// The connection end, which the handler produced as a result of processing the message.
    pub connection_end: ConnectionEnd,
}

/// General entry point for processing any type of message related to the ICS3 connection open
/// handshake protocol.
pub fn dispatch<Ctx>(ctx: &Ctx, msg: ConnectionMsg) -> Result<HandlerOutput<ConnectionResult>, Error>
where
    Ctx: ConnectionReader,
{
    match msg {
        ConnectionMsg::ConnectionOpenInit(msg) => conn_open_init::process(ctx, msg),
        ConnectionMsg::ConnectionOpenTry(msg) => conn_open_try::process(ctx, *msg),
        ConnectionMsg::ConnectionOpenAck(msg) => conn_open_ack::process(ctx, *msg),
        ConnectionMsg::ConnectionOpenConfirm(msg) => conn_open_confirm::process(ctx, msg),
    }
}

/// Full handshakes between two mock chains, with every proof drawn from the other chain's store.
#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use ibc_verify_proto::google::protobuf::Any;

    use crate::core::ics02_client::context::ClientReader;
    use crate::core::ics02_client::msgs::misbehaviour::MsgSubmitMisbehaviour;
    use crate::core::ics03_connection::connection::{Counterparty, State};
    use crate::core::ics03_connection::context::ConnectionReader;
    use crate::core::ics03_connection::error::ErrorDetail as Ics03ErrorDetail;
    use crate::core::ics03_connection::msgs::conn_open_ack::MsgConnectionOpenAck;
    use crate::core::ics03_connection::msgs::conn_open_confirm::MsgConnectionOpenConfirm;
    use crate::core::ics03_connection::msgs::conn_open_init::MsgConnectionOpenInit;
    use crate::core::ics03_connection::msgs::conn_open_try::MsgConnectionOpenTry;
    use crate::core::ics03_connection::version::{get_compatible_versions, Version};
    use crate::core::ics23_commitment::commitment::CommitmentPrefix;
    use crate::core::ics24_host::identifier::{ChainId, ClientId, ConnectionId};
    use crate::core::ics24_host::Path;
    use crate::core::ics26_routing::error::{Error as RoutingError, ErrorDetail};
    use crate::mock::context::MockContext;
    use crate::test_utils::tendermint_misbehaviour;
    use crate::tx_msg::Msg;
    use crate::Height;

    /// Chain A runs client `07-tendermint-0` of chain B, chain B runs `07-tendermint-1` of A.
    struct Chains {
        a: MockContext,
        b: MockContext,
        client_a: ClientId,
        client_b: ClientId,
        conn_a: ConnectionId,
        conn_b: ConnectionId,
    }

    impl Chains {
        fn new() -> Self {
            let mut chains = Chains {
                a: MockContext::new(ChainId::new("chain-a".to_string(), 0), 10, Height::new(0, 5)),
                b: MockContext::new(ChainId::new("chain-b".to_string(), 0), 10, Height::new(0, 5)),
                client_a: ClientId::from_str("07-tendermint-0").unwrap(),
                client_b: ClientId::from_str("07-tendermint-1").unwrap(),
                conn_a: ConnectionId::from_str("c1").unwrap(),
                conn_b: ConnectionId::from_str("c2").unwrap(),
            };
            chains.sync_a();
            chains.sync_b();
            chains
        }

        /// Lets the client on A catch up with B.
        fn sync_a(&mut self) {
            self.a.sync_client_with(&self.client_a, &self.b);
        }

        /// Lets the client on B catch up with A.
        fn sync_b(&mut self) {
            self.b.sync_client_with(&self.client_b, &self.a);
        }

        fn open_init_on_a(&self) -> Any {
            MsgConnectionOpenInit {
                connection_id: self.conn_a.clone(),
                client_id: self.client_a.clone(),
                counterparty: Counterparty::new(
                    self.client_b.clone(),
                    Some(self.conn_b.clone()),
                    CommitmentPrefix::default(),
                ),
            }
            .to_any()
        }

        fn open_init_on_b(&self) -> Any {
            MsgConnectionOpenInit {
                connection_id: self.conn_b.clone(),
                client_id: self.client_b.clone(),
                counterparty: Counterparty::new(
                    self.client_a.clone(),
                    Some(self.conn_a.clone()),
                    CommitmentPrefix::default(),
                ),
            }
            .to_any()
        }

        /// OpenTry on B, proving A's current state.
        fn open_try_on_b(&self) -> MsgConnectionOpenTry {
            let proof_height = self.a.host_height();
            let consensus_height = ClientReader::client_state(&self.a, &self.client_a)
                .unwrap()
                .latest_height();

            MsgConnectionOpenTry {
                connection_id: self.conn_b.clone(),
                counterparty: Counterparty::new(
                    self.client_a.clone(),
                    Some(self.conn_a.clone()),
                    CommitmentPrefix::default(),
                ),
                client_id: self.client_b.clone(),
                counterparty_versions: self
                    .a
                    .connection_end(&self.conn_a)
                    .map(|end| end.versions().to_vec())
                    .unwrap_or_else(get_compatible_versions),
                proof_init: self
                    .a
                    .prove(&Path::Connections(self.conn_a.clone()), proof_height)
                    .unwrap(),
                proof_consensus: self
                    .a
                    .prove(
                        &Path::ClientConsensusState {
                            client_id: self.client_a.clone(),
                            height: consensus_height,
                        },
                        proof_height,
                    )
                    .unwrap(),
                proof_height,
                consensus_height,
            }
        }

        /// OpenAck on A, proving B's current state.
        fn open_ack_on_a(&self) -> MsgConnectionOpenAck {
            let proof_height = self.b.host_height();
            let consensus_height = ClientReader::client_state(&self.b, &self.client_b)
                .unwrap()
                .latest_height();

            MsgConnectionOpenAck {
                connection_id: self.conn_a.clone(),
                version: self
                    .b
                    .connection_end(&self.conn_b)
                    .and_then(|end| end.versions().first().cloned())
                    .unwrap_or_default(),
                proof_try: self
                    .b
                    .prove(&Path::Connections(self.conn_b.clone()), proof_height)
                    .unwrap(),
                proof_consensus: self
                    .b
                    .prove(
                        &Path::ClientConsensusState {
                            client_id: self.client_b.clone(),
                            height: consensus_height,
                        },
                        proof_height,
                    )
                    .unwrap(),
                proof_height,
                consensus_height,
            }
        }

        /// OpenConfirm on B, proving A's current state.
        fn open_confirm_on_b(&self) -> MsgConnectionOpenConfirm {
            let proof_height = self.a.host_height();
            MsgConnectionOpenConfirm {
                connection_id: self.conn_b.clone(),
                proof_ack: self
                    .a
                    .prove(&Path::Connections(self.conn_a.clone()), proof_height)
                    .unwrap(),
                proof_height,
            }
        }

        fn state_on_a(&self) -> Option<State> {
            self.a.connection_end(&self.conn_a).map(|end| *end.state())
        }

        fn state_on_b(&self) -> Option<State> {
            self.b.connection_end(&self.conn_b).map(|end| *end.state())
        }
    }

    fn ics03_detail(err: &RoutingError) -> Ics03ErrorDetail {
        match err.detail() {
            ErrorDetail::Ics03Connection(e) => e.source.clone(),
            other => panic!("expected a connection error, got {:?}", other),
        }
    }

    #[test]
    fn four_step_handshake_opens_both_ends() {
        let mut chains = Chains::new();

        chains.a.deliver(vec![chains.open_init_on_a()]).unwrap();
        assert_eq!(chains.state_on_a(), Some(State::Init));

        chains.sync_b();
        let try_msg = chains.open_try_on_b().to_any();
        chains.b.deliver(vec![try_msg]).unwrap();
        assert_eq!(chains.state_on_b(), Some(State::TryOpen));

        chains.sync_a();
        let ack_msg = chains.open_ack_on_a().to_any();
        chains.a.deliver(vec![ack_msg]).unwrap();
        assert_eq!(chains.state_on_a(), Some(State::Open));

        chains.sync_b();
        let confirm_msg = chains.open_confirm_on_b().to_any();
        chains.b.deliver(vec![confirm_msg]).unwrap();
        assert_eq!(chains.state_on_b(), Some(State::Open));

        let end_a = chains.a.connection_end(&chains.conn_a).unwrap();
        let end_b = chains.b.connection_end(&chains.conn_b).unwrap();
        assert_eq!(end_a.versions(), &[Version::default()]);
        assert_eq!(end_a.versions(), end_b.versions());
        assert_eq!(end_a.counterparty().client_id(), end_b.client_id());
        assert_eq!(end_b.counterparty().connection_id(), Some(&chains.conn_a));
        assert_eq!(chains.a.client_connections(&chains.client_a), &[chains.conn_a.clone()]);
        assert_eq!(chains.b.client_connections(&chains.client_b), &[chains.conn_b.clone()]);

        assert!(chains.a.validate().is_ok());
        assert!(chains.b.validate().is_ok());
    }

    #[test]
    fn ack_accepts_the_features_both_chains_share() {
        let extended = Version::new(
            "1".to_string(),
            vec![
                "ORDER_ORDERED".to_string(),
                "ORDER_UNORDERED".to_string(),
                "ORDER_EXTRA".to_string(),
            ],
        );
        let mut chains = Chains::new();
        chains.a = chains.a.clone().with_compatible_versions(vec![extended.clone()]);

        chains.a.deliver(vec![chains.open_init_on_a()]).unwrap();
        let end_a = chains.a.connection_end(&chains.conn_a).unwrap();
        assert_eq!(end_a.versions(), &[extended]);

        chains.sync_b();
        let try_msg = chains.open_try_on_b().to_any();
        chains.b.deliver(vec![try_msg]).unwrap();
        let end_b = chains.b.connection_end(&chains.conn_b).unwrap();
        assert_eq!(end_b.versions(), &[Version::default()]);

        chains.sync_a();
        let ack_msg = chains.open_ack_on_a().to_any();
        chains.a.deliver(vec![ack_msg]).unwrap();
        assert_eq!(chains.state_on_a(), Some(State::Open));

        chains.sync_b();
        let confirm_msg = chains.open_confirm_on_b().to_any();
        chains.b.deliver(vec![confirm_msg]).unwrap();
        assert_eq!(chains.state_on_b(), Some(State::Open));

        let end_a = chains.a.connection_end(&chains.conn_a).unwrap();
        assert_eq!(end_a.versions(), &[Version::default()]);
    }

    #[test]
    fn proof_of_a_different_record_is_rejected_without_side_effects() {
        let mut chains = Chains::new();
        chains.a.deliver(vec![chains.open_init_on_a()]).unwrap();
        chains.sync_b();

        // The proof is for c1, but the message claims the counterparty uses another client.
        let mut try_msg = chains.open_try_on_b();
        try_msg.counterparty = Counterparty::new(
            ClientId::from_str("07-tendermint-9").unwrap(),
            Some(chains.conn_a.clone()),
            CommitmentPrefix::default(),
        );

        let height = chains.b.host_height();
        let err = chains.b.deliver(vec![try_msg.to_any()]).unwrap_err();

        assert!(matches!(
            ics03_detail(&err),
            Ics03ErrorDetail::ConnectionVerificationFailure(_)
        ));
        assert_eq!(chains.state_on_b(), None);
        assert_eq!(chains.b.host_height(), height);
    }

    #[test]
    fn consensus_proof_for_an_unretained_height_is_rejected() {
        let mut chains = Chains::new();
        chains.a.deliver(vec![chains.open_init_on_a()]).unwrap();
        chains.sync_b();

        let mut try_msg = chains.open_try_on_b();
        try_msg.consensus_height = chains.b.host_height().increment();

        let err = chains.b.deliver(vec![try_msg.to_any()]).unwrap_err();
        assert!(matches!(
            ics03_detail(&err),
            Ics03ErrorDetail::InvalidConsensusHeight(_)
        ));
    }

    #[test]
    fn crossing_hellos_reuse_the_initialised_end() {
        let mut chains = Chains::new();

        chains.a.deliver(vec![chains.open_init_on_a()]).unwrap();
        chains.b.deliver(vec![chains.open_init_on_b()]).unwrap();
        assert_eq!(chains.state_on_b(), Some(State::Init));

        chains.sync_b();
        let try_msg = chains.open_try_on_b().to_any();
        chains.b.deliver(vec![try_msg]).unwrap();

        let end_b = chains.b.connection_end(&chains.conn_b).unwrap();
        assert_eq!(end_b.state(), &State::TryOpen);
        assert_eq!(end_b.versions(), &[Version::default()]);
    }

    #[test]
    fn handshake_stops_once_the_client_is_frozen() {
        let mut chains = Chains::new();
        chains.a.deliver(vec![chains.open_init_on_a()]).unwrap();
        chains.sync_b();
        let try_msg = chains.open_try_on_b().to_any();
        chains.b.deliver(vec![try_msg]).unwrap();
        chains.sync_a();

        // Chain B forks at height 5 and the client on A is shown both branches.
        let evidence = MsgSubmitMisbehaviour {
            client_id: chains.client_a.clone(),
            misbehaviour: tendermint_misbehaviour(&chains.client_a, 5).into(),
        };
        chains.a.deliver(vec![evidence.to_any()]).unwrap();
        assert_eq!(
            ClientReader::client_state(&chains.a, &chains.client_a)
                .unwrap()
                .frozen_height(),
            Some(Height::new(0, 5))
        );

        let ack_msg = chains.open_ack_on_a().to_any();
        let err = chains.a.deliver(vec![ack_msg]).unwrap_err();
        assert!(matches!(ics03_detail(&err), Ics03ErrorDetail::FrozenClient(_)));
        assert_eq!(chains.state_on_a(), Some(State::Init));
    }

    #[test]
    fn evidence_against_the_wrong_chain_is_rejected() {
        let mut chains = Chains::new();

        // The forked headers belong to chain-b, while the client on B tracks chain-a.
        let evidence = MsgSubmitMisbehaviour {
            client_id: chains.client_b.clone(),
            misbehaviour: tendermint_misbehaviour(&chains.client_b, 5).into(),
        };
        let err = chains.b.deliver(vec![evidence.to_any()]).unwrap_err();

        assert!(matches!(err.detail(), ErrorDetail::Ics02Client(_)));
        assert!(ClientReader::client_state(&chains.b, &chains.client_b)
            .unwrap()
            .frozen_height()
            .is_none());
    }
}
