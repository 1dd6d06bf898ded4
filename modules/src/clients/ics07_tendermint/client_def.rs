use core::time::Duration;

use ibc_verify_proto::protobuf::Protobuf;
use tracing::{debug, warn};

use crate::clients::ics07_tendermint::client_state::ClientState;
use crate::clients::ics07_tendermint::consensus_state::ConsensusState;
use crate::clients::ics07_tendermint::misbehaviour::Misbehaviour;
use crate::clients::ics07_tendermint::voting_power::verify_commit_trusting;
use crate::core::ics02_client::client_consensus::AnyConsensusState;
use crate::core::ics02_client::client_def::ClientDef;
use crate::core::ics02_client::error::Error as Ics02Error;
use crate::core::ics02_client::misbehaviour::{check_evidence_height, Misbehaviour as _};
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics23_commitment::commitment::{
    CommitmentPrefix, CommitmentProof, CommitmentRoot, CommitmentType,
};
use crate::core::ics23_commitment::merkle::apply_prefix;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::core::ics24_host::Path;
use crate::timestamp::Timestamp;
use crate::Height;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TendermintClient;

impl ClientDef for TendermintClient {
    type ClientState = ClientState;
    type ConsensusState = ConsensusState;
    type Misbehaviour = Misbehaviour;

    fn check_misbehaviour_and_update_state(
        &self,
        client_state: Self::ClientState,
        consensus_state: &Self::ConsensusState,
        loaded_height: Height,
        misbehaviour: Self::Misbehaviour,
        now: Timestamp,
    ) -> Result<Self::ClientState, Ics02Error> {
        let evidence_height = misbehaviour.height();
        check_evidence_height(client_state.frozen_height, loaded_height, evidence_height)?;

        // Validators are only accountable within the unbonding window of the trusted state.
        let elapsed = now
            .duration_since(&consensus_state.timestamp)
            .unwrap_or(Duration::ZERO);
        if elapsed >= client_state.unbonding_period {
            warn!(
                client_id = %misbehaviour.client_id,
                ?elapsed,
                unbonding_period = ?client_state.unbonding_period,
                "misbehaviour evidence outside the unbonding period"
            );
            return Err(Ics02Error::unbonding_period_expired(
                elapsed,
                client_state.unbonding_period,
            ));
        }

        misbehaviour
            .validate_basic()
            .map_err(|e| Ics02Error::invalid_evidence(e.to_string()))?;

        if misbehaviour.chain_id != client_state.chain_id {
            return Err(Ics02Error::invalid_evidence(format!(
                "evidence is for chain {} but the client tracks {}",
                misbehaviour.chain_id, client_state.chain_id
            )));
        }

        for (name, header) in [("header1", &misbehaviour.header1), ("header2", &misbehaviour.header2)] {
            let tally = verify_commit_trusting(
                &consensus_state.validator_set,
                &header.validator_set,
                &header.signed_header,
                client_state.trust_level,
            )
            .map_err(|e| Ics02Error::invalid_evidence(format!("{}: {}", name, e)))?;
            debug!(%tally, "{} is attributable to the trusted validators", name);
        }

        client_state
            .with_frozen_height(evidence_height)
            .map_err(Ics02Error::tendermint)
    }

    fn verify_client_consensus_state(
        &self,
        client_state: &Self::ClientState,
        consensus_state: &Self::ConsensusState,
        height: Height,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProof,
        client_id: &ClientId,
        consensus_height: Height,
        expected_consensus_state: &AnyConsensusState,
    ) -> Result<(), Ics02Error> {
        client_state
            .verify_height(height)
            .map_err(Ics02Error::tendermint)?;

        let path = Path::ClientConsensusState {
            client_id: client_id.clone(),
            height: consensus_height,
        };
        let value = expected_consensus_state.encode_vec();
        verify_membership(prefix, proof, &consensus_state.root, path, value)
    }

    fn verify_connection_state(
        &self,
        client_state: &Self::ClientState,
        consensus_state: &Self::ConsensusState,
        height: Height,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProof,
        connection_id: &ConnectionId,
        expected_connection_end: &ConnectionEnd,
    ) -> Result<(), Ics02Error> {
        client_state
            .verify_height(height)
            .map_err(Ics02Error::tendermint)?;

        let path = Path::Connections(connection_id.clone());
        let value = expected_connection_end.encode_vec();
        verify_membership(prefix, proof, &consensus_state.root, path, value)
    }
}

fn verify_membership(
    prefix: &CommitmentPrefix,
    proof: &CommitmentProof,
    root: &CommitmentRoot,
    path: Path,
    value: Vec<u8>,
) -> Result<(), Ics02Error> {
    let merkle_proof = match proof {
        CommitmentProof::Merkle(proof) => proof,
        other => {
            return Err(Ics02Error::invalid_commitment_type(
                CommitmentType::Merkle,
                other.commitment_type(),
            ))
        }
    };
    if prefix.commitment_type() != CommitmentType::Merkle {
        return Err(Ics02Error::invalid_commitment_type(
            CommitmentType::Merkle,
            prefix.commitment_type(),
        ));
    }

    merkle_proof
        .validate_basic()
        .map_err(Ics02Error::ics23_verification)?;
    let merkle_path =
        apply_prefix(prefix, path.to_string()).map_err(Ics02Error::ics23_verification)?;

    merkle_proof
        .verify_membership(root, &merkle_path, &value)
        .map_err(Ics02Error::ics23_verification)
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;
    use core::time::Duration;

    use test_log::test;

    use super::*;
    use crate::clients::ics07_tendermint::header::Header;
    use crate::core::ics02_client::error::ErrorDetail;
    use crate::core::ics02_client::trust_threshold::TrustThreshold;
    use crate::core::ics23_commitment::signature::SignatureProof;
    use crate::core::ics24_host::identifier::ChainId;
    use tendermint_testgen::Validator as TestValidator;

    use crate::test_utils::{header, test_validator, validator_set};

    const UNBONDING: Duration = Duration::from_secs(3 * 7 * 24 * 3600);

    struct Fixture {
        chain_id: ChainId,
        validators: Vec<TestValidator>,
        client_state: ClientState,
        consensus_state: ConsensusState,
        trusted_time: Timestamp,
    }

    fn fixture() -> Fixture {
        let chain_id = ChainId::new("chain-b".to_string(), 0);
        let validators = vec![
            test_validator("1", 10),
            test_validator("2", 10),
            test_validator("3", 10),
        ];
        let trusted_time = Timestamp::from_seconds(1_000_000);
        let client_state = ClientState::new(
            chain_id.clone(),
            TrustThreshold::ONE_THIRD,
            UNBONDING / 2,
            UNBONDING,
            Duration::from_secs(5),
            Height::new(0, 1),
        )
        .unwrap();
        let consensus_state = ConsensusState::new(
            b"trusted".to_vec().into(),
            trusted_time,
            validator_set(&validators),
        );

        Fixture {
            chain_id,
            validators,
            client_state,
            consensus_state,
            trusted_time,
        }
    }

    impl Fixture {
        fn conflicting_headers(&self, height: u64) -> (Header, Header) {
            let time = (self.trusted_time + Duration::from_secs(60)).unwrap();
            (
                header(&self.chain_id, height, time, b"fork-a", &self.validators),
                header(&self.chain_id, height, time, b"fork-b", &self.validators),
            )
        }

        fn misbehaviour(&self, height: u64) -> Misbehaviour {
            let (header1, header2) = self.conflicting_headers(height);
            Misbehaviour {
                client_id: ClientId::from_str("07-tendermint-0").unwrap(),
                chain_id: self.chain_id.clone(),
                header1,
                header2,
            }
        }

        fn now(&self) -> Timestamp {
            (self.trusted_time + Duration::from_secs(3600)).unwrap()
        }
    }

    #[test]
    fn conflicting_signed_headers_freeze_the_client() {
        let f = fixture();
        let new_state = TendermintClient
            .check_misbehaviour_and_update_state(
                f.client_state.clone(),
                &f.consensus_state,
                Height::new(0, 1),
                f.misbehaviour(7),
                f.now(),
            )
            .unwrap();
        assert_eq!(new_state.frozen_height, Some(Height::new(0, 7)));
    }

    #[test]
    fn evidence_past_the_unbonding_period_is_expired() {
        let f = fixture();
        let now = (f.trusted_time + UNBONDING).unwrap();

        // Even evidence with unverifiable headers reports the expiry.
        let mut misbehaviour = f.misbehaviour(7);
        misbehaviour.header2 = misbehaviour.header1.clone();

        let err = TendermintClient
            .check_misbehaviour_and_update_state(
                f.client_state.clone(),
                &f.consensus_state,
                Height::new(0, 1),
                misbehaviour,
                now,
            )
            .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::UnbondingPeriodExpired(_)));
        assert!(err.is_invalid_evidence());
    }

    #[test]
    fn frozen_client_only_accepts_earlier_faults() {
        let f = fixture();
        let frozen = f
            .client_state
            .clone()
            .with_frozen_height(Height::new(0, 5))
            .unwrap();

        for height in [5, 10] {
            let err = TendermintClient
                .check_misbehaviour_and_update_state(
                    frozen.clone(),
                    &f.consensus_state,
                    Height::new(0, 1),
                    f.misbehaviour(height),
                    f.now(),
                )
                .unwrap_err();
            assert!(matches!(err.detail(), ErrorDetail::ClientAlreadyFrozen(_)));
        }

        let refrozen = TendermintClient
            .check_misbehaviour_and_update_state(
                frozen,
                &f.consensus_state,
                Height::new(0, 1),
                f.misbehaviour(3),
                f.now(),
            )
            .unwrap();
        assert_eq!(refrozen.frozen_height, Some(Height::new(0, 3)));
    }

    #[test]
    fn trusted_state_after_the_evidence_is_rejected() {
        let f = fixture();
        let err = TendermintClient
            .check_misbehaviour_and_update_state(
                f.client_state.clone(),
                &f.consensus_state,
                Height::new(0, 8),
                f.misbehaviour(7),
                f.now(),
            )
            .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidHeight(_)));
    }

    #[test]
    fn evidence_signed_by_unknown_validators_is_invalid() {
        let f = fixture();
        let strangers = vec![test_validator("7", 10), test_validator("8", 10)];
        let time = f.now();
        let misbehaviour = Misbehaviour {
            client_id: ClientId::from_str("07-tendermint-0").unwrap(),
            chain_id: f.chain_id.clone(),
            header1: header(&f.chain_id, 7, time, b"fork-a", &strangers),
            header2: header(&f.chain_id, 7, time, b"fork-b", &strangers),
        };

        let err = TendermintClient
            .check_misbehaviour_and_update_state(
                f.client_state.clone(),
                &f.consensus_state,
                Height::new(0, 1),
                misbehaviour,
                f.now(),
            )
            .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidEvidence(_)));
    }

    #[test]
    fn evidence_for_another_chain_is_invalid() {
        let f = fixture();
        let other = ChainId::new("chain-c".to_string(), 0);
        let time = f.now();
        let misbehaviour = Misbehaviour {
            client_id: ClientId::from_str("07-tendermint-0").unwrap(),
            chain_id: other.clone(),
            header1: header(&other, 7, time, b"fork-a", &f.validators),
            header2: header(&other, 7, time, b"fork-b", &f.validators),
        };

        let err = TendermintClient
            .check_misbehaviour_and_update_state(
                f.client_state.clone(),
                &f.consensus_state,
                Height::new(0, 1),
                misbehaviour,
                f.now(),
            )
            .unwrap_err();
        assert!(err.is_invalid_evidence());
    }

    #[test]
    fn signature_proofs_are_not_accepted() {
        let f = fixture();
        let err = TendermintClient
            .verify_connection_state(
                &f.client_state,
                &f.consensus_state,
                Height::new(0, 1),
                &CommitmentPrefix::default(),
                &SignatureProof::new(vec![1, 2, 3]).into(),
                &ConnectionId::new(0),
                &ConnectionEnd::default(),
            )
            .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidCommitmentType(_)));
    }
}
