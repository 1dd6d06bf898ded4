use ibc_verify_proto::protobuf::Protobuf;
use tracing::debug;

use crate::clients::ics06_solomachine::client_state::ClientState;
use crate::clients::ics06_solomachine::consensus_state::ConsensusState;
use crate::clients::ics06_solomachine::misbehaviour::Misbehaviour;
use crate::clients::ics06_solomachine::sign_bytes::{sign_bytes, state_data};
use crate::core::ics02_client::client_consensus::AnyConsensusState;
use crate::core::ics02_client::client_def::ClientDef;
use crate::core::ics02_client::client_state::ClientState as _;
use crate::core::ics02_client::error::Error as Ics02Error;
use crate::core::ics02_client::misbehaviour::{check_evidence_height, Misbehaviour as _};
use crate::core::ics03_connection::connection::ConnectionEnd;
use crate::core::ics23_commitment::commitment::{CommitmentPrefix, CommitmentProof, CommitmentType};
use crate::core::ics23_commitment::merkle::apply_prefix;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::core::ics24_host::Path;
use crate::timestamp::Timestamp;
use crate::Height;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SoloMachineClient;

impl ClientDef for SoloMachineClient {
    type ClientState = ClientState;
    type ConsensusState = ConsensusState;
    type Misbehaviour = Misbehaviour;

    /// A single signer has no unbonding window: both signatures are checked against the key the
    /// client trusts now.
    fn check_misbehaviour_and_update_state(
        &self,
        client_state: Self::ClientState,
        _consensus_state: &Self::ConsensusState,
        loaded_height: Height,
        misbehaviour: Self::Misbehaviour,
        _now: Timestamp,
    ) -> Result<Self::ClientState, Ics02Error> {
        let evidence_height = misbehaviour.height();
        check_evidence_height(client_state.frozen_height(), loaded_height, evidence_height)?;

        misbehaviour
            .validate_basic()
            .map_err(|e| Ics02Error::invalid_evidence(e.to_string()))?;

        let trusted = &client_state.consensus_state;
        for (name, sig) in [
            ("one", &misbehaviour.signature_one),
            ("two", &misbehaviour.signature_two),
        ] {
            let bytes = sign_bytes(
                misbehaviour.sequence,
                sig.timestamp,
                &trusted.diversifier,
                sig.data.clone(),
            );
            trusted
                .verify_signature(&bytes, &sig.signature)
                .map_err(|e| Ics02Error::invalid_evidence(format!("signature {}: {}", name, e)))?;
        }
        debug!(
            client_id = %misbehaviour.client_id,
            sequence = misbehaviour.sequence,
            "solo machine signed conflicting data"
        );

        Ok(client_state.with_frozen_sequence(misbehaviour.sequence))
    }

    fn verify_client_consensus_state(
        &self,
        client_state: &Self::ClientState,
        _consensus_state: &Self::ConsensusState,
        height: Height,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProof,
        client_id: &ClientId,
        consensus_height: Height,
        expected_consensus_state: &AnyConsensusState,
    ) -> Result<(), Ics02Error> {
        let path = Path::ClientConsensusState {
            client_id: client_id.clone(),
            height: consensus_height,
        };
        verify_signed_state(
            client_state,
            height,
            prefix,
            proof,
            path,
            &expected_consensus_state.encode_vec(),
        )
    }

    fn verify_connection_state(
        &self,
        client_state: &Self::ClientState,
        _consensus_state: &Self::ConsensusState,
        height: Height,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProof,
        connection_id: &ConnectionId,
        expected_connection_end: &ConnectionEnd,
    ) -> Result<(), Ics02Error> {
        let path = Path::Connections(connection_id.clone());
        verify_signed_state(
            client_state,
            height,
            prefix,
            proof,
            path,
            &expected_connection_end.encode_vec(),
        )
    }
}

/// Checks that the proof is the solo machine's signature over `value` stored under `path`, made
/// at the client's current sequence.
fn verify_signed_state(
    client_state: &ClientState,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProof,
    path: Path,
    value: &[u8],
) -> Result<(), Ics02Error> {
    let signature = match proof {
        CommitmentProof::Signature(proof) => proof,
        other => {
            return Err(Ics02Error::invalid_commitment_type(
                CommitmentType::Signature,
                other.commitment_type(),
            ))
        }
    };
    signature
        .validate_basic()
        .map_err(Ics02Error::ics23_verification)?;
    client_state
        .verify_height(height)
        .map_err(Ics02Error::solo_machine)?;

    let path = apply_prefix(prefix, path.to_string()).map_err(Ics02Error::ics23_verification)?;
    let consensus_state = &client_state.consensus_state;
    let bytes = sign_bytes(
        height.revision_height,
        consensus_state.timestamp.nanoseconds(),
        &consensus_state.diversifier,
        state_data(path.to_string().as_bytes(), value),
    );

    consensus_state
        .verify_signature(&bytes, &signature.signature)
        .map_err(Ics02Error::solo_machine)
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use super::*;
    use crate::clients::ics06_solomachine::misbehaviour::SignatureAndData;
    use crate::core::ics02_client::error::ErrorDetail;
    use crate::core::ics23_commitment::merkle::MerkleProof;
    use crate::core::ics23_commitment::signature::SignatureProof;
    use crate::test_utils::SoloMachineSigner;

    const SEQUENCE: u64 = 4;

    fn client_state(signer: &SoloMachineSigner) -> ClientState {
        ClientState::new(SEQUENCE, signer.consensus_state())
    }

    fn misbehaviour(signer: &SoloMachineSigner, sequence: u64) -> Misbehaviour {
        Misbehaviour {
            client_id: ClientId::from_str("06-solomachine-0").unwrap(),
            sequence,
            signature_one: signer.signature_and_data(sequence, 10, b"DATA ONE"),
            signature_two: signer.signature_and_data(sequence, 10, b"DATA TWO"),
        }
    }

    fn check(
        client_state: ClientState,
        misbehaviour: Misbehaviour,
    ) -> Result<ClientState, Ics02Error> {
        let consensus_state = client_state.consensus_state.clone();
        SoloMachineClient.check_misbehaviour_and_update_state(
            client_state,
            &consensus_state,
            Height::new(0, SEQUENCE),
            misbehaviour,
            Timestamp::from_seconds(1),
        )
    }

    #[test]
    fn double_signing_freezes_the_client() {
        let signer = SoloMachineSigner::new(9, "testing");
        let frozen = check(client_state(&signer), misbehaviour(&signer, SEQUENCE)).unwrap();
        assert_eq!(frozen.frozen_height(), Some(Height::new(0, SEQUENCE)));
    }

    #[test]
    fn signatures_by_another_key_are_invalid_evidence() {
        let signer = SoloMachineSigner::new(9, "testing");
        let impostor = SoloMachineSigner::new(10, "testing");
        let err = check(client_state(&signer), misbehaviour(&impostor, SEQUENCE)).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidEvidence(_)));
    }

    #[test]
    fn signature_under_another_diversifier_is_invalid_evidence() {
        let signer = SoloMachineSigner::new(9, "testing");
        let replayed = SoloMachineSigner::new(9, "other-client");
        let err = check(client_state(&signer), misbehaviour(&replayed, SEQUENCE)).unwrap_err();
        assert!(err.is_invalid_evidence());
    }

    #[test]
    fn same_data_twice_is_not_misbehaviour() {
        let signer = SoloMachineSigner::new(9, "testing");
        let mut m = misbehaviour(&signer, SEQUENCE);
        m.signature_two = m.signature_one.clone();
        let err = check(client_state(&signer), m).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidEvidence(_)));
    }

    #[test]
    fn empty_signature_is_not_misbehaviour() {
        let signer = SoloMachineSigner::new(9, "testing");
        let mut m = misbehaviour(&signer, SEQUENCE);
        m.signature_two = SignatureAndData {
            signature: vec![],
            ..m.signature_two
        };
        assert!(check(client_state(&signer), m).is_err());
    }

    #[test]
    fn frozen_client_rejects_later_evidence() {
        let signer = SoloMachineSigner::new(9, "testing");
        let frozen = client_state(&signer).with_frozen_sequence(SEQUENCE);
        let err = check(frozen, misbehaviour(&signer, SEQUENCE + 1)).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::ClientAlreadyFrozen(_)));
    }

    #[test]
    fn verifies_signed_connection_state() {
        let signer = SoloMachineSigner::new(9, "testing");
        let cs = client_state(&signer);
        let prefix = CommitmentPrefix::default();
        let connection_id = ConnectionId::new(0);
        let connection = ConnectionEnd::default();

        let path = apply_prefix(&prefix, Path::Connections(connection_id.clone()).to_string())
            .unwrap()
            .to_string();
        let signature = signer.sign(
            SEQUENCE,
            cs.consensus_state.timestamp.nanoseconds(),
            state_data(path.as_bytes(), &connection.encode_vec()),
        );
        let proof: CommitmentProof = SignatureProof::new(signature).into();

        let verify = |height: Height, proof: &CommitmentProof| {
            SoloMachineClient.verify_connection_state(
                &cs,
                &cs.consensus_state,
                height,
                &prefix,
                proof,
                &connection_id,
                &connection,
            )
        };

        assert!(verify(Height::new(0, SEQUENCE), &proof).is_ok());

        // A signature for this sequence does not prove anything at another one.
        let err = verify(Height::new(0, SEQUENCE + 1), &proof).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::SoloMachine(_)));

        let err = verify(
            Height::new(0, SEQUENCE),
            &SignatureProof::new(vec![]).into(),
        )
        .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::Ics23Verification(_)));

        let err = verify(
            Height::new(0, SEQUENCE),
            &MerkleProof { proofs: vec![] }.into(),
        )
        .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidCommitmentType(_)));
    }
}
