//! Deterministic keys, headers and client fixtures shared by the tests and the mock host.

use core::str::FromStr;
use core::time::Duration;

use ed25519_dalek::{Signer, SigningKey};
use tendermint::block::signed_header::SignedHeader;
use tendermint::validator::Set as ValidatorSet;
use tendermint::{AppHash, Time};
use tendermint_testgen::{
    Commit, Generator, Header as TestgenHeader, LightBlock, Validator as TestgenValidator, Vote,
};

use crate::clients::ics06_solomachine::consensus_state::ConsensusState as SoloMachineConsensusState;
use crate::clients::ics06_solomachine::misbehaviour::{
    Misbehaviour as SoloMachineMisbehaviour, SignatureAndData,
};
use crate::clients::ics06_solomachine::sign_bytes::sign_bytes;
use crate::clients::ics07_tendermint::client_state::ClientState as TmClientState;
use crate::clients::ics07_tendermint::consensus_state::ConsensusState as TmConsensusState;
use crate::clients::ics07_tendermint::header::Header;
use crate::clients::ics07_tendermint::misbehaviour::Misbehaviour as TmMisbehaviour;
use crate::core::ics02_client::trust_threshold::TrustThreshold;
use crate::core::ics24_host::identifier::{ChainId, ClientId};
use crate::timestamp::Timestamp;
use crate::Height;

/// Unix time, in seconds, of the first block of every test chain.
pub const GENESIS_SECONDS: u64 = 1_600_000_000;

/// Unbonding period of the tendermint client fixtures.
pub const UNBONDING_PERIOD: Duration = Duration::from_secs(3 * 7 * 24 * 3600);

pub fn genesis_time() -> Timestamp {
    Timestamp::from_seconds(GENESIS_SECONDS)
}

/// A validator whose key is derived from `id`.
pub fn test_validator(id: &str, power: u64) -> TestgenValidator {
    TestgenValidator::new(id).voting_power(power)
}

pub fn validator_set(validators: &[TestgenValidator]) -> ValidatorSet {
    ValidatorSet::without_proposer(
        validators
            .iter()
            .map(|v| v.generate().expect("failed to generate validator"))
            .collect(),
    )
}

/// The validators of every mock host chain.
pub fn host_validators() -> Vec<TestgenValidator> {
    ["1", "2", "3"]
        .iter()
        .map(|id| test_validator(id, 10))
        .collect()
}

fn testgen_header(
    chain_id: &ChainId,
    height: u64,
    time: Timestamp,
    app_hash: &[u8],
    validators: &[TestgenValidator],
) -> TestgenHeader {
    TestgenHeader::new(validators)
        .chain_id(chain_id.as_str())
        .height(height)
        .time(Time::try_from(time).expect("block time fits a tendermint time"))
        .next_validators(validators)
        .app_hash(AppHash::try_from(app_hash.to_vec()).expect("valid app hash"))
}

/// A header for `set` at `height` whose commit carries votes from `signers` only.
pub fn signed_header(
    chain_id: &ChainId,
    height: u64,
    time: Timestamp,
    app_hash: &[u8],
    set: &[TestgenValidator],
    signers: &[TestgenValidator],
) -> SignedHeader {
    let header = testgen_header(chain_id, height, time, app_hash, set);
    let votes = signers
        .iter()
        .map(|signer| Vote::new(signer.clone(), header.clone()))
        .collect();
    let commit = Commit::new_with_votes(header.clone(), 1, votes)
        .generate()
        .expect("failed to generate commit");

    SignedHeader::new(header.generate().expect("failed to generate header"), commit)
        .expect("commit matches header height")
}

/// A header signed by every member of `validators`.
pub fn header(
    chain_id: &ChainId,
    height: u64,
    time: Timestamp,
    app_hash: &[u8],
    validators: &[TestgenValidator],
) -> Header {
    let light_block = LightBlock::new_default_with_header(testgen_header(
        chain_id, height, time, app_hash, validators,
    ))
    .generate()
    .expect("failed to generate light block");

    Header {
        signed_header: light_block.signed_header,
        validator_set: light_block.validators,
    }
}

/// Client state tracking `chain-b`, trusted at height 1.
pub fn tendermint_client_state() -> TmClientState {
    tendermint_client_state_for(ChainId::new("chain-b".to_string(), 0), Height::new(0, 1))
}

pub fn tendermint_client_state_for(chain_id: ChainId, latest_height: Height) -> TmClientState {
    TmClientState::new(
        chain_id,
        TrustThreshold::ONE_THIRD,
        UNBONDING_PERIOD / 2,
        UNBONDING_PERIOD,
        Duration::from_secs(5),
        latest_height,
    )
    .expect("valid client state parameters")
}

/// The consensus state `chain-b` had at genesis.
pub fn tendermint_consensus_state() -> TmConsensusState {
    TmConsensusState::new(
        b"genesis".to_vec().into(),
        genesis_time(),
        validator_set(&host_validators()),
    )
}

/// Two headers for `height` on `chain-b` committing to different application hashes, both
/// signed by the validators of [`tendermint_consensus_state`].
pub fn tendermint_misbehaviour(client_id: &ClientId, height: u64) -> TmMisbehaviour {
    let chain_id = ChainId::new("chain-b".to_string(), 0);
    let validators = host_validators();
    let time = (genesis_time() + Duration::from_secs(60)).expect("no overflow");

    TmMisbehaviour {
        client_id: client_id.clone(),
        chain_id: chain_id.clone(),
        header1: header(&chain_id, height, time, b"fork-a", &validators),
        header2: header(&chain_id, height, time, b"fork-b", &validators),
    }
}

/// A solo machine key together with the diversifier it signs under.
#[derive(Clone, Debug)]
pub struct SoloMachineSigner {
    key: SigningKey,
    diversifier: String,
}

impl SoloMachineSigner {
    pub fn new(seed: u8, diversifier: &str) -> Self {
        Self {
            key: SigningKey::from_bytes(&[seed; 32]),
            diversifier: diversifier.to_string(),
        }
    }

    pub fn consensus_state(&self) -> SoloMachineConsensusState {
        SoloMachineConsensusState::new(
            self.key.verifying_key().to_bytes(),
            self.diversifier.clone(),
            genesis_time(),
        )
    }

    pub fn sign(&self, sequence: u64, timestamp: u64, data: Vec<u8>) -> Vec<u8> {
        let bytes = sign_bytes(sequence, timestamp, &self.diversifier, data);
        self.key.sign(&bytes).to_bytes().to_vec()
    }

    pub fn signature_and_data(&self, sequence: u64, timestamp: u64, data: &[u8]) -> SignatureAndData {
        SignatureAndData {
            signature: self.sign(sequence, timestamp, data.to_vec()),
            data: data.to_vec(),
            timestamp,
        }
    }

    /// Two signatures at `sequence` over different data.
    pub fn misbehaviour(&self, client_id: &str, sequence: u64) -> SoloMachineMisbehaviour {
        SoloMachineMisbehaviour {
            client_id: ClientId::from_str(client_id).expect("valid client identifier"),
            sequence,
            signature_one: self.signature_and_data(sequence, 10, b"DATA ONE"),
            signature_two: self.signature_and_data(sequence, 10, b"DATA TWO"),
        }
    }
}
