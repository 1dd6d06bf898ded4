//! Trust-level verification of a commit across a changing validator set.

use std::collections::BTreeSet;

use tendermint::block::signed_header::SignedHeader;
use tendermint::block::CommitSig;
use tendermint::validator::Set as ValidatorSet;
use tendermint_light_client_verifier::operations::voting_power::{
    ProdVotingPowerCalculator, VotingPowerCalculator, VotingPowerTally,
};
use tendermint_light_client_verifier::types::TrustThreshold as TmTrustThreshold;
use tracing::trace;

use crate::clients::ics07_tendermint::error::Error;
use crate::core::ics02_client::trust_threshold::TrustThreshold;

/// Checks that validators present in both `trusted` and `untrusted`, and that signed the commit
/// of `signed_header`, hold more than `trust_threshold` of the total `trusted` voting power.
///
/// Absent votes and votes by validators outside either set are skipped. A validator voting
/// twice is an error, as is a present but invalid signature.
pub fn verify_commit_trusting(
    trusted: &ValidatorSet,
    untrusted: &ValidatorSet,
    signed_header: &SignedHeader,
    trust_threshold: TrustThreshold,
) -> Result<VotingPowerTally, Error> {
    let mut seen = BTreeSet::new();
    for sig in &signed_header.commit.signatures {
        if let Some(address) = signer(sig) {
            if !seen.insert(address) {
                return Err(Error::duplicate_validator(address.to_string()));
            }
        }
    }

    // Votes from validators that left the set cannot attest the new header.
    let mut commit = signed_header.commit.clone();
    for sig in commit.signatures.iter_mut() {
        if let Some(address) = signer(sig) {
            if untrusted.validator(address).is_none() {
                *sig = CommitSig::BlockIdFlagAbsent;
            }
        }
    }
    let signed_header = SignedHeader::new(signed_header.header.clone(), commit)
        .map_err(Error::invalid_raw_header)?;

    let threshold = TmTrustThreshold::new(trust_threshold.numerator(), trust_threshold.denominator())
        .map_err(|e| Error::invalid_trust_threshold(e.to_string()))?;

    let tally = ProdVotingPowerCalculator::default()
        .voting_power_in(&signed_header, trusted, threshold)
        .map_err(Error::commit_verification)?;
    trace!(%tally, height = %signed_header.header.height, "tallied commit signatures");

    if trust_threshold.is_exceeded_by(tally.tallied, tally.total) {
        Ok(tally)
    } else {
        Err(Error::insufficient_voting_power(
            tally.tallied,
            tally.total,
            trust_threshold.to_string(),
        ))
    }
}

fn signer(sig: &CommitSig) -> Option<tendermint::account::Id> {
    match sig {
        CommitSig::BlockIdFlagCommit {
            validator_address, ..
        }
        | CommitSig::BlockIdFlagNil {
            validator_address, ..
        } => Some(*validator_address),
        CommitSig::BlockIdFlagAbsent => None,
    }
}

#[cfg(test)]
mod tests {
    use tendermint_testgen::Validator as TestValidator;
    use test_log::test;

    use super::*;
    use crate::clients::ics07_tendermint::error::ErrorDetail;
    use crate::core::ics24_host::identifier::ChainId;
    use crate::test_utils::{signed_header, test_validator, validator_set};
    use crate::timestamp::Timestamp;

    fn signed_by(set: &[TestValidator], signers: &[TestValidator]) -> SignedHeader {
        signed_header(
            &ChainId::new("test-chain".to_string(), 1),
            10,
            Timestamp::from_seconds(1_000),
            b"app",
            set,
            signers,
        )
    }

    fn three_validators() -> Vec<TestValidator> {
        vec![
            test_validator("1", 10),
            test_validator("2", 10),
            test_validator("3", 10),
        ]
    }

    #[test]
    fn passes_when_signers_exceed_threshold() {
        let vals = three_validators();
        let set = validator_set(&vals);
        let header = signed_by(&vals, &vals[..2]);

        let tally = verify_commit_trusting(&set, &set, &header, TrustThreshold::ONE_THIRD).unwrap();
        assert_eq!(tally.total, 30);
        assert!(tally.tallied * 3 > 30);
    }

    #[test]
    fn exactly_the_threshold_is_not_enough() {
        let vals = three_validators();
        let set = validator_set(&vals);
        let header = signed_by(&vals, &vals[..1]);

        let err =
            verify_commit_trusting(&set, &set, &header, TrustThreshold::ONE_THIRD).unwrap_err();
        assert!(matches!(
            err.detail(),
            ErrorDetail::InsufficientVotingPower(e) if e.tallied == 10 && e.total == 30
        ));
    }

    #[test]
    fn only_counts_validators_in_both_sets() {
        let trusted_vals = [test_validator("1", 10), test_validator("2", 10)];
        let new_vals = [test_validator("2", 10), test_validator("3", 50)];
        let trusted = validator_set(&trusted_vals);
        let untrusted = validator_set(&new_vals);

        // Validator 3 holds most of the new power but is unknown to the trusted set.
        let header = signed_by(&new_vals, &new_vals);

        let tally =
            verify_commit_trusting(&trusted, &untrusted, &header, TrustThreshold::ONE_THIRD)
                .unwrap();
        assert_eq!(tally.tallied, 10);
        assert_eq!(tally.total, 20);

        let err = verify_commit_trusting(
            &trusted,
            &untrusted,
            &header,
            TrustThreshold::new(1, 2).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(
            err.detail(),
            ErrorDetail::InsufficientVotingPower(_)
        ));
    }

    #[test]
    fn trusted_signer_missing_from_new_set_is_skipped() {
        let trusted_vals = [test_validator("1", 10), test_validator("2", 10)];
        let trusted = validator_set(&trusted_vals);
        let untrusted = validator_set(&trusted_vals[1..]);

        let header = signed_by(&trusted_vals, &trusted_vals);

        let tally =
            verify_commit_trusting(&trusted, &untrusted, &header, TrustThreshold::ONE_THIRD)
                .unwrap();
        assert_eq!(tally.tallied, 10);

        let err = verify_commit_trusting(
            &trusted,
            &untrusted,
            &header,
            TrustThreshold::new(1, 2).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(
            err.detail(),
            ErrorDetail::InsufficientVotingPower(e) if e.tallied == 10 && e.total == 20
        ));
    }

    #[test]
    fn rejects_duplicate_votes() {
        let vals = [test_validator("1", 10), test_validator("2", 10)];
        let set = validator_set(&vals);
        let header = signed_by(&vals, &vals[..1]);

        let mut commit = header.commit.clone();
        let vote = commit
            .signatures
            .iter()
            .find(|sig| signer(sig).is_some())
            .cloned()
            .unwrap();
        commit.signatures.push(vote);
        let header = SignedHeader::new(header.header.clone(), commit).unwrap();

        let err =
            verify_commit_trusting(&set, &set, &header, TrustThreshold::ONE_THIRD).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::DuplicateValidator(_)));
    }

    #[test]
    fn rejects_a_signature_made_by_another_validator() {
        let vals = three_validators();
        let set = validator_set(&vals);
        let header = signed_by(&vals, &vals);

        // Every vote is needed to pass two thirds, so each signature gets checked.
        let mut commit = header.commit.clone();
        let stolen = match &commit.signatures[0] {
            CommitSig::BlockIdFlagCommit { signature, .. } => signature.clone(),
            other => panic!("expected a commit vote, got {:?}", other),
        };
        if let CommitSig::BlockIdFlagCommit { signature, .. } = &mut commit.signatures[1] {
            *signature = stolen;
        }
        let header = SignedHeader::new(header.header.clone(), commit).unwrap();

        let err =
            verify_commit_trusting(&set, &set, &header, TrustThreshold::TWO_THIRDS).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::CommitVerification(_)));
    }

    #[test]
    fn threshold_below_one_third_is_refused() {
        let vals = three_validators();
        let set = validator_set(&vals);
        let header = signed_by(&vals, &vals);

        let err = verify_commit_trusting(&set, &set, &header, TrustThreshold::new(1, 4).unwrap())
            .unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidTrustThreshold(_)));
    }
}
