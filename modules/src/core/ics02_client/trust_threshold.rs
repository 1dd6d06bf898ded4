//! IBC Domain type definition for [`TrustThreshold`]
//! represented as a fraction with valid values in the
//! range `[0, 1)`.

use core::fmt::{Display, Error as FmtError, Formatter};

use serde::{Deserialize, Serialize};

use ibc_verify_proto::ibc::lightclients::tendermint::v1::Fraction;
use ibc_verify_proto::protobuf::Protobuf;

use crate::core::ics02_client::error::Error;

/// [`TrustThreshold`] defines the level of trust that a client has
/// towards a set of validators of a chain.
///
/// A trust threshold is represented as a fraction, i.e., a numerator and
/// and a denominator. Voting power `p` out of a total `t` clears the
/// threshold when `p / t > numerator / denominator`.
/// A typical trust threshold is 1/3 in practice: more than a third of the
/// trusted power must corroborate, so at least one honest validator did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustThreshold {
    numerator: u64,
    denominator: u64,
}

impl TrustThreshold {
    /// Constant for a trust threshold of 1/3.
    pub const ONE_THIRD: Self = Self {
        numerator: 1,
        denominator: 3,
    };

    /// Constant for a trust threshold of 2/3.
    pub const TWO_THIRDS: Self = Self {
        numerator: 2,
        denominator: 3,
    };

    /// Instantiate a TrustThreshold with the given denominator and
    /// numerator.
    ///
    /// The constructor succeeds as long as the resulting fraction
    /// is in the range `[0, 1)`.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, Error> {
        if denominator == 0 || numerator >= denominator {
            return Err(Error::invalid_trust_threshold(numerator, denominator));
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// The numerator of the fraction underlying this trust threshold.
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// The denominator of the fraction underlying this trust threshold.
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Whether `tallied` out of `total` voting power strictly exceeds this fraction.
    pub fn is_exceeded_by(&self, tallied: u64, total: u64) -> bool {
        (tallied as u128) * (self.denominator as u128) > (total as u128) * (self.numerator as u128)
    }
}

impl Protobuf<Fraction> for TrustThreshold {}

impl From<TrustThreshold> for Fraction {
    fn from(t: TrustThreshold) -> Self {
        Self {
            numerator: t.numerator,
            denominator: t.denominator,
        }
    }
}

impl TryFrom<Fraction> for TrustThreshold {
    type Error = Error;

    fn try_from(value: Fraction) -> Result<Self, Self::Error> {
        Self::new(value.numerator, value.denominator)
    }
}

impl Default for TrustThreshold {
    fn default() -> Self {
        Self::ONE_THIRD
    }
}

impl Display for TrustThreshold {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn accepts_fractions_below_one() {
        assert!(TrustThreshold::new(0, 1).is_ok());
        assert!(TrustThreshold::new(1, 3).is_ok());
        assert!(TrustThreshold::new(99, 100).is_ok());
    }

    #[test]
    fn rejects_fractions_of_one_or_more() {
        assert!(TrustThreshold::new(1, 1).is_err());
        assert!(TrustThreshold::new(4, 3).is_err());
        assert!(TrustThreshold::new(0, 0).is_err());
    }

    #[test]
    fn threshold_is_strict() {
        let t = TrustThreshold::ONE_THIRD;
        assert!(!t.is_exceeded_by(10, 30));
        assert!(t.is_exceeded_by(11, 30));
        assert!(!t.is_exceeded_by(0, 0));
        assert!(t.is_exceeded_by(u64::MAX, u64::MAX));
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_string(&TrustThreshold::default()).expect("serializes");
        assert_eq!(json, r#"{"numerator":1,"denominator":3}"#);
        let parsed: TrustThreshold = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(parsed, TrustThreshold::ONE_THIRD);
    }
}
