use core::str::FromStr;

use serde::{Deserialize, Serialize};

use ibc_verify_proto::ibc::lightclients::tendermint::v1::Misbehaviour as RawMisbehaviour;
use ibc_verify_proto::protobuf::Protobuf;

use crate::clients::ics07_tendermint::error::Error;
use crate::clients::ics07_tendermint::header::Header;
use crate::core::ics02_client::misbehaviour::AnyMisbehaviour;
use crate::core::ics24_host::identifier::{ChainId, ClientId};
use crate::Height;

pub const TENDERMINT_MISBEHAVIOUR_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.Misbehaviour";

/// Two headers signed for the same height of the same chain that commit to different blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misbehaviour {
    pub client_id: ClientId,
    pub chain_id: ChainId,
    pub header1: Header,
    pub header2: Header,
}

impl Misbehaviour {
    pub fn validate_basic(&self) -> Result<(), Error> {
        self.header1.validate_basic()?;
        self.header2.validate_basic()?;

        if self.header1.chain_id()? != self.chain_id || self.header2.chain_id()? != self.chain_id {
            return Err(Error::invalid_misbehaviour(format!(
                "headers must both belong to chain {}",
                self.chain_id
            )));
        }

        if self.header1.height() != self.header2.height() {
            return Err(Error::invalid_misbehaviour(format!(
                "headers must be at the same height, got {} and {}",
                self.header1.height(),
                self.header2.height()
            )));
        }

        if self.header1.signed_header.commit.block_id == self.header2.signed_header.commit.block_id
        {
            return Err(Error::invalid_misbehaviour(
                "headers commit to the same block".to_string(),
            ));
        }

        Ok(())
    }
}

impl crate::core::ics02_client::misbehaviour::Misbehaviour for Misbehaviour {
    fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    fn height(&self) -> Height {
        self.header1.height()
    }

    fn wrap_any(self) -> AnyMisbehaviour {
        AnyMisbehaviour::Tendermint(self)
    }
}

impl Protobuf<RawMisbehaviour> for Misbehaviour {}

impl TryFrom<RawMisbehaviour> for Misbehaviour {
    type Error = Error;

    fn try_from(raw: RawMisbehaviour) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: ClientId::from_str(&raw.client_id)
                .map_err(Error::invalid_client_identifier)?,
            chain_id: ChainId::from_str(&raw.chain_id).map_err(Error::invalid_chain_identifier)?,
            header1: raw
                .header_1
                .ok_or_else(|| Error::missing_raw_field("header_1".to_string()))?
                .try_into()?,
            header2: raw
                .header_2
                .ok_or_else(|| Error::missing_raw_field("header_2".to_string()))?
                .try_into()?,
        })
    }
}

impl From<Misbehaviour> for RawMisbehaviour {
    fn from(value: Misbehaviour) -> Self {
        RawMisbehaviour {
            client_id: value.client_id.to_string(),
            chain_id: value.chain_id.to_string(),
            header_1: Some(value.header1.into()),
            header_2: Some(value.header2.into()),
        }
    }
}

impl core::fmt::Display for Misbehaviour {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "{} h1: {} h2: {}",
            self.client_id,
            self.header1.height(),
            self.header2.height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use tendermint::AppHash;
    use tendermint_testgen::Validator as TestValidator;
    use test_log::test;

    use super::*;
    use crate::clients::ics07_tendermint::error::ErrorDetail;
    use crate::test_utils::{header, test_validator};
    use crate::timestamp::Timestamp;

    fn fixture() -> (ChainId, Vec<TestValidator>) {
        (
            ChainId::new("chain-b".to_string(), 0),
            vec![test_validator("1", 10), test_validator("2", 10)],
        )
    }

    fn misbehaviour(header1: Header, header2: Header) -> Misbehaviour {
        Misbehaviour {
            client_id: ClientId::from_str("07-tendermint-0").unwrap(),
            chain_id: header1.chain_id().unwrap(),
            header1,
            header2,
        }
    }

    #[test]
    fn conflicting_headers_are_valid_evidence() {
        let (chain_id, vals) = fixture();
        let t = Timestamp::from_seconds(100);
        let m = misbehaviour(
            header(&chain_id, 5, t, b"fork-a", &vals),
            header(&chain_id, 5, t, b"fork-b", &vals),
        );
        assert!(m.validate_basic().is_ok());

        let decoded = Misbehaviour::decode_vec(&m.encode_vec()).unwrap();
        assert_eq!(decoded, m);
    }

    #[test]
    fn identical_headers_are_not_misbehaviour() {
        let (chain_id, vals) = fixture();
        let t = Timestamp::from_seconds(100);
        let h = header(&chain_id, 5, t, b"same", &vals);
        let err = misbehaviour(h.clone(), h).validate_basic().unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidMisbehaviour(_)));
    }

    #[test]
    fn headers_at_different_heights_are_not_misbehaviour() {
        let (chain_id, vals) = fixture();
        let t = Timestamp::from_seconds(100);
        let m = misbehaviour(
            header(&chain_id, 5, t, b"fork-a", &vals),
            header(&chain_id, 6, t, b"fork-b", &vals),
        );
        assert!(m.validate_basic().is_err());
    }

    #[test]
    fn tampered_header_fails_structural_checks() {
        let (chain_id, vals) = fixture();
        let t = Timestamp::from_seconds(100);
        let mut header2 = header(&chain_id, 5, t, b"fork-b", &vals);
        header2.signed_header.header.app_hash = AppHash::try_from(b"rewritten".to_vec()).unwrap();
        let m = misbehaviour(header(&chain_id, 5, t, b"fork-a", &vals), header2);

        let err = m.validate_basic().unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidHeader(_)));
    }
}
