use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tendermint::block::signed_header::SignedHeader;
use tendermint::validator::Set as ValidatorSet;

use ibc_verify_proto::ibc::lightclients::tendermint::v1::Header as RawHeader;
use ibc_verify_proto::protobuf::Protobuf;

use crate::clients::ics07_tendermint::error::Error;
use crate::core::ics23_commitment::commitment::CommitmentRoot;
use crate::core::ics24_host::identifier::ChainId;
use crate::timestamp::Timestamp;
use crate::Height;

/// A signed header together with the validator set that produced its commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub signed_header: SignedHeader,
    pub validator_set: ValidatorSet,
}

impl Header {
    pub fn chain_id(&self) -> Result<ChainId, Error> {
        ChainId::from_str(self.signed_header.header.chain_id.as_str())
            .map_err(Error::invalid_chain_identifier)
    }

    pub fn height(&self) -> Height {
        Height::new(
            ChainId::chain_version(self.signed_header.header.chain_id.as_str()),
            self.signed_header.header.height.value(),
        )
    }

    pub fn timestamp(&self) -> Timestamp {
        self.signed_header.header.time.into()
    }

    pub fn app_hash(&self) -> CommitmentRoot {
        self.signed_header.header.app_hash.as_bytes().to_vec().into()
    }

    /// Checks the commit is for this header and the validator set is the one it names.
    pub fn validate_basic(&self) -> Result<(), Error> {
        let header = &self.signed_header.header;
        let commit = &self.signed_header.commit;

        if commit.height != header.height {
            return Err(Error::invalid_header(format!(
                "commit height {} does not match header height {}",
                commit.height, header.height
            )));
        }
        if commit.block_id.hash != header.hash() {
            return Err(Error::invalid_header(
                "commit signs a different block than the header".to_string(),
            ));
        }
        if self.validator_set.validators().is_empty() {
            return Err(Error::invalid_header("validator set cannot be empty".to_string()));
        }
        if header.validators_hash != self.validator_set.hash() {
            return Err(Error::invalid_header(
                "validator set does not match the header's validators hash".to_string(),
            ));
        }
        Ok(())
    }
}

impl Protobuf<RawHeader> for Header {}

impl TryFrom<RawHeader> for Header {
    type Error = Error;

    fn try_from(raw: RawHeader) -> Result<Self, Self::Error> {
        Ok(Self {
            signed_header: raw
                .signed_header
                .ok_or_else(|| Error::missing_raw_field("signed_header".to_string()))?
                .try_into()
                .map_err(Error::invalid_raw_header)?,
            validator_set: raw
                .validator_set
                .ok_or_else(|| Error::missing_raw_field("validator_set".to_string()))?
                .try_into()
                .map_err(Error::invalid_validator_set)?,
        })
    }
}

impl From<Header> for RawHeader {
    fn from(header: Header) -> Self {
        Self {
            signed_header: Some(header.signed_header.into()),
            validator_set: Some(header.validator_set.into()),
        }
    }
}
