use core::str::FromStr;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use ibc_verify_proto::ibc::lightclients::tendermint::v1::ClientState as RawClientState;
use ibc_verify_proto::protobuf::Protobuf;

use crate::clients::ics07_tendermint::error::Error;
use crate::core::ics02_client::client_state::AnyClientState;
use crate::core::ics02_client::client_type::ClientType;
use crate::core::ics02_client::height::optional_height;
use crate::core::ics02_client::trust_threshold::TrustThreshold;
use crate::core::ics24_host::identifier::ChainId;
use crate::timestamp::{duration_from_raw, duration_to_raw};
use crate::Height;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    pub chain_id: ChainId,
    pub trust_level: TrustThreshold,
    pub trusting_period: Duration,
    pub unbonding_period: Duration,
    pub max_clock_drift: Duration,
    pub latest_height: Height,
    pub frozen_height: Option<Height>,
}

impl Protobuf<RawClientState> for ClientState {}

impl ClientState {
    pub fn new(
        chain_id: ChainId,
        trust_level: TrustThreshold,
        trusting_period: Duration,
        unbonding_period: Duration,
        max_clock_drift: Duration,
        latest_height: Height,
    ) -> Result<ClientState, Error> {
        let client_state = Self {
            chain_id,
            trust_level,
            trusting_period,
            unbonding_period,
            max_clock_drift,
            latest_height,
            frozen_height: None,
        };
        client_state.validate()?;
        Ok(client_state)
    }

    /// Checks the parameters the trust model depends on.
    ///
    /// Headers stop being trusted before their validators stop being accountable, so the trusting
    /// period must end strictly inside the unbonding period.
    pub fn validate(&self) -> Result<(), Error> {
        if self.unbonding_period.is_zero() {
            return Err(Error::invalid_unbonding_period("zero".to_string()));
        }
        if self.trusting_period.is_zero() || self.trusting_period >= self.unbonding_period {
            return Err(Error::invalid_trusting_period(format!(
                "{:?} is not within (0, {:?})",
                self.trusting_period, self.unbonding_period
            )));
        }
        if self.trust_level.numerator() == 0 {
            return Err(Error::invalid_trust_threshold(format!(
                "{} lets any commit through",
                self.trust_level
            )));
        }
        if self.latest_height.is_zero() {
            return Err(Error::validation("latest height is zero".to_string()));
        }
        Ok(())
    }

    pub fn latest_height(&self) -> Height {
        self.latest_height
    }

    /// The same client, frozen at `h`.
    pub fn with_frozen_height(self, h: Height) -> Result<Self, Error> {
        if h.is_zero() {
            return Err(Error::validation("frozen height is zero".to_string()));
        }
        Ok(Self {
            frozen_height: Some(h),
            ..self
        })
    }

    /// Proofs at `height` need a trusted root at least that recent and a client that was not
    /// frozen at or below it.
    pub fn verify_height(&self, height: Height) -> Result<(), Error> {
        if self.latest_height < height {
            return Err(Error::insufficient_height(self.latest_height, height));
        }

        match self.frozen_height {
            Some(frozen_height) if frozen_height <= height => {
                Err(Error::client_frozen(frozen_height, height))
            }
            _ => Ok(()),
        }
    }
}

impl crate::core::ics02_client::client_state::ClientState for ClientState {
    fn client_type(&self) -> ClientType {
        ClientType::Tendermint
    }

    fn latest_height(&self) -> Height {
        self.latest_height
    }

    fn frozen_height(&self) -> Option<Height> {
        self.frozen_height
    }

    fn wrap_any(self) -> AnyClientState {
        AnyClientState::Tendermint(self)
    }
}

impl TryFrom<RawClientState> for ClientState {
    type Error = Error;

    fn try_from(raw: RawClientState) -> Result<Self, Self::Error> {
        let trust_level = raw
            .trust_level
            .ok_or_else(|| Error::missing_raw_field("trust_level".to_string()))?;

        let duration = |raw: Option<_>, field: &str| {
            raw.ok_or_else(|| Error::missing_raw_field(field.to_string()))
                .and_then(|d| {
                    duration_from_raw(d).ok_or_else(|| Error::invalid_raw_duration(field.to_string()))
                })
        };

        Ok(Self {
            chain_id: ChainId::from_str(&raw.chain_id).map_err(Error::invalid_chain_identifier)?,
            trust_level: trust_level
                .try_into()
                .map_err(|e| Error::invalid_trust_threshold(format!("{}", e)))?,
            trusting_period: duration(raw.trusting_period, "trusting_period")?,
            unbonding_period: duration(raw.unbonding_period, "unbonding_period")?,
            max_clock_drift: duration(raw.max_clock_drift, "max_clock_drift")?,
            latest_height: optional_height(raw.latest_height)
                .ok_or_else(|| Error::missing_raw_field("latest_height".to_string()))?,
            frozen_height: optional_height(raw.frozen_height),
        })
    }
}

impl From<ClientState> for RawClientState {
    fn from(value: ClientState) -> Self {
        RawClientState {
            chain_id: value.chain_id.to_string(),
            trust_level: Some(value.trust_level.into()),
            trusting_period: Some(duration_to_raw(value.trusting_period)),
            unbonding_period: Some(duration_to_raw(value.unbonding_period)),
            max_clock_drift: Some(duration_to_raw(value.max_clock_drift)),
            frozen_height: Some(value.frozen_height.unwrap_or_else(Height::zero).into()),
            latest_height: Some(value.latest_height.into()),
        }
    }
}
