use core::fmt;

use serde::{Deserialize, Serialize};

use ibc_verify_proto::ibc::core::connection::v1::{
    ConnectionEnd as RawConnectionEnd, Counterparty as RawCounterparty,
};
use ibc_verify_proto::protobuf::Protobuf;

use crate::core::ics03_connection::error::Error;
use crate::core::ics03_connection::version::Version;
use crate::core::ics23_commitment::commitment::CommitmentPrefix;
use crate::core::ics24_host::identifier::{ClientId, ConnectionId};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEnd {
    pub state: State,
    client_id: ClientId,
    counterparty: Counterparty,
    versions: Vec<Version>,
}

impl Protobuf<RawConnectionEnd> for ConnectionEnd {}

impl TryFrom<RawConnectionEnd> for ConnectionEnd {
    type Error = Error;

    fn try_from(value: RawConnectionEnd) -> Result<Self, Self::Error> {
        let state = State::from_i32(value.state)?;
        if state == State::Uninitialized {
            return Ok(ConnectionEnd::default());
        }

        Ok(Self::new(
            state,
            value.client_id.parse().map_err(Error::invalid_identifier)?,
            value
                .counterparty
                .ok_or_else(Error::missing_counterparty)?
                .try_into()?,
            value
                .versions
                .into_iter()
                .map(Version::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        ))
    }
}

impl From<ConnectionEnd> for RawConnectionEnd {
    fn from(value: ConnectionEnd) -> Self {
        RawConnectionEnd {
            client_id: value.client_id.to_string(),
            versions: value.versions.into_iter().map(Into::into).collect(),
            state: value.state as i32,
            counterparty: Some(value.counterparty.into()),
        }
    }
}

impl ConnectionEnd {
    pub fn new(
        state: State,
        client_id: ClientId,
        counterparty: Counterparty,
        versions: Vec<Version>,
    ) -> Self {
        Self {
            state,
            client_id,
            counterparty,
            versions,
        }
    }

    /// Getter for the state of this connection end.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Setter for the `state` field.
    pub fn set_state(&mut self, new_state: State) {
        self.state = new_state;
    }

    /// Setter for the `version` field.
    pub fn set_version(&mut self, new_version: Version) {
        self.versions = vec![new_version];
    }

    /// Helper function to compare the counterparty of this end with another counterparty.
    pub fn counterparty_matches(&self, other: &Counterparty) -> bool {
        self.counterparty.eq(other)
    }

    /// Helper function to compare the client id of this end with another client identifier.
    pub fn client_id_matches(&self, other: &ClientId) -> bool {
        self.client_id.eq(other)
    }

    /// Helper function to determine whether the connection is open.
    pub fn is_open(&self) -> bool {
        self.state_matches(&State::Open)
    }

    /// Helper function to determine whether the connection is uninitialized.
    pub fn is_uninitialized(&self) -> bool {
        self.state_matches(&State::Uninitialized)
    }

    /// Helper function to compare the state of this end with another state.
    pub fn state_matches(&self, other: &State) -> bool {
        self.state.eq(other)
    }

    /// Getter for the client id on the local party of this connection end.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Getter for the list of versions in this connection end.
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Getter for the counterparty.
    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    client_id: ClientId,
    pub connection_id: Option<ConnectionId>,
    prefix: CommitmentPrefix,
}

impl TryFrom<RawCounterparty> for Counterparty {
    type Error = Error;

    fn try_from(value: RawCounterparty) -> Result<Self, Self::Error> {
        let connection_id = Some(value.connection_id)
            .filter(|x| !x.is_empty())
            .map(|v| v.parse::<ConnectionId>())
            .transpose()
            .map_err(Error::invalid_identifier)?;

        Ok(Counterparty::new(
            value.client_id.parse().map_err(Error::invalid_identifier)?,
            connection_id,
            value
                .prefix
                .ok_or_else(Error::missing_counterparty_prefix)?
                .try_into()
                .map_err(Error::invalid_counterparty_prefix)?,
        ))
    }
}

impl From<Counterparty> for RawCounterparty {
    fn from(value: Counterparty) -> Self {
        RawCounterparty {
            client_id: value.client_id.as_str().to_string(),
            connection_id: value
                .connection_id
                .map_or_else(String::new, |v| v.as_str().to_string()),
            prefix: Some(value.prefix.into()),
        }
    }
}

impl Counterparty {
    pub fn new(
        client_id: ClientId,
        connection_id: Option<ConnectionId>,
        prefix: CommitmentPrefix,
    ) -> Self {
        Self {
            client_id,
            connection_id,
            prefix,
        }
    }

    /// Getter for the client id.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Getter for connection id.
    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    pub fn prefix(&self) -> &CommitmentPrefix {
        &self.prefix
    }
}

/// The handshake progress of one connection end. The order of the variants is the order in
/// which a connection end moves through them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum State {
    Uninitialized = 0isize,
    Init = 1isize,
    TryOpen = 2isize,
    Open = 3isize,
}

impl State {
    /// Yields the State as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
        }
    }

    /// Parses the State out from a i32.
    pub fn from_i32(s: i32) -> Result<Self, Error> {
        match s {
            0 => Ok(Self::Uninitialized),
            1 => Ok(Self::Init),
            2 => Ok(Self::TryOpen),
            3 => Ok(Self::Open),
            _ => Err(Error::unknown_state(s)),
        }
    }

    /// Returns whether or not this connection state is `Open`.
    pub fn is_open(self) -> bool {
        self == State::Open
    }

    /// Returns whether or not this connection with this state
    /// has progressed less or the same than the argument.
    pub fn less_or_equal_progress(self, other: Self) -> bool {
        self <= other
    }
}

impl Default for State {
    fn default() -> Self {
        State::Uninitialized
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use test_log::test;

    use super::*;
    use crate::core::ics03_connection::error::ErrorDetail;
    use crate::core::ics03_connection::version::get_compatible_versions;

    fn connection_end() -> ConnectionEnd {
        ConnectionEnd::new(
            State::TryOpen,
            ClientId::from_str("07-tendermint-1").unwrap(),
            Counterparty::new(
                ClientId::from_str("06-solomachine-3").unwrap(),
                Some(ConnectionId::from_str("c1").unwrap()),
                CommitmentPrefix::default(),
            ),
            get_compatible_versions(),
        )
    }

    #[test]
    fn connection_end_survives_the_wire() {
        let end = connection_end();
        let decoded = ConnectionEnd::decode_vec(&end.encode_vec()).unwrap();
        assert_eq!(decoded, end);
    }

    #[test]
    fn absent_counterparty_connection_is_encoded_empty() {
        let end = ConnectionEnd::new(
            State::Init,
            ClientId::from_str("07-tendermint-1").unwrap(),
            Counterparty::new(
                ClientId::from_str("06-solomachine-3").unwrap(),
                None,
                CommitmentPrefix::signature(b"d".to_vec()),
            ),
            get_compatible_versions(),
        );

        let raw = RawConnectionEnd::from(end.clone());
        assert_eq!(raw.counterparty.as_ref().unwrap().connection_id, "");
        assert_eq!(ConnectionEnd::try_from(raw).unwrap(), end);
    }

    #[test]
    fn counterparty_without_prefix_is_rejected() {
        let mut raw = RawConnectionEnd::from(connection_end());
        if let Some(counterparty) = raw.counterparty.as_mut() {
            counterparty.prefix = None;
        }
        let err = ConnectionEnd::try_from(raw).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::MissingCounterpartyPrefix(_)));
    }

    #[test]
    fn unknown_state_is_rejected() {
        let mut raw = RawConnectionEnd::from(connection_end());
        raw.state = 7;
        assert!(ConnectionEnd::try_from(raw).is_err());
    }

    #[test]
    fn states_are_ordered_by_progress() {
        assert!(State::Init.less_or_equal_progress(State::TryOpen));
        assert!(State::TryOpen.less_or_equal_progress(State::Open));
        assert!(!State::Open.less_or_equal_progress(State::Init));
        assert!(State::Open.is_open());
    }
}
