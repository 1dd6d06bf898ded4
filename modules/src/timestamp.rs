use core::fmt::Display;
use core::ops::Add;
use core::time::Duration;

use flex_error::define_error;
use serde::{Deserialize, Serialize};
use tendermint::Time;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// A Unix timestamp in nanoseconds.
///
/// In protocol buffers a timestamp is either a `u64` count of nanoseconds, with 0 meaning the
/// timestamp is not set, or a `google.protobuf.Timestamp`. Both convert into this type.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Default, Deserialize, Serialize, Hash)]
pub struct Timestamp {
    nanoseconds: u64,
}

impl Timestamp {
    pub fn from_nanoseconds(nanoseconds: u64) -> Timestamp {
        Timestamp { nanoseconds }
    }

    pub fn from_seconds(seconds: u64) -> Timestamp {
        Timestamp {
            nanoseconds: seconds.saturating_mul(NANOS_PER_SECOND),
        }
    }

    /// Returns a `Timestamp` representation of a timestamp not being set.
    pub fn none() -> Self {
        Timestamp { nanoseconds: 0 }
    }

    pub fn is_set(&self) -> bool {
        self.nanoseconds != 0
    }

    pub fn nanoseconds(&self) -> u64 {
        self.nanoseconds
    }

    /// Computes the duration difference of another `Timestamp` from the current one.
    /// Returns `None` if the other `Timestamp` is more advanced than the current one or if
    /// either of the `Timestamp`s is not set.
    pub fn duration_since(&self, other: &Timestamp) -> Option<Duration> {
        if !self.is_set() || !other.is_set() {
            return None;
        }
        self.nanoseconds
            .checked_sub(other.nanoseconds)
            .map(Duration::from_nanos)
    }

    /// Checks whether the current timestamp is strictly more advanced
    /// than the `other` timestamp.
    pub fn after(&self, other: &Timestamp) -> bool {
        self.is_set() && other.is_set() && self.nanoseconds > other.nanoseconds
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_set() {
            write!(
                f,
                "Timestamp({}.{:09})",
                self.nanoseconds / NANOS_PER_SECOND,
                self.nanoseconds % NANOS_PER_SECOND
            )
        } else {
            write!(f, "Timestamp(NoTimestamp)")
        }
    }
}

define_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    TimestampError {
        TimestampOverflow
            |_| { "Timestamp overflow when modifying with duration" },

        NegativeTimestamp
            { seconds: i64, nanos: i32 }
            | e | { format_args!("timestamp {}s {}ns precedes the Unix epoch", e.seconds, e.nanos) },
    }
}

impl Add<Duration> for Timestamp {
    type Output = Result<Timestamp, TimestampError>;

    fn add(self, duration: Duration) -> Result<Timestamp, TimestampError> {
        let delta: u64 = duration
            .as_nanos()
            .try_into()
            .map_err(|_| TimestampError::timestamp_overflow())?;
        self.nanoseconds
            .checked_add(delta)
            .map(Timestamp::from_nanoseconds)
            .ok_or_else(TimestampError::timestamp_overflow)
    }
}

impl TryFrom<prost_types::Timestamp> for Timestamp {
    type Error = TimestampError;

    fn try_from(raw: prost_types::Timestamp) -> Result<Self, Self::Error> {
        if raw.seconds < 0 || raw.nanos < 0 {
            return Err(TimestampError::negative_timestamp(raw.seconds, raw.nanos));
        }
        (raw.seconds as u64)
            .checked_mul(NANOS_PER_SECOND)
            .and_then(|ns| ns.checked_add(raw.nanos as u64))
            .map(Timestamp::from_nanoseconds)
            .ok_or_else(TimestampError::timestamp_overflow)
    }
}

impl From<Timestamp> for prost_types::Timestamp {
    fn from(ts: Timestamp) -> Self {
        prost_types::Timestamp {
            seconds: (ts.nanoseconds / NANOS_PER_SECOND) as i64,
            nanos: (ts.nanoseconds % NANOS_PER_SECOND) as i32,
        }
    }
}

/// Block times before the Unix epoch, or past what nanoseconds in a `u64` can hold, are not set.
impl From<Time> for Timestamp {
    fn from(time: Time) -> Self {
        u64::try_from(time.unix_timestamp_nanos())
            .map(Timestamp::from_nanoseconds)
            .unwrap_or_else(|_| Timestamp::none())
    }
}

impl TryFrom<Timestamp> for Time {
    type Error = TimestampError;

    fn try_from(ts: Timestamp) -> Result<Self, Self::Error> {
        let seconds = (ts.nanoseconds / NANOS_PER_SECOND) as i64;
        let nanos = (ts.nanoseconds % NANOS_PER_SECOND) as u32;
        Time::from_unix_timestamp(seconds, nanos)
            .map_err(|_| TimestampError::timestamp_overflow())
    }
}

/// Conversions for `google.protobuf.Duration`, which carries signed fields.
pub(crate) fn duration_from_raw(raw: prost_types::Duration) -> Option<Duration> {
    if raw.seconds < 0 || raw.nanos < 0 {
        return None;
    }
    Some(Duration::new(raw.seconds as u64, raw.nanos as u32))
}

pub(crate) fn duration_to_raw(duration: Duration) -> prost_types::Duration {
    prost_types::Duration {
        seconds: duration.as_secs() as i64,
        nanos: duration.subsec_nanos() as i32,
    }
}
