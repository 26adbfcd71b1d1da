//! Wall-clock timestamps for entity creation and update tracking.
//!
//! Timestamps are naive local times truncated to microseconds. The wire form
//! is ISO-8601 without a UTC offset and always carries six fractional digits.

use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};
use std::fmt;
use std::str::FromStr;

/// Output format: `YYYY-MM-DDTHH:MM:SS.ffffff`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Accepted input format. The fractional part is optional on input.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A microsecond-precision local timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Creates a timestamp at the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Creates a timestamp from a naive datetime, dropping sub-microsecond
    /// precision.
    #[must_use]
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        let micros = dt.nanosecond() / 1_000 * 1_000;
        Self(dt.with_nanosecond(micros).unwrap_or(dt))
    }

    /// Returns the underlying datetime.
    #[must_use]
    pub const fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Generates the next timestamp, strictly greater than `self`.
    ///
    /// Returns the current time when the clock has moved past `self`,
    /// otherwise `self` plus one microsecond.
    #[must_use]
    pub fn tick(&self) -> Self {
        let now = Self::now();
        if now > *self {
            now
        } else {
            Self(self.0 + TimeDelta::microseconds(1))
        }
    }

    /// Parses an ISO-8601 timestamp (`YYYY-MM-DDTHH:MM:SS[.ffffff]`).
    pub fn parse(s: &str) -> crate::Result<Self> {
        NaiveDateTime::parse_from_str(s, PARSE_FORMAT)
            .map(Self::from_datetime)
            .map_err(|e| crate::Error::InvalidTimestamp(format!("{s:?}: {e}")))
    }

    /// Formats the timestamp in its wire form.
    #[must_use]
    pub fn to_iso(&self) -> String {
        self.0.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::from_datetime(dt)
    }
}
