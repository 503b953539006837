//! Timestamp type used throughout the polls.
//!
//! Instants are UTC microseconds since the Unix epoch. They travel as RFC 3339
//! strings (the format the vote ledger and the match registry use) and are always
//! compared as instants, never as strings.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GaussError;

const MICROS_PER_MILLI: i64 = 1_000;

/// A UTC instant in microseconds since epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(i64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(MICROS_PER_MILLI))
    }

    pub fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1_000_000))
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_micros())
    }

    pub fn as_micros(&self) -> i64 {
        self.0
    }

    /// Milliseconds from `self` until `later`, zero if `later` is not after `self`.
    pub fn millis_until(&self, later: Timestamp) -> u64 {
        (later.0.saturating_sub(self.0).max(0) / MICROS_PER_MILLI) as u64
    }

    /// RFC 3339 rendering with a `Z` suffix. Millisecond precision unless the
    /// instant carries sub-millisecond digits.
    pub fn to_rfc3339(&self) -> String {
        let format = if self.0 % MICROS_PER_MILLI == 0 {
            SecondsFormat::Millis
        } else {
            SecondsFormat::Micros
        };
        match DateTime::<Utc>::from_timestamp_micros(self.0) {
            Some(dt) => dt.to_rfc3339_opts(format, true),
            // outside chrono's calendar range; keep the raw value so it parses back
            None => format!("{}us", self.0),
        }
    }
}

impl FromStr for Timestamp {
    type Err = GaussError;

    /// Accepts RFC 3339 with an offset, a naive `YYYY-MM-DD[T ]HH:MM:SS[.ffffff]`
    /// (read as UTC), a bare integer of epoch milliseconds, or an integer with a
    /// `us` suffix for epoch microseconds. Digits beyond microseconds are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.timestamp_micros()));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(naive.and_utc().timestamp_micros()));
            }
        }
        if let Some(micros) = s.strip_suffix("us").and_then(|m| m.parse::<i64>().ok()) {
            return Ok(Self(micros));
        }
        if let Ok(millis) = s.parse::<i64>() {
            return Ok(Self::from_millis(millis));
        }
        Err(GaussError::InvalidTimestamp(s.to_string()))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = GaussError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Timestamp> for String {
    fn from(t: Timestamp) -> Self {
        t.to_rfc3339()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// Source of the current instant.
///
/// The service asks the clock once per request; tests substitute a fixed clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_and_zulu_forms_to_same_instant() {
        let a: Timestamp = "2025-04-01T14:00:00Z".parse().unwrap();
        let b: Timestamp = "2025-04-01T19:30:00+05:30".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn naive_strings_are_utc() {
        let a: Timestamp = "2025-04-01T14:00:00".parse().unwrap();
        let b: Timestamp = "2025-04-01 14:00:00.000".parse().unwrap();
        let z: Timestamp = "2025-04-01T14:00:00Z".parse().unwrap();
        assert_eq!(a, z);
        assert_eq!(b, z);
    }

    #[test]
    fn renders_rfc3339_millis() {
        let t: Timestamp = "2025-04-01T14:00:00.250+00:00".parse().unwrap();
        assert_eq!(t.to_rfc3339(), "2025-04-01T14:00:00.250Z");
    }

    #[test]
    fn keeps_sub_millisecond_digits() {
        let close: Timestamp = "2025-04-01T14:00:00.000Z".parse().unwrap();
        let late: Timestamp = "2025-04-01T14:00:00.000900Z".parse().unwrap();
        assert!(late > close);
        assert_eq!(late.as_micros() - close.as_micros(), 900);
        assert_eq!(late.to_rfc3339(), "2025-04-01T14:00:00.000900Z");
        assert_eq!(late.to_rfc3339().parse::<Timestamp>().unwrap(), late);
    }

    #[test]
    fn bare_integers_are_epoch_millis() {
        assert_eq!("1500".parse::<Timestamp>().unwrap(), Timestamp::from_millis(1500));
        assert_eq!("1500us".parse::<Timestamp>().unwrap(), Timestamp::from_micros(1500));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            "yesterday".parse::<Timestamp>(),
            Err(GaussError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn millis_until_saturates() {
        let t = Timestamp::from_secs(100);
        assert_eq!(t.millis_until(Timestamp::from_secs(101)), 1000);
        assert_eq!(t.millis_until(Timestamp::from_secs(99)), 0);
    }

    #[test]
    fn bincode_roundtrip_keeps_instant() {
        let t: Timestamp = "2025-03-22T10:00:00.123456Z".parse().unwrap();
        let bytes = bincode::serialize(&t).unwrap();
        let back: Timestamp = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, t);
    }
}
