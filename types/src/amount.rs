//! Signed monetary amounts for settlement records.
//!
//! Amounts are fixed-point integers (i128) with six fractional digits so that summing
//! many settlements never drifts. Two-decimal rounding happens only in [`fmt::Display`].

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

use crate::error::GaussError;

/// Number of fractional decimal digits kept internally.
pub const AMOUNT_DECIMALS: u32 = 6;

/// Raw units per whole currency unit.
pub const AMOUNT_UNIT: i128 = 1_000_000;

/// Largest number of whole digits an input may carry. Keeps any realistic sum of
/// settlements inside `i128`.
pub const MAX_WHOLE_DIGITS: usize = 18;

const MAX_RAW: i128 = 10i128.pow(MAX_WHOLE_DIGITS as u32) * AMOUNT_UNIT;

/// A signed decimal amount held as raw micro-units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    pub fn from_units(units: i64) -> Self {
        Self(units as i128 * AMOUNT_UNIT)
    }

    /// Convert a float, rounding to the nearest raw unit.
    pub fn from_f64(value: f64) -> Result<Self, GaussError> {
        if !value.is_finite() {
            return Err(GaussError::InvalidAmount(value.to_string()));
        }
        let scaled = (value * AMOUNT_UNIT as f64).round();
        if scaled.abs() >= MAX_RAW as f64 {
            return Err(GaussError::InvalidAmount(value.to_string()));
        }
        Ok(Self(scaled as i128))
    }

    /// Whole units, rejecting magnitudes beyond [`MAX_WHOLE_DIGITS`].
    pub fn try_from_units(units: i64) -> Result<Self, GaussError> {
        let raw = units as i128 * AMOUNT_UNIT;
        if raw.abs() >= MAX_RAW {
            return Err(GaussError::InvalidAmount(units.to_string()));
        }
        Ok(Self(raw))
    }

    pub fn raw(&self) -> i128 {
        self.0
    }

    /// Lossy conversion for chart output.
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / AMOUNT_UNIT as f64
    }

    /// Exact decimal rendering with trailing zeros removed (`"7"`, `"-3.25"`).
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = AMOUNT_UNIT as u128;
        let whole = abs / unit;
        let frac = abs % unit;
        if frac == 0 {
            return format!("{sign}{whole}");
        }
        let digits = format!("{:0width$}", frac, width = AMOUNT_DECIMALS as usize);
        format!("{sign}{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Amount {
    type Err = GaussError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GaussError::InvalidAmount(s.to_string());
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, frac) = match body.split_once('.') {
            Some((w, f)) => (w, f.trim_end_matches('0')),
            None => (body, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac.len() > AMOUNT_DECIMALS as usize
            || whole.trim_start_matches('0').len() > MAX_WHOLE_DIGITS
        {
            return Err(invalid());
        }
        let whole_raw: i128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut frac_raw: i128 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| invalid())?
        };
        frac_raw *= 10i128.pow(AMOUNT_DECIMALS - frac.len() as u32);
        let raw = whole_raw
            .checked_mul(AMOUNT_UNIT)
            .and_then(|w| w.checked_add(frac_raw))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -raw } else { raw }))
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Two-decimal display, rounding half away from zero.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = AMOUNT_UNIT / 100;
        let abs = self.0.unsigned_abs();
        let cents = (abs + (step as u128) / 2) / step as u128;
        let sign = if self.0 < 0 && cents != 0 { "-" } else { "" };
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a number or string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Amount::try_from_units(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        i64::try_from(v)
            .map_err(|_| E::custom(format!("amount {v} out of range")))
            .and_then(|units| Amount::try_from_units(units).map_err(E::custom))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Amount::from_f64(v).map_err(E::custom)
    }
}

/// Human-readable formats (JSON, TOML) accept numbers or strings; binary formats
/// always carry the exact decimal string.
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(AmountVisitor)
        } else {
            deserializer.deserialize_str(AmountVisitor)
        }
    }
}
