//! Security key codec
//!
//! OptionsHouse addresses every instrument with a colon-delimited key:
//!
//! ```text
//! IBM:20110716:1600000:C     option: underlying, expiration, strike, C|P
//! IBM:::S                    stock: empty expiration and strike
//! ```
//!
//! The strike field is expressed in hundredths of a cent, so `1600000`
//! is a $160.00 strike. All functions here are total: any input string
//! produces a result, and malformed keys are passed through untouched
//! once normalized.

use crate::fixed::Fixed;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Suffix appended to a bare ticker to turn it into a stock key
pub const STOCK_KEY_SUFFIX: &str = ":::S";

const STRIKE_SCALE: u32 = 4;

/// Strip everything but ASCII letters and uppercase the rest.
#[inline]
pub fn normalize_symbol(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Strip everything but ASCII letters, digits and colons, then uppercase.
#[inline]
pub fn normalize_key(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ':')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// A string is treated as a key as soon as it carries a colon.
#[inline]
pub fn is_key(input: &str) -> bool {
    input.contains(':')
}

/// Turn a ticker or a key into canonical key form.
///
/// Keys are normalized; anything else is treated as a stock ticker and
/// gets the `:::S` suffix. Empty input yields `":::S"`.
pub fn to_key(input: &str) -> String {
    if is_key(input) {
        normalize_key(input)
    } else {
        let mut key = normalize_symbol(input);
        key.push_str(STOCK_KEY_SUFFIX);
        key
    }
}

/// Underlying ticker: everything before the first colon of the canonical key.
pub fn underlying_of(key: &str) -> String {
    let mut canonical = to_key(key);
    if let Some(idx) = canonical.find(':') {
        canonical.truncate(idx);
    }
    canonical
}

pub fn is_stock(key: &str) -> bool {
    to_key(key).ends_with('S')
}

pub fn is_option(key: &str) -> bool {
    let canonical = to_key(key);
    canonical.ends_with('C') || canonical.ends_with('P')
}

/// Compare two keys after canonicalization.
///
/// This is exact string equality: `1600000` and `01600000` are different
/// strikes as far as this function is concerned.
pub fn keys_equal(a: &str, b: &str) -> bool {
    to_key(a) == to_key(b)
}

/// What kind of instrument a key refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    Stock,
    Call,
    Put,
}

impl InstrumentKind {
    /// Trailing flag character used in the key
    pub fn flag(&self) -> char {
        match self {
            InstrumentKind::Stock => 'S',
            InstrumentKind::Call => 'C',
            InstrumentKind::Put => 'P',
        }
    }

    pub fn from_flag(flag: char) -> Option<Self> {
        match flag.to_ascii_uppercase() {
            'S' => Some(InstrumentKind::Stock),
            'C' => Some(InstrumentKind::Call),
            'P' => Some(InstrumentKind::Put),
            _ => None,
        }
    }

    pub fn is_option(&self) -> bool {
        matches!(self, InstrumentKind::Call | InstrumentKind::Put)
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentKind::Stock => write!(f, "STOCK"),
            InstrumentKind::Call => write!(f, "CALL"),
            InstrumentKind::Put => write!(f, "PUT"),
        }
    }
}

/// Canonical security key
///
/// Holds the canonical text and slices fields out of it on demand.
/// Construction never fails; a key with missing fields simply reports
/// empty strings for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SecurityKey(String);

impl SecurityKey {
    /// Canonicalize a ticker or key.
    pub fn parse(input: &str) -> Self {
        Self(to_key(input))
    }

    /// Stock key for a ticker, e.g. `ibm` -> `IBM:::S`.
    pub fn stock(symbol: &str) -> Self {
        let mut key = normalize_symbol(symbol);
        key.push_str(STOCK_KEY_SUFFIX);
        Self(key)
    }

    /// Build an option key. `expiration` is `YYYYMMDD`, `strike` is in
    /// hundredths of a cent.
    pub fn option(underlying: &str, expiration: &str, strike: u64, kind: InstrumentKind) -> Self {
        let raw = format!("{}:{}:{}:{}", normalize_symbol(underlying), expiration, strike, kind.flag());
        Self(normalize_key(&raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn field(&self, index: usize) -> &str {
        self.0.split(':').nth(index).unwrap_or("")
    }

    pub fn underlying(&self) -> &str {
        self.field(0)
    }

    /// Expiration as sent by the server (`YYYYMMDD`), empty for stocks
    pub fn expiration(&self) -> &str {
        self.field(1)
    }

    /// Raw strike field text
    pub fn strike_field(&self) -> &str {
        self.field(2)
    }

    /// Strike in hundredths of a cent; zero when empty or non-numeric.
    pub fn strike(&self) -> u64 {
        self.strike_field().parse().unwrap_or(0)
    }

    /// Strike in dollars, e.g. `1600000` -> `160.0000`.
    pub fn strike_price(&self) -> Fixed {
        Fixed::from(Decimal::from_i128_with_scale(i128::from(self.strike()), STRIKE_SCALE))
    }

    pub fn kind(&self) -> Option<InstrumentKind> {
        self.0.chars().last().and_then(InstrumentKind::from_flag)
    }

    pub fn is_stock(&self) -> bool {
        self.0.ends_with('S')
    }

    pub fn is_option(&self) -> bool {
        self.0.ends_with('C') || self.0.ends_with('P')
    }

    pub fn matches(&self, other: &str) -> bool {
        self.0 == to_key(other)
    }
}

impl fmt::Display for SecurityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SecurityKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for SecurityKey {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for SecurityKey {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<SecurityKey> for String {
    fn from(key: SecurityKey) -> Self {
        key.0
    }
}

impl AsRef<str> for SecurityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
