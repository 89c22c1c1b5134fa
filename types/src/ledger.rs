//! Ledger version selectors.

use crate::error::ValidationError;
use crate::hash::is_hex;
use crate::params::LEDGER_HASH_LEN;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Which ledger version a query addresses.
///
/// Text resolves in a fixed order: an all-digit string (sign allowed, then
/// rejected as out of range) is an index, an all-hex string is a version
/// hash, anything else must be a shortcut keyword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerSelector {
    /// Explicit ledger sequence number.
    Index(u64),
    /// 40-hex-char ledger version hash.
    Hash(String),
    /// Most recent ledger validated by consensus.
    Validated,
    /// Most recent closed ledger.
    Closed,
    /// The in-progress open ledger.
    Current,
}

impl LedgerSelector {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits = input.strip_prefix('-').unwrap_or(input);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            // The integer branch claims every numeric string, so negatives
            // and overflows fail here instead of leaking into the others.
            let index: u64 = input
                .parse()
                .map_err(|_| ValidationError::LedgerIndexOutOfRange(input.to_string()))?;
            return Ok(Self::Index(index));
        }
        if is_hex(input) {
            if input.len() != LEDGER_HASH_LEN {
                return Err(ValidationError::InvalidLedgerHash(input.len()));
            }
            return Ok(Self::Hash(input.to_string()));
        }
        match input.to_ascii_lowercase().as_str() {
            "validated" => Ok(Self::Validated),
            "closed" => Ok(Self::Closed),
            "current" => Ok(Self::Current),
            _ => Err(ValidationError::InvalidLedgerSelector(input.to_string())),
        }
    }

    /// The request parameter pair this selector travels as.
    pub fn param(&self) -> (&'static str, Value) {
        match self {
            Self::Index(n) => ("ledger", Value::from(*n)),
            Self::Hash(h) => ("ledger_hash", Value::from(h.as_str())),
            Self::Validated => ("ledger", Value::from("validated")),
            Self::Closed => ("ledger", Value::from("closed")),
            Self::Current => ("ledger", Value::from("current")),
        }
    }
}

/// Queries default to the consensus-validated ledger.
impl Default for LedgerSelector {
    fn default() -> Self {
        Self::Validated
    }
}

impl FromStr for LedgerSelector {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LedgerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(n) => write!(f, "{n}"),
            Self::Hash(h) => write!(f, "{h}"),
            Self::Validated => write!(f, "validated"),
            Self::Closed => write!(f, "closed"),
            Self::Current => write!(f, "current"),
        }
    }
}
