//! Account address type with `r` prefix.

use crate::error::ValidationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A ledger account address, always prefixed with `r`.
///
/// The prefix is followed by 24 to 34 base58 alphanumerics; this type checks
/// the grammar only, not the address checksum.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// The prefix for all account addresses.
    pub const PREFIX: char = 'r';

    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let s = raw.into();
        if !is_account_id(&s) {
            return Err(ValidationError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account-address grammar: `r` then 24..=34 alphanumerics, any case.
pub fn is_account_id(s: &str) -> bool {
    match s.strip_prefix(AccountId::PREFIX) {
        Some(rest) => {
            (24..=34).contains(&rest.len()) && rest.bytes().all(|b| b.is_ascii_alphanumeric())
        }
        None => false,
    }
}

/// Account-secret grammar: `s` then at least one alphanumeric, any case.
pub fn is_account_secret(s: &str) -> bool {
    match s.strip_prefix('s') {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_alphanumeric()),
        None => false,
    }
}
