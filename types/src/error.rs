//! Validation errors shared across the type layer.

use thiserror::Error;

/// Rejection raised when a value does not satisfy a protocol constraint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed amount: {0}")]
    MalformedAmount(String),

    #[error("ledger index out of range: {0}")]
    LedgerIndexOutOfRange(String),

    #[error("invalid ledger hash length: expected 40 hex chars, got {0}")]
    InvalidLedgerHash(usize),

    #[error("unrecognized ledger selector: {0}")]
    InvalidLedgerSelector(String),

    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("invalid issued-token value: {0}")]
    InvalidIssuedValue(String),

    #[error("invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("invalid key type: {0}")]
    InvalidKeyType(String),

    #[error("invalid node hostname: {0}")]
    InvalidHost(String),

    #[error("node port {0} outside usable range")]
    InvalidPort(u16),
}
