//! Error taxonomy for the client crate.

use crate::transport::TransportError;
use rippled_types::ValidationError;
use thiserror::Error;

/// Well-known error markers rippled attaches to failed commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiSignal {
    /// `actNotFound`: the account does not exist in the queried ledger.
    AccountNotFound,
    /// `txnNotFound`: no transaction with the requested hash.
    TransactionNotFound,
    /// `highFee`: the computed fee exceeds the allowed multiplier.
    HighFee,
}

impl ApiSignal {
    /// Classifies a rippled error code string; unknown codes carry no signal.
    pub fn classify(error: &str) -> Option<Self> {
        match error {
            "actNotFound" => Some(Self::AccountNotFound),
            "txnNotFound" => Some(Self::TransactionNotFound),
            "highFee" => Some(Self::HighFee),
            _ => None,
        }
    }
}

/// Decoding failures for typed result fields, reported for the first
/// offending field in table order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("required field missing: {0}")]
    MissingField(String),

    #[error("field {field}: expected {expected}, got {got}")]
    WrongKind {
        field: String,
        expected: String,
        got: &'static str,
    },

    #[error("field {0} failed validation")]
    FailedValidation(String),
}

/// Everything that can go wrong between building a request and handing back
/// a typed result.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection failed: {0}")]
    Connection(#[from] TransportError),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("command {command} returned error status: {}", message.as_deref().unwrap_or("(no message)"))]
    Api {
        command: String,
        message: Option<String>,
        signal: Option<ApiSignal>,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unrecognized transaction type: {0}")]
    UnknownTransactionType(String),

    #[error("tls configuration failed: {0}")]
    Tls(String),

    #[error("invalid destination address: {0}")]
    InvalidDestination(String),

    #[error("issued-token amounts need currency, value and issuer for payments")]
    IncompleteIssuedAmount,

    #[error("account must be unlocked with a passphrase or seed before signing")]
    AccountNotUnlocked,

    #[error("signed transaction blob not returned in response")]
    SigningFailed,

    #[error("transaction requires a higher fee under current network load (fee_mult_max {fee_mult_max})")]
    FeeTooLow { fee_mult_max: u32 },

    #[error("transaction submit failed with engine code {engine_result:?}")]
    SubmissionFailed { engine_result: String },

    #[error("{detail}; the transaction may already have been broadcast")]
    SubmissionAmbiguous { detail: String },
}
