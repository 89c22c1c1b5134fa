//! Typed records decoded from command results.
//!
//! Each entity declares a const field table in wire order and decodes through
//! the table decoder. Amount-bearing fields are upgraded to [`Amount`]s after
//! the table pass, so validation errors always name the raw field first.
//!
//! [`Amount`]: rippled_types::Amount

mod account_info;
mod server_info;
mod transaction;
mod wallet_propose;

pub use account_info::AccountInfo;
pub use server_info::ServerInfo;
pub use transaction::{BaseTx, PaymentTx, Transaction};
pub use wallet_propose::WalletPropose;

use crate::error::ClientError;
use rippled_types::address::{is_account_id, is_account_secret};
use rippled_types::hash::is_hex;
use rippled_types::params::UINT32_MAX;
use serde_json::{Map, Value};

// Field validators shared across the entity tables. Each sees a value its
// FieldSpec already kind-checked.

pub(crate) fn is_account_value(value: &Value) -> bool {
    value.as_str().is_some_and(is_account_id)
}

pub(crate) fn is_secret_value(value: &Value) -> bool {
    value.as_str().is_some_and(is_account_secret)
}

/// An all-digit string: an integral drops amount.
pub(crate) fn is_drops_value(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
}

pub(crate) fn is_uint32(value: &Value) -> bool {
    value.as_u64().is_some_and(|n| n <= UINT32_MAX)
}

/// A 64-char hex transaction hash.
pub(crate) fn is_tx_hash_value(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.len() == 64 && is_hex(s))
}

/// Lifts the object under `key` into the top level. Top-level keys win on
/// collision and `key` itself is dropped from the merged view.
pub(crate) fn flatten_nested(
    result: &Map<String, Value>,
    key: &str,
) -> Result<Map<String, Value>, ClientError> {
    let mut merged = match result.get(key) {
        Some(Value::Object(map)) => map.clone(),
        _ => {
            return Err(ClientError::MalformedResponse(format!(
                "no \"{key}\" object in result"
            )));
        }
    };
    for (k, v) in result {
        if k != key {
            merged.insert(k.clone(), v.clone());
        }
    }
    Ok(merged)
}
