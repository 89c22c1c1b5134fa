//! `wallet_propose` result: a freshly derived keypair and its encodings.

use super::is_account_value;
use crate::decode::{decode_fields, snake_case_key, FieldKind, FieldSpec};
use crate::error::ClientError;
use rippled_types::address::is_account_secret;
use rippled_types::hash::is_hex;
use rippled_types::{AccountId, KeyType};
use serde_json::{Map, Value};
use std::fmt;

fn is_key_type_value(value: &Value) -> bool {
    // Exact lowercase wire form; `SECP256K1` is rejected.
    value
        .as_str()
        .is_some_and(|s| s.parse::<KeyType>().is_ok_and(|kt| kt.as_str() == s))
}

fn is_master_seed(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| (8..=1024).contains(&s.len()) && is_account_secret(s))
}

fn is_seed_hex(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.len() >= 2 && is_hex(s))
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("account_id", &[FieldKind::String]).validated(is_account_value),
    FieldSpec::required("key_type", &[FieldKind::String]).validated(is_key_type_value),
    FieldSpec::required("master_key", &[FieldKind::String]),
    FieldSpec::required("master_seed", &[FieldKind::String]).validated(is_master_seed),
    FieldSpec::required("master_seed_hex", &[FieldKind::String]).validated(is_seed_hex),
    FieldSpec::required("public_key", &[FieldKind::String]),
    FieldSpec::required("public_key_hex", &[FieldKind::String]),
];

/// A proposed wallet. Holds live secret material; its `Debug` output redacts
/// the master key and seeds.
#[derive(Clone)]
pub struct WalletPropose {
    pub account_id: AccountId,
    pub key_type: KeyType,
    pub master_key: String,
    pub master_seed: String,
    pub master_seed_hex: String,
    pub public_key: String,
    pub public_key_hex: String,
}

impl WalletPropose {
    pub fn decode(result: &Map<String, Value>) -> Result<Self, ClientError> {
        let doc = decode_fields(result, FIELDS, snake_case_key)?;
        Ok(Self {
            account_id: AccountId::new(doc.str_field("account_id")?)?,
            key_type: doc.str_field("key_type")?.parse::<KeyType>()?,
            master_key: doc.str_field("master_key")?.to_string(),
            master_seed: doc.str_field("master_seed")?.to_string(),
            master_seed_hex: doc.str_field("master_seed_hex")?.to_string(),
            public_key: doc.str_field("public_key")?.to_string(),
            public_key_hex: doc.str_field("public_key_hex")?.to_string(),
        })
    }
}

impl fmt::Debug for WalletPropose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletPropose")
            .field("account_id", &self.account_id)
            .field("key_type", &self.key_type)
            .field("master_key", &"<redacted>")
            .field("master_seed", &"<redacted>")
            .field("master_seed_hex", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("public_key_hex", &self.public_key_hex)
            .finish()
    }
}
