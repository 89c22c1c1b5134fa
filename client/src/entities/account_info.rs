//! `account_info` result: the account's ledger entry plus query context.

use super::{flatten_nested, is_account_value, is_drops_value, is_uint32};
use crate::decode::{decode_fields, snake_case_key, FieldKind, FieldSpec};
use crate::error::ClientError;
use rippled_types::Amount;
use serde_json::{Map, Value};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("account", &[FieldKind::String]).validated(is_account_value),
    FieldSpec::required("balance", &[FieldKind::String]).validated(is_drops_value),
    FieldSpec::required("flags", &[FieldKind::Integer]),
    FieldSpec::required("ledger_entry_type", &[FieldKind::String]),
    FieldSpec::required("owner_count", &[FieldKind::Integer]).validated(is_uint32),
    FieldSpec::nullable("previous_txn_id", &[FieldKind::String]),
    FieldSpec::nullable("previous_txn_lgr_seq", &[FieldKind::Integer]),
    FieldSpec::required("sequence", &[FieldKind::Integer]).validated(is_uint32),
    FieldSpec::nullable("index", &[FieldKind::String]),
    FieldSpec::nullable("ledger_hash", &[FieldKind::String]),
    FieldSpec::nullable("ledger_index", &[FieldKind::Integer]),
    FieldSpec::nullable("ledger_current_index", &[FieldKind::Integer]),
    FieldSpec::required("validated", &[FieldKind::Boolean]),
];

/// One account's state in the queried ledger.
#[derive(Clone, Debug)]
pub struct AccountInfo {
    pub account: String,
    pub balance: Amount,
    pub flags: u32,
    pub ledger_entry_type: String,
    pub owner_count: u32,
    pub previous_txn_id: Option<String>,
    pub previous_txn_lgr_seq: Option<u32>,
    pub sequence: u32,
    pub index: Option<String>,
    pub ledger_hash: Option<String>,
    pub ledger_index: Option<u32>,
    pub ledger_current_index: Option<u32>,
    pub validated: bool,
}

impl AccountInfo {
    /// Decodes an `account_info` result. The account's ledger entry arrives
    /// nested under `account_data` while query context (ledger hash or index,
    /// validation state) sits at the top level, so the two are flattened
    /// before the table pass.
    pub fn decode(result: &Map<String, Value>) -> Result<Self, ClientError> {
        let merged = flatten_nested(result, "account_data")?;
        let doc = decode_fields(&merged, FIELDS, snake_case_key)?;
        Ok(Self {
            account: doc.str_field("account")?.to_string(),
            balance: Amount::from_drops(doc.str_field("balance")?)?,
            flags: doc.u32_field("flags")?,
            ledger_entry_type: doc.str_field("ledger_entry_type")?.to_string(),
            owner_count: doc.u32_field("owner_count")?,
            previous_txn_id: doc.opt_str_field("previous_txn_id").map(str::to_string),
            previous_txn_lgr_seq: doc.opt_u32_field("previous_txn_lgr_seq"),
            sequence: doc.u32_field("sequence")?,
            index: doc.opt_str_field("index").map(str::to_string),
            ledger_hash: doc.opt_str_field("ledger_hash").map(str::to_string),
            ledger_index: doc.opt_u32_field("ledger_index"),
            ledger_current_index: doc.opt_u32_field("ledger_current_index"),
            validated: doc.bool_field("validated")?,
        })
    }
}
