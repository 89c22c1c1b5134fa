//! `server_info` result: node build, state and ledger coverage.

use crate::decode::{decode_fields, snake_case_key, FieldKind, FieldSpec};
use crate::entities::flatten_nested;
use crate::error::ClientError;
use serde_json::{Map, Value};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::nullable("amendment_blocked", &[FieldKind::Boolean]),
    FieldSpec::required("build_version", &[FieldKind::String]),
    FieldSpec::nullable("closed_ledger", &[FieldKind::Object, FieldKind::Array]),
    FieldSpec::nullable("complete_ledgers", &[FieldKind::String]),
    FieldSpec::nullable("peers", &[FieldKind::Integer]),
    FieldSpec::nullable("server_state", &[FieldKind::String]),
    // The wire key really is `pubkey_node`, with no underscore in "pubkey".
    FieldSpec::required("pubkey_node", &[FieldKind::String]),
];

/// Status summary of the queried node.
#[derive(Clone, Debug)]
pub struct ServerInfo {
    pub amendment_blocked: Option<bool>,
    pub build_version: String,
    pub closed_ledger: Option<Value>,
    pub complete_ledgers: Option<String>,
    pub peers: Option<u32>,
    pub server_state: Option<String>,
    pub pubkey_node: String,
}

impl ServerInfo {
    /// Decodes a `server_info` result. Everything of interest is nested
    /// under `info`, which is flattened first.
    pub fn decode(result: &Map<String, Value>) -> Result<Self, ClientError> {
        let merged = flatten_nested(result, "info")?;
        let doc = decode_fields(&merged, FIELDS, snake_case_key)?;
        Ok(Self {
            amendment_blocked: doc.opt_bool_field("amendment_blocked"),
            build_version: doc.str_field("build_version")?.to_string(),
            closed_ledger: doc.opt_value("closed_ledger").cloned(),
            complete_ledgers: doc.opt_str_field("complete_ledgers").map(str::to_string),
            peers: doc.opt_u32_field("peers"),
            server_state: doc.opt_str_field("server_state").map(str::to_string),
            pubkey_node: doc.str_field("pubkey_node")?.to_string(),
        })
    }
}
