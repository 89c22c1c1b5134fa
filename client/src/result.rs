//! The rippled response envelope.
//!
//! Every command answers with a top-level `result` object carrying a
//! `status` of `"success"` or `"error"`. [`RpcResult`] wraps that object;
//! [`QueryResult`] pairs it with the transport-level response so callers can
//! still reach the raw body when no envelope was produced.

use crate::decode::kind_name;
use crate::error::ClientError;
use crate::transport::TransportResponse;
use serde_json::{Map, Value};

/// The `result` object of a rippled response.
#[derive(Clone, Debug)]
pub struct RpcResult {
    result: Map<String, Value>,
}

impl RpcResult {
    /// Extracts the `result` object from a response body. A body without a
    /// `result` object, or a `result` without `status`, is malformed.
    pub fn new(body: &Value) -> Result<Self, ClientError> {
        let result = match body.get("result") {
            None => {
                return Err(ClientError::MalformedResponse(
                    "required \"result\" object missing from response".to_string(),
                ));
            }
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                return Err(ClientError::MalformedResponse(format!(
                    "expected \"result\" to be an object, got {}",
                    kind_name(other)
                )));
            }
        };
        if !result.contains_key("status") {
            return Err(ClientError::MalformedResponse(
                "\"result\" object has no \"status\" field".to_string(),
            ));
        }
        Ok(Self { result })
    }

    pub fn is_success(&self) -> bool {
        self.result.get("status").and_then(Value::as_str) == Some("success")
    }

    /// The machine-readable error code, e.g. `actNotFound`.
    pub fn error(&self) -> Result<Option<&str>, ClientError> {
        self.text_field("error")
    }

    /// The human-readable error explanation, when the node sent one.
    pub fn error_message(&self) -> Result<Option<&str>, ClientError> {
        self.text_field("error_message")
    }

    fn text_field(&self, name: &str) -> Result<Option<&str>, ClientError> {
        match self.result.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(ClientError::MalformedResponse(format!(
                "\"{name}\" field must be a string, got {}",
                kind_name(other)
            ))),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.result.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.result.contains_key(name)
    }

    /// The whole `result` object, for fields no entity models.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.result
    }
}

/// One completed query: the transport response plus the parsed envelope,
/// when there was one.
#[derive(Debug)]
pub struct QueryResult {
    pub response: TransportResponse,
    pub result: Option<RpcResult>,
}
