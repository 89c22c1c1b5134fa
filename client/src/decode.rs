//! Table-driven decoding of RPC result objects.
//!
//! Each result family declares a const table of [`FieldSpec`]s. Decoding
//! canonicalizes every document key with a pure transform, then walks the
//! table in order and fails on the first field that is missing, has the wrong
//! JSON kind, or flunks its validator. Unknown keys pass through untouched so
//! node upgrades cannot break existing tables.

use crate::error::DecodeError;
use serde_json::{Map, Value};

/// JSON shapes a field is allowed to take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Array,
    Object,
}

impl FieldKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// How one result field is typed and checked.
///
/// `name` is the canonical snake_case key; `kinds` is a union, so a field may
/// accept more than one JSON shape (a Payment amount is a string or an
/// object). The validator sees the raw matched value.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kinds: &'static [FieldKind],
    pub nullable: bool,
    pub validate: Option<fn(&Value) -> bool>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kinds: &'static [FieldKind]) -> Self {
        Self {
            name,
            kinds,
            nullable: false,
            validate: None,
        }
    }

    pub const fn nullable(name: &'static str, kinds: &'static [FieldKind]) -> Self {
        Self {
            name,
            kinds,
            nullable: true,
            validate: None,
        }
    }

    pub const fn validated(mut self, validate: fn(&Value) -> bool) -> Self {
        self.validate = Some(validate);
        self
    }
}

/// Pure key rewrite applied to every document key before matching.
pub type KeyTransform = fn(&str) -> String;

/// Canonicalizes a wire key to snake_case.
///
/// Handles the ledger's mixed conventions: `Balance` -> `balance`,
/// `PreviousTxnID` -> `previous_txn_id`, and already-snake keys like
/// `ledger_index` pass through unchanged.
pub fn snake_case_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let after_lower =
                i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
            let ends_acronym = i > 0
                && chars[i - 1].is_ascii_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if after_lower || ends_acronym {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rewrites every key of `source` with `transform`. Values are untouched.
pub fn canonicalize(source: &Map<String, Value>, transform: KeyTransform) -> Map<String, Value> {
    let mut fields = Map::new();
    for (key, value) in source {
        fields.insert(transform(key), value.clone());
    }
    fields
}

/// Checks `fields` against `specs` in table order, failing on the first
/// offender. JSON `null` counts as absent.
pub fn check_fields(fields: &Map<String, Value>, specs: &[FieldSpec]) -> Result<(), DecodeError> {
    for spec in specs {
        let value = match fields.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.nullable {
                    continue;
                }
                return Err(DecodeError::MissingField(spec.name.to_string()));
            }
            Some(value) => value,
        };
        if !spec.kinds.iter().any(|kind| kind.matches(value)) {
            return Err(DecodeError::WrongKind {
                field: spec.name.to_string(),
                expected: expected_kinds(spec.kinds),
                got: kind_name(value),
            });
        }
        if let Some(validate) = spec.validate {
            if !validate(value) {
                return Err(DecodeError::FailedValidation(spec.name.to_string()));
            }
        }
    }
    Ok(())
}

/// Canonicalize, check, and wrap in one step.
pub fn decode_fields(
    source: &Map<String, Value>,
    specs: &[FieldSpec],
    transform: KeyTransform,
) -> Result<Document, DecodeError> {
    let fields = canonicalize(source, transform);
    check_fields(&fields, specs)?;
    Ok(Document { fields })
}

/// A canonicalized result document with typed field access.
///
/// Getters re-state the kind expectations, so they stay honest even for
/// fields a table never covered.
#[derive(Clone, Debug)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn str_field(&self, name: &'static str) -> Result<&str, DecodeError> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Err(DecodeError::MissingField(name.to_string())),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(wrong_kind(name, FieldKind::String, other)),
        }
    }

    pub fn opt_str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn u32_field(&self, name: &'static str) -> Result<u32, DecodeError> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Err(DecodeError::MissingField(name.to_string())),
            Some(value) => match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(n) => Ok(n),
                None => Err(wrong_kind(name, FieldKind::Integer, value)),
            },
        }
    }

    pub fn opt_u32_field(&self, name: &str) -> Option<u32> {
        self.fields
            .get(name)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    pub fn bool_field(&self, name: &'static str) -> Result<bool, DecodeError> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Err(DecodeError::MissingField(name.to_string())),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(wrong_kind(name, FieldKind::Boolean, other)),
        }
    }

    pub fn opt_bool_field(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(Value::as_bool)
    }

    pub fn opt_array_field(&self, name: &str) -> Option<&Vec<Value>> {
        self.fields.get(name).and_then(Value::as_array)
    }

    /// Raw value access for fields kept as JSON (paths, memos, signers).
    pub fn opt_value(&self, name: &str) -> Option<&Value> {
        match self.fields.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    pub fn value(&self, name: &'static str) -> Result<&Value, DecodeError> {
        self.opt_value(name)
            .ok_or_else(|| DecodeError::MissingField(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.opt_value(name).is_some()
    }
}

fn wrong_kind(name: &str, expected: FieldKind, got: &Value) -> DecodeError {
    DecodeError::WrongKind {
        field: name.to_string(),
        expected: expected.name().to_string(),
        got: kind_name(got),
    }
}

fn expected_kinds(kinds: &[FieldKind]) -> String {
    kinds
        .iter()
        .map(FieldKind::name)
        .collect::<Vec<_>>()
        .join(" or ")
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
