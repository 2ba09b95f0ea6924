//! Declarative option schemas and default coercion.
//!
//! Each transform declares its accepted options as a static table of
//! [`AttributeSpec`]s. [`coerce`] reads one option out of a raw, user-supplied
//! JSON object and falls back to the declared default whenever the value is
//! missing or has the wrong shape. Coercion never fails and never mutates
//! the raw object.

use serde::Serialize;
use serde_json::{Map, Value};

/// Value type accepted by an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValType {
    /// JSON `true` / `false`.
    Boolean,
    /// JSON string.
    String,
}

/// Declared default value of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeDefault {
    /// Boolean default.
    Bool(bool),
    /// String default.
    Str(&'static str),
}

impl AttributeDefault {
    /// The default as a JSON value.
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(b),
            Self::Str(s) => Value::String(s.to_string()),
        }
    }
}

/// Schema entry for one transform option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSpec {
    /// Option name as it appears in the raw options object.
    pub name: &'static str,
    /// Accepted value type.
    pub val_type: ValType,
    /// Value used when the raw value is missing or rejected.
    #[serde(rename = "dflt")]
    pub default: AttributeDefault,
    /// Reject values of other types instead of stringifying numbers.
    pub strict: bool,
    /// Treat the empty string as missing.
    pub no_blank: bool,
    /// Accept a JSON array in place of a scalar.
    pub array_ok: bool,
    /// Human-readable description.
    pub description: &'static str,
}

/// Resolve one option from `raw` according to `spec`.
///
/// - booleans: only `true` / `false` are accepted
/// - strings: arrays pass through when `array_ok`; numbers are stringified
///   unless `strict`; the empty string is rejected when `no_blank`
///
/// Anything else resolves to the declared default.
#[must_use]
pub fn coerce(raw: &Map<String, Value>, spec: &AttributeSpec) -> Value {
    let value = raw.get(spec.name);

    if spec.array_ok {
        if let Some(Value::Array(items)) = value {
            return Value::Array(items.clone());
        }
    }

    match (spec.val_type, value) {
        (ValType::Boolean, Some(Value::Bool(b))) => Value::Bool(*b),
        (ValType::String, Some(Value::String(s))) if !(spec.no_blank && s.is_empty()) => {
            Value::String(s.clone())
        }
        (ValType::String, Some(Value::Number(n))) if !spec.strict => Value::String(n.to_string()),
        _ => spec.default.to_value(),
    }
}

/// The schema as a JSON object keyed by option name.
#[must_use]
pub fn schema_json(specs: &[AttributeSpec]) -> Value {
    let mut out = Map::new();
    for spec in specs {
        out.insert(
            spec.name.to_string(),
            serde_json::to_value(spec).unwrap_or(Value::Null),
        );
    }
    Value::Object(out)
}
