//! Tagged value model for log metadata
//!
//! Every value entering the enrichment pipeline is reported into a closed set
//! of variants. The sanitizer and masking engine recurse on `Array`/`Object`
//! and treat `Opaque` as a pass-through leaf, so structured payloads owned by
//! downstream tooling are never rewritten.

use indexmap::IndexMap;
use serde::Serialize;

use super::error::{LoggerError, Result};

/// Insertion-ordered map of enrichment fields
pub type FieldMap = IndexMap<String, LogValue>;

/// A log metadata value.
///
/// `Opaque` wraps a pre-serialized payload that must pass through the
/// pipeline untouched (error chains, tracer attachments, and similar values
/// that are not plain data).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<LogValue>),
    Object(FieldMap),
    Opaque(serde_json::Value),
}

impl LogValue {
    /// Wrap an arbitrary serializable value as an opaque pass-through leaf
    pub fn opaque<T: Serialize>(value: T) -> Result<Self> {
        Ok(LogValue::Opaque(serde_json::to_value(value)?))
    }

    /// Variant name used in validation errors
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            LogValue::Null => "null",
            LogValue::Bool(_) => "bool",
            LogValue::Int(_) => "int",
            LogValue::Float(_) => "float",
            LogValue::String(_) => "string",
            LogValue::Array(_) => "array",
            LogValue::Object(_) => "object",
            LogValue::Opaque(_) => "opaque value",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LogValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&FieldMap> {
        match self {
            LogValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Convert to a `serde_json::Value` for transports and config bridging
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            LogValue::Null => serde_json::Value::Null,
            LogValue::Bool(b) => serde_json::Value::Bool(*b),
            LogValue::Int(i) => serde_json::Value::Number((*i).into()),
            LogValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            LogValue::String(s) => serde_json::Value::String(s.clone()),
            LogValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(LogValue::to_json).collect())
            }
            LogValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            LogValue::Opaque(v) => v.clone(),
        }
    }
}

impl From<serde_json::Value> for LogValue {
    /// JSON input is plain data by construction, so this never yields `Opaque`.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => LogValue::Null,
            serde_json::Value::Bool(b) => LogValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    LogValue::Int(i)
                } else {
                    LogValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => LogValue::String(s),
            serde_json::Value::Array(items) => {
                LogValue::Array(items.into_iter().map(LogValue::from).collect())
            }
            serde_json::Value::Object(map) => LogValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, LogValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::String(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::String(s)
    }
}

impl From<i64> for LogValue {
    fn from(i: i64) -> Self {
        LogValue::Int(i)
    }
}

impl From<i32> for LogValue {
    fn from(i: i32) -> Self {
        LogValue::Int(i as i64)
    }
}

impl From<u32> for LogValue {
    fn from(i: u32) -> Self {
        LogValue::Int(i as i64)
    }
}

impl From<f64> for LogValue {
    fn from(f: f64) -> Self {
        LogValue::Float(f)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<Vec<LogValue>> for LogValue {
    fn from(items: Vec<LogValue>) -> Self {
        LogValue::Array(items)
    }
}

impl From<FieldMap> for LogValue {
    fn from(map: FieldMap) -> Self {
        LogValue::Object(map)
    }
}

/// Reject any `Opaque` value in the tree with a path-qualified error.
///
/// Externally supplied configuration must be pure data before it is trusted;
/// the error names exactly which key held the offending value.
pub fn validate_plain(value: &LogValue) -> Result<()> {
    validate_plain_at(value, "")
}

fn validate_plain_at(value: &LogValue, path: &str) -> Result<()> {
    match value {
        LogValue::Opaque(_) => {
            let path = if path.is_empty() { "<root>" } else { path };
            Err(LoggerError::not_plain(path, value.type_name()))
        }
        LogValue::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                validate_plain_at(item, &format!("{}[{}]", path, idx))?;
            }
            Ok(())
        }
        LogValue::Object(map) => {
            for (key, item) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                validate_plain_at(item, &child)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Return a copy of the tree with every non-plain entry silently dropped.
///
/// Object keys holding opaque values are removed; opaque array elements are
/// removed as well. The input is never mutated.
#[must_use]
pub fn sanitize_plain(value: &LogValue) -> LogValue {
    match value {
        LogValue::Opaque(_) => LogValue::Null,
        LogValue::Array(items) => LogValue::Array(
            items
                .iter()
                .filter(|item| !matches!(item, LogValue::Opaque(_)))
                .map(sanitize_plain)
                .collect(),
        ),
        LogValue::Object(map) => LogValue::Object(
            map.iter()
                .filter(|(_, item)| !matches!(item, LogValue::Opaque(_)))
                .map(|(k, v)| (k.clone(), sanitize_plain(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}
