//! Transport-agnostic log record
//!
//! A record is built fresh per call and never mutated after handoff to a
//! transport. Base fields come first, enrichment fields follow in insertion
//! order.

use serde::Serialize;

use super::log_level::LogLevel;
use super::log_value::{FieldMap, LogValue};

/// Base keys that enrichment fields may never shadow
pub const RESERVED_KEYS: [&str; 4] = ["timestamp", "level", "message", "service"];

/// The wire contract with transports
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// Epoch milliseconds
    pub timestamp: i64,
    pub level: LogLevel,
    pub message: String,
    pub service: String,
    /// Enrichment fields, flattened at the top level
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl LogRecord {
    /// Create a bare record (the fast-path shape)
    pub fn new(level: LogLevel, message: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            level,
            message: message.into(),
            service: service.into(),
            fields: FieldMap::new(),
        }
    }

    /// Attach enrichment fields, dropping any key that would shadow a base field
    #[must_use]
    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields
            .into_iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .collect();
        self
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&LogValue> {
        self.fields.get(key)
    }

    /// Serialize to a single JSON line
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_record() {
        let record = LogRecord::new(LogLevel::Info, "ready", "api");
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.message, "ready");
        assert_eq!(record.service, "api");
        assert!(record.fields.is_empty());
        assert!(record.timestamp > 0);
    }

    #[test]
    fn test_json_shape() {
        let mut fields = FieldMap::new();
        fields.insert("userId".to_string(), LogValue::from(42));
        let record = LogRecord::new(LogLevel::Error, "boom", "api").with_fields(fields);

        let json = record.to_json().unwrap();
        assert!(json.contains("\"level\":\"error\""));
        assert!(json.contains("\"message\":\"boom\""));
        assert!(json.contains("\"service\":\"api\""));
        assert!(json.contains("\"userId\":42"));
    }

    #[test]
    fn test_reserved_keys_never_shadowed() {
        let mut fields = FieldMap::new();
        fields.insert("message".to_string(), LogValue::from("spoofed"));
        fields.insert("level".to_string(), LogValue::from("fatal"));
        fields.insert("requestId".to_string(), LogValue::from("r1"));

        let record = LogRecord::new(LogLevel::Info, "real", "api").with_fields(fields);
        assert_eq!(record.message, "real");
        assert!(record.field("message").is_none());
        assert!(record.field("level").is_none());
        assert!(record.field("requestId").is_some());
    }

    #[test]
    fn test_field_order_preserved() {
        let mut fields = FieldMap::new();
        fields.insert("b".to_string(), LogValue::from(2));
        fields.insert("a".to_string(), LogValue::from(1));
        let record = LogRecord::new(LogLevel::Info, "m", "s").with_fields(fields);

        let keys: Vec<&String> = record.fields.keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
