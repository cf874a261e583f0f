//! Error types for the logging core

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A masking rule pattern was rejected by safety validation
    #[error("unsafe masking pattern '{pattern}' rejected by {validator} validation: {reason}")]
    UnsafePattern {
        pattern: String,
        validator: String,
        reason: String,
    },

    /// A masking rule pattern failed to compile
    #[error("invalid masking pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Externally supplied configuration contained a non-plain value
    #[error("configuration value at '{path}' is not plain data ({found})")]
    NotPlainData { path: String, found: String },

    /// Transport failed to write a record
    #[error("transport '{name}' error: {message}")]
    TransportError { name: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an unsafe pattern error naming the validation method
    pub fn unsafe_pattern(
        pattern: impl Into<String>,
        validator: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LoggerError::UnsafePattern {
            pattern: pattern.into(),
            validator: validator.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a path-qualified plain-data validation error
    pub fn not_plain(path: impl Into<String>, found: impl Into<String>) -> Self {
        LoggerError::NotPlainData {
            path: path.into(),
            found: found.into(),
        }
    }

    /// Create a transport error
    pub fn transport(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TransportError {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::unsafe_pattern("(a+)+", "heuristic", "nested quantifier");
        assert!(matches!(err, LoggerError::UnsafePattern { .. }));

        let err = LoggerError::config("MaskingEngine", "custom strategy requires a function");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::not_plain("rules[2].custom", "opaque value");
        assert!(matches!(err, LoggerError::NotPlainData { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::unsafe_pattern("(a+)+$", "heuristic", "nested quantifier");
        assert_eq!(
            err.to_string(),
            "unsafe masking pattern '(a+)+$' rejected by heuristic validation: nested quantifier"
        );

        let err = LoggerError::not_plain("masking_rules[0].custom", "function");
        assert_eq!(
            err.to_string(),
            "configuration value at 'masking_rules[0].custom' is not plain data (function)"
        );

        let err = LoggerError::transport("console", "stream closed");
        assert_eq!(err.to_string(), "transport 'console' error: stream closed");
    }
}
