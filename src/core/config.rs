//! Plain-data configuration surface
//!
//! Everything here is enumerable data, never executable code. Configuration
//! arriving from outside the process goes through `from_value`, which
//! rejects non-plain payloads with a path-qualified error before anything
//! is trusted.

use serde::Deserialize;

use super::context::CorrelationConfig;
use super::error::Result;
use super::field_filter::LoggingMatrix;
use super::log_level::LogLevel;
use super::log_value::{validate_plain, LogValue};
use super::logger::{Logger, LoggerBuilder};
use super::masking::{RuleSpec, ValidatorKind};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    pub name: String,
    pub level: LogLevel,
    /// Service stamped on records; defaults to the logger name
    pub service: Option<String>,
    pub sanitize: bool,
    pub default_masking_rules: bool,
    pub propagate_context: bool,
    pub pattern_validator: ValidatorKind,
    pub correlation: CorrelationConfig,
    pub logging_matrix: Option<LoggingMatrix>,
    pub masking_rules: Vec<RuleSpec>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            name: "root".to_string(),
            level: LogLevel::Info,
            service: None,
            sanitize: true,
            default_masking_rules: true,
            propagate_context: true,
            pattern_validator: ValidatorKind::Heuristic,
            correlation: CorrelationConfig::default(),
            logging_matrix: None,
            masking_rules: Vec::new(),
        }
    }
}

impl LoggerOptions {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Deserialize options from an externally supplied value.
    ///
    /// The value must be pure data; any opaque entry is rejected with an
    /// error naming the offending key.
    pub fn from_value(value: &LogValue) -> Result<Self> {
        validate_plain(value)?;
        let options: LoggerOptions = serde_json::from_value(value.to_json())?;
        Ok(options)
    }

    /// Bridge into a [`LoggerBuilder`]
    #[must_use]
    pub fn into_builder(self) -> LoggerBuilder {
        let mut builder = Logger::builder(self.name)
            .level(self.level)
            .sanitize(self.sanitize)
            .default_masking_rules(self.default_masking_rules)
            .pattern_validator(self.pattern_validator)
            .propagate_context(self.propagate_context)
            .correlation(self.correlation);
        if let Some(service) = self.service {
            builder = builder.service(service);
        }
        if let Some(matrix) = self.logging_matrix {
            builder = builder.logging_matrix(matrix.normalized());
        }
        for rule in self.masking_rules {
            builder = builder.masking_rule(rule);
        }
        builder
    }
}
