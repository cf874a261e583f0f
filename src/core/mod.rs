//! Core types of the compliance logging pipeline

pub mod config;
pub mod context;
pub mod error;
pub mod field_filter;
pub mod log_level;
pub mod log_value;
pub mod logger;
pub mod masking;
pub mod record;
pub mod registry;
pub mod sanitizer;
pub mod transport;

pub use config::LoggerOptions;
pub use context::CorrelationConfig;
pub use error::{LoggerError, Result};
pub use field_filter::{FieldFilter, LoggingMatrix};
pub use log_level::{is_level_enabled, LogLevel};
pub use log_value::{sanitize_plain, validate_plain, FieldMap, LogValue};
pub use logger::{Logger, LoggerBuilder, Reconfigure};
pub use masking::{
    default_rules, HeuristicValidator, MaskFn, MaskStrategy, MaskingEngine, MaskingRule,
    PatternValidator, RuleSpec, StrictValidator, ValidatorKind,
};
pub use record::LogRecord;
pub use registry::LoggerRegistry;
pub use sanitizer::{strip_control_sequences, Sanitizer};
pub use transport::Transport;
