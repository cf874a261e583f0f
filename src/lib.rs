//! # Logward
//!
//! A compliance-focused structured logging core. Every log call is enriched
//! from ambient correlation context and pushed through a compliance pipeline
//! before it reaches a transport:
//!
//! - **Correlation context**: per-task key/value store that survives
//!   `.await` and never leaks across concurrent tasks
//! - **Field filter**: per-level allow-lists over ambient context fields
//! - **Sanitizer**: strips terminal control sequences out of string values
//! - **Masking engine**: rewrites sensitive fields by name, with ReDoS-safe
//!   rule validation and an append-only rule list
//!
//! Processing failures always fail open — logging never crashes the host
//! application. Only configuration-time misuse (an unsafe pattern, non-plain
//! config data) surfaces an error.

pub mod core;
pub mod macros;
pub mod transports;

pub mod prelude {
    pub use crate::core::{
        context, is_level_enabled, CorrelationConfig, FieldFilter, FieldMap, LogLevel, LogRecord,
        LogValue, Logger, LoggerBuilder, LoggerError, LoggerOptions, LoggerRegistry,
        LoggingMatrix, MaskStrategy, MaskingEngine, Reconfigure, Result, RuleSpec, Sanitizer,
        Transport, ValidatorKind,
    };
    pub use crate::transports::{ConsoleTransport, MemoryTransport};
}

pub use crate::core::{
    context, is_level_enabled, CorrelationConfig, FieldFilter, FieldMap, LogLevel, LogRecord,
    LogValue, Logger, LoggerBuilder, LoggerError, LoggerOptions, LoggerRegistry, LoggingMatrix,
    MaskStrategy, MaskingEngine, Reconfigure, Result, RuleSpec, Sanitizer, Transport,
    ValidatorKind,
};
pub use crate::transports::{ConsoleTransport, MemoryTransport};
