//! Logger orchestrator
//!
//! Turns a log call plus ambient correlation context into a compliance-safe,
//! field-ordered record. Per call: a disabled-level bail-out, argument
//! parsing, a fast path when there is nothing to enrich with, and otherwise
//! the compliance pipeline (field filter, sanitizer, masking) followed by
//! assembly under the precedence metadata > bindings > context.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use parking_lot::RwLock;

use super::context::{self, CorrelationConfig};
use super::error::Result;
use super::field_filter::{FieldFilter, LoggingMatrix};
use super::log_level::{is_level_enabled, LogLevel};
use super::log_value::{FieldMap, LogValue};
use super::masking::{default_rules, MaskingEngine, RuleSpec, ValidatorKind};
use super::record::LogRecord;
use super::sanitizer::Sanitizer;
use super::transport::Transport;
use crate::transports::ConsoleTransport;

pub struct Logger {
    name: String,
    service: String,
    level: RwLock<LogLevel>,
    transport: Arc<RwLock<Arc<dyn Transport>>>,
    bindings: FieldMap,
    filter: Arc<RwLock<Option<Arc<FieldFilter>>>>,
    compliance: Arc<RwLock<Option<Arc<Sanitizer>>>>,
    propagate_context: bool,
    correlation: CorrelationConfig,
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[must_use]
    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    /// True when a record at `level` would be emitted
    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        is_level_enabled(level, *self.level.read())
    }

    #[must_use]
    pub fn bindings(&self) -> &FieldMap {
        &self.bindings
    }

    /// Resolve (or generate) the correlation id for the current scope
    #[must_use]
    pub fn correlation_id(&self) -> Option<String> {
        context::correlation_id(&self.correlation)
    }

    /// New instance sharing transport and engines, with merged bindings.
    ///
    /// The parent is never altered; the child's own keys win over inherited
    /// ones.
    #[must_use]
    pub fn child(&self, bindings: FieldMap) -> Logger {
        let mut merged = self.bindings.clone();
        for (key, value) in bindings {
            merged.insert(key, value);
        }
        Logger {
            name: self.name.clone(),
            service: self.service.clone(),
            level: RwLock::new(*self.level.read()),
            transport: Arc::clone(&self.transport),
            bindings: merged,
            filter: Arc::clone(&self.filter),
            compliance: Arc::clone(&self.compliance),
            propagate_context: self.propagate_context,
            correlation: self.correlation.clone(),
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.emit(level, None, &message.into(), &[]);
    }

    pub fn log_with(&self, level: LogLevel, metadata: FieldMap, message: impl Into<String>) {
        self.emit(level, Some(metadata), &message.into(), &[]);
    }

    /// Dynamic call form: a leading object becomes metadata, the next string
    /// the message, remaining values printf-style format args.
    pub fn log_args(&self, level: LogLevel, args: Vec<LogValue>) {
        let mut iter = args.into_iter().peekable();
        let metadata = if matches!(iter.peek(), Some(LogValue::Object(_))) {
            match iter.next() {
                Some(LogValue::Object(map)) => Some(map),
                _ => None,
            }
        } else {
            None
        };
        let message = if matches!(iter.peek(), Some(LogValue::String(_))) {
            match iter.next() {
                Some(LogValue::String(s)) => s,
                _ => String::new(),
            }
        } else {
            String::new()
        };
        let rest: Vec<LogValue> = iter.collect();
        self.emit(level, metadata, &message, &rest);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn trace_with(&self, metadata: FieldMap, message: impl Into<String>) {
        self.log_with(LogLevel::Trace, metadata, message);
    }

    pub fn debug_with(&self, metadata: FieldMap, message: impl Into<String>) {
        self.log_with(LogLevel::Debug, metadata, message);
    }

    pub fn info_with(&self, metadata: FieldMap, message: impl Into<String>) {
        self.log_with(LogLevel::Info, metadata, message);
    }

    pub fn warn_with(&self, metadata: FieldMap, message: impl Into<String>) {
        self.log_with(LogLevel::Warn, metadata, message);
    }

    pub fn error_with(&self, metadata: FieldMap, message: impl Into<String>) {
        self.log_with(LogLevel::Error, metadata, message);
    }

    pub fn fatal_with(&self, metadata: FieldMap, message: impl Into<String>) {
        self.log_with(LogLevel::Fatal, metadata, message);
    }

    fn emit(&self, level: LogLevel, metadata: Option<FieldMap>, message: &str, args: &[LogValue]) {
        if !is_level_enabled(level, *self.level.read()) {
            return;
        }

        let message = if !message.is_empty() && !args.is_empty() {
            format_message(message, args)
        } else {
            message.to_string()
        };

        let ctx = if self.propagate_context {
            context::get_all()
        } else {
            FieldMap::new()
        };
        let metadata = metadata.unwrap_or_default();

        // Fast path: nothing to enrich with
        if ctx.is_empty() && self.bindings.is_empty() && metadata.is_empty() {
            self.dispatch(LogRecord::new(level, message, self.service.clone()));
            return;
        }

        let sanitizer = self.compliance.read().clone();
        let fields = match sanitizer {
            Some(sanitizer) if self.propagate_context => {
                let filtered = match self.filter.read().as_ref() {
                    Some(filter) => filter.filter_fields(&ctx, level),
                    None => ctx,
                };
                let merged = merge_fields(filtered, &self.bindings, &metadata);
                sanitizer.process_fields(&merged)
            }
            _ => merge_fields(ctx, &self.bindings, &metadata),
        };

        self.dispatch(LogRecord::new(level, message, self.service.clone()).with_fields(fields));
    }

    /// Hand a finished record to the transport. Errors and panics are
    /// reported to stderr and never reach the caller.
    fn dispatch(&self, record: LogRecord) {
        let transport = Arc::clone(&self.transport.read());
        match catch_unwind(AssertUnwindSafe(|| transport.log(&record))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!(
                    "[LOGGER ERROR] Transport '{}' failed: {}",
                    transport.name(),
                    e
                );
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Transport '{}' panicked: {}",
                    transport.name(),
                    panic_msg
                );
            }
        }
    }

    /// Append a masking rule, lazily constructing the sanitize/mask pair
    pub fn add_masking_rule(&self, rule: RuleSpec) -> Result<()> {
        let current = self.compliance.read().clone();
        if let Some(sanitizer) = current {
            if let Some(masker) = sanitizer.masker() {
                return masker.add_rule(rule);
            }
        }
        let masker = Arc::new(MaskingEngine::new());
        masker.add_rule(rule)?;
        *self.compliance.write() = Some(Arc::new(Sanitizer::with_masking(masker)));
        Ok(())
    }

    /// Apply runtime reconfiguration.
    ///
    /// Level and transport swap atomically from the caller's view; the
    /// replaced transport is closed best-effort on a detached thread. A
    /// matrix creates the field filter if absent, otherwise merges into it.
    pub fn reconfigure(&self, opts: Reconfigure) -> Result<()> {
        if let Some(level) = opts.level {
            *self.level.write() = level;
        }
        if let Some(new_transport) = opts.transport {
            let old = {
                let mut guard = self.transport.write();
                std::mem::replace(&mut *guard, new_transport)
            };
            thread::spawn(move || {
                let _ = old.close();
            });
        }
        if let Some(rule) = opts.masking_rule {
            self.add_masking_rule(rule)?;
        }
        if let Some(matrix) = opts.logging_matrix {
            let existing = self.filter.read().clone();
            match existing {
                Some(filter) => filter.reconfigure(matrix),
                None => *self.filter.write() = Some(Arc::new(FieldFilter::new(matrix))),
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("service", &self.service)
            .field("level", &*self.level.read())
            .field("bindings", &self.bindings)
            .field("propagate_context", &self.propagate_context)
            .finish()
    }
}

/// Runtime reconfiguration options
#[derive(Default)]
pub struct Reconfigure {
    pub level: Option<LogLevel>,
    pub transport: Option<Arc<dyn Transport>>,
    pub masking_rule: Option<RuleSpec>,
    pub logging_matrix: Option<LoggingMatrix>,
}

/// Merge enrichment sources; later sources overwrite earlier ones, so the
/// result encodes metadata > bindings > context.
fn merge_fields(context: FieldMap, bindings: &FieldMap, metadata: &FieldMap) -> FieldMap {
    let mut merged = context;
    for (key, value) in bindings {
        merged.insert(key.clone(), value.clone());
    }
    for (key, value) in metadata {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Printf-style interpolation: `%s` display, `%d` numeric, `%j` JSON, `%%`
/// literal. Placeholders without a matching argument are left as-is; extra
/// arguments are ignored.
fn format_message(template: &str, args: &[LogValue]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut arg_iter = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(spec @ ('s' | 'd' | 'j')) => {
                chars.next();
                match arg_iter.next() {
                    Some(value) => out.push_str(&render_arg(value, spec)),
                    None => {
                        out.push('%');
                        out.push(spec);
                    }
                }
            }
            _ => out.push('%'),
        }
    }
    out
}

fn render_arg(value: &LogValue, spec: char) -> String {
    if spec == 'j' {
        return serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    }
    match value {
        LogValue::Null => "null".to_string(),
        LogValue::Bool(b) => b.to_string(),
        LogValue::Int(i) => i.to_string(),
        LogValue::Float(f) => f.to_string(),
        LogValue::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| "null".to_string()),
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use logward::prelude::*;
///
/// let logger = Logger::builder("api")
///     .level(LogLevel::Debug)
///     .build()
///     .unwrap();
/// logger.info("ready");
/// ```
pub struct LoggerBuilder {
    name: String,
    service: Option<String>,
    level: LogLevel,
    transport: Option<Arc<dyn Transport>>,
    bindings: FieldMap,
    sanitize: bool,
    default_masking_rules: bool,
    masking_rules: Vec<RuleSpec>,
    validator: ValidatorKind,
    matrix: Option<LoggingMatrix>,
    propagate_context: bool,
    correlation: CorrelationConfig,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service: None,
            level: LogLevel::Info,
            transport: None,
            bindings: FieldMap::new(),
            sanitize: true,
            default_masking_rules: true,
            masking_rules: Vec::new(),
            validator: ValidatorKind::Heuristic,
            matrix: None,
            propagate_context: true,
            correlation: CorrelationConfig::default(),
        }
    }

    /// Service name stamped on every record; defaults to the logger name
    #[must_use = "builder methods return a new value"]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Key/value pairs baked into every record from this instance
    #[must_use = "builder methods return a new value"]
    pub fn bindings(mut self, bindings: FieldMap) -> Self {
        self.bindings = bindings;
        self
    }

    /// Enable or disable control-sequence sanitization (on by default)
    #[must_use = "builder methods return a new value"]
    pub fn sanitize(mut self, enabled: bool) -> Self {
        self.sanitize = enabled;
        self
    }

    /// Install the built-in field-name masking rules (on by default)
    #[must_use = "builder methods return a new value"]
    pub fn default_masking_rules(mut self, enabled: bool) -> Self {
        self.default_masking_rules = enabled;
        self
    }

    /// Queue an additional masking rule; validated at `build`
    #[must_use = "builder methods return a new value"]
    pub fn masking_rule(mut self, rule: RuleSpec) -> Self {
        self.masking_rules.push(rule);
        self
    }

    /// Pattern-safety strategy for masking rules
    #[must_use = "builder methods return a new value"]
    pub fn pattern_validator(mut self, kind: ValidatorKind) -> Self {
        self.validator = kind;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn logging_matrix(mut self, matrix: LoggingMatrix) -> Self {
        self.matrix = Some(matrix);
        self
    }

    /// Enable or disable ambient context propagation (on by default)
    #[must_use = "builder methods return a new value"]
    pub fn propagate_context(mut self, enabled: bool) -> Self {
        self.propagate_context = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn correlation(mut self, config: CorrelationConfig) -> Self {
        self.correlation = config;
        self
    }

    /// Build the logger; fails only on invalid masking configuration
    pub fn build(self) -> Result<Logger> {
        let masker = if self.default_masking_rules || !self.masking_rules.is_empty() {
            let engine = MaskingEngine::with_validator(self.validator.build());
            if self.default_masking_rules {
                for spec in default_rules() {
                    engine.add_rule(spec)?;
                }
            }
            for spec in self.masking_rules {
                engine.add_rule(spec)?;
            }
            Some(Arc::new(engine))
        } else {
            None
        };

        let compliance = if self.sanitize {
            Some(Arc::new(match masker {
                Some(masker) => Sanitizer::with_masking(masker),
                None => Sanitizer::new(),
            }))
        } else {
            None
        };

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ConsoleTransport::new()));

        Ok(Logger {
            service: self.service.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            level: RwLock::new(self.level),
            transport: Arc::new(RwLock::new(transport)),
            bindings: self.bindings,
            filter: Arc::new(RwLock::new(
                self.matrix.map(|m| Arc::new(FieldFilter::new(m))),
            )),
            compliance: Arc::new(RwLock::new(compliance)),
            propagate_context: self.propagate_context,
            correlation: self.correlation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transports::MemoryTransport;

    fn capture_logger(level: LogLevel) -> (Logger, Arc<MemoryTransport>) {
        let transport = Arc::new(MemoryTransport::new());
        let logger = Logger::builder("test")
            .level(level)
            .transport(Arc::clone(&transport) as Arc<dyn Transport>)
            .build()
            .unwrap();
        (logger, transport)
    }

    #[test]
    fn test_disabled_level_is_dropped() {
        let (logger, transport) = capture_logger(LogLevel::Warn);
        logger.info("nope");
        logger.warn("yes");
        assert_eq!(transport.records().len(), 1);
        assert_eq!(transport.records()[0].message, "yes");
    }

    #[test]
    fn test_silent_logger_emits_nothing() {
        let (logger, transport) = capture_logger(LogLevel::Silent);
        logger.fatal("still nothing");
        assert!(transport.records().is_empty());
    }

    #[test]
    fn test_fast_path_record_shape() {
        let (logger, transport) = capture_logger(LogLevel::Info);
        logger.info("ready");
        let records = transport.records();
        let record = &records[0];
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.message, "ready");
        assert_eq!(record.service, "test");
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_metadata_enriches_record() {
        let (logger, transport) = capture_logger(LogLevel::Info);
        let mut meta = FieldMap::new();
        meta.insert("userId".to_string(), LogValue::from(7));
        logger.info_with(meta, "login");
        let records = transport.records();
        assert_eq!(records[0].field("userId"), Some(&LogValue::Int(7)));
    }

    #[test]
    fn test_precedence_metadata_over_bindings_over_context() {
        let transport = Arc::new(MemoryTransport::new());
        let mut bindings = FieldMap::new();
        bindings.insert("a".to_string(), LogValue::from(2));
        bindings.insert("b".to_string(), LogValue::from(2));
        let logger = Logger::builder("test")
            .transport(Arc::clone(&transport) as Arc<dyn Transport>)
            .bindings(bindings)
            .build()
            .unwrap();

        context::run_scoped(|| {
            context::set("a", 1);
            let mut meta = FieldMap::new();
            meta.insert("a".to_string(), LogValue::from(3));
            logger.info_with(meta, "m");
        });

        let records = transport.records();
        assert_eq!(records[0].field("a"), Some(&LogValue::Int(3)));
        assert_eq!(records[0].field("b"), Some(&LogValue::Int(2)));
    }

    #[test]
    fn test_log_args_parsing() {
        let (logger, transport) = capture_logger(LogLevel::Info);
        let mut meta = FieldMap::new();
        meta.insert("requestId".to_string(), LogValue::from("r1"));
        logger.log_args(
            LogLevel::Info,
            vec![
                LogValue::Object(meta),
                LogValue::from("user %s did %d things"),
                LogValue::from("alice"),
                LogValue::from(3),
            ],
        );
        let records = transport.records();
        assert_eq!(records[0].message, "user alice did 3 things");
        assert_eq!(records[0].field("requestId"), Some(&LogValue::from("r1")));
    }

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message("a %s b %d", &[LogValue::from("x"), LogValue::from(2)]),
            "a x b 2"
        );
        assert_eq!(format_message("100%% done", &[LogValue::from("x")]), "100% done");
        assert_eq!(format_message("no args %s", &[]), "no args %s");
        assert_eq!(
            format_message("%j", &[LogValue::Array(vec![LogValue::from(1)])]),
            "[1]"
        );
    }

    #[test]
    fn test_child_bindings_merge_without_mutating_parent() {
        let transport = Arc::new(MemoryTransport::new());
        let mut parent_bindings = FieldMap::new();
        parent_bindings.insert("component".to_string(), LogValue::from("auth"));
        let parent = Logger::builder("test")
            .transport(Arc::clone(&transport) as Arc<dyn Transport>)
            .bindings(parent_bindings)
            .build()
            .unwrap();

        let mut child_bindings = FieldMap::new();
        child_bindings.insert("component".to_string(), LogValue::from("auth.session"));
        child_bindings.insert("worker".to_string(), LogValue::from(1));
        let child = parent.child(child_bindings);

        assert_eq!(parent.bindings().len(), 1);
        assert_eq!(
            parent.bindings().get("component"),
            Some(&LogValue::from("auth"))
        );
        assert_eq!(
            child.bindings().get("component"),
            Some(&LogValue::from("auth.session"))
        );
        assert_eq!(child.bindings().len(), 2);
    }

    #[test]
    fn test_transport_failure_never_propagates() {
        struct FailingTransport;
        impl Transport for FailingTransport {
            fn log(&self, _record: &LogRecord) -> Result<()> {
                Err(crate::core::error::LoggerError::transport("failing", "down"))
            }
            fn name(&self) -> &str {
                "failing"
            }
        }
        let logger = Logger::builder("test")
            .transport(Arc::new(FailingTransport))
            .build()
            .unwrap();
        logger.info("does not panic");
    }

    #[test]
    fn test_transport_panic_never_propagates() {
        struct PanickingTransport;
        impl Transport for PanickingTransport {
            fn log(&self, _record: &LogRecord) -> Result<()> {
                panic!("transport bug")
            }
            fn name(&self) -> &str {
                "panicking"
            }
        }
        let logger = Logger::builder("test")
            .transport(Arc::new(PanickingTransport))
            .build()
            .unwrap();
        logger.info("still fine");
    }

    #[test]
    fn test_reconfigure_level_and_transport() {
        let (logger, first) = capture_logger(LogLevel::Info);
        logger.info("one");

        let second = Arc::new(MemoryTransport::new());
        logger
            .reconfigure(Reconfigure {
                level: Some(LogLevel::Error),
                transport: Some(Arc::clone(&second) as Arc<dyn Transport>),
                ..Reconfigure::default()
            })
            .unwrap();

        logger.info("filtered out");
        logger.error("two");

        assert_eq!(first.records().len(), 1);
        let records = second.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "two");
    }

    #[test]
    fn test_reconfigure_adds_matrix_and_merges() {
        let (logger, transport) = capture_logger(LogLevel::Info);
        logger
            .reconfigure(Reconfigure {
                logging_matrix: Some(LoggingMatrix::new().with_default(["correlationid"])),
                ..Reconfigure::default()
            })
            .unwrap();

        context::run_scoped(|| {
            context::set("correlationId", "c1");
            context::set("secret", "s");
            logger.info("first");
        });

        logger
            .reconfigure(Reconfigure {
                logging_matrix: Some(LoggingMatrix::new().with_level("info", ["*"])),
                ..Reconfigure::default()
            })
            .unwrap();

        context::run_scoped(|| {
            context::set("correlationId", "c1");
            context::set("secret", "s");
            logger.info("second");
        });

        let records = transport.records();
        assert!(records[0].field("correlationId").is_some());
        assert!(records[0].field("secret").is_none());
        assert!(records[1].field("secret").is_some());
    }

    #[test]
    fn test_reconfigure_rejects_unsafe_masking_rule() {
        let (logger, _transport) = capture_logger(LogLevel::Info);
        let err = logger
            .reconfigure(Reconfigure {
                masking_rule: Some(RuleSpec::new(r"(a+)+$", Default::default())),
                ..Reconfigure::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("unsafe masking pattern"));
    }

    #[test]
    fn test_propagation_disabled_skips_context() {
        let transport = Arc::new(MemoryTransport::new());
        let logger = Logger::builder("test")
            .transport(Arc::clone(&transport) as Arc<dyn Transport>)
            .propagate_context(false)
            .build()
            .unwrap();

        context::run_scoped(|| {
            context::set("ambient", "x");
            let mut meta = FieldMap::new();
            meta.insert("explicit".to_string(), LogValue::from(1));
            logger.info_with(meta, "m");
        });

        let records = transport.records();
        assert!(records[0].field("ambient").is_none());
        assert_eq!(records[0].field("explicit"), Some(&LogValue::Int(1)));
    }

    #[test]
    fn test_pipeline_masks_metadata() {
        let (logger, transport) = capture_logger(LogLevel::Info);
        let mut meta = FieldMap::new();
        meta.insert("email".to_string(), LogValue::from("john@x.com"));
        logger.info_with(meta, "signup");
        let records = transport.records();
        assert_eq!(
            records[0].field("email").and_then(LogValue::as_str),
            Some("j***@x.com")
        );
    }

    #[test]
    fn test_sanitize_disabled_skips_pipeline() {
        let transport = Arc::new(MemoryTransport::new());
        let logger = Logger::builder("test")
            .transport(Arc::clone(&transport) as Arc<dyn Transport>)
            .sanitize(false)
            .build()
            .unwrap();
        let mut meta = FieldMap::new();
        meta.insert("email".to_string(), LogValue::from("john@x.com"));
        logger.info_with(meta, "raw");
        let records = transport.records();
        assert_eq!(
            records[0].field("email").and_then(LogValue::as_str),
            Some("john@x.com")
        );
    }
}
