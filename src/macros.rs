//! Logging macros for ergonomic log message formatting.
//!
//! # Examples
//!
//! ```
//! use logward::prelude::*;
//! use logward::{fields, info};
//!
//! let logger = Logger::builder("api").build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With structured metadata
//! logger.info_with(fields! { "port" => port }, "listener up");
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use logward::prelude::*;
/// # let logger = Logger::builder("api").build().unwrap();
/// use logward::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Build a [`FieldMap`](crate::core::FieldMap) from key/value pairs.
///
/// # Examples
///
/// ```
/// use logward::fields;
///
/// let meta = fields! {
///     "userId" => 42,
///     "action" => "login",
/// };
/// assert_eq!(meta.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::core::FieldMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::core::FieldMap::new();
        $( map.insert($key.to_string(), $crate::core::LogValue::from($value)); )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger, LogValue};

    fn logger() -> Logger {
        Logger::builder("macros").build().unwrap()
    }

    #[test]
    fn test_log_macro() {
        let logger = logger();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
    }

    #[test]
    fn test_level_macros() {
        let logger = logger();
        logger.set_level(LogLevel::Trace);
        trace!(logger, "Trace message");
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");
    }

    #[test]
    fn test_fields_macro() {
        let map = fields! { "a" => 1, "b" => "two" };
        assert_eq!(map.get("a"), Some(&LogValue::Int(1)));
        assert_eq!(map.get("b"), Some(&LogValue::from("two")));
        assert!(fields! {}.is_empty());
    }
}
