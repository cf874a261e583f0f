//! Log level definitions and level-gating semantics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seven named severities in ascending weight order.
///
/// `Silent` is special: it never enables anything and is never enabled,
/// regardless of the weight comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Silent = 0,
    Trace = 10,
    Debug = 20,
    #[default]
    Info = 30,
    Warn = 40,
    Error = 50,
    Fatal = 60,
}

impl LogLevel {
    /// Numeric weight used for level comparisons
    #[must_use]
    pub fn weight(&self) -> u8 {
        *self as u8
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Silent => "silent",
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }
}

/// True iff neither level is `Silent` and `candidate` weighs at least as
/// much as `configured`.
#[must_use]
pub fn is_level_enabled(candidate: LogLevel, configured: LogLevel) -> bool {
    candidate != LogLevel::Silent
        && configured != LogLevel::Silent
        && candidate.weight() >= configured.weight()
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" => Ok(LogLevel::Silent),
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
