//! Per-level field filtering (compliance matrix)
//!
//! The matrix maps a level name (or `"default"`) to the set of ambient
//! context keys allowed to appear in records at that level. An empty or
//! missing allow-list yields an empty result (fail-closed); the wildcard
//! `"*"` passes everything through.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Deserialize;

use super::log_level::LogLevel;
use super::log_value::FieldMap;

/// Key used when a level has no explicit entry
pub const DEFAULT_LEVEL_KEY: &str = "default";

/// Wildcard allow-list entry meaning "all fields"
pub const WILDCARD: &str = "*";

/// Level name → allowed field names.
///
/// Field names are lowercased at insert so matching is case-insensitive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct LoggingMatrix {
    entries: HashMap<String, Vec<String>>,
}

impl LoggingMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the allow-list for one level
    #[must_use = "builder methods return a new value"]
    pub fn with_level<I, S>(mut self, level: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(level, fields);
        self
    }

    /// Set the fallback allow-list
    #[must_use = "builder methods return a new value"]
    pub fn with_default<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_level(DEFAULT_LEVEL_KEY, fields)
    }

    pub fn insert<I, S>(&mut self, level: &str, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let normalized = fields
            .into_iter()
            .map(|f| f.into().to_lowercase())
            .collect();
        self.entries.insert(level.to_lowercase(), normalized);
    }

    #[must_use]
    pub fn allow_list(&self, level: &str) -> Option<&Vec<String>> {
        self.entries.get(level)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another matrix key-by-key: new levels are added, named levels
    /// replaced wholesale, all others untouched.
    pub fn merge(&mut self, other: LoggingMatrix) {
        for (level, fields) in other.entries {
            self.entries.insert(level, fields);
        }
    }

    /// Normalize entries arriving from deserialized configuration
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut out = Self::new();
        for (level, fields) in self.entries {
            out.insert(&level, fields);
        }
        out
    }
}

/// Applies a [`LoggingMatrix`] to ambient context fields.
///
/// Reconfiguration merges under a write lock, so readers always observe
/// either the old or the fully merged matrix.
#[derive(Debug)]
pub struct FieldFilter {
    matrix: RwLock<LoggingMatrix>,
}

impl FieldFilter {
    #[must_use]
    pub fn new(matrix: LoggingMatrix) -> Self {
        Self {
            matrix: RwLock::new(matrix),
        }
    }

    /// Return the subset of `fields` permitted at `level`.
    ///
    /// Resolution: the level's own allow-list, else `default`, else nothing.
    /// Original key casing and insertion order are preserved in the output.
    #[must_use]
    pub fn filter_fields(&self, fields: &FieldMap, level: LogLevel) -> FieldMap {
        let matrix = self.matrix.read();
        let allowed = matrix
            .allow_list(level.as_str())
            .or_else(|| matrix.allow_list(DEFAULT_LEVEL_KEY));

        match allowed {
            None => FieldMap::new(),
            Some(list) if list.is_empty() => FieldMap::new(),
            Some(list) if list.iter().any(|f| f == WILDCARD) => fields.clone(),
            Some(list) => fields
                .iter()
                .filter(|(key, _)| list.contains(&key.to_lowercase()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }

    /// Merge `matrix` into the current configuration (trusted operation)
    pub fn reconfigure(&self, matrix: LoggingMatrix) {
        self.matrix.write().merge(matrix);
    }
}
