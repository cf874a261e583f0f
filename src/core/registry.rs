//! Logger registry
//!
//! An explicit name→logger map constructed once at process start and passed
//! where needed, preserving get-or-create semantics without hidden global
//! state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::config::LoggerOptions;
use super::error::Result;
use super::logger::Logger;
use super::transport::Transport;

pub struct LoggerRegistry {
    defaults: LoggerOptions,
    transport: Arc<dyn Transport>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_defaults(LoggerOptions::default(), transport)
    }

    /// Registry whose created loggers start from `defaults`
    #[must_use]
    pub fn with_defaults(defaults: LoggerOptions, transport: Arc<dyn Transport>) -> Self {
        Self {
            defaults,
            transport,
            loggers: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(name).map(Arc::clone)
    }

    /// Fetch the named logger, creating it from the registry defaults
    pub fn get_or_create(&self, name: &str) -> Result<Arc<Logger>> {
        let mut options = self.defaults.clone();
        options.name = name.to_string();
        self.get_or_create_with(name, options)
    }

    /// Fetch the named logger, creating it from explicit options
    pub fn get_or_create_with(&self, name: &str, options: LoggerOptions) -> Result<Arc<Logger>> {
        if let Some(found) = self.loggers.read().get(name) {
            return Ok(Arc::clone(found));
        }
        let mut guard = self.loggers.write();
        // Another caller may have created it between the locks
        if let Some(found) = guard.get(name) {
            return Ok(Arc::clone(found));
        }
        let logger = Arc::new(
            options
                .into_builder()
                .transport(Arc::clone(&self.transport))
                .build()?,
        );
        guard.insert(name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.loggers.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}
