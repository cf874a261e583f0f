//! In-memory capture transport

use parking_lot::Mutex;

use crate::core::{LogRecord, Result, Transport};

/// Buffers records in memory; the capture target for tests and tooling
#[derive(Debug, Default)]
pub struct MemoryTransport {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Transport for MemoryTransport {
    fn log(&self, record: &LogRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_capture_and_clear() {
        let transport = MemoryTransport::new();
        assert!(transport.is_empty());

        let record = LogRecord::new(LogLevel::Warn, "captured", "test");
        transport.log(&record).unwrap();
        assert_eq!(transport.len(), 1);
        assert_eq!(transport.records()[0].message, "captured");

        transport.clear();
        assert!(transport.is_empty());
    }
}
