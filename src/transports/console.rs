//! JSON-lines console transport

use std::io::Write;

use crate::core::{LogRecord, Result, Transport};

/// Writes one JSON line per record to stdout.
///
/// The stdout handle is locked per call so concurrent records never
/// interleave within a line.
#[derive(Debug, Default)]
pub struct ConsoleTransport;

impl ConsoleTransport {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Transport for ConsoleTransport {
    fn log(&self, record: &LogRecord) -> Result<()> {
        let line = record.to_json()?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
