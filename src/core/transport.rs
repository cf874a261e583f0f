//! Transport trait for record output destinations
//!
//! The core hands finished records to a transport and requires only that
//! failures are catchable; whether the transport writes synchronously,
//! buffers, or ships elsewhere is its own business.

use super::{error::Result, record::LogRecord};

pub trait Transport: Send + Sync {
    /// Write one record
    fn log(&self, record: &LogRecord) -> Result<()>;

    /// Flush any buffered records
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Release resources; called best-effort when a transport is replaced
    fn close(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
