//! Injection sanitization
//!
//! Strips terminal control sequences out of string values so a hostile
//! payload cannot attack log viewers, recursing only into plain data
//! structures. Opaque values pass through untouched since downstream tooling
//! may depend on their structure.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use super::log_value::{FieldMap, LogValue};
use super::masking::MaskingEngine;

lazy_static! {
    /// Command sequences opened by ESC (0x1B) or the C1 CSI character
    /// (U+009B), with optional parameter bytes and a standard final byte
    static ref CONTROL_SEQUENCE: Regex = Regex::new(
        r"[\x1b\x{9b}][\[\]()#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqry=><]"
    )
    .expect("static pattern");
}

/// Remove terminal control sequences from a string
#[must_use]
pub fn strip_control_sequences(value: &str) -> String {
    CONTROL_SEQUENCE.replace_all(value, "").into_owned()
}

/// The sanitization stage, optionally chained into a masking engine.
///
/// `process` sanitizes first and then masks; if masking fails in any way the
/// sanitized (pre-masking) data is returned, so a misbehaving rule can never
/// abort a log call.
#[derive(Debug, Default)]
pub struct Sanitizer {
    masker: Option<Arc<MaskingEngine>>,
}

impl Sanitizer {
    #[must_use]
    pub fn new() -> Self {
        Self { masker: None }
    }

    #[must_use]
    pub fn with_masking(masker: Arc<MaskingEngine>) -> Self {
        Self {
            masker: Some(masker),
        }
    }

    #[must_use]
    pub fn masker(&self) -> Option<&Arc<MaskingEngine>> {
        self.masker.as_ref()
    }

    /// Deep-copy `value` with every string stripped of control sequences.
    ///
    /// Recurses into arrays and plain objects only; anything else (numbers,
    /// opaque payloads) is cloned as-is. Key order is preserved.
    #[must_use]
    pub fn sanitize(&self, value: &LogValue) -> LogValue {
        match value {
            LogValue::String(s) => LogValue::String(strip_control_sequences(s)),
            LogValue::Array(items) => {
                LogValue::Array(items.iter().map(|item| self.sanitize(item)).collect())
            }
            LogValue::Object(map) => LogValue::Object(
                map.iter()
                    .map(|(key, item)| (key.clone(), self.sanitize(item)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Sanitize, then mask. Masking failures fall back to the sanitized data.
    #[must_use]
    pub fn process(&self, value: &LogValue) -> LogValue {
        let sanitized = self.sanitize(value);
        match &self.masker {
            Some(masker) => {
                match catch_unwind(AssertUnwindSafe(|| masker.process(&sanitized))) {
                    Ok(masked) => masked,
                    Err(_) => {
                        eprintln!("[LOGGER ERROR] Masking failed; emitting sanitized data");
                        sanitized
                    }
                }
            }
            None => sanitized,
        }
    }

    /// Field-map variant of [`process`](Self::process)
    #[must_use]
    pub fn process_fields(&self, fields: &FieldMap) -> FieldMap {
        match self.process(&LogValue::Object(fields.clone())) {
            LogValue::Object(map) => map,
            _ => fields.clone(),
        }
    }
}
