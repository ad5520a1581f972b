//! Entry formatting: structured record → backend log entry.
//!
//! The backend's log viewer takes the summary line from the `message` field
//! and the importance from `severity`. Formatting fills both in from the
//! conventional record fields and passes everything else through.

pub mod coerce;

use crate::domain::entry::{MESSAGE_FIELD, SEVERITY_FIELD};
use crate::domain::{AdapterError, IntoRecord, LogEntry, Record, Severity, SeverityMap};
use coerce::{is_truthy, numeric_level};
use serde_json::{Map, Value};
use std::sync::Arc;

const MSG_FIELD: &str = "msg";
const ERR_FIELD: &str = "err";
const STACK_FIELD: &str = "stack";
const LEVEL_FIELD: &str = "level";

/// Turns records into entries using an injected [`SeverityMap`].
#[derive(Debug, Clone)]
pub struct EntryFormatter {
    severities: Arc<SeverityMap>,
}

impl Default for EntryFormatter {
    fn default() -> Self {
        Self::new(SeverityMap::standard())
    }
}

impl EntryFormatter {
    pub fn new(severities: Arc<SeverityMap>) -> Self {
        Self { severities }
    }

    pub fn severities(&self) -> &SeverityMap {
        &self.severities
    }

    /// Format any record-like input, rejecting values that are not mappings.
    pub fn format<R: IntoRecord>(&self, input: R) -> Result<LogEntry, AdapterError> {
        Ok(self.format_record(input.into_record()?))
    }

    /// Format a record. Infallible: unknown levels only omit `severity`.
    pub fn format_record(&self, record: Record) -> LogEntry {
        let mut fields = record.into_fields();

        // A caller-provided message always wins. Otherwise an error's stack
        // trace is preferred so error reporting picks the entry up, and the
        // legacy `msg` summary comes next; `msg` itself stays in place.
        if !fields.get(MESSAGE_FIELD).is_some_and(is_truthy) {
            if let Some(summary) = derive_summary(&fields) {
                fields.insert(MESSAGE_FIELD.to_string(), summary);
            }
        }

        let severity = self.severity_of(&fields);
        LogEntry::from(with_severity(severity, fields))
    }

    fn severity_of(&self, fields: &Map<String, Value>) -> Option<Severity> {
        let level = fields.get(LEVEL_FIELD).and_then(numeric_level)?;
        self.severities.lookup_number(level)
    }
}

fn derive_summary(fields: &Map<String, Value>) -> Option<Value> {
    let stack = fields
        .get(ERR_FIELD)
        .and_then(|err| err.get(STACK_FIELD))
        .filter(|stack| is_truthy(stack));

    stack
        .or_else(|| fields.get(MSG_FIELD).filter(|msg| is_truthy(msg)))
        .cloned()
}

/// `severity` goes first in a fresh entry; an existing `severity` key is
/// overwritten where it stands. Without a mapped severity the fields are
/// returned as they are.
fn with_severity(severity: Option<Severity>, fields: Map<String, Value>) -> Map<String, Value> {
    let Some(severity) = severity else {
        return fields;
    };
    let value = Value::String(severity.as_str().to_string());

    if fields.contains_key(SEVERITY_FIELD) {
        let mut fields = fields;
        fields.insert(SEVERITY_FIELD.to_string(), value);
        return fields;
    }

    let mut entry = Map::with_capacity(fields.len() + 1);
    entry.insert(SEVERITY_FIELD.to_string(), value);
    entry.extend(fields);
    entry
}
