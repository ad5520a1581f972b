use super::error::AdapterError;
use serde::Serialize;
use serde_json::{Map, Value};

pub const SEVERITY_FIELD: &str = "severity";
pub const MESSAGE_FIELD: &str = "message";

/// A normalized log entry ready for line serialization.
///
/// Carries every field of the record it was built from, plus the derived
/// `severity` and `message` fields when they could be determined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogEntry(Map<String, Value>);

impl LogEntry {
    pub fn severity(&self) -> Option<&str> {
        self.0.get(SEVERITY_FIELD).and_then(Value::as_str)
    }

    pub fn message(&self) -> Option<&Value> {
        self.0.get(MESSAGE_FIELD)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Compact JSON for this entry. String values are escaped, so the result
    /// never contains a raw line break.
    pub fn to_line(&self) -> Result<String, AdapterError> {
        serde_json::to_string(&self.0).map_err(AdapterError::Serialization)
    }
}

impl From<Map<String, Value>> for LogEntry {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
