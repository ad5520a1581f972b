use super::error::AdapterError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One structured unit of log input produced by an application's logging
/// facility.
///
/// The schema is open: besides the conventional `message`, `msg`, `err`,
/// `level`, `time` and `labels` fields a record may carry anything, and every
/// field survives formatting untouched. Fields keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert, mostly for call sites that assemble a record
    /// inline.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for Record {
    type Error = AdapterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(AdapterError::UnsupportedInputKind {
                kind: json_kind(&other),
            }),
        }
    }
}

/// Conversion into a [`Record`] at the adapter boundary.
///
/// Typed inputs (`Record`, `Map`) always convert. Loosely typed inputs are
/// checked here so a malformed call is rejected before anything is written;
/// text is never parsed, it is rejected outright.
pub trait IntoRecord {
    fn into_record(self) -> Result<Record, AdapterError>;
}

impl IntoRecord for Record {
    fn into_record(self) -> Result<Record, AdapterError> {
        Ok(self)
    }
}

impl IntoRecord for Map<String, Value> {
    fn into_record(self) -> Result<Record, AdapterError> {
        Ok(Record(self))
    }
}

impl IntoRecord for Value {
    fn into_record(self) -> Result<Record, AdapterError> {
        Record::try_from(self)
    }
}

impl IntoRecord for String {
    fn into_record(self) -> Result<Record, AdapterError> {
        Err(AdapterError::UnsupportedInputKind { kind: "string" })
    }
}

impl IntoRecord for &str {
    fn into_record(self) -> Result<Record, AdapterError> {
        Err(AdapterError::UnsupportedInputKind { kind: "string" })
    }
}

/// Name of a JSON value's kind, as reported in rejection errors.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_value_becomes_record() {
        let record = Record::try_from(json!({"msg": "hi", "level": 30})).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("msg"), Some(&json!("hi")));
    }

    #[test]
    fn test_non_object_values_are_rejected() {
        let cases = vec![
            (json!("raw line"), "string"),
            (json!([1, 2]), "array"),
            (json!(42), "number"),
            (json!(true), "boolean"),
            (Value::Null, "null"),
        ];

        for (value, expected) in cases {
            match value.into_record() {
                Err(AdapterError::UnsupportedInputKind { kind }) => assert_eq!(kind, expected),
                other => panic!("expected rejection for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_text_is_never_parsed() {
        let line = r#"{"msg":"looks structured"}"#;
        assert!(matches!(
            line.into_record(),
            Err(AdapterError::UnsupportedInputKind { kind: "string" })
        ));
        assert!(line.to_string().into_record().is_err());
    }

    #[test]
    fn test_field_order_is_preserved() {
        let record = Record::new()
            .with_field("z", 1)
            .with_field("a", 2)
            .with_field("m", 3);
        let keys: Vec<&String> = record.fields().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
