use serde_json::{Map, Value, json};
use std::error::Error;
use std::fmt;
use tracing::field::{Field, Visit};

/// Copies event fields into a record.
///
/// The event's `message` becomes `msg`. An error recorded under `err` or
/// `error` becomes an `err` object with `message`, `name` and `stack`, the
/// stack being the error followed by its source chain.
pub(super) struct RecordVisitor<'a> {
    fields: &'a mut Map<String, Value>,
}

impl<'a> RecordVisitor<'a> {
    pub(super) fn new(fields: &'a mut Map<String, Value>) -> Self {
        Self { fields }
    }

    fn key(field: &Field) -> String {
        match field.name() {
            "message" => "msg".to_string(),
            name => name.to_string(),
        }
    }

    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(Self::key(field), value);
    }
}

impl Visit for RecordVisitor<'_> {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, json!(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        match field.name() {
            "err" | "error" => {
                self.fields.insert("err".to_string(), error_object(value));
            }
            _ => self.insert(field, Value::from(value.to_string())),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::from(format!("{value:?}")));
    }
}

fn error_object(error: &(dyn Error + 'static)) -> Value {
    let mut stack = format!("Error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        stack.push_str("\n    caused by: ");
        stack.push_str(&cause.to_string());
        source = cause.source();
    }

    json!({
        "message": error.to_string(),
        "name": "Error",
        "stack": stack,
    })
}
