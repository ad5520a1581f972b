//! Facility layer: `tracing` events → structured records → sink adapters.
//!
//! [`FacilityLayer`] plays the part of the application's logging facility.
//! Each event becomes a record in the conventional shape
//! (`v`, `level`, `name`, `hostname`, `pid`, `time`, `msg`, event fields) and
//! goes to every registered destination whose threshold it meets.

mod visitor;

use crate::domain::{LogLevel, Record};
use crate::sink::{RecordConsumer, SourceDescriptor};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::io::Write;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use visitor::RecordVisitor;

/// Record format version stamped into the `v` field.
const RECORD_VERSION: u64 = 0;

pub struct FacilityLayer<W> {
    name: String,
    hostname: String,
    pid: u32,
    destinations: Vec<SourceDescriptor<W>>,
}

impl<W> FacilityLayer<W> {
    pub fn new(name: impl Into<String>) -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            name: name.into(),
            hostname,
            pid: std::process::id(),
            destinations: Vec::new(),
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Register one more destination.
    pub fn with_destination(mut self, destination: SourceDescriptor<W>) -> Self {
        self.destinations.push(destination);
        self
    }

    pub fn destinations(&self) -> &[SourceDescriptor<W>] {
        &self.destinations
    }

    fn build_record(&self, event: &Event<'_>, level: LogLevel) -> Record {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::from(self.name.as_str()));
        fields.insert("hostname".to_string(), Value::from(self.hostname.as_str()));
        fields.insert("pid".to_string(), Value::from(self.pid));
        fields.insert("level".to_string(), Value::from(level.code()));

        event.record(&mut RecordVisitor::new(&mut fields));

        fields.insert(
            "time".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        fields.insert("v".to_string(), Value::from(RECORD_VERSION));
        Record::from(fields)
    }
}

impl<S, W> Layer<S> for FacilityLayer<W>
where
    S: Subscriber,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // The adapter's own diagnostics would loop straight back into it.
        if metadata.target().starts_with(env!("CARGO_CRATE_NAME")) {
            return;
        }

        let level = LogLevel::from(*metadata.level());
        let code = level.code();
        if !self.destinations.iter().any(|d| d.admits(code)) {
            return;
        }

        let record = self.build_record(event, level);
        for destination in self.destinations.iter().filter(|d| d.admits(code)) {
            if let Err(e) = destination.target.accept_one(record.clone()) {
                eprintln!("Warning: log record not delivered: {e}");
            }
        }
    }
}
