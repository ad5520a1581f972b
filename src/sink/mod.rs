//! Sink adapter: formats records and writes one JSON line per record.
//!
//! The adapter is driven entirely by its producer. Each accept call formats,
//! writes and flushes synchronously; returning `Ok` is the completion signal.
//! The output channel stays locked for the whole call, so the lines of one
//! batch are contiguous and in input order.

pub mod descriptor;
pub mod stats;
pub mod writer;

pub use descriptor::{SourceDescriptor, SourceKind};
pub use stats::{SinkStats, SinkStatsSnapshot};
pub use writer::EntryWriter;

use crate::app::AdapterConfig;
use crate::domain::{AdapterError, IntoRecord, LevelThreshold, LogEntry};
use crate::formatter::EntryFormatter;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// A flow-controlled consumer of structured records.
pub trait RecordConsumer {
    /// Format and write one record.
    fn accept_one<R: IntoRecord>(&self, record: R) -> Result<(), AdapterError>;

    /// Format and write a batch in order, completing once for the whole batch.
    fn accept_batch<I>(&self, records: I) -> Result<BatchOutcome, AdapterError>
    where
        I: IntoIterator,
        I::Item: IntoRecord;
}

/// What happens to a batch when one of its records cannot be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Records before the bad one are written, the call fails at it.
    #[default]
    StopAtFirstError,
    /// Nothing is written unless every record formats.
    AllOrNothing,
    /// Bad records are skipped and reported, the rest are written.
    BestEffort,
}

#[derive(Debug)]
pub struct RejectedRecord {
    pub index: usize,
    pub error: AdapterError,
}

/// Result of a completed batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub written: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl BatchOutcome {
    pub fn written(written: usize) -> Self {
        Self {
            written,
            rejected: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub struct SinkAdapter<W> {
    formatter: EntryFormatter,
    policy: BatchPolicy,
    flush_each_call: bool,
    output: Mutex<EntryWriter<W>>,
    stats: SinkStats,
}

impl SinkAdapter<io::Stdout> {
    /// Adapter writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> SinkAdapter<W> {
    pub fn new(output: W) -> Self {
        Self {
            formatter: EntryFormatter::default(),
            policy: BatchPolicy::default(),
            flush_each_call: true,
            output: Mutex::new(EntryWriter::new(output)),
            stats: SinkStats::new(),
        }
    }

    pub fn from_config(config: &AdapterConfig, output: W) -> Self {
        Self::new(output)
            .with_policy(config.batch_policy)
            .with_flush_each_call(config.flush_each_call)
    }

    pub fn with_formatter(mut self, formatter: EntryFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_flush_each_call(mut self, flush: bool) -> Self {
        self.flush_each_call = flush;
        self
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    pub fn formatter(&self) -> &EntryFormatter {
        &self.formatter
    }

    pub fn stats(&self) -> SinkStatsSnapshot {
        self.stats.snapshot()
    }

    /// Registration handle for a logging facility: deliver records at or
    /// above `level` to this adapter.
    pub fn source_descriptor(
        self: &Arc<Self>,
        level: impl Into<LevelThreshold>,
    ) -> SourceDescriptor<W> {
        SourceDescriptor::new(level, Arc::clone(self))
    }

    /// Flush the output channel regardless of `flush_each_call`.
    pub fn flush(&self) -> Result<(), AdapterError> {
        self.output.lock().flush()
    }

    pub fn into_output(self) -> W {
        self.output.into_inner().into_inner()
    }

    /// Per-call flush. A failed flush counts as a write failure.
    fn finish_call(&self, out: &mut EntryWriter<W>) -> Result<(), AdapterError> {
        if self.flush_each_call {
            out.flush().inspect_err(|_| self.stats.record_write_failure())?;
        }
        Ok(())
    }

    /// Write pre-formatted results under one lock, following the policy.
    fn write_formatted(
        &self,
        formatted: Vec<Result<LogEntry, AdapterError>>,
    ) -> Result<BatchOutcome, AdapterError> {
        let formatted = if self.policy == BatchPolicy::AllOrNothing {
            require_all(formatted).inspect_err(|_| self.stats.record_rejected())?
        } else {
            formatted
        };

        let mut outcome = BatchOutcome::default();
        let mut out = self.output.lock();

        for (index, result) in formatted.into_iter().enumerate() {
            let entry = match result {
                Ok(entry) => entry,
                Err(error) => {
                    self.stats.record_rejected();
                    if self.policy == BatchPolicy::BestEffort {
                        outcome.rejected.push(RejectedRecord { index, error });
                        continue;
                    }
                    // A flush failure here is counted, not returned.
                    let _ = self.finish_call(&mut out);
                    return Err(AdapterError::BatchAborted {
                        index,
                        written: outcome.written,
                        source: Box::new(error),
                    });
                }
            };

            if let Err(error) = out.write_entry(&entry) {
                self.stats.record_write_failure();
                return Err(AdapterError::BatchAborted {
                    index,
                    written: outcome.written,
                    source: Box::new(error),
                });
            }
            self.stats.record_written();
            outcome.written += 1;
        }

        self.finish_call(&mut out)?;
        Ok(outcome)
    }
}

/// Fails the batch at the first record that did not format.
fn require_all(
    formatted: Vec<Result<LogEntry, AdapterError>>,
) -> Result<Vec<Result<LogEntry, AdapterError>>, AdapterError> {
    formatted
        .into_iter()
        .enumerate()
        .map(|(index, result)| {
            result.map(Ok).map_err(|source| AdapterError::BatchAborted {
                index,
                written: 0,
                source: Box::new(source),
            })
        })
        .collect()
}

impl<W: Write> RecordConsumer for SinkAdapter<W> {
    fn accept_one<R: IntoRecord>(&self, record: R) -> Result<(), AdapterError> {
        let entry = match self.formatter.format(record) {
            Ok(entry) => entry,
            Err(err) => {
                self.stats.record_rejected();
                warn!(error = %err, "Rejected record");
                return Err(err);
            }
        };

        let (written, flushed) = {
            let mut out = self.output.lock();
            match out.write_entry(&entry) {
                Ok(()) => (Ok(()), self.finish_call(&mut out)),
                Err(err) => (Err(err), Ok(())),
            }
        };

        if let Err(err) = written {
            self.stats.record_write_failure();
            error!(error = %err, "Failed to write entry");
            return Err(err);
        }
        self.stats.record_written();

        flushed.inspect_err(|err| error!(error = %err, "Failed to flush output"))
    }

    fn accept_batch<I>(&self, records: I) -> Result<BatchOutcome, AdapterError>
    where
        I: IntoIterator,
        I::Item: IntoRecord,
    {
        // Formatting is pure, so the whole batch is formatted before the
        // output lock is taken.
        let formatted: Vec<Result<LogEntry, AdapterError>> = records
            .into_iter()
            .map(|record| self.formatter.format(record))
            .collect();
        let size = formatted.len();

        let result = self.write_formatted(formatted);
        self.stats.record_batch();

        match &result {
            Ok(outcome) => {
                for rejected in &outcome.rejected {
                    warn!(index = rejected.index, error = %rejected.error, "Skipped record in batch");
                }
                debug!(size, written = outcome.written, "Batch written");
            }
            Err(err) => warn!(size, error = %err, policy = ?self.policy, "Batch aborted"),
        }

        result
    }
}
