//! Domain layer for rask-log-adapter.
//!
//! Contains the canonical types shared across all modules:
//! - `Record`: structured input produced by a logging facility
//! - `LogEntry`: normalized output ready for line serialization
//! - `Severity` / `SeverityMap`: backend severity names and the code table
//! - `LogLevel` / `LevelThreshold`: facility level names and thresholds
//! - `AdapterError`: Top-level error type

pub mod entry;
pub mod error;
pub mod level;
pub mod record;
pub mod severity;

pub use entry::LogEntry;
pub use error::AdapterError;
pub use level::{LevelThreshold, LogLevel};
pub use record::{IntoRecord, Record};
pub use severity::{Severity, SeverityMap};
