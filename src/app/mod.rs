//! Host-side plumbing: adapter configuration and diagnostics logging.

pub mod config;
pub mod logging_system;

pub use config::{
    AdapterConfig, ConfigError, DiagnosticsConfig, DiagnosticsFormat, DiagnosticsLevel,
};
pub use logging_system::{LoggingError, init_diagnostics};
