// Diagnostics logging for the adapter itself.
//
// Standard output is the sink's output channel, so diagnostics always go to
// stderr and never interleave with emitted entries.
use super::config::{DiagnosticsConfig, DiagnosticsFormat};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("Failed to set global tracing subscriber: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Noisy dependency targets capped at `warn`.
const DEFAULT_DIRECTIVES: &[&str] = &["tokio=warn", "runtime=warn"];

/// Filter string for the configured default level. `RUST_LOG`, when set,
/// replaces it entirely.
pub fn build_filter_string(config: &DiagnosticsConfig) -> String {
    if let Ok(from_env) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if !from_env.trim().is_empty() {
            return from_env;
        }
    }

    let mut parts = Vec::with_capacity(DEFAULT_DIRECTIVES.len() + 1);
    parts.push(config.level.as_str().to_string());
    parts.extend(DEFAULT_DIRECTIVES.iter().map(|d| (*d).to_string()));
    parts.join(",")
}

/// Install the global diagnostics subscriber.
///
/// Fails with `AlreadyInitialized` when another subscriber is installed; the
/// existing one stays in place.
pub fn init_diagnostics(config: &DiagnosticsConfig) -> Result<(), LoggingError> {
    let filter = build_filter_string(config);
    let env_filter = EnvFilter::try_new(&filter).map_err(|source| LoggingError::InvalidFilter {
        filter: filter.clone(),
        source,
    })?;

    match config.format {
        DiagnosticsFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        DiagnosticsFormat::Compact => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::DiagnosticsLevel;

    #[test]
    fn test_build_filter_string_uses_configured_level() {
        // Only meaningful when RUST_LOG is not set for the test run.
        if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
            return;
        }

        let config = DiagnosticsConfig {
            level: DiagnosticsLevel::Debug,
            ..DiagnosticsConfig::default()
        };
        let filter = build_filter_string(&config);
        assert!(filter.starts_with("debug"));
        assert!(filter.contains("tokio=warn"));
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn test_json_filter_and_layer_build_without_installing() {
        use tracing_subscriber::registry;

        let config = DiagnosticsConfig {
            level: DiagnosticsLevel::Info,
            format: DiagnosticsFormat::Json,
        };
        let filter = EnvFilter::try_new(build_filter_string(&config)).unwrap();
        let subscriber = registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::sink));

        // Scoped to this thread; the global default stays untouched.
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("scoped diagnostics");
        });
    }
}
