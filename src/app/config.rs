use crate::sink::BatchPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_FEED_CAPACITY: usize = 1_000_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Level for the adapter's own diagnostics output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl DiagnosticsLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticsLevel::Error => "error",
            DiagnosticsLevel::Warn => "warn",
            DiagnosticsLevel::Info => "info",
            DiagnosticsLevel::Debug => "debug",
            DiagnosticsLevel::Trace => "trace",
        }
    }
}

impl From<DiagnosticsLevel> for tracing::Level {
    fn from(level: DiagnosticsLevel) -> Self {
        match level {
            DiagnosticsLevel::Error => tracing::Level::ERROR,
            DiagnosticsLevel::Warn => tracing::Level::WARN,
            DiagnosticsLevel::Info => tracing::Level::INFO,
            DiagnosticsLevel::Debug => tracing::Level::DEBUG,
            DiagnosticsLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub level: DiagnosticsLevel,
    pub format: DiagnosticsFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Handling of records that fail to format inside a batch.
    pub batch_policy: BatchPolicy,
    /// Flush the output channel at the end of every accept call.
    pub flush_each_call: bool,
    /// Pending deliveries a record feed holds before producers must pause.
    pub feed_capacity: usize,
    pub diagnostics: DiagnosticsConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            batch_policy: BatchPolicy::StopAtFirstError,
            flush_each_call: true,
            feed_capacity: 1024,
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

impl AdapterConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AdapterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed_capacity == 0 {
            return Err(ConfigError::InvalidConfig(
                "feed_capacity must be greater than 0".to_string(),
            ));
        }

        if self.feed_capacity > MAX_FEED_CAPACITY {
            return Err(ConfigError::InvalidConfig(format!(
                "feed_capacity {} exceeds maximum {MAX_FEED_CAPACITY}",
                self.feed_capacity
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::default();
        assert_eq!(config.batch_policy, BatchPolicy::StopAtFirstError);
        assert!(config.flush_each_call);
        assert_eq!(config.feed_capacity, 1024);
        assert_eq!(config.diagnostics.level, DiagnosticsLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = AdapterConfig::from_toml_str("").unwrap();
        assert_eq!(config, AdapterConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = AdapterConfig::from_toml_str(
            r#"
            batch_policy = "best_effort"
            flush_each_call = false
            feed_capacity = 64

            [diagnostics]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.batch_policy, BatchPolicy::BestEffort);
        assert!(!config.flush_each_call);
        assert_eq!(config.feed_capacity, 64);
        assert_eq!(config.diagnostics.level, DiagnosticsLevel::Debug);
        assert_eq!(config.diagnostics.format, DiagnosticsFormat::Json);
    }

    #[test]
    fn test_invalid_capacity_rejected() {
        let err = AdapterConfig::from_toml_str("feed_capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));

        let err = AdapterConfig::from_toml_str("feed_capacity = 2000000").unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let err = AdapterConfig::from_toml_str(r#"batch_policy = "sometimes""#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
