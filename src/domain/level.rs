use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain log level as used by the upstream logging facility.
///
/// This is distinct from the diagnostics level in `app::config` (used for the
/// adapter's own tracing output). `LogLevel` is the level stamped on records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    /// Integer code carried in a record's `level` field.
    pub const fn code(self) -> u32 {
        match self {
            LogLevel::Trace => 10,
            LogLevel::Debug => 20,
            LogLevel::Info => 30,
            LogLevel::Warn => 40,
            LogLevel::Error => 50,
            LogLevel::Fatal => 60,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            other => Err(format!("Unknown log level '{other}'")),
        }
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        if level == tracing::Level::ERROR {
            LogLevel::Error
        } else if level == tracing::Level::WARN {
            LogLevel::Warn
        } else if level == tracing::Level::INFO {
            LogLevel::Info
        } else if level == tracing::Level::DEBUG {
            LogLevel::Debug
        } else {
            LogLevel::Trace
        }
    }
}

/// Minimum level a destination receives: a named level or a raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelThreshold {
    Named(LogLevel),
    Code(u32),
}

impl LevelThreshold {
    pub const fn code(self) -> u32 {
        match self {
            LevelThreshold::Named(level) => level.code(),
            LevelThreshold::Code(code) => code,
        }
    }

    /// True when a record at `code` is at or above this threshold.
    pub const fn admits(self, code: u32) -> bool {
        code >= self.code()
    }
}

impl From<LogLevel> for LevelThreshold {
    fn from(level: LogLevel) -> Self {
        LevelThreshold::Named(level)
    }
}

impl From<u32> for LevelThreshold {
    fn from(code: u32) -> Self {
        LevelThreshold::Code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_codes() {
        let expected = [
            (LogLevel::Trace, 10),
            (LogLevel::Debug, 20),
            (LogLevel::Info, 30),
            (LogLevel::Warn, 40),
            (LogLevel::Error, 50),
            (LogLevel::Fatal, 60),
        ];
        for (level, code) in expected {
            assert_eq!(level.code(), code, "{level}");
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" fatal ".parse::<LogLevel>(), Ok(LogLevel::Fatal));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_threshold_admits_at_or_above() {
        let threshold = LevelThreshold::from(LogLevel::Warn);
        assert!(!threshold.admits(30));
        assert!(threshold.admits(40));
        assert!(threshold.admits(60));

        let raw = LevelThreshold::from(35);
        assert!(!raw.admits(30));
        assert!(raw.admits(40));
    }

    #[test]
    fn test_threshold_deserializes_from_name_or_code() {
        let named: LevelThreshold = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(named, LevelThreshold::Named(LogLevel::Error));
        let code: LevelThreshold = serde_json::from_str("45").unwrap();
        assert_eq!(code, LevelThreshold::Code(45));
    }

    #[test]
    fn test_tracing_level_conversion() {
        assert_eq!(LogLevel::from(tracing::Level::TRACE), LogLevel::Trace);
        assert_eq!(LogLevel::from(tracing::Level::WARN), LogLevel::Warn);
        assert_eq!(LogLevel::from(tracing::Level::ERROR), LogLevel::Error);
    }
}
