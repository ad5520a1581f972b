use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Severity label understood by the log-collection backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facility level code to backend severity.
const STANDARD_CODES: [(i64, Severity); 6] = [
    (10, Severity::Debug),
    (20, Severity::Debug),
    (30, Severity::Info),
    (40, Severity::Warning),
    (50, Severity::Error),
    (60, Severity::Critical),
];

static STANDARD: LazyLock<Arc<SeverityMap>> =
    LazyLock::new(|| Arc::new(SeverityMap::from_pairs(STANDARD_CODES)));

/// Immutable lookup table from integer level code to [`Severity`].
///
/// Built once and never mutated; share it behind an `Arc` between any
/// number of formatters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityMap {
    codes: BTreeMap<i64, Severity>,
}

impl SeverityMap {
    /// The process-wide standard table:
    /// `10, 20 → DEBUG`, `30 → INFO`, `40 → WARNING`, `50 → ERROR`, `60 → CRITICAL`.
    pub fn standard() -> Arc<SeverityMap> {
        Arc::clone(&STANDARD)
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (i64, Severity)>) -> Self {
        Self {
            codes: pairs.into_iter().collect(),
        }
    }

    pub fn lookup(&self, code: i64) -> Option<Severity> {
        self.codes.get(&code).copied()
    }

    /// Lookup for a coerced numeric level. Only finite integral values can
    /// match.
    pub fn lookup_number(&self, level: f64) -> Option<Severity> {
        if !level.is_finite() || level.fract() != 0.0 {
            return None;
        }
        self.lookup(level as i64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, Severity)> + '_ {
        self.codes.iter().map(|(code, severity)| (*code, *severity))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
