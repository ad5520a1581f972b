use super::SinkAdapter;
use crate::domain::LevelThreshold;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How a destination receives records: `Raw` destinations get the structured
/// record itself, never a pre-rendered text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Raw,
}

/// Registration handle a logging facility keeps for one destination:
/// `{level, kind: raw, target}`.
pub struct SourceDescriptor<W> {
    pub level: LevelThreshold,
    pub kind: SourceKind,
    pub target: Arc<SinkAdapter<W>>,
}

impl<W> SourceDescriptor<W> {
    pub fn new(level: impl Into<LevelThreshold>, target: Arc<SinkAdapter<W>>) -> Self {
        Self {
            level: level.into(),
            kind: SourceKind::Raw,
            target,
        }
    }

    /// True when a record at `code` should be delivered to this destination.
    pub fn admits(&self, code: u32) -> bool {
        self.level.admits(code)
    }
}

impl<W> Clone for SourceDescriptor<W> {
    fn clone(&self) -> Self {
        Self {
            level: self.level,
            kind: self.kind,
            target: Arc::clone(&self.target),
        }
    }
}

impl<W> fmt::Debug for SourceDescriptor<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceDescriptor")
            .field("level", &self.level)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
