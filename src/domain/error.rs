use thiserror::Error;

/// Top-level error type for the adapter pipeline.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// A value that is not a key/value mapping was handed to the adapter.
    /// Only structured records are accepted, never raw text lines.
    #[error("Unsupported input kind: expected a structured record, got {kind}")]
    UnsupportedInputKind { kind: &'static str },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Write to output channel failed: {0}")]
    Write(#[from] std::io::Error),

    #[error("Batch aborted at record {index} after {written} written: {source}")]
    BatchAborted {
        index: usize,
        written: usize,
        #[source]
        source: Box<AdapterError>,
    },

    #[error("Record feed is full")]
    FeedFull,

    #[error("Record feed is closed")]
    FeedClosed,
}

impl AdapterError {
    /// True when this error, or the record error behind an aborted batch,
    /// is an input-kind rejection.
    pub fn is_unsupported_input(&self) -> bool {
        match self {
            AdapterError::UnsupportedInputKind { .. } => true,
            AdapterError::BatchAborted { source, .. } => source.is_unsupported_input(),
            _ => false,
        }
    }
}
