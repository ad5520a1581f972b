use crate::domain::{AdapterError, LogEntry};
use std::io::Write;

/// Line-oriented entry writer over an output channel.
///
/// Each entry is serialized into a reused scratch buffer and handed to the
/// channel with a single `write_all`, JSON and trailing newline together.
pub struct EntryWriter<W> {
    inner: W,
    line: Vec<u8>,
}

impl<W: Write> EntryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            line: Vec::with_capacity(512),
        }
    }

    pub fn write_entry(&mut self, entry: &LogEntry) -> Result<(), AdapterError> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, entry)?;
        self.line.push(b'\n');
        self.inner.write_all(&self.line)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), AdapterError> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
