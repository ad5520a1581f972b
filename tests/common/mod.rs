//! Shared helpers for the integration tests.
#![allow(dead_code)]

use parking_lot::Mutex;
use serde_json::{Value, json};
use std::io::{self, Write};
use std::sync::Arc;

/// Output channel that can be read while an adapter still owns a handle.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().clone()).expect("adapter output is UTF-8")
    }

    /// Every emitted line, parsed back into JSON.
    pub fn entries(&self) -> Vec<Value> {
        parse_lines(&self.contents())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn parse_lines(text: &str) -> Vec<Value> {
    text.lines()
        .map(|line| {
            serde_json::from_str(line).unwrap_or_else(|e| panic!("invalid line {line:?}: {e}"))
        })
        .collect()
}

/// A record carrying a sequence marker.
pub fn numbered_record(seq: usize) -> Value {
    json!({
        "msg": format!("record {seq}"),
        "level": 30,
        "seq": seq,
    })
}

/// The `seq` markers of emitted entries, in output order.
pub fn sequence_of(entries: &[Value]) -> Vec<u64> {
    entries
        .iter()
        .map(|entry| entry["seq"].as_u64().expect("entry has seq"))
        .collect()
}
