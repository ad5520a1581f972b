// Lock-free sink statistics using atomic operations
//
// Counters are updated on the write path and read from anywhere without
// touching the output channel lock.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct SinkStats {
    records_written: AtomicU64,
    records_rejected: AtomicU64,
    batches_accepted: AtomicU64,
    write_failures: AtomicU64,
}

impl SinkStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_written(&self) {
        self.records_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.records_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_batch(&self) {
        self.batches_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write_failure(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics (lock-free)
    pub fn snapshot(&self) -> SinkStatsSnapshot {
        SinkStatsSnapshot {
            records_written: self.records_written.load(Ordering::Relaxed),
            records_rejected: self.records_rejected.load(Ordering::Relaxed),
            batches_accepted: self.batches_accepted.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkStatsSnapshot {
    pub records_written: u64,
    pub records_rejected: u64,
    pub batches_accepted: u64,
    pub write_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_concurrent_updates() {
        let stats = Arc::new(SinkStats::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        stats.record_written();
                    }
                    stats.record_batch();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.records_written, 8000);
        assert_eq!(snapshot.batches_accepted, 8);
        assert_eq!(snapshot.records_rejected, 0);
    }
}
