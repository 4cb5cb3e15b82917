//! Metrics for Binary Value property access
//!
//! Counters are recorded by the IPC handler and read through
//! [`Metrics::snapshot`].
//!
//! ## Usage
//!
//! ```ignore
//! use bo_05_binary_value::metrics::Metrics;
//!
//! let metrics = Metrics::new();
//! metrics.record_read(true);
//! assert_eq!(metrics.snapshot().reads, 1);
//! ```

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for property access
#[derive(Default, Debug)]
pub struct Metrics {
    /// ReadProperty requests handled
    pub reads: AtomicU64,
    /// WriteProperty requests handled
    pub writes: AtomicU64,
    /// Requests answered with an error
    pub rejected: AtomicU64,
    /// Present value writes passed to the notifier
    pub notifications_delivered: AtomicU64,
    /// Present value writes held back by out-of-service
    pub notifications_suppressed: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a ReadProperty request
    pub fn record_read(&self, success: bool) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a WriteProperty request
    pub fn record_write(&self, success: bool) {
        self.writes.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record the outcome of an accepted present value write
    pub fn record_notification(&self, delivered: bool) {
        if delivered {
            self.notifications_delivered.fetch_add(1, Ordering::Relaxed);
        } else {
            self.notifications_suppressed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            notifications_delivered: self.notifications_delivered.load(Ordering::Relaxed),
            notifications_suppressed: self.notifications_suppressed.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.reads.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.notifications_delivered.store(0, Ordering::Relaxed);
        self.notifications_suppressed.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub reads: u64,
    pub writes: u64,
    pub rejected: u64,
    pub notifications_delivered: u64,
    pub notifications_suppressed: u64,
}
