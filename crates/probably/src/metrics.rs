//! Metrics hooks for Bloom filter operations
//!
//! Counters are recorded by [`SharedBloomFilter`](crate::SharedBloomFilter);
//! the plain `BloomFilter` records nothing.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use probably::{BloomFilter, Metrics, SharedBloomFilter};
//!
//! let metrics = Arc::new(Metrics::new());
//! let filter = BloomFilter::new(100, 0.01).unwrap();
//! let shared = SharedBloomFilter::with_metrics(filter, metrics.clone());
//!
//! shared.add(b"hello");
//! assert!(shared.contains(b"hello"));
//! assert_eq!(metrics.snapshot().lookups_positive, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for Bloom filter operations
///
/// Thread-safe counters for monitoring filter usage.
#[derive(Default)]
pub struct Metrics {
    /// Total filters created
    pub filters_created: AtomicU64,
    /// Total add calls
    pub elements_added: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Total positive lookups (matches)
    pub lookups_positive: AtomicU64,
    /// Total successful merges
    pub filters_merged: AtomicU64,
    /// Total merges rejected for configuration mismatch
    pub merges_rejected: AtomicU64,
    /// Bytes currently held by live filters
    pub bytes_allocated: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative add time in nanoseconds
    pub add_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            elements_added: self.elements_added.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            filters_merged: self.filters_merged.load(Ordering::Relaxed),
            merges_rejected: self.merges_rejected.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            avg_lookup_ns: average(&self.lookup_time_ns, &self.lookups_performed),
            avg_add_ns: average(&self.add_time_ns, &self.elements_added),
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes both true and false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.filters_created,
            &self.elements_added,
            &self.lookups_performed,
            &self.lookups_positive,
            &self.filters_merged,
            &self.merges_rejected,
            &self.bytes_allocated,
            &self.lookup_time_ns,
            &self.add_time_ns,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

fn average(total: &AtomicU64, count: &AtomicU64) -> u64 {
    let count = count.load(Ordering::Relaxed);
    if count > 0 {
        total.load(Ordering::Relaxed) / count
    } else {
        0
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub elements_added: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub filters_merged: u64,
    pub merges_rejected: u64,
    pub bytes_allocated: u64,
    pub avg_lookup_ns: u64,
    pub avg_add_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward filter activity to an external metrics
/// system.
pub trait MetricsRecorder: Send + Sync {
    /// Record filter creation with its storage size in bytes
    fn record_filter_created(&self, bytes: usize);

    /// Record an add
    fn record_add(&self, duration: Duration);

    /// Record a lookup
    fn record_lookup(&self, duration: Duration, found: bool);

    /// Record a merge attempt
    fn record_merge(&self, accepted: bool);

    /// Record filter deallocation
    fn record_filter_freed(&self, bytes: usize);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize) {}
    fn record_add(&self, _: Duration) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
    fn record_merge(&self, _: bool) {}
    fn record_filter_freed(&self, _: usize) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, bytes: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    fn record_add(&self, duration: Duration) {
        self.elements_added.fetch_add(1, Ordering::Relaxed);
        self.add_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_merge(&self, accepted: bool) {
        if accepted {
            self.filters_merged.fetch_add(1, Ordering::Relaxed);
        } else {
            self.merges_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_filter_freed(&self, bytes: usize) {
        self.bytes_allocated
            .fetch_sub(bytes as u64, Ordering::Relaxed);
    }
}
