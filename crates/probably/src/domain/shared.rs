//! Lock-guarded Bloom filter for use across threads
//!
//! `BloomFilter` itself has no internal synchronization. This wrapper puts it
//! behind a `parking_lot::RwLock`: lookups share the read lock, mutations take
//! the write lock. It also feeds a [`MetricsRecorder`].

use std::sync::Arc;
use std::time::Instant;

use parking_lot::{RwLock, RwLockWriteGuard};
use tracing::trace;

use super::bloom_filter::BloomFilter;
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Thread-safe Bloom filter handle
pub struct SharedBloomFilter<R: MetricsRecorder = NoOpMetrics> {
    inner: RwLock<BloomFilter>,
    metrics: Arc<R>,
}

impl SharedBloomFilter<NoOpMetrics> {
    /// Wrap a filter without metrics
    pub fn new(filter: BloomFilter) -> Self {
        Self::with_metrics(filter, Arc::new(NoOpMetrics))
    }
}

impl<R: MetricsRecorder> SharedBloomFilter<R> {
    /// Wrap a filter, recording activity into `metrics`
    pub fn with_metrics(filter: BloomFilter, metrics: Arc<R>) -> Self {
        metrics.record_filter_created(filter.bit_array().byte_len());
        Self {
            inner: RwLock::new(filter),
            metrics,
        }
    }

    pub fn add(&self, data: &[u8]) {
        let start = Instant::now();
        self.inner.write().add(data);
        self.metrics.record_add(start.elapsed());
        trace!(len = data.len(), "Added element to shared filter");
    }

    pub fn contains(&self, data: &[u8]) -> bool {
        let start = Instant::now();
        let found = self.inner.read().contains(data);
        self.metrics.record_lookup(start.elapsed(), found);
        found
    }

    /// Merge a plain filter into this one
    pub fn merge(&self, other: &BloomFilter) -> Result<(), FilterError> {
        let result = self.inner.write().merge(other);
        self.metrics.record_merge(result.is_ok());
        result
    }

    /// Merge another shared filter into this one
    ///
    /// Locks are taken in address order so concurrent cross-merges cannot
    /// deadlock. Merging a filter with itself is a no-op.
    pub fn merge_shared<S: MetricsRecorder>(
        &self,
        other: &SharedBloomFilter<S>,
    ) -> Result<(), FilterError> {
        if std::ptr::eq(&self.inner, &other.inner) {
            self.metrics.record_merge(true);
            return Ok(());
        }

        let self_addr = &self.inner as *const RwLock<BloomFilter> as usize;
        let other_addr = &other.inner as *const RwLock<BloomFilter> as usize;
        let result = if self_addr < other_addr {
            let mut target = self.inner.write();
            let source = other.inner.read();
            target.merge(&source)
        } else {
            let source = other.inner.read();
            let mut target = self.inner.write();
            target.merge(&source)
        };

        self.metrics.record_merge(result.is_ok());
        result
    }

    /// Build a new plain filter holding the union with `other`
    pub fn union(&self, other: &BloomFilter) -> Result<BloomFilter, FilterError> {
        self.inner.read().union(other)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// The configured expected element count
    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    /// Copy of the current filter state
    pub fn snapshot(&self) -> BloomFilter {
        self.inner.read().clone()
    }

    /// Exclusive scoped access for batches of operations
    ///
    /// Operations made through the guard are not recorded in metrics.
    pub fn lock(&self) -> RwLockWriteGuard<'_, BloomFilter> {
        self.inner.write()
    }
}

impl<R: MetricsRecorder> Drop for SharedBloomFilter<R> {
    fn drop(&mut self) {
        self.metrics
            .record_filter_freed(self.inner.get_mut().bit_array().byte_len());
    }
}
