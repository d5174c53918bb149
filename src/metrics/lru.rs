//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache algorithm.

use super::{CacheMetrics, CoreCacheMetrics};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// LRU-specific metrics (extends [`CoreCacheMetrics`]).
#[derive(Debug, Default)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms.
    pub core: CoreCacheMetrics,

    /// `put` calls that overwrote an existing key instead of inserting.
    pub updates: AtomicU64,

    /// Lookups whose key was present under the read lock but gone by the
    /// time the write lock was taken to promote it. Also counted as misses.
    pub stale_lookups: AtomicU64,
}

impl LruCacheMetrics {
    /// Creates a zeroed set of LRU counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an in-place overwrite of an existing key.
    #[inline]
    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that lost its key between the read and write phases.
    #[inline]
    pub fn record_stale_lookup(&self) {
        self.stale_lookups.fetch_add(1, Ordering::Relaxed);
        self.core.record_miss();
    }

    /// Snapshot of the core and LRU counters keyed by metric name.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert(
            "stale_lookups".to_string(),
            self.stale_lookups.load(Ordering::Relaxed) as f64,
        );
        metrics.insert(
            "updates".to_string(),
            self.updates.load(Ordering::Relaxed) as f64,
        );
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
