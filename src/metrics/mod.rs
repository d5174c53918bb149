//! Cache Metrics System
//!
//! Counters describing how a cache has been used, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap<String, f64>`.
//!
//! # Why BTreeMap over HashMap?
//!
//! Metric names come back in a fixed, sorted order, which keeps log lines and
//! test expectations stable from run to run.
//!
//! # Why atomics?
//!
//! A cache lookup that misses only ever holds the read side of the cache lock,
//! so several threads can record misses at the same time. Every counter is an
//! `AtomicU64` updated with relaxed ordering; a snapshot taken while other
//! threads are active is approximate, but each counter on its own is exact
//! once the cache is quiescent.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod lru;

pub use self::lru::LruCacheMetrics;

/// Common metrics tracked by the cache engine.
#[derive(Debug, Default)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`) made against the cache.
    pub requests: AtomicU64,

    /// Lookups that found their key.
    pub cache_hits: AtomicU64,

    /// New entries written into the cache.
    pub insertions: AtomicU64,

    /// Entries expelled to stay within capacity.
    pub evictions: AtomicU64,

    /// Entries dropped by an explicit `remove`.
    pub removals: AtomicU64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    #[inline]
    pub fn record_hit(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that did not find its key.
    ///
    /// Misses are not counted separately; they are `requests - cache_hits`.
    #[inline]
    pub fn record_miss(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a new entry.
    #[inline]
    pub fn record_insertion(&self) {
        self.insertions.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a capacity-driven eviction.
    #[inline]
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an explicit removal.
    #[inline]
    pub fn record_removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    /// Fraction of lookups that hit, between 0.0 and 1.0.
    ///
    /// Returns 0.0 before any lookup has been made.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.requests.load(Ordering::Relaxed);
        if requests > 0 {
            self.cache_hits.load(Ordering::Relaxed) as f64 / requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, between 0.0 and 1.0.
    ///
    /// Returns 0.0 before any lookup has been made.
    pub fn miss_rate(&self) -> f64 {
        let requests = self.requests.load(Ordering::Relaxed);
        if requests > 0 {
            self.misses() as f64 / requests as f64
        } else {
            0.0
        }
    }

    /// Number of lookups that missed.
    pub fn misses(&self) -> u64 {
        let requests = self.requests.load(Ordering::Relaxed);
        let hits = self.cache_hits.load(Ordering::Relaxed);
        requests.saturating_sub(hits)
    }

    /// Snapshot of the core counters keyed by metric name.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Counters
        metrics.insert(
            "cache_hits".to_string(),
            self.cache_hits.load(Ordering::Relaxed) as f64,
        );
        metrics.insert("cache_misses".to_string(), self.misses() as f64);
        metrics.insert(
            "evictions".to_string(),
            self.evictions.load(Ordering::Relaxed) as f64,
        );
        metrics.insert(
            "insertions".to_string(),
            self.insertions.load(Ordering::Relaxed) as f64,
        );
        metrics.insert(
            "removals".to_string(),
            self.removals.load(Ordering::Relaxed) as f64,
        );
        metrics.insert(
            "requests".to_string(),
            self.requests.load(Ordering::Relaxed) as f64,
        );

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics
    }
}

/// Uniform metrics reporting for cache implementations.
pub trait CacheMetrics {
    /// Returns all metrics as name/value pairs in sorted order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name of the eviction algorithm, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
