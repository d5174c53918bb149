//! Cache Configuration
//!
//! Construction-time settings for [`LruCache`](crate::LruCache). A config is
//! consumed by the cache when it is built and cannot change afterwards.
//!
//! # Fields
//!
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | `capacity` | [`DEFAULT_CAPACITY`] (1024) | Maximum number of entries held at once |
//! | `on_evict` | `None` | Callback run once for every capacity-driven eviction |
//!
//! Capacity is a [`NonZeroUsize`], so a zero-sized cache cannot be expressed.
//! Callers holding a plain `usize` go through [`LruCacheConfig::try_new`],
//! which rejects zero with [`ConfigError::ZeroCapacity`] rather than clamping.
//!
//! # Examples
//!
//! ```
//! use sync_lru::config::LruCacheConfig;
//! use sync_lru::LruCache;
//! use core::num::NonZeroUsize;
//!
//! // Defaults: 1024 entries, no callback.
//! let cache: LruCache<String, i32> = LruCache::init(LruCacheConfig::default(), None);
//! assert_eq!(cache.cap().get(), 1024);
//!
//! // Explicit capacity plus an eviction hook.
//! let config = LruCacheConfig::new(NonZeroUsize::new(2).unwrap())
//!     .with_eviction_callback(|key: &'static str, value: i32| {
//!         println!("expelled {key} => {value}");
//!     });
//! let cache = LruCache::init(config, None);
//! cache.put("a", 1);
//! ```

use std::fmt;
use std::num::NonZeroUsize;

use thiserror::Error;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1024;

const DEFAULT_CAPACITY_NZ: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CAPACITY) {
    Some(cap) => cap,
    None => panic!("default capacity must be non-zero"),
};

/// Callback invoked with the key and value of an evicted entry.
///
/// Receives ownership of the pair. Runs synchronously on the thread whose
/// `put` caused the eviction, after the cache lock has been released.
pub type EvictionCallback<K, V> = Box<dyn Fn(K, V) + Send + Sync>;

/// Errors raised while building a cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested capacity was zero.
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,
}

/// Configuration for an [`LruCache`](crate::LruCache).
///
/// # Examples
///
/// ```
/// use sync_lru::config::{ConfigError, LruCacheConfig};
///
/// let config = LruCacheConfig::<u64, Vec<u8>>::try_new(10_000).unwrap();
/// assert_eq!(config.capacity.get(), 10_000);
///
/// let err = LruCacheConfig::<u64, Vec<u8>>::try_new(0).unwrap_err();
/// assert_eq!(err, ConfigError::ZeroCapacity);
/// ```
pub struct LruCacheConfig<K, V> {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
    /// Hook run for every entry expelled to stay within `capacity`.
    /// Never run for explicit removal or `clear`.
    pub on_evict: Option<EvictionCallback<K, V>>,
}

impl<K, V> LruCacheConfig<K, V> {
    /// Creates a configuration with the given capacity and no callback.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            on_evict: None,
        }
    }

    /// Creates a configuration from a plain capacity, rejecting zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(ConfigError::ZeroCapacity)
    }

    /// Overrides the capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Installs the eviction callback, replacing any previous one.
    #[must_use]
    pub fn with_eviction_callback<F>(mut self, f: F) -> Self
    where
        F: Fn(K, V) + Send + Sync + 'static,
    {
        self.on_evict = Some(Box::new(f));
        self
    }
}

impl<K, V> Default for LruCacheConfig<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY_NZ)
    }
}

impl<K, V> fmt::Debug for LruCacheConfig<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .field("on_evict", &self.on_evict.is_some())
            .finish()
    }
}
