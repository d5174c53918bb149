#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Quick Reference
//!
//! | Operation | Effect on recency | Lock taken |
//! |-----------|-------------------|------------|
//! | [`LruCache::put`] | key becomes most recently used | write |
//! | [`LruCache::get`] / [`LruCache::get_with`] | key becomes most recently used | read, then write on a hit |
//! | [`LruCache::remove`] | key leaves the cache | write |
//! | [`LruCache::peek`] / [`LruCache::contains`] | none | read |
//! | [`LruCache::clear`] | cache emptied | write |
//!
//! ## Eviction Hook
//!
//! ```rust
//! use sync_lru::config::LruCacheConfig;
//! use sync_lru::LruCache;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let expelled = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&expelled);
//! let config = LruCacheConfig::try_new(2)
//!     .unwrap()
//!     .with_eviction_callback(move |_key: &'static str, _value: u32| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     });
//! let cache = LruCache::init(config, None);
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("a", 10);   // overwrite: no eviction
//! cache.remove(&"b");   // explicit removal: no callback
//! cache.put("c", 3);
//! cache.put("d", 4);    // "a" expelled
//! assert_eq!(expelled.load(Ordering::SeqCst), 1);
//! ```
//!
//! ## Sharing Between Threads
//!
//! ```rust
//! use sync_lru::LruCache;
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(LruCache::with_capacity(NonZeroUsize::new(64).unwrap()));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 cache.put((t, i), i);
//!                 let _ = cache.get(&(t, i));
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 64);
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: the cache engine
//! - [`config`]: construction-time configuration and its error type
//! - [`metrics`]: usage counters reported through [`metrics::CacheMetrics`]

/// Arena-backed doubly linked list used as the recency order.
///
/// Internal infrastructure; nodes are addressed by slot index.
pub(crate) mod list;

/// Cache configuration.
///
/// Capacity, the eviction callback and the configuration error type.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a thread-safe, fixed-size cache that evicts the least recently
/// used entry when a new key arrives at capacity.
pub mod lru;

/// Cache metrics system.
///
/// Hit, miss, insertion, eviction and removal counters for the cache.
pub mod metrics;

pub use config::{ConfigError, LruCacheConfig, DEFAULT_CAPACITY};
pub use lru::LruCache;
