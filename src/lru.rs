//! Least Recently Used (LRU) Cache Implementation
//!
//! A fixed-capacity, thread-safe LRU cache with O(1) lookups, insertions and
//! removals. Recency is tracked globally across every key: the entry that was
//! least recently inserted or read is always the one expelled when a new key
//! arrives at a full cache.
//!
//! # Structure
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        LruCache                              │
//! │                                                              │
//! │   RwLock ─────────────────────────────────────────────┐      │
//! │   │  LruSegment                                       │      │
//! │   │                                                   │      │
//! │   │  map: K ──▶ slot index                            │      │
//! │   │             │                                     │      │
//! │   │             ▼                                     │      │
//! │   │  list: [MRU] ⇄ slot ⇄ slot ⇄ ... ⇄ slot [LRU]     │      │
//! │   └───────────────────────────────────────────────────┘      │
//! │                                                              │
//! │   on_evict: Option<Fn(K, V)>     metrics: LruCacheMetrics    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index and the recency list are only ever touched together under one
//! lock, so every key in the map resolves to a live slot holding that key and
//! every slot in the list has a map entry.
//!
//! # Performance Characteristics
//!
//! | Operation | Lock | Cost |
//! |-----------|------|------|
//! | `get` (miss) | read | O(1) |
//! | `get` (hit) | read, then write | O(1) |
//! | `put` / `remove` | write | O(1) |
//! | `len` / `contains` / `peek` | read | O(1) |
//! | `keys_mru` | read | O(n) |
//! | `clear` | write | O(n) |
//!
//! # Lookups and the two-phase lock
//!
//! `get` first checks the index under the read lock so that misses never
//! contend for the write lock. On a hit the read lock is dropped and the
//! write lock taken to promote the entry. Another thread may remove or evict
//! the key in between; the write phase therefore looks the key up again
//! instead of trusting anything learned under the read lock, and a key that
//! vanished is reported as a miss.
//!
//! # Eviction callback
//!
//! The evicted pair is moved out of the cache under the write lock. The lock
//! is released before the callback runs, so the callback sees a consistent
//! cache and may call back into it without deadlocking. It still runs inside
//! the `put` that caused the eviction and delays that call's return.

use crate::config::{ConfigError, EvictionCallback, LruCacheConfig};
use crate::list::List;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use log::{debug, trace};
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on slots reserved up front; larger caches grow on demand.
const MAX_PREALLOCATED_SLOTS: usize = 64 * 1024;

/// What a `put` did to the segment.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PutOutcome<K, V> {
    /// The key was present; its value was overwritten and it was promoted.
    Updated,
    /// A new entry was added without exceeding capacity.
    Inserted,
    /// A new entry was added and the least recently used one was expelled.
    Evicted(K, V),
}

/// Unsynchronized LRU state: the key index and the recency list.
///
/// Every mutation takes `&mut self`; [`LruCache`] provides the locking.
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    cap: NonZeroUsize,
    list: List<(K, V)>,
    map: HashMap<K, usize, S>,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruSegment<K, V, S> {
    /// Creates an empty segment holding at most `cap` entries.
    pub(crate) fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        // One spare slot: a new key is linked before the oldest is expelled.
        let slots = cap.get().saturating_add(1).min(MAX_PREALLOCATED_SLOTS);
        LruSegment {
            cap,
            list: List::with_capacity(slots),
            map: HashMap::with_capacity_and_hasher(slots, hash_builder),
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    /// Number of cached entries.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing is cached.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if `key` is indexed.
    #[inline]
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the value without touching recency.
    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = *self.map.get(key)?;
        self.list.get_value(idx).map(|(_, v)| v)
    }

    /// Returns the value and marks the entry most recently used.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = *self.map.get(key)?;
        self.list.move_to_front(idx);
        self.list.get_value(idx).map(|(_, v)| v)
    }

    /// Inserts or updates `key` at the front, expelling the back entry if
    /// the new key pushed the segment over capacity.
    pub(crate) fn put(&mut self, key: K, value: V) -> PutOutcome<K, V>
    where
        K: Clone,
    {
        if let Some(&idx) = self.map.get(&key) {
            self.list.move_to_front(idx);
            if let Some(entry) = self.list.get_value_mut(idx) {
                entry.1 = value;
            }
            return PutOutcome::Updated;
        }

        let idx = self.list.add((key.clone(), value));
        self.map.insert(key, idx);

        if self.list.len() <= self.cap.get() {
            return PutOutcome::Inserted;
        }

        match self.list.remove_last() {
            Some((old_key, old_value)) => {
                self.map.remove(&old_key);
                PutOutcome::Evicted(old_key, old_value)
            }
            None => PutOutcome::Inserted,
        }
    }

    /// Unlinks `key` and returns its value.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.map.remove(key)?;
        self.list.remove(idx).map(|(_, v)| v)
    }

    /// Drops every entry.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    /// Keys from most to least recently used.
    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|(k, _)| k)
    }

    /// Key that the next eviction would expel.
    pub(crate) fn lru_key(&self) -> Option<&K> {
        self.list.back().map(|(k, _)| k)
    }
}

impl<K, V, S> fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.cap)
            .field("len", &self.list.len())
            .finish()
    }
}

/// A thread-safe, fixed-capacity Least Recently Used cache.
///
/// All methods take `&self`; share the cache between threads with an `Arc`.
/// When a `put` of a new key would push the cache past its capacity, the
/// least recently used entry is expelled and handed to the configured
/// eviction callback, if any.
///
/// # Examples
///
/// ```
/// use sync_lru::LruCache;
/// use core::num::NonZeroUsize;
///
/// let cache = LruCache::with_capacity(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Reading "apple" makes "banana" the least recently used entry.
/// assert_eq!(cache.get(&"apple"), Some(1));
///
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(1));
/// assert_eq!(cache.get(&"cherry"), Some(3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: RwLock<LruSegment<K, V, S>>,
    on_evict: Option<EvictionCallback<K, V>>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V, DefaultHashBuilder> {
    /// Creates a cache with the default capacity of
    /// [`DEFAULT_CAPACITY`](crate::config::DEFAULT_CAPACITY) entries.
    pub fn new() -> Self {
        Self::init(LruCacheConfig::default(), None)
    }

    /// Creates a cache holding at most `cap` entries.
    pub fn with_capacity(cap: NonZeroUsize) -> Self {
        Self::init(LruCacheConfig::new(cap), None)
    }

    /// Creates a cache holding at most `cap` entries, rejecting zero.
    ///
    /// # Example
    ///
    /// ```
    /// use sync_lru::{config::ConfigError, LruCache};
    ///
    /// assert!(LruCache::<u32, u32>::try_with_capacity(8).is_ok());
    /// assert_eq!(
    ///     LruCache::<u32, u32>::try_with_capacity(0).unwrap_err(),
    ///     ConfigError::ZeroCapacity
    /// );
    /// ```
    pub fn try_with_capacity(cap: usize) -> Result<Self, ConfigError> {
        Ok(Self::init(LruCacheConfig::try_new(cap)?, None))
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity and optional eviction callback
    /// * `hasher` - Optional hash builder. If `None`, uses `DefaultHashBuilder`
    ///
    /// # Example
    ///
    /// ```
    /// use sync_lru::config::LruCacheConfig;
    /// use sync_lru::LruCache;
    /// use std::sync::mpsc;
    ///
    /// let (tx, rx) = mpsc::channel();
    /// let tx = std::sync::Mutex::new(tx);
    /// let config = LruCacheConfig::try_new(1)
    ///     .unwrap()
    ///     .with_eviction_callback(move |k: u32, v: String| {
    ///         tx.lock().unwrap().send((k, v)).unwrap();
    ///     });
    /// let cache = LruCache::init(config, None);
    ///
    /// cache.put(1, "one".to_string());
    /// cache.put(2, "two".to_string());
    /// assert_eq!(rx.try_recv().unwrap(), (1, "one".to_string()));
    /// ```
    pub fn init(config: LruCacheConfig<K, V>, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V> Default for LruCache<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a cache from a configuration with a custom hash builder.
    ///
    /// Use this for deterministic hashing or DoS-resistant hashers.
    pub fn init_with_hasher(config: LruCacheConfig<K, V>, hash_builder: S) -> Self {
        debug!(
            "creating LRU cache: capacity={}, eviction_callback={}",
            config.capacity,
            config.on_evict.is_some()
        );
        Self {
            segment: RwLock::new(LruSegment::with_hasher(config.capacity, hash_builder)),
            on_evict: config.on_evict,
            metrics: LruCacheMetrics::new(),
        }
    }

    /// Returns the maximum number of entries the cache holds.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.read().cap()
    }

    /// Returns the number of entries currently cached.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.read().len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.read().is_empty()
    }

    /// Returns `true` if `key` is cached. Does not affect recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.read().contains(key)
    }

    /// Returns a clone of the value for `key` and marks it most recently used.
    ///
    /// Returns `None` if the key is absent, including when another thread
    /// removed or evicted it while this call was between its read and write
    /// phases.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Looks up `key`, marks it most recently used and applies `f` to it.
    ///
    /// Avoids cloning the value. `f` runs while the write lock is held, so it
    /// must not call back into this cache.
    ///
    /// # Example
    ///
    /// ```
    /// use sync_lru::LruCache;
    ///
    /// let cache = LruCache::new();
    /// cache.put("greeting", String::from("hello"));
    /// assert_eq!(cache.get_with(&"greeting", |s| s.len()), Some(5));
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        if !self.segment.read().contains(key) {
            self.metrics.core.record_miss();
            return None;
        }
        self.promote_with(key, f)
    }

    /// Write phase of a lookup: finds `key` again under the write lock.
    ///
    /// The read lock has been dropped by the time this runs, so the key may
    /// already be gone. That case is counted as a stale lookup and a miss.
    fn promote_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let mut segment = self.segment.write();
        match segment.get(key) {
            Some(value) => {
                self.metrics.core.record_hit();
                Some(f(value))
            }
            None => {
                trace!("LRU lookup lost its key before promotion");
                self.metrics.record_stale_lookup();
                None
            }
        }
    }

    /// Returns a clone of the value for `key` without affecting recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.segment.read().peek(key).cloned()
    }

    /// Inserts or overwrites `key`, making it the most recently used entry.
    ///
    /// Overwriting an existing key never evicts. Inserting a new key into a
    /// full cache expels exactly one entry, the least recently used, and
    /// passes it to the eviction callback once the lock has been released.
    pub fn put(&self, key: K, value: V)
    where
        K: Clone,
    {
        let outcome = self.segment.write().put(key, value);
        match outcome {
            PutOutcome::Updated => self.metrics.record_update(),
            PutOutcome::Inserted => self.metrics.core.record_insertion(),
            PutOutcome::Evicted(old_key, old_value) => {
                self.metrics.core.record_insertion();
                self.metrics.core.record_eviction();
                trace!("LRU evicted least recently used entry");
                if let Some(on_evict) = &self.on_evict {
                    on_evict(old_key, old_value);
                }
            }
        }
    }

    /// Removes `key` and returns its value, if present.
    ///
    /// Explicit removal never runs the eviction callback.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let removed = self.segment.write().remove(key);
        if removed.is_some() {
            self.metrics.core.record_removal();
        }
        removed
    }

    /// Drops every entry. The eviction callback is not run.
    pub fn clear(&self) {
        self.segment.write().clear();
    }

    /// Snapshot of the cached keys, most recently used first.
    pub fn keys_mru(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.segment.read().keys().cloned().collect()
    }

    /// Key the next eviction would expel, if the cache is not empty.
    pub fn peek_lru_key(&self) -> Option<K>
    where
        K: Clone,
    {
        self.segment.read().lru_key().cloned()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("LruCache");
        match self.segment.try_read() {
            Some(segment) => d.field("segment", &*segment),
            None => d.field("segment", &"<locked>"),
        };
        d.field("on_evict", &self.on_evict.is_some()).finish()
    }
}
