//! Basic LRU cache usage.
//!
//! Builds a default cache, stores a few strings, reads one back and then
//! shows an eviction reaching the callback.
//!
//! Run with: RUST_LOG=trace cargo run --example basic_usage

use std::num::NonZeroUsize;
use sync_lru::config::LruCacheConfig;
use sync_lru::metrics::CacheMetrics;
use sync_lru::LruCache;

fn main() {
    env_logger::init();

    let cache = LruCache::new();

    cache.put("aa", "AA".to_string());
    cache.put("bb", "BB".to_string());
    cache.put("cc", "CC".to_string());

    match cache.get(&"cc") {
        Some(value) => println!("result: {value}"),
        None => {
            println!("cache missing");
            return;
        }
    }

    // A two-entry cache that reports what it expels.
    let config = LruCacheConfig::new(NonZeroUsize::new(2).expect("non-zero literal"))
        .with_eviction_callback(|key: &'static str, value: u32| {
            println!("expelled {key} => {value}");
        });
    let small = LruCache::init(config, None);
    small.put("first", 1);
    small.put("second", 2);
    let _ = small.get(&"first");
    small.put("third", 3); // expels "second"

    println!("order (most recent first): {:?}", small.keys_mru());
    for (name, value) in small.metrics() {
        println!("{name:>12}: {value}");
    }
}
