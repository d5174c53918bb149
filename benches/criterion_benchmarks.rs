//! Single-Threaded Cache Benchmarks
//!
//! Cost of each cache operation with no contention on the lock.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::num::NonZeroUsize;
use sync_lru::config::LruCacheConfig;
use sync_lru::LruCache;

fn make_lru(cap: usize) -> LruCache<usize, usize> {
    LruCache::with_capacity(NonZeroUsize::new(cap).unwrap())
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Cache Operations");

    {
        let cache = make_lru(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU peek", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.peek(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    cache.put(i % CACHE_SIZE, i);
                }
            });
        });
    }

    {
        let cache = make_lru(CACHE_SIZE);
        let mut next = 0usize;
        group.bench_function("LRU put evicting", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    cache.put(next, next);
                    next += 1;
                }
            });
        });
    }

    {
        let config = LruCacheConfig::try_new(CACHE_SIZE)
            .unwrap()
            .with_eviction_callback(|k: usize, v: usize| {
                black_box((k, v));
            });
        let cache = LruCache::init(config, None);
        let mut next = 0usize;
        group.bench_function("LRU put evicting with callback", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    cache.put(next, next);
                    next += 1;
                }
            });
        });
    }

    {
        let cache = make_lru(CACHE_SIZE);
        group.bench_function("LRU put then remove", |b| {
            b.iter(|| {
                for i in 0..100 {
                    cache.put(i, i);
                    black_box(cache.remove(&i));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
