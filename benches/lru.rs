use lrukit::policy::lru::LruCache;
use lrukit::traits::LruCacheTrait;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn filled(capacity: u64) -> LruCache<u64, u64> {
    let mut cache = LruCache::new(capacity as usize);
    for i in 0..capacity {
        cache.put(i, i);
    }
    cache
}

fn bench_lru_put_get(c: &mut Criterion) {
    c.bench_function("lru_put_get", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.put(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_get_hotset(c: &mut Criterion) {
    c.bench_function("lru_get_hotset", |b| {
        b.iter_batched(
            || filled(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.put(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_random_mix(c: &mut Criterion) {
    c.bench_function("lru_random_mix", |b| {
        b.iter_batched(
            || (filled(1024), SmallRng::seed_from_u64(7)),
            |(mut cache, mut rng)| {
                for _ in 0..4096 {
                    let key = rng.random::<u64>() % 2048;
                    if rng.random::<u8>() < 64 {
                        cache.put(key, key);
                    } else {
                        let _ = std::hint::black_box(cache.get(&key));
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_recency_rank(c: &mut Criterion) {
    let cache = filled(1024);
    c.bench_function("lru_recency_rank", |b| {
        b.iter(|| std::hint::black_box(cache.recency_rank(&std::hint::black_box(512))))
    });
}

criterion_group!(
    benches,
    bench_lru_put_get,
    bench_lru_get_hotset,
    bench_lru_eviction_churn,
    bench_lru_random_mix,
    bench_lru_recency_rank
);
criterion_main!(benches);
