use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rangekit::range::ActiveRangeCache;

fn window_cache(pool_size: usize) -> ActiveRangeCache<Vec<u8>> {
    let mut cache = ActiveRangeCache::with_pool_size(pool_size);
    cache.set_create(|indexed, index| {
        let mut payload = indexed
            .dequeue_reusable("buffer")
            .unwrap_or_else(|| vec![0u8; 4096]);
        payload[0] = index as u8;
        Some(payload)
    });
    cache.set_reclaim(|_, _| Some("buffer".to_string()));
    cache
}

fn bench_sliding_window(c: &mut Criterion) {
    c.bench_function("reconcile_sliding_window", |b| {
        b.iter_batched(
            || {
                let mut cache = window_cache(64);
                cache.set_active_range(0..64).unwrap();
                cache
            },
            |mut cache| {
                for start in (8..1024).step_by(8) {
                    cache
                        .set_active_range(std::hint::black_box(start..start + 64))
                        .unwrap();
                }
                cache
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_idempotent_set(c: &mut Criterion) {
    c.bench_function("reconcile_same_range", |b| {
        b.iter_batched(
            || {
                let mut cache = window_cache(8);
                cache.set_active_range(0..64).unwrap();
                cache
            },
            |mut cache| {
                for _ in 0..1024 {
                    cache.set_active_range(std::hint::black_box(0..64)).unwrap();
                }
                cache
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_sliding_window, bench_idempotent_set);
criterion_main!(benches);
