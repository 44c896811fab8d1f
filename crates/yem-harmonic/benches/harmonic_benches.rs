//! Criterion benchmarks for the harmonic cache.
//!
//! Covers: cold extension, warm lookups, and random lookups inside the
//! cached range.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

use yem_core::amount::Money;
use yem_harmonic::HarmonicCache;

fn bench_cold_extension(c: &mut Criterion) {
    c.bench_function("harmonic_cold_256", |b| {
        b.iter(|| {
            let cache: HarmonicCache<Money> = HarmonicCache::new();
            cache.reciprocals_to(black_box(256))
        })
    });
}

fn bench_warm_lookup(c: &mut Criterion) {
    let cache: HarmonicCache<Money> = HarmonicCache::new();
    cache.reciprocals_to(1024).unwrap();

    c.bench_function("harmonic_warm_lookup", |b| {
        b.iter(|| cache.reciprocals_to(black_box(512)))
    });
}

fn bench_random_lookup(c: &mut Criterion) {
    let cache: HarmonicCache<Money> = HarmonicCache::new();
    cache.reciprocals_to(1024).unwrap();
    let mut rng = rand::thread_rng();
    let queries: Vec<usize> = (0..1024).map(|_| rng.gen_range(0..=1024)).collect();

    c.bench_function("harmonic_random_lookup", |b| {
        b.iter(|| {
            for &n in &queries {
                black_box(cache.reciprocals_to(n).ok());
            }
        })
    });
}

criterion_group!(benches, bench_cold_extension, bench_warm_lookup, bench_random_lookup);
criterion_main!(benches);
