use criterion::{criterion_group, criterion_main, Criterion};

use anarchy_rng::*;

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("prng", |b| {
        let mut x = 0u64;
        b.iter(|| {
            x = prng(x, 373891);
            x
        })
    });

    c.bench_function("uniform", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            uniform(seed)
        })
    });

    c.bench_function("cohort_shuffle", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i = (i + 1) % 1024;
            cohort_shuffle(i, 1024, 478273827)
        })
    });

    c.bench_function("distribution_segment", |b| {
        let mut index = 0u64;
        b.iter(|| {
            index = (index + 1) % 100_000;
            distribution_segment(index, 100_000, 64, 2000, 0.5, 9001)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
