//! Set-operation benchmarks.
//!
//! These benchmarks measure the four family operations under realistic
//! workload patterns, including the effect of operation cache sizes.
//!
//! Run with:
//! ```bash
//! cargo bench --bench ops
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use ydd_rs::engine::{CacheSizes, Engine};
use ydd_rs::reference::Ydd;

// ============================================================================
// Helper: Random Families
// ============================================================================

/// Build a random family of `num_subsets` subsets drawn from `universe` keys.
fn build_random_family(engine: &Engine<u32>, universe: u32, num_subsets: usize, seed: u64) -> Ydd<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut family = engine.zero();
    for _ in 0..num_subsets {
        let len = rng.random_range(1..=6);
        let subset: Vec<u32> = (0..len).map(|_| rng.random_range(1..=universe)).collect();
        family = engine.union(&family, &engine.subset_of(subset));
    }
    family
}

/// Drive a mixed operation workload over a pool of random families.
fn churn(engine: &Engine<u32>, num_ops: usize, seed: u64) -> u64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut pool: Vec<Ydd<u32>> = (0..8)
        .map(|i| build_random_family(engine, 24, 16, seed ^ i))
        .collect();

    for _ in 0..num_ops {
        let i = rng.random_range(0..pool.len());
        let j = rng.random_range(0..pool.len());
        if i == j {
            continue;
        }

        let result = match rng.random_range(0..4) {
            0 => engine.union(&pool[i], &pool[j]),
            1 => engine.intersection(&pool[i], &pool[j]),
            2 => engine.difference(&pool[i], &pool[j]),
            _ => engine.symmetric_difference(&pool[i], &pool[j]),
        };

        pool[i] = result;
    }

    pool.iter().map(|f| f.size()).sum()
}

// ============================================================================
// Benchmark: Mixed operations with different cache sizes
// ============================================================================

fn bench_churn_cache_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("ydd/churn_cache_size");

    let num_ops = 500;

    for cache_size in [1, 80, 512, 4096] {
        group.bench_with_input(
            BenchmarkId::new(format!("ops={}", num_ops), cache_size),
            &cache_size,
            |b, &cache_size| {
                b.iter(|| {
                    let engine: Engine<u32> =
                        Engine::with_cache_sizes(CacheSizes::uniform(cache_size));
                    churn(&engine, num_ops, 42)
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Benchmark: Incremental union (state-space accumulation pattern)
// ============================================================================

fn bench_incremental_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("ydd/incremental_union");

    for num_subsets in [64, 256, 1024] {
        group.bench_with_input(
            BenchmarkId::new("subsets", num_subsets),
            &num_subsets,
            |b, &num_subsets| {
                b.iter(|| {
                    let engine: Engine<u32> = Engine::new();
                    build_random_family(&engine, 48, num_subsets, 7)
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Benchmark: Repeated operands (tests cache effectiveness)
// ============================================================================

fn bench_repeated_operands(c: &mut Criterion) {
    let mut group = c.benchmark_group("ydd/repeated_operands");

    for cache_size in [1, 512] {
        group.bench_with_input(
            BenchmarkId::new("repeats=100", cache_size),
            &cache_size,
            |b, &cache_size| {
                b.iter(|| {
                    let engine: Engine<u32> =
                        Engine::with_cache_sizes(CacheSizes::uniform(cache_size));
                    let a = build_random_family(&engine, 24, 32, 1);
                    let b_ = build_random_family(&engine, 24, 32, 2);

                    let mut total = 0u64;
                    for _ in 0..100 {
                        total = total.wrapping_add(engine.intersection(&a, &b_).size());
                        total = total.wrapping_add(engine.difference(&a, &b_).size());
                    }
                    total
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_churn_cache_size,
    bench_incremental_union,
    bench_repeated_operands
);
criterion_main!(benches);
