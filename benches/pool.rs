use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use dicepool::{constant, d, nd, pair, pool, reroll, Distribution};

fn count_hits(count: u32, face: &i64) -> u32 {
    count + u32::from(*face >= 5)
}

fn keep_top_three(mut kept: Vec<i64>, face: &i64) -> Vec<i64> {
    kept.push(*face);
    kept.sort_unstable_by(|a, b| b.cmp(a));
    kept.truncate(3);
    kept
}

fn bench_pool_collapsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool/count_hits");
    for count in [12usize, 100, 300] {
        let dice = nd(count, 6).unwrap();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &dice, |b, dice| {
            b.iter(|| pool(count_hits, 0u32, black_box(dice)));
        });
    }
    group.finish();
}

fn bench_pool_keep_highest(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool/keep_top_three");
    for count in [5usize, 10, 20] {
        let dice = nd(count, 10).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(count), &dice, |b, dice| {
            b.iter(|| pool(keep_top_three, Vec::new(), black_box(dice)));
        });
    }
    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_par_pool(c: &mut Criterion) {
    let config = dicepool::EngineConfig::default();
    let dice = nd(20, 10).unwrap();
    c.bench_function("pool/keep_top_three_parallel/20", |b| {
        b.iter(|| {
            dicepool::par_pool(&config, keep_top_three, Vec::new(), black_box(&dice)).unwrap()
        });
    });
}

#[cfg(not(feature = "parallel"))]
fn bench_par_pool(_: &mut Criterion) {}

fn bench_pair_and_reroll(c: &mut Criterion) {
    c.bench_function("pair/d100xd100", |b| {
        let d100 = d(100).unwrap();
        b.iter(|| pair(|x, y| x + y, black_box(&d100), black_box(&d100)));
    });

    c.bench_function("reroll/exploding_d20", |b| {
        // Setup excluded from timing.
        b.iter_custom(|iters| {
            let d20 = d(20).unwrap();
            let start = Instant::now();
            for _ in 0..iters {
                let exploded: Distribution<i64> = reroll(
                    |face| {
                        if *face == 20 {
                            d20.interpret(|extra| 20 + extra)
                        } else {
                            constant(*face)
                        }
                    },
                    black_box(&d20),
                );
                black_box(exploded);
            }
            start.elapsed()
        });
    });
}

criterion_group!(
    benches,
    bench_pool_collapsing,
    bench_pool_keep_highest,
    bench_par_pool,
    bench_pair_and_reroll
);
criterion_main!(benches);
