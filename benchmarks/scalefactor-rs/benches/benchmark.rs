//! Scale-factor benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Table lookups (in range and fallback) over table sizes
//! - Folding long factor sequences
//! - Curve conversion with overlapping and gapped segments
//! - Event weighting with realistic lepton multiplicities
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use scalefactor_rs::prelude::*;
use std::hint::black_box;
use std::sync::Arc;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate an `n x n` table over pt in [10, 500] and |eta| in [0, 2.5].
fn generate_table(n: usize, seed: u64) -> ScaleFactorTable<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let value_dist = Normal::new(0.97, 0.02).unwrap();
    let error_dist = Uniform::new(0.005, 0.03).unwrap();

    let values: Vec<f64> = (0..n * n).map(|_| value_dist.sample(&mut rng)).collect();
    let errors: Vec<f64> = (0..n * n).map(|_| error_dist.sample(&mut rng)).collect();

    ScaleFactorTable::from_values(
        BinAxis::uniform(n, 10.0, 500.0).unwrap(),
        BinAxis::uniform(n, 0.0, 2.5).unwrap(),
        &values,
        &errors,
    )
    .unwrap()
}

/// Generate query coordinates, a share of them outside the table.
fn generate_queries(size: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pt_dist = Uniform::new(5.0, 800.0).unwrap();
    let eta_dist = Uniform::new(-3.0, 3.0).unwrap();
    (0..size)
        .map(|_| (pt_dist.sample(&mut rng), eta_dist.sample(&mut rng)))
        .collect()
}

/// Generate a curve stitched from segments that overlap and leave gaps.
fn generate_curve(size: usize, seed: u64) -> Vec<CurvePoint<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let width_dist = Uniform::new(0.05, 0.3).unwrap();
    let jitter_dist = Normal::new(0.0, 0.05).unwrap();
    let value_dist: Normal<f64> = Normal::new(1.0, 0.05).unwrap();

    (0..size)
        .map(|i| {
            let x = i as f64 * 0.2 + jitter_dist.sample(&mut rng);
            CurvePoint {
                x,
                ex_low: width_dist.sample(&mut rng),
                ex_high: width_dist.sample(&mut rng),
                y: value_dist.sample(&mut rng).abs(),
                ey_low: 0.01,
                ey_high: rng.random_range(0.005..0.05),
            }
        })
        .collect()
}

/// Generate events with one to four leptons.
fn generate_events(size: usize, seed: u64) -> Vec<Vec<(&'static str, f64, f64, bool)>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pt_dist = Uniform::new(10.0, 300.0).unwrap();
    let eta_dist = Uniform::new(-2.5, 2.5).unwrap();

    (0..size)
        .map(|_| {
            let n = rng.random_range(1..=4);
            (0..n)
                .map(|_| {
                    let kind = if rng.random_bool(0.5) { "muon" } else { "electron" };
                    (
                        kind,
                        pt_dist.sample(&mut rng),
                        eta_dist.sample(&mut rng),
                        rng.random_bool(0.8),
                    )
                })
                .collect()
        })
        .collect()
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.sample_size(100);

    let queries = generate_queries(10_000, 7);

    for n in [4, 16, 64, 256] {
        let table = generate_table(n, 42);
        group.throughput(Throughput::Elements(queries.len() as u64));

        group.bench_with_input(BenchmarkId::new("clamp_empty", n), &n, |b, _| {
            b.iter(|| {
                queries
                    .iter()
                    .map(|&(x, y)| table.lookup(black_box(x), black_box(y.abs()), false))
                    .product::<ScaleFactor<f64>>()
            })
        });

        group.bench_with_input(BenchmarkId::new("clamp", n), &n, |b, _| {
            b.iter(|| {
                queries
                    .iter()
                    .map(|&(x, y)| {
                        table.lookup_with(black_box(x), black_box(y.abs()), false, OverflowPolicy::Clamp)
                    })
                    .product::<ScaleFactor<f64>>()
            })
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    group.sample_size(100);

    for size in [10, 1_000, 100_000] {
        let mut rng = StdRng::seed_from_u64(size as u64);
        let factors: Vec<ScaleFactor<f64>> = (0..size)
            .map(|_| ScaleFactor::new(rng.random_range(0.9..1.1), rng.random_range(0.0..0.05)))
            .collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("fold", size), &size, |b, _| {
            b.iter(|| merge_all(black_box(&factors).iter().copied()))
        });
    }
    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    group.sample_size(50);

    let converter = CurveConverter::builder()
        .max_passes(1_000_000)
        .build()
        .unwrap();

    for size in [10, 50, 200] {
        let curve = generate_curve(size, 42);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("stitched", size), &size, |b, _| {
            b.iter(|| converter.convert_curve(black_box(&curve)).unwrap())
        });
    }
    group.finish();
}

fn bench_event_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_weights");
    group.sample_size(50);

    let id = Arc::new(generate_table(16, 1));
    let iso = Arc::new(generate_table(8, 2));
    let eta_curve = Arc::new(
        CurveConverter::builder()
            .build()
            .unwrap()
            .convert_curve(&generate_curve(20, 3))
            .unwrap(),
    );

    let muon = ObjectRecipe::builder()
        .table(id.clone(), QueryMapping::AbsSecond)
        .systematic(0.03)
        .table(iso, QueryMapping::AbsSecond)
        .systematic(0.03)
        .build()
        .unwrap();
    let electron = ObjectRecipe::builder()
        .table(id, QueryMapping::AbsSecond)
        .table(eta_curve, QueryMapping::AbsSecond)
        .windowed_systematic(20.0, 80.0, 0.0, 0.01)
        .build()
        .unwrap();
    let weighter = EventWeighter::new().with_branch(
        WeightBranch::new("full")
            .with_recipe("muon", muon)
            .with_recipe("electron", electron),
    );

    for size in [1_000, 10_000] {
        let events = generate_events(size, 42);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| {
                let mut total = 0.0;
                for event in &events {
                    let objects: Vec<_> = event
                        .iter()
                        .map(|&(kind, pt, eta, sel)| ObjectCandidate::new(kind, pt, eta, sel))
                        .collect();
                    total += weighter.weigh("full", black_box(&objects)).unwrap().weight;
                }
                total
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_lookup,
    bench_merge,
    bench_conversion,
    bench_event_weights,
);

criterion_main!(benches);
