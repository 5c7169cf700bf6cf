//! Criterion benchmarks for the GBM Monte Carlo engine.
//!
//! Benchmarks cover:
//! - RNG performance
//! - Sequential vs parallel path generation (1K, 10K, 100K paths)
//! - Aggregation and downsampling of a filled matrix

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::SimulationParameters;
use pricer_pricing::mc::{
    aggregate_for, downsample, generate_sequential, FinalPrices, GbmStep, ParallelGenerator,
    PathMatrix,
};
use pricer_pricing::rng::PricerRng;

const N_STEPS: usize = 50;

fn params(n_paths: usize) -> SimulationParameters {
    SimulationParameters::builder()
        .asset_price(100.0)
        .strike_price(100.0)
        .time_to_expiration(1.0)
        .volatility(0.2)
        .interest_rate(0.05)
        .num_paths(n_paths)
        .num_steps(N_STEPS)
        .seed(42)
        .build()
        .unwrap()
}

/// Benchmark RNG generation (foundation for MC simulations).
fn bench_rng_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = PricerRng::from_seed(42);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark both generators on identical inputs.
fn bench_path_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_generation");
    group.sample_size(20);

    for n_paths in [1_000, 10_000, 100_000] {
        let params = params(n_paths);
        let step = GbmStep::new(&params);

        group.bench_with_input(
            BenchmarkId::new("sequential", n_paths),
            &n_paths,
            |b, &n| {
                let mut matrix = PathMatrix::zeros(N_STEPS, n);
                b.iter(|| {
                    generate_sequential(&step, 42, &mut matrix);
                    black_box(matrix.get(N_STEPS - 1, 0))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", n_paths),
            &n_paths,
            |b, &n| {
                let generator = ParallelGenerator::new();
                let mut matrix = PathMatrix::zeros(N_STEPS, n);
                b.iter(|| {
                    generator.generate(&step, 42, &mut matrix).unwrap();
                    black_box(matrix.get(N_STEPS - 1, 0))
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the post-processing of a 100K-path run.
fn bench_post_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("post_processing");

    let params = params(100_000);
    let mut matrix = PathMatrix::zeros(N_STEPS, 100_000);
    generate_sequential(&GbmStep::new(&params), 42, &mut matrix);
    let finals = FinalPrices::from_matrix(&matrix);

    group.bench_function("aggregate_100k", |b| {
        b.iter(|| black_box(aggregate_for(&params, finals.as_slice()).unwrap()))
    });

    group.bench_function("downsample_100k", |b| {
        b.iter(|| black_box(downsample(&matrix)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rng_generation,
    bench_path_generation,
    bench_post_processing
);
criterion_main!(benches);
