//! Benchmarks for the PaCo co-clusterer
//!
//! Run with: cargo bench --bench paco_benchmarks
//! Loads data/interactions.npy when present, otherwise a synthetic planted matrix.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use paco_cocluster::paco::{BlockCounts, ClusterArena};
use paco_cocluster::{PacoCoclusterer, PacoConfig};
use std::path::Path;
use std::time::Duration;

fn load_matrix(n_rows: usize, n_cols: usize) -> Array2<f64> {
    let data_path = Path::new("data/interactions.npy");
    if data_path.exists() {
        if let Ok(array) = ndarray_npy::read_npy::<_, Array2<f64>>(data_path) {
            return array;
        }
        eprintln!("Failed to load {}, using synthetic data", data_path.display());
    }

    let mut rng = StdRng::seed_from_u64(42);
    let noise = Array2::random_using((n_rows, n_cols), Uniform::new(0.0, 1.0), &mut rng);
    Array2::from_shape_fn((n_rows, n_cols), |(i, j)| {
        let p = if (i * 4 / n_rows) == (j * 4 / n_cols) { 0.6 } else { 0.02 };
        if noise[(i, j)] < p {
            1.0
        } else {
            0.0
        }
    })
}

fn bench_block_initialization(c: &mut Criterion) {
    let matrix = load_matrix(2000, 1000);
    let (n_rows, n_cols) = matrix.dim();
    let k = 20;
    let rows = ClusterArena::from_labels(&(0..n_rows).map(|i| i % k).collect::<Vec<_>>(), k)
        .unwrap();
    let cols = ClusterArena::from_labels(&(0..n_cols).map(|j| j % k).collect::<Vec<_>>(), k)
        .unwrap();

    let mut group = c.benchmark_group("block_initialization");
    for parallel in [false, true] {
        group.bench_with_input(
            BenchmarkId::from_parameter(if parallel { "parallel" } else { "sequential" }),
            &parallel,
            |b, &parallel| {
                b.iter(|| {
                    BlockCounts::initialize(black_box(matrix.view()), &rows, &cols, parallel)
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let matrix = load_matrix(1000, 500);

    let mut group = c.benchmark_group("paco_run");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(30));

    for k in [5, 10, 20] {
        let config = PacoConfig::new(k, k, 0.008).with_seed(42);
        let paco = PacoCoclusterer::new(config).unwrap();
        group.bench_with_input(BenchmarkId::new("kmeans", k), &k, |b, _| {
            b.iter(|| paco.run(black_box(&matrix)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_block_initialization, bench_full_run);
criterion_main!(benches);
