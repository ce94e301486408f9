//! Benchmarks for the block-sparse products, serial against rayon

use blocksparse::{BlockSparseMatrix, BlockStructureBuilder, EngineConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

/// Bundle-adjustment shaped matrix: 2-row residual blocks touching one
/// 9-column camera block and one 3-column point block
fn bundle_matrix(num_cameras: usize, num_points: usize, config: EngineConfig) -> BlockSparseMatrix {
    let mut rng = StdRng::seed_from_u64(7);
    let sizes: Vec<usize> = std::iter::repeat(9)
        .take(num_cameras)
        .chain(std::iter::repeat(3).take(num_points))
        .collect();

    let mut builder = BlockStructureBuilder::new(&sizes).unwrap();
    for point in 0..num_points {
        for _ in 0..4 {
            let camera = rng.gen_range(0..num_cameras);
            builder = builder
                .with_row(2, &[camera, num_cameras + point])
                .unwrap();
        }
    }

    let mut m = BlockSparseMatrix::new_with_config(builder.build(), config).unwrap();
    for v in m.values_mut() {
        *v = rng.gen_range(-1.0..1.0);
    }
    m
}

fn bench_right_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("right_multiply");

    for &num_points in &[1_000, 10_000] {
        for (label, config) in [
            ("serial", EngineConfig::serial()),
            ("parallel", EngineConfig::default()),
        ] {
            let m = bundle_matrix(50, num_points, config);
            let x = vec![1.0; m.num_cols()];
            group.throughput(Throughput::Elements(m.num_nonzeros() as u64));
            group.bench_with_input(BenchmarkId::new(label, num_points), &m, |b, m| {
                let mut y = vec![0.0; m.num_rows()];
                b.iter(|| m.right_multiply(black_box(&x), black_box(&mut y)))
            });
        }
    }

    group.finish();
}

fn bench_left_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("left_multiply");

    for &num_points in &[1_000, 10_000] {
        for (label, config) in [
            ("serial", EngineConfig::serial()),
            ("parallel", EngineConfig::default()),
        ] {
            let m = bundle_matrix(50, num_points, config);
            let x = vec![1.0; m.num_rows()];
            group.throughput(Throughput::Elements(m.num_nonzeros() as u64));
            group.bench_with_input(BenchmarkId::new(label, num_points), &m, |b, m| {
                let mut y = vec![0.0; m.num_cols()];
                b.iter(|| m.left_multiply(black_box(&x), black_box(&mut y)))
            });
        }
    }

    group.finish();
}

fn bench_squared_column_norm(c: &mut Criterion) {
    let mut group = c.benchmark_group("squared_column_norm");

    for (label, config) in [
        ("serial", EngineConfig::serial()),
        ("parallel", EngineConfig::default()),
    ] {
        let m = bundle_matrix(50, 10_000, config);
        group.bench_function(label, |b| {
            let mut norms = vec![0.0; m.num_cols()];
            b.iter(|| m.squared_column_norm(black_box(&mut norms)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_right_multiply,
    bench_left_multiply,
    bench_squared_column_norm
);
criterion_main!(benches);
