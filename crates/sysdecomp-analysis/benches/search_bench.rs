use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::Array2;

use sysdecomp_analysis::search::{EdgeCutSearch, ExactSearch};
use sysdecomp_analysis::tensor::product_tensor;
use sysdecomp_analysis::DistanceMetric;
use sysdecomp_core::{BinaryDistribution, TransitionMatrix};
use test_fixtures::load_system;

fn system(name: &str) -> (TransitionMatrix, BinaryDistribution) {
    let fixture = load_system(name);
    (
        TransitionMatrix::from_rows(fixture.matrix).unwrap(),
        fixture.binary_distribution.parse().unwrap(),
    )
}

/// Deterministic 4-cause, 4-effect system: effect `e` copies cause `e` with noise.
fn noisy_copy_4x4() -> TransitionMatrix {
    let mut data = Array2::zeros((16, 8));
    for row in 0..16 {
        for effect in 0..4 {
            let on = if (row >> effect) & 1 == 1 { 0.9 } else { 0.2 };
            data[[row, 2 * effect]] = 1.0 - on;
            data[[row, 2 * effect + 1]] = on;
        }
    }
    TransitionMatrix::new(data).unwrap()
}

fn bench_exact_search(c: &mut Criterion) {
    let search = ExactSearch::new(DistanceMetric::default());
    let (xor, xor_state) = system("xor_2x2");
    c.bench_function("exact_xor_2x2", |b| {
        b.iter(|| search.search(&xor, &xor_state).unwrap());
    });

    let (separable, separable_state) = system("separable_3x3");
    c.bench_function("exact_separable_3x3", |b| {
        b.iter(|| search.search(&separable, &separable_state).unwrap());
    });
}

fn bench_edge_cut(c: &mut Criterion) {
    let matrix = noisy_copy_4x4();
    let state: BinaryDistribution = "1010".parse().unwrap();
    let search = EdgeCutSearch::default();
    c.bench_function("edge_cut_4x4", |b| {
        b.iter(|| search.search(&matrix, &state, 4, 4).unwrap());
    });
}

fn bench_product_tensor(c: &mut Criterion) {
    let matrix = noisy_copy_4x4();
    c.bench_function("product_tensor_4x4_all_rows", |b| {
        b.iter(|| product_tensor(matrix.view(), None).unwrap());
    });
}

criterion_group!(benches, bench_exact_search, bench_edge_cut, bench_product_tensor);
criterion_main!(benches);
