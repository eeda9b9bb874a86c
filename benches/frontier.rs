use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use frontier_rs::portfolio::FrontierSweep;
use frontier_rs::portfolio::MeanVarianceSolver;
use ndarray::Array1;
use ndarray::Array2;

/// Diagonally dominant covariance with a strictly increasing mean vector,
/// invertible and non-degenerate for any universe size.
fn synthetic_solver(n: usize) -> MeanVarianceSolver {
  let mean = Array1::from_shape_fn(n, |i| 0.005 + 1e-4 * i as f64);
  let covariance = Array2::from_shape_fn((n, n), |(i, j)| {
    if i == j {
      1e-3 + 1e-5 * i as f64
    } else {
      1e-5
    }
  });

  MeanVarianceSolver::new(mean, covariance).unwrap()
}

fn bench_sweep(c: &mut Criterion) {
  let mut group = c.benchmark_group("frontier_sweep");

  for n in [10usize, 50, 200] {
    let solver = synthetic_solver(n);

    group.bench_with_input(BenchmarkId::new("serial", n), &solver, |b, solver| {
      b.iter(|| FrontierSweep::new(solver, 100).unwrap().collect().unwrap())
    });

    group.bench_with_input(BenchmarkId::new("parallel", n), &solver, |b, solver| {
      b.iter(|| FrontierSweep::new(solver, 100).unwrap().collect_par().unwrap())
    });
  }

  group.finish();
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
