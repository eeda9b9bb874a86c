//! # Efficient Frontier
//!
//! $$
//! \{(\sigma_p(r), \mu_p(r)) : r \in [\min\mu, \max\mu]\}
//! $$
//!
//! Drives the mean-variance solver across a linear grid of target returns
//! and yields the (risk, return) curve. Rendering the curve is a consumer
//! concern; this module only produces the points.

use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;

use super::mean_variance::MeanVarianceSolver;
use super::statistics::portfolio_statistics;
use crate::error::PortfolioError;
use crate::error::Result;

/// Grid size used when callers have no opinion.
pub const DEFAULT_STEPS: usize = 100;

/// One sampled frontier point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontierPoint {
  /// Portfolio standard deviation at the sampled target.
  pub std_dev: f64,
  /// Achieved portfolio mean return (equals the sampled target).
  pub mean: f64,
}

/// Target-return sweep over `[min μ, max μ]` with `steps + 1` samples.
///
/// The sweep borrows the solver, so the precomputed inverse is shared by
/// every sample. Points come out in increasing-target order and re-running
/// an identical sweep reproduces identical points.
#[derive(Clone, Copy, Debug)]
pub struct FrontierSweep<'a> {
  solver: &'a MeanVarianceSolver,
  steps: usize,
  lowest: f64,
  highest: f64,
}

impl<'a> FrontierSweep<'a> {
  pub fn new(solver: &'a MeanVarianceSolver, steps: usize) -> Result<Self> {
    if steps == 0 {
      return Err(PortfolioError::invalid("steps", "must be at least 1"));
    }

    let lowest = solver.mean().iter().copied().fold(f64::INFINITY, f64::min);
    let highest = solver
      .mean()
      .iter()
      .copied()
      .fold(f64::NEG_INFINITY, f64::max);

    Ok(Self {
      solver,
      steps,
      lowest,
      highest,
    })
  }

  pub fn steps(&self) -> usize {
    self.steps
  }

  /// Sampled target return at grid index `idx`.
  fn target(&self, idx: usize) -> f64 {
    self.lowest + (idx as f64 / self.steps as f64) * (self.highest - self.lowest)
  }

  fn point(&self, idx: usize) -> Result<FrontierPoint> {
    let weight = self.solver.get_weight(self.target(idx))?;
    let moments = portfolio_statistics(&weight, self.solver.mean(), self.solver.covariance())?;

    Ok(FrontierPoint {
      std_dev: moments.std_dev(),
      mean: moments.mean,
    })
  }

  /// Lazy iterator over the frontier points; can be restarted by calling
  /// `points()` again.
  pub fn points(&self) -> FrontierIter<'_> {
    FrontierIter {
      sweep: self,
      idx: 0,
    }
  }

  /// Eagerly collect the whole curve.
  pub fn collect(&self) -> Result<Vec<FrontierPoint>> {
    self.points().collect()
  }

  /// Collect the curve on the rayon pool. Each target is independent, so
  /// samples run in parallel and are reassembled in increasing-target order.
  pub fn collect_par(&self) -> Result<Vec<FrontierPoint>> {
    (0..=self.steps)
      .into_par_iter()
      .map(|idx| self.point(idx))
      .collect()
  }
}

/// Iterator state for a lazy frontier traversal.
#[derive(Clone, Debug)]
pub struct FrontierIter<'a> {
  sweep: &'a FrontierSweep<'a>,
  idx: usize,
}

impl Iterator for FrontierIter<'_> {
  type Item = Result<FrontierPoint>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.idx > self.sweep.steps {
      return None;
    }

    let point = self.sweep.point(self.idx);
    self.idx += 1;
    Some(point)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = self.sweep.steps + 1 - self.idx;
    (remaining, Some(remaining))
  }
}

impl ExactSizeIterator for FrontierIter<'_> {}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;

  use super::*;

  fn solver() -> MeanVarianceSolver {
    let mean = array![0.01, 0.02];
    let cov = array![[4e-4, 1e-4], [1e-4, 9e-4]];
    MeanVarianceSolver::new(mean, cov).unwrap()
  }

  #[test]
  fn sweep_produces_steps_plus_one_ordered_points() {
    let solver = solver();
    let sweep = FrontierSweep::new(&solver, 40).unwrap();
    let points = sweep.collect().unwrap();

    assert_eq!(points.len(), 41);
    assert_abs_diff_eq!(points[0].mean, 0.01, epsilon = 1e-9);
    assert_abs_diff_eq!(points[40].mean, 0.02, epsilon = 1e-9);
    for pair in points.windows(2) {
      assert!(pair[1].mean > pair[0].mean);
    }
    assert!(points.iter().all(|p| p.std_dev.is_finite()));
  }

  #[test]
  fn sweep_is_deterministic_and_restartable() {
    let solver = solver();
    let sweep = FrontierSweep::new(&solver, 25).unwrap();

    let first = sweep.collect().unwrap();
    let second = sweep.collect().unwrap();
    assert_eq!(first, second);

    // A fresh iterator restarts from the lowest target.
    let mut iter = sweep.points();
    let head = iter.next().unwrap().unwrap();
    assert_eq!(head, first[0]);
  }

  #[test]
  fn parallel_sweep_matches_serial_sweep() {
    let solver = solver();
    let sweep = FrontierSweep::new(&solver, DEFAULT_STEPS).unwrap();

    let serial = sweep.collect().unwrap();
    let parallel = sweep.collect_par().unwrap();
    assert_eq!(serial.len(), DEFAULT_STEPS + 1);
    assert_eq!(serial, parallel);
  }

  #[test]
  fn frontier_risk_dips_at_the_minimum_variance_point() {
    let solver = solver();
    let sweep = FrontierSweep::new(&solver, 50).unwrap();
    let points = sweep.collect().unwrap();

    // Risk at both frontier ends exceeds the interior minimum.
    let min_risk = points
      .iter()
      .map(|p| p.std_dev)
      .fold(f64::INFINITY, f64::min);
    assert!(points[0].std_dev > min_risk);
    assert!(points[50].std_dev > min_risk);
  }

  #[test]
  fn zero_steps_is_rejected() {
    let solver = solver();
    assert!(matches!(
      FrontierSweep::new(&solver, 0),
      Err(PortfolioError::InvalidParameter { .. })
    ));
  }
}
