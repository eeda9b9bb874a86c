//! # Mean-Variance Solver
//!
//! $$
//! \mathbf{w} = -\lambda_1 \Sigma^{-1}\mu - \lambda_2 \Sigma^{-1}\mathbf{1}
//! $$
//!
//! Closed-form two-multiplier Lagrangian solution of the Markowitz problem:
//! minimize portfolio variance subject to full investment and a target
//! expected return. Short positions fall out of the closed form naturally.

use ndarray::Array1;
use ndarray::Array2;
use tracing::debug;

use super::linalg::solver_core;
use super::linalg::SolverCore;
use crate::error::PortfolioError;
use crate::error::Result;

/// Numerical guard-rails for solver construction and weight queries.
#[derive(Clone, Copy, Debug)]
pub struct SolverOptions {
  /// Condition-number ceiling above which the covariance is rejected.
  pub max_condition: f64,
  /// Relative tolerance for the `A·C - B²` degeneracy test.
  pub degeneracy_tolerance: f64,
}

impl Default for SolverOptions {
  fn default() -> Self {
    Self {
      max_condition: 1e12,
      degeneracy_tolerance: 1e-10,
    }
  }
}

/// Minimum-variance weight solver for a given target return.
///
/// The covariance inverse and the Lagrangian scalars are computed once at
/// construction; [`MeanVarianceSolver::get_weight`] returns its result and
/// never mutates solver state, so a shared instance is reentrant.
#[derive(Clone, Debug)]
pub struct MeanVarianceSolver {
  mean: Array1<f64>,
  covariance: Array2<f64>,
  core: SolverCore,
  options: SolverOptions,
}

impl MeanVarianceSolver {
  pub fn new(mean: Array1<f64>, covariance: Array2<f64>) -> Result<Self> {
    Self::with_options(mean, covariance, SolverOptions::default())
  }

  pub fn with_options(
    mean: Array1<f64>,
    covariance: Array2<f64>,
    options: SolverOptions,
  ) -> Result<Self> {
    let core = solver_core(&mean, &covariance, options.max_condition)?;
    debug!(
      assets = mean.len(),
      a = core.a,
      b = core.b,
      c = core.c,
      "constructed mean-variance solver"
    );

    Ok(Self {
      mean,
      covariance,
      core,
      options,
    })
  }

  pub fn mean(&self) -> &Array1<f64> {
    &self.mean
  }

  pub fn covariance(&self) -> &Array2<f64> {
    &self.covariance
  }

  /// Number of assets.
  pub fn len(&self) -> usize {
    self.mean.len()
  }

  pub fn is_empty(&self) -> bool {
    self.mean.is_empty()
  }

  /// Weight vector minimizing `wᵀΣw` subject to `1ᵀw = 1` and
  /// `μᵀw = target_return`.
  ///
  /// The two multipliers solve
  /// `λ2 = (r·B - C) / (A·C - B²)`, `λ1 = -(λ2·B + r) / C` with
  /// `A = 1ᵀΣ⁻¹1`, `B = 1ᵀΣ⁻¹μ`, `C = μᵀΣ⁻¹μ`.
  pub fn get_weight(&self, target_return: f64) -> Result<Array1<f64>> {
    if !target_return.is_finite() {
      return Err(PortfolioError::invalid(
        "target_return",
        "must be a finite number",
      ));
    }

    let SolverCore { a, b, c, .. } = self.core;
    let discriminant = a * c - b * b;
    let scale = (a * c).abs().max(b * b).max(1.0);
    if discriminant.abs() <= self.options.degeneracy_tolerance * scale {
      return Err(PortfolioError::DegenerateFrontier {
        reason: format!(
          "A·C - B² = {discriminant:.3e} vanishes; the mean vector is proportional to 1 under the covariance inner product"
        ),
      });
    }

    let lambda2 = (target_return * b - c) / discriminant;
    let lambda1 = -(lambda2 * b + target_return) / c;
    if !lambda1.is_finite() || !lambda2.is_finite() {
      return Err(PortfolioError::DegenerateFrontier {
        reason: "Lagrange multipliers are not finite for this target return".to_string(),
      });
    }

    Ok(&self.core.inverse_mean * (-lambda1) - &self.core.inverse_ones * lambda2)
  }
}
