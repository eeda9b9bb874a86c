//! # Risk-Averse Solver
//!
//! $$
//! \max_{\mathbf{w}} \ \mu^\top \mathbf{w} - \gamma\, \mathbf{w}^\top \Sigma \mathbf{w}
//! \quad \text{s.t.} \quad \mathbf{1}^\top \mathbf{w} = 1
//! $$
//!
//! Closed-form utility maximizer for a risk-aversion coefficient `γ > 0`.
//! Larger `γ` pulls the solution toward the global-minimum-variance
//! portfolio `Σ⁻¹1 / (1ᵀΣ⁻¹1)`.

use ndarray::Array1;
use ndarray::Array2;
use tracing::debug;

use super::linalg::solver_core;
use super::linalg::SolverCore;
use super::mean_variance::SolverOptions;
use crate::error::PortfolioError;
use crate::error::Result;

/// Utility-maximizing weight solver for a given risk-aversion coefficient.
///
/// Same construction contract as [`super::MeanVarianceSolver`]: the
/// covariance inverse is computed once and `get_weight` is pure.
#[derive(Clone, Debug)]
pub struct RiskAverseSolver {
  mean: Array1<f64>,
  covariance: Array2<f64>,
  core: SolverCore,
}

impl RiskAverseSolver {
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
      "constructed risk-averse solver"
    );

    Ok(Self {
      mean,
      covariance,
      core,
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

  /// Weight vector maximizing `μᵀw - γ·wᵀΣw` subject to `1ᵀw = 1`:
  /// `w = (1/γ)·Σ⁻¹(μ - coef·1)` with `coef = (B - γ) / A`.
  ///
  /// `γ → 0⁺` is unbounded, so non-positive (or non-finite) coefficients
  /// are rejected instead of producing runaway weights.
  pub fn get_weight(&self, risk_aversion: f64) -> Result<Array1<f64>> {
    if !risk_aversion.is_finite() || risk_aversion <= 0.0 {
      return Err(PortfolioError::invalid(
        "risk_aversion",
        format!("must be a finite positive number, got {risk_aversion}"),
      ));
    }

    let coef = (self.core.b - risk_aversion) / self.core.a;
    let shifted = &self.core.inverse_mean - &(&self.core.inverse_ones * coef);
    Ok(shifted / risk_aversion)
  }
}
