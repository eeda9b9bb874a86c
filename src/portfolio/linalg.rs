//! # Linear Algebra Kernel
//!
//! $$
//! \kappa(\Sigma) = \frac{\sigma_{\max}(\Sigma)}{\sigma_{\min}(\Sigma)}
//! $$
//!
//! Covariance validation and inversion on top of nalgebra. The inverse is
//! computed once per solver and reused across weight queries.

use nalgebra::DMatrix;
use ndarray::Array1;
use ndarray::Array2;
use tracing::debug;

use crate::error::PortfolioError;
use crate::error::Result;

/// Covariance inverse together with the condition-number estimate that
/// cleared the configured ceiling.
#[derive(Clone, Debug)]
pub struct InvertedCovariance {
  pub inverse: Array2<f64>,
  pub condition: f64,
}

/// Invert a covariance matrix, failing when it is exactly singular or its
/// condition number exceeds `max_condition`.
pub fn invert_covariance(covariance: &Array2<f64>, max_condition: f64) -> Result<InvertedCovariance> {
  let (rows, cols) = covariance.dim();
  if rows != cols || rows == 0 {
    return Err(PortfolioError::invalid(
      "covariance",
      format!("expected a non-empty square matrix, got {rows}x{cols}"),
    ));
  }
  if covariance.iter().any(|v| !v.is_finite()) {
    return Err(PortfolioError::invalid(
      "covariance",
      "matrix contains non-finite entries",
    ));
  }

  let na = DMatrix::from_fn(rows, cols, |i, j| covariance[[i, j]]);

  let singular_values = na.clone().svd(false, false).singular_values;
  let sigma_max = singular_values.max();
  let sigma_min = singular_values.min();
  let condition = if sigma_min > 0.0 {
    sigma_max / sigma_min
  } else {
    f64::INFINITY
  };

  if !condition.is_finite() || condition > max_condition {
    return Err(PortfolioError::SingularCovariance {
      condition,
      limit: max_condition,
    });
  }

  let inverse = na.try_inverse().ok_or(PortfolioError::SingularCovariance {
    condition,
    limit: max_condition,
  })?;

  debug!(n = rows, condition, "inverted covariance matrix");

  Ok(InvertedCovariance {
    inverse: Array2::from_shape_fn((rows, cols), |(i, j)| inverse[(i, j)]),
    condition,
  })
}

/// Precomputed quantities shared by both closed-form solvers.
#[derive(Clone, Debug)]
pub(crate) struct SolverCore {
  /// `Σ⁻¹μ`
  pub inverse_mean: Array1<f64>,
  /// `Σ⁻¹1`
  pub inverse_ones: Array1<f64>,
  /// `1ᵀΣ⁻¹1`
  pub a: f64,
  /// `1ᵀΣ⁻¹μ`
  pub b: f64,
  /// `μᵀΣ⁻¹μ`
  pub c: f64,
}

pub(crate) fn solver_core(
  mean: &Array1<f64>,
  covariance: &Array2<f64>,
  max_condition: f64,
) -> Result<SolverCore> {
  if mean.is_empty() {
    return Err(PortfolioError::invalid("mean", "empty mean vector"));
  }
  if mean.len() != covariance.nrows() {
    return Err(PortfolioError::invalid(
      "covariance",
      format!(
        "covariance is {}x{} but the mean vector has {} entries",
        covariance.nrows(),
        covariance.ncols(),
        mean.len()
      ),
    ));
  }
  if mean.iter().any(|v| !v.is_finite()) {
    return Err(PortfolioError::invalid(
      "mean",
      "mean vector contains non-finite entries",
    ));
  }

  let inverted = invert_covariance(covariance, max_condition)?;
  let ones = Array1::ones(mean.len());
  let inverse_mean = inverted.inverse.dot(mean);
  let inverse_ones = inverted.inverse.dot(&ones);

  let a = inverse_ones.sum();
  let b = mean.dot(&inverse_ones);
  let c = mean.dot(&inverse_mean);

  if !a.is_finite() || a <= 0.0 {
    return Err(PortfolioError::invalid(
      "covariance",
      "matrix is not positive definite",
    ));
  }

  Ok(SolverCore {
    inverse_mean,
    inverse_ones,
    a,
    b,
    c,
  })
}
