//! # Portfolio Statistics
//!
//! $$
//! \mu_p = \mu^\top \mathbf{w}, \qquad \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Realized mean and variance of an arbitrary weight vector against a set
//! of return statistics. Works for solver output and hand-built
//! allocations alike.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::PortfolioError;
use crate::error::Result;

/// Realized first two moments of a portfolio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortfolioMoments {
  /// Expected per-period portfolio return.
  pub mean: f64,
  /// Portfolio return variance.
  pub variance: f64,
}

impl PortfolioMoments {
  /// Portfolio standard deviation.
  pub fn std_dev(&self) -> f64 {
    self.variance.max(0.0).sqrt()
  }
}

/// Compute `(μᵀw, wᵀΣw)` for any weight vector.
pub fn portfolio_statistics(
  weight: &Array1<f64>,
  mean: &Array1<f64>,
  covariance: &Array2<f64>,
) -> Result<PortfolioMoments> {
  let n = weight.len();
  if mean.len() != n || covariance.dim() != (n, n) {
    return Err(PortfolioError::invalid(
      "weight",
      format!(
        "weight has {} entries, mean has {}, covariance is {}x{}",
        n,
        mean.len(),
        covariance.nrows(),
        covariance.ncols()
      ),
    ));
  }

  Ok(PortfolioMoments {
    mean: mean.dot(weight),
    variance: weight.dot(&covariance.dot(weight)),
  })
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn matches_hand_computed_moments() {
    let weight = array![0.6, 0.4];
    let mean = array![0.01, 0.02];
    let cov = array![[4e-4, 1e-4], [1e-4, 9e-4]];

    let moments = portfolio_statistics(&weight, &mean, &cov).unwrap();
    assert_relative_eq!(moments.mean, 0.014, max_relative = 1e-12);
    // 0.36·4e-4 + 2·0.24·1e-4 + 0.16·9e-4 = 3.36e-4
    assert_relative_eq!(moments.variance, 3.36e-4, max_relative = 1e-9);
    assert_relative_eq!(moments.std_dev(), 3.36e-4_f64.sqrt(), max_relative = 1e-9);
  }

  #[test]
  fn moments_are_bilinear_in_the_weight() {
    let weight = array![0.3, -0.2, 0.9];
    let mean = array![0.004, 0.011, 0.017];
    let cov = array![
      [6e-4, 1e-4, 0.0],
      [1e-4, 4e-4, 5e-5],
      [0.0, 5e-5, 9e-4]
    ];

    let base = portfolio_statistics(&weight, &mean, &cov).unwrap();
    let k = 2.5;
    let scaled = portfolio_statistics(&(&weight * k), &mean, &cov).unwrap();

    assert_relative_eq!(scaled.mean, k * base.mean, max_relative = 1e-12);
    assert_relative_eq!(scaled.variance, k * k * base.variance, max_relative = 1e-12);
  }

  #[test]
  fn rejects_mismatched_dimensions() {
    let weight = array![0.5, 0.5];
    let mean = array![0.01, 0.02, 0.03];
    let cov = Array2::zeros((3, 3));

    assert!(matches!(
      portfolio_statistics(&weight, &mean, &cov),
      Err(PortfolioError::InvalidParameter { .. })
    ));
  }
}
