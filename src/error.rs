//! # Errors
//!
//! Typed failure kinds shared by the solvers and the ranking screens.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Failure kinds surfaced by solver construction, weight queries and screens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
  /// Covariance matrix could not be inverted, or its conditioning is past
  /// the point where an f64 inverse is numerically meaningful.
  #[error("covariance matrix is singular or ill-conditioned (condition number {condition:.3e}, limit {limit:.3e})")]
  SingularCovariance { condition: f64, limit: f64 },

  /// The target-return constraint system is numerically unsolvable, e.g.
  /// every asset carries the same expected return.
  #[error("efficient frontier is degenerate: {reason}")]
  DegenerateFrontier { reason: String },

  #[error("invalid parameter {name}: {reason}")]
  InvalidParameter { name: &'static str, reason: String },

  /// A screen was left with nothing to rank after per-asset exclusions.
  #[error("incomplete data: {0}")]
  IncompleteData(String),
}

impl PortfolioError {
  pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
    Self::InvalidParameter {
      name,
      reason: reason.into(),
    }
  }
}
