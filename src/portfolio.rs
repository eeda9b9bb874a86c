//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Closed-form mean-variance weight solving, portfolio statistics and the
//! efficient-frontier sweep built on top of them.

pub mod frontier;
pub mod linalg;
pub mod mean_variance;
pub mod risk_averse;
pub mod statistics;

pub use frontier::FrontierPoint;
pub use frontier::FrontierSweep;
pub use frontier::DEFAULT_STEPS;
pub use linalg::invert_covariance;
pub use linalg::InvertedCovariance;
pub use mean_variance::MeanVarianceSolver;
pub use mean_variance::SolverOptions;
pub use risk_averse::RiskAverseSolver;
pub use statistics::portfolio_statistics;
pub use statistics::PortfolioMoments;
