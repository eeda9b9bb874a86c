//! # frontier-rs
//!
//! $$
//! \min_{\mathbf{w}} \ \mathbf{w}^\top \Sigma \mathbf{w}
//! \quad \text{s.t.} \quad \mathbf{1}^\top \mathbf{w} = 1,\ \mu^\top \mathbf{w} = r^\*
//! $$
//!
//! Closed-form Markowitz mean-variance portfolio optimization together with
//! the single-factor screens (low volatility, momentum, risk-adjusted return,
//! valuation indicators, Piotroski F-score) used to pre-select a candidate
//! universe before optimization.
//!
//! The crate is purely computational: market data arrives as immutable
//! [`market::ReturnStatistics`] / [`market::PriceTable`] values through the
//! [`market::MarketData`] seam, and every solver returns its result instead
//! of mutating shared state.

pub mod error;
pub mod market;
pub mod portfolio;
pub mod selection;

pub use error::PortfolioError;
pub use error::Result;
