//! # Portfolio Selection
//!
//! $$
//! \text{universe} \xrightarrow{\ \text{score, rank, truncate}\ } \text{candidates}
//! $$
//!
//! Single-factor screens that reduce an asset universe to a candidate
//! subset before optimization: low volatility, momentum, risk-adjusted
//! return, valuation indicators and the Piotroski F-score. Screens consume
//! price/indicator/statement tables only; they never touch the solvers.

pub mod factor;
pub mod fscore;
pub mod price_screens;
pub mod value;

pub use factor::select;
pub use factor::RankDirection;
pub use factor::RankingFactor;
pub use factor::Selection;
pub use fscore::fscore;
pub use fscore::fscore_select;
pub use fscore::FScore;
pub use price_screens::low_volatility;
pub use price_screens::momentum;
pub use price_screens::risk_adjusted;
pub use price_screens::LowVolatility;
pub use price_screens::Momentum;
pub use price_screens::RiskAdjusted;
pub use value::indicator;
pub use value::ValueIndicator;
