//! # Ranking Factors
//!
//! One capability interface shared by every screen: score an asset (or
//! mark it excluded), pick a rank direction, then let [`select`] do the
//! stable rank-and-truncate. Exclusions are recovered locally and surfaced
//! only in aggregate.

use tracing::warn;

use crate::error::PortfolioError;
use crate::error::Result;

/// Whether smaller or larger scores rank first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankDirection {
  /// The smaller, the better.
  Ascending,
  /// The bigger, the better.
  Descending,
}

impl RankDirection {
  /// Parse the `low`/`high` flag used by indicator screens.
  pub fn from_code(code: &str) -> Result<Self> {
    match code.to_lowercase().as_str() {
      "low" => Ok(Self::Ascending),
      "high" => Ok(Self::Descending),
      other => Err(PortfolioError::invalid(
        "direction",
        format!("unknown direction {other:?}, expected \"low\" or \"high\""),
      )),
    }
  }
}

/// Ordered candidate universe emitted by a screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
  /// Best-ranked tickers, best first.
  pub tickers: Vec<String>,
  /// Number of assets dropped for missing or degenerate data.
  pub excluded: usize,
}

/// Scoring capability implemented by each screen variant.
pub trait RankingFactor {
  fn direction(&self) -> RankDirection;

  /// Score one asset; `None` excludes it from the ranking entirely.
  fn score(&self, ticker: &str) -> Option<f64>;
}

/// Rank a universe with `factor` and keep the `num_pf` best entries.
///
/// Ties keep the stable universe order. Excluded assets never rank, no
/// matter how favorable their degenerate score would look.
pub fn select<F: RankingFactor>(factor: &F, universe: &[String], num_pf: usize) -> Result<Selection> {
  if num_pf == 0 {
    return Err(PortfolioError::invalid("num_pf", "must be at least 1"));
  }
  if universe.is_empty() {
    return Err(PortfolioError::invalid("universe", "empty universe"));
  }

  let mut scored: Vec<(&String, f64)> = Vec::with_capacity(universe.len());
  let mut excluded = 0usize;

  for ticker in universe {
    match factor.score(ticker) {
      Some(score) if score.is_finite() => scored.push((ticker, score)),
      _ => excluded += 1,
    }
  }

  if scored.is_empty() {
    return Err(PortfolioError::IncompleteData(format!(
      "all {excluded} assets were excluded from ranking"
    )));
  }

  if excluded > 0 {
    warn!(excluded, ranked = scored.len(), "excluded assets from ranking");
  }

  match factor.direction() {
    RankDirection::Ascending => {
      scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }
    RankDirection::Descending => {
      scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal))
    }
  }

  scored.truncate(num_pf);

  Ok(Selection {
    tickers: scored.into_iter().map(|(t, _)| t.clone()).collect(),
    excluded,
  })
}
