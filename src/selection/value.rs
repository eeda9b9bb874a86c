//! # Value Screen
//!
//! Ranks a universe by a supplied valuation ratio (PER, PBR, PCR or PSR).
//! The caller decides whether lower or higher is better; assets without
//! the requested ratio are excluded.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::market::statements::IndicatorKind;
use crate::market::statements::ValuationIndicators;

use super::factor::select;
use super::factor::RankDirection;
use super::factor::RankingFactor;
use super::factor::Selection;

/// Ranks by one valuation ratio in a caller-chosen direction.
#[derive(Clone, Copy, Debug)]
pub struct ValueIndicator<'a> {
  indicators: &'a BTreeMap<String, ValuationIndicators>,
  kind: IndicatorKind,
  direction: RankDirection,
}

impl<'a> ValueIndicator<'a> {
  pub fn new(
    indicators: &'a BTreeMap<String, ValuationIndicators>,
    kind: IndicatorKind,
    direction: RankDirection,
  ) -> Self {
    Self {
      indicators,
      kind,
      direction,
    }
  }
}

impl RankingFactor for ValueIndicator<'_> {
  fn direction(&self) -> RankDirection {
    self.direction
  }

  fn score(&self, ticker: &str) -> Option<f64> {
    self
      .indicators
      .get(ticker)
      .and_then(|v| v.get(self.kind))
      .filter(|v| v.is_finite())
  }
}

/// Select the `num_pf` best-ranked assets by the given valuation ratio.
pub fn indicator(
  indicators: &BTreeMap<String, ValuationIndicators>,
  kind: IndicatorKind,
  direction: RankDirection,
  num_pf: usize,
) -> Result<Selection> {
  let universe: Vec<String> = indicators.keys().cloned().collect();
  select(
    &ValueIndicator::new(indicators, kind, direction),
    &universe,
    num_pf,
  )
}
