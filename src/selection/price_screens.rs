//! # Price Screens
//!
//! $$
//! \hat\sigma_{\text{ann}} = \hat\sigma \sqrt{n_{\text{units}}}, \qquad
//! r_{\text{cum}} = \prod_t (1 + r_t) - 1
//! $$
//!
//! Low-volatility, momentum and risk-adjusted-return screens over a close
//! price table. Assets with exactly zero realized volatility are treated as
//! non-traded and excluded instead of ranking "best".

use crate::error::PortfolioError;
use crate::error::Result;
use crate::market::data::simple_returns;
use crate::market::data::Interval;
use crate::market::data::PriceTable;

use super::factor::select;
use super::factor::RankDirection;
use super::factor::RankingFactor;
use super::factor::Selection;

fn sample_mean(xs: &[f64]) -> f64 {
  xs.iter().sum::<f64>() / xs.len() as f64
}

fn sample_std(xs: &[f64]) -> f64 {
  let mean = sample_mean(xs);
  let mut acc = 0.0;
  for &x in xs {
    let d = x - mean;
    acc += d * d;
  }
  (acc / (xs.len() - 1) as f64).sqrt()
}

/// Returns over the trailing `lookback` periods, or `None` when the series
/// is too short or carries unusable closes.
fn windowed_returns(table: &PriceTable, ticker: &str, lookback: usize) -> Option<Vec<f64>> {
  let closes = table.closes(ticker)?;
  if closes.len() < lookback + 1 {
    return None;
  }

  let window = &closes[closes.len() - (lookback + 1)..];
  if window.iter().any(|c| !c.is_finite() || *c <= 0.0) {
    return None;
  }

  Some(simple_returns(window))
}

fn annualized_volatility(returns: &[f64], interval: Interval) -> f64 {
  sample_std(returns) * interval.periods_per_year().sqrt()
}

fn cumulative_return(returns: &[f64]) -> f64 {
  returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Ranks ascending by annualized return volatility.
#[derive(Clone, Copy, Debug)]
pub struct LowVolatility<'a> {
  table: &'a PriceTable,
  interval: Interval,
  lookback: usize,
}

impl<'a> LowVolatility<'a> {
  pub fn new(table: &'a PriceTable, interval: Interval, lookback: usize) -> Self {
    Self {
      table,
      interval,
      lookback,
    }
  }
}

impl RankingFactor for LowVolatility<'_> {
  fn direction(&self) -> RankDirection {
    RankDirection::Ascending
  }

  fn score(&self, ticker: &str) -> Option<f64> {
    let returns = windowed_returns(self.table, ticker, self.lookback)?;
    let vol = annualized_volatility(&returns, self.interval);
    // Zero realized volatility marks a non-traded listing.
    (vol > 0.0).then_some(vol)
  }
}

/// Ranks descending by cumulative compounded return.
#[derive(Clone, Copy, Debug)]
pub struct Momentum<'a> {
  table: &'a PriceTable,
  lookback: usize,
}

impl<'a> Momentum<'a> {
  pub fn new(table: &'a PriceTable, lookback: usize) -> Self {
    Self { table, lookback }
  }
}

impl RankingFactor for Momentum<'_> {
  fn direction(&self) -> RankDirection {
    RankDirection::Descending
  }

  fn score(&self, ticker: &str) -> Option<f64> {
    let returns = windowed_returns(self.table, ticker, self.lookback)?;
    Some(cumulative_return(&returns))
  }
}

/// Ranks descending by cumulative return per unit of annualized volatility.
#[derive(Clone, Copy, Debug)]
pub struct RiskAdjusted<'a> {
  table: &'a PriceTable,
  interval: Interval,
  lookback: usize,
}

impl<'a> RiskAdjusted<'a> {
  pub fn new(table: &'a PriceTable, interval: Interval, lookback: usize) -> Self {
    Self {
      table,
      interval,
      lookback,
    }
  }
}

impl RankingFactor for RiskAdjusted<'_> {
  fn direction(&self) -> RankDirection {
    RankDirection::Descending
  }

  fn score(&self, ticker: &str) -> Option<f64> {
    let returns = windowed_returns(self.table, ticker, self.lookback)?;
    let vol = annualized_volatility(&returns, self.interval);
    if vol == 0.0 {
      return None;
    }
    Some(cumulative_return(&returns) / vol)
  }
}

fn validate_lookback(lookback: usize, min: usize) -> Result<()> {
  if lookback < min {
    return Err(PortfolioError::invalid(
      "lookback",
      format!("need at least {min} return periods, got {lookback}"),
    ));
  }
  Ok(())
}

/// Select the `num_pf` least volatile assets over the trailing window.
pub fn low_volatility(
  table: &PriceTable,
  interval: Interval,
  lookback: usize,
  num_pf: usize,
) -> Result<Selection> {
  validate_lookback(lookback, 2)?;
  select(
    &LowVolatility::new(table, interval, lookback),
    table.tickers(),
    num_pf,
  )
}

/// Select the `num_pf` assets with the strongest cumulative return.
pub fn momentum(table: &PriceTable, lookback: usize, num_pf: usize) -> Result<Selection> {
  validate_lookback(lookback, 1)?;
  select(&Momentum::new(table, lookback), table.tickers(), num_pf)
}

/// Select the `num_pf` assets with the best return per unit of risk.
pub fn risk_adjusted(
  table: &PriceTable,
  interval: Interval,
  lookback: usize,
  num_pf: usize,
) -> Result<Selection> {
  validate_lookback(lookback, 2)?;
  select(
    &RiskAdjusted::new(table, interval, lookback),
    table.tickers(),
    num_pf,
  )
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use tracing_test::traced_test;

  use super::*;

  /// Five assets: volatility rises with the asset index and `FLAT` never
  /// trades away from 100.
  fn five_asset_table() -> PriceTable {
    let dates: Vec<NaiveDate> = (1..=5)
      .map(|day| NaiveDate::from_ymd_opt(2024, 4, day).unwrap())
      .collect();

    let closes = |moves: [f64; 4]| -> Vec<f64> {
      let mut closes = vec![100.0];
      for m in moves {
        let prev = *closes.last().unwrap();
        closes.push(prev * (1.0 + m));
      }
      closes
    };

    PriceTable::new(
      dates,
      vec![
        "CALM".to_string(),
        "MILD".to_string(),
        "WILD".to_string(),
        "CRAZY".to_string(),
        "FLAT".to_string(),
      ],
      vec![
        closes([0.001, -0.001, 0.001, -0.001]),
        closes([0.01, -0.01, 0.01, -0.01]),
        closes([0.03, -0.03, 0.03, -0.03]),
        closes([0.08, -0.08, 0.08, -0.08]),
        closes([0.0, 0.0, 0.0, 0.0]),
      ],
    )
    .unwrap()
  }

  #[test]
  #[traced_test]
  fn low_volatility_excludes_the_non_traded_asset() {
    let table = five_asset_table();
    let selection = low_volatility(&table, Interval::Daily, 4, 3).unwrap();

    // FLAT has exactly zero realized volatility and must not rank "best".
    assert_eq!(
      selection.tickers,
      ["CALM".to_string(), "MILD".to_string(), "WILD".to_string()]
    );
    assert_eq!(selection.excluded, 1);
    assert!(logs_contain("excluded assets from ranking"));
  }

  #[test]
  fn momentum_ranks_by_cumulative_return() {
    let dates: Vec<NaiveDate> = (1..=4)
      .map(|day| NaiveDate::from_ymd_opt(2024, 4, day).unwrap())
      .collect();
    let table = PriceTable::new(
      dates,
      vec!["UP".to_string(), "DOWN".to_string(), "SIDE".to_string()],
      vec![
        vec![100.0, 102.0, 104.0, 107.0],
        vec![100.0, 97.0, 95.0, 92.0],
        vec![100.0, 100.5, 100.0, 100.5],
      ],
    )
    .unwrap();

    let selection = momentum(&table, 3, 2).unwrap();
    assert_eq!(selection.tickers, ["UP".to_string(), "SIDE".to_string()]);
    assert_eq!(selection.excluded, 0);
  }

  #[test]
  fn risk_adjusted_prefers_return_per_unit_of_risk() {
    let dates: Vec<NaiveDate> = (1..=5)
      .map(|day| NaiveDate::from_ymd_opt(2024, 4, day).unwrap())
      .collect();
    // STEADY compounds about as much as CHOPPY but at a fraction of the
    // volatility; FLAT is excluded outright.
    let table = PriceTable::new(
      dates,
      vec![
        "STEADY".to_string(),
        "CHOPPY".to_string(),
        "FLAT".to_string(),
      ],
      vec![
        vec![100.0, 102.0, 102.0, 104.0, 104.0],
        vec![100.0, 105.0, 101.85, 106.94, 103.73],
        vec![100.0, 100.0, 100.0, 100.0, 100.0],
      ],
    )
    .unwrap();

    let selection = risk_adjusted(&table, Interval::Daily, 4, 1).unwrap();
    assert_eq!(selection.tickers, ["STEADY".to_string()]);
    assert_eq!(selection.excluded, 1);
  }

  #[test]
  fn short_history_is_excluded_not_fatal() {
    let dates: Vec<NaiveDate> = (1..=5)
      .map(|day| NaiveDate::from_ymd_opt(2024, 4, day).unwrap())
      .collect();
    let table = PriceTable::new(
      dates,
      vec!["FULL".to_string(), "LISTED".to_string()],
      vec![
        vec![100.0, 101.0, 100.0, 102.0, 101.0],
        // Recently listed: no close before day 3.
        vec![f64::NAN, f64::NAN, 50.0, 50.5, 50.2],
      ],
    )
    .unwrap();

    let selection = low_volatility(&table, Interval::Daily, 4, 2).unwrap();
    assert_eq!(selection.tickers, ["FULL".to_string()]);
    assert_eq!(selection.excluded, 1);
  }

  #[test]
  fn zero_lookback_is_rejected() {
    let table = five_asset_table();
    assert!(matches!(
      momentum(&table, 0, 3),
      Err(PortfolioError::InvalidParameter { .. })
    ));
  }
}
