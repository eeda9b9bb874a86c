//! # Market Data Provider
//!
//! Collaborator seam between the computational core and whatever fetches
//! prices, statements and indicators. Implementations hand the core plain
//! immutable values; fetching, caching and retry live behind this trait.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::data::Interval;
use super::data::PriceTable;
use super::data::ReturnStatistics;
use super::statements::StatementHistory;
use super::statements::ValuationIndicators;
use crate::error::PortfolioError;
use crate::error::Result;

/// Read-only market data surface consumed by the solvers and screens.
pub trait MarketData {
  /// Return statistics for the universe (or a subset of it) over `[start, end]`.
  fn return_statistics(
    &self,
    subset: Option<&[String]>,
    interval: Interval,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<ReturnStatistics>;

  /// Close-price table for the universe (or a subset of it).
  fn price_table(&self, subset: Option<&[String]>) -> Result<PriceTable>;

  /// Annual statement history per asset.
  fn financial_statements(&self, subset: Option<&[String]>)
    -> Result<BTreeMap<String, StatementHistory>>;

  /// Valuation ratios per asset.
  fn valuation_indicators(&self) -> Result<BTreeMap<String, ValuationIndicators>>;
}

/// Already-fetched market data held in memory.
///
/// The table is sampled at one fixed interval; asking for statistics at a
/// different interval is rejected instead of resampled, since calendar
/// resampling belongs to the data-acquisition layer.
#[derive(Clone, Debug)]
pub struct InMemoryMarket {
  interval: Interval,
  prices: PriceTable,
  statements: BTreeMap<String, StatementHistory>,
  indicators: BTreeMap<String, ValuationIndicators>,
}

impl InMemoryMarket {
  pub fn new(interval: Interval, prices: PriceTable) -> Self {
    Self {
      interval,
      prices,
      statements: BTreeMap::new(),
      indicators: BTreeMap::new(),
    }
  }

  pub fn with_statements(mut self, statements: BTreeMap<String, StatementHistory>) -> Self {
    self.statements = statements;
    self
  }

  pub fn with_indicators(mut self, indicators: BTreeMap<String, ValuationIndicators>) -> Self {
    self.indicators = indicators;
    self
  }

  pub fn interval(&self) -> Interval {
    self.interval
  }
}

impl MarketData for InMemoryMarket {
  fn return_statistics(
    &self,
    subset: Option<&[String]>,
    interval: Interval,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<ReturnStatistics> {
    if interval != self.interval {
      return Err(PortfolioError::invalid(
        "interval",
        format!(
          "table is sampled at {:?}, cannot serve {:?} statistics",
          self.interval, interval
        ),
      ));
    }

    let table = self.price_table(subset)?.between(start, end);
    ReturnStatistics::from_price_table(&table)
  }

  fn price_table(&self, subset: Option<&[String]>) -> Result<PriceTable> {
    match subset {
      Some(tickers) => self.prices.subset(tickers),
      None => Ok(self.prices.clone()),
    }
  }

  fn financial_statements(
    &self,
    subset: Option<&[String]>,
  ) -> Result<BTreeMap<String, StatementHistory>> {
    match subset {
      Some(tickers) => {
        let mut out = BTreeMap::new();
        for ticker in tickers {
          let history = self.statements.get(ticker).ok_or_else(|| {
            PortfolioError::IncompleteData(format!("no statements for ticker {ticker}"))
          })?;
          out.insert(ticker.clone(), history.clone());
        }
        Ok(out)
      }
      None => Ok(self.statements.clone()),
    }
  }

  fn valuation_indicators(&self) -> Result<BTreeMap<String, ValuationIndicators>> {
    Ok(self.indicators.clone())
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  fn market() -> InMemoryMarket {
    let dates = vec![d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4), d(2024, 1, 5)];
    let prices = PriceTable::new(
      dates,
      vec!["AAA".to_string(), "BBB".to_string()],
      vec![
        vec![100.0, 101.0, 102.0, 101.0],
        vec![50.0, 49.5, 50.5, 51.0],
      ],
    )
    .unwrap();
    InMemoryMarket::new(Interval::Daily, prices)
  }

  #[test]
  fn serves_statistics_for_subset_in_requested_order() -> anyhow::Result<()> {
    let market = market();
    let subset = vec!["BBB".to_string(), "AAA".to_string()];
    let stats =
      market.return_statistics(Some(&subset), Interval::Daily, d(2024, 1, 2), d(2024, 1, 5))?;

    assert_eq!(stats.tickers(), ["BBB".to_string(), "AAA".to_string()]);
    let full = market.return_statistics(None, Interval::Daily, d(2024, 1, 2), d(2024, 1, 5))?;
    assert_relative_eq!(stats.mean()[1], full.mean()[0], max_relative = 1e-12);

    Ok(())
  }

  #[test]
  fn rejects_mismatched_interval() {
    let market = market();
    let result =
      market.return_statistics(None, Interval::Monthly, d(2024, 1, 2), d(2024, 1, 5));
    assert!(matches!(
      result,
      Err(PortfolioError::InvalidParameter { .. })
    ));
  }

  #[test]
  fn statements_subset_requires_coverage() {
    let market = market();
    let subset = vec!["AAA".to_string()];
    assert!(matches!(
      market.financial_statements(Some(&subset)),
      Err(PortfolioError::IncompleteData(_))
    ));
  }
}
