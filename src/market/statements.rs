//! # Financial Statements
//!
//! Annual statement snapshots and valuation-indicator records consumed by
//! the quality and value screens. Line items are optional; screens decide
//! which ones they require and exclude assets with gaps.

use chrono::NaiveDate;

/// One annual statement snapshot.
///
/// `filing_date` marks when the filing became public; screens only look at
/// snapshots published on or before their as-of date, so availability is a
/// property of the data instead of calendar guesswork.
#[derive(Clone, Debug, Default)]
pub struct StatementSnapshot {
  pub fiscal_year: i32,
  pub filing_date: Option<NaiveDate>,
  /// Net income attributable to controlling interests.
  pub net_income: Option<f64>,
  pub total_assets: Option<f64>,
  pub operating_cash_flow: Option<f64>,
  pub long_term_debt: Option<f64>,
  pub current_assets: Option<f64>,
  pub current_liabilities: Option<f64>,
  /// Paid-in capital increase. Missing means no offering took place.
  pub equity_issuance: Option<f64>,
  pub gross_profit: Option<f64>,
  pub revenue: Option<f64>,
}

/// Annual snapshots for one asset, kept in fiscal-year order.
#[derive(Clone, Debug, Default)]
pub struct StatementHistory {
  snapshots: Vec<StatementSnapshot>,
}

impl StatementHistory {
  pub fn new(mut snapshots: Vec<StatementSnapshot>) -> Self {
    snapshots.sort_by_key(|s| s.fiscal_year);
    Self { snapshots }
  }

  pub fn snapshots(&self) -> &[StatementSnapshot] {
    &self.snapshots
  }

  /// The two most recent snapshots published on or before `as_of`,
  /// returned as `(current, previous)`. `None` when fewer than two
  /// annual filings are available yet.
  pub fn published_pair(&self, as_of: NaiveDate) -> Option<(&StatementSnapshot, &StatementSnapshot)> {
    let published: Vec<&StatementSnapshot> = self
      .snapshots
      .iter()
      .filter(|s| s.filing_date.is_some_and(|d| d <= as_of))
      .collect();

    match published.as_slice() {
      [.., previous, current] => Some((current, previous)),
      _ => None,
    }
  }
}

/// Valuation ratio kind, matching the indicator table keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorKind {
  /// Price / earnings.
  Per,
  /// Price / book value.
  Pbr,
  /// Price / cash flow.
  Pcr,
  /// Price / sales.
  Psr,
}

/// Valuation ratios for one asset. Missing entries exclude the asset from
/// the corresponding ranking.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValuationIndicators {
  pub per: Option<f64>,
  pub pbr: Option<f64>,
  pub pcr: Option<f64>,
  pub psr: Option<f64>,
}

impl ValuationIndicators {
  pub fn get(&self, kind: IndicatorKind) -> Option<f64> {
    match kind {
      IndicatorKind::Per => self.per,
      IndicatorKind::Pbr => self.pbr,
      IndicatorKind::Pcr => self.pcr,
      IndicatorKind::Psr => self.psr,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  fn snapshot(fiscal_year: i32, filed: Option<NaiveDate>) -> StatementSnapshot {
    StatementSnapshot {
      fiscal_year,
      filing_date: filed,
      ..Default::default()
    }
  }

  #[test]
  fn published_pair_skips_unpublished_filings() {
    let history = StatementHistory::new(vec![
      snapshot(2024, Some(d(2025, 3, 30))),
      snapshot(2022, Some(d(2023, 3, 31))),
      snapshot(2023, Some(d(2024, 3, 29))),
    ]);

    // Before the 2024 filing landed, the pair is (2023, 2022).
    let (current, previous) = history.published_pair(d(2024, 6, 1)).unwrap();
    assert_eq!(current.fiscal_year, 2023);
    assert_eq!(previous.fiscal_year, 2022);

    let (current, _) = history.published_pair(d(2025, 6, 1)).unwrap();
    assert_eq!(current.fiscal_year, 2024);
  }

  #[test]
  fn published_pair_requires_two_filings() {
    let history = StatementHistory::new(vec![snapshot(2024, Some(d(2025, 3, 30)))]);
    assert!(history.published_pair(d(2025, 6, 1)).is_none());

    let unfiled = StatementHistory::new(vec![snapshot(2023, None), snapshot(2024, None)]);
    assert!(unfiled.published_pair(d(2025, 6, 1)).is_none());
  }
}
