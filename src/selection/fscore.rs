//! # F-Score Screen
//!
//! $$
//! F = \sum_{k=1}^{9} f_k, \qquad f_k \in \{0, 1\}
//! $$
//!
//! Piotroski quality score: nine binary signals from the two most recent
//! published annual statements, summed to 0-9. Assets missing a required
//! line item are excluded, never scored as zero.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::PortfolioError;
use crate::error::Result;
use crate::market::statements::StatementHistory;
use crate::market::statements::StatementSnapshot;

use super::factor::RankDirection;
use super::factor::RankingFactor;
use super::factor::Selection;

/// Statement ratios feeding the nine signals.
struct SignalInputs {
  roa: f64,
  cash_flow_over_assets: f64,
  leverage: f64,
  liquidity: f64,
  margin: f64,
  turnover: f64,
}

fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
  match (numerator, denominator) {
    (Some(n), Some(d)) if d != 0.0 && n.is_finite() && d.is_finite() => Some(n / d),
    _ => None,
  }
}

fn signal_inputs(snapshot: &StatementSnapshot) -> Option<SignalInputs> {
  Some(SignalInputs {
    roa: ratio(snapshot.net_income, snapshot.total_assets)?,
    cash_flow_over_assets: ratio(snapshot.operating_cash_flow, snapshot.total_assets)?,
    leverage: ratio(snapshot.long_term_debt, snapshot.total_assets)?,
    liquidity: ratio(snapshot.current_assets, snapshot.current_liabilities)?,
    margin: ratio(snapshot.gross_profit, snapshot.revenue)?,
    turnover: ratio(snapshot.revenue, snapshot.total_assets)?,
  })
}

/// Score one asset from its statement history, or `None` when fewer than
/// two annual filings are published by `as_of` or a required line item is
/// missing in either of them.
///
/// The paid-in-capital-increase column is the one optional input: a missing
/// entry means no offering took place and counts toward the score.
pub fn fscore(history: &StatementHistory, as_of: NaiveDate) -> Option<u8> {
  let (current, previous) = history.published_pair(as_of)?;
  let now = signal_inputs(current)?;
  let then = signal_inputs(previous)?;

  let signals = [
    // Profitability.
    now.roa > 0.0,
    now.cash_flow_over_assets > 0.0,
    now.roa - then.roa > 0.0,
    now.cash_flow_over_assets - now.roa > 0.0,
    // Leverage, liquidity and dilution.
    now.leverage - then.leverage <= 0.0,
    now.liquidity - then.liquidity > 0.0,
    current.equity_issuance.is_none_or(|issued| issued <= 0.0),
    // Operating efficiency.
    now.margin - then.margin > 0.0,
    now.turnover - then.turnover > 0.0,
  ];

  Some(signals.iter().map(|&s| s as u8).sum())
}

/// F-score as a ranking factor (bigger is better).
#[derive(Clone, Copy, Debug)]
pub struct FScore<'a> {
  statements: &'a BTreeMap<String, StatementHistory>,
  as_of: NaiveDate,
}

impl<'a> FScore<'a> {
  pub fn new(statements: &'a BTreeMap<String, StatementHistory>, as_of: NaiveDate) -> Self {
    Self { statements, as_of }
  }
}

impl RankingFactor for FScore<'_> {
  fn direction(&self) -> RankDirection {
    RankDirection::Descending
  }

  fn score(&self, ticker: &str) -> Option<f64> {
    let history = self.statements.get(ticker)?;
    fscore(history, self.as_of).map(f64::from)
  }
}

/// Select every asset whose F-score lands in `accept`, in universe order.
pub fn fscore_select(
  statements: &BTreeMap<String, StatementHistory>,
  accept: &BTreeSet<u8>,
  as_of: NaiveDate,
) -> Result<Selection> {
  if accept.is_empty() {
    return Err(PortfolioError::invalid("accept", "empty accept set"));
  }
  if let Some(out_of_range) = accept.iter().find(|s| **s > 9) {
    return Err(PortfolioError::invalid(
      "accept",
      format!("F-scores range 0-9, got {out_of_range}"),
    ));
  }
  if statements.is_empty() {
    return Err(PortfolioError::invalid("universe", "empty universe"));
  }

  let mut tickers = Vec::new();
  let mut excluded = 0usize;
  let mut scored = 0usize;

  for (ticker, history) in statements {
    match fscore(history, as_of) {
      Some(score) => {
        scored += 1;
        if accept.contains(&score) {
          tickers.push(ticker.clone());
        }
      }
      None => excluded += 1,
    }
  }

  if scored == 0 {
    return Err(PortfolioError::IncompleteData(format!(
      "all {excluded} assets were excluded from scoring"
    )));
  }

  if excluded > 0 {
    warn!(excluded, scored, "excluded assets from F-score screen");
  }

  Ok(Selection { tickers, excluded })
}
