//! # Return Statistics
//!
//! $$
//! \hat\Sigma_{ij} = \frac{1}{T-1}\sum_{t=1}^{T}(r_{it}-\bar r_i)(r_{jt}-\bar r_j)
//! $$
//!
//! Price tables, percentage-change return series and the (mean vector,
//! covariance matrix) pair consumed by the solvers.

use chrono::NaiveDate;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::Axis;
use ndarray_stats::CorrelationExt;
use tracing::debug;

use crate::error::PortfolioError;
use crate::error::Result;

/// Sampling interval of a return series.
///
/// Annualization factors are fixed constants per interval, never derived
/// from calendar arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interval {
  Daily,
  Weekly,
  Monthly,
  Yearly,
}

impl Interval {
  /// Parse a short interval code (`d`, `w`, `m`, `y` or the full name).
  pub fn from_code(code: &str) -> Result<Self> {
    match code.to_lowercase().as_str() {
      "d" | "daily" => Ok(Self::Daily),
      "w" | "weekly" => Ok(Self::Weekly),
      "m" | "monthly" => Ok(Self::Monthly),
      "y" | "yearly" => Ok(Self::Yearly),
      other => Err(PortfolioError::invalid(
        "interval",
        format!("unknown interval code {other:?}, expected one of d/w/m/y"),
      )),
    }
  }

  /// Number of periods per year used to annualize volatility.
  pub fn periods_per_year(self) -> f64 {
    match self {
      Self::Daily => 252.0,
      Self::Weekly => 52.0,
      Self::Monthly => 12.0,
      Self::Yearly => 1.0,
    }
  }
}

/// Convert a close-price series to fractional returns via percentage change.
///
/// The first observation has no prior period and is dropped.
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
  let mut out = Vec::with_capacity(closes.len().saturating_sub(1));
  for i in 1..closes.len() {
    out.push(closes[i] / closes[i - 1] - 1.0);
  }
  out
}

/// Per-asset close prices on a shared date index.
#[derive(Clone, Debug)]
pub struct PriceTable {
  dates: Vec<NaiveDate>,
  tickers: Vec<String>,
  closes: Vec<Vec<f64>>,
}

impl PriceTable {
  /// Build a table from a shared date index and one close column per ticker.
  pub fn new(dates: Vec<NaiveDate>, tickers: Vec<String>, closes: Vec<Vec<f64>>) -> Result<Self> {
    if tickers.is_empty() {
      return Err(PortfolioError::invalid("tickers", "empty universe"));
    }
    if tickers.len() != closes.len() {
      return Err(PortfolioError::invalid(
        "closes",
        format!(
          "{} close columns for {} tickers",
          closes.len(),
          tickers.len()
        ),
      ));
    }
    if let Some(col) = closes.iter().find(|col| col.len() != dates.len()) {
      return Err(PortfolioError::invalid(
        "closes",
        format!(
          "close column of length {} does not match date index of length {}",
          col.len(),
          dates.len()
        ),
      ));
    }

    Ok(Self {
      dates,
      tickers,
      closes,
    })
  }

  pub fn dates(&self) -> &[NaiveDate] {
    &self.dates
  }

  pub fn tickers(&self) -> &[String] {
    &self.tickers
  }

  /// Number of assets in the table.
  pub fn len(&self) -> usize {
    self.tickers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tickers.is_empty()
  }

  /// Close column for one ticker.
  pub fn closes(&self, ticker: &str) -> Option<&[f64]> {
    let idx = self.tickers.iter().position(|t| t == ticker)?;
    Some(&self.closes[idx])
  }

  /// Restrict the table to the given tickers, preserving requested order.
  pub fn subset<S: AsRef<str>>(&self, tickers: &[S]) -> Result<Self> {
    let mut picked_tickers = Vec::with_capacity(tickers.len());
    let mut picked_closes = Vec::with_capacity(tickers.len());

    for ticker in tickers {
      let ticker = ticker.as_ref();
      let idx = self
        .tickers
        .iter()
        .position(|t| t == ticker)
        .ok_or_else(|| {
          PortfolioError::IncompleteData(format!("ticker {ticker} not present in price table"))
        })?;
      picked_tickers.push(self.tickers[idx].clone());
      picked_closes.push(self.closes[idx].clone());
    }

    Self::new(self.dates.clone(), picked_tickers, picked_closes)
  }

  /// Keep only the most recent `n` observations.
  pub fn tail(&self, n: usize) -> Self {
    let skip = self.dates.len().saturating_sub(n);
    Self {
      dates: self.dates[skip..].to_vec(),
      tickers: self.tickers.clone(),
      closes: self.closes.iter().map(|col| col[skip..].to_vec()).collect(),
    }
  }

  /// Keep only observations dated within `[start, end]`.
  pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
    let keep: Vec<usize> = self
      .dates
      .iter()
      .enumerate()
      .filter(|(_, d)| start <= **d && **d <= end)
      .map(|(i, _)| i)
      .collect();

    Self {
      dates: keep.iter().map(|&i| self.dates[i]).collect(),
      tickers: self.tickers.clone(),
      closes: self
        .closes
        .iter()
        .map(|col| keep.iter().map(|&i| col[i]).collect())
        .collect(),
    }
  }
}

/// Per-asset mean returns and their covariance, with matching asset order.
#[derive(Clone, Debug)]
pub struct ReturnStatistics {
  tickers: Vec<String>,
  mean: Array1<f64>,
  covariance: Array2<f64>,
}

impl ReturnStatistics {
  /// Build statistics from a returns matrix with one row per asset.
  ///
  /// Rows follow the ticker order; the sample covariance uses `ddof = 1`.
  pub fn from_returns(tickers: Vec<String>, returns: Array2<f64>) -> Result<Self> {
    let (n, t) = returns.dim();
    if tickers.is_empty() || n == 0 {
      return Err(PortfolioError::invalid("tickers", "empty universe"));
    }
    if tickers.len() != n {
      return Err(PortfolioError::invalid(
        "returns",
        format!("{} return rows for {} tickers", n, tickers.len()),
      ));
    }
    if t < 2 {
      return Err(PortfolioError::IncompleteData(format!(
        "need at least 2 return observations per asset, got {t}"
      )));
    }
    if returns.iter().any(|r| !r.is_finite()) {
      return Err(PortfolioError::IncompleteData(
        "returns matrix contains non-finite entries".to_string(),
      ));
    }

    let mean = returns
      .mean_axis(Axis(1))
      .expect("non-empty observation axis");
    let covariance = returns
      .cov(1.0)
      .map_err(|_| PortfolioError::IncompleteData("empty returns matrix".to_string()))?;

    debug!(assets = n, observations = t, "estimated return statistics");

    Ok(Self {
      tickers,
      mean,
      covariance,
    })
  }

  /// Build statistics from close prices via percentage-change returns.
  pub fn from_price_table(table: &PriceTable) -> Result<Self> {
    let t = table.dates().len();
    if t < 3 {
      return Err(PortfolioError::IncompleteData(format!(
        "need at least 3 price observations, got {t}"
      )));
    }

    let mut returns = Array2::zeros((table.len(), t - 1));
    for (i, ticker) in table.tickers().iter().enumerate() {
      let closes = table.closes(ticker).expect("ticker from own index");
      if closes.iter().any(|c| !c.is_finite() || *c <= 0.0) {
        return Err(PortfolioError::IncompleteData(format!(
          "price series for {ticker} contains non-positive or missing closes"
        )));
      }
      for (j, r) in simple_returns(closes).into_iter().enumerate() {
        returns[[i, j]] = r;
      }
    }

    Self::from_returns(table.tickers().to_vec(), returns)
  }

  pub fn tickers(&self) -> &[String] {
    &self.tickers
  }

  /// Per-period mean return vector, one entry per asset.
  pub fn mean(&self) -> &Array1<f64> {
    &self.mean
  }

  /// Symmetric covariance matrix in ticker order.
  pub fn covariance(&self) -> &Array2<f64> {
    &self.covariance
  }

  /// Number of assets.
  pub fn len(&self) -> usize {
    self.tickers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tickers.is_empty()
  }

  /// Restrict statistics to a candidate universe, preserving requested order.
  pub fn subset<S: AsRef<str>>(&self, tickers: &[S]) -> Result<Self> {
    if tickers.is_empty() {
      return Err(PortfolioError::invalid("tickers", "empty universe"));
    }

    let mut indices = Vec::with_capacity(tickers.len());
    for ticker in tickers {
      let ticker = ticker.as_ref();
      let idx = self
        .tickers
        .iter()
        .position(|t| t == ticker)
        .ok_or_else(|| {
          PortfolioError::IncompleteData(format!("ticker {ticker} not present in statistics"))
        })?;
      indices.push(idx);
    }

    let mean = Array1::from_iter(indices.iter().map(|&i| self.mean[i]));
    let covariance =
      Array2::from_shape_fn((indices.len(), indices.len()), |(i, j)| {
        self.covariance[[indices[i], indices[j]]]
      });

    Ok(Self {
      tickers: indices
        .iter()
        .map(|&i| self.tickers[i].clone())
        .collect(),
      mean,
      covariance,
    })
  }
}
