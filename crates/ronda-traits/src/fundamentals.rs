//! Per-asset fundamental statistics keyed by field and report period.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Ticker;

/// The reporting basis of a fundamental statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportPeriod {
    /// Most recent fiscal-year figure.
    Annual,
    /// Trailing-twelve-month figure.
    Ttm,
}

impl ReportPeriod {
    /// Returns the lowercase wire/display name of the period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Ttm => "ttm",
        }
    }
}

/// The closed set of fundamental fields the toolkit consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundamentalField {
    /// Total market capitalization.
    MarketCap,
    /// Trailing price-to-earnings ratio.
    TrailingPe,
    /// Price-to-book ratio.
    PriceToBook,
    /// Indicated dividend yield.
    DividendYield,
    /// Total book value of equity.
    BookValue,
    /// Net income.
    NetIncome,
    /// Common shares outstanding.
    SharesOutstanding,
}

impl FundamentalField {
    /// Returns the snake_case name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MarketCap => "market_cap",
            Self::TrailingPe => "trailing_pe",
            Self::PriceToBook => "price_to_book",
            Self::DividendYield => "dividend_yield",
            Self::BookValue => "book_value",
            Self::NetIncome => "net_income",
            Self::SharesOutstanding => "shares_outstanding",
        }
    }
}

/// A snapshot store of per-asset fundamental statistics.
///
/// Values are keyed by the exact (ticker, field, report period) triple the
/// fundamentals provider resolved them under. Lookups for absent keys
/// return `None`; there is no interpolation or fallback at this layer.
///
/// # Example
///
/// ```
/// use ronda_traits::{FundamentalField, Fundamentals, ReportPeriod};
///
/// let mut fundamentals = Fundamentals::new();
/// fundamentals.insert("AAPL", FundamentalField::MarketCap, ReportPeriod::Ttm, 3.0e12);
/// assert_eq!(
///     fundamentals.get("AAPL", FundamentalField::MarketCap, ReportPeriod::Ttm),
///     Some(3.0e12)
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Fundamentals {
    values: HashMap<(Ticker, FundamentalField, ReportPeriod), f64>,
}

impl Fundamentals {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a statistic, replacing any previous value under the same key.
    pub fn insert(&mut self, ticker: &str, field: FundamentalField, period: ReportPeriod, value: f64) {
        self.values.insert((ticker.to_string(), field, period), value);
    }

    /// Looks up a statistic by its exact key.
    #[must_use]
    pub fn get(&self, ticker: &str, field: FundamentalField, period: ReportPeriod) -> Option<f64> {
        self.values
            .get(&(ticker.to_string(), field, period))
            .copied()
    }

    /// Returns the number of stored statistics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the store holds no statistics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
