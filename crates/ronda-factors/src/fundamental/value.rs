//! Valuation factors: book-to-market, earnings yield, dividend yield.

use ndarray::Array2;

use ronda_traits::{
    Direction, Factor, FactorInput, FundamentalField, Fundamentals, Panel, Result, ReportPeriod,
    RondaError, Ticker,
};

/// Broadcasts one snapshot ratio per asset across the panel's date index.
fn broadcast(
    input: &FactorInput<'_>,
    factor_name: &str,
    ratio: impl Fn(&Fundamentals, &Ticker) -> f64,
) -> Result<Panel> {
    let fundamentals = input.fundamentals().ok_or_else(|| {
        RondaError::DataQuality(format!("{factor_name} requires a fundamentals snapshot"))
    })?;

    let close = input.ohlcv().close();
    let mut values = Array2::from_elem(close.values().dim(), f64::NAN);
    for (j, ticker) in close.assets().iter().enumerate() {
        let value = ratio(fundamentals, ticker);
        if value.is_finite() {
            values.column_mut(j).fill(value);
        }
    }

    close.with_values(values)
}

/// Book-to-market value factor.
///
/// The latest annual book value of equity over the current market
/// capitalization. High readings mark stocks priced below their
/// accounting value.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookToMarket;

impl Factor for BookToMarket {
    fn name(&self) -> &'static str {
        "book_to_market"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn lookback(&self) -> usize {
        0
    }

    fn requires_fundamentals(&self) -> bool {
        true
    }

    fn compute(&self, input: &FactorInput<'_>) -> Result<Panel> {
        broadcast(input, self.name(), |fundamentals, ticker| {
            let book = fundamentals.get(ticker, FundamentalField::BookValue, ReportPeriod::Annual);
            let cap = fundamentals.get(ticker, FundamentalField::MarketCap, ReportPeriod::Ttm);
            match (book, cap) {
                (Some(book), Some(cap)) if cap != 0.0 => book / cap,
                _ => f64::NAN,
            }
        })
    }
}

/// Earnings yield value factor.
///
/// The inverse of the trailing price-to-earnings ratio. Loss-making
/// companies carry a negative trailing PE and so read as a negative
/// yield.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarningsYield;

impl Factor for EarningsYield {
    fn name(&self) -> &'static str {
        "earnings_yield"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn lookback(&self) -> usize {
        0
    }

    fn requires_fundamentals(&self) -> bool {
        true
    }

    fn compute(&self, input: &FactorInput<'_>) -> Result<Panel> {
        broadcast(input, self.name(), |fundamentals, ticker| {
            match fundamentals.get(ticker, FundamentalField::TrailingPe, ReportPeriod::Ttm) {
                Some(pe) if pe != 0.0 => 1.0 / pe,
                _ => f64::NAN,
            }
        })
    }
}

/// Dividend yield factor.
#[derive(Debug, Clone, Copy, Default)]
pub struct DividendYield;

impl Factor for DividendYield {
    fn name(&self) -> &'static str {
        "dividend_yield"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn lookback(&self) -> usize {
        0
    }

    fn requires_fundamentals(&self) -> bool {
        true
    }

    fn compute(&self, input: &FactorInput<'_>) -> Result<Panel> {
        broadcast(input, self.name(), |fundamentals, ticker| {
            fundamentals
                .get(ticker, FundamentalField::DividendYield, ReportPeriod::Ttm)
                .unwrap_or(f64::NAN)
        })
    }
}
