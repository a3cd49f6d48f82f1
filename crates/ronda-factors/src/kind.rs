//! The closed set of factors the toolkit computes.
//!
//! Callers select factors by [`FactorKind`] rather than by free-form
//! string, so an unsupported name is a compile-time or parse-time error
//! instead of a silent miss deep in a pipeline run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ronda_traits::{Direction, Factor, RondaError};

use crate::fundamental::{BookToMarket, DividendYield, EarningsYield, ReturnOnEquity};
use crate::tech::{Macd, Momentum, Rsi, Volatility};

/// Factor family classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorCategory {
    /// Price-derived indicators computed from the OHLCV panel alone.
    Technical,
    /// Ratios derived from financial-statement and valuation snapshots.
    Fundamental,
}

impl FactorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Technical => "Price-derived technical indicators",
            Self::Fundamental => "Financial-statement and valuation ratios",
        }
    }
}

/// The closed set of supported factors.
///
/// Each variant knows its desirability direction, family, and data
/// requirements, and can build a default-configured [`Factor`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// Trailing price return over a fixed window.
    Momentum,
    /// Rolling standard deviation of log returns.
    Volatility,
    /// Relative strength index.
    Rsi,
    /// MACD histogram.
    Macd,
    /// Book value of equity relative to market capitalization.
    BookToMarket,
    /// Inverse of the trailing price-to-earnings ratio.
    EarningsYield,
    /// Indicated dividend yield.
    DividendYield,
    /// Net income relative to book value of equity.
    ReturnOnEquity,
}

impl FactorKind {
    /// All supported factors, technical families first.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::Momentum,
            Self::Volatility,
            Self::Rsi,
            Self::Macd,
            Self::BookToMarket,
            Self::EarningsYield,
            Self::DividendYield,
            Self::ReturnOnEquity,
        ]
    }

    /// Returns the canonical snake_case name of the factor.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Momentum => "momentum",
            Self::Volatility => "volatility",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::BookToMarket => "book_to_market",
            Self::EarningsYield => "earnings_yield",
            Self::DividendYield => "dividend_yield",
            Self::ReturnOnEquity => "return_on_equity",
        }
    }

    /// Returns the canonical desirability direction of the raw values.
    ///
    /// Low realized volatility and low (oversold) RSI are treated as
    /// attractive; every other factor reads higher-is-better.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Volatility | Self::Rsi => Direction::LowerIsBetter,
            Self::Momentum
            | Self::Macd
            | Self::BookToMarket
            | Self::EarningsYield
            | Self::DividendYield
            | Self::ReturnOnEquity => Direction::HigherIsBetter,
        }
    }

    /// Returns the factor's family.
    #[must_use]
    pub const fn category(self) -> FactorCategory {
        match self {
            Self::Momentum | Self::Volatility | Self::Rsi | Self::Macd => {
                FactorCategory::Technical
            }
            Self::BookToMarket
            | Self::EarningsYield
            | Self::DividendYield
            | Self::ReturnOnEquity => FactorCategory::Fundamental,
        }
    }

    /// Whether computing this factor needs a fundamentals snapshot.
    #[must_use]
    pub const fn requires_fundamentals(self) -> bool {
        matches!(self.category(), FactorCategory::Fundamental)
    }

    /// Returns a human-readable description of the factor.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Momentum => "Trailing return over the momentum window",
            Self::Volatility => "Rolling standard deviation of daily log returns",
            Self::Rsi => "Relative strength index of daily gains versus losses",
            Self::Macd => "MACD histogram: fast/slow EMA spread minus its signal EMA",
            Self::BookToMarket => "Book value of equity relative to market cap",
            Self::EarningsYield => "Inverse of the trailing price-to-earnings ratio",
            Self::DividendYield => "Indicated dividend yield",
            Self::ReturnOnEquity => "Net income relative to book value of equity",
        }
    }

    /// Builds a default-configured instance of this factor.
    #[must_use]
    pub fn build(self) -> Box<dyn Factor> {
        match self {
            Self::Momentum => Box::new(Momentum::default()),
            Self::Volatility => Box::new(Volatility::default()),
            Self::Rsi => Box::new(Rsi::default()),
            Self::Macd => Box::new(Macd::default()),
            Self::BookToMarket => Box::new(BookToMarket),
            Self::EarningsYield => Box::new(EarningsYield),
            Self::DividendYield => Box::new(DividendYield),
            Self::ReturnOnEquity => Box::new(ReturnOnEquity),
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FactorKind {
    type Err = RondaError;

    /// Parses a factor name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|kind| kind.name() == cleaned)
            .ok_or_else(|| RondaError::InvalidConfig(format!("unknown factor name: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_lists_every_factor() {
        let all = FactorKind::all();
        assert_eq!(all.len(), 8);

        let technical = all
            .iter()
            .filter(|k| k.category() == FactorCategory::Technical)
            .count();
        assert_eq!(technical, 4);
    }

    #[test]
    fn test_directions() {
        assert_eq!(FactorKind::Momentum.direction(), Direction::HigherIsBetter);
        assert_eq!(FactorKind::Volatility.direction(), Direction::LowerIsBetter);
        assert_eq!(FactorKind::Rsi.direction(), Direction::LowerIsBetter);
        assert_eq!(FactorKind::Macd.direction(), Direction::HigherIsBetter);
        assert_eq!(
            FactorKind::BookToMarket.direction(),
            Direction::HigherIsBetter
        );
        assert_eq!(
            FactorKind::ReturnOnEquity.direction(),
            Direction::HigherIsBetter
        );
    }

    #[test]
    fn test_requires_fundamentals() {
        assert!(!FactorKind::Momentum.requires_fundamentals());
        assert!(!FactorKind::Macd.requires_fundamentals());
        assert!(FactorKind::BookToMarket.requires_fundamentals());
        assert!(FactorKind::DividendYield.requires_fundamentals());
    }

    #[test]
    fn test_from_str_canonical_names() {
        for kind in FactorKind::all() {
            let parsed: FactorKind = kind.name().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_from_str_trims_and_lowercases() {
        let parsed: FactorKind = "  Momentum ".parse().unwrap();
        assert_eq!(parsed, FactorKind::Momentum);

        let parsed: FactorKind = "BOOK_TO_MARKET".parse().unwrap();
        assert_eq!(parsed, FactorKind::BookToMarket);
    }

    #[test]
    fn test_from_str_unknown_name() {
        let result = "sentiment".parse::<FactorKind>();
        assert!(matches!(result, Err(RondaError::InvalidConfig(_))));
    }

    #[test]
    fn test_build_matches_metadata() {
        for kind in FactorKind::all() {
            let factor = kind.build();
            assert_eq!(factor.name(), kind.name());
            assert_eq!(factor.direction(), kind.direction());
            assert_eq!(factor.requires_fundamentals(), kind.requires_fundamentals());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(FactorKind::EarningsYield.to_string(), "earnings_yield");
    }
}
