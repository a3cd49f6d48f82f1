//! Common types used throughout the Ronda toolkit.
//!
//! This module defines the core scalar and series types used for
//! representing dates, tickers, factor directions, and NAV curves.

use serde::{Deserialize, Serialize};

use crate::{Result, RondaError};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// An asset ticker identifier.
///
/// Tickers identify securities across the Ronda toolkit. Typically these
/// are exchange symbols like "AAPL" or "MSFT".
pub type Ticker = String;

/// The desirability direction of a factor's raw values.
///
/// A momentum factor treats larger raw values as more attractive; a
/// volatility factor treats smaller raw values as more attractive. The
/// direction drives the ranking step of normalization so that every
/// normalized score reads the same way: higher score, more attractive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Larger raw values are more attractive (momentum, earnings yield).
    HigherIsBetter,
    /// Smaller raw values are more attractive (volatility, RSI).
    LowerIsBetter,
}

impl Direction {
    /// Whether ranks should be assigned in ascending raw-value order.
    ///
    /// With [`Direction::HigherIsBetter`] the largest raw value receives the
    /// largest rank; with [`Direction::LowerIsBetter`] the smallest does.
    #[must_use]
    pub const fn rank_ascending(self) -> bool {
        matches!(self, Self::HigherIsBetter)
    }
}

/// An ordered series of (date, value) observations.
///
/// `TimeSeries` is the output shape for NAV curves, per-date IC series,
/// and macro indicators. Dates are expected in ascending order; values may
/// be NaN where an observation is missing.
///
/// # Example
///
/// ```
/// use ronda_traits::{Date, TimeSeries};
///
/// let dates = vec![
///     Date::from_ymd_opt(2024, 1, 2).unwrap(),
///     Date::from_ymd_opt(2024, 1, 3).unwrap(),
/// ];
/// let nav = TimeSeries::new(dates, vec![1.0, 1.01]).unwrap();
/// assert_eq!(nav.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Creates a time series from parallel date and value vectors.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::Alignment`] if the vectors differ in length.
    pub fn new(dates: Vec<Date>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(RondaError::Alignment(format!(
                "time series has {} dates but {} values",
                dates.len(),
                values.len()
            )));
        }
        Ok(Self { dates, values })
    }

    /// Creates an empty time series.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns the dates of the series.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the values of the series.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the observation at position `i`, if any.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<(Date, f64)> {
        Some((*self.dates.get(i)?, *self.values.get(i)?))
    }

    /// Returns the last observation, if any.
    #[must_use]
    pub fn last(&self) -> Option<(Date, f64)> {
        if self.is_empty() {
            None
        } else {
            self.get(self.len() - 1)
        }
    }

    /// Iterates over (date, value) pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}
