//! Error types for the Ronda toolkit.
//!
//! This module defines the error types used throughout the Ronda ecosystem,
//! covering data cleaning, panel alignment, factor computation, and
//! backtesting.

use thiserror::Error;

/// The main error type for Ronda operations.
///
/// This enum encompasses all error cases that can occur when cleaning data,
/// aligning panels, computing factors, and running backtests.
#[derive(Debug, Error)]
pub enum RondaError {
    /// Input data failed a quality check: too few rows, unresolvable
    /// required fields, or unparseable values.
    #[error("Data quality: {0}")]
    DataQuality(String),

    /// Panels that must share a date/asset index do not.
    #[error("Alignment: {0}")]
    Alignment(String),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error when a required column is missing from the data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Error when a ticker is not present in the universe.
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RondaError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RondaError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Ronda operations.
///
/// This is a convenience type that uses [`RondaError`] as the error type.
/// The error parameter is defaulted so glob imports of this alias leave
/// `Result<T, E>` signatures with explicit error types intact.
pub type Result<T, E = RondaError> = std::result::Result<T, E>;
