//! Factor trait for computing raw factor panels.
//!
//! This module defines the `Factor` trait, the core abstraction for turning
//! market data into a raw factor panel: one value per date and asset,
//! before any cross-sectional normalization. Factors can represent price
//! momentum, realized volatility, valuation ratios, or any other
//! quantitative measure used to rank assets.

use crate::{Direction, Fundamentals, OhlcvPanel, Panel, Result};

/// The inputs available to factor computation.
///
/// Every factor receives the cleaned OHLCV panel bundle; fundamental-data
/// factors additionally need a [`Fundamentals`] snapshot and must error
/// when it is absent.
#[derive(Debug, Clone, Copy)]
pub struct FactorInput<'a> {
    ohlcv: &'a OhlcvPanel,
    fundamentals: Option<&'a Fundamentals>,
}

impl<'a> FactorInput<'a> {
    /// Creates a factor input over an OHLCV panel, optionally with
    /// fundamentals.
    #[must_use]
    pub const fn new(ohlcv: &'a OhlcvPanel, fundamentals: Option<&'a Fundamentals>) -> Self {
        Self {
            ohlcv,
            fundamentals,
        }
    }

    /// Returns the OHLCV panel bundle.
    #[must_use]
    pub const fn ohlcv(&self) -> &'a OhlcvPanel {
        self.ohlcv
    }

    /// Returns the fundamentals snapshot, if one was supplied.
    #[must_use]
    pub const fn fundamentals(&self) -> Option<&'a Fundamentals> {
        self.fundamentals
    }
}

/// A factor that produces a raw (date × asset) value panel.
///
/// Implementations should be thread-safe (`Send + Sync`) so factor sets can
/// be computed in parallel. The output panel must share the input close
/// panel's date and asset axes; dates with insufficient history hold
/// missing values rather than being dropped.
///
/// # Example
///
/// ```
/// use ronda_traits::{Direction, Factor, FactorInput, Panel, Result};
///
/// struct CloseLevel;
///
/// impl Factor for CloseLevel {
///     fn name(&self) -> &'static str {
///         "close_level"
///     }
///
///     fn direction(&self) -> Direction {
///         Direction::HigherIsBetter
///     }
///
///     fn lookback(&self) -> usize {
///         1
///     }
///
///     fn compute(&self, input: &FactorInput<'_>) -> Result<Panel> {
///         Ok(input.ohlcv().close().clone())
///     }
/// }
/// ```
pub trait Factor: Send + Sync {
    /// Returns the canonical name of this factor.
    fn name(&self) -> &'static str;

    /// Returns the desirability direction of the raw values.
    ///
    /// Normalization ranks assets according to this direction so that a
    /// higher normalized score always reads as more attractive.
    fn direction(&self) -> Direction;

    /// Returns the history window in trading days required before the
    /// factor produces its first non-missing value.
    fn lookback(&self) -> usize;

    /// Whether this factor needs a fundamentals snapshot in its input.
    fn requires_fundamentals(&self) -> bool {
        false
    }

    /// Computes the raw factor panel.
    ///
    /// # Errors
    ///
    /// Returns an error if required inputs are absent (e.g. fundamentals
    /// for a valuation factor) or the panel history is shorter than the
    /// factor's lookback.
    fn compute(&self, input: &FactorInput<'_>) -> Result<Panel>;
}
