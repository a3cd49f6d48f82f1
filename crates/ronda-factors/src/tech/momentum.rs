//! Price momentum factor: trailing return over a fixed window.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use ronda_traits::{Direction, Factor, FactorInput, Panel, Result, RondaError};

/// Configuration for the momentum factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Return window in trading days (default: 20).
    pub window: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { window: 20 }
    }
}

/// Price momentum factor.
///
/// Computes `close[t] / close[t - window] - 1` per asset. The first
/// `window` dates of each column hold missing values, as does any date
/// where either endpoint price is missing.
#[derive(Debug, Clone)]
pub struct Momentum {
    config: MomentumConfig,
}

impl Momentum {
    /// Creates a momentum factor with the given configuration.
    #[must_use]
    pub const fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    /// Returns the return window in trading days.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.config.window
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(MomentumConfig::default())
    }
}

impl Factor for Momentum {
    fn name(&self) -> &'static str {
        "momentum"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn compute(&self, input: &FactorInput<'_>) -> Result<Panel> {
        let window = self.config.window;
        if window == 0 {
            return Err(RondaError::InvalidConfig(
                "momentum window must be a positive number of days".to_string(),
            ));
        }

        let close = input.ohlcv().close();
        let n_dates = close.n_dates();
        if window >= n_dates {
            return Err(RondaError::DataQuality(format!(
                "momentum window of {window} days needs more than {n_dates} dates of history"
            )));
        }

        let prices = close.values();
        let mut values = Array2::from_elem(prices.dim(), f64::NAN);
        for j in 0..close.n_assets() {
            for t in window..n_dates {
                let curr = prices[(t, j)];
                let base = prices[(t - window, j)];
                if curr.is_finite() && base.is_finite() && base != 0.0 {
                    values[(t, j)] = curr / base - 1.0;
                }
            }
        }

        close.with_values(values)
    }
}
