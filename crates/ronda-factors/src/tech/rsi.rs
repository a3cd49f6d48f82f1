//! Relative strength index factor.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use ronda_traits::{Direction, Factor, FactorInput, Panel, Result, RondaError};

/// Configuration for the RSI factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiConfig {
    /// Averaging period over daily gains and losses (default: 14).
    pub period: usize,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Relative strength index factor.
///
/// Splits each day's close-to-close change into a gain and a loss
/// component (a missing change counts as zero in both), averages each
/// over the period with a simple rolling mean, and maps the ratio into
/// `100 - 100 / (1 + RS)`. Values lie in `[0, 100]`; readings above 70
/// are conventionally overbought and below 30 oversold, which is why the
/// factor's direction treats low RSI as attractive.
///
/// A period with gains and no losses reads 100; a period with neither
/// (flat or entirely missing prices) has no defined relative strength
/// and stays missing.
#[derive(Debug, Clone)]
pub struct Rsi {
    config: RsiConfig,
}

impl Rsi {
    /// Creates an RSI factor with the given configuration.
    #[must_use]
    pub const fn new(config: RsiConfig) -> Self {
        Self { config }
    }

    /// Returns the averaging period in trading days.
    #[must_use]
    pub const fn period(&self) -> usize {
        self.config.period
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(RsiConfig::default())
    }
}

impl Factor for Rsi {
    fn name(&self) -> &'static str {
        "rsi"
    }

    fn direction(&self) -> Direction {
        Direction::LowerIsBetter
    }

    fn lookback(&self) -> usize {
        self.config.period
    }

    fn compute(&self, input: &FactorInput<'_>) -> Result<Panel> {
        let period = self.config.period;
        if period == 0 {
            return Err(RondaError::InvalidConfig(
                "rsi period must be a positive number of days".to_string(),
            ));
        }

        let close = input.ohlcv().close();
        let n_dates = close.n_dates();
        if period > n_dates {
            return Err(RondaError::DataQuality(format!(
                "rsi period of {period} days needs at least {period} dates, panel has {n_dates}"
            )));
        }

        let prices = close.values();
        let mut values = Array2::from_elem(prices.dim(), f64::NAN);
        for j in 0..close.n_assets() {
            let mut gains = vec![0.0; n_dates];
            let mut losses = vec![0.0; n_dates];
            for t in 1..n_dates {
                let delta = prices[(t, j)] - prices[(t - 1, j)];
                if delta.is_finite() {
                    if delta > 0.0 {
                        gains[t] = delta;
                    } else {
                        losses[t] = -delta;
                    }
                }
            }

            for t in (period - 1)..n_dates {
                let start = t + 1 - period;
                let avg_gain = gains[start..=t].iter().sum::<f64>() / period as f64;
                let avg_loss = losses[start..=t].iter().sum::<f64>() / period as f64;
                // avg_loss of zero drives RS to infinity (RSI 100) when any
                // gain exists, and to 0/0 (missing) when the window is flat.
                let rs = avg_gain / avg_loss;
                values[(t, j)] = 100.0 - 100.0 / (1.0 + rs);
            }
        }

        close.with_values(values)
    }
}
