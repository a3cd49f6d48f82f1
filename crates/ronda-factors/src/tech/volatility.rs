//! Realized volatility factor: rolling standard deviation of log returns.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use ronda_traits::{Direction, Factor, FactorInput, Panel, Result, RondaError};

/// Configuration for the volatility factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityConfig {
    /// Rolling window over daily log returns, in trading days (default: 20).
    pub window: usize,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self { window: 20 }
    }
}

/// Realized volatility factor.
///
/// Computes daily log returns `ln(close[t] / close[t-1])` per asset, then
/// the rolling sample standard deviation over the window. A window that
/// contains any missing return yields a missing value, so the first
/// defined date is `window` bars in.
#[derive(Debug, Clone)]
pub struct Volatility {
    config: VolatilityConfig,
}

impl Volatility {
    /// Creates a volatility factor with the given configuration.
    #[must_use]
    pub const fn new(config: VolatilityConfig) -> Self {
        Self { config }
    }

    /// Returns the rolling window in trading days.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.config.window
    }
}

impl Default for Volatility {
    fn default() -> Self {
        Self::new(VolatilityConfig::default())
    }
}

impl Factor for Volatility {
    fn name(&self) -> &'static str {
        "volatility"
    }

    fn direction(&self) -> Direction {
        Direction::LowerIsBetter
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn compute(&self, input: &FactorInput<'_>) -> Result<Panel> {
        let window = self.config.window;
        if window < 2 {
            return Err(RondaError::InvalidConfig(
                "volatility window must be at least 2 days".to_string(),
            ));
        }

        let close = input.ohlcv().close();
        let n_dates = close.n_dates();
        if window >= n_dates {
            return Err(RondaError::DataQuality(format!(
                "volatility window of {window} days needs more than {n_dates} dates of history"
            )));
        }

        let prices = close.values();
        let mut values = Array2::from_elem(prices.dim(), f64::NAN);
        for j in 0..close.n_assets() {
            let log_returns: Vec<f64> = (0..n_dates)
                .map(|t| {
                    if t == 0 {
                        return f64::NAN;
                    }
                    let prev = prices[(t - 1, j)];
                    let curr = prices[(t, j)];
                    if prev > 0.0 && curr > 0.0 {
                        (curr / prev).ln()
                    } else {
                        f64::NAN
                    }
                })
                .collect();

            for t in window..n_dates {
                let slice = &log_returns[t + 1 - window..=t];
                if slice.iter().all(|r| r.is_finite()) {
                    values[(t, j)] = sample_std(slice);
                }
            }
        }

        close.with_values(values)
    }
}

/// Sample standard deviation of a slice of finite values.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}
