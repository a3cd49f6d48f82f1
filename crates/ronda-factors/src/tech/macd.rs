//! MACD histogram factor.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use ronda_traits::{Direction, Factor, FactorInput, Panel, Result, RondaError};

/// Configuration for the MACD factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdConfig {
    /// Span of the fast EMA in trading days (default: 12).
    pub fast: usize,
    /// Span of the slow EMA in trading days (default: 26).
    pub slow: usize,
    /// Span of the signal EMA over the fast/slow spread (default: 9).
    pub signal: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// MACD histogram factor.
///
/// Computes the spread between a fast and a slow exponential moving
/// average of close (DIF), smooths the spread with a signal EMA (DEA),
/// and reports the histogram `DIF - DEA`. Each EMA uses the recursive
/// form seeded at the first available close, with smoothing factor
/// `2 / (span + 1)`; a missing close leaves the running averages
/// unchanged.
///
/// A positive histogram reads as strengthening upward momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    config: MacdConfig,
}

impl Macd {
    /// Creates a MACD factor with the given configuration.
    #[must_use]
    pub const fn new(config: MacdConfig) -> Self {
        Self { config }
    }

    /// Returns the fast EMA span.
    #[must_use]
    pub const fn fast(&self) -> usize {
        self.config.fast
    }

    /// Returns the slow EMA span.
    #[must_use]
    pub const fn slow(&self) -> usize {
        self.config.slow
    }

    /// Returns the signal EMA span.
    #[must_use]
    pub const fn signal(&self) -> usize {
        self.config.signal
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(MacdConfig::default())
    }
}

impl Factor for Macd {
    fn name(&self) -> &'static str {
        "macd"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn lookback(&self) -> usize {
        self.config.slow
    }

    fn compute(&self, input: &FactorInput<'_>) -> Result<Panel> {
        let MacdConfig { fast, slow, signal } = self.config;
        if fast == 0 || slow == 0 || signal == 0 {
            return Err(RondaError::InvalidConfig(
                "macd spans must all be positive".to_string(),
            ));
        }
        if fast >= slow {
            return Err(RondaError::InvalidConfig(format!(
                "macd fast span ({fast}) must be shorter than the slow span ({slow})"
            )));
        }

        let close = input.ohlcv().close();
        let n_dates = close.n_dates();
        let prices = close.values();
        let mut values = Array2::from_elem(prices.dim(), f64::NAN);

        for j in 0..close.n_assets() {
            let column: Vec<f64> = (0..n_dates).map(|t| prices[(t, j)]).collect();
            let ema_fast = ema(&column, fast);
            let ema_slow = ema(&column, slow);

            let dif: Vec<f64> = ema_fast
                .iter()
                .zip(&ema_slow)
                .map(|(f, s)| f - s)
                .collect();
            let dea = ema(&dif, signal);

            for t in 0..n_dates {
                values[(t, j)] = dif[t] - dea[t];
            }
        }

        close.with_values(values)
    }
}

/// Recursive exponential moving average with smoothing `2 / (span + 1)`.
///
/// Seeded at the first finite value; a non-finite input leaves the state
/// unchanged and emits the carried average. Leading non-finite inputs
/// emit NaN.
fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut state: Option<f64> = None;
    values
        .iter()
        .map(|&value| {
            if value.is_finite() {
                let next = match state {
                    Some(prev) => alpha * value + (1.0 - alpha) * prev,
                    None => value,
                };
                state = Some(next);
            }
            state.unwrap_or(f64::NAN)
        })
        .collect()
}
