//! Information coefficient diagnostics.
//!
//! The IC measures the cross-sectional correlation between factor values
//! and the forward returns they are supposed to predict. It is the first
//! sanity check applied to any factor before a full backtest.

use serde::{Deserialize, Serialize};

use ronda_traits::stats::{MIN_STD_THRESHOLD, rank_with_ties};
use ronda_traits::{Panel, Result, RondaError, TimeSeries};

/// Correlation method for the information coefficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IcMethod {
    /// Spearman rank correlation: robust to outliers and monotone
    /// transformations of the factor.
    #[default]
    Spearman,
    /// Pearson linear correlation on the raw values.
    Pearson,
}

/// Cross-sectional IC between one factor snapshot and one forward-return
/// snapshot.
///
/// Only assets with both values present enter the correlation. Returns
/// `None` when fewer than two such pairs exist, when the snapshots differ
/// in length, or when either side has no dispersion; sparse cross-sections
/// are an expected condition, not an error.
///
/// # Example
///
/// ```
/// use ronda_eval::{IcMethod, information_coefficient};
///
/// let factor = [1.0, 2.0, 3.0, 4.0];
/// let returns = [0.01, 0.02, 0.03, 0.04];
/// let ic = information_coefficient(&factor, &returns, IcMethod::Spearman).unwrap();
/// assert!((ic - 1.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn information_coefficient(
    factor: &[f64],
    forward_returns: &[f64],
    method: IcMethod,
) -> Option<f64> {
    if factor.len() != forward_returns.len() {
        return None;
    }

    let pairs: Vec<(f64, f64)> = factor
        .iter()
        .zip(forward_returns.iter())
        .filter_map(|(&f, &r)| {
            if f.is_finite() && r.is_finite() {
                Some((f, r))
            } else {
                None
            }
        })
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let xs: Vec<f64> = pairs.iter().map(|(f, _)| *f).collect();
    let ys: Vec<f64> = pairs.iter().map(|(_, r)| *r).collect();

    match method {
        IcMethod::Spearman => {
            let rank_x = rank_with_ties(&xs, true);
            let rank_y = rank_with_ties(&ys, true);
            pearson(&rank_x, &rank_y)
        }
        IcMethod::Pearson => pearson(&xs, &ys),
    }
}

/// Per-date IC series of a factor panel against a price panel.
///
/// Forward returns are derived from the prices, so the IC at date `t`
/// correlates the factor snapshot at `t` with the return realized from
/// `t` to `t+1`. The final date has no forward return and is dropped;
/// dates where the IC is undefined carry NaN.
///
/// # Errors
///
/// Returns [`RondaError::Alignment`] if the panels do not share a
/// date/asset index.
pub fn ic_series(factors: &Panel, prices: &Panel, method: IcMethod) -> Result<TimeSeries> {
    if !factors.same_index(prices) {
        return Err(RondaError::Alignment(
            "factor and price panels must share a date/asset index".to_string(),
        ));
    }

    let forward = prices.forward_returns();
    let n_transitions = factors.n_dates().saturating_sub(1);

    let mut values = Vec::with_capacity(n_transitions);
    for t in 0..n_transitions {
        let factor_row = factors.row(t).to_vec();
        let return_row = forward.row(t).to_vec();
        let ic = information_coefficient(&factor_row, &return_row, method).unwrap_or(f64::NAN);
        values.push(ic);
    }

    TimeSeries::new(factors.dates()[..n_transitions].to_vec(), values)
}

/// Information ratio of an IC series: mean IC over its standard deviation.
///
/// Uses the sample standard deviation over the finite observations and is
/// not annualized. Returns `None` with fewer than two finite ICs or a
/// degenerate standard deviation.
#[must_use]
pub fn information_ratio(ic: &TimeSeries) -> Option<f64> {
    let valid: Vec<f64> = ic
        .values()
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect();

    if valid.len() < 2 {
        return None;
    }

    let n = valid.len() as f64;
    let mean = valid.iter().sum::<f64>() / n;
    let variance = valid.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = variance.sqrt();

    if std < MIN_STD_THRESHOLD {
        None
    } else {
        Some(mean / std)
    }
}

/// Pearson correlation of two equal-length samples, `None` when either
/// side has zero variance.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}
