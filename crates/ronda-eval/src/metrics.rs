//! Portfolio performance metrics.
//!
//! Summary statistics computed from a NAV curve after a backtest run.

use serde::{Deserialize, Serialize};

use ronda_traits::TimeSeries;
use ronda_traits::stats::MIN_STD_THRESHOLD;

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Performance summary of a NAV series.
///
/// All ratio metrics annualize with [`TRADING_DAYS_PER_YEAR`], assuming
/// the NAV is sampled at daily frequency. A flat NAV reports zero Sharpe
/// rather than an undefined one, so riskless-and-returnless runs compare
/// cleanly against real ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerfMetrics {
    /// Total return over the full series: `nav[last] / nav[first] - 1`.
    pub total_return: f64,
    /// Geometric annualized return.
    pub annualized_return: f64,
    /// Annualized standard deviation of period returns.
    pub annualized_volatility: f64,
    /// Annualized mean over standard deviation of period returns.
    pub sharpe_ratio: f64,
    /// Largest peak-to-trough decline, as a positive fraction.
    pub max_drawdown: f64,
    /// Number of return periods (one less than the NAV length).
    pub n_periods: usize,
}

impl PerfMetrics {
    /// Computes the summary from a NAV series.
    ///
    /// An empty or single-point series has no return periods; everything
    /// except `total_return` and `max_drawdown` is then NaN.
    #[must_use]
    pub fn from_nav(nav: &TimeSeries) -> Self {
        let values = nav.values();
        if values.is_empty() {
            return Self {
                total_return: f64::NAN,
                annualized_return: f64::NAN,
                annualized_volatility: f64::NAN,
                sharpe_ratio: f64::NAN,
                max_drawdown: f64::NAN,
                n_periods: 0,
            };
        }

        let first = values[0];
        let last = values[values.len() - 1];
        let total_return = if first > 0.0 { last / first - 1.0 } else { f64::NAN };

        let returns = period_returns(values);
        let n_periods = returns.len();

        let annualized_return = if n_periods > 0 {
            (1.0 + total_return).powf(TRADING_DAYS_PER_YEAR / n_periods as f64) - 1.0
        } else {
            f64::NAN
        };

        let (annualized_volatility, sharpe_ratio) = if n_periods >= 2 {
            let n = n_periods as f64;
            let mean = returns.iter().sum::<f64>() / n;
            let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
            let std = variance.sqrt();

            let volatility = std * TRADING_DAYS_PER_YEAR.sqrt();
            let sharpe = if std < MIN_STD_THRESHOLD {
                0.0
            } else {
                mean / std * TRADING_DAYS_PER_YEAR.sqrt()
            };
            (volatility, sharpe)
        } else {
            (f64::NAN, f64::NAN)
        };

        Self {
            total_return,
            annualized_return,
            annualized_volatility,
            sharpe_ratio,
            max_drawdown: max_drawdown(values),
            n_periods,
        }
    }
}

/// Simple returns between consecutive NAV points.
fn period_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter_map(|pair| {
            if pair[0].is_finite() && pair[1].is_finite() && pair[0] != 0.0 {
                Some(pair[1] / pair[0] - 1.0)
            } else {
                None
            }
        })
        .collect()
}

/// Largest peak-to-trough decline of a NAV curve, as a positive fraction.
fn max_drawdown(values: &[f64]) -> f64 {
    let mut max_dd = 0.0;
    let mut peak = f64::MIN;

    for &value in values {
        if !value.is_finite() {
            continue;
        }
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ronda_traits::Date;

    fn nav(values: Vec<f64>) -> TimeSeries {
        let dates: Vec<Date> = (0..values.len())
            .map(|i| Date::from_ymd_opt(2024, 1, 2 + i as u32).unwrap())
            .collect();
        TimeSeries::new(dates, values).unwrap()
    }

    #[test]
    fn test_flat_nav() {
        let metrics = PerfMetrics::from_nav(&nav(vec![1.0; 10]));
        assert_relative_eq!(metrics.total_return, 0.0);
        assert_relative_eq!(metrics.sharpe_ratio, 0.0);
        assert_relative_eq!(metrics.annualized_volatility, 0.0);
        assert_relative_eq!(metrics.max_drawdown, 0.0);
        assert_eq!(metrics.n_periods, 9);
    }

    #[test]
    fn test_total_return() {
        let metrics = PerfMetrics::from_nav(&nav(vec![1.0, 1.1, 1.21]));
        assert_relative_eq!(metrics.total_return, 0.21, epsilon = 1e-12);
        assert_eq!(metrics.n_periods, 2);
    }

    #[test]
    fn test_max_drawdown() {
        let metrics = PerfMetrics::from_nav(&nav(vec![1.0, 1.2, 0.9, 1.1]));
        // Peak 1.2 to trough 0.9.
        assert_relative_eq!(metrics.max_drawdown, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_monotonic_rise_has_zero_drawdown() {
        let metrics = PerfMetrics::from_nav(&nav(vec![1.0, 1.05, 1.1, 1.2]));
        assert_relative_eq!(metrics.max_drawdown, 0.0);
    }

    #[test]
    fn test_positive_returns_give_positive_sharpe() {
        let metrics = PerfMetrics::from_nav(&nav(vec![1.0, 1.01, 1.025, 1.03, 1.045]));
        assert!(metrics.sharpe_ratio > 0.0);
        assert!(metrics.annualized_volatility > 0.0);
        assert!(metrics.annualized_return > 0.0);
    }

    #[test]
    fn test_empty_nav() {
        let metrics = PerfMetrics::from_nav(&TimeSeries::empty());
        assert!(metrics.total_return.is_nan());
        assert!(metrics.sharpe_ratio.is_nan());
        assert_eq!(metrics.n_periods, 0);
    }

    #[test]
    fn test_single_point_nav() {
        let metrics = PerfMetrics::from_nav(&nav(vec![1.0]));
        assert_relative_eq!(metrics.total_return, 0.0);
        assert!(metrics.annualized_return.is_nan());
        assert!(metrics.sharpe_ratio.is_nan());
        assert_eq!(metrics.n_periods, 0);
    }

    #[test]
    fn test_annualization_of_steady_gain() {
        // Two periods of +1% each.
        let metrics = PerfMetrics::from_nav(&nav(vec![1.0, 1.01, 1.0201]));
        let expected = 1.0201_f64.powf(TRADING_DAYS_PER_YEAR / 2.0) - 1.0;
        assert_relative_eq!(metrics.annualized_return, expected, epsilon = 1e-10);
    }
}
