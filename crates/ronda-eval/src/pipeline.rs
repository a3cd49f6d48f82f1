//! End-to-end factor backtest pipeline.
//!
//! Chains normalization, score combination, portfolio construction, NAV
//! simulation, and IC diagnostics into a single call, so callers that do
//! not need the intermediate panels can go from raw factor exposures to a
//! performance report directly.

use serde::{Deserialize, Serialize};

use ronda_score::{FactorScore, combine_scores, normalize_factor};
use ronda_traits::{Direction, Panel, Result, TimeSeries};

use crate::backtest::run_backtest;
use crate::ic::{IcMethod, ic_series, information_ratio};
use crate::metrics::PerfMetrics;
use crate::portfolio::{Rebalance, build_weights};

/// A raw factor exposure panel, before normalization.
///
/// The direction states how raw values map to attractiveness, so the
/// pipeline can orient every factor the same way before averaging.
#[derive(Debug, Clone)]
pub struct RawFactor {
    /// Factor name, carried through for reporting.
    pub name: String,
    /// Whether larger or smaller raw values are more attractive.
    pub direction: Direction,
    /// Raw exposures, dates x assets.
    pub panel: Panel,
}

/// Configuration for the factor backtest pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of assets held at each rebalance.
    pub top_n: usize,
    /// Rebalance schedule for portfolio construction.
    pub rebalance: Rebalance,
    /// Correlation method for the IC diagnostics.
    pub ic_method: IcMethod,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            rebalance: Rebalance::MonthEnd,
            ic_method: IcMethod::Spearman,
        }
    }
}

/// Output of a full pipeline run.
///
/// Carries the final NAV and its summary metrics alongside the
/// intermediate panels, so callers can inspect how the portfolio was
/// formed without re-running the stages.
#[derive(Debug, Clone)]
pub struct BacktestReport {
    /// Portfolio NAV, seeded at 1.0.
    pub nav: TimeSeries,
    /// Performance summary of the NAV.
    pub metrics: PerfMetrics,
    /// Per-date information coefficient of the composite score.
    pub ic: TimeSeries,
    /// Mean of the finite IC observations, NaN when there are none.
    pub mean_ic: f64,
    /// Information ratio of the IC series, NaN when undefined.
    pub ir: f64,
    /// Composite cross-sectional scores after normalization.
    pub scores: Panel,
    /// Portfolio weights, dates x assets.
    pub weights: Panel,
}

/// Runs the full factor backtest pipeline.
///
/// Each factor is rank-normalized in its stated direction, the scores are
/// averaged into a composite, the composite drives top-N portfolio
/// construction on the configured schedule, and the resulting weights are
/// simulated against the price panel. IC diagnostics are computed from
/// the composite score against one-period forward returns.
///
/// All factor panels and the price panel must share the same date/asset
/// index.
///
/// # Errors
///
/// - [`ronda_traits::RondaError::Alignment`] if the panels do not share
///   an index.
/// - [`ronda_traits::RondaError::InvalidConfig`] if `top_n` is zero.
/// - [`ronda_traits::RondaError::Other`] if `factors` is empty.
///
/// # Example
///
/// ```rust
/// use ndarray::array;
/// use ronda_eval::{PipelineConfig, RawFactor, run_factor_backtest};
/// use ronda_traits::{Date, Direction, Panel};
///
/// let dates = vec![
///     Date::from_ymd_opt(2024, 1, 31).unwrap(),
///     Date::from_ymd_opt(2024, 2, 29).unwrap(),
///     Date::from_ymd_opt(2024, 3, 29).unwrap(),
/// ];
/// let assets = vec!["AAA".to_string(), "BBB".to_string()];
///
/// let momentum = Panel::new(
///     dates.clone(),
///     assets.clone(),
///     array![[0.2, -0.1], [0.3, -0.2], [0.1, 0.0]],
/// )
/// .unwrap();
/// let prices = Panel::new(
///     dates,
///     assets,
///     array![[100.0, 50.0], [110.0, 45.0], [121.0, 40.0]],
/// )
/// .unwrap();
///
/// let factors = vec![RawFactor {
///     name: "momentum".to_string(),
///     direction: Direction::HigherIsBetter,
///     panel: momentum,
/// }];
///
/// let config = PipelineConfig { top_n: 1, ..Default::default() };
/// let report = run_factor_backtest(&factors, &prices, &config).unwrap();
/// assert_eq!(report.nav.len(), 3);
/// ```
pub fn run_factor_backtest(
    factors: &[RawFactor],
    prices: &Panel,
    config: &PipelineConfig,
) -> Result<BacktestReport> {
    let scored: Vec<FactorScore> = factors
        .iter()
        .map(|factor| {
            Ok(FactorScore {
                name: factor.name.clone(),
                panel: normalize_factor(&factor.panel, factor.direction)?,
            })
        })
        .collect::<Result<_>>()?;

    let scores = combine_scores(&scored)?;
    let weights = build_weights(&scores, config.top_n, config.rebalance)?;
    let nav = run_backtest(&weights, prices)?;
    let ic = ic_series(&scores, prices, config.ic_method)?;

    let finite_ics: Vec<f64> = ic.values().iter().copied().filter(|v| v.is_finite()).collect();
    let mean_ic = if finite_ics.is_empty() {
        f64::NAN
    } else {
        finite_ics.iter().sum::<f64>() / finite_ics.len() as f64
    };
    let ir = information_ratio(&ic).unwrap_or(f64::NAN);

    let metrics = PerfMetrics::from_nav(&nav);

    Ok(BacktestReport {
        nav,
        metrics,
        ic,
        mean_ic,
        ir,
        scores,
        weights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use ronda_traits::Date;

    fn d(year: i32, month: u32, day: u32) -> Date {
        Date::from_ymd_opt(year, month, day).unwrap()
    }

    fn monthly_dates() -> Vec<Date> {
        vec![
            d(2024, 1, 31),
            d(2024, 2, 29),
            d(2024, 3, 29),
            d(2024, 4, 30),
        ]
    }

    fn assets() -> Vec<String> {
        vec!["AAA".to_string(), "BBB".to_string(), "CCC".to_string()]
    }

    fn price_panel() -> Panel {
        // AAA compounds +10% per period, BBB -10%, CCC spikes once.
        Panel::new(
            monthly_dates(),
            assets(),
            array![
                [100.0, 50.0, 200.0],
                [110.0, 45.0, 200.0],
                [121.0, 40.5, 225.0],
                [133.1, 36.45, 225.0],
            ],
        )
        .unwrap()
    }

    fn two_factors() -> Vec<RawFactor> {
        let momentum = Panel::new(
            monthly_dates(),
            assets(),
            array![
                [3.0, 2.0, 1.0],
                [3.0, 2.0, 1.0],
                [3.0, 2.0, 1.0],
                [3.0, 2.0, 1.0],
            ],
        )
        .unwrap();
        let volatility = Panel::new(
            monthly_dates(),
            assets(),
            array![
                [0.1, 0.2, 0.3],
                [0.1, 0.2, 0.3],
                [0.1, 0.2, 0.3],
                [0.1, 0.2, 0.3],
            ],
        )
        .unwrap();

        vec![
            RawFactor {
                name: "momentum".to_string(),
                direction: Direction::HigherIsBetter,
                panel: momentum,
            },
            RawFactor {
                name: "volatility".to_string(),
                direction: Direction::LowerIsBetter,
                panel: volatility,
            },
        ]
    }

    #[test]
    fn test_end_to_end_two_factors() {
        let config = PipelineConfig {
            top_n: 1,
            ..Default::default()
        };
        let report = run_factor_backtest(&two_factors(), &price_panel(), &config).unwrap();

        // Both factors favor AAA, so the top-1 portfolio holds it
        // throughout and compounds its +10% periods with a one-day lag.
        let expected_nav = [1.0, 1.1, 1.21, 1.331];
        assert_eq!(report.nav.len(), 4);
        for (value, expected) in report.nav.values().iter().zip(expected_nav) {
            assert_relative_eq!(*value, expected, epsilon = 1e-12);
        }
        assert_relative_eq!(report.metrics.total_return, 0.331, epsilon = 1e-12);

        // Composite scores orient both factors the same way.
        assert_relative_eq!(report.scores.values()[[0, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(report.scores.values()[[0, 1]], 0.0, epsilon = 1e-12);
        assert_relative_eq!(report.scores.values()[[0, 2]], -1.0, epsilon = 1e-12);

        assert!(report.weights.same_index(&report.scores));
        assert_eq!(report.ic.len(), 3);
    }

    #[test]
    fn test_ic_diagnostics() {
        let config = PipelineConfig {
            top_n: 1,
            ..Default::default()
        };
        let report = run_factor_backtest(&two_factors(), &price_panel(), &config).unwrap();

        // Forward-return rankings match the composite in periods 0 and 2
        // and diverge in period 1 when CCC spikes past AAA.
        let expected_ic = [0.5, -0.5, 0.5];
        for (value, expected) in report.ic.values().iter().zip(expected_ic) {
            assert_relative_eq!(*value, expected, epsilon = 1e-9);
        }
        assert_relative_eq!(report.mean_ic, 1.0 / 6.0, epsilon = 1e-9);

        let ic_std = (1.0_f64 / 3.0).sqrt();
        assert_relative_eq!(report.ir, (1.0 / 6.0) / ic_std, epsilon = 1e-9);
    }

    #[test]
    fn test_direction_flips_selection() {
        // A single LowerIsBetter factor on [3, 2, 1] rows favors CCC.
        let factor = RawFactor {
            name: "inverse".to_string(),
            direction: Direction::LowerIsBetter,
            panel: Panel::new(
                monthly_dates(),
                assets(),
                array![
                    [3.0, 2.0, 1.0],
                    [3.0, 2.0, 1.0],
                    [3.0, 2.0, 1.0],
                    [3.0, 2.0, 1.0],
                ],
            )
            .unwrap(),
        };
        let config = PipelineConfig {
            top_n: 1,
            ..Default::default()
        };
        let report = run_factor_backtest(&[factor], &price_panel(), &config).unwrap();

        // CCC returns 0%, +12.5%, 0%, lagged one period.
        let expected_nav = [1.0, 1.0, 1.125, 1.125];
        for (value, expected) in report.nav.values().iter().zip(expected_nav) {
            assert_relative_eq!(*value, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_empty_factor_list_rejected() {
        let config = PipelineConfig::default();
        let result = run_factor_backtest(&[], &price_panel(), &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_index_mismatch_rejected() {
        let factor = RawFactor {
            name: "momentum".to_string(),
            direction: Direction::HigherIsBetter,
            panel: Panel::new(
                vec![d(2024, 1, 31), d(2024, 2, 29)],
                assets(),
                array![[3.0, 2.0, 1.0], [3.0, 2.0, 1.0]],
            )
            .unwrap(),
        };
        let config = PipelineConfig {
            top_n: 1,
            ..Default::default()
        };
        let result = run_factor_backtest(&[factor], &price_panel(), &config);
        assert!(matches!(
            result,
            Err(ronda_traits::RondaError::Alignment(_))
        ));
    }

    #[test]
    fn test_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.rebalance, Rebalance::MonthEnd);
        assert_eq!(config.ic_method, IcMethod::Spearman);
    }
}
