#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Portfolio construction, backtesting, and factor diagnostics.
//!
//! The modules here consume the score panels produced by `ronda-score`
//! and the price panels produced by `ronda-align`:
//!
//! - [`portfolio`] builds forward-filled top-N equal-weight matrices on a
//!   period-end rebalance schedule.
//! - [`backtest`] compounds lagged weights against forward returns into a
//!   NAV series.
//! - [`discrete`] is the single-period rebalance-every-date variant.
//! - [`ic`] and [`quantile`] measure factor quality directly.
//! - [`metrics`] summarizes NAV curves.
//! - [`pipeline`] chains the whole research loop into one call.

/// The version of the ronda-eval crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod backtest;
pub mod discrete;
pub mod ic;
pub mod metrics;
pub mod pipeline;
pub mod portfolio;
pub mod quantile;

// Re-exports
pub use backtest::run_backtest;
pub use discrete::backtest_discrete;
pub use ic::{IcMethod, ic_series, information_coefficient, information_ratio};
pub use metrics::{PerfMetrics, TRADING_DAYS_PER_YEAR};
pub use pipeline::{BacktestReport, PipelineConfig, RawFactor, run_factor_backtest};
pub use portfolio::{Rebalance, build_weights, rebalance_dates};
pub use quantile::{GroupReturns, quantile_group_backtest};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
