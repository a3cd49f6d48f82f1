#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! Factor research toolkit for cross-sectional equity strategies.
//!
//! ronda is an umbrella crate that re-exports all ronda sub-crates for
//! convenience. The pipeline runs in stages: raw bars are cleaned and
//! aligned into panels, factors are computed and rank-normalized per
//! date, combined into one composite score, converted into a top-N
//! equal-weight portfolio, and simulated against forward returns.
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::array;
//! use ronda::eval::{PipelineConfig, RawFactor, run_factor_backtest};
//! use ronda::{Date, Direction, Panel};
//!
//! # fn main() -> ronda::Result<()> {
//! let dates = vec![
//!     Date::from_ymd_opt(2024, 1, 31).unwrap(),
//!     Date::from_ymd_opt(2024, 2, 29).unwrap(),
//!     Date::from_ymd_opt(2024, 3, 29).unwrap(),
//! ];
//! let assets = vec!["AAPL".to_string(), "MSFT".to_string()];
//!
//! let momentum = RawFactor {
//!     name: "momentum".to_string(),
//!     direction: Direction::HigherIsBetter,
//!     panel: Panel::new(
//!         dates.clone(),
//!         assets.clone(),
//!         array![[0.10, 0.02], [0.12, 0.01], [0.08, 0.03]],
//!     )?,
//! };
//! let prices = Panel::new(
//!     dates,
//!     assets,
//!     array![[185.0, 400.0], [189.0, 404.0], [192.0, 402.0]],
//! )?;
//!
//! let config = PipelineConfig { top_n: 1, ..Default::default() };
//! let report = run_factor_backtest(&[momentum], &prices, &config)?;
//! assert_eq!(report.nav.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types ([`Panel`], [`Factor`], errors, stats kernels)
//! - [`align`] - Bar cleaning and universe alignment
//! - [`factors`] - Raw factor computation and the closed [`FactorKind`] set
//! - [`score`] - Cross-sectional normalization and score combination
//! - [`eval`] - Portfolio construction, backtests, IC, and metrics
//! - [`data`] - Yahoo/FRED data clients and the bar cache

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core type definitions for ronda.
///
/// Re-exports [`ronda_traits`]: the panel container, the [`Factor`]
/// abstraction, the fundamentals store, the shared statistical kernels,
/// and the toolkit-wide error type.
pub mod traits {
    pub use ronda_traits::*;
}

/// Bar cleaning and panel alignment.
///
/// Re-exports [`ronda_align`]: per-asset bar cleaning and assembly of
/// multi-asset OHLCV panels over a union or intersection date index.
pub mod align {
    pub use ronda_align::*;
}

/// Raw factor computation.
///
/// Re-exports [`ronda_factors`]: technical factors computed from the
/// OHLCV panel, fundamental factors broadcast from snapshot statistics,
/// and the closed [`FactorKind`] enumeration.
pub mod factors {
    pub use ronda_factors::*;
}

/// Cross-sectional factor scoring.
///
/// Re-exports [`ronda_score`]: direction-aware rank-plus-z-score
/// normalization and equal-weighted combination into a composite score.
pub mod score {
    pub use ronda_score::*;
}

/// Portfolio construction, backtesting, and diagnostics.
///
/// Re-exports [`ronda_eval`]: top-N weight construction, the NAV
/// backtests, information-coefficient and quantile-group analytics,
/// performance metrics, and the composed pipeline entry point.
pub mod eval {
    pub use ronda_eval::*;
}

/// Data clients.
///
/// Re-exports [`ronda_data`]: the Yahoo chart and quote-summary clients,
/// the FRED macro client, and the request-keyed bar cache.
pub mod data {
    pub use ronda_data::*;
}

// Re-export the types almost every caller touches.
pub use ronda_factors::{FactorCategory, FactorKind};
pub use ronda_traits::{
    Date, Direction, Factor, FactorInput, Fundamentals, OhlcvPanel, Panel, Result, RondaError,
    Ticker, TimeSeries,
};

/// Commonly used imports for working with ronda.
///
/// ```
/// use ronda::prelude::*;
/// ```
pub mod prelude {
    pub use ronda_align::{Join, align_universe, clean_bars};
    pub use ronda_eval::{
        BacktestReport, IcMethod, PerfMetrics, PipelineConfig, RawFactor, Rebalance,
        backtest_discrete, build_weights, ic_series, information_coefficient,
        information_ratio, quantile_group_backtest, run_backtest, run_factor_backtest,
    };
    pub use ronda_factors::{FactorCategory, FactorKind};
    pub use ronda_score::{FactorScore, combine_scores, normalize_factor};
    pub use ronda_traits::{
        Date, Direction, Factor, FactorInput, FundamentalField, Fundamentals, OhlcvPanel, Panel,
        ReportPeriod, Result, RondaError, Ticker, TimeSeries,
    };
}
