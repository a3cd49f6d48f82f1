#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Factor scoring for the Ronda toolkit.
//!
//! This crate turns raw factor panels into a composite score panel in two
//! steps: cross-sectional normalization (rank + z-score, direction-aware)
//! and equal-weighted combination across factors.
//!
//! # Examples
//!
//! ```
//! use ndarray::array;
//! use ronda_score::{FactorScore, combine_scores, normalize_factor};
//! use ronda_traits::{Date, Direction, Panel};
//!
//! let dates = vec![Date::from_ymd_opt(2024, 1, 2).unwrap()];
//! let assets = vec!["AAPL".to_string(), "MSFT".to_string(), "TSLA".to_string()];
//!
//! let momentum = Panel::new(dates.clone(), assets.clone(), array![[0.05, -0.02, 0.10]]).unwrap();
//! let volatility = Panel::new(dates, assets, array![[0.30, 0.10, 0.20]]).unwrap();
//!
//! let factors = vec![
//!     FactorScore {
//!         name: "momentum".to_string(),
//!         panel: normalize_factor(&momentum, Direction::HigherIsBetter).unwrap(),
//!     },
//!     FactorScore {
//!         name: "volatility".to_string(),
//!         panel: normalize_factor(&volatility, Direction::LowerIsBetter).unwrap(),
//!     },
//! ];
//!
//! let composite = combine_scores(&factors).unwrap();
//! assert_eq!(composite.n_assets(), 3);
//! ```

/// The version of the ronda-score crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod combine;
pub mod normalize;

// Re-exports
pub use combine::{FactorScore, combine_scores};
pub use normalize::normalize_factor;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
