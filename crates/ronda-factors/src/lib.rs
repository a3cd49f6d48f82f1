#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Raw factor computation.
//!
//! # Examples
//!
//! ```
//! use ndarray::array;
//! use ronda_factors::FactorKind;
//! use ronda_factors::tech::{Momentum, MomentumConfig};
//! use ronda_traits::{Date, Factor, FactorInput, OhlcvPanel, Panel};
//!
//! let close = Panel::new(
//!     (0..4u32)
//!         .map(|i| Date::from_ymd_opt(2024, 1, 2 + i).unwrap())
//!         .collect(),
//!     vec!["AAPL".to_string()],
//!     array![[150.0], [153.0], [151.5], [156.0]],
//! )
//! .unwrap();
//! let ohlcv = OhlcvPanel::new(
//!     close.clone(),
//!     close.clone(),
//!     close.clone(),
//!     close.clone(),
//!     close,
//! )
//! .unwrap();
//!
//! let factor = Momentum::new(MomentumConfig { window: 2 });
//! let panel = factor.compute(&FactorInput::new(&ohlcv, None)).unwrap();
//! assert_eq!(panel.n_dates(), 4);
//!
//! // Or go through the closed factor set.
//! assert_eq!(FactorKind::all().len(), 8);
//! ```

/// The version of the ronda-factors crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod fundamental;
pub mod kind;
pub mod tech;

// Re-exports
pub use kind::{FactorCategory, FactorKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
