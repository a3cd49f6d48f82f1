#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Panel alignment for the Ronda toolkit.
//!
//! Turns heterogeneous per-asset bar frames into a single aligned OHLCV
//! panel bundle: cleaning first (names, numeric coercion, forward fill,
//! minimum history), then assembly over a union or intersection date index.

/// The version of the ronda-align crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod assemble;
pub mod clean;

// Re-exports
pub use assemble::{Join, align_universe};
pub use clean::{CleanBars, MIN_BARS, REQUIRED_FIELDS, clean_bars};
