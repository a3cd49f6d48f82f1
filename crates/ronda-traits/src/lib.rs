#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type definitions for the Ronda factor research toolkit.
//!
//! This crate provides the foundational building blocks for cross-sectional
//! factor research: the date-by-asset panel, factor abstractions, shared
//! statistical kernels, and the toolkit-wide error type.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod factor;
pub mod fundamentals;
pub mod panel;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{Result, RondaError};
pub use factor::{Factor, FactorInput};
pub use fundamentals::{FundamentalField, Fundamentals, ReportPeriod};
pub use panel::{OhlcvPanel, Panel};
pub use types::{Date, Direction, Ticker, TimeSeries};
