#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Data collaborators for the Ronda toolkit.
//!
//! Everything network-facing lives here, outside the core pipeline: the
//! Yahoo chart client for daily bars, the quote-summary fundamentals
//! resolver, the FRED macro client, and the request-keyed bar cache. All
//! fetches are async and must complete before their panels enter the
//! pipeline.
//!
//! # Environment Variables
//!
//! The FRED client reads `FRED_API_KEY` from the environment or a `.env`
//! file; the Yahoo endpoints need no key.

/// The version of the ronda-data crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod cache;
pub mod error;
pub mod fred;
pub mod yahoo;

// Re-exports
pub use cache::{BarCache, CachedBarLoader};
pub use error::{DataError, Result};
pub use fred::{FredClient, MacroIndicator};
pub use yahoo::YahooClient;
