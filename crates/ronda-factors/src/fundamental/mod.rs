//! Fundamental factors broadcast from per-asset snapshot statistics.
//!
//! These factors read a [`ronda_traits::Fundamentals`] snapshot rather
//! than price history: each asset gets a single ratio, broadcast across
//! the close panel's date index so the output panel aligns with the
//! technical factors. An asset whose inputs are absent from the snapshot
//! holds missing values.

mod quality;
mod value;

pub use quality::ReturnOnEquity;
pub use value::{BookToMarket, DividendYield, EarningsYield};
