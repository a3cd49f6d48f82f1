//! Technical factors computed from the close-price panel.
//!
//! Four indicators, each a config struct plus a [`ronda_traits::Factor`]
//! implementation:
//!
//! - Momentum: trailing return over a fixed window (default 20 days)
//! - Volatility: rolling standard deviation of log returns (default 20)
//! - RSI: relative strength index (default 14 days)
//! - MACD: histogram of the 12/26 EMA spread minus its 9-day signal EMA
//!
//! Output panels share the close panel's index; dates inside the warm-up
//! window hold missing values.

mod macd;
mod momentum;
mod rsi;
mod volatility;

pub use macd::{Macd, MacdConfig};
pub use momentum::{Momentum, MomentumConfig};
pub use rsi::{Rsi, RsiConfig};
pub use volatility::{Volatility, VolatilityConfig};
