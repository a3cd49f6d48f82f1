//! Data loading utilities for the Ronda CLI.
//!
//! Two paths into the same aligned panel shape: live Yahoo downloads
//! through the cached loader, and a deterministic synthetic generator so
//! every command runs offline behind `--demo`.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Weekday};
use polars::prelude::*;
use ronda_align::{Join, align_universe};
use ronda_data::{CachedBarLoader, YahooClient};
use ronda_traits::{Date, FundamentalField, Fundamentals, OhlcvPanel, ReportPeriod};

/// Default ticker universe for commands that take none.
pub(crate) const DEFAULT_UNIVERSE: &str = "AAPL,MSFT,GOOGL,AMZN,META,NVDA,TSLA,UNH,JPM,V";

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<Date> {
    Date::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("invalid date (expected YYYY-MM-DD): {date_str}"))
}

/// Load an aligned OHLCV panel for the given symbols from Yahoo.
pub(crate) async fn load_universe(
    symbols: &[String],
    start: Date,
    end: Date,
) -> Result<OhlcvPanel> {
    let mut loader = CachedBarLoader::new(YahooClient::new());

    let mut frames = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let frame = loader
            .daily_bars(symbol, start, end)
            .await
            .with_context(|| format!("failed to download bars for {symbol}"))?;
        frames.push((symbol.clone(), frame));
    }

    Ok(align_universe(&frames, Join::Union)?)
}

/// Load a fundamentals snapshot for the given symbols from Yahoo.
pub(crate) async fn load_fundamentals(symbols: &[String]) -> Result<Fundamentals> {
    let client = YahooClient::new();
    let fundamentals = client
        .fundamentals(symbols)
        .await
        .context("failed to download fundamentals")?;
    Ok(fundamentals)
}

/// Build a synthetic OHLCV panel: one geometric walk per symbol over the
/// business days in `[start, end]`, seeded from the symbol name so runs
/// are reproducible.
pub(crate) fn demo_universe(symbols: &[String], start: Date, end: Date) -> Result<OhlcvPanel> {
    let dates = business_days(start, end);

    let mut frames = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let mut rng = Lcg::from_name(symbol);
        // Per-symbol drift in [-0.05%, +0.15%] daily, vol in [1%, 3%].
        let drift = -0.0005 + 0.002 * rng.next_f64();
        let vol = 0.01 + 0.02 * rng.next_f64();
        let base = 20.0 + 480.0 * rng.next_f64();

        let n = dates.len();
        let mut close = Vec::with_capacity(n);
        let mut open = Vec::with_capacity(n);
        let mut high = Vec::with_capacity(n);
        let mut low = Vec::with_capacity(n);
        let mut volume = Vec::with_capacity(n);

        let mut level = base;
        for _ in 0..n {
            let shock = vol * (rng.next_f64() - 0.5) * 2.0;
            level *= 1.0 + drift + shock;
            let spread = level * vol * rng.next_f64();
            close.push(level);
            open.push(level - spread * 0.5);
            high.push(level + spread);
            low.push(level - spread);
            volume.push((1.0e6 * (0.5 + rng.next_f64())).round());
        }

        let frame = df! {
            "date" => dates.clone(),
            "open" => open,
            "high" => high,
            "low" => low,
            "close" => close,
            "volume" => volume,
        }?;
        frames.push((symbol.clone(), frame));
    }

    Ok(align_universe(&frames, Join::Union)?)
}

/// Build a synthetic fundamentals snapshot matching [`demo_universe`].
pub(crate) fn demo_fundamentals(symbols: &[String]) -> Fundamentals {
    let mut fundamentals = Fundamentals::new();
    for symbol in symbols {
        let mut rng = Lcg::from_name(symbol);
        let market_cap = 1.0e10 + 2.9e12 * rng.next_f64();
        let book_value = market_cap * (0.05 + 0.45 * rng.next_f64());
        let net_income = book_value * (0.02 + 0.28 * rng.next_f64());
        let trailing_pe = 8.0 + 40.0 * rng.next_f64();

        fundamentals.insert(symbol, FundamentalField::MarketCap, ReportPeriod::Ttm, market_cap);
        fundamentals.insert(symbol, FundamentalField::BookValue, ReportPeriod::Annual, book_value);
        fundamentals.insert(symbol, FundamentalField::NetIncome, ReportPeriod::Annual, net_income);
        fundamentals.insert(symbol, FundamentalField::TrailingPe, ReportPeriod::Ttm, trailing_pe);
        fundamentals.insert(
            symbol,
            FundamentalField::DividendYield,
            ReportPeriod::Ttm,
            0.03 * rng.next_f64(),
        );
    }
    fundamentals
}

/// Business days (Monday through Friday) in `[start, end]`.
fn business_days(start: Date, end: Date) -> Vec<Date> {
    let mut dates = Vec::new();
    let mut date = start;
    while date <= end {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(date);
        }
        date += Duration::days(1);
    }
    dates
}

/// Small deterministic generator for demo data; not for anything else.
struct Lcg {
    state: u64,
}

impl Lcg {
    fn from_name(name: &str) -> Self {
        let mut state = 0xcbf2_9ce4_8422_2325_u64;
        for byte in name.bytes() {
            state ^= u64::from(byte);
            state = state.wrapping_mul(0x0100_0000_01b3);
        }
        Self { state: state | 1 }
    }

    fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.state >> 11) as f64 / (1_u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("invalid").is_err());
    }

    #[test]
    fn test_business_days_skip_weekends() {
        // 2024-01-05 is a Friday; the 6th and 7th fall away.
        let days = business_days(
            Date::from_ymd_opt(2024, 1, 5).unwrap(),
            Date::from_ymd_opt(2024, 1, 9).unwrap(),
        );
        assert_eq!(days.len(), 3);
        assert_eq!(days[1], Date::from_ymd_opt(2024, 1, 8).unwrap());
    }

    #[test]
    fn test_demo_universe_is_deterministic() {
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let end = Date::from_ymd_opt(2024, 3, 29).unwrap();

        let a = demo_universe(&symbols, start, end).unwrap();
        let b = demo_universe(&symbols, start, end).unwrap();

        assert_eq!(a.dates(), b.dates());
        assert_eq!(a.close().values(), b.close().values());
        assert_eq!(a.assets(), &["AAPL".to_string(), "MSFT".to_string()]);
    }

    #[test]
    fn test_demo_universe_passes_cleaning() {
        // The generator must clear the aligner's minimum-bar check.
        let symbols = vec!["TSLA".to_string()];
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let end = Date::from_ymd_opt(2024, 2, 29).unwrap();

        let panel = demo_universe(&symbols, start, end).unwrap();
        assert!(panel.dates().len() >= 30);
        assert!(panel.close().values().iter().all(|v| v.is_finite() && *v > 0.0));
    }

    #[test]
    fn test_demo_fundamentals_complete() {
        let symbols = vec!["AAPL".to_string()];
        let fundamentals = demo_fundamentals(&symbols);
        assert!(
            fundamentals
                .get("AAPL", FundamentalField::MarketCap, ReportPeriod::Ttm)
                .is_some()
        );
        assert!(
            fundamentals
                .get("AAPL", FundamentalField::BookValue, ReportPeriod::Annual)
                .is_some()
        );
    }
}
