//! Single-factor evaluation on synthetic data.
//!
//! This example demonstrates:
//! - Building a synthetic OHLCV universe in memory
//! - Computing a raw factor through the closed [`FactorKind`] set
//! - Measuring predictive power with a rank IC series
//! - Splitting a cross-section into quantile groups and checking monotonicity
//!
//! Runs fully offline: no API keys, no network.

use chrono::{Datelike, Duration, Weekday};
use ndarray::Array2;
use ronda::prelude::*;

/// Stock universe to evaluate.
const UNIVERSE: &[&str] = &["AAPL", "AMZN", "GOOGL", "JPM", "KO", "META", "MSFT", "NVDA", "TSLA", "XOM"];

/// Number of business days to simulate.
const N_DAYS: usize = 126;

/// Quantile groups for the cross-sectional split.
const N_GROUPS: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Factor evaluation ({} assets, {} days)", UNIVERSE.len(), N_DAYS);
    println!("{}", "=".repeat(60));

    let ohlcv = synthetic_universe()?;

    for name in ["momentum", "rsi", "volatility"] {
        let kind: FactorKind = name.parse()?;
        let factor = kind.build();
        let input = FactorInput::new(&ohlcv, None);
        let raw = factor.compute(&input)?;

        let ic = ic_series(&raw, ohlcv.close(), IcMethod::Spearman)?;
        let finite: Vec<f64> = ic.values().iter().copied().filter(|v| v.is_finite()).collect();
        let mean_ic = finite.iter().sum::<f64>() / finite.len() as f64;
        let positive = finite.iter().filter(|&&v| v > 0.0).count();

        println!("\n{} ({:?}, lookback {} days)", factor.name(), factor.direction(), factor.lookback());
        println!("{}", "-".repeat(40));
        println!("  IC observations:  {:>8}", finite.len());
        println!("  Mean rank IC:     {:>8.4}", mean_ic);
        println!("  Positive share:   {:>7.1}%", 100.0 * positive as f64 / finite.len() as f64);
        if let Some(ir) = information_ratio(&ic) {
            println!("  IC IR:            {:>8.4}", ir);
        }
    }

    // Quantile split of momentum on the last cross-section that still has
    // a forward return.
    let momentum: FactorKind = "momentum".parse()?;
    let raw = momentum.build().compute(&FactorInput::new(&ohlcv, None))?;
    let forward = ohlcv.close().forward_returns();
    let t = raw.n_dates() - 2;
    let groups = quantile_group_backtest(
        raw.row(t).to_vec().as_slice(),
        forward.row(t).to_vec().as_slice(),
        N_GROUPS,
    )?;

    println!("\nMomentum quantiles as of {} (low factor first):", raw.dates()[t]);
    println!("{}", "-".repeat(40));
    for (g, (mean, count)) in groups.mean_returns.iter().zip(groups.counts.iter()).enumerate() {
        println!("  Q{}  {:>2} assets  {:>8.2}%", g + 1, count, mean * 100.0);
    }
    println!("  Top-bottom spread: {:.2}%", groups.top_bottom_spread() * 100.0);

    Ok(())
}

/// Deterministic synthetic OHLCV universe with momentum baked in: each
/// asset's drift persists, so trailing returns carry signal.
fn synthetic_universe() -> Result<OhlcvPanel> {
    let dates = business_days(Date::from_ymd_opt(2024, 1, 2).unwrap(), N_DAYS);
    let assets: Vec<String> = UNIVERSE.iter().map(|s| s.to_string()).collect();
    let (n, m) = (dates.len(), assets.len());

    let mut close = Array2::zeros((n, m));
    let mut open = Array2::zeros((n, m));
    let mut high = Array2::zeros((n, m));
    let mut low = Array2::zeros((n, m));
    let mut volume = Array2::zeros((n, m));

    for (j, asset) in assets.iter().enumerate() {
        let seed = asset.bytes().fold(7_u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        let mut state = seed | 1;
        let mut next = move || {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 11) as f64 / (1_u64 << 53) as f64
        };

        let drift = -0.001 + 0.003 * next();
        let vol = 0.005 + 0.015 * next();
        let mut level = 40.0 + 300.0 * next();
        for i in 0..n {
            let prev = level;
            level *= 1.0 + drift + vol * (next() - 0.5) * 2.0;
            close[(i, j)] = level;
            open[(i, j)] = prev;
            high[(i, j)] = level.max(prev) * (1.0 + 0.002 * next());
            low[(i, j)] = level.min(prev) * (1.0 - 0.002 * next());
            volume[(i, j)] = 1.0e6 + 9.0e6 * next();
        }
    }

    let make = |values: Array2<f64>| Panel::new(dates.clone(), assets.clone(), values);
    OhlcvPanel::new(make(open)?, make(high)?, make(low)?, make(close)?, make(volume)?)
}

/// Business days starting at `start`, skipping weekends.
fn business_days(start: Date, n: usize) -> Vec<Date> {
    let mut dates = Vec::with_capacity(n);
    let mut date = start;
    while dates.len() < n {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(date);
        }
        date += Duration::days(1);
    }
    dates
}
