//! Multi-factor backtest on synthetic data.
//!
//! This example demonstrates:
//! - Building aligned price and factor panels in memory
//! - Normalizing momentum and volatility factors in their stated directions
//! - Combining them into one composite score
//! - Running the top-N equal-weight pipeline and printing NAV and metrics
//!
//! Runs fully offline: no API keys, no network.

use chrono::{Datelike, Duration, Weekday};
use ndarray::Array2;
use ronda::prelude::*;

/// Stock universe to backtest.
const UNIVERSE: &[&str] = &["AAPL", "AMZN", "GOOGL", "JPM", "META", "MSFT", "NVDA", "TSLA"];

/// Number of business days to simulate.
const N_DAYS: usize = 252;

/// Momentum lookback in trading days.
const MOMENTUM_DAYS: usize = 20;

/// Assets held at each month-end rebalance.
const TOP_N: usize = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Multi-factor backtest ({} assets, {} days)", UNIVERSE.len(), N_DAYS);
    println!("{}", "=".repeat(60));

    let dates = business_days(Date::from_ymd_opt(2024, 1, 2).unwrap(), N_DAYS);
    let assets: Vec<String> = UNIVERSE.iter().map(|s| s.to_string()).collect();
    let prices = synthetic_prices(&dates, &assets)?;

    // Raw factor panels computed from the price panel.
    let momentum = trailing_return(&prices, MOMENTUM_DAYS)?;
    let volatility = rolling_return_std(&prices, MOMENTUM_DAYS)?;

    let factors = vec![
        RawFactor {
            name: "momentum".to_string(),
            direction: Direction::HigherIsBetter,
            panel: momentum,
        },
        RawFactor {
            name: "volatility".to_string(),
            direction: Direction::LowerIsBetter,
            panel: volatility,
        },
    ];

    let config = PipelineConfig {
        top_n: TOP_N,
        rebalance: Rebalance::MonthEnd,
        ..Default::default()
    };
    let report = run_factor_backtest(&factors, &prices, &config)?;

    println!("\nNAV (month ends):");
    for (date, value) in report.nav.iter() {
        if is_month_end(date, report.nav.dates()) {
            println!("  {}  {:8.4}", date, value);
        }
    }

    let m = &report.metrics;
    println!("\nPerformance:");
    println!("  Total return:      {:8.2}%", m.total_return * 100.0);
    println!("  Annualized return: {:8.2}%", m.annualized_return * 100.0);
    println!("  Sharpe ratio:      {:8.2}", m.sharpe_ratio);
    println!("  Max drawdown:      {:8.2}%", m.max_drawdown * 100.0);
    println!("  Mean IC:           {:8.4}", report.mean_ic);

    Ok(())
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

/// Whether `date` is the last entry of its month within `dates`. The final
/// date always closes its month.
fn is_month_end(date: Date, dates: &[Date]) -> bool {
    dates
        .iter()
        .find(|d| **d > date)
        .is_none_or(|next| next.month() != date.month())
}

/// Deterministic geometric walks, one column per asset.
fn synthetic_prices(dates: &[Date], assets: &[String]) -> Result<Panel> {
    let mut values = Array2::zeros((dates.len(), assets.len()));
    for (j, asset) in assets.iter().enumerate() {
        let seed = asset.bytes().fold(7_u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        let mut state = seed | 1;
        let mut next = move || {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 11) as f64 / (1_u64 << 53) as f64
        };

        let drift = -0.0005 + 0.002 * next();
        let vol = 0.008 + 0.02 * next();
        let mut level = 50.0 + 400.0 * next();
        for i in 0..dates.len() {
            level *= 1.0 + drift + vol * (next() - 0.5) * 2.0;
            values[(i, j)] = level;
        }
    }
    Panel::new(dates.to_vec(), assets.to_vec(), values)
}

/// Trailing `window`-day simple return per asset.
fn trailing_return(prices: &Panel, window: usize) -> Result<Panel> {
    let mut values = Array2::from_elem(prices.values().dim(), f64::NAN);
    for i in window..prices.n_dates() {
        for j in 0..prices.n_assets() {
            let past = prices.values()[(i - window, j)];
            let now = prices.values()[(i, j)];
            if past.is_finite() && now.is_finite() && past != 0.0 {
                values[(i, j)] = now / past - 1.0;
            }
        }
    }
    prices.with_values(values)
}

/// Rolling `window`-day standard deviation of daily returns per asset.
fn rolling_return_std(prices: &Panel, window: usize) -> Result<Panel> {
    let returns = prices.pct_change();
    let mut values = Array2::from_elem(prices.values().dim(), f64::NAN);
    for i in window..prices.n_dates() {
        for j in 0..prices.n_assets() {
            let slice: Vec<f64> = (i - window + 1..=i)
                .map(|t| returns.values()[(t, j)])
                .filter(|v| v.is_finite())
                .collect();
            if slice.len() >= 2 {
                let n = slice.len() as f64;
                let mean = slice.iter().sum::<f64>() / n;
                let var = slice.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
                values[(i, j)] = var.sqrt();
            }
        }
    }
    prices.with_values(values)
}
