//! Backtest command implementation.

use anyhow::{Result, bail};
use ronda_eval::{PipelineConfig, Rebalance, run_factor_backtest};

use crate::cmd::{compute_raw_factors, parse_kinds};
use crate::data;

/// Run the full factor backtest pipeline and report the results.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run_backtest(
    factor_names: &[String],
    symbols: &[String],
    start: &str,
    end: &str,
    top_n: usize,
    rebalance: &str,
    format: &str,
    demo: bool,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                        Backtesting                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let kinds = parse_kinds(factor_names)?;
    let start_date = data::parse_date(start)?;
    let end_date = data::parse_date(end)?;
    let rebalance = parse_rebalance(rebalance)?;

    println!("Factors:   {}", factor_names.join(", "));
    println!("Universe:  {}", symbols.join(", "));
    println!("Period:    {} to {}", start, end);
    println!("Top N:     {}", top_n);
    println!("Rebalance: {:?}", rebalance);
    println!("Source:    {}", if demo { "synthetic (demo)" } else { "Yahoo Finance" });
    println!();

    let needs_fundamentals = kinds.iter().any(|k| k.requires_fundamentals());
    let (ohlcv, fundamentals) = if demo {
        let panel = data::demo_universe(symbols, start_date, end_date)?;
        let fundamentals = needs_fundamentals.then(|| data::demo_fundamentals(symbols));
        (panel, fundamentals)
    } else {
        let panel = data::load_universe(symbols, start_date, end_date).await?;
        let fundamentals = if needs_fundamentals {
            Some(data::load_fundamentals(symbols).await?)
        } else {
            None
        };
        (panel, fundamentals)
    };

    let raw = compute_raw_factors(&kinds, &ohlcv, fundamentals.as_ref())?;
    let config = PipelineConfig {
        top_n,
        rebalance,
        ..Default::default()
    };
    let report = run_factor_backtest(&raw, ohlcv.close(), &config)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report.metrics)?);
        return Ok(());
    }

    println!("NAV (last 10 observations):");
    println!("{}", "-".repeat(40));
    let tail_start = report.nav.len().saturating_sub(10);
    for i in tail_start..report.nav.len() {
        if let Some((date, value)) = report.nav.get(i) {
            println!("  {}  {:>10.4}", date, value);
        }
    }
    println!();

    let metrics = &report.metrics;
    println!("Performance:");
    println!("{}", "-".repeat(40));
    println!("  Total return:          {:>10.2}%", metrics.total_return * 100.0);
    println!("  Annualized return:     {:>10.2}%", metrics.annualized_return * 100.0);
    println!("  Annualized volatility: {:>10.2}%", metrics.annualized_volatility * 100.0);
    println!("  Sharpe ratio:          {:>10.2}", metrics.sharpe_ratio);
    println!("  Max drawdown:          {:>10.2}%", metrics.max_drawdown * 100.0);
    println!("  Periods:               {:>10}", metrics.n_periods);
    println!();
    println!("Diagnostics:");
    println!("{}", "-".repeat(40));
    println!("  Mean IC:               {:>10.4}", report.mean_ic);
    println!("  Information ratio:     {:>10.4}", report.ir);
    println!();

    Ok(())
}

/// Parse a rebalance schedule name.
fn parse_rebalance(name: &str) -> Result<Rebalance> {
    match name.trim().to_lowercase().as_str() {
        "week-end" | "weekly" => Ok(Rebalance::WeekEnd),
        "month-end" | "monthly" => Ok(Rebalance::MonthEnd),
        "quarter-end" | "quarterly" => Ok(Rebalance::QuarterEnd),
        other => bail!("unknown rebalance schedule: {other} (expected week-end, month-end, or quarter-end)"),
    }
}
