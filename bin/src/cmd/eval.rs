//! Evaluation command implementation.

use anyhow::{Result, bail};
use ronda_eval::{IcMethod, ic_series, information_ratio, quantile_group_backtest};
use ronda_factors::FactorKind;
use ronda_traits::FactorInput;

use crate::data;

/// Evaluate one factor's predictive power: IC summary and quantile-group
/// mean returns on the latest usable cross-section.
pub(crate) async fn evaluate_factor(
    factor_name: &str,
    symbols: &[String],
    start: &str,
    end: &str,
    groups: usize,
    method: &str,
    demo: bool,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                     Factor Evaluation                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let kind: FactorKind = factor_name.parse()?;
    let start_date = data::parse_date(start)?;
    let end_date = data::parse_date(end)?;
    let method = parse_method(method)?;

    println!("Factor:   {} ({})", kind.name(), kind.description());
    println!("Universe: {}", symbols.join(", "));
    println!("Period:   {} to {}", start, end);
    println!("Method:   {:?}", method);
    println!("Source:   {}", if demo { "synthetic (demo)" } else { "Yahoo Finance" });
    println!();

    let (ohlcv, fundamentals) = if demo {
        let panel = data::demo_universe(symbols, start_date, end_date)?;
        let fundamentals = kind
            .requires_fundamentals()
            .then(|| data::demo_fundamentals(symbols));
        (panel, fundamentals)
    } else {
        let panel = data::load_universe(symbols, start_date, end_date).await?;
        let fundamentals = if kind.requires_fundamentals() {
            Some(data::load_fundamentals(symbols).await?)
        } else {
            None
        };
        (panel, fundamentals)
    };

    let factor = kind.build();
    let input = FactorInput::new(&ohlcv, fundamentals.as_ref());
    let raw = factor.compute(&input)?;

    // IC series over the whole period.
    let ic = ic_series(&raw, ohlcv.close(), method)?;
    let finite: Vec<f64> = ic.values().iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        bail!("no usable IC observations: every cross-section was too sparse");
    }
    let mean_ic = finite.iter().sum::<f64>() / finite.len() as f64;
    let positive = finite.iter().filter(|&&v| v > 0.0).count();

    println!("Information coefficient:");
    println!("{}", "-".repeat(40));
    println!("  Observations:     {:>10}", finite.len());
    println!("  Mean IC:          {:>10.4}", mean_ic);
    println!(
        "  Positive share:   {:>9.1}%",
        100.0 * positive as f64 / finite.len() as f64
    );
    match information_ratio(&ic) {
        Some(ir) => println!("  IC IR:            {:>10.4}", ir),
        None => println!("  IC IR:                   n/a"),
    }
    println!();

    // Quantile groups on the last cross-section with a forward return.
    let forward = ohlcv.close().forward_returns();
    let t = raw.n_dates().saturating_sub(2);
    let group_returns = quantile_group_backtest(
        raw.row(t).to_vec().as_slice(),
        forward.row(t).to_vec().as_slice(),
        groups,
    )?;

    println!("Quantile groups as of {} (low factor first):", raw.dates()[t]);
    println!("{}", "-".repeat(40));
    println!("{:<8} {:>8} {:>14}", "Group", "Assets", "Mean return");
    for (g, (mean, count)) in group_returns
        .mean_returns
        .iter()
        .zip(group_returns.counts.iter())
        .enumerate()
    {
        if mean.is_finite() {
            println!("{:<8} {:>8} {:>13.2}%", g + 1, count, mean * 100.0);
        } else {
            println!("{:<8} {:>8} {:>14}", g + 1, count, "n/a");
        }
    }
    println!(
        "\nTop-bottom spread: {:.2}%\n",
        group_returns.top_bottom_spread() * 100.0
    );

    Ok(())
}

/// Parse an IC method name.
fn parse_method(name: &str) -> Result<IcMethod> {
    match name.trim().to_lowercase().as_str() {
        "spearman" | "rank" => Ok(IcMethod::Spearman),
        "pearson" | "linear" => Ok(IcMethod::Pearson),
        other => bail!("unknown IC method: {other} (expected spearman or pearson)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("spearman").unwrap(), IcMethod::Spearman);
        assert_eq!(parse_method("Linear").unwrap(), IcMethod::Pearson);
        assert!(parse_method("kendall").is_err());
    }
}
