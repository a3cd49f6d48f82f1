//! Score command implementation.

use anyhow::Result;
use ronda_score::{FactorScore, combine_scores, normalize_factor};

use crate::cmd::{compute_raw_factors, parse_kinds};
use crate::data;

/// Compute and print the latest composite cross-sectional scores.
pub(crate) async fn show_scores(
    factor_names: &[String],
    symbols: &[String],
    start: &str,
    end: &str,
    demo: bool,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                     Composite Scores                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let kinds = parse_kinds(factor_names)?;
    let start_date = data::parse_date(start)?;
    let end_date = data::parse_date(end)?;

    println!("Factors:  {}", factor_names.join(", "));
    println!("Universe: {}", symbols.join(", "));
    println!("Period:   {} to {}", start, end);
    println!("Source:   {}", if demo { "synthetic (demo)" } else { "Yahoo Finance" });
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
    let scored: Vec<FactorScore> = raw
        .iter()
        .map(|factor| {
            Ok(FactorScore {
                name: factor.name.clone(),
                panel: normalize_factor(&factor.panel, factor.direction)?,
            })
        })
        .collect::<ronda_traits::Result<_>>()?;
    let composite = combine_scores(&scored)?;

    let last = composite.n_dates() - 1;
    let date = composite.dates()[last];

    // Rank assets by composite score, best first.
    let mut ranked: Vec<(&String, f64)> = composite
        .assets()
        .iter()
        .zip(composite.row(last).iter().copied())
        .filter(|(_, score)| score.is_finite())
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    println!("Scores as of {} ({} assets):", date, ranked.len());
    println!("{}", "-".repeat(40));
    println!("{:<6} {:<10} {:>10}", "Rank", "Symbol", "Score");
    for (rank, (symbol, score)) in ranked.iter().enumerate() {
        println!("{:<6} {:<10} {:>10.4}", rank + 1, symbol, score);
    }
    println!();

    Ok(())
}
