//! Factors listing command implementation.

use ronda_factors::{FactorCategory, FactorKind};

/// List the closed factor set, optionally filtered by category.
pub(crate) fn list_factors(category: Option<&str>, verbose: bool) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Available Factors                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let categories = [
        (FactorCategory::Technical, "Technical"),
        (FactorCategory::Fundamental, "Fundamental"),
    ];

    for (cat, cat_name) in categories {
        if let Some(filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        println!("{} ({}):", cat_name, cat.description());
        println!("{}", "-".repeat(60));

        for kind in FactorKind::all() {
            if kind.category() != cat {
                continue;
            }
            let direction = match kind.direction() {
                ronda_traits::Direction::HigherIsBetter => "higher is better",
                ronda_traits::Direction::LowerIsBetter => "lower is better",
            };
            if verbose {
                println!(
                    "  {:18} {:18} - {}",
                    kind.name(),
                    format!("({direction})"),
                    kind.description()
                );
            } else {
                println!("  {}", kind.name());
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for directions and descriptions.\n");
    }
}
