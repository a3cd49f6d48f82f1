//! Ronda CLI binary.
//!
//! Provides the command-line interface for the Ronda factor research
//! toolkit.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Factor research toolkit for cross-sectional equity strategies", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported factors
    Factors {
        /// Filter by category (technical or fundamental)
        #[arg(short, long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compute composite cross-sectional scores for a universe
    Score {
        /// Factor names to combine
        #[arg(short, long, value_delimiter = ',', default_value = "momentum,volatility")]
        factors: Vec<String>,

        /// Ticker symbols
        #[arg(short, long, value_delimiter = ',', default_value = data::DEFAULT_UNIVERSE)]
        symbols: Vec<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long, default_value = "2023-01-02")]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long, default_value = "2024-12-31")]
        end: String,

        /// Use synthetic offline data instead of live downloads
        #[arg(long)]
        demo: bool,
    },

    /// Run the full factor backtest pipeline
    Backtest {
        /// Factor names to combine
        #[arg(short, long, value_delimiter = ',', default_value = "momentum,volatility")]
        factors: Vec<String>,

        /// Ticker symbols
        #[arg(short, long, value_delimiter = ',', default_value = data::DEFAULT_UNIVERSE)]
        symbols: Vec<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long, default_value = "2023-01-02")]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long, default_value = "2024-12-31")]
        end: String,

        /// Number of assets held at each rebalance
        #[arg(short = 'n', long, default_value = "3")]
        top_n: usize,

        /// Rebalance schedule (week-end, month-end, quarter-end)
        #[arg(short, long, default_value = "month-end")]
        rebalance: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Use synthetic offline data instead of live downloads
        #[arg(long)]
        demo: bool,
    },

    /// Evaluate one factor: IC summary and quantile-group returns
    Eval {
        /// Factor name
        factor: String,

        /// Ticker symbols
        #[arg(short, long, value_delimiter = ',', default_value = data::DEFAULT_UNIVERSE)]
        symbols: Vec<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long, default_value = "2023-01-02")]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long, default_value = "2024-12-31")]
        end: String,

        /// Number of quantile buckets
        #[arg(short, long, default_value = "5")]
        groups: usize,

        /// Correlation method for the IC (spearman or pearson)
        #[arg(short, long, default_value = "spearman")]
        method: String,

        /// Use synthetic offline data instead of live downloads
        #[arg(long)]
        demo: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Factors { category, verbose } => {
            cmd::factors::list_factors(category.as_deref(), verbose);
        }
        Commands::Score {
            factors,
            symbols,
            start,
            end,
            demo,
        } => {
            cmd::score::show_scores(&factors, &symbols, &start, &end, demo).await?;
        }
        Commands::Backtest {
            factors,
            symbols,
            start,
            end,
            top_n,
            rebalance,
            format,
            demo,
        } => {
            cmd::backtest::run_backtest(
                &factors, &symbols, &start, &end, top_n, &rebalance, &format, demo,
            )
            .await?;
        }
        Commands::Eval {
            factor,
            symbols,
            start,
            end,
            groups,
            method,
            demo,
        } => {
            cmd::eval::evaluate_factor(&factor, &symbols, &start, &end, groups, &method, demo)
                .await?;
        }
    }

    Ok(())
}
