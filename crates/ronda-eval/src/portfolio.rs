//! Portfolio construction from composite score panels.
//!
//! Scores become holdings in two steps: pick the rebalance dates out of
//! the panel's own date index, then select the top-N assets on each of
//! those dates and hold them at equal weight until the next rebalance.

use chrono::Datelike;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use ronda_traits::{Date, Panel, Result, RondaError};

/// Rebalance frequency for portfolio construction.
///
/// Rebalance dates are always drawn from the score panel's own date
/// index: the last trading date present within each calendar period,
/// never a synthetic calendar-period-end date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rebalance {
    /// Last trading date of each ISO week.
    WeekEnd,
    /// Last trading date of each month.
    #[default]
    MonthEnd,
    /// Last trading date of each quarter.
    QuarterEnd,
}

impl Rebalance {
    /// Key identifying the calendar period a date falls in.
    fn period_key(self, date: Date) -> (i32, u32) {
        match self {
            Self::WeekEnd => {
                let week = date.iso_week();
                (week.year(), week.week())
            }
            Self::MonthEnd => (date.year(), date.month()),
            Self::QuarterEnd => (date.year(), (date.month() - 1) / 3),
        }
    }
}

/// Returns the positions within `dates` that close out a calendar period.
///
/// A position is a rebalance point when the following date belongs to a
/// different period, so the final date always qualifies (it closes the
/// last, possibly partial, period).
#[must_use]
pub fn rebalance_dates(dates: &[Date], rebalance: Rebalance) -> Vec<usize> {
    let mut positions = Vec::new();
    for (i, &date) in dates.iter().enumerate() {
        let closes_period = match dates.get(i + 1) {
            Some(&next) => rebalance.period_key(next) != rebalance.period_key(date),
            None => true,
        };
        if closes_period {
            positions.push(i);
        }
    }
    positions
}

/// Builds an equal-weight top-N weight matrix from a composite score panel.
///
/// On each rebalance date the `top_n` assets with the highest score are
/// assigned `1/top_n` each; every other asset gets zero. Ties are broken
/// by the panel's lexicographic asset order. If fewer than `top_n` assets
/// have a score, all of them are selected and the row sums to less than
/// one; the shortfall is simply unallocated. Weights persist unchanged
/// until the next rebalance, and rows before the first rebalance are all
/// zero.
///
/// # Errors
///
/// Returns [`RondaError::InvalidConfig`] if `top_n` is zero.
pub fn build_weights(scores: &Panel, top_n: usize, rebalance: Rebalance) -> Result<Panel> {
    if top_n == 0 {
        return Err(RondaError::InvalidConfig(
            "top_n must be a positive integer".to_string(),
        ));
    }

    let mut weights = Array2::zeros(scores.values().dim());
    let rebalances = rebalance_dates(scores.dates(), rebalance);

    let mut upcoming = rebalances.iter().copied().peekable();
    let mut current: Option<Vec<f64>> = None;

    for t in 0..scores.n_dates() {
        if upcoming.peek() == Some(&t) {
            current = Some(select_weights(scores.row(t), top_n));
            upcoming.next();
        }
        if let Some(row) = &current {
            for (j, &weight) in row.iter().enumerate() {
                weights[(t, j)] = weight;
            }
        }
    }

    scores.with_values(weights)
}

/// Top-N selection for a single cross-section.
fn select_weights(scores: ArrayView1<'_, f64>, top_n: usize) -> Vec<f64> {
    let mut weights = vec![0.0; scores.len()];

    let mut ranked: Vec<(usize, f64)> = scores
        .iter()
        .enumerate()
        .filter_map(|(j, &s)| if s.is_finite() { Some((j, s)) } else { None })
        .collect();

    // Stable sort keeps lexicographic asset order for tied scores.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let allocation = 1.0 / top_n as f64;
    for &(j, _) in ranked.iter().take(top_n) {
        weights[j] = allocation;
    }

    weights
}
