//! Cross-sectional rank and z-score normalization.
//!
//! Raw factor values are not comparable across factors: momentum lives in
//! return space, volatility in dispersion space. Normalization maps every
//! factor onto the same scale by ranking each date's cross-section and
//! standardizing the ranks, so that composite scoring can average them.

use ndarray::Array2;

use ronda_traits::stats::{rank_with_ties, standardize};
use ronda_traits::{Direction, Panel, Result};

/// Normalizes a raw factor panel into cross-sectional z-scores.
///
/// Each date row is processed independently: non-missing values are ranked
/// (ties averaged) and the ranks are standardized to mean 0 and sample
/// standard deviation 1. The factor's [`Direction`] decides the rank order,
/// so a higher normalized score always reads as more attractive regardless
/// of what the raw values measure.
///
/// Rows with fewer than two non-missing values, or where every value is
/// tied, carry no cross-sectional information and come back all missing.
/// Missing cells stay missing; they never influence their row's statistics.
///
/// # Errors
///
/// Normalization itself cannot fail on a valid panel; the `Result` only
/// surfaces the axis reconstruction.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use ronda_score::normalize_factor;
/// use ronda_traits::{Date, Direction, Panel};
///
/// let panel = Panel::new(
///     vec![Date::from_ymd_opt(2024, 1, 2).unwrap()],
///     vec!["AAPL".to_string(), "MSFT".to_string(), "TSLA".to_string()],
///     array![[0.05, -0.02, 0.10]],
/// )
/// .unwrap();
///
/// let scores = normalize_factor(&panel, Direction::HigherIsBetter).unwrap();
/// // Highest momentum gets the highest score.
/// assert!(scores.values()[(0, 2)] > scores.values()[(0, 0)]);
/// ```
pub fn normalize_factor(panel: &Panel, direction: Direction) -> Result<Panel> {
    let mut scores = Array2::from_elem(panel.values().dim(), f64::NAN);

    for (t, row) in panel.values().rows().into_iter().enumerate() {
        let raw: Vec<f64> = row.to_vec();
        let ranks = rank_with_ties(&raw, direction.rank_ascending());
        let (z, stats) = standardize(&ranks);

        // No dispersion in the ranks means no usable cross-section; the
        // row stays missing rather than degrading to zeros.
        if !stats.applied {
            continue;
        }

        for (j, &value) in z.iter().enumerate() {
            scores[(t, j)] = value;
        }
    }

    panel.with_values(scores)
}
