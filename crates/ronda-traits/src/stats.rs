//! Statistical utility functions shared across the toolkit.
//!
//! This module provides the ranking and z-score kernels used by factor
//! normalization and the information-coefficient diagnostics.

/// Standard deviations at or below this threshold count as zero
/// variance, so standardization is skipped instead of dividing by a
/// near-zero value.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Statistics computed during z-score standardization.
#[derive(Debug, Clone, Copy)]
pub struct StandardizeResult {
    /// Mean of the finite input values.
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator) of the finite values.
    pub std: f64,
    /// False when the variance was too low for standardization to apply.
    pub applied: bool,
}

/// Z-scores a slice: `(x - mean) / std` with the sample standard
/// deviation (N-1 denominator).
///
/// Mean and std are computed over the finite values only; non-finite
/// inputs pass through as NaN. When the std falls at or below
/// [`MIN_STD_THRESHOLD`] — a single value, constant values — the output
/// is all zeros and `applied` on the returned statistics is false, so
/// callers that need a "no value" outcome can produce one themselves.
/// Empty and all-NaN inputs come back unchanged with NaN statistics.
///
/// # Examples
///
/// ```
/// use ronda_traits::stats::standardize;
///
/// let (standardized, result) = standardize(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert!(result.applied);
/// assert!((result.mean - 3.0).abs() < 1e-10);
/// assert!(standardized.iter().sum::<f64>().abs() < 1e-10);
/// ```
pub fn standardize(values: &[f64]) -> (Vec<f64>, StandardizeResult) {
    if values.is_empty() {
        return (
            Vec::new(),
            StandardizeResult {
                mean: f64::NAN,
                std: f64::NAN,
                applied: false,
            },
        );
    }

    // Statistics come from the finite values only.
    let finite_values: Vec<f64> = values.iter().filter(|x| x.is_finite()).copied().collect();

    if finite_values.is_empty() {
        return (
            vec![f64::NAN; values.len()],
            StandardizeResult {
                mean: f64::NAN,
                std: f64::NAN,
                applied: false,
            },
        );
    }

    let n = finite_values.len();
    let mean = finite_values.iter().sum::<f64>() / n as f64;

    // Sample variance, N-1 denominator.
    let variance = if n > 1 {
        finite_values
            .iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64
    } else {
        0.0
    };
    let std = variance.sqrt();

    let applied = std > MIN_STD_THRESHOLD;

    let standardized = if applied {
        values.iter().map(|x| (x - mean) / std).collect()
    } else {
        vec![0.0; values.len()]
    };

    (standardized, StandardizeResult { mean, std, applied })
}

/// Assigns 1-based ranks to a slice, averaging tied values.
///
/// With `ascending = true` the smallest value receives rank 1; with
/// `ascending = false` the largest does. Ties (exact equality) all receive
/// the mean of the positions they span. Non-finite inputs are excluded
/// from the ranking and map to NaN in the output.
///
/// # Examples
///
/// ```
/// use ronda_traits::stats::rank_with_ties;
///
/// let ranks = rank_with_ties(&[10.0, 30.0, 20.0], true);
/// assert_eq!(ranks, vec![1.0, 3.0, 2.0]);
///
/// let ranks = rank_with_ties(&[1.0, 2.0, 2.0, 3.0], true);
/// assert_eq!(ranks, vec![1.0, 2.5, 2.5, 4.0]);
/// ```
pub fn rank_with_ties(values: &[f64], ascending: bool) -> Vec<f64> {
    let mut ranks = vec![f64::NAN; values.len()];

    let mut indexed: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| (i, v))
        .collect();

    indexed.sort_by(|a, b| {
        let ord = a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal);
        if ascending { ord } else { ord.reverse() }
    });

    let n = indexed.len();
    let mut i = 0;
    while i < n {
        let mut j = i;
        // Find ties
        while j < n && indexed[j].1 == indexed[i].1 {
            j += 1;
        }

        // Average of the 1-based positions i+1..=j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for k in i..j {
            ranks[indexed[k].0] = avg_rank;
        }

        i = j;
    }

    ranks
}
