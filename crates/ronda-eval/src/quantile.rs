//! Quantile-group factor diagnostics.
//!
//! A good factor should produce monotonically increasing mean returns
//! from its bottom bucket to its top bucket. This module provides the
//! cross-sectional bucketing that makes that visible.

use ronda_traits::{Result, RondaError};

/// Mean forward return per factor-quantile bucket.
///
/// Buckets are ordered by factor value: `mean_returns[0]` is the bucket
/// with the lowest factor values, the last entry the highest. Buckets
/// that received no assets report NaN with a zero count.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupReturns {
    /// Mean forward return per bucket.
    pub mean_returns: Vec<f64>,
    /// Number of assets in each bucket.
    pub counts: Vec<usize>,
}

impl GroupReturns {
    /// Number of buckets.
    #[must_use]
    pub fn n_groups(&self) -> usize {
        self.mean_returns.len()
    }

    /// Spread between the top and bottom bucket means, the quick summary
    /// of a factor's cross-sectional power.
    #[must_use]
    pub fn top_bottom_spread(&self) -> f64 {
        match (self.mean_returns.last(), self.mean_returns.first()) {
            (Some(top), Some(bottom)) => top - bottom,
            _ => f64::NAN,
        }
    }
}

/// Partitions one cross-section into equal-population factor buckets and
/// reports the mean forward return of each.
///
/// Assets missing either value are dropped first. The survivors are
/// sorted by factor value ascending and split at positions
/// `g * n / n_groups`, which distributes any remainder as evenly as the
/// data allows. Ties keep their input order, so bucket membership is
/// deterministic for the panel's lexicographic asset ordering.
///
/// # Errors
///
/// - [`RondaError::InvalidConfig`] if `n_groups` is zero.
/// - [`RondaError::Alignment`] if the snapshots differ in length.
pub fn quantile_group_backtest(
    factor: &[f64],
    forward_returns: &[f64],
    n_groups: usize,
) -> Result<GroupReturns> {
    if n_groups == 0 {
        return Err(RondaError::InvalidConfig(
            "n_groups must be a positive integer".to_string(),
        ));
    }
    if factor.len() != forward_returns.len() {
        return Err(RondaError::Alignment(format!(
            "factor snapshot has {} assets but returns snapshot has {}",
            factor.len(),
            forward_returns.len()
        )));
    }

    let mut pairs: Vec<(f64, f64)> = factor
        .iter()
        .zip(forward_returns.iter())
        .filter_map(|(&f, &r)| {
            if f.is_finite() && r.is_finite() {
                Some((f, r))
            } else {
                None
            }
        })
        .collect();

    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let n = pairs.len();
    let mut mean_returns = vec![f64::NAN; n_groups];
    let mut counts = vec![0_usize; n_groups];

    for g in 0..n_groups {
        let start = g * n / n_groups;
        let end = (g + 1) * n / n_groups;
        if end > start {
            let bucket = &pairs[start..end];
            let sum: f64 = bucket.iter().map(|(_, r)| r).sum();
            mean_returns[g] = sum / bucket.len() as f64;
            counts[g] = bucket.len();
        }
    }

    Ok(GroupReturns {
        mean_returns,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ten_assets_five_groups() {
        let factor: Vec<f64> = (1..=10).map(f64::from).collect();
        let returns: Vec<f64> = (1..=10).map(|i| f64::from(i) * 0.01).collect();

        let groups = quantile_group_backtest(&factor, &returns, 5).unwrap();
        assert_eq!(groups.n_groups(), 5);
        assert!(groups.counts.iter().all(|&c| c == 2));

        // Each bucket mean is the arithmetic mean of its two members.
        assert_relative_eq!(groups.mean_returns[0], 0.015, epsilon = 1e-12);
        assert_relative_eq!(groups.mean_returns[4], 0.095, epsilon = 1e-12);
    }

    #[test]
    fn test_buckets_ordered_low_to_high() {
        let factor = [3.0, 1.0, 2.0, 4.0];
        let returns = [0.03, 0.01, 0.02, 0.04];

        let groups = quantile_group_backtest(&factor, &returns, 2).unwrap();
        // Bottom bucket holds factors {1, 2}, top bucket {3, 4}.
        assert_relative_eq!(groups.mean_returns[0], 0.015, epsilon = 1e-12);
        assert_relative_eq!(groups.mean_returns[1], 0.035, epsilon = 1e-12);
        assert_relative_eq!(groups.top_bottom_spread(), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_remainder_distributed() {
        // Seven assets into three groups: bucket sizes 2, 2, 3.
        let factor: Vec<f64> = (1..=7).map(f64::from).collect();
        let returns = vec![0.01; 7];

        let groups = quantile_group_backtest(&factor, &returns, 3).unwrap();
        assert_eq!(groups.counts, vec![2, 2, 3]);
    }

    #[test]
    fn test_missing_values_dropped() {
        let factor = [1.0, f64::NAN, 3.0, 4.0];
        let returns = [0.01, 0.02, f64::NAN, 0.04];

        let groups = quantile_group_backtest(&factor, &returns, 2).unwrap();
        // Only factors 1.0 and 4.0 survive.
        assert_eq!(groups.counts, vec![1, 1]);
        assert_relative_eq!(groups.mean_returns[0], 0.01, epsilon = 1e-12);
        assert_relative_eq!(groups.mean_returns[1], 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_more_groups_than_assets() {
        let factor = [1.0, 2.0];
        let returns = [0.01, 0.02];

        let groups = quantile_group_backtest(&factor, &returns, 5).unwrap();
        assert_eq!(groups.n_groups(), 5);
        assert_eq!(groups.counts.iter().sum::<usize>(), 2);
        let populated = groups.counts.iter().filter(|&&c| c > 0).count();
        assert_eq!(populated, 2);
        let empty_are_nan = groups
            .mean_returns
            .iter()
            .zip(groups.counts.iter())
            .all(|(m, &c)| if c == 0 { m.is_nan() } else { m.is_finite() });
        assert!(empty_are_nan);
    }

    #[test]
    fn test_zero_groups_rejected() {
        let result = quantile_group_backtest(&[1.0], &[0.01], 0);
        assert!(matches!(result, Err(RondaError::InvalidConfig(_))));
    }

    #[test]
    fn test_mismatched_snapshots_rejected() {
        let result = quantile_group_backtest(&[1.0, 2.0], &[0.01], 2);
        assert!(matches!(result, Err(RondaError::Alignment(_))));
    }

    #[test]
    fn test_empty_cross_section() {
        let factor = [f64::NAN, f64::NAN];
        let returns = [0.01, 0.02];

        let groups = quantile_group_backtest(&factor, &returns, 3).unwrap();
        assert!(groups.mean_returns.iter().all(|m| m.is_nan()));
        assert!(groups.counts.iter().all(|&c| c == 0));
    }
}
