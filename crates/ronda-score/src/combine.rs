//! Equal-weighted composite scoring across factors.

use ndarray::Array2;
use ronda_traits::{Panel, Result, RondaError};

/// Normalized score output from a single factor, named for diagnostics.
///
/// Each factor contributes one panel of cross-sectional z-scores (mean=0,
/// std=1 per date). The combiner takes several of these and produces one
/// composite score panel.
#[derive(Debug, Clone)]
pub struct FactorScore {
    /// Factor name (for error messages and IC tracking)
    pub name: String,

    /// Normalized score panel for this factor
    pub panel: Panel,
}

/// Combines normalized factor panels into a composite score panel.
///
/// The composite is the unweighted arithmetic mean across factors, computed
/// per cell. A factor that is missing for a cell is excluded from that
/// cell's average rather than counted as zero; a cell where every factor
/// is missing stays missing.
///
/// # Errors
///
/// Returns an error if:
/// - No factors are provided
/// - The panels do not all share the same date/asset index
///   ([`RondaError::Alignment`])
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use ronda_score::{combine_scores, FactorScore};
/// use ronda_traits::{Date, Panel};
///
/// let dates = vec![Date::from_ymd_opt(2024, 1, 2).unwrap()];
/// let assets = vec!["AAPL".to_string(), "MSFT".to_string()];
///
/// let factors = vec![
///     FactorScore {
///         name: "momentum".to_string(),
///         panel: Panel::new(dates.clone(), assets.clone(), array![[1.0, -1.0]]).unwrap(),
///     },
///     FactorScore {
///         name: "value".to_string(),
///         panel: Panel::new(dates, assets, array![[0.0, 1.0]]).unwrap(),
///     },
/// ];
///
/// let composite = combine_scores(&factors).unwrap();
/// assert_eq!(composite.values()[(0, 0)], 0.5);
/// ```
pub fn combine_scores(factors: &[FactorScore]) -> Result<Panel> {
    if factors.is_empty() {
        return Err("Cannot combine zero factor panels".into());
    }

    let first = &factors[0].panel;

    // Validate all panels share the index before touching any values.
    for factor in &factors[1..] {
        if !first.same_index(&factor.panel) {
            return Err(RondaError::Alignment(format!(
                "factor '{}' does not share the date/asset index of '{}'",
                factor.name, factors[0].name
            )));
        }
    }

    let mut combined = Array2::from_elem(first.values().dim(), f64::NAN);
    for t in 0..first.n_dates() {
        for j in 0..first.n_assets() {
            let mut sum = 0.0;
            let mut count = 0_usize;
            for factor in factors {
                let value = factor.panel.values()[(t, j)];
                if value.is_finite() {
                    sum += value;
                    count += 1;
                }
            }
            if count > 0 {
                combined[(t, j)] = sum / count as f64;
            }
        }
    }

    first.with_values(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use ronda_traits::Date;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn score(name: &str, values: Array2<f64>) -> FactorScore {
        let dates: Vec<Date> = (0..values.nrows()).map(|i| d(2 + i as u32)).collect();
        let assets: Vec<String> = (0..values.ncols())
            .map(|j| format!("A{j:02}"))
            .collect();
        FactorScore {
            name: name.to_string(),
            panel: Panel::new(dates, assets, values).unwrap(),
        }
    }

    #[test]
    fn test_combine_basic_average() {
        let factors = vec![
            score("momentum", array![[1.0, 0.0, -1.0]]),
            score("value", array![[-1.0, 0.0, 1.0]]),
        ];

        let composite = combine_scores(&factors).unwrap();
        assert!(composite.row(0).iter().all(|v| v.abs() < 1e-10));
    }

    #[test]
    fn test_combine_single_factor_passthrough() {
        let factors = vec![score("momentum", array![[1.0, -0.5, 0.25]])];
        let composite = combine_scores(&factors).unwrap();

        assert_relative_eq!(composite.values()[(0, 0)], 1.0);
        assert_relative_eq!(composite.values()[(0, 1)], -0.5);
        assert_relative_eq!(composite.values()[(0, 2)], 0.25);
    }

    #[test]
    fn test_missing_factor_excluded_not_zeroed() {
        let factors = vec![
            score("momentum", array![[1.0, f64::NAN]]),
            score("value", array![[0.0, 0.5]]),
        ];

        let composite = combine_scores(&factors).unwrap();
        // Cell (0, 0) averages both factors; cell (0, 1) averages only the
        // one present value. A missing-as-zero bug would give 0.25 instead.
        assert_relative_eq!(composite.values()[(0, 0)], 0.5);
        assert_relative_eq!(composite.values()[(0, 1)], 0.5);
    }

    #[test]
    fn test_all_factors_missing_stays_missing() {
        let factors = vec![
            score("momentum", array![[f64::NAN, 1.0]]),
            score("value", array![[f64::NAN, 0.0]]),
        ];

        let composite = combine_scores(&factors).unwrap();
        assert!(composite.values()[(0, 0)].is_nan());
        assert_relative_eq!(composite.values()[(0, 1)], 0.5);
    }

    #[test]
    fn test_combine_empty_input() {
        let result = combine_scores(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_combine_mismatched_index() {
        let momentum = score("momentum", array![[1.0, 0.0]]);
        let value = FactorScore {
            name: "value".to_string(),
            panel: Panel::new(
                vec![d(2)],
                vec!["A00".to_string(), "ZZZ".to_string()],
                array![[0.0, 1.0]],
            )
            .unwrap(),
        };

        let result = combine_scores(&[momentum, value]);
        assert!(matches!(result, Err(RondaError::Alignment(_))));
    }

    #[test]
    fn test_mismatched_dates_rejected() {
        let momentum = score("momentum", array![[1.0], [2.0]]);
        let value = FactorScore {
            name: "value".to_string(),
            panel: Panel::new(
                vec![d(2), d(5)],
                vec!["A00".to_string()],
                array![[0.0], [1.0]],
            )
            .unwrap(),
        };

        let result = combine_scores(&[momentum, value]);
        assert!(matches!(result, Err(RondaError::Alignment(_))));
    }

    #[test]
    fn test_combine_multi_date() {
        let factors = vec![
            score("momentum", array![[1.0, -1.0], [0.5, -0.5]]),
            score("value", array![[0.0, 0.0], [1.5, -1.5]]),
        ];

        let composite = combine_scores(&factors).unwrap();
        assert_relative_eq!(composite.values()[(0, 0)], 0.5);
        assert_relative_eq!(composite.values()[(1, 0)], 1.0);
        assert_relative_eq!(composite.values()[(1, 1)], -1.0);
    }
}
