//! Discrete holding-period backtesting.
//!
//! The single-period alternative to the weight-matrix engine: on each
//! date, buy the top fraction of assets by factor value, hold them for
//! exactly one transition, and compound the equal-weighted mean return.
//! One NAV point is emitted per transition, indexed by the holding date.

use ronda_traits::{Panel, Result, RondaError, TimeSeries};

/// Runs a discrete top-fraction backtest over consecutive date pairs.
///
/// For each date `t`, the top `top_pct` fraction of assets by factor
/// value (at least one) is held into `t+1`; the period return is the
/// equal-weighted mean of `price[t+1] / price[t] - 1` over the held
/// assets with both prices present. The NAV series is indexed by the
/// holding dates, so its length is one less than the panel's.
///
/// A transition with no usable selection (no finite factor values, or no
/// held asset with both prices) carries the previous NAV level forward
/// rather than dropping the date, keeping the index dense.
///
/// # Errors
///
/// - [`RondaError::InvalidConfig`] if `top_pct` is not in `(0, 1]`.
/// - [`RondaError::Alignment`] if the panels do not share an index.
pub fn backtest_discrete(factors: &Panel, prices: &Panel, top_pct: f64) -> Result<TimeSeries> {
    if !(top_pct > 0.0 && top_pct <= 1.0) {
        return Err(RondaError::InvalidConfig(format!(
            "top_pct must be in (0, 1], got {top_pct}"
        )));
    }
    if !factors.same_index(prices) {
        return Err(RondaError::Alignment(
            "factor and price panels must share a date/asset index".to_string(),
        ));
    }

    let n_dates = factors.n_dates();
    let n_transitions = n_dates.saturating_sub(1);

    let mut nav = Vec::with_capacity(n_transitions);
    let mut level = 1.0;
    for t in 0..n_transitions {
        if let Some(period_return) = transition_return(factors, prices, t, top_pct) {
            level *= 1.0 + period_return;
        }
        nav.push(level);
    }

    TimeSeries::new(factors.dates()[1..].to_vec(), nav)
}

/// Mean simple return of the top-fraction selection for one transition,
/// or `None` when nothing usable was held.
fn transition_return(factors: &Panel, prices: &Panel, t: usize, top_pct: f64) -> Option<f64> {
    let mut ranked: Vec<(usize, f64)> = factors
        .row(t)
        .iter()
        .enumerate()
        .filter_map(|(j, &f)| if f.is_finite() { Some((j, f)) } else { None })
        .collect();

    if ranked.is_empty() {
        return None;
    }

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    // Floor of the fraction, but never an empty selection.
    let count = ((ranked.len() as f64 * top_pct) as usize).clamp(1, ranked.len());

    let mut sum = 0.0;
    let mut held = 0_usize;
    for &(j, _) in &ranked[..count] {
        let entry = prices.values()[(t, j)];
        let exit = prices.values()[(t + 1, j)];
        if entry.is_finite() && exit.is_finite() && entry != 0.0 {
            sum += exit / entry - 1.0;
            held += 1;
        }
    }

    if held == 0 {
        None
    } else {
        Some(sum / held as f64)
    }
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

    fn panel(values: ndarray::Array2<f64>) -> Panel {
        let dates: Vec<Date> = (0..values.nrows()).map(|i| d(2 + i as u32)).collect();
        let assets: Vec<String> = (0..values.ncols())
            .map(|j| format!("A{j:02}"))
            .collect();
        Panel::new(dates, assets, values).unwrap()
    }

    #[test]
    fn test_rejects_bad_top_pct() {
        let factors = panel(array![[1.0], [1.0]]);
        let prices = panel(array![[100.0], [110.0]]);

        assert!(matches!(
            backtest_discrete(&factors, &prices, 0.0),
            Err(RondaError::InvalidConfig(_))
        ));
        assert!(matches!(
            backtest_discrete(&factors, &prices, 1.5),
            Err(RondaError::InvalidConfig(_))
        ));
        assert!(matches!(
            backtest_discrete(&factors, &prices, f64::NAN),
            Err(RondaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_mismatched_panels() {
        let factors = panel(array![[1.0], [1.0]]);
        let prices = Panel::new(
            vec![d(2), d(3)],
            vec!["ZZZ".to_string()],
            array![[100.0], [110.0]],
        )
        .unwrap();

        let result = backtest_discrete(&factors, &prices, 0.5);
        assert!(matches!(result, Err(RondaError::Alignment(_))));
    }

    #[test]
    fn test_nav_indexed_by_holding_dates() {
        let factors = panel(array![[1.0], [1.0], [1.0]]);
        let prices = panel(array![[100.0], [110.0], [121.0]]);

        let nav = backtest_discrete(&factors, &prices, 1.0).unwrap();
        assert_eq!(nav.len(), 2);
        assert_eq!(nav.dates(), &[d(3), d(4)]);
        assert_relative_eq!(nav.values()[0], 1.1, epsilon = 1e-12);
        assert_relative_eq!(nav.values()[1], 1.21, epsilon = 1e-12);
    }

    #[test]
    fn test_selects_top_asset_each_date() {
        // Asset 1 always ranks first and rallies; asset 0 crashes.
        let factors = panel(array![[1.0, 2.0], [1.0, 2.0], [1.0, 2.0]]);
        let prices = panel(array![[100.0, 100.0], [50.0, 110.0], [25.0, 121.0]]);

        let nav = backtest_discrete(&factors, &prices, 0.5).unwrap();
        assert_relative_eq!(nav.values()[0], 1.1, epsilon = 1e-12);
        assert_relative_eq!(nav.values()[1], 1.21, epsilon = 1e-12);
    }

    #[test]
    fn test_small_universe_still_selects_one() {
        // floor(3 * 0.2) would be zero; the selection clamps to one.
        let factors = panel(array![[3.0, 2.0, 1.0], [3.0, 2.0, 1.0]]);
        let prices = panel(array![[100.0, 100.0, 100.0], [120.0, 90.0, 80.0]]);

        let nav = backtest_discrete(&factors, &prices, 0.2).unwrap();
        assert_relative_eq!(nav.values()[0], 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_prices_carry_nav_forward() {
        // The middle transition has no usable exit price for the held
        // asset; NAV holds its level instead of dropping the date.
        let factors = panel(array![[1.0], [1.0], [1.0], [1.0]]);
        let prices = panel(array![[100.0], [110.0], [f64::NAN], [121.0]]);

        let nav = backtest_discrete(&factors, &prices, 1.0).unwrap();
        assert_eq!(nav.len(), 3);
        assert_relative_eq!(nav.values()[0], 1.1, epsilon = 1e-12);
        assert_relative_eq!(nav.values()[1], 1.1, epsilon = 1e-12);
        assert_relative_eq!(nav.values()[2], 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_all_missing_factors_carry_nav_forward() {
        let factors = panel(array![[1.0], [f64::NAN], [1.0]]);
        let prices = panel(array![[100.0], [110.0], [121.0]]);

        let nav = backtest_discrete(&factors, &prices, 1.0).unwrap();
        assert_relative_eq!(nav.values()[0], 1.1, epsilon = 1e-12);
        // Date 2 had no factor values to select from.
        assert_relative_eq!(nav.values()[1], 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_return_over_selection() {
        let factors = panel(array![[2.0, 1.0, 0.0, -1.0], [2.0, 1.0, 0.0, -1.0]]);
        let prices = panel(array![
            [100.0, 100.0, 100.0, 100.0],
            [110.0, 90.0, 200.0, 300.0]
        ]);

        // Top half: assets 0 and 1; mean of +10% and -10% is zero.
        let nav = backtest_discrete(&factors, &prices, 0.5).unwrap();
        assert_relative_eq!(nav.values()[0], 1.0, epsilon = 1e-12);
    }
}
