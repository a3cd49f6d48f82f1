//! Weight-matrix backtesting.
//!
//! The engine applies lagged weights to forward returns, so the return
//! realized between two dates is always earned by a position decided
//! before the first of them. Prices never influence a weight decision
//! made on or before their own date.

use ronda_traits::{Panel, Result, RondaError, TimeSeries};

/// Runs an equal-weight periodic-rebalance backtest.
///
/// The per-date portfolio return is the sum over assets of lagged weight
/// times forward return, where the forward return at date `t` is
/// `price[t+1] / price[t] - 1`. Missing returns and missing weights
/// contribute zero. NAV is the cumulative product of one plus the
/// portfolio return, seeded at 1 on the first date.
///
/// An all-zero weight matrix therefore produces a NAV series pinned at
/// exactly 1.0 throughout.
///
/// # Errors
///
/// Returns [`RondaError::Alignment`] if the weight and price panels do
/// not share a date/asset index.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use ronda_eval::run_backtest;
/// use ronda_traits::{Date, Panel};
///
/// let dates = vec![
///     Date::from_ymd_opt(2024, 1, 2).unwrap(),
///     Date::from_ymd_opt(2024, 1, 3).unwrap(),
///     Date::from_ymd_opt(2024, 1, 4).unwrap(),
/// ];
/// let assets = vec!["AAPL".to_string()];
/// let weights = Panel::new(dates.clone(), assets.clone(), array![[1.0], [1.0], [1.0]]).unwrap();
/// let prices = Panel::new(dates, assets, array![[100.0], [110.0], [121.0]]).unwrap();
///
/// let nav = run_backtest(&weights, &prices).unwrap();
/// assert_eq!(nav.values()[0], 1.0);
/// ```
pub fn run_backtest(weights: &Panel, prices: &Panel) -> Result<TimeSeries> {
    if !weights.same_index(prices) {
        return Err(RondaError::Alignment(
            "weight and price panels must share a date/asset index".to_string(),
        ));
    }

    let forward = prices.forward_returns();
    let lagged = weights.shift(1);

    let mut nav = Vec::with_capacity(prices.n_dates());
    let mut level = 1.0;
    for t in 0..prices.n_dates() {
        let period_return: f64 = lagged
            .row(t)
            .iter()
            .zip(forward.row(t).iter())
            .map(|(&w, &r)| if w.is_finite() && r.is_finite() { w * r } else { 0.0 })
            .sum();
        level *= 1.0 + period_return;
        nav.push(level);
    }

    TimeSeries::new(prices.dates().to_vec(), nav)
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
    fn test_zero_weights_give_flat_nav() {
        let weights = panel(array![[0.0, 0.0], [0.0, 0.0], [0.0, 0.0]]);
        let prices = panel(array![[100.0, 50.0], [90.0, 55.0], [80.0, 60.0]]);

        let nav = run_backtest(&weights, &prices).unwrap();
        assert_eq!(nav.len(), 3);
        assert!(nav.values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_nav_seeded_at_one() {
        let weights = panel(array![[1.0], [1.0], [1.0]]);
        let prices = panel(array![[100.0], [110.0], [121.0]]);

        let nav = run_backtest(&weights, &prices).unwrap();
        assert_relative_eq!(nav.values()[0], 1.0);
    }

    #[test]
    fn test_single_asset_compounding() {
        let weights = panel(array![[1.0], [1.0], [1.0]]);
        let prices = panel(array![[100.0], [110.0], [121.0]]);

        let nav = run_backtest(&weights, &prices).unwrap();
        // First date has no lagged position; the second earns the 1->2
        // transition; the final forward return is undefined.
        assert_relative_eq!(nav.values()[0], 1.0);
        assert_relative_eq!(nav.values()[1], 1.1, epsilon = 1e-12);
        assert_relative_eq!(nav.values()[2], 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_half_weights_halve_returns() {
        let weights = panel(array![[0.5], [0.5], [0.5]]);
        let prices = panel(array![[100.0], [110.0], [121.0]]);

        let nav = run_backtest(&weights, &prices).unwrap();
        assert_relative_eq!(nav.values()[1], 1.05, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_price_contributes_zero() {
        let weights = panel(array![[1.0, 0.0], [1.0, 0.0], [1.0, 0.0]]);
        let prices = panel(array![[100.0, 50.0], [f64::NAN, 55.0], [120.0, 60.0]]);

        let nav = run_backtest(&weights, &prices).unwrap();
        // Both transitions touching the missing price are dropped.
        assert!(nav.values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_mismatched_panels_rejected() {
        let weights = panel(array![[1.0], [1.0]]);
        let prices = Panel::new(
            vec![d(2), d(3)],
            vec!["ZZZ".to_string()],
            array![[100.0], [110.0]],
        )
        .unwrap();

        let result = run_backtest(&weights, &prices);
        assert!(matches!(result, Err(RondaError::Alignment(_))));
    }

    #[test]
    fn test_no_lookahead() {
        let weights = panel(array![[1.0], [1.0], [1.0], [1.0]]);
        let prices = panel(array![[100.0], [105.0], [110.0], [120.0]]);
        let nav = run_backtest(&weights, &prices).unwrap();

        // Perturbing the final price must not touch NAV points whose
        // returns were realized before it.
        let perturbed = panel(array![[100.0], [105.0], [110.0], [500.0]]);
        let nav_perturbed = run_backtest(&weights, &perturbed).unwrap();

        assert_relative_eq!(nav.values()[0], nav_perturbed.values()[0]);
        assert_relative_eq!(nav.values()[1], nav_perturbed.values()[1]);
        // The 110 -> final transition does change.
        assert!((nav.values()[3] - nav_perturbed.values()[3]).abs() > 1e-9);
    }

    #[test]
    fn test_two_assets_weighted_sum() {
        let weights = panel(array![[0.5, 0.5], [0.5, 0.5], [0.5, 0.5]]);
        let prices = panel(array![[100.0, 200.0], [110.0, 180.0], [121.0, 162.0]]);

        let nav = run_backtest(&weights, &prices).unwrap();
        // Transition 1: 0.5 * 10% + 0.5 * -10% = 0.
        assert_relative_eq!(nav.values()[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(nav.values()[2], 1.0, epsilon = 1e-12);
    }
}
