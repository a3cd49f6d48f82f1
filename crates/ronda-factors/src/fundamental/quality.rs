//! Profitability factors.

use ndarray::Array2;

use ronda_traits::{
    Direction, Factor, FactorInput, FundamentalField, Panel, ReportPeriod, Result, RondaError,
};

/// Return-on-equity quality factor.
///
/// The latest annual net income over the latest annual book value of
/// equity, broadcast across the date index. Assets with non-positive or
/// missing book value hold missing values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnOnEquity;

impl Factor for ReturnOnEquity {
    fn name(&self) -> &'static str {
        "return_on_equity"
    }

    fn direction(&self) -> Direction {
        Direction::HigherIsBetter
    }

    fn lookback(&self) -> usize {
        0
    }

    fn requires_fundamentals(&self) -> bool {
        true
    }

    fn compute(&self, input: &FactorInput<'_>) -> Result<Panel> {
        let fundamentals = input.fundamentals().ok_or_else(|| {
            RondaError::DataQuality("return_on_equity requires a fundamentals snapshot".to_string())
        })?;

        let close = input.ohlcv().close();
        let mut values = Array2::from_elem(close.values().dim(), f64::NAN);
        for (j, ticker) in close.assets().iter().enumerate() {
            let income =
                fundamentals.get(ticker, FundamentalField::NetIncome, ReportPeriod::Annual);
            let book = fundamentals.get(ticker, FundamentalField::BookValue, ReportPeriod::Annual);
            if let (Some(income), Some(book)) = (income, book) {
                // ROE against negative equity flips sign and stops meaning
                // profitability, so only positive book values qualify.
                if book > 0.0 {
                    values.column_mut(j).fill(income / book);
                }
            }
        }

        close.with_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use ronda_traits::{Date, Fundamentals, OhlcvPanel};

    fn sample_ohlcv() -> OhlcvPanel {
        let close = Panel::new(
            vec![
                Date::from_ymd_opt(2024, 1, 2).unwrap(),
                Date::from_ymd_opt(2024, 1, 3).unwrap(),
            ],
            vec!["AAPL".to_string(), "MSFT".to_string()],
            array![[150.0, 300.0], [151.0, 301.0]],
        )
        .unwrap();
        OhlcvPanel::new(
            close.clone(),
            close.clone(),
            close.clone(),
            close.clone(),
            close,
        )
        .unwrap()
    }

    #[test]
    fn test_roe_ratio() {
        let mut fundamentals = Fundamentals::new();
        fundamentals.insert(
            "AAPL",
            FundamentalField::NetIncome,
            ReportPeriod::Annual,
            95.0,
        );
        fundamentals.insert(
            "AAPL",
            FundamentalField::BookValue,
            ReportPeriod::Annual,
            500.0,
        );

        let ohlcv = sample_ohlcv();
        let input = FactorInput::new(&ohlcv, Some(&fundamentals));
        let panel = ReturnOnEquity.compute(&input).unwrap();

        assert_relative_eq!(panel.values()[[0, 0]], 0.19, epsilon = 1e-12);
        assert_relative_eq!(panel.values()[[1, 0]], 0.19, epsilon = 1e-12);
        assert!(panel.values()[[0, 1]].is_nan());
    }

    #[test]
    fn test_negative_equity_is_missing() {
        let mut fundamentals = Fundamentals::new();
        fundamentals.insert(
            "AAPL",
            FundamentalField::NetIncome,
            ReportPeriod::Annual,
            95.0,
        );
        fundamentals.insert(
            "AAPL",
            FundamentalField::BookValue,
            ReportPeriod::Annual,
            -20.0,
        );

        let ohlcv = sample_ohlcv();
        let input = FactorInput::new(&ohlcv, Some(&fundamentals));
        let panel = ReturnOnEquity.compute(&input).unwrap();
        assert!(panel.values()[[0, 0]].is_nan());
    }

    #[test]
    fn test_missing_snapshot_rejected() {
        let ohlcv = sample_ohlcv();
        let input = FactorInput::new(&ohlcv, None);
        let result = ReturnOnEquity.compute(&input);
        assert!(matches!(result, Err(RondaError::DataQuality(_))));
    }
}
