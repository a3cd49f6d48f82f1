//! Universe assembly: per-asset bars into aligned panels.

use std::collections::{BTreeSet, HashMap};

use ndarray::Array2;
use polars::prelude::DataFrame;
use ronda_traits::{Date, OhlcvPanel, Panel, Result, RondaError, Ticker};
use serde::{Deserialize, Serialize};

use crate::clean::{CleanBars, clean_bars};

/// How to combine per-asset date axes into one panel index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Join {
    /// Every date any asset traded; assets without a bar hold missing cells.
    #[default]
    Union,
    /// Only dates on which every asset traded.
    Intersection,
}

/// Cleans each asset's raw bars and assembles the five OHLCV field panels
/// over a unified date index.
///
/// Each asset frame passes through [`clean_bars`] first; a single asset
/// failing its quality checks fails the whole universe. Under
/// [`Join::Union`], dates an asset did not trade hold missing cells (they
/// are not forward-filled across the join).
///
/// # Errors
///
/// - Any error from [`clean_bars`] on an individual asset.
/// - [`RondaError::DataQuality`] if `frames` is empty or an intersection
///   join leaves no common dates.
/// - [`RondaError::Alignment`] if the same ticker appears twice.
pub fn align_universe(frames: &[(Ticker, DataFrame)], join: Join) -> Result<OhlcvPanel> {
    if frames.is_empty() {
        return Err(RondaError::DataQuality("no assets supplied".to_string()));
    }

    let mut cleaned: Vec<(Ticker, CleanBars)> = Vec::with_capacity(frames.len());
    for (ticker, df) in frames {
        let bars = clean_bars(df)
            .map_err(|e| RondaError::DataQuality(format!("{ticker}: {e}")))?;
        cleaned.push((ticker.clone(), bars));
    }

    let dates = unified_dates(&cleaned, join)?;
    let date_pos: HashMap<Date, usize> =
        dates.iter().enumerate().map(|(i, &d)| (d, i)).collect();
    let assets: Vec<Ticker> = cleaned.iter().map(|(t, _)| t.clone()).collect();

    let field_panel = |field: fn(&CleanBars) -> &[f64]| -> Result<Panel> {
        let mut values = Array2::from_elem((dates.len(), assets.len()), f64::NAN);
        for (j, (_, bars)) in cleaned.iter().enumerate() {
            for (i, date) in bars.dates().iter().enumerate() {
                if let Some(&row) = date_pos.get(date) {
                    values[(row, j)] = field(bars)[i];
                }
            }
        }
        Panel::new(dates.clone(), assets.clone(), values)
    };

    OhlcvPanel::new(
        field_panel(CleanBars::open)?,
        field_panel(CleanBars::high)?,
        field_panel(CleanBars::low)?,
        field_panel(CleanBars::close)?,
        field_panel(CleanBars::volume)?,
    )
}

fn unified_dates(cleaned: &[(Ticker, CleanBars)], join: Join) -> Result<Vec<Date>> {
    let dates: Vec<Date> = match join {
        Join::Union => {
            let mut all: BTreeSet<Date> = BTreeSet::new();
            for (_, bars) in cleaned {
                all.extend(bars.dates().iter().copied());
            }
            all.into_iter().collect()
        }
        Join::Intersection => {
            let mut iter = cleaned.iter();
            let mut common: BTreeSet<Date> = iter
                .next()
                .map(|(_, bars)| bars.dates().iter().copied().collect())
                .unwrap_or_default();
            for (_, bars) in iter {
                let dates: BTreeSet<Date> = bars.dates().iter().copied().collect();
                common = common.intersection(&dates).copied().collect();
            }
            common.into_iter().collect()
        }
    };

    if dates.is_empty() {
        return Err(RondaError::DataQuality(
            "no common dates across assets".to_string(),
        ));
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn day(i: usize) -> Date {
        Date::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i as i64)
    }

    fn bar_frame(start: usize, n: usize, base: f64) -> DataFrame {
        let dates: Vec<Date> = (start..start + n).map(day).collect();
        let prices: Vec<f64> = (0..n).map(|i| base + i as f64).collect();
        df! {
            "date" => dates,
            "open" => prices.clone(),
            "high" => prices.clone(),
            "low" => prices.clone(),
            "close" => prices.clone(),
            "volume" => prices,
        }
        .unwrap()
    }

    #[test]
    fn test_align_union() {
        let frames = vec![
            ("AAPL".to_string(), bar_frame(0, 40, 100.0)),
            ("MSFT".to_string(), bar_frame(5, 40, 300.0)),
        ];
        let ohlcv = align_universe(&frames, Join::Union).unwrap();

        // Union spans day 0 through day 44
        assert_eq!(ohlcv.dates().len(), 45);
        assert_eq!(ohlcv.assets(), &["AAPL".to_string(), "MSFT".to_string()]);

        // MSFT has no bar on day 0
        assert_eq!(ohlcv.close().get(day(0), "MSFT"), None);
        assert_eq!(ohlcv.close().get(day(5), "MSFT"), Some(300.0));
        // AAPL has no bar past day 39
        assert_eq!(ohlcv.close().get(day(44), "AAPL"), None);
    }

    #[test]
    fn test_align_intersection() {
        let frames = vec![
            ("AAPL".to_string(), bar_frame(0, 40, 100.0)),
            ("MSFT".to_string(), bar_frame(5, 40, 300.0)),
        ];
        let ohlcv = align_universe(&frames, Join::Intersection).unwrap();

        // Common dates are day 5 through day 39
        assert_eq!(ohlcv.dates().len(), 35);
        assert_eq!(ohlcv.dates()[0], day(5));
        assert_relative_eq!(ohlcv.close().get(day(5), "AAPL").unwrap(), 105.0);
        assert_relative_eq!(ohlcv.close().get(day(5), "MSFT").unwrap(), 300.0);
    }

    #[test]
    fn test_align_empty_universe() {
        let result = align_universe(&[], Join::Union);
        assert!(matches!(result, Err(RondaError::DataQuality(_))));
    }

    #[test]
    fn test_align_disjoint_intersection() {
        let frames = vec![
            ("AAPL".to_string(), bar_frame(0, 35, 100.0)),
            ("MSFT".to_string(), bar_frame(50, 35, 300.0)),
        ];
        let result = align_universe(&frames, Join::Intersection);
        assert!(matches!(result, Err(RondaError::DataQuality(_))));
    }

    #[test]
    fn test_align_bad_asset_names_ticker() {
        let dates: Vec<Date> = (0..35).map(day).collect();
        let closes: Vec<f64> = (0..35).map(|i| 100.0 + i as f64).collect();
        let missing_fields = df! {
            "date" => dates,
            "close" => closes,
        }
        .unwrap();

        let frames = vec![("BAD".to_string(), missing_fields)];
        let err = align_universe(&frames, Join::Union).unwrap_err();
        assert!(err.to_string().contains("BAD"));
    }

    #[test]
    fn test_align_sorts_assets() {
        let frames = vec![
            ("MSFT".to_string(), bar_frame(0, 35, 300.0)),
            ("AAPL".to_string(), bar_frame(0, 35, 100.0)),
        ];
        let ohlcv = align_universe(&frames, Join::Union).unwrap();
        assert_eq!(ohlcv.assets(), &["AAPL".to_string(), "MSFT".to_string()]);
        assert_relative_eq!(ohlcv.close().get(day(0), "AAPL").unwrap(), 100.0);
        assert_relative_eq!(ohlcv.close().get(day(0), "MSFT").unwrap(), 300.0);
    }
}
