//! Per-asset bar cleaning.
//!
//! Raw daily bars arrive with inconsistent column casing, occasional string
//! typed numeric columns, and holes. [`clean_bars`] turns one asset's raw
//! frame into a dated, numeric, forward-filled bar record or rejects it
//! with a data-quality error.

use std::collections::HashMap;

use polars::prelude::*;
use ronda_traits::{Date, Result, RondaError};

/// Minimum number of bars an asset must retain after cleaning.
pub const MIN_BARS: usize = 30;

/// The field columns every cleaned bar frame must resolve.
pub const REQUIRED_FIELDS: [&str; 5] = ["open", "high", "low", "close", "volume"];

const ADJ_CLOSE_ALIASES: [&str; 3] = ["adj close", "adjclose", "adj_close"];

/// One asset's cleaned daily bars, sorted by ascending date.
///
/// All five field vectors run parallel to `dates`. Cells that were missing
/// in the input and had no earlier observation to fill from remain NaN.
#[derive(Debug, Clone)]
pub struct CleanBars {
    dates: Vec<Date>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
}

impl CleanBars {
    /// Returns the ascending date axis.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the open prices.
    #[must_use]
    pub fn open(&self) -> &[f64] {
        &self.open
    }

    /// Returns the high prices.
    #[must_use]
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Returns the low prices.
    #[must_use]
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// Returns the close prices.
    #[must_use]
    pub fn close(&self) -> &[f64] {
        &self.close
    }

    /// Returns the volumes.
    #[must_use]
    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    /// Returns the number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns whether no bars remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Cleans one asset's raw bar frame.
///
/// The cleaning steps, in order:
/// 1. normalize column names (trim whitespace, lowercase),
/// 2. resolve the five required fields, mapping an adjusted-close column
///    onto `close` when no `close` column exists,
/// 3. coerce field values to numeric (unparseable entries become missing),
/// 4. sort bars by ascending date (a duplicated date keeps its first row),
/// 5. forward-fill missing interior values per field,
/// 6. drop rows where every field is still missing.
///
/// # Errors
///
/// - [`RondaError::MissingColumn`] if no `date` column exists.
/// - [`RondaError::DataQuality`] if a required field cannot be resolved or
///   fewer than [`MIN_BARS`] bars remain after cleaning.
pub fn clean_bars(df: &DataFrame) -> Result<CleanBars> {
    // Normalized name -> original column name; first occurrence wins.
    let mut by_name: HashMap<String, String> = HashMap::new();
    for name in df.get_column_names() {
        let normalized = name.as_str().trim().to_lowercase();
        by_name.entry(normalized).or_insert_with(|| name.to_string());
    }

    let date_col = by_name
        .get("date")
        .ok_or_else(|| RondaError::MissingColumn("date".to_string()))?;
    let dates = date_values(df.column(date_col)?.as_materialized_series())?;

    let mut fields: Vec<Vec<f64>> = Vec::with_capacity(REQUIRED_FIELDS.len());
    for field in REQUIRED_FIELDS {
        let resolved = if field == "close" {
            by_name.get("close").or_else(|| {
                ADJ_CLOSE_ALIASES.iter().find_map(|alias| by_name.get(*alias))
            })
        } else {
            by_name.get(field)
        };
        let Some(column) = resolved else {
            return Err(RondaError::DataQuality(format!(
                "cannot resolve required field: {field}"
            )));
        };
        fields.push(numeric_values(df.column(column)?.as_materialized_series())?);
    }

    // Keep rows with a valid date, sorted ascending, first row wins on ties.
    let mut order: Vec<usize> = (0..df.height()).filter(|&i| dates[i].is_some()).collect();
    order.sort_by_key(|&i| (dates[i], i));
    order.dedup_by_key(|i| dates[*i]);

    let sorted_dates: Vec<Date> = order.iter().map(|&i| dates[i].unwrap_or_default()).collect();
    let mut sorted_fields: Vec<Vec<f64>> = fields
        .iter()
        .map(|values| order.iter().map(|&i| values[i]).collect())
        .collect();

    for values in &mut sorted_fields {
        forward_fill(values);
    }

    let keep: Vec<usize> = (0..sorted_dates.len())
        .filter(|&i| sorted_fields.iter().any(|values| values[i].is_finite()))
        .collect();

    if keep.len() < MIN_BARS {
        return Err(RondaError::DataQuality(format!(
            "only {} bars remain after cleaning, need at least {MIN_BARS}",
            keep.len()
        )));
    }

    let pick = |values: &[f64]| -> Vec<f64> { keep.iter().map(|&i| values[i]).collect() };

    Ok(CleanBars {
        dates: keep.iter().map(|&i| sorted_dates[i]).collect(),
        open: pick(&sorted_fields[0]),
        high: pick(&sorted_fields[1]),
        low: pick(&sorted_fields[2]),
        close: pick(&sorted_fields[3]),
        volume: pick(&sorted_fields[4]),
    })
}

/// Extracts a date column as `Option<Date>` per row.
///
/// Date-typed columns convert directly; string columns parse as
/// `YYYY-MM-DD` with invalid entries becoming `None`.
fn date_values(series: &Series) -> Result<Vec<Option<Date>>> {
    match series.dtype() {
        DataType::Date => Ok(series
            .date()?
            .into_iter()
            .map(|d: Option<i32>| {
                // 719163 = days from CE to Unix epoch
                d.and_then(|d| Date::from_num_days_from_ce_opt(d + 719163))
            })
            .collect()),
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|s: Option<&str>| {
                s.and_then(|s| Date::parse_from_str(s.trim(), "%Y-%m-%d").ok())
            })
            .collect()),
        other => Err(RondaError::DataQuality(format!(
            "unsupported dtype for date column: {other}"
        ))),
    }
}

/// Coerces a field column to `f64` per row, NaN where missing or invalid.
fn numeric_values(series: &Series) -> Result<Vec<f64>> {
    let to_f64 = |v: Option<f64>| v.unwrap_or(f64::NAN);
    match series.dtype() {
        DataType::Float64 => Ok(series.f64()?.into_iter().map(to_f64).collect()),
        DataType::Float32 => Ok(series
            .f32()?
            .into_iter()
            .map(|v| to_f64(v.map(f64::from)))
            .collect()),
        DataType::Int64 => Ok(series
            .i64()?
            .into_iter()
            .map(|v| to_f64(v.map(|v| v as f64)))
            .collect()),
        DataType::Int32 => Ok(series
            .i32()?
            .into_iter()
            .map(|v| to_f64(v.map(f64::from)))
            .collect()),
        DataType::UInt64 => Ok(series
            .u64()?
            .into_iter()
            .map(|v| to_f64(v.map(|v| v as f64)))
            .collect()),
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|s: Option<&str>| {
                s.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(f64::NAN)
            })
            .collect()),
        other => Err(RondaError::DataQuality(format!(
            "unsupported dtype for field column {}: {other}",
            series.name()
        ))),
    }
}

fn forward_fill(values: &mut [f64]) {
    let mut last = f64::NAN;
    for v in values.iter_mut() {
        if v.is_finite() {
            last = *v;
        } else if last.is_finite() {
            *v = last;
        }
    }
}
