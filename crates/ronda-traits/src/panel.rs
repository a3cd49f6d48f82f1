//! Date-by-asset panels with explicit missing values.
//!
//! A [`Panel`] is the workhorse container of the toolkit: a dense matrix of
//! `f64` values indexed by an ascending date axis and a lexicographically
//! ordered asset axis. Missing observations are stored as NaN and treated
//! as "no value" by every kernel; they are never folded into zeros.

use ndarray::{Array2, ArrayView1};

use crate::{Date, Result, RondaError, Ticker};

/// A (date × asset) matrix of `f64` values with NaN as the missing marker.
///
/// Invariants enforced at construction:
/// - dates are strictly ascending and unique,
/// - assets are unique and stored in lexicographic order (input columns are
///   permuted into order if supplied unsorted),
/// - the value matrix shape is exactly `(dates.len(), assets.len())`.
///
/// The lexicographic asset order makes tie-breaking in downstream selection
/// deterministic.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use ronda_traits::{Date, Panel};
///
/// let dates = vec![
///     Date::from_ymd_opt(2024, 1, 2).unwrap(),
///     Date::from_ymd_opt(2024, 1, 3).unwrap(),
/// ];
/// let assets = vec!["AAPL".to_string(), "MSFT".to_string()];
/// let panel = Panel::new(dates, assets, array![[150.0, 300.0], [151.0, 299.0]]).unwrap();
/// assert_eq!(panel.n_dates(), 2);
/// assert_eq!(panel.n_assets(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    dates: Vec<Date>,
    assets: Vec<Ticker>,
    values: Array2<f64>,
}

impl Panel {
    /// Creates a panel from a date axis, an asset axis, and a value matrix.
    ///
    /// Assets supplied out of lexicographic order are sorted, with the
    /// value columns permuted to match.
    ///
    /// # Errors
    ///
    /// - [`RondaError::Alignment`] if the matrix shape does not match the
    ///   axes, or if an asset appears twice.
    /// - [`RondaError::InvalidDate`] if dates are not strictly ascending.
    pub fn new(dates: Vec<Date>, assets: Vec<Ticker>, values: Array2<f64>) -> Result<Self> {
        if values.nrows() != dates.len() || values.ncols() != assets.len() {
            return Err(RondaError::Alignment(format!(
                "value matrix is {}x{} but axes are {} dates x {} assets",
                values.nrows(),
                values.ncols(),
                dates.len(),
                assets.len()
            )));
        }
        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(RondaError::InvalidDate(format!(
                    "dates must be strictly ascending, found {} after {}",
                    pair[1], pair[0]
                )));
            }
        }

        let mut order: Vec<usize> = (0..assets.len()).collect();
        order.sort_by(|&a, &b| assets[a].cmp(&assets[b]));
        for pair in order.windows(2) {
            if assets[pair[0]] == assets[pair[1]] {
                return Err(RondaError::Alignment(format!(
                    "duplicate ticker in panel: {}",
                    assets[pair[0]]
                )));
            }
        }

        let already_sorted = order.iter().enumerate().all(|(i, &j)| i == j);
        if already_sorted {
            return Ok(Self {
                dates,
                assets,
                values,
            });
        }

        let sorted_assets: Vec<Ticker> = order.iter().map(|&j| assets[j].clone()).collect();
        let mut sorted_values = Array2::from_elem(values.dim(), f64::NAN);
        for (new_j, &old_j) in order.iter().enumerate() {
            sorted_values.column_mut(new_j).assign(&values.column(old_j));
        }
        Ok(Self {
            dates,
            assets: sorted_assets,
            values: sorted_values,
        })
    }

    /// Creates a panel with every cell set to `fill`.
    ///
    /// # Errors
    ///
    /// Same validation as [`Panel::new`].
    pub fn filled(dates: Vec<Date>, assets: Vec<Ticker>, fill: f64) -> Result<Self> {
        let shape = (dates.len(), assets.len());
        Self::new(dates, assets, Array2::from_elem(shape, fill))
    }

    /// Returns a panel sharing this panel's axes with a replacement value
    /// matrix. This is the construction path for kernels that derive one
    /// panel from another cell by cell.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::Alignment`] if `values` does not match this
    /// panel's shape.
    pub fn with_values(&self, values: Array2<f64>) -> Result<Self> {
        if values.dim() != self.values.dim() {
            return Err(RondaError::Alignment(format!(
                "replacement matrix is {}x{} but panel is {}x{}",
                values.nrows(),
                values.ncols(),
                self.n_dates(),
                self.n_assets()
            )));
        }
        Ok(Self {
            dates: self.dates.clone(),
            assets: self.assets.clone(),
            values,
        })
    }

    /// Returns the date axis.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the asset axis, in lexicographic order.
    #[must_use]
    pub fn assets(&self) -> &[Ticker] {
        &self.assets
    }

    /// Returns the value matrix, shaped (dates × assets).
    #[must_use]
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Returns the number of dates.
    #[must_use]
    pub fn n_dates(&self) -> usize {
        self.dates.len()
    }

    /// Returns the number of assets.
    #[must_use]
    pub fn n_assets(&self) -> usize {
        self.assets.len()
    }

    /// Returns whether the panel has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.assets.is_empty()
    }

    /// Returns the row position of `date`, if present.
    #[must_use]
    pub fn date_index(&self, date: Date) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Returns the column position of `ticker`, if present.
    #[must_use]
    pub fn asset_index(&self, ticker: &str) -> Option<usize> {
        self.assets
            .binary_search_by(|a| a.as_str().cmp(ticker))
            .ok()
    }

    /// Returns the value at (date, ticker), or `None` if the cell is
    /// missing or outside the panel.
    #[must_use]
    pub fn get(&self, date: Date, ticker: &str) -> Option<f64> {
        let i = self.date_index(date)?;
        let j = self.asset_index(ticker)?;
        let v = self.values[(i, j)];
        if v.is_finite() { Some(v) } else { None }
    }

    /// Returns the cross-section (one value per asset) at row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }

    /// Returns the time series (one value per date) of asset column `j`.
    #[must_use]
    pub fn column(&self, j: usize) -> ArrayView1<'_, f64> {
        self.values.column(j)
    }

    /// Returns whether `other` shares this panel's exact date and asset axes.
    #[must_use]
    pub fn same_index(&self, other: &Self) -> bool {
        self.dates == other.dates && self.assets == other.assets
    }

    /// Shifts all rows down by `periods`, filling vacated leading rows with
    /// NaN. The date axis is unchanged; row `t` afterwards holds the values
    /// that were at row `t - periods`.
    #[must_use]
    pub fn shift(&self, periods: usize) -> Self {
        let mut shifted = Array2::from_elem(self.values.dim(), f64::NAN);
        for t in periods..self.n_dates() {
            shifted.row_mut(t).assign(&self.values.row(t - periods));
        }
        Self {
            dates: self.dates.clone(),
            assets: self.assets.clone(),
            values: shifted,
        }
    }

    /// Forward-fills missing values down each asset column. Leading missing
    /// values (before the first observation) remain missing.
    #[must_use]
    pub fn forward_fill(&self) -> Self {
        let mut filled = self.values.clone();
        for mut col in filled.columns_mut() {
            let mut last = f64::NAN;
            for v in col.iter_mut() {
                if v.is_finite() {
                    last = *v;
                } else if last.is_finite() {
                    *v = last;
                }
            }
        }
        Self {
            dates: self.dates.clone(),
            assets: self.assets.clone(),
            values: filled,
        }
    }

    /// Drops every row whose cells are all missing, shrinking the date axis.
    #[must_use]
    pub fn drop_all_missing_rows(&self) -> Self {
        let keep: Vec<usize> = (0..self.n_dates())
            .filter(|&i| self.values.row(i).iter().any(|v| v.is_finite()))
            .collect();
        let mut values = Array2::from_elem((keep.len(), self.n_assets()), f64::NAN);
        for (new_i, &old_i) in keep.iter().enumerate() {
            values.row_mut(new_i).assign(&self.values.row(old_i));
        }
        Self {
            dates: keep.iter().map(|&i| self.dates[i]).collect(),
            assets: self.assets.clone(),
            values,
        }
    }

    /// Simple returns against the previous row: row `t` holds
    /// `v[t] / v[t-1] - 1`. The first row is all missing, as is any cell
    /// where either operand is missing or the denominator is zero.
    #[must_use]
    pub fn pct_change(&self) -> Self {
        let mut returns = Array2::from_elem(self.values.dim(), f64::NAN);
        for t in 1..self.n_dates() {
            for j in 0..self.n_assets() {
                let prev = self.values[(t - 1, j)];
                let curr = self.values[(t, j)];
                if prev.is_finite() && curr.is_finite() && prev != 0.0 {
                    returns[(t, j)] = curr / prev - 1.0;
                }
            }
        }
        Self {
            dates: self.dates.clone(),
            assets: self.assets.clone(),
            values: returns,
        }
    }

    /// Forward returns: row `t` holds `v[t+1] / v[t] - 1`, the return
    /// realized between `t` and the next date. The last row is all missing.
    #[must_use]
    pub fn forward_returns(&self) -> Self {
        let mut returns = Array2::from_elem(self.values.dim(), f64::NAN);
        for t in 0..self.n_dates().saturating_sub(1) {
            for j in 0..self.n_assets() {
                let curr = self.values[(t, j)];
                let next = self.values[(t + 1, j)];
                if curr.is_finite() && next.is_finite() && curr != 0.0 {
                    returns[(t, j)] = next / curr - 1.0;
                }
            }
        }
        Self {
            dates: self.dates.clone(),
            assets: self.assets.clone(),
            values: returns,
        }
    }
}

/// The five OHLCV field panels of a universe, sharing one index.
///
/// Produced by the aligner from cleaned per-asset bar data. All five panels
/// are guaranteed to share the same date and asset axes.
#[derive(Debug, Clone)]
pub struct OhlcvPanel {
    open: Panel,
    high: Panel,
    low: Panel,
    close: Panel,
    volume: Panel,
}

impl OhlcvPanel {
    /// Bundles five field panels, validating that they share one index.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::Alignment`] if any field panel's index differs
    /// from the close panel's.
    pub fn new(open: Panel, high: Panel, low: Panel, close: Panel, volume: Panel) -> Result<Self> {
        for (name, panel) in [
            ("open", &open),
            ("high", &high),
            ("low", &low),
            ("volume", &volume),
        ] {
            if !close.same_index(panel) {
                return Err(RondaError::Alignment(format!(
                    "{name} panel index differs from close panel index"
                )));
            }
        }
        Ok(Self {
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Returns the open-price panel.
    #[must_use]
    pub const fn open(&self) -> &Panel {
        &self.open
    }

    /// Returns the high-price panel.
    #[must_use]
    pub const fn high(&self) -> &Panel {
        &self.high
    }

    /// Returns the low-price panel.
    #[must_use]
    pub const fn low(&self) -> &Panel {
        &self.low
    }

    /// Returns the close-price panel.
    #[must_use]
    pub const fn close(&self) -> &Panel {
        &self.close
    }

    /// Returns the volume panel.
    #[must_use]
    pub const fn volume(&self) -> &Panel {
        &self.volume
    }

    /// Returns the shared date axis.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        self.close.dates()
    }

    /// Returns the shared asset axis.
    #[must_use]
    pub fn assets(&self) -> &[Ticker] {
        self.close.assets()
    }
}
