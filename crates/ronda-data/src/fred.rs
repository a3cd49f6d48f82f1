//! FRED macro data client.
//!
//! Fetches named macro time series from the St. Louis Fed's FRED API. The
//! indicator set is a closed enum so an unsupported series is a
//! construction-time error rather than a runtime lookup miss.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use ronda_traits::{Date, TimeSeries};

use crate::error::{DataError, Result};

const FRED_BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// The macro indicators the toolkit consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacroIndicator {
    /// US gross domestic product.
    Gdp,
    /// Consumer price index for all urban consumers.
    Cpi,
    /// Civilian unemployment rate.
    UnemploymentRate,
    /// Effective federal funds rate.
    FedFunds,
}

impl MacroIndicator {
    /// All supported indicators.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Gdp, Self::Cpi, Self::UnemploymentRate, Self::FedFunds]
    }

    /// Returns the FRED series identifier.
    #[must_use]
    pub const fn series_id(self) -> &'static str {
        match self {
            Self::Gdp => "GDP",
            Self::Cpi => "CPIAUCSL",
            Self::UnemploymentRate => "UNRATE",
            Self::FedFunds => "FEDFUNDS",
        }
    }

    /// Returns a human-readable description of the indicator.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Gdp => "US gross domestic product",
            Self::Cpi => "Consumer price index, all urban consumers",
            Self::UnemploymentRate => "Civilian unemployment rate",
            Self::FedFunds => "Effective federal funds rate",
        }
    }
}

/// FRED API client.
#[derive(Debug, Clone)]
pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    /// Creates a client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Creates a client from the `FRED_API_KEY` environment variable,
    /// loading a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingApiKey`] if the variable is not set.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let api_key =
            env::var("FRED_API_KEY").map_err(|_| DataError::MissingApiKey("FRED_API_KEY"))?;
        Ok(Self::new(api_key))
    }

    /// Fetches one indicator's observations over `[start, end]`.
    ///
    /// FRED marks unavailable observations with a `"."` placeholder; those
    /// become NaN values in the returned series.
    ///
    /// # Errors
    ///
    /// - [`DataError::Api`] on HTTP failures.
    /// - [`DataError::NoData`] if no observations come back.
    pub async fn observations(
        &self,
        indicator: MacroIndicator,
        start: Date,
        end: Date,
    ) -> Result<TimeSeries> {
        let url = format!(
            "{FRED_BASE_URL}?series_id={}&api_key={}&file_type=json&observation_start={start}&observation_end={end}",
            indicator.series_id(),
            self.api_key
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Api(format!("HTTP {status}: {text}")));
        }
        let text = response.text().await?;
        let parsed: ObservationsResponse = serde_json::from_str(&text)?;

        let series = observation_series(&parsed);
        if series.is_empty() {
            return Err(DataError::NoData(indicator.series_id().to_string()));
        }
        Ok(series)
    }
}

/// Converts parsed observations into a time series, NaN for placeholders.
fn observation_series(response: &ObservationsResponse) -> TimeSeries {
    let mut dates = Vec::with_capacity(response.observations.len());
    let mut values = Vec::with_capacity(response.observations.len());
    for obs in &response.observations {
        let Ok(date) = Date::parse_from_str(&obs.date, "%Y-%m-%d") else {
            continue;
        };
        dates.push(date);
        values.push(obs.value.trim().parse::<f64>().unwrap_or(f64::NAN));
    }
    // Lengths match by construction.
    TimeSeries::new(dates, values).unwrap_or_else(|_| TimeSeries::empty())
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}
