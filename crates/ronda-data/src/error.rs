//! Error types for the data clients.

use thiserror::Error;

use ronda_traits::RondaError;

/// Errors raised by the Yahoo and FRED clients.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required API key environment variable is not set.
    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with an error payload or status.
    #[error("API error: {0}")]
    Api(String),

    /// The API answered but carried no usable data.
    #[error("No data available for {0}")]
    NoData(String),

    /// Environment variable error.
    #[error("Environment error: {0}")]
    Env(#[from] dotenvy::Error),
}

impl From<DataError> for RondaError {
    fn from(err: DataError) -> Self {
        Self::DataFetch(err.to_string())
    }
}

/// Result type for data client operations.
pub type Result<T> = std::result::Result<T, DataError>;
