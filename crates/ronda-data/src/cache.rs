//! Request-keyed bar cache.
//!
//! Caching lives in the data layer, not the core pipeline: downloaded bar
//! frames are memoized under the exact (ticker, start, end) request that
//! produced them, with no invalidation beyond process lifetime.

use std::collections::HashMap;

use polars::prelude::DataFrame;

use ronda_traits::{Date, Ticker};

use crate::error::Result;
use crate::yahoo::YahooClient;

/// An in-memory map from bar requests to their raw frames.
#[derive(Debug, Clone, Default)]
pub struct BarCache {
    frames: HashMap<(Ticker, Date, Date), DataFrame>,
}

impl BarCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the frame cached under an exact request key.
    #[must_use]
    pub fn get(&self, ticker: &str, start: Date, end: Date) -> Option<&DataFrame> {
        self.frames.get(&(ticker.to_string(), start, end))
    }

    /// Stores a frame under its request key, replacing any previous entry.
    pub fn insert(&mut self, ticker: &str, start: Date, end: Date, frame: DataFrame) {
        self.frames.insert((ticker.to_string(), start, end), frame);
    }

    /// Returns the number of cached requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// A Yahoo bar loader that memoizes every request.
///
/// Repeated loads for the same (ticker, start, end) tuple hit the network
/// once; a different date range for the same ticker is a different key.
#[derive(Debug, Default)]
pub struct CachedBarLoader {
    client: YahooClient,
    cache: BarCache,
}

impl CachedBarLoader {
    /// Creates a loader around a Yahoo client with an empty cache.
    #[must_use]
    pub fn new(client: YahooClient) -> Self {
        Self {
            client,
            cache: BarCache::new(),
        }
    }

    /// Loads daily bars for one ticker, from cache when possible.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`YahooClient::daily_bars`]; failed
    /// requests are not cached.
    pub async fn daily_bars(&mut self, ticker: &str, start: Date, end: Date) -> Result<DataFrame> {
        if let Some(frame) = self.cache.get(ticker, start, end) {
            return Ok(frame.clone());
        }
        let frame = self.client.daily_bars(ticker, start, end).await?;
        self.cache.insert(ticker, start, end, frame.clone());
        Ok(frame)
    }

    /// Returns the number of cached requests.
    #[must_use]
    pub fn cached_requests(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn frame(value: f64) -> DataFrame {
        df! { "close" => &[value] }.unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = BarCache::new();
        assert!(cache.is_empty());

        cache.insert("AAPL", d(1), d(31), frame(185.0));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("AAPL", d(1), d(31)).is_some());
    }

    #[test]
    fn test_key_is_exact_tuple() {
        let mut cache = BarCache::new();
        cache.insert("AAPL", d(1), d(31), frame(185.0));

        // Same ticker, different range: a miss.
        assert!(cache.get("AAPL", d(1), d(30)).is_none());
        assert!(cache.get("AAPL", d(2), d(31)).is_none());
        assert!(cache.get("MSFT", d(1), d(31)).is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let mut cache = BarCache::new();
        cache.insert("AAPL", d(1), d(31), frame(185.0));
        cache.insert("AAPL", d(1), d(31), frame(190.0));

        assert_eq!(cache.len(), 1);
        let cached = cache.get("AAPL", d(1), d(31)).unwrap();
        let close = cached.column("close").unwrap().f64().unwrap();
        assert_eq!(close.get(0), Some(190.0));
    }
}
