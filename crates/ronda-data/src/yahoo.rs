//! Yahoo Finance clients: daily chart bars and quote-summary fundamentals.
//!
//! The chart endpoint supplies raw daily OHLCV candles for one ticker over
//! a date range; candles Yahoo reports as null stay null in the returned
//! frame so the aligner can clean them. The quote-summary endpoint supplies
//! the per-ticker valuation snapshot behind the fundamental factors.

use chrono::{DateTime, Duration, NaiveTime};
use polars::prelude::*;
use reqwest::Client;
use serde::Deserialize;

use ronda_traits::{Date, FundamentalField, Fundamentals, ReportPeriod, Ticker};

use crate::error::{DataError, Result};

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const QUOTE_SUMMARY_BASE_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";
const QUOTE_SUMMARY_MODULES: &str = "summaryDetail,defaultKeyStatistics";

// Yahoo rejects requests without a browser-looking user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Yahoo Finance API client.
#[derive(Debug, Clone, Default)]
pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    /// Creates a new client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetches daily OHLCV bars for one ticker over `[start, end]`.
    ///
    /// The returned frame has `date`, `open`, `high`, `low`, `close`,
    /// `adjclose`, and `volume` columns, one row per trading day, with
    /// nulls where Yahoo reported no value. It is raw provider output:
    /// pass it through the aligner before any factor computation.
    ///
    /// # Errors
    ///
    /// - [`DataError::Api`] on HTTP failures or an error payload.
    /// - [`DataError::NoData`] if the response carries no candles.
    pub async fn daily_bars(&self, ticker: &str, start: Date, end: Date) -> Result<DataFrame> {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        // period2 is exclusive; push it past the end date's close.
        let period2 = (end + Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();
        let url = format!(
            "{CHART_BASE_URL}/{}?period1={period1}&period2={period2}&interval=1d&events=div%2Csplit",
            ticker.to_uppercase()
        );

        let response: ChartResponse = self.get(&url).await?;
        let chart = response.chart;
        if let Some(error) = chart.error {
            return Err(DataError::Api(format!("{}: {}", error.code, error.description)));
        }
        let data = chart
            .result
            .and_then(|mut results| if results.is_empty() { None } else { Some(results.remove(0)) })
            .ok_or_else(|| DataError::NoData(ticker.to_string()))?;

        bars_frame(ticker, &data)
    }

    /// Fetches the fundamentals snapshot for a universe of tickers.
    ///
    /// Statistics resolve into the (ticker, field, report period) store the
    /// factor library reads: valuation figures under TTM, statement-derived
    /// figures under Annual. Tickers the API has no summary for are left
    /// out of the snapshot rather than failing the batch; transport errors
    /// still fail it.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Api`] on HTTP failures or an error payload.
    pub async fn fundamentals(&self, tickers: &[Ticker]) -> Result<Fundamentals> {
        let mut fundamentals = Fundamentals::new();
        for ticker in tickers {
            let url = format!(
                "{QUOTE_SUMMARY_BASE_URL}/{}?modules={QUOTE_SUMMARY_MODULES}",
                ticker.to_uppercase()
            );
            let response: QuoteSummaryResponse = self.get(&url).await?;
            let envelope = response.quote_summary;
            if envelope.error.is_some() {
                continue;
            }
            let Some(summary) = envelope
                .result
                .and_then(|mut results| if results.is_empty() { None } else { Some(results.remove(0)) })
            else {
                continue;
            };
            insert_summary(&mut fundamentals, ticker, &summary);
        }
        Ok(fundamentals)
    }
}

/// Builds the raw bar frame from one chart result.
fn bars_frame(ticker: &str, data: &ChartData) -> Result<DataFrame> {
    let timestamps = data
        .timestamp
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DataError::NoData(ticker.to_string()))?;
    let quote = data
        .indicators
        .quote
        .first()
        .ok_or_else(|| DataError::NoData(ticker.to_string()))?;

    let dates: Vec<Option<Date>> = timestamps
        .iter()
        .map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
        .collect();

    let n = dates.len();
    let pad = |values: &[Option<f64>]| -> Vec<Option<f64>> {
        let mut padded = values.to_vec();
        padded.resize(n, None);
        padded
    };
    let adjclose: Vec<Option<f64>> = data
        .indicators
        .adjclose
        .as_ref()
        .and_then(|blocks| blocks.first())
        .map_or_else(|| vec![None; n], |block| pad(&block.adjclose));

    let df = df! {
        "date" => dates,
        "open" => pad(&quote.open),
        "high" => pad(&quote.high),
        "low" => pad(&quote.low),
        "close" => pad(&quote.close),
        "adjclose" => adjclose,
        "volume" => pad(&quote.volume),
    }
    .map_err(|e| DataError::Api(format!("failed to assemble bar frame: {e}")))?;

    Ok(df)
}

/// Resolves one quote summary into the fundamentals store.
fn insert_summary(fundamentals: &mut Fundamentals, ticker: &str, summary: &SummaryResult) {
    let raw = |value: &Option<RawValue>| value.as_ref().and_then(|v| v.raw);

    let mut market_cap = None;
    let mut price_to_book = None;

    if let Some(detail) = &summary.summary_detail {
        market_cap = raw(&detail.market_cap);
        if let Some(cap) = market_cap {
            fundamentals.insert(ticker, FundamentalField::MarketCap, ReportPeriod::Ttm, cap);
        }
        if let Some(pe) = raw(&detail.trailing_pe) {
            fundamentals.insert(ticker, FundamentalField::TrailingPe, ReportPeriod::Ttm, pe);
        }
        if let Some(yield_) = raw(&detail.dividend_yield) {
            fundamentals.insert(ticker, FundamentalField::DividendYield, ReportPeriod::Ttm, yield_);
        }
    }

    if let Some(stats) = &summary.default_key_statistics {
        price_to_book = raw(&stats.price_to_book);
        if let Some(ptb) = price_to_book {
            fundamentals.insert(ticker, FundamentalField::PriceToBook, ReportPeriod::Ttm, ptb);
        }
        if let Some(income) = raw(&stats.net_income_to_common) {
            fundamentals.insert(ticker, FundamentalField::NetIncome, ReportPeriod::Annual, income);
        }
        if let Some(shares) = raw(&stats.shares_outstanding) {
            fundamentals.insert(
                ticker,
                FundamentalField::SharesOutstanding,
                ReportPeriod::Ttm,
                shares,
            );
        }
    }

    // Total book value of equity falls out of the two valuation figures.
    if let (Some(cap), Some(ptb)) = (market_cap, price_to_book) {
        if ptb != 0.0 {
            fundamentals.insert(
                ticker,
                FundamentalField::BookValue,
                ReportPeriod::Annual,
                cap / ptb,
            );
        }
    }
}

// Chart API response structures.

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
    adjclose: Option<Vec<AdjCloseBlock>>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseBlock {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

// Quote-summary API response structures.

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    result: Option<Vec<SummaryResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    #[serde(rename = "summaryDetail")]
    summary_detail: Option<SummaryDetail>,
    #[serde(rename = "defaultKeyStatistics")]
    default_key_statistics: Option<KeyStatistics>,
}

#[derive(Debug, Deserialize)]
struct SummaryDetail {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    #[serde(rename = "dividendYield")]
    dividend_yield: Option<RawValue>,
    #[serde(rename = "marketCap")]
    market_cap: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct KeyStatistics {
    #[serde(rename = "priceToBook")]
    price_to_book: Option<RawValue>,
    #[serde(rename = "netIncomeToCommon")]
    net_income_to_common: Option<RawValue>,
    #[serde(rename = "sharesOutstanding")]
    shares_outstanding: Option<RawValue>,
}

/// Yahoo wraps every numeric as `{"raw": ..., "fmt": "..."}`; empty
/// objects stand in for missing statistics.
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CHART_JSON: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL"},
                "timestamp": [1704240000, 1704326400, 1704412800],
                "indicators": {
                    "quote": [{
                        "open": [184.2, 182.0, null],
                        "high": [185.9, 183.1, 182.8],
                        "low": [183.4, 180.9, 180.2],
                        "close": [185.6, 181.9, 181.2],
                        "volume": [82488700.0, 58414500.0, null]
                    }],
                    "adjclose": [{
                        "adjclose": [184.9, 181.2, 180.5]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    const SUMMARY_JSON: &str = r#"{
        "quoteSummary": {
            "result": [{
                "summaryDetail": {
                    "trailingPE": {"raw": 28.5, "fmt": "28.50"},
                    "dividendYield": {"raw": 0.0055, "fmt": "0.55%"},
                    "marketCap": {"raw": 3.0e12, "fmt": "3.00T"}
                },
                "defaultKeyStatistics": {
                    "priceToBook": {"raw": 40.0, "fmt": "40.00"},
                    "netIncomeToCommon": {"raw": 1.0e11, "fmt": "100B"},
                    "sharesOutstanding": {"raw": 1.5e10, "fmt": "15B"}
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_response() {
        let response: ChartResponse = serde_json::from_str(CHART_JSON).unwrap();
        let data = &response.chart.result.unwrap()[0];
        assert_eq!(data.timestamp.as_deref().unwrap().len(), 3);
        assert_eq!(data.indicators.quote[0].close[1], Some(181.9));
        assert_eq!(data.indicators.quote[0].open[2], None);
    }

    #[test]
    fn test_bars_frame() {
        let response: ChartResponse = serde_json::from_str(CHART_JSON).unwrap();
        let data = &response.chart.result.unwrap()[0];
        let df = bars_frame("AAPL", data).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 7);

        let close = df.column("close").unwrap().f64().unwrap();
        assert_relative_eq!(close.get(0).unwrap(), 185.6);
        // Nulls stay nulls for the aligner to clean.
        let open = df.column("open").unwrap().f64().unwrap();
        assert!(open.get(2).is_none());
    }

    #[test]
    fn test_bars_frame_no_timestamps() {
        let data = ChartData {
            timestamp: None,
            indicators: Indicators {
                quote: vec![QuoteBlock::default()],
                adjclose: None,
            },
        };
        let result = bars_frame("AAPL", &data);
        assert!(matches!(result, Err(DataError::NoData(_))));
    }

    #[test]
    fn test_insert_summary() {
        let response: QuoteSummaryResponse = serde_json::from_str(SUMMARY_JSON).unwrap();
        let summary = &response.quote_summary.result.unwrap()[0];

        let mut fundamentals = Fundamentals::new();
        insert_summary(&mut fundamentals, "AAPL", summary);

        assert_eq!(
            fundamentals.get("AAPL", FundamentalField::TrailingPe, ReportPeriod::Ttm),
            Some(28.5)
        );
        assert_eq!(
            fundamentals.get("AAPL", FundamentalField::MarketCap, ReportPeriod::Ttm),
            Some(3.0e12)
        );
        assert_eq!(
            fundamentals.get("AAPL", FundamentalField::NetIncome, ReportPeriod::Annual),
            Some(1.0e11)
        );
        assert_eq!(
            fundamentals.get("AAPL", FundamentalField::SharesOutstanding, ReportPeriod::Ttm),
            Some(1.5e10)
        );
        // Book value derives from market cap over price-to-book.
        assert_relative_eq!(
            fundamentals
                .get("AAPL", FundamentalField::BookValue, ReportPeriod::Annual)
                .unwrap(),
            7.5e10
        );
    }

    #[test]
    fn test_insert_summary_missing_modules() {
        let json = r#"{"quoteSummary": {"result": [{}], "error": null}}"#;
        let response: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let summary = &response.quote_summary.result.unwrap()[0];

        let mut fundamentals = Fundamentals::new();
        insert_summary(&mut fundamentals, "AAPL", summary);
        assert!(fundamentals.is_empty());
    }

    #[test]
    fn test_chart_error_payload() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found"}
            }
        }"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        let error = response.chart.error.unwrap();
        assert_eq!(error.code, "Not Found");
        assert_eq!(error.description, "No data found");
    }
}
