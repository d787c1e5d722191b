// Daily bars from the Yahoo Finance chart endpoint
use crate::model::{FetchError, PricePoint};
use crate::provider::traits::PriceProvider;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

pub struct YahooProvider {
    client: Client,
}

impl YahooProvider {
    pub fn new(timeout_seconds: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) WeeklyScreener/0.1")
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self { client })
    }

    fn build_url(&self, ticker: &str, lookback_days: u32, now: DateTime<Utc>) -> String {
        let period1 = (now - Duration::days(lookback_days as i64)).timestamp();
        format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            CHART_URL,
            ticker,
            period1,
            now.timestamp()
        )
    }
}

/// Parses a chart response. Adjusted closes win over raw closes; days without a close are dropped.
pub fn parse_chart(body: &str) -> Result<Vec<PricePoint>, FetchError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if let Some(err) = response.chart.error {
        return Err(FetchError::Api(format!(
            "{}: {}",
            err.code,
            err.description.unwrap_or_default()
        )));
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or(FetchError::Empty)?;

    let closes = match result.indicators.adjclose.into_iter().next() {
        Some(adj) if !adj.adjclose.is_empty() => adj.adjclose,
        _ => result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default(),
    };

    let offset = result.meta.gmtoffset;
    let points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let close = close?;
            // exchange-local trading date
            let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
            Some(PricePoint { date, close })
        })
        .collect();

    if points.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(points)
}

#[async_trait::async_trait]
impl PriceProvider for YahooProvider {
    async fn fetch_prices(&self, ticker: &str, lookback_days: u32) -> Result<Vec<PricePoint>, FetchError> {
        let url = self.build_url(ticker, lookback_days, Utc::now());
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        // an unparseable error page is reported by its status
        match parse_chart(&body) {
            Err(FetchError::Parse(_)) if !status.is_success() => Err(FetchError::Status(status.as_u16())),
            other => other,
        }
    }
}
