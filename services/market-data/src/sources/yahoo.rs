use crate::types::*;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const YAHOO_CHART_BASE: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance chart API client (daily bars, no API key)
pub struct YahooChartClient {
    client: Client,
    base_url: String,
}

impl YahooChartClient {
    /// Per-request timeout
    const REQUEST_TIMEOUT_SECS: u64 = 10;

    pub fn new() -> Result<Self> {
        Self::with_base_url(YAHOO_CHART_BASE)
    }

    /// Point the client at another host (tests, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
            .user_agent("market-data/0.1")
            .build()
            .map_err(|e| MarketDataError::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Index symbols start with '^', which must be escaped in the path
    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.base_url,
            symbol.replace('^', "%5E")
        )
    }

    /// Smallest chart range holding `limit` trading days, with headroom
    /// for holidays and null closes
    fn range_for(limit: usize) -> &'static str {
        match limit {
            0..=3 => "5d",
            4..=15 => "1mo",
            16..=230 => "1y",
            231..=460 => "2y",
            _ => "5y",
        }
    }

    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<ChartResult> {
        let url = self.chart_url(symbol);
        debug!("Fetching Yahoo chart for {} ({}) from {}", symbol, range, url);

        let response = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| MarketDataError::Api(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MarketDataError::Api(e.to_string()))?;

        let parsed: Option<ChartResponse> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            let detail = parsed
                .and_then(|r| r.chart.error)
                .map(|e| format!("{}: {}", e.code, e.description))
                .unwrap_or(text);
            return Err(MarketDataError::Api(format!(
                "Yahoo chart API error ({}): {}",
                status, detail
            )));
        }

        let chart = parsed
            .ok_or_else(|| MarketDataError::InvalidResponse("Malformed chart body".to_string()))?
            .chart;

        if let Some(error) = chart.error {
            return Err(MarketDataError::Api(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }

    /// Daily closes, oldest first. Gaps (null closes) are skipped.
    pub async fn daily_closes(&self, symbol: &str, limit: usize) -> Result<Vec<f64>> {
        let chart = self.fetch_chart(symbol, Self::range_for(limit)).await?;
        let mut closes = chart.closes();
        if closes.len() > limit {
            closes.drain(..closes.len() - limit);
        }
        Ok(closes)
    }

    /// Regular market price, else the last valid daily close
    pub async fn latest_close(&self, symbol: &str) -> Result<f64> {
        let chart = self.fetch_chart(symbol, "5d").await?;
        chart
            .meta
            .regular_market_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .or_else(|| chart.closes().last().copied())
            .ok_or_else(|| {
                MarketDataError::InvalidResponse(format!("No price data for {}", symbol))
            })
    }

    /// Source name
    pub fn name(&self) -> &str {
        "yahoo"
    }
}

// Response types for the Yahoo chart API
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    indicators: ChartIndicators,
}

impl ChartResult {
    fn closes(&self) -> Vec<f64> {
        self.indicators
            .quote
            .first()
            .map(|q| {
                q.close
                    .iter()
                    .flatten()
                    .copied()
                    .filter(|c| c.is_finite() && *c > 0.0)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[async_trait::async_trait]
impl MarketDataSource for YahooChartClient {
    async fn latest_close(&self, symbol: &str) -> Result<f64> {
        YahooChartClient::latest_close(self, symbol).await
    }

    async fn daily_closes(&self, symbol: &str, limit: usize) -> Result<Vec<f64>> {
        YahooChartClient::daily_closes(self, symbol, limit).await
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
