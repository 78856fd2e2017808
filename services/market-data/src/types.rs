use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest index close against its moving average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexTrend {
    pub symbol: String,
    /// Last valid daily close
    pub current_price: f64,
    pub moving_average: f64,
    /// Trading days in the moving average
    pub period: usize,
    pub as_of: DateTime<Utc>,
    pub source: String,
}

/// Where a resolved input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Fetched from a live source
    Live,
    /// Caller-supplied fallback after a failed fetch
    Fallback,
}

/// A value plus its provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolved<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Resolved<T> {
    pub fn is_live(&self) -> bool {
        self.origin == Origin::Live
    }
}

/// Error types for market data retrieval
#[derive(Debug, thiserror::Error)]
pub enum MarketDataError {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Insufficient history: need {needed} closes, got {available}")]
    InsufficientHistory { needed: usize, available: usize },
}

/// Result type for market data operations
pub type Result<T> = std::result::Result<T, MarketDataError>;

/// Trait for daily price sources
#[async_trait::async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Most recent price for a symbol
    async fn latest_close(&self, symbol: &str) -> Result<f64>;

    /// Up to `limit` trailing daily closes, oldest first
    async fn daily_closes(&self, symbol: &str, limit: usize) -> Result<Vec<f64>>;

    /// Source name
    fn name(&self) -> &str;
}
