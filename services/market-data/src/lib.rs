pub mod types;
pub mod averages;
pub mod sources {
    pub mod yahoo;
}

pub use types::*;
pub use averages::simple_moving_average;
pub use sources::yahoo::YahooChartClient;

use chrono::Utc;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, warn};

/// CBOE volatility index
pub const VIX_SYMBOL: &str = "^VIX";
/// Index whose trend drives the price-bias reading
pub const INDEX_SYMBOL: &str = "^GSPC";
/// Trading days in the long moving average
pub const MOVING_AVERAGE_PERIOD: usize = 200;

/// Pulls the live inputs for one sentiment evaluation
pub struct MarketDataService {
    source: Arc<dyn MarketDataSource>,
    index_symbol: String,
    ma_period: usize,
}

impl MarketDataService {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self {
            source,
            index_symbol: INDEX_SYMBOL.to_string(),
            ma_period: MOVING_AVERAGE_PERIOD,
        }
    }

    /// Service backed by the public Yahoo chart API
    pub fn yahoo() -> Result<Self> {
        Ok(Self::new(Arc::new(YahooChartClient::new()?)))
    }

    /// Track a different index for the trend reading
    pub fn with_index(mut self, symbol: impl Into<String>) -> Self {
        self.index_symbol = symbol.into();
        self
    }

    pub fn with_moving_average_period(mut self, period: usize) -> Self {
        self.ma_period = period;
        self
    }

    pub fn index_symbol(&self) -> &str {
        &self.index_symbol
    }

    pub async fn current_vix(&self) -> Result<f64> {
        self.source.latest_close(VIX_SYMBOL).await
    }

    /// Latest index close and its moving average
    pub async fn index_trend(&self) -> Result<IndexTrend> {
        let closes = self
            .source
            .daily_closes(&self.index_symbol, self.ma_period)
            .await?;
        let moving_average = simple_moving_average(&closes, self.ma_period)?;
        let current_price = closes.last().copied().ok_or(MarketDataError::InsufficientHistory {
            needed: self.ma_period,
            available: 0,
        })?;

        info!(
            "{} from {}: {:.2} vs {}d MA {:.2}",
            self.index_symbol,
            self.source.name(),
            current_price,
            self.ma_period,
            moving_average
        );

        Ok(IndexTrend {
            symbol: self.index_symbol.clone(),
            current_price,
            moving_average,
            period: self.ma_period,
            as_of: Utc::now(),
            source: self.source.name().to_string(),
        })
    }
}

/// Take a live value, or log the failure and use the fallback
pub fn resolve_or_fallback<T, E: Display>(
    what: &str,
    result: std::result::Result<T, E>,
    fallback: T,
) -> Resolved<T> {
    match result {
        Ok(value) => Resolved {
            value,
            origin: Origin::Live,
        },
        Err(e) => {
            warn!("Failed to fetch {}: {}; using fallback", what, e);
            Resolved {
                value: fallback,
                origin: Origin::Fallback,
            }
        }
    }
}
