//! Sentiment CLI - prints the market sentiment recommendation
//!
//! 1. Loads settings (defaults, optional TOML file, SENTIMENT__* env)
//! 2. Optionally pulls live VIX and index trend, falling back to configured readings
//! 3. Evaluates the readings with the configured scoring profile
//! 4. Renders the report as text or JSON

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use market_data::{resolve_or_fallback, IndexTrend, MarketDataService};
use sentiment_engine::{price_bias_pct, Indicator, IndicatorReadings, SentimentEngine};

mod render;
mod settings;

use render::SourceNote;
use settings::{OutputFormat, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    // Logs go to stderr so JSON output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load()?;
    info!(
        "Scoring profile: {}, live: {}",
        settings.profile.display_name(),
        settings.live
    );

    let (readings, sources) = if settings.live {
        resolve_live(&settings).await
    } else {
        (settings.readings, Vec::new())
    };

    let mut engine = SentimentEngine::new(settings.profile);
    if let Some(weights) = settings.weight_override()? {
        engine = engine.with_weights(weights);
    }

    let report = engine
        .evaluate(&readings)
        .context("Failed to evaluate market sentiment")?;

    let output = match settings.output {
        OutputFormat::Text => render::render_text(&report, &sources),
        OutputFormat::Json => render::render_json(&report, &sources)?,
    };
    println!("{}", output);

    Ok(())
}

/// Replace VIX and price bias with live values where the fetch succeeds
async fn resolve_live(settings: &Settings) -> (IndicatorReadings, Vec<SourceNote>) {
    let mut readings = settings.readings;

    let service = match MarketDataService::yahoo() {
        Ok(service) => service
            .with_index(settings.market.index_symbol.clone())
            .with_moving_average_period(settings.market.moving_average_period),
        Err(e) => {
            warn!("Market data unavailable ({}), using configured readings", e);
            let sources = [Indicator::Vix, Indicator::PriceBias]
                .into_iter()
                .map(|indicator| SourceNote {
                    indicator,
                    origin: market_data::Origin::Fallback,
                })
                .collect();
            return (readings, sources);
        }
    };

    let (vix, trend) = tokio::join!(service.current_vix(), service.index_trend());

    let vix = resolve_or_fallback("VIX", vix, readings.vix);
    let bias = resolve_or_fallback("price bias", live_bias(trend), readings.price_bias_pct);

    readings.vix = vix.value;
    readings.price_bias_pct = bias.value;

    let sources = vec![
        SourceNote {
            indicator: Indicator::Vix,
            origin: vix.origin,
        },
        SourceNote {
            indicator: Indicator::PriceBias,
            origin: bias.origin,
        },
    ];
    (readings, sources)
}

/// Price bias from a fetched index trend, checked by the engine
fn live_bias(trend: market_data::Result<IndexTrend>) -> Result<f64> {
    let trend = trend?;
    let bias = price_bias_pct(trend.current_price, trend.moving_average)
        .with_context(|| format!("Unusable {} trend data", trend.symbol))?;
    Ok(bias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use market_data::{MarketDataError, Origin};

    fn trend(current_price: f64, moving_average: f64) -> IndexTrend {
        IndexTrend {
            symbol: "^GSPC".to_string(),
            current_price,
            moving_average,
            period: 200,
            as_of: Utc::now(),
            source: "test".to_string(),
        }
    }

    #[test]
    fn test_live_bias_from_trend() {
        let bias = live_bias(Ok(trend(110.0, 100.0))).unwrap();
        assert!((bias - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_live_bias_rejects_non_positive_price() {
        assert!(live_bias(Ok(trend(0.0, 100.0))).is_err());
        assert!(live_bias(Ok(trend(-5.0, 100.0))).is_err());
        assert!(live_bias(Ok(trend(100.0, 0.0))).is_err());

        let bias = resolve_or_fallback("price bias", live_bias(Ok(trend(-5.0, 100.0))), 3.0);
        assert_eq!(bias.value, 3.0);
        assert_eq!(bias.origin, Origin::Fallback);
    }

    #[test]
    fn test_live_bias_propagates_fetch_errors() {
        let err = live_bias(Err(MarketDataError::SymbolNotFound("^GSPC".to_string())));
        assert!(err.is_err());
    }
}
