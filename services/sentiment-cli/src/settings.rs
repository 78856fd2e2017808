//! CLI settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `SENTIMENT__*` environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sentiment_engine::{IndicatorReadings, ScoringProfile, WeightVector};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_VAR: &str = "SENTIMENT_CONFIG";
/// Looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "sentiment";

/// How the report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Caller-supplied weights, checked when converted
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeightSettings {
    pub fear_greed: f64,
    pub mcclellan: f64,
    pub put_call: f64,
    pub vix: f64,
    pub price_bias_pct: f64,
    pub forward_pe: f64,
}

impl WeightSettings {
    pub fn to_vector(&self) -> sentiment_engine::Result<WeightVector> {
        WeightVector::new(
            self.fear_greed,
            self.mcclellan,
            self.put_call,
            self.vix,
            self.price_bias_pct,
            self.forward_pe,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketSettings {
    pub index_symbol: String,
    pub moving_average_period: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(deserialize_with = "deserialize_profile")]
    pub profile: ScoringProfile,
    /// Pull VIX and price bias from market data
    pub live: bool,
    pub output: OutputFormat,
    /// Manual readings; also the fallback for failed live fetches
    pub readings: IndicatorReadings,
    pub weights: Option<WeightSettings>,
    pub market: MarketSettings,
}

/// Accepts the aliases `ScoringProfile::from_str` does
fn deserialize_profile<'de, D>(deserializer: D) -> std::result::Result<ScoringProfile, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

impl Settings {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
        Self::from_sources(path.as_deref(), None)
    }

    /// Build from an optional file and an optional environment map.
    ///
    /// `env = None` reads the process environment.
    pub fn from_sources(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let ma_period = market_data::MOVING_AVERAGE_PERIOD as i64;

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .set_default("profile", ScoringProfile::default().key())?
            .set_default("live", false)?
            .set_default("output", "text")?
            .set_default("readings.fear_greed", 50.0)?
            .set_default("readings.mcclellan", 0.0)?
            .set_default("readings.put_call", 0.65)?
            .set_default("readings.vix", 15.0)?
            .set_default("readings.price_bias_pct", 0.0)?
            .set_default("readings.forward_pe", 20.0)?
            .set_default("market.index_symbol", market_data::INDEX_SYMBOL)?
            .set_default("market.moving_average_period", ma_period)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("SENTIMENT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("Failed to load settings")?;

        settings
            .try_deserialize()
            .context("Invalid settings")
    }

    /// Validated weight override, if one is configured
    pub fn weight_override(&self) -> Result<Option<WeightVector>> {
        self.weights
            .as_ref()
            .map(|w| w.to_vector().context("Invalid weight override"))
            .transpose()
    }
}
