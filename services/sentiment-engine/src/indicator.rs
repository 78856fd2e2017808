//! Indicator identities, raw readings and per-indicator scores

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SentimentError};

/// The six market indicators, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    #[serde(rename = "fear_greed")]
    FearGreed,
    #[serde(rename = "mcclellan")]
    McClellan,
    #[serde(rename = "put_call")]
    PutCall,
    #[serde(rename = "vix")]
    Vix,
    #[serde(rename = "price_bias_pct")]
    PriceBias,
    #[serde(rename = "forward_pe")]
    ForwardPe,
}

impl Indicator {
    pub const ALL: [Indicator; 6] = [
        Indicator::FearGreed,
        Indicator::McClellan,
        Indicator::PutCall,
        Indicator::Vix,
        Indicator::PriceBias,
        Indicator::ForwardPe,
    ];

    /// Stable snake_case key, matches the serialized field names
    pub fn key(&self) -> &'static str {
        match self {
            Indicator::FearGreed => "fear_greed",
            Indicator::McClellan => "mcclellan",
            Indicator::PutCall => "put_call",
            Indicator::Vix => "vix",
            Indicator::PriceBias => "price_bias_pct",
            Indicator::ForwardPe => "forward_pe",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Indicator::FearGreed => "Fear & Greed Index",
            Indicator::McClellan => "McClellan Oscillator",
            Indicator::PutCall => "Put/Call Ratio",
            Indicator::Vix => "VIX",
            Indicator::PriceBias => "200-Day MA Bias",
            Indicator::ForwardPe => "Forward P/E",
        }
    }

    /// Whether the threshold table depends on the trend flag
    pub fn is_trend_sensitive(&self) -> bool {
        matches!(self, Indicator::Vix | Indicator::PriceBias)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Reject NaN and infinities before they reach a threshold table
pub(crate) fn ensure_finite(indicator: Indicator, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SentimentError::InvalidReading {
            indicator,
            value,
            reason: "must be a finite number",
        })
    }
}

/// Full reading check: finite plus the documented domain of the indicator.
///
/// McClellan and price bias accept any finite real. Fear & Greed lives on
/// 0-100; the ratio-style indicators must be strictly positive.
pub fn check_reading(indicator: Indicator, value: f64) -> Result<()> {
    ensure_finite(indicator, value)?;

    let reason = match indicator {
        Indicator::FearGreed if !(0.0..=100.0).contains(&value) => {
            Some("must be between 0 and 100")
        }
        Indicator::PutCall | Indicator::Vix | Indicator::ForwardPe if value <= 0.0 => {
            Some("must be positive")
        }
        _ => None,
    };

    match reason {
        Some(reason) => Err(SentimentError::InvalidReading {
            indicator,
            value,
            reason,
        }),
        None => Ok(()),
    }
}

/// Raw values for the six indicators, already in their documented units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReadings {
    /// CNN Fear & Greed Index (0-100)
    pub fear_greed: f64,
    /// McClellan Oscillator, typically -200..+200
    pub mcclellan: f64,
    /// CBOE Put/Call Ratio, typically 0.3-1.3
    pub put_call: f64,
    /// VIX level, typically 9-80
    pub vix: f64,
    /// Percentage deviation from the 200-day MA (5.0 means +5%)
    pub price_bias_pct: f64,
    /// Forward P/E, typically 10-40
    pub forward_pe: f64,
}

impl IndicatorReadings {
    pub fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::FearGreed => self.fear_greed,
            Indicator::McClellan => self.mcclellan,
            Indicator::PutCall => self.put_call,
            Indicator::Vix => self.vix,
            Indicator::PriceBias => self.price_bias_pct,
            Indicator::ForwardPe => self.forward_pe,
        }
    }

    /// Check every reading
    pub fn validate(&self) -> Result<()> {
        self.validate_only(&Indicator::ALL)
    }

    /// Check a subset of readings (profiles that ignore some indicators)
    pub fn validate_only(&self, indicators: &[Indicator]) -> Result<()> {
        for &indicator in indicators {
            check_reading(indicator, self.get(indicator))?;
        }
        Ok(())
    }
}

/// Integer score per indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndicatorScores {
    pub fear_greed: i8,
    pub mcclellan: i8,
    pub put_call: i8,
    pub vix: i8,
    pub price_bias_pct: i8,
    pub forward_pe: i8,
}

impl IndicatorScores {
    /// Same score for every indicator
    pub fn uniform(score: i8) -> Self {
        Self {
            fear_greed: score,
            mcclellan: score,
            put_call: score,
            vix: score,
            price_bias_pct: score,
            forward_pe: score,
        }
    }

    pub fn get(&self, indicator: Indicator) -> i8 {
        match indicator {
            Indicator::FearGreed => self.fear_greed,
            Indicator::McClellan => self.mcclellan,
            Indicator::PutCall => self.put_call,
            Indicator::Vix => self.vix,
            Indicator::PriceBias => self.price_bias_pct,
            Indicator::ForwardPe => self.forward_pe,
        }
    }

    pub fn set(&mut self, indicator: Indicator, score: i8) {
        let slot = match indicator {
            Indicator::FearGreed => &mut self.fear_greed,
            Indicator::McClellan => &mut self.mcclellan,
            Indicator::PutCall => &mut self.put_call,
            Indicator::Vix => &mut self.vix,
            Indicator::PriceBias => &mut self.price_bias_pct,
            Indicator::ForwardPe => &mut self.forward_pe,
        };
        *slot = score;
    }

    /// Scores in canonical indicator order
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, i8)> + '_ {
        Indicator::ALL.iter().map(move |&indicator| (indicator, self.get(indicator)))
    }
}
