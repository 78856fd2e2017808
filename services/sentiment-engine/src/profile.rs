//! Scoring profiles
//!
//! Each dashboard revision differs only in data: which tables, which
//! weights, which tier cut points. A profile names one such combination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SentimentError;
use crate::indicator::Indicator;
use crate::thresholds::legacy;
use crate::weights::WeightMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringProfile {
    /// Trend-conditional tables and weights, five tiers
    #[default]
    TrendAdaptive,
    /// Trend-conditional tables, one fixed weight vector, five tiers
    FixedWeights,
    /// Four indicators, unweighted sum, four bands
    Legacy,
}

impl ScoringProfile {
    pub const ALL: [ScoringProfile; 3] = [
        ScoringProfile::TrendAdaptive,
        ScoringProfile::FixedWeights,
        ScoringProfile::Legacy,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ScoringProfile::TrendAdaptive => "trend_adaptive",
            ScoringProfile::FixedWeights => "fixed_weights",
            ScoringProfile::Legacy => "legacy",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ScoringProfile::TrendAdaptive => "Trend Adaptive",
            ScoringProfile::FixedWeights => "Fixed Weights",
            ScoringProfile::Legacy => "Legacy (4 indicators)",
        }
    }

    /// None when the profile does not weight at all
    pub fn weight_mode(&self) -> Option<WeightMode> {
        match self {
            ScoringProfile::TrendAdaptive => Some(WeightMode::TrendAdaptive),
            ScoringProfile::FixedWeights => Some(WeightMode::Fixed),
            ScoringProfile::Legacy => None,
        }
    }

    /// Indicators that contribute to the composite
    pub fn indicators(&self) -> &'static [Indicator] {
        match self {
            ScoringProfile::TrendAdaptive | ScoringProfile::FixedWeights => &Indicator::ALL,
            ScoringProfile::Legacy => &legacy::INDICATORS,
        }
    }
}

impl fmt::Display for ScoringProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScoringProfile {
    type Err = SentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "trend_adaptive" | "adaptive" => Ok(ScoringProfile::TrendAdaptive),
            "fixed_weights" | "fixed" => Ok(ScoringProfile::FixedWeights),
            "legacy" => Ok(ScoringProfile::Legacy),
            _ => Err(SentimentError::UnknownProfile(s.to_string())),
        }
    }
}
