//! Sentiment engine - single evaluation pipeline for all profiles
//!
//! validate -> trend -> score -> weights -> aggregate -> tier

use serde::Serialize;
use tracing::debug;

use crate::aggregate::{aggregate, aggregate_unweighted, contribution};
use crate::error::Result;
use crate::indicator::{Indicator, IndicatorReadings, IndicatorScores};
use crate::profile::ScoringProfile;
use crate::scorer::{score_all, score_all_legacy};
use crate::tier::{classify_tier, classify_tier_legacy, RecommendationTier};
use crate::trend::classify_trend;
use crate::weights::{select_weights, WeightVector};

/// One indicator's line in the report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorBreakdown {
    pub indicator: Indicator,
    pub reading: f64,
    pub score: i8,
    /// Zero for indicators the profile ignores
    pub weight: f64,
    /// Points this indicator adds to the composite
    pub contribution: f64,
}

/// Everything the presentation layer needs from one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub profile: ScoringProfile,
    pub readings: IndicatorReadings,
    pub scores: IndicatorScores,
    /// None for the unweighted legacy profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightVector>,
    /// None for profiles that ignore the trend
    pub uptrend: Option<bool>,
    pub composite: f64,
    pub tier: RecommendationTier,
    pub breakdown: Vec<IndicatorBreakdown>,
}

impl SentimentReport {
    /// Largest absolute contributors first
    pub fn top_contributors(&self, n: usize) -> Vec<&IndicatorBreakdown> {
        let mut lines: Vec<_> = self
            .breakdown
            .iter()
            .filter(|line| line.contribution != 0.0)
            .collect();
        lines.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
        lines.truncate(n);
        lines
    }
}

/// Sentiment engine - evaluates readings against a profile
#[derive(Debug, Clone, Default)]
pub struct SentimentEngine {
    profile: ScoringProfile,
    weight_override: Option<WeightVector>,
}

impl SentimentEngine {
    /// Create new engine with profile
    pub fn new(profile: ScoringProfile) -> Self {
        Self {
            profile,
            weight_override: None,
        }
    }

    /// Replace profile weights with a validated caller-supplied vector.
    ///
    /// Ignored by the legacy profile, which does not weight.
    pub fn with_weights(mut self, weights: WeightVector) -> Self {
        self.weight_override = Some(weights);
        self
    }

    pub fn profile(&self) -> ScoringProfile {
        self.profile
    }

    /// Weight vector this engine would use under the given trend
    pub fn weights_for(&self, uptrend: bool) -> Option<WeightVector> {
        let mode = self.profile.weight_mode()?;
        Some(
            self.weight_override
                .unwrap_or_else(|| select_weights(uptrend, mode)),
        )
    }

    /// Run the full pipeline over one set of readings
    pub fn evaluate(&self, readings: &IndicatorReadings) -> Result<SentimentReport> {
        readings.validate_only(self.profile.indicators())?;

        let uptrend = classify_trend(readings.price_bias_pct);
        let weights = self.weights_for(uptrend);

        let (scores, composite, tier, uptrend) = match weights {
            Some(ref weights) => {
                let scores = score_all(readings, uptrend)?;
                let composite = aggregate(&scores, weights);
                (scores, composite, classify_tier(composite), Some(uptrend))
            }
            None => {
                let scores = score_all_legacy(readings)?;
                let composite = aggregate_unweighted(&scores);
                (scores, composite, classify_tier_legacy(composite), None)
            }
        };

        let breakdown = Indicator::ALL
            .iter()
            .map(|&indicator| {
                let score = scores.get(indicator);
                let (weight, points) = match weights {
                    Some(ref weights) => {
                        let weight = weights.get(indicator);
                        (weight, contribution(score, weight))
                    }
                    None => (0.0, f64::from(score)),
                };
                IndicatorBreakdown {
                    indicator,
                    reading: readings.get(indicator),
                    score,
                    weight,
                    contribution: points,
                }
            })
            .collect();

        debug!(
            profile = %self.profile,
            uptrend = ?uptrend,
            composite,
            tier = ?tier,
            "Evaluated market sentiment"
        );

        Ok(SentimentReport {
            profile: self.profile,
            readings: *readings,
            scores,
            weights,
            uptrend,
            composite,
            tier,
            breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SentimentError;

    fn calm() -> IndicatorReadings {
        IndicatorReadings {
            fear_greed: 50.0,
            mcclellan: 0.0,
            put_call: 0.65,
            vix: 15.0,
            price_bias_pct: 5.0,
            forward_pe: 20.0,
        }
    }

    #[test]
    fn test_calm_market_is_neutral() {
        let report = SentimentEngine::default().evaluate(&calm()).unwrap();
        assert_eq!(report.uptrend, Some(true));
        assert_eq!(report.scores, IndicatorScores::uniform(0));
        assert_eq!(report.composite, 0.0);
        assert_eq!(report.tier, RecommendationTier::Neutral);
        assert_eq!(report.weights, Some(WeightVector::UPTREND));
        assert!(report.top_contributors(3).is_empty());
    }

    #[test]
    fn test_invalid_reading_fails_the_call() {
        let mut readings = calm();
        readings.put_call = f64::NAN;
        let err = SentimentEngine::default().evaluate(&readings).unwrap_err();
        assert!(matches!(
            err,
            SentimentError::InvalidReading {
                indicator: Indicator::PutCall,
                ..
            }
        ));
    }

    #[test]
    fn test_weight_override_applies_to_weighted_profiles() {
        let weights = WeightVector::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let mut readings = calm();
        readings.fear_greed = 10.0;

        let report = SentimentEngine::new(ScoringProfile::FixedWeights)
            .with_weights(weights)
            .evaluate(&readings)
            .unwrap();
        assert_eq!(report.composite, 8.0);
        assert_eq!(report.tier, RecommendationTier::ExtremeFear);

        let legacy = SentimentEngine::new(ScoringProfile::Legacy).with_weights(weights);
        assert!(legacy.weights_for(true).is_none());
    }

    #[test]
    fn test_legacy_report_has_no_trend() {
        let mut readings = calm();
        readings.price_bias_pct = f64::NAN;
        let report = SentimentEngine::new(ScoringProfile::Legacy)
            .evaluate(&readings)
            .unwrap();
        assert_eq!(report.uptrend, None);

        let report = SentimentEngine::new(ScoringProfile::Legacy)
            .evaluate(&calm())
            .unwrap();
        assert_eq!(report.uptrend, None);
    }

    #[test]
    fn test_fixed_weights_ignore_trend() {
        let engine = SentimentEngine::new(ScoringProfile::FixedWeights);
        assert_eq!(engine.weights_for(true), Some(WeightVector::FIXED));
        assert_eq!(engine.weights_for(false), Some(WeightVector::FIXED));
    }

    #[test]
    fn test_breakdown_covers_all_indicators_in_order() {
        let report = SentimentEngine::default().evaluate(&calm()).unwrap();
        let order: Vec<_> = report.breakdown.iter().map(|l| l.indicator).collect();
        assert_eq!(order, Indicator::ALL.to_vec());
        assert_eq!(report.breakdown[3].reading, 15.0);
    }

    #[test]
    fn test_top_contributors_sorted_by_magnitude() {
        let readings = IndicatorReadings {
            fear_greed: 80.0,
            mcclellan: -120.0,
            put_call: 0.65,
            vix: 15.0,
            price_bias_pct: -2.0,
            forward_pe: 16.0,
        };
        let report = SentimentEngine::default().evaluate(&readings).unwrap();
        assert_eq!(report.uptrend, Some(false));

        // mcc +2 * 0.20 -> 1.6, fg -2 * 0.05 -> -0.4, pe +1 * 0.25 -> 1.0
        let top = report.top_contributors(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].indicator, Indicator::McClellan);
        assert_eq!(top[1].indicator, Indicator::ForwardPe);
    }
}
