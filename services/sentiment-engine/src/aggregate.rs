//! Composite score aggregation

use crate::indicator::{Indicator, IndicatorScores};
use crate::weights::WeightVector;

/// Composite range is [-COMPOSITE_SCALE, COMPOSITE_SCALE]
pub const COMPOSITE_SCALE: f64 = 8.0;

/// Largest absolute per-indicator score in the weighted profiles
const MAX_INDICATOR_SCORE: f64 = 2.0;

/// Round half away from zero to 2 decimals; never returns -0.0
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Normalize -> weight -> sum -> scale -> round.
///
/// With scores in [-2, 2] and weights summing to 1.0 the result lies in
/// [-8.00, 8.00].
pub fn aggregate(scores: &IndicatorScores, weights: &WeightVector) -> f64 {
    let weighted: f64 = Indicator::ALL
        .iter()
        .map(|&indicator| {
            f64::from(scores.get(indicator)) / MAX_INDICATOR_SCORE * weights.get(indicator)
        })
        .sum();
    round_cents(weighted * COMPOSITE_SCALE)
}

/// One indicator's share of the composite, unrounded
pub fn contribution(score: i8, weight: f64) -> f64 {
    f64::from(score) / MAX_INDICATOR_SCORE * weight * COMPOSITE_SCALE
}

/// Plain sum of raw scores, no normalization or scaling
pub fn aggregate_unweighted(scores: &IndicatorScores) -> f64 {
    scores.iter().map(|(_, score)| f64::from(score)).sum()
}
