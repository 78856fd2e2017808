//! Sentiment Engine Library
//!
//! Scores six market indicators, weights them by trend regime and maps the
//! composite onto a recommendation tier. Pure and synchronous: no I/O, no
//! shared state, safe to call from any thread.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod profile;
pub mod scorer;
pub mod thresholds;
pub mod tier;
pub mod trend;
pub mod weights;

// Re-export main types for convenience
pub use aggregate::{aggregate, aggregate_unweighted, contribution, COMPOSITE_SCALE};
pub use engine::{IndicatorBreakdown, SentimentEngine, SentimentReport};
pub use error::{Result, SentimentError};
pub use indicator::{Indicator, IndicatorReadings, IndicatorScores};
pub use profile::ScoringProfile;
pub use scorer::{
    score_all, score_fear_greed, score_forward_pe, score_indicator, score_mcclellan,
    score_price_bias, score_put_call, score_vix,
};
pub use thresholds::{Bound, Rung, ThresholdTable};
pub use tier::{classify_tier, classify_tier_legacy, RecommendationTier};
pub use trend::{classify_trend, price_bias_pct};
pub use weights::{select_weights, WeightMode, WeightVector, WEIGHT_TOLERANCE};
