use crate::indicator::Indicator;

/// Error types for sentiment scoring
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SentimentError {
    #[error("Invalid reading for {indicator}: {value} ({reason})")]
    InvalidReading {
        indicator: Indicator,
        value: f64,
        reason: &'static str,
    },

    #[error("Weights must sum to 1.0, got: {sum}")]
    WeightConfiguration { sum: f64 },

    #[error("Weight for {indicator} must be finite and non-negative, got: {weight}")]
    NegativeWeight { indicator: Indicator, weight: f64 },

    #[error("Unknown scoring profile: {0}")]
    UnknownProfile(String),
}

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, SentimentError>;
