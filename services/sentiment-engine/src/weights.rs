//! Weight vectors over the six indicators

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};
use crate::indicator::Indicator;

/// Allowed drift of a weight sum from 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Six non-negative weights summing to 1.0.
///
/// Fields are private so every vector in circulation has passed `new`
/// or is one of the fixed constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightVector {
    fear_greed: f64,
    mcclellan: f64,
    put_call: f64,
    vix: f64,
    price_bias_pct: f64,
    forward_pe: f64,
}

impl WeightVector {
    /// Uptrend: volatility and breadth lead, valuation barely counts
    pub const UPTREND: WeightVector = WeightVector {
        fear_greed: 0.10,
        mcclellan: 0.25,
        put_call: 0.20,
        vix: 0.25,
        price_bias_pct: 0.15,
        forward_pe: 0.05,
    };

    /// Non-uptrend: distance from the MA and valuation dominate
    pub const NON_UPTREND: WeightVector = WeightVector {
        fear_greed: 0.05,
        mcclellan: 0.20,
        put_call: 0.05,
        vix: 0.15,
        price_bias_pct: 0.30,
        forward_pe: 0.25,
    };

    /// Trend-independent vector
    pub const FIXED: WeightVector = WeightVector {
        fear_greed: 0.15,
        mcclellan: 0.15,
        put_call: 0.10,
        vix: 0.15,
        price_bias_pct: 0.25,
        forward_pe: 0.20,
    };

    /// Build a caller-supplied vector, rejecting negatives and bad sums
    pub fn new(
        fear_greed: f64,
        mcclellan: f64,
        put_call: f64,
        vix: f64,
        price_bias_pct: f64,
        forward_pe: f64,
    ) -> Result<Self> {
        let weights = Self {
            fear_greed,
            mcclellan,
            put_call,
            vix,
            price_bias_pct,
            forward_pe,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<()> {
        for (indicator, weight) in self.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SentimentError::NegativeWeight { indicator, weight });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(SentimentError::WeightConfiguration { sum });
        }
        Ok(())
    }

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

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, weight)| weight).sum()
    }

    /// Weights in canonical indicator order
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, f64)> + '_ {
        Indicator::ALL.iter().map(move |&indicator| (indicator, self.get(indicator)))
    }
}

/// How the weight vector is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightMode {
    /// Pick by trend flag
    #[default]
    TrendAdaptive,
    /// Same vector regardless of trend
    Fixed,
}

pub fn select_weights(uptrend: bool, mode: WeightMode) -> WeightVector {
    match (mode, uptrend) {
        (WeightMode::TrendAdaptive, true) => WeightVector::UPTREND,
        (WeightMode::TrendAdaptive, false) => WeightVector::NON_UPTREND,
        (WeightMode::Fixed, _) => WeightVector::FIXED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_vectors_sum_to_one() {
        for weights in [
            WeightVector::UPTREND,
            WeightVector::NON_UPTREND,
            WeightVector::FIXED,
        ] {
            assert!((weights.sum() - 1.0).abs() < 1e-9, "sum = {}", weights.sum());
            assert!(weights.validate().is_ok());
        }
    }

    #[test]
    fn test_select_weights() {
        let up = select_weights(true, WeightMode::TrendAdaptive);
        let down = select_weights(false, WeightMode::TrendAdaptive);
        assert_eq!(up.get(Indicator::Vix), 0.25);
        assert_eq!(up.get(Indicator::ForwardPe), 0.05);
        assert_eq!(down.get(Indicator::PriceBias), 0.30);
        assert_eq!(down.get(Indicator::PutCall), 0.05);

        assert!((select_weights(true, WeightMode::TrendAdaptive).sum() - 1.0).abs() < 1e-9);
        assert!((select_weights(false, WeightMode::TrendAdaptive).sum() - 1.0).abs() < 1e-9);

        assert_eq!(select_weights(true, WeightMode::Fixed), WeightVector::FIXED);
        assert_eq!(select_weights(false, WeightMode::Fixed), WeightVector::FIXED);
    }

    #[test]
    fn test_new_rejects_bad_sum() {
        match WeightVector::new(0.2, 0.2, 0.2, 0.2, 0.2, 0.2) {
            Err(SentimentError::WeightConfiguration { sum }) => {
                assert!((sum - 1.2).abs() < 1e-9)
            }
            other => panic!("expected WeightConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_negative_and_nan() {
        assert!(matches!(
            WeightVector::new(0.5, 0.5, 0.2, -0.2, 0.0, 0.0),
            Err(SentimentError::NegativeWeight {
                indicator: Indicator::Vix,
                ..
            })
        ));
        assert!(WeightVector::new(f64::NAN, 0.5, 0.5, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_new_accepts_rounding_noise() {
        let third = 1.0 / 3.0;
        assert!(WeightVector::new(third, third, third, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_serializes_with_indicator_keys() {
        let value = serde_json::to_value(WeightVector::FIXED).unwrap();
        for indicator in Indicator::ALL {
            assert_eq!(
                value[indicator.key()].as_f64().unwrap(),
                WeightVector::FIXED.get(indicator)
            );
        }
    }
}
