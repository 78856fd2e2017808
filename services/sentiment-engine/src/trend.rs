//! Trend classification from the 200-day MA bias

use crate::error::{Result, SentimentError};
use crate::indicator::Indicator;

/// Uptrend iff price sits strictly above its 200-day average.
///
/// Exactly zero is not an uptrend.
pub fn classify_trend(price_bias_pct: f64) -> bool {
    price_bias_pct > 0.0
}

/// Percentage deviation of price from its moving average: `(p - ma) / ma * 100`
pub fn price_bias_pct(price: f64, moving_average: f64) -> Result<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(SentimentError::InvalidReading {
            indicator: Indicator::PriceBias,
            value: price,
            reason: "price must be a positive finite number",
        });
    }
    if !moving_average.is_finite() || moving_average <= 0.0 {
        return Err(SentimentError::InvalidReading {
            indicator: Indicator::PriceBias,
            value: moving_average,
            reason: "moving average must be a positive finite number",
        });
    }
    Ok((price - moving_average) / moving_average * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bias_is_not_uptrend() {
        assert!(!classify_trend(0.0));
        assert!(!classify_trend(-0.0));
        assert!(classify_trend(0.0001));
        assert!(!classify_trend(-0.0001));
    }

    #[test]
    fn test_nan_bias_is_not_uptrend() {
        assert!(!classify_trend(f64::NAN));
    }

    #[test]
    fn test_price_bias_pct() {
        let bias = price_bias_pct(105.0, 100.0).unwrap();
        assert!((bias - 5.0).abs() < 1e-12);

        let bias = price_bias_pct(4500.0, 5000.0).unwrap();
        assert!((bias + 10.0).abs() < 1e-12);

        assert_eq!(price_bias_pct(100.0, 100.0).unwrap(), 0.0);
    }

    #[test]
    fn test_price_bias_rejects_bad_inputs() {
        assert!(price_bias_pct(100.0, 0.0).is_err());
        assert!(price_bias_pct(100.0, -5.0).is_err());
        assert!(price_bias_pct(f64::NAN, 100.0).is_err());
        assert!(price_bias_pct(0.0, 100.0).is_err());
        assert!(price_bias_pct(100.0, f64::INFINITY).is_err());
    }
}
