//! Indicator scorers
//!
//! One thin wrapper per indicator around the shared table lookup. All of
//! them are total over the finite reals; NaN and infinities are rejected.

use crate::error::Result;
use crate::indicator::{ensure_finite, Indicator, IndicatorReadings, IndicatorScores};
use crate::thresholds::{self, ThresholdTable};

fn score_with(indicator: Indicator, table: &ThresholdTable, value: f64) -> Result<i8> {
    let value = ensure_finite(indicator, value)?;
    Ok(table.lookup(value))
}

/// Fear & Greed: low readings mean fear, which scores as a buying signal
pub fn score_fear_greed(value: f64) -> Result<i8> {
    score_with(Indicator::FearGreed, &thresholds::FEAR_GREED, value)
}

pub fn score_mcclellan(value: f64) -> Result<i8> {
    score_with(Indicator::McClellan, &thresholds::MCCLELLAN, value)
}

/// Put/Call: heavy put buying means fear, so high ratios score positive
pub fn score_put_call(value: f64) -> Result<i8> {
    score_with(Indicator::PutCall, &thresholds::PUT_CALL, value)
}

/// VIX: an uptrend needs less volatility before a spike counts as fear
pub fn score_vix(value: f64, uptrend: bool) -> Result<i8> {
    score_with(
        Indicator::Vix,
        thresholds::table_for(Indicator::Vix, uptrend),
        value,
    )
}

/// Price bias vs. the 200-day MA, in percentage points.
///
/// Uptrend: buy shallow dips, penalize extension early. Otherwise: only
/// deep discounts score as buys.
pub fn score_price_bias(value_pct: f64, uptrend: bool) -> Result<i8> {
    score_with(
        Indicator::PriceBias,
        thresholds::table_for(Indicator::PriceBias, uptrend),
        value_pct,
    )
}

pub fn score_forward_pe(value: f64) -> Result<i8> {
    score_with(Indicator::ForwardPe, &thresholds::FORWARD_PE, value)
}

/// Score any indicator; `uptrend` only matters for VIX and price bias
pub fn score_indicator(indicator: Indicator, value: f64, uptrend: bool) -> Result<i8> {
    score_with(indicator, thresholds::table_for(indicator, uptrend), value)
}

/// Score all six readings under one trend flag
pub fn score_all(readings: &IndicatorReadings, uptrend: bool) -> Result<IndicatorScores> {
    let mut scores = IndicatorScores::default();
    for indicator in Indicator::ALL {
        scores.set(
            indicator,
            score_indicator(indicator, readings.get(indicator), uptrend)?,
        );
    }
    Ok(scores)
}

/// Score with the four legacy tables. Bias and P/E stay at zero.
pub fn score_all_legacy(readings: &IndicatorReadings) -> Result<IndicatorScores> {
    let mut scores = IndicatorScores::default();
    for indicator in thresholds::legacy::INDICATORS {
        if let Some(table) = thresholds::legacy::table_for(indicator) {
            scores.set(
                indicator,
                score_with(indicator, table, readings.get(indicator))?,
            );
        }
    }
    Ok(scores)
}
