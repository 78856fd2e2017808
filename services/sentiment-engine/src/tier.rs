//! Recommendation tiers
//!
//! Five ordered bands over the composite score. Ordering runs from the
//! greediest market (`Euphoria`) to the most fearful (`ExtremeFear`), so a
//! higher tier means a stronger case for buying.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower edge (inclusive) of each band in the five-tier scheme
pub const EXTREME_FEAR_MIN: f64 = 5.0;
pub const FEAR_MIN: f64 = 2.0;
pub const NEUTRAL_MIN: f64 = -1.0;
pub const ELEVATED_MIN: f64 = -4.0;

/// Recommendation tier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    /// Extreme greed: control risk, rebalance
    Euphoria,
    /// Heating up: pause extra accumulation
    Elevated,
    /// Stay the course
    Neutral,
    /// Fear: accumulate
    Fear,
    /// Panic: strongest buy signal
    ExtremeFear,
}

impl RecommendationTier {
    pub const ALL: [RecommendationTier; 5] = [
        RecommendationTier::Euphoria,
        RecommendationTier::Elevated,
        RecommendationTier::Neutral,
        RecommendationTier::Fear,
        RecommendationTier::ExtremeFear,
    ];

    /// Get display name
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationTier::ExtremeFear => "Extreme Fear",
            RecommendationTier::Fear => "Fear",
            RecommendationTier::Neutral => "Neutral",
            RecommendationTier::Elevated => "Elevated",
            RecommendationTier::Euphoria => "Euphoria",
        }
    }

    /// Short action for the tier
    pub fn action(&self) -> &'static str {
        match self {
            RecommendationTier::ExtremeFear => "Strong buy",
            RecommendationTier::Fear => "Accumulate",
            RecommendationTier::Neutral => "Stay the course",
            RecommendationTier::Elevated => "Pause accumulation",
            RecommendationTier::Euphoria => "Risk control",
        }
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            RecommendationTier::ExtremeFear => {
                "Market is in panic. Buy in tranches and raise this month's regular contribution to 1.5-2x; deploy part of any cash reserve."
            }
            RecommendationTier::Fear => {
                "Sentiment is fearful. Keep the regular contribution and add modestly on further weakness."
            }
            RecommendationTier::Neutral => {
                "Sentiment is balanced. Keep the regular contribution as planned."
            }
            RecommendationTier::Elevated => {
                "Market is getting excited. Pause extra buying or contribute a smaller amount, and check the equity allocation."
            }
            RecommendationTier::Euphoria => {
                "Extreme greed. Stop adding equity exposure and rebalance back to the target allocation."
            }
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.label(), self.action())
    }
}

/// Five-tier classification of a weighted composite.
///
/// `composite` must be finite. A NaN fails every cut point and would land
/// in `Euphoria`; debug builds assert instead.
pub fn classify_tier(composite: f64) -> RecommendationTier {
    debug_assert!(composite.is_finite(), "non-finite composite: {}", composite);
    if composite >= EXTREME_FEAR_MIN {
        RecommendationTier::ExtremeFear
    } else if composite >= FEAR_MIN {
        RecommendationTier::Fear
    } else if composite >= NEUTRAL_MIN {
        RecommendationTier::Neutral
    } else if composite >= ELEVATED_MIN {
        RecommendationTier::Elevated
    } else {
        RecommendationTier::Euphoria
    }
}

/// Four-band classification of the unweighted legacy sum.
///
/// `>= 5` panic, `0..=4` normal, `-4..=-1` hot, `<= -5` overheated. There
/// is no separate fear band. `composite` must be finite.
pub fn classify_tier_legacy(composite: f64) -> RecommendationTier {
    debug_assert!(composite.is_finite(), "non-finite composite: {}", composite);
    if composite >= 5.0 {
        RecommendationTier::ExtremeFear
    } else if composite >= 0.0 {
        RecommendationTier::Neutral
    } else if composite >= -4.0 {
        RecommendationTier::Elevated
    } else {
        RecommendationTier::Euphoria
    }
}
