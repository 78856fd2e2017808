//! Piecewise threshold tables
//!
//! Every indicator maps its raw reading to an integer score through an
//! ordered ladder of bounds. Rungs are tested top to bottom and the first
//! admitting bound wins; `otherwise` catches everything past the last rung,
//! so a table is total over the real line by construction.

use crate::indicator::Indicator;

/// Comparison applied to a reading. Inclusivity is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// value <= x
    AtMost(f64),
    /// value < x
    Below(f64),
    /// value >= x
    AtLeast(f64),
    /// value > x
    Above(f64),
}

impl Bound {
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            Bound::AtMost(x) => value <= x,
            Bound::Below(x) => value < x,
            Bound::AtLeast(x) => value >= x,
            Bound::Above(x) => value > x,
        }
    }

    pub fn threshold(&self) -> f64 {
        match *self {
            Bound::AtMost(x) | Bound::Below(x) | Bound::AtLeast(x) | Bound::Above(x) => x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rung {
    pub bound: Bound,
    pub score: i8,
}

impl Rung {
    pub const fn at_most(x: f64, score: i8) -> Self {
        Self { bound: Bound::AtMost(x), score }
    }

    pub const fn below(x: f64, score: i8) -> Self {
        Self { bound: Bound::Below(x), score }
    }

    pub const fn at_least(x: f64, score: i8) -> Self {
        Self { bound: Bound::AtLeast(x), score }
    }

    pub const fn above(x: f64, score: i8) -> Self {
        Self { bound: Bound::Above(x), score }
    }
}

/// Ordered ladder of rungs plus a catch-all score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    rungs: &'static [Rung],
    otherwise: i8,
}

impl ThresholdTable {
    pub const fn new(rungs: &'static [Rung], otherwise: i8) -> Self {
        Self { rungs, otherwise }
    }

    /// First matching rung, else the catch-all
    pub fn lookup(&self, value: f64) -> i8 {
        self.rungs
            .iter()
            .find(|rung| rung.bound.admits(value))
            .map_or(self.otherwise, |rung| rung.score)
    }

    pub fn rungs(&self) -> &'static [Rung] {
        self.rungs
    }

    pub fn otherwise(&self) -> i8 {
        self.otherwise
    }

    /// Every score this table can produce
    pub fn scores(&self) -> impl Iterator<Item = i8> + '_ {
        self.rungs
            .iter()
            .map(|rung| rung.score)
            .chain(std::iter::once(self.otherwise))
    }

    pub fn max_score(&self) -> i8 {
        self.scores().max().unwrap_or(self.otherwise)
    }

    pub fn min_score(&self) -> i8 {
        self.scores().min().unwrap_or(self.otherwise)
    }
}

const FEAR_GREED_RUNGS: &[Rung] = &[
    Rung::at_most(25.0, 2),
    Rung::at_most(44.0, 1),
    Rung::at_most(55.0, 0),
    Rung::at_most(74.0, -1),
];

const MCCLELLAN_RUNGS: &[Rung] = &[
    Rung::at_most(-100.0, 2),
    Rung::at_most(-50.0, 1),
    Rung::at_most(50.0, 0),
    Rung::at_most(100.0, -1),
];

const PUT_CALL_RUNGS: &[Rung] = &[
    Rung::at_least(1.0, 2),
    Rung::at_least(0.8, 1),
    Rung::at_least(0.6, 0),
    Rung::at_least(0.5, -1),
];

// Mixed inclusivity (<18, <25) is deliberate and pinned by tests.
const FORWARD_PE_RUNGS: &[Rung] = &[
    Rung::at_most(15.0, 2),
    Rung::below(18.0, 1),
    Rung::at_most(22.0, 0),
    Rung::below(25.0, -1),
];

const VIX_UPTREND_RUNGS: &[Rung] = &[
    Rung::at_least(35.0, 2),
    Rung::at_least(25.0, 1),
    Rung::at_least(15.0, 0),
    Rung::at_least(12.0, -1),
];

const VIX_NON_UPTREND_RUNGS: &[Rung] = &[
    Rung::at_least(40.0, 2),
    Rung::at_least(30.0, 1),
    Rung::at_least(15.0, 0),
    Rung::at_least(12.0, -1),
];

const PRICE_BIAS_UPTREND_RUNGS: &[Rung] = &[
    Rung::at_most(-10.0, 2),
    Rung::at_most(-5.0, 1),
    Rung::at_most(8.0, 0),
    Rung::at_most(12.0, -1),
];

const PRICE_BIAS_NON_UPTREND_RUNGS: &[Rung] = &[
    Rung::at_most(-20.0, 2),
    Rung::at_most(-10.0, 1),
    Rung::at_most(10.0, 0),
    Rung::at_most(15.0, -1),
];

pub const FEAR_GREED: ThresholdTable = ThresholdTable::new(FEAR_GREED_RUNGS, -2);
pub const MCCLELLAN: ThresholdTable = ThresholdTable::new(MCCLELLAN_RUNGS, -2);
pub const PUT_CALL: ThresholdTable = ThresholdTable::new(PUT_CALL_RUNGS, -2);
pub const FORWARD_PE: ThresholdTable = ThresholdTable::new(FORWARD_PE_RUNGS, -2);
pub const VIX_UPTREND: ThresholdTable = ThresholdTable::new(VIX_UPTREND_RUNGS, -2);
pub const VIX_NON_UPTREND: ThresholdTable = ThresholdTable::new(VIX_NON_UPTREND_RUNGS, -2);
pub const PRICE_BIAS_UPTREND: ThresholdTable = ThresholdTable::new(PRICE_BIAS_UPTREND_RUNGS, -2);
pub const PRICE_BIAS_NON_UPTREND: ThresholdTable =
    ThresholdTable::new(PRICE_BIAS_NON_UPTREND_RUNGS, -2);

/// Table used for an indicator under the given trend
pub fn table_for(indicator: Indicator, uptrend: bool) -> &'static ThresholdTable {
    match (indicator, uptrend) {
        (Indicator::FearGreed, _) => &FEAR_GREED,
        (Indicator::McClellan, _) => &MCCLELLAN,
        (Indicator::PutCall, _) => &PUT_CALL,
        (Indicator::ForwardPe, _) => &FORWARD_PE,
        (Indicator::Vix, true) => &VIX_UPTREND,
        (Indicator::Vix, false) => &VIX_NON_UPTREND,
        (Indicator::PriceBias, true) => &PRICE_BIAS_UPTREND,
        (Indicator::PriceBias, false) => &PRICE_BIAS_NON_UPTREND,
    }
}

/// Four-indicator tables from the first dashboard revision.
///
/// Coarser bands with a wide neutral zone, and VIX can reach +3.
pub mod legacy {
    use super::{Rung, ThresholdTable};
    use crate::indicator::Indicator;

    const FEAR_GREED_RUNGS: &[Rung] = &[Rung::at_most(20.0, 2), Rung::below(80.0, 0)];

    const MCCLELLAN_RUNGS: &[Rung] = &[Rung::at_most(-80.0, 2), Rung::below(70.0, 0)];

    const PUT_CALL_RUNGS: &[Rung] = &[Rung::at_least(0.9, 2), Rung::above(0.5, 0)];

    const VIX_RUNGS: &[Rung] = &[
        Rung::at_least(40.0, 3),
        Rung::at_least(30.0, 2),
        Rung::above(12.0, 0),
    ];

    pub const FEAR_GREED: ThresholdTable = ThresholdTable::new(FEAR_GREED_RUNGS, -2);
    pub const MCCLELLAN: ThresholdTable = ThresholdTable::new(MCCLELLAN_RUNGS, -2);
    pub const PUT_CALL: ThresholdTable = ThresholdTable::new(PUT_CALL_RUNGS, -2);
    pub const VIX: ThresholdTable = ThresholdTable::new(VIX_RUNGS, -2);

    pub const INDICATORS: [Indicator; 4] = [
        Indicator::FearGreed,
        Indicator::McClellan,
        Indicator::PutCall,
        Indicator::Vix,
    ];

    /// None for indicators the legacy revision does not score
    pub fn table_for(indicator: Indicator) -> Option<&'static ThresholdTable> {
        match indicator {
            Indicator::FearGreed => Some(&FEAR_GREED),
            Indicator::McClellan => Some(&MCCLELLAN),
            Indicator::PutCall => Some(&PUT_CALL),
            Indicator::Vix => Some(&VIX),
            Indicator::PriceBias | Indicator::ForwardPe => None,
        }
    }
}
