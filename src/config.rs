//! Configuration constants and settings for the planner.

use serde::{Deserialize, Serialize};

/// Epsilon used to snap near-zero remainders and tolerate rounding overruns.
pub const EPS: f64 = 1e-6;

/// Material width range in mm.
pub const MATERIAL_WIDTH_RANGE_MM: (f64, f64) = (550.0, 910.0);

/// Finished roll width range in mm (also applies to trailing rolls).
pub const ROLL_WIDTH_RANGE_MM: (f64, f64) = (20.0, 310.0);

/// Finished roll wind length range in m.
pub const ROLL_LENGTH_RANGE_M: (f64, f64) = (30.0, 1100.0);

/// Maximum jumbo wind length in m.
pub const MAX_BIG_ROLL_LENGTH_M: f64 = 22000.0;

/// Maximum relative shrink of the roll width during adjustment.
pub const MAX_ROLL_WIDTH_REDUCTION: f64 = 0.03;

/// Length consumed by machine setup per jumbo, in m.
pub const SETUP_LENGTH_M: f64 = 10.0;

/// Fixed changeover added to every displayed duration, in minutes.
pub const CHANGEOVER_MINUTES: u32 = 15;

/// Granularity of displayed durations, in minutes.
pub const DURATION_STEP_MINUTES: u32 = 5;

/// Closed or half-open numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<(f64, f64)> for Range {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// Width band of the throughput table. `max_inclusive` decides whether the
/// upper edge belongs to the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthRateBand {
    pub min_mm: f64,
    pub max_mm: f64,
    pub max_inclusive: bool,
    pub cycles_per_hour: u32,
}

impl WidthRateBand {
    #[inline]
    pub fn matches(&self, width_mm: f64) -> bool {
        width_mm >= self.min_mm
            && if self.max_inclusive {
                width_mm <= self.max_mm
            } else {
                width_mm < self.max_mm
            }
    }
}

/// Length band of the throughput table; `max_m = None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthRateBand {
    pub max_m: Option<f64>,
    pub cycles_per_hour: u32,
}

impl LengthRateBand {
    #[inline]
    pub fn matches(&self, length_m: f64) -> bool {
        self.max_m.map_or(true, |max| length_m <= max)
    }
}

/// Planner configuration.
///
/// Every field defaults to the production constants above, so a JSON file only
/// needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Accepted total material width.
    pub material_width_mm: Range,
    /// Accepted finished roll width.
    pub roll_width_mm: Range,
    /// Accepted finished roll length.
    pub roll_length_m: Range,
    /// Longest jumbo the slitter accepts.
    pub max_big_roll_length_m: f64,
    /// Maximum shrink ratio for the width adjustment.
    pub max_width_reduction: f64,
    /// Setup allowance deducted from the jumbo.
    pub setup_length_m: f64,
    /// Throughput by finished roll width, first match wins.
    pub width_rates: Vec<WidthRateBand>,
    /// Throughput by finished roll length, first match wins.
    pub length_rates: Vec<LengthRateBand>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            material_width_mm: MATERIAL_WIDTH_RANGE_MM.into(),
            roll_width_mm: ROLL_WIDTH_RANGE_MM.into(),
            roll_length_m: ROLL_LENGTH_RANGE_M.into(),
            max_big_roll_length_m: MAX_BIG_ROLL_LENGTH_M,
            max_width_reduction: MAX_ROLL_WIDTH_REDUCTION,
            setup_length_m: SETUP_LENGTH_M,
            width_rates: vec![
                WidthRateBand {
                    min_mm: 25.0,
                    max_mm: 45.0,
                    max_inclusive: false,
                    cycles_per_hour: 11,
                },
                WidthRateBand {
                    min_mm: 45.0,
                    max_mm: 150.0,
                    max_inclusive: true,
                    cycles_per_hour: 12,
                },
            ],
            length_rates: vec![
                LengthRateBand {
                    max_m: Some(300.0),
                    cycles_per_hour: 12,
                },
                LengthRateBand {
                    max_m: Some(450.0),
                    cycles_per_hour: 11,
                },
                LengthRateBand {
                    max_m: Some(600.0),
                    cycles_per_hour: 10,
                },
                LengthRateBand {
                    max_m: None,
                    cycles_per_hour: 8,
                },
            ],
        }
    }
}

impl PlannerConfig {
    /// Load a configuration from a JSON string; missing fields keep defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Utility functions for floating-point handling.
pub mod float_cmp {
    use super::EPS;

    /// Snap values within `EPS` of zero to exactly zero.
    #[inline]
    pub fn snap_zero(a: f64) -> f64 {
        if a.abs() < EPS {
            0.0
        } else {
            a
        }
    }

    /// Round to one decimal place, nearest with ties to even, on the exact
    /// binary value (`99.25 -> 99.2`, `752.25 -> 752.2`).
    pub fn round1(a: f64) -> f64 {
        format!("{:.1}", a).parse().unwrap_or(a)
    }
}
