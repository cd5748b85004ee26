//! Across-width layout of a plan, left edge to right edge.

use serde::{Deserialize, Serialize};

use super::CuttingPlan;
use crate::config::float_cmp::snap_zero;

/// One strip of the material width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Lane {
    /// Trim outside the useful width.
    EdgeTrim(f64),
    /// Main roll.
    Main(f64),
    /// Trailing roll cut from the leftover.
    Additional(f64),
    /// Leftover inside the useful width that is not cut into a roll.
    Scrap(f64),
}

impl Lane {
    pub fn width_mm(&self) -> f64 {
        match *self {
            Lane::EdgeTrim(w) | Lane::Main(w) | Lane::Additional(w) | Lane::Scrap(w) => w,
        }
    }

    pub fn is_waste(&self) -> bool {
        matches!(self, Lane::EdgeTrim(_) | Lane::Scrap(_))
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lane::EdgeTrim(w) => write!(f, "trim {:.1}", w),
            Lane::Main(w) => write!(f, "roll {:.1}", w),
            Lane::Additional(w) => write!(f, "extra {:.1}", w),
            Lane::Scrap(w) => write!(f, "scrap {:.1}", w),
        }
    }
}

impl CuttingPlan {
    /// Lanes in cutting order. Zero-width strips are omitted.
    pub fn lanes(&self) -> Vec<Lane> {
        let mut lanes = Vec::with_capacity(self.main_count as usize + 4);

        if self.waste_per_side_mm > 0.0 {
            lanes.push(Lane::EdgeTrim(self.waste_per_side_mm));
        }

        lanes.extend((0..self.main_count).map(|_| Lane::Main(self.roll_width_mm)));

        if let Some(width) = self.additional_width_mm {
            lanes.push(Lane::Additional(width));
        }

        let scrap = snap_zero(self.useful_width_mm - self.cut_width_mm());
        if scrap > 0.0 {
            lanes.push(Lane::Scrap(scrap));
        }

        if self.waste_per_side_mm > 0.0 {
            lanes.push(Lane::EdgeTrim(self.waste_per_side_mm));
        }

        lanes
    }
}
