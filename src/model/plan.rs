//! The fully resolved cutting plan.

use serde::{Deserialize, Serialize};

/// Production plan derived from one material/roll/order request.
///
/// Areas and the waste percentage are rounded to one decimal place; every
/// other value is kept at full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingPlan {
    // Echo of the request
    pub material_width_mm: f64,
    pub useful_width_mm: f64,
    pub roll_width_input_mm: f64,
    pub roll_length_m: f64,
    pub big_roll_length_m: f64,
    pub order_rolls: u64,

    // Width layout
    /// Effective main roll width, possibly narrowed by the adjustment.
    pub roll_width_mm: f64,
    /// Main rolls cut across the width per cycle.
    pub main_count: u64,
    /// Same as `main_count`; kept for record compatibility.
    pub rolls_per_cycle: u64,
    /// Useful width left after the main rolls.
    pub remaining_width_mm: f64,
    /// Trailing roll width, when one is cut.
    pub additional_width_mm: Option<f64>,
    /// Whether the width adjustment narrowed the main rolls.
    pub was_adjusted: bool,
    /// Edge trim on each side of the useful width.
    pub waste_per_side_mm: f64,

    // Length and cycles
    pub cycles_needed: u64,
    pub cycles_used: u64,
    /// Finished lengths that fit in the jumbo after setup.
    pub length_count: u64,
    pub length_waste_m: f64,
    pub used_length_m: f64,

    // Throughput
    pub cycles_per_hour: Option<u32>,
    pub estimated_hours: Option<f64>,

    // Quantities
    pub total_main_rolls: u64,
    pub total_additional_rolls: u64,
    pub total_rolls: u64,
    pub surplus_rolls: u64,
    pub surplus_main_rolls: u64,
    pub surplus_additional_rolls: u64,
    pub shortage_rolls: u64,

    // Areas
    pub total_area_m2: f64,
    pub useful_area_m2: f64,
    pub waste_area_m2: f64,
    pub waste_percent: f64,
}

impl CuttingPlan {
    /// Whether the jumbo cannot cover the whole order.
    pub fn is_short(&self) -> bool {
        self.shortage_rolls > 0
    }

    /// Sum of all finished roll widths in one cycle.
    pub fn cut_width_mm(&self) -> f64 {
        self.main_count as f64 * self.roll_width_mm + self.additional_width_mm.unwrap_or(0.0)
    }
}
