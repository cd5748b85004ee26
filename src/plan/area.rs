//! Consumed length, areas and waste.

use crate::config::float_cmp::round1;
use crate::config::PlannerConfig;
use crate::model::{MaterialSpec, RollSpec};

use super::additional::WidthLayout;
use super::cycles::CyclePlan;

/// Material consumption of a plan. Areas and percentage rounded to 0.1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WasteAccount {
    pub used_length_m: f64,
    pub total_area_m2: f64,
    pub useful_area_m2: f64,
    pub waste_area_m2: f64,
    pub waste_percent: f64,
    pub waste_per_side_mm: f64,
}

/// Account for the material consumed by a plan.
///
/// A short plan is charged the whole jumbo: length left on an under-filled
/// jumbo is waste.
pub fn account_waste(
    config: &PlannerConfig,
    material: &MaterialSpec,
    roll: &RollSpec,
    big_roll_length_m: f64,
    layout: &WidthLayout,
    cycles: &CyclePlan,
) -> WasteAccount {
    let produced_length_m = cycles.cycles_used as f64 * roll.roll_length_m;

    let used_length_m = if cycles.shortage_rolls > 0 {
        big_roll_length_m
    } else {
        produced_length_m + config.setup_length_m
    };

    let total_area_m2 = material.material_width_mm / 1000.0 * used_length_m;

    let useful_width_sum_mm = layout.split.main_count as f64 * layout.split.roll_width_mm
        + layout.additional_width_mm.unwrap_or(0.0);
    let useful_area_m2 = useful_width_sum_mm / 1000.0 * produced_length_m;

    let waste_area_m2 = total_area_m2 - useful_area_m2;
    let waste_percent = if total_area_m2 > 0.0 {
        waste_area_m2 / total_area_m2 * 100.0
    } else {
        0.0
    };

    let edge_waste_mm = material.material_width_mm - material.useful_width_mm;
    let waste_per_side_mm = if edge_waste_mm > 0.0 {
        edge_waste_mm / 2.0
    } else {
        0.0
    };

    WasteAccount {
        used_length_m,
        total_area_m2: round1(total_area_m2),
        useful_area_m2: round1(useful_area_m2),
        waste_area_m2: round1(waste_area_m2),
        waste_percent: round1(waste_percent),
        waste_per_side_mm,
    }
}
