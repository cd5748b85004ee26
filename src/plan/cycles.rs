//! Winding cycles and roll quantities.

use super::additional::WidthLayout;
use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use crate::model::{MaterialSpec, RollSpec};

/// Cycle and quantity figures for one jumbo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePlan {
    pub length_count: u64,
    pub length_waste_m: f64,
    pub cycles_needed: u64,
    pub cycles_used: u64,
    pub total_main_rolls: u64,
    pub total_additional_rolls: u64,
    pub total_rolls: u64,
    pub surplus_main_rolls: u64,
    pub surplus_additional_rolls: u64,
    pub surplus_rolls: u64,
    pub shortage_rolls: u64,
}

/// Plan the cycles for an order.
///
/// The jumbo loses the setup length first; production stops at whichever
/// comes first, the order or the jumbo. Every trailing roll is surplus since
/// the order only counts main rolls.
pub fn plan_cycles(
    config: &PlannerConfig,
    material: &MaterialSpec,
    roll: &RollSpec,
    big_roll_length_m: f64,
    layout: &WidthLayout,
    order_rolls: u64,
) -> Result<CyclePlan> {
    let roll_length_m = roll.roll_length_m;
    let main_count = layout.split.main_count;
    let available_length_m = big_roll_length_m - config.setup_length_m;
    if available_length_m < roll_length_m {
        return Err(PlanError::InsufficientJumboLength {
            available: available_length_m,
            setup: config.setup_length_m,
            roll: roll_length_m,
        });
    }

    let length_count = (available_length_m / roll_length_m).floor() as u64;
    let length_waste_m = available_length_m - length_count as f64 * roll_length_m;

    if main_count == 0 {
        return Err(PlanError::InsufficientWidth {
            useful: material.useful_width_mm,
            roll: roll.roll_width_mm,
        });
    }

    let cycles_needed = order_rolls.div_ceil(main_count);
    let cycles_used = cycles_needed.min(length_count);

    let total_main_rolls = main_count * cycles_used;
    let total_additional_rolls = if layout.additional_width_mm.is_some() {
        cycles_used
    } else {
        0
    };
    let total_rolls = total_main_rolls + total_additional_rolls;

    let surplus_main_rolls = total_main_rolls.saturating_sub(order_rolls);
    let surplus_additional_rolls = total_additional_rolls;
    let shortage_rolls = order_rolls.saturating_sub(total_main_rolls);

    Ok(CyclePlan {
        length_count,
        length_waste_m,
        cycles_needed,
        cycles_used,
        total_main_rolls,
        total_additional_rolls,
        total_rolls,
        surplus_main_rolls,
        surplus_additional_rolls,
        surplus_rolls: surplus_main_rolls + surplus_additional_rolls,
        shortage_rolls,
    })
}
