//! Cutting plan computation.
//!
//! The pipeline runs validation, width resolution, cycle planning and waste
//! accounting in that order. Every stage is a pure function of the request and
//! the earlier stages.

mod additional;
mod area;
mod cycles;
mod throughput;
mod width;

pub use additional::{resolve_width, WidthLayout};
pub use area::{account_waste, WasteAccount};
pub use cycles::{plan_cycles, CyclePlan};
pub use throughput::{cycles_per_hour, display_minutes, estimate_hours, format_duration};
pub use width::{adjust_width, Rejection, WidthDecision, WidthSplit};

use tracing::{debug, warn};

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::model::{CuttingPlan, MaterialSpec, OrderSpec, RollSpec};
use crate::validation::validate_inputs;

/// Stateless plan calculator bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Compute the cutting plan for a request.
    ///
    /// Fails on the first invalid parameter; a returned plan may still be
    /// short of the order, see [`CuttingPlan::is_short`].
    pub fn compute(
        &self,
        material: &MaterialSpec,
        roll: &RollSpec,
        order: &OrderSpec,
    ) -> Result<CuttingPlan> {
        let config = &self.config;
        let order_rolls = validate_inputs(config, material, roll, order)?;

        let layout = resolve_width(
            config,
            material.useful_width_mm,
            roll.roll_width_mm,
            order.additional_width_override_mm,
        )?;

        let cycles = plan_cycles(
            config,
            material,
            roll,
            order.big_roll_length_m,
            &layout,
            order_rolls,
        )?;

        let waste = account_waste(
            config,
            material,
            roll,
            order.big_roll_length_m,
            &layout,
            &cycles,
        );

        let rate = cycles_per_hour(config, layout.split.roll_width_mm, roll.roll_length_m);
        let estimated_hours = estimate_hours(cycles.cycles_needed, rate);

        debug!(
            "{} x {:.1} mm over {} cycles, waste {:.1}%",
            layout.split.main_count,
            layout.split.roll_width_mm,
            cycles.cycles_used,
            waste.waste_percent
        );

        if cycles.shortage_rolls > 0 {
            warn!(
                "Jumbo covers {} of {} rolls, short by {}",
                cycles.total_main_rolls, order_rolls, cycles.shortage_rolls
            );
        }

        Ok(CuttingPlan {
            material_width_mm: material.material_width_mm,
            useful_width_mm: material.useful_width_mm,
            roll_width_input_mm: roll.roll_width_mm,
            roll_length_m: roll.roll_length_m,
            big_roll_length_m: order.big_roll_length_m,
            order_rolls,

            roll_width_mm: layout.split.roll_width_mm,
            main_count: layout.split.main_count,
            rolls_per_cycle: layout.split.main_count,
            remaining_width_mm: layout.split.remaining_width_mm,
            additional_width_mm: layout.additional_width_mm,
            was_adjusted: layout.split.was_adjusted,
            waste_per_side_mm: waste.waste_per_side_mm,

            cycles_needed: cycles.cycles_needed,
            cycles_used: cycles.cycles_used,
            length_count: cycles.length_count,
            length_waste_m: cycles.length_waste_m,
            used_length_m: waste.used_length_m,

            cycles_per_hour: rate,
            estimated_hours,

            total_main_rolls: cycles.total_main_rolls,
            total_additional_rolls: cycles.total_additional_rolls,
            total_rolls: cycles.total_rolls,
            surplus_rolls: cycles.surplus_rolls,
            surplus_main_rolls: cycles.surplus_main_rolls,
            surplus_additional_rolls: cycles.surplus_additional_rolls,
            shortage_rolls: cycles.shortage_rolls,

            total_area_m2: waste.total_area_m2,
            useful_area_m2: waste.useful_area_m2,
            waste_area_m2: waste.waste_area_m2,
            waste_percent: waste.waste_percent,
        })
    }
}
