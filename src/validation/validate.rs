//! Range checks on the raw request, evaluated in a fixed order.

use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use crate::model::{MaterialSpec, OrderSpec, RollSpec};

/// Validate a request and return the order quantity as a count.
///
/// Checks run in order and the first failure is returned:
/// material width, useful vs material width, roll width, roll length,
/// jumbo length, jumbo vs roll length, order quantity.
pub fn validate_inputs(
    config: &PlannerConfig,
    material: &MaterialSpec,
    roll: &RollSpec,
    order: &OrderSpec,
) -> Result<u64> {
    let range = config.material_width_mm;
    if !range.contains(material.material_width_mm) {
        return Err(PlanError::MaterialWidthRange {
            value: material.material_width_mm,
            min: range.min,
            max: range.max,
        });
    }

    if material.useful_width_mm > material.material_width_mm {
        return Err(PlanError::UsefulWidthExceedsMaterial {
            useful: material.useful_width_mm,
            material: material.material_width_mm,
        });
    }

    let range = config.roll_width_mm;
    if !range.contains(roll.roll_width_mm) {
        return Err(PlanError::RollWidthRange {
            value: roll.roll_width_mm,
            min: range.min,
            max: range.max,
        });
    }

    let range = config.roll_length_m;
    if !range.contains(roll.roll_length_m) {
        return Err(PlanError::RollLengthRange {
            value: roll.roll_length_m,
            min: range.min,
            max: range.max,
        });
    }

    // NaN fails both comparisons, so test for the valid interval instead
    let jumbo = order.big_roll_length_m;
    if !(jumbo > 0.0 && jumbo <= config.max_big_roll_length_m) {
        return Err(PlanError::JumboLengthRange {
            value: jumbo,
            max: config.max_big_roll_length_m,
        });
    }

    if jumbo < roll.roll_length_m {
        return Err(PlanError::JumboShorterThanRoll {
            jumbo,
            roll: roll.roll_length_m,
        });
    }

    if order.order_rolls <= 0 {
        return Err(PlanError::OrderQuantity {
            value: order.order_rolls.to_string(),
        });
    }

    Ok(order.order_rolls as u64)
}
