//! Trailing roll resolution: automatic from the leftover width, or an
//! operator-chosen width that disables the width adjustment.

use tracing::debug;

use super::width::{adjust_width, WidthDecision, WidthSplit};
use crate::config::{PlannerConfig, EPS};
use crate::error::{PlanError, Result};

/// Width layout with the trailing roll decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthLayout {
    pub split: WidthSplit,
    pub additional_width_mm: Option<f64>,
}

/// Resolve the main roll split and the trailing roll.
///
/// An override `<= 0` counts as absent and a non-finite one is rejected. A
/// positive override must be a valid product width and fit into the leftover
/// of the unadjusted split.
pub fn resolve_width(
    config: &PlannerConfig,
    useful_width_mm: f64,
    roll_width_mm: f64,
    override_mm: Option<f64>,
) -> Result<WidthLayout> {
    if let Some(width) = override_mm.filter(|w| !w.is_finite()) {
        return Err(PlanError::AdditionalWidthFormat {
            value: width.to_string(),
        });
    }

    match override_mm.filter(|w| *w > 0.0) {
        Some(requested) => resolve_override(config, useful_width_mm, roll_width_mm, requested),
        None => Ok(resolve_automatic(
            config,
            adjust_width(config, useful_width_mm, roll_width_mm),
        )),
    }
}

fn resolve_override(
    config: &PlannerConfig,
    useful_width_mm: f64,
    roll_width_mm: f64,
    requested: f64,
) -> Result<WidthLayout> {
    let range = config.roll_width_mm;
    if !range.contains(requested) {
        return Err(PlanError::AdditionalWidthRange {
            value: requested,
            min: range.min,
            max: range.max,
        });
    }

    let split = WidthSplit::unadjusted(useful_width_mm, roll_width_mm);
    if requested > split.remaining_width_mm + EPS {
        return Err(PlanError::AdditionalWidthOverflow {
            requested,
            available: split.remaining_width_mm,
        });
    }

    debug!(
        "Additional width override {:.1} mm of {:.1} mm leftover",
        requested, split.remaining_width_mm
    );

    Ok(WidthLayout {
        split,
        additional_width_mm: Some(requested),
    })
}

fn resolve_automatic(config: &PlannerConfig, decision: WidthDecision) -> WidthLayout {
    let split = decision.split();

    match decision {
        WidthDecision::Adjusted(_) => debug!(
            "Roll width adjusted to {:.1} mm, {} rolls across",
            split.roll_width_mm, split.main_count
        ),
        WidthDecision::Unadjusted(_, reason) => {
            debug!("Roll width kept ({:?})", reason)
        }
    }

    let additional_width_mm = (!split.was_adjusted
        && config.roll_width_mm.contains(split.remaining_width_mm))
    .then_some(split.remaining_width_mm);

    WidthLayout {
        split,
        additional_width_mm,
    }
}
