//! Width adjustment: narrow every roll slightly when that turns the leftover
//! strip into one more full roll.

use crate::config::float_cmp::{round1, snap_zero};
use crate::config::PlannerConfig;

/// How the useful width is split into main rolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthSplit {
    /// Effective main roll width in mm.
    pub roll_width_mm: f64,
    /// Main rolls per cycle.
    pub main_count: u64,
    /// Useful width left after the main rolls, never negative.
    pub remaining_width_mm: f64,
    /// Whether `roll_width_mm` differs from the request.
    pub was_adjusted: bool,
}

impl WidthSplit {
    /// Plain floor division of the useful width by the requested width.
    pub fn unadjusted(useful_width_mm: f64, roll_width_mm: f64) -> Self {
        // Saturating cast: a negative quotient yields zero rolls
        let main_count = (useful_width_mm / roll_width_mm).floor() as u64;
        let remaining_width_mm = useful_width_mm - main_count as f64 * roll_width_mm;
        Self {
            roll_width_mm,
            main_count,
            remaining_width_mm,
            was_adjusted: false,
        }
    }
}

/// Why the adjustment was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The leftover is too narrow or too wide to be a product width.
    RemainderOutOfRange,
    /// Not even one roll fits.
    NoMainRoll,
    /// One more roll would need more than the allowed shrink.
    ShrinkTooLarge,
    /// The narrowed width is not a valid product width.
    NarrowedWidthOutOfRange,
    /// Rounding to one decimal pushed the width below the shrink limit.
    RoundedBelowMinimum,
}

/// Outcome of the width adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthDecision {
    /// Rolls narrowed to fit one more across the width.
    Adjusted(WidthSplit),
    /// Requested width kept.
    Unadjusted(WidthSplit, Rejection),
}

impl WidthDecision {
    pub fn split(&self) -> WidthSplit {
        match *self {
            WidthDecision::Adjusted(split) | WidthDecision::Unadjusted(split, _) => split,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match *self {
            WidthDecision::Adjusted(_) => None,
            WidthDecision::Unadjusted(_, reason) => Some(reason),
        }
    }
}

/// Decide the effective roll width for a requested width.
pub fn adjust_width(
    config: &PlannerConfig,
    useful_width_mm: f64,
    roll_width_mm: f64,
) -> WidthDecision {
    let split = WidthSplit::unadjusted(useful_width_mm, roll_width_mm);
    let product_width = config.roll_width_mm;

    if !product_width.contains(split.remaining_width_mm) {
        return WidthDecision::Unadjusted(split, Rejection::RemainderOutOfRange);
    }
    if split.main_count < 1 {
        return WidthDecision::Unadjusted(split, Rejection::NoMainRoll);
    }

    let min_width = roll_width_mm * (1.0 - config.max_width_reduction);
    let width_needed = useful_width_mm / (split.main_count + 1) as f64;

    if width_needed < min_width {
        return WidthDecision::Unadjusted(split, Rejection::ShrinkTooLarge);
    }
    if !product_width.contains(width_needed) {
        return WidthDecision::Unadjusted(split, Rejection::NarrowedWidthOutOfRange);
    }

    let adjusted_width = round1(width_needed);
    if adjusted_width < min_width {
        return WidthDecision::Unadjusted(split, Rejection::RoundedBelowMinimum);
    }

    let main_count = split.main_count + 1;
    // Rounding up may overshoot the useful width by a fraction of a mm
    let remaining = snap_zero(useful_width_mm - main_count as f64 * adjusted_width).max(0.0);

    WidthDecision::Adjusted(WidthSplit {
        roll_width_mm: adjusted_width,
        main_count,
        remaining_width_mm: remaining,
        was_adjusted: true,
    })
}
