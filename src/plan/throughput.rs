//! Slitter throughput and duration estimates.

use crate::config::{PlannerConfig, CHANGEOVER_MINUTES, DURATION_STEP_MINUTES};

/// Cycles per hour for a finished roll, the lesser of the width and length
/// rates. Widths outside every band do not constrain the rate.
pub fn cycles_per_hour(config: &PlannerConfig, roll_width_mm: f64, roll_length_m: f64) -> Option<u32> {
    let width_rate = config
        .width_rates
        .iter()
        .find(|band| band.matches(roll_width_mm))
        .map(|band| band.cycles_per_hour);

    let length_rate = config
        .length_rates
        .iter()
        .find(|band| band.matches(roll_length_m))
        .map(|band| band.cycles_per_hour);

    match (width_rate, length_rate) {
        (Some(w), Some(l)) => Some(w.min(l)),
        (None, rate) | (rate, None) => rate,
    }
}

/// Hours needed for `cycles` at `rate` cycles per hour.
pub fn estimate_hours(cycles: u64, rate: Option<u32>) -> Option<f64> {
    rate.filter(|r| *r > 0).map(|r| cycles as f64 / r as f64)
}

/// Minutes shown to the operator: rounded to the nearest step, plus the
/// fixed changeover.
pub fn display_minutes(hours: f64) -> u64 {
    let step = DURATION_STEP_MINUTES as f64;
    let rounded = ((hours * 60.0 + step / 2.0) / step).floor() * step;
    rounded.max(0.0) as u64 + CHANGEOVER_MINUTES as u64
}

/// Format an estimate as `"HH h MM min"`, or `"n/a"` when unknown.
pub fn format_duration(hours: Option<f64>) -> String {
    match hours {
        Some(hours) => {
            let total = display_minutes(hours);
            format!("{:02} h {:02} min", total / 60, total % 60)
        }
        None => "n/a".to_string(),
    }
}
