//! Input specifications for a cutting plan request.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// The jumbo material being slit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Total material width in mm.
    pub material_width_mm: f64,
    /// Width available for cutting in mm, at most the material width.
    pub useful_width_mm: f64,
}

impl MaterialSpec {
    pub fn new(material_width_mm: f64, useful_width_mm: f64) -> Self {
        Self {
            material_width_mm,
            useful_width_mm,
        }
    }
}

/// The finished roll requested by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RollSpec {
    /// Requested finished roll width in mm.
    pub roll_width_mm: f64,
    /// Finished roll wind length in m.
    pub roll_length_m: f64,
}

impl RollSpec {
    pub fn new(roll_width_mm: f64, roll_length_m: f64) -> Self {
        Self {
            roll_width_mm,
            roll_length_m,
        }
    }
}

/// Order parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderSpec {
    /// Jumbo wind length in m.
    pub big_roll_length_m: f64,
    /// Requested number of main rolls.
    pub order_rolls: i64,
    /// Operator-chosen trailing roll width in mm. Values `<= 0` mean "automatic".
    pub additional_width_override_mm: Option<f64>,
}

impl OrderSpec {
    pub fn new(big_roll_length_m: f64, order_rolls: i64) -> Self {
        Self {
            big_roll_length_m,
            order_rolls,
            additional_width_override_mm: None,
        }
    }

    /// Set an explicit trailing roll width.
    pub fn with_additional_width(mut self, width_mm: f64) -> Self {
        self.additional_width_override_mm = Some(width_mm);
        self
    }
}

/// Coerce a textual order quantity into an integer.
///
/// Only whole numbers are accepted; the sign is checked by the validator.
pub fn parse_order_rolls(value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| PlanError::OrderQuantity {
            value: value.trim().to_string(),
        })
}

/// Coerce a textual additional width into a number.
///
/// Blank input means no override.
pub fn parse_additional_width(value: &str) -> Result<Option<f64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(width) if width.is_finite() => Ok(Some(width)),
        _ => Err(PlanError::AdditionalWidthFormat {
            value: trimmed.to_string(),
        }),
    }
}
