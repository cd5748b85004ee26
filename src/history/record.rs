//! Flattened plan snapshots and report rows.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{CuttingPlan, MaterialCode, StockTicket};

/// A plan executed on the slitter, as stored in the history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: NaiveDateTime,
    pub stock_ticket: Option<StockTicket>,
    pub material_code: MaterialCode,
    pub material_width_mm: f64,
    pub useful_width_mm: f64,
    pub big_roll_length_m: f64,
    /// Requested roll width, before any adjustment.
    pub roll_width_mm: f64,
    pub roll_length_m: f64,
    pub main_count: u64,
    /// Trailing roll width, 0 when none is cut.
    pub additional_width_mm: f64,
    pub total_rolls: u64,
    pub used_length_m: f64,
    pub surplus_rolls: u64,
    pub surplus_main_rolls: u64,
    pub surplus_additional_rolls: u64,
    pub total_area_m2: f64,
    pub useful_area_m2: f64,
    pub waste_area_m2: f64,
    pub waste_percent: f64,
}

impl HistoryRecord {
    /// Snapshot a plan together with its warehouse metadata.
    pub fn from_plan(
        plan: &CuttingPlan,
        timestamp: NaiveDateTime,
        stock_ticket: Option<StockTicket>,
        material_code: MaterialCode,
    ) -> Self {
        Self {
            timestamp,
            stock_ticket,
            material_code,
            material_width_mm: plan.material_width_mm,
            useful_width_mm: plan.useful_width_mm,
            big_roll_length_m: plan.big_roll_length_m,
            roll_width_mm: plan.roll_width_input_mm,
            roll_length_m: plan.roll_length_m,
            main_count: plan.main_count,
            additional_width_mm: plan.additional_width_mm.unwrap_or(0.0),
            total_rolls: plan.total_rolls,
            used_length_m: plan.used_length_m,
            surplus_rolls: plan.surplus_rolls,
            surplus_main_rolls: plan.surplus_main_rolls,
            surplus_additional_rolls: plan.surplus_additional_rolls,
            total_area_m2: plan.total_area_m2,
            useful_area_m2: plan.useful_area_m2,
            waste_area_m2: plan.waste_area_m2,
            waste_percent: plan.waste_percent,
        }
    }

    /// The nine report columns of this record.
    pub fn row(&self) -> HistoryRow {
        HistoryRow {
            timestamp: self.timestamp,
            stock_ticket: self
                .stock_ticket
                .as_ref()
                .map(|t| t.to_string())
                .unwrap_or_default(),
            material_code: self.material_code.to_string(),
            roll_width_mm: self.roll_width_mm,
            useful_area_m2: self.useful_area_m2,
            waste_percent: self.waste_percent,
            surplus_main_rolls: self.surplus_main_rolls,
            surplus_additional_rolls: self.surplus_additional_rolls,
            used_length_m: self.used_length_m,
        }
    }
}

/// One line of the history table and the exported report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub timestamp: NaiveDateTime,
    pub stock_ticket: String,
    pub material_code: String,
    pub roll_width_mm: f64,
    pub useful_area_m2: f64,
    pub waste_percent: f64,
    pub surplus_main_rolls: u64,
    pub surplus_additional_rolls: u64,
    pub used_length_m: f64,
}
