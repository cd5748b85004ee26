//! slitplan - Cutting plan calculator for jumbo-roll slitting lines.
//!
//! Given a jumbo roll and an order for finished rolls, the planner decides
//! how many rolls fit across the width (nudging the roll width down when that
//! saves a lane of scrap), whether a narrower trailing roll is cut from the
//! leftover, how many cycles the jumbo supports, and what the result costs in
//! waste and machine time.
//!
//! # Example
//!
//! ```
//! use slitplan::{compute, MaterialSpec, OrderSpec, RollSpec};
//!
//! let plan = compute(
//!     &MaterialSpec::new(850.0, 650.0),
//!     &RollSpec::new(100.0, 500.0),
//!     &OrderSpec::new(5000.0, 60),
//! )
//! .unwrap();
//! assert_eq!(plan.main_count, 6);
//! assert_eq!(plan.additional_width_mm, Some(50.0));
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod plan;
pub mod report;
pub mod update;
pub mod validation;

// Re-exports for convenience
pub use config::PlannerConfig;
pub use error::{ErrorCode, HistoryError, PlanError, Result, UpdateError};
pub use history::{HistoryRecord, HistoryRow, HistoryStore};
pub use model::{
    parse_additional_width, parse_order_rolls, CuttingPlan, Lane, MaterialCode, MaterialSpec,
    OrderSpec, RollSpec, StockTicket,
};
pub use plan::{format_duration, Planner};
pub use report::export_report;
pub use update::UpdateChecker;

/// Compute a cutting plan with the default configuration.
pub fn compute(material: &MaterialSpec, roll: &RollSpec, order: &OrderSpec) -> Result<CuttingPlan> {
    Planner::default().compute(material, roll, order)
}
