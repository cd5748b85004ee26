//! Data model types for slitting plans.

mod layout;
mod plan;
mod spec;
mod stock;

pub use layout::Lane;
pub use plan::CuttingPlan;
pub use spec::{parse_additional_width, parse_order_rolls, MaterialSpec, OrderSpec, RollSpec};
pub use stock::{MaterialCode, StockTicket};
