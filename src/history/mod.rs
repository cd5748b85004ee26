//! Stored plan history.

mod record;
mod store;

pub use record::{HistoryRecord, HistoryRow};
pub use store::{HistoryStore, DEFAULT_HISTORY_LIMIT};
