//! History report export.

mod export;

pub use export::{export_report, write_report, REPORT_HEADERS, REPORT_ROW_LIMIT};
