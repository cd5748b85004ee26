//! CSV report of stored plans.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use crate::error::{HistoryError, HistoryResult};
use crate::history::{HistoryRow, HistoryStore};

/// Column headers, in output order.
pub const REPORT_HEADERS: [&str; 9] = [
    "Time",
    "Stock No.",
    "Material Code",
    "Roll Width, mm",
    "Useful Area, m2",
    "Waste, %",
    "Surplus (main)",
    "Surplus (additional)",
    "Used Length, m",
];

/// Most rows a report covers.
pub const REPORT_ROW_LIMIT: usize = 1000;

/// Write the header and `rows` as CSV.
pub fn write_report<W: Write>(rows: &[HistoryRow], writer: W) -> HistoryResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(REPORT_HEADERS)?;

    for row in rows {
        out.write_record([
            row.timestamp.format("%H:%M").to_string(),
            row.stock_ticket.clone(),
            row.material_code.clone(),
            format!("{:.1}", row.roll_width_mm),
            format!("{:.1}", row.useful_area_m2),
            format!("{:.1}", row.waste_percent),
            row.surplus_main_rolls.to_string(),
            row.surplus_additional_rolls.to_string(),
            format!("{:.1}", row.used_length_m),
        ])?;
    }

    out.flush()?;
    Ok(())
}

/// Export the most recent history to `dir/report_YYYYMMDD_HHMMSS.csv`.
pub fn export_report(
    store: &HistoryStore,
    dir: &Path,
    now: NaiveDateTime,
) -> HistoryResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| HistoryError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("report_{}.csv", now.format("%Y%m%d_%H%M%S")));
    let rows = store.fetch_recent(REPORT_ROW_LIMIT)?;
    write_report(&rows, File::create(&path)?)?;

    info!("Exported {} row(s) to {}", rows.len(), path.display());
    Ok(path)
}
