//! SQLite-backed history store.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use tracing::info;

use super::{HistoryRecord, HistoryRow};
use crate::error::{HistoryError, HistoryResult};

/// Rows shown by default when listing history.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS history (
        id INTEGER PRIMARY KEY,
        timestamp TEXT NOT NULL,
        stock_number TEXT,
        material_code TEXT NOT NULL DEFAULT '',
        material_width REAL,
        useful_width REAL,
        big_roll_length REAL,
        roll_width REAL,
        roll_length REAL,
        main_count INTEGER,
        additional_width REAL,
        total_rolls INTEGER,
        used_length_m REAL,
        surplus_rolls INTEGER,
        surplus_main_rolls INTEGER,
        surplus_additional_rolls INTEGER,
        total_area REAL,
        useful_area REAL,
        waste_area REAL,
        waste_percent REAL
    )
"#;

/// History of executed plans.
///
/// Holds no business logic; records are written and read back as given.
pub struct HistoryStore {
    conn: Arc<Mutex<Connection>>,
}

impl HistoryStore {
    /// Open (or create) the history database at `path`.
    pub fn open(path: &Path) -> HistoryResult<Self> {
        let conn = Connection::open(path)?;
        info!("History database: {}", path.display());
        Self::from_connection(conn)
    }

    /// In-memory store, mostly for tests.
    pub fn open_in_memory() -> HistoryResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> HistoryResult<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn get_conn(&self) -> HistoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| HistoryError::Lock(e.to_string()))
    }

    /// Append a record, returning its row id.
    pub fn insert(&self, record: &HistoryRecord) -> HistoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO history (
                timestamp, stock_number, material_code,
                material_width, useful_width, big_roll_length, roll_width, roll_length,
                main_count, additional_width, total_rolls, used_length_m, surplus_rolls,
                surplus_main_rolls, surplus_additional_rolls, total_area,
                useful_area, waste_area, waste_percent
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
            "#,
            params![
                record.timestamp,
                record.stock_ticket.as_ref().map(|t| t.as_str()),
                record.material_code.as_str(),
                record.material_width_mm,
                record.useful_width_mm,
                record.big_roll_length_m,
                record.roll_width_mm,
                record.roll_length_m,
                record.main_count as i64,
                record.additional_width_mm,
                record.total_rolls as i64,
                record.used_length_m,
                record.surplus_rolls as i64,
                record.surplus_main_rolls as i64,
                record.surplus_additional_rolls as i64,
                record.total_area_m2,
                record.useful_area_m2,
                record.waste_area_m2,
                record.waste_percent,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Most recent rows first, at most `limit`.
    pub fn fetch_recent(&self, limit: usize) -> HistoryResult<Vec<HistoryRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT timestamp, stock_number, material_code,
                   roll_width, useful_area, waste_percent,
                   surplus_main_rolls, surplus_additional_rolls, used_length_m
            FROM history
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(HistoryRow {
                    timestamp: row.get::<_, NaiveDateTime>(0)?,
                    stock_ticket: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    material_code: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    roll_width_mm: row.get(3)?,
                    useful_area_m2: row.get(4)?,
                    waste_percent: row.get(5)?,
                    surplus_main_rolls: row.get::<_, i64>(6)? as u64,
                    surplus_additional_rolls: row.get::<_, i64>(7)? as u64,
                    used_length_m: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Number of stored records.
    pub fn count(&self) -> HistoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete every record, returning how many were removed.
    pub fn clear(&self) -> HistoryResult<usize> {
        let conn = self.get_conn()?;
        let removed = conn.execute("DELETE FROM history", [])?;
        info!("Cleared {} history record(s)", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MaterialCode, MaterialSpec, OrderSpec, RollSpec, StockTicket};
    use crate::Planner;
    use chrono::NaiveDate;

    fn record(order_rolls: i64, minute: u32) -> HistoryRecord {
        let plan = Planner::default()
            .compute(
                &MaterialSpec::new(850.0, 650.0),
                &RollSpec::new(100.0, 500.0),
                &OrderSpec::new(5000.0, order_rolls),
            )
            .unwrap();
        let timestamp = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(14, minute, 0)
            .unwrap();
        HistoryRecord::from_plan(
            &plan,
            timestamp,
            Some(StockTicket::parse("42/2025").unwrap()),
            MaterialCode::parse("PET12").unwrap(),
        )
    }

    #[test]
    fn test_insert_and_count() {
        let store = HistoryStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        let first = store.insert(&record(12, 0)).unwrap();
        let second = store.insert(&record(24, 1)).unwrap();
        assert!(second > first);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_fetch_recent_newest_first() {
        let store = HistoryStore::open_in_memory().unwrap();
        for (i, order) in [6, 12, 18].into_iter().enumerate() {
            store.insert(&record(order, i as u32)).unwrap();
        }

        let rows = store.fetch_recent(2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp.format("%H:%M").to_string(), "14:02");
        assert_eq!(rows[1].timestamp.format("%H:%M").to_string(), "14:01");
        assert_eq!(rows[0], record(18, 2).row());
    }

    #[test]
    fn test_row_round_trip_without_ticket() {
        let store = HistoryStore::open_in_memory().unwrap();
        let mut rec = record(6, 0);
        rec.stock_ticket = None;
        store.insert(&rec).unwrap();

        let rows = store.fetch_recent(DEFAULT_HISTORY_LIMIT).unwrap();
        assert_eq!(rows[0].stock_ticket, "");
        assert_eq!(rows[0].surplus_additional_rolls, 1);
    }

    #[test]
    fn test_clear() {
        let store = HistoryStore::open_in_memory().unwrap();
        store.insert(&record(6, 0)).unwrap();
        store.insert(&record(6, 1)).unwrap();
        assert_eq!(store.clear().unwrap(), 2);
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.fetch_recent(10).unwrap().is_empty());
    }
}
