//! Repository Pattern for the vaccination statistics store
//!
//! The assistant only ever reads the latest snapshot per location, so the
//! gateway trait is small and synchronous. Implementations:
//! - `SqliteStatsGateway` reads the dashboard's `countries_vaccinations` table
//! - `MockStatsGateway` keeps rows in memory for tests and demos
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Dialogue Controller                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 StatsGateway (trait)                        │
//! └─────────────────────────────────────────────────────────────┘
//!                   ┌──────────┴──────────┐
//!                   ▼                     ▼
//!          ┌─────────────────┐   ┌─────────────────┐
//!          │     SQLite      │   │      Mock       │
//!          │  Implementation │   │ Implementation  │
//!          └─────────────────┘   └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use vaxassist::storage::{SqliteStatsGateway, StatsGateway};
//!
//! let gateway = SqliteStatsGateway::new("data/vax_tracker.db", Duration::from_secs(2))?;
//! let top = gateway.latest_stats(5)?;
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::CountryStats;
use crate::utils::error::GatewayError;

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Row limit used when a lookup has to scan every location
pub const FULL_SCAN_LIMIT: usize = 10_000;

// ============================================================================
// Gateway Trait
// ============================================================================

/// Read access to the latest vaccination statistics
pub trait StatsGateway: Send + Sync {
    /// Latest snapshot per location, highest `pct_vaccinated` first
    fn latest_stats(&self, limit: usize) -> GatewayResult<Vec<CountryStats>>;

    /// Every location the store knows about
    fn all_known_locations(&self) -> GatewayResult<Vec<String>>;

    /// Latest snapshot for one location (case-insensitive)
    fn latest_for_location(&self, location: &str) -> GatewayResult<Option<CountryStats>> {
        Ok(self
            .latest_stats(FULL_SCAN_LIMIT)?
            .into_iter()
            .find(|row| row.is_location(location)))
    }
}

/// Order rows by vaccination rate, missing rates last, then by name
fn by_rate_desc(a: &CountryStats, b: &CountryStats) -> Ordering {
    match (a.pct_vaccinated, b.pct_vaccinated) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.location.cmp(&b.location))
}

// ============================================================================
// SQLite Implementation
// ============================================================================

const LATEST_COLUMNS: &str = "location, date, total_vaccinations, people_vaccinated, \
     people_fully_vaccinated, pct_vaccinated, pct_fully_vaccinated";

/// SQLite implementation of StatsGateway
///
/// Uses `Mutex` to ensure thread-safety for the SQLite connection.
pub struct SqliteStatsGateway {
    conn: Mutex<Connection>,
}

impl SqliteStatsGateway {
    /// Open (or create) the statistics database
    pub fn new(path: impl AsRef<Path>, busy_timeout: Duration) -> GatewayResult<Self> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                GatewayError::unavailable(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| GatewayError::unavailable(format!("cannot open {}: {e}", path.display())))?;
        conn.busy_timeout(busy_timeout)?;

        // Enable WAL mode for better concurrency
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let gateway = Self {
            conn: Mutex::new(conn),
        };
        gateway.create_schema()?;

        tracing::info!(path = %path.display(), "SQLite statistics store opened");
        Ok(gateway)
    }

    /// Create in-memory gateway (for testing)
    pub fn in_memory() -> GatewayResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| GatewayError::unavailable(format!("in-memory SQLite: {e}")))?;
        let gateway = Self {
            conn: Mutex::new(conn),
        };
        gateway.create_schema()?;
        Ok(gateway)
    }

    fn conn(&self) -> GatewayResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| GatewayError::unavailable("connection lock poisoned"))
    }

    /// Create database schema
    fn create_schema(&self) -> GatewayResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
                CREATE TABLE IF NOT EXISTS countries_vaccinations (
                    location TEXT NOT NULL,
                    date TEXT NOT NULL,
                    total_vaccinations REAL,
                    people_vaccinated REAL,
                    people_fully_vaccinated REAL,
                    pct_vaccinated REAL,
                    pct_fully_vaccinated REAL
                );

                CREATE INDEX IF NOT EXISTS idx_countries_vaccinations_location_date
                    ON countries_vaccinations(location, date);
                "#,
        )?;

        Ok(())
    }

    /// Replace the table contents with `records`
    ///
    /// Rows without a date are stored with an empty date and sort oldest.
    pub fn save_records(&self, records: &[CountryStats]) -> GatewayResult<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM countries_vaccinations", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO countries_vaccinations
                    (location, date, total_vaccinations, people_vaccinated,
                     people_fully_vaccinated, pct_vaccinated, pct_fully_vaccinated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;

            for r in records {
                let date = r.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
                stmt.execute(params![
                    r.location,
                    date,
                    r.total_doses.map(|v| v as f64),
                    r.people_vaccinated.map(|v| v as f64),
                    r.people_fully_vaccinated.map(|v| v as f64),
                    r.pct_vaccinated,
                    r.pct_fully_vaccinated,
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!(records = records.len(), "Saved vaccination records");
        Ok(records.len())
    }

    fn row_to_stats(row: &Row<'_>) -> rusqlite::Result<CountryStats> {
        // Counts may be stored as REAL by dataframe writers
        let count = |idx: usize| -> rusqlite::Result<Option<u64>> {
            Ok(row.get::<_, Option<f64>>(idx)?.map(|v| v.max(0.0) as u64))
        };
        let date: Option<String> = row.get(1)?;

        Ok(CountryStats {
            location: row.get(0)?,
            date: date.as_deref().and_then(parse_date),
            total_doses: count(2)?,
            people_vaccinated: count(3)?,
            people_fully_vaccinated: count(4)?,
            pct_vaccinated: row.get(5)?,
            pct_fully_vaccinated: row.get(6)?,
        })
    }
}

/// Parse `YYYY-MM-DD`, ignoring any time part
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

impl StatsGateway for SqliteStatsGateway {
    fn latest_stats(&self, limit: usize) -> GatewayResult<Vec<CountryStats>> {
        let conn = self.conn()?;
        let query = format!(
            "SELECT {LATEST_COLUMNS}
             FROM countries_vaccinations
             WHERE (location, date) IN (
                 SELECT location, MAX(date)
                 FROM countries_vaccinations
                 GROUP BY location
             )
             GROUP BY location
             ORDER BY pct_vaccinated DESC, location ASC
             LIMIT ?1"
        );

        let mut stmt = conn.prepare(&query)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![limit], Self::row_to_stats)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    fn all_known_locations(&self) -> GatewayResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT DISTINCT location FROM countries_vaccinations ORDER BY location")?;
        let locations = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(locations)
    }

    fn latest_for_location(&self, location: &str) -> GatewayResult<Option<CountryStats>> {
        let conn = self.conn()?;

        // SQLite's lower() folds ASCII only; resolve the stored spelling with
        // the same Unicode folding the entity catalog uses.
        let wanted = location.trim().to_lowercase();
        let mut names = conn.prepare_cached("SELECT DISTINCT location FROM countries_vaccinations")?;
        let stored = names
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .find(|name| name.to_lowercase() == wanted);

        let Some(stored) = stored else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {LATEST_COLUMNS}
             FROM countries_vaccinations
             WHERE location = ?1
             ORDER BY date DESC
             LIMIT 1"
        );

        let row = conn
            .query_row(&query, params![stored], Self::row_to_stats)
            .optional()?;

        Ok(row)
    }
}

// ============================================================================
// Mock Implementation (for testing)
// ============================================================================

/// In-memory implementation of StatsGateway
///
/// Can be switched into a failing state to exercise error paths.
#[derive(Default)]
pub struct MockStatsGateway {
    rows: RwLock<Vec<CountryStats>>,
    failure: RwLock<Option<String>>,
}

impl MockStatsGateway {
    /// Create an empty mock gateway
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock gateway holding `rows`
    pub fn with_rows(rows: Vec<CountryStats>) -> Self {
        Self {
            rows: RwLock::new(rows),
            failure: RwLock::new(None),
        }
    }

    /// Add a row
    pub fn insert(&self, row: CountryStats) {
        if let Ok(mut rows) = self.rows.write() {
            rows.push(row);
        }
    }

    /// Make every call fail with `GatewayError::Unavailable`
    pub fn set_unavailable(&self, reason: impl Into<String>) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = Some(reason.into());
        }
    }

    /// Stop failing
    pub fn clear_failure(&self) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = None;
        }
    }

    /// Get number of stored rows
    pub fn len(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> GatewayResult<()> {
        match self.failure.read() {
            Ok(failure) => match failure.as_ref() {
                Some(reason) => Err(GatewayError::unavailable(reason.clone())),
                None => Ok(()),
            },
            Err(_) => Err(GatewayError::unavailable("mock lock poisoned")),
        }
    }

    fn latest_rows(&self) -> GatewayResult<Vec<CountryStats>> {
        self.check()?;
        let rows = self
            .rows
            .read()
            .map_err(|_| GatewayError::unavailable("mock lock poisoned"))?;

        let mut latest: HashMap<String, CountryStats> = HashMap::new();
        for row in rows.iter() {
            match latest.get(&row.location) {
                Some(existing) if existing.date > row.date => {}
                _ => {
                    latest.insert(row.location.clone(), row.clone());
                }
            }
        }

        let mut out: Vec<CountryStats> = latest.into_values().collect();
        out.sort_by(by_rate_desc);
        Ok(out)
    }
}

impl StatsGateway for MockStatsGateway {
    fn latest_stats(&self, limit: usize) -> GatewayResult<Vec<CountryStats>> {
        let mut rows = self.latest_rows()?;
        rows.truncate(limit);
        Ok(rows)
    }

    fn all_known_locations(&self) -> GatewayResult<Vec<String>> {
        let mut locations: Vec<String> = self.latest_rows()?.into_iter().map(|r| r.location).collect();
        locations.sort();
        Ok(locations)
    }
}

// ============================================================================
// Shared Gateway Types
// ============================================================================

/// Thread-safe shared gateway
pub type SharedStatsGateway = Arc<dyn StatsGateway>;

/// Create a shared SQLite gateway
pub fn create_sqlite_gateway(
    path: impl AsRef<Path>,
    busy_timeout: Duration,
) -> GatewayResult<SharedStatsGateway> {
    let gateway = SqliteStatsGateway::new(path, busy_timeout)?;
    Ok(Arc::new(gateway))
}

/// Create a shared mock gateway
pub fn create_mock_gateway(rows: Vec<CountryStats>) -> SharedStatsGateway {
    Arc::new(MockStatsGateway::with_rows(rows))
}

// ============================================================================
// Tests
// ============================================================================
