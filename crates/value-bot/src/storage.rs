//! SQLite storage for the stock selection
//!
//! Every call opens its own connection and drops it before returning. The
//! call volume of a chat bot does not justify a pool.

use crate::error::StorageError;
use crate::model::TickerEntry;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const SELECTION_TABLE: &str = "selection";
pub const TRADES_TABLE: &str = "trades";

const CREATE_SELECTION: &str = "
    CREATE TABLE selection (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ticker TEXT NOT NULL UNIQUE,
        company_name TEXT NOT NULL,
        category TEXT NOT NULL
    )";

// Reserved for open trades, nothing reads or writes it yet.
const CREATE_TRADES: &str = "
    CREATE TABLE trades (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ticker_id INTEGER REFERENCES selection(id),
        buy_date TIMESTAMP
    )";

type StorageResult<T> = std::result::Result<T, StorageError>;

/// Statement executor for the selection table
///
/// Holds no lifecycle logic: duplicate and existence checks belong to the caller.
pub trait SelectionStore: Send + Sync {
    /// Create the selection and trades tables when they are missing
    fn initialize_schema(&self) -> StorageResult<()>;

    /// Append one row
    fn insert(&self, ticker: &str, company_name: &str, category: &str) -> StorageResult<()>;

    /// Delete all rows for `ticker`, returning how many were removed
    fn remove(&self, ticker: &str) -> StorageResult<usize>;

    /// Look up the row for `ticker`
    fn find_by_ticker(&self, ticker: &str) -> StorageResult<Option<TickerEntry>>;

    /// All stored symbols in insertion order
    fn list_tickers(&self) -> StorageResult<Vec<String>>;

    /// All stored rows in insertion order
    fn list_entries(&self) -> StorageResult<Vec<TickerEntry>>;
}

/// [`SelectionStore`] backed by a SQLite file
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Database file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> StorageResult<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    fn table_names(conn: &Connection) -> StorageResult<Vec<String>> {
        let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TickerEntry> {
    Ok(TickerEntry {
        ticker: row.get(0)?,
        company_name: row.get(1)?,
        category: row.get(2)?,
    })
}

impl SelectionStore for SqliteStore {
    fn initialize_schema(&self) -> StorageResult<()> {
        let conn = self.connect()?;
        let tables = Self::table_names(&conn)?;

        // SQLite table names are case-insensitive
        if !tables.iter().any(|t| t.eq_ignore_ascii_case(SELECTION_TABLE)) {
            info!("Creating database table {SELECTION_TABLE} ...");
            conn.execute(CREATE_SELECTION, [])?;
        }

        if !tables.iter().any(|t| t.eq_ignore_ascii_case(TRADES_TABLE)) {
            info!("Creating database table {TRADES_TABLE} ...");
            conn.execute(CREATE_TRADES, [])?;
        }

        Ok(())
    }

    fn insert(&self, ticker: &str, company_name: &str, category: &str) -> StorageResult<()> {
        debug!(ticker, "Inserting ticker into selection");
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO selection (ticker, company_name, category) VALUES (?1, ?2, ?3)",
            params![ticker, company_name, category],
        )?;
        Ok(())
    }

    fn remove(&self, ticker: &str) -> StorageResult<usize> {
        debug!(ticker, "Deleting ticker from selection");
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM selection WHERE ticker = ?1", [ticker])?;
        Ok(removed)
    }

    fn find_by_ticker(&self, ticker: &str) -> StorageResult<Option<TickerEntry>> {
        let conn = self.connect()?;
        let entry = conn
            .query_row(
                "SELECT ticker, company_name, category FROM selection WHERE ticker = ?1",
                [ticker],
                entry_from_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn list_tickers(&self) -> StorageResult<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT ticker FROM selection ORDER BY id")?;
        let tickers = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tickers)
    }

    fn list_entries(&self) -> StorageResult<Vec<TickerEntry>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT ticker, company_name, category FROM selection ORDER BY id")?;
        let entries = stmt
            .query_map([], entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
