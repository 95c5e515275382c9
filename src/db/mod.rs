//! SQLite store for the converted dictionary (tables, indexes, FTS5)
use rusqlite::{Connection, Transaction, params};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;

pub mod definitions;
pub mod entries;
pub mod models;
pub mod stats;

const SCHEMA_SQL: &str = r#"
CREATE TABLE dictionary (
    id INTEGER PRIMARY KEY,
    head TEXT,
    entry TEXT NOT NULL,
    phone TEXT,
    origin TEXT,
    info TEXT,
    UNIQUE(entry, phone)
);

CREATE TABLE definitions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    dictionary_id INTEGER,
    def_id INTEGER,
    entry TEXT NOT NULL,
    type TEXT,
    FOREIGN KEY (dictionary_id) REFERENCES dictionary (id)
);

CREATE INDEX idx_entry ON dictionary (entry);
CREATE INDEX idx_entry_collate ON dictionary (entry COLLATE NOCASE);
CREATE INDEX idx_phone ON dictionary (phone);
CREATE INDEX idx_dict_id ON definitions (dictionary_id);
CREATE INDEX idx_def_type ON definitions (type);

CREATE VIRTUAL TABLE definitions_fts USING fts5(
    dictionary_id,
    entry,
    type,
    content='definitions',
    content_rowid='id'
);

CREATE TABLE build_info (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

/// Pragmas applied for the duration of a bulk load. Nothing else has the file
/// open, so durability is only needed at the final commit.
const BULK_LOAD_PRAGMAS: &str = r#"
PRAGMA synchronous = OFF;
PRAGMA journal_mode = MEMORY;
PRAGMA temp_store = MEMORY;
PRAGMA cache_size = -64000;
"#;

/// Owns the connection to the destination database for the whole run.
///
/// Writes happen inside the transaction returned by [`DictionaryDb::begin`];
/// dropping it without `commit` rolls everything back. [`DictionaryDb::close`]
/// releases the file.
pub struct DictionaryDb {
    pub(crate) conn: Connection,
}

impl DictionaryDb {
    /// Delete any existing file at `path`, then create a fresh database with
    /// the dictionary schema.
    pub fn create<P: AsRef<Path>>(path: P, bulk_load: bool) -> Result<Self> {
        let path = path.as_ref();

        match fs::remove_file(path) {
            Ok(()) => info!("Removed existing database: {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        info!("Creating SQLite database: {}", path.display());
        let conn = Connection::open(path)?;
        Self::init(conn, bulk_load)
    }

    /// Open an in-memory database with the dictionary schema (useful for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, false)
    }

    fn init(conn: Connection, bulk_load: bool) -> Result<Self> {
        // Definitions may reference ids that never made it into `dictionary`
        conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
        if bulk_load {
            debug!("Applying bulk load pragmas");
            conn.execute_batch(BULK_LOAD_PRAGMAS)?;
        }
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Start the transaction that wraps the whole load.
    ///
    /// The transaction only borrows the connection immutably, so the insert
    /// methods on `self` stay usable while it is open.
    pub fn begin(&self) -> Result<Transaction<'_>> {
        Ok(self.conn.unchecked_transaction()?)
    }

    /// Record key/value metadata about this build.
    pub fn write_build_info(&self, items: &[(&str, String)]) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare("INSERT OR REPLACE INTO build_info (key, value) VALUES (?, ?)")?;
        for (key, value) in items {
            stmt.execute(params![key, value])?;
        }
        Ok(())
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_db_init() {
        let db = DictionaryDb::open_in_memory().expect("Failed to open in-memory DB");

        let tables: usize = db
            .conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name IN ('dictionary', 'definitions', 'definitions_fts', 'build_info');",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 4);

        let indexes: usize = db
            .conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(indexes, 5);
    }

    #[test]
    fn test_foreign_keys_not_enforced() {
        let db = DictionaryDb::open_in_memory().unwrap();
        let enabled: i64 = db
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 0);

        // A definition for a missing parent is accepted
        db.conn
            .execute(
                "INSERT INTO definitions (dictionary_id, def_id, entry, type) VALUES (99, 1, 'orphan', '')",
                [],
            )
            .unwrap();
    }

    #[test]
    fn test_create_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.db");
        fs::write(&path, b"not a database").unwrap();

        let db = DictionaryDb::create(&path, true).unwrap();
        let count: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM dictionary", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
        db.close().unwrap();
    }

    #[test]
    fn test_dropped_transaction_rolls_back() {
        let db = DictionaryDb::open_in_memory().unwrap();
        {
            let _tx = db.begin().unwrap();
            db.conn
                .execute(
                    "INSERT INTO dictionary (id, entry, phone) VALUES (1, 'ಮನೆ', 'mane')",
                    [],
                )
                .unwrap();
        }
        let count: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM dictionary", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_build_info() {
        let db = DictionaryDb::open_in_memory().unwrap();
        db.write_build_info(&[("source_path", "a.yaml".to_string())])
            .unwrap();
        db.write_build_info(&[("source_path", "b.yaml".to_string())])
            .unwrap();
        let value: String = db
            .conn
            .query_row(
                "SELECT value FROM build_info WHERE key = 'source_path'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(value, "b.yaml");
    }
}
