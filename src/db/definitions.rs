use super::{DictionaryDb, models::Definition};
use rusqlite::params;
use tracing::info;

use crate::error::Result;

impl DictionaryDb {
    /// Inserts a definition under `dictionary_id` and returns its row id.
    /// Definitions are never deduplicated.
    pub fn insert_definition(&self, dictionary_id: i64, def: &Definition) -> Result<i64> {
        self.conn
            .prepare_cached(
                "INSERT INTO definitions (dictionary_id, def_id, entry, type) VALUES (?, ?, ?, ?)",
            )?
            .execute(params![dictionary_id, def.def_id, def.entry, def.def_type])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Copies every current `definitions` row into `definitions_fts`.
    ///
    /// This is a one-shot load: rows added after it runs are not indexed.
    pub fn populate_fts(&self) -> Result<usize> {
        let rows = self.conn.execute(
            r#"
            INSERT INTO definitions_fts (rowid, dictionary_id, entry, type)
            SELECT id, dictionary_id, entry, type FROM definitions
            "#,
            [],
        )?;
        info!("Indexed {} definitions for full-text search", rows);
        Ok(rows)
    }

    /// Merges the FTS5 b-trees into one for faster reads.
    pub fn optimize_fts(&self) -> Result<()> {
        self.conn.execute(
            "INSERT INTO definitions_fts (definitions_fts) VALUES ('optimize')",
            [],
        )?;
        Ok(())
    }
}
