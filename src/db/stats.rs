use super::{DictionaryDb, models::TypeCount};
use rusqlite::params;

use crate::error::Result;

impl DictionaryDb {
    pub fn count_entries(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM dictionary")
    }

    pub fn count_definitions(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM definitions")
    }

    /// Number of distinct, non-empty definition type tags.
    pub fn count_types(&self) -> Result<u64> {
        self.count("SELECT COUNT(DISTINCT type) FROM definitions WHERE type != ''")
    }

    /// Most frequent non-empty type tags, highest count first.
    pub fn type_distribution(&self, limit: usize) -> Result<Vec<TypeCount>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT type, COUNT(*) AS count
            FROM definitions
            WHERE type IS NOT NULL AND type != ''
            GROUP BY type
            ORDER BY count DESC, type ASC
            LIMIT ?
            "#,
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(TypeCount {
                def_type: row.get(0)?,
                count: row.get::<_, i64>(1)? as u64,
            })
        })?;

        let mut counts = Vec::new();
        for row in rows {
            counts.push(row?);
        }
        Ok(counts)
    }

    fn count(&self, sql: &str) -> Result<u64> {
        let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(n as u64)
    }
}
