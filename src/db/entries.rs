use super::{DictionaryDb, models::*};
use rusqlite::{OptionalExtension, params};

use crate::error::Result;

impl DictionaryDb {
    /// Stores an entry unless its `(entry, phone)` key already exists.
    ///
    /// Returns `None` if the stored row cannot be resolved by its key, in
    /// which case the caller skips the record. That happens when `phone` is
    /// `NULL`: the row is written, but `NULL` never compares equal.
    pub fn insert_entry(&self, entry: &Entry) -> Result<Option<EntryOutcome>> {
        let inserted: Option<i64> = self
            .conn
            .prepare_cached(
                r#"
                INSERT INTO dictionary (id, head, entry, phone, origin, info)
                VALUES (?, ?, ?, ?, ?, ?)
                ON CONFLICT(entry, phone) DO NOTHING
                RETURNING id
                "#,
            )?
            .query_row(
                params![
                    entry.id,
                    entry.head,
                    entry.entry,
                    entry.phone,
                    entry.origin,
                    entry.info
                ],
                |row| row.get(0),
            )
            .optional()?;

        let (Some(text), Some(phone)) = (&entry.entry, &entry.phone) else {
            return Ok(None);
        };

        if let Some(id) = inserted {
            return Ok(Some(EntryOutcome::Inserted(id)));
        }

        Ok(self.find_entry_id(text, phone)?.map(EntryOutcome::Merged))
    }

    /// Looks up the id stored for an `(entry, phone)` key.
    pub fn find_entry_id(&self, entry: &str, phone: &str) -> Result<Option<i64>> {
        Ok(self
            .conn
            .prepare_cached("SELECT id FROM dictionary WHERE entry = ? AND phone = ?")?
            .query_row(params![entry, phone], |row| row.get(0))
            .optional()?)
    }
}
