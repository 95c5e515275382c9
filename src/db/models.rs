/// A `dictionary` row. `id` comes from the source data, not from SQLite.
///
/// `None` is stored as SQL `NULL`: a null `id` lets SQLite pick the rowid,
/// a null `entry` violates `NOT NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub id: Option<i64>,
    pub head: Option<String>,
    pub entry: Option<String>,
    pub phone: Option<String>,
    pub origin: Option<String>,
    pub info: Option<String>,
}

/// A `definitions` row before insertion; the row id and parent id are
/// assigned while storing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    pub def_id: Option<i64>,
    pub entry: Option<String>,
    pub def_type: Option<String>,
}

/// Outcome of storing an [`Entry`] under the `(entry, phone)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// A new row was created with this id.
    Inserted(i64),
    /// The key already existed; children attach to this id.
    Merged(i64),
}

impl EntryOutcome {
    pub fn id(self) -> i64 {
        match self {
            EntryOutcome::Inserted(id) | EntryOutcome::Merged(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    pub def_type: String,
    pub count: u64,
}
