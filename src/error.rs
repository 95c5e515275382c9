//! Error types for the dictionary converter.
//!
//! Fatal conditions (missing input, unparsable YAML, bad config) abort the
//! run. `InvalidRecord` and `Sqlite` raised while a single record is being
//! stored are caught by the converter and turned into a skipped record.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("YAML file '{}' not found", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("error parsing YAML in '{}': {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("invalid field '{field}': {reason}")]
    InvalidRecord { field: &'static str, reason: String },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
