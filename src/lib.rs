//! # kannada-dict — dictionary YAML to SQLite converter
//!
//! Loads the Kannada dictionary dataset (a YAML sequence of entries with
//! nested definitions) and writes a SQLite database for the reader app:
//! a deduplicated `dictionary` table, a `definitions` table, lookup indexes
//! and an FTS5 index over definitions.
//!
//! ## Architecture
//!
//! - **[`source`]** — YAML loading and shape checks
//! - **[`record`]** — Best-effort field extraction into typed rows
//! - **[`db`]** — Schema creation, inserts, FTS population, statistics
//! - **[`convert`]** — The batch pipeline tying the pieces together
//! - **[`report`]** — The end-of-run summary
//! - **[`config`]** — Optional JSON settings for a run

pub mod config;
pub mod convert;
pub mod db;
pub mod error;
pub mod record;
pub mod report;
pub mod source;

pub use convert::convert_file;
pub use error::{ConvertError, Result};
