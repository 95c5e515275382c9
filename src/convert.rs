use crate::config::Config;
use crate::db::DictionaryDb;
use crate::db::models::EntryOutcome;
use crate::error::Result;
use crate::record::{SourceRecord, display_id};
use crate::report::Summary;
use crate::source;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use serde_yaml::Mapping;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Per-run record counters.
///
/// `inserted` counts every record whose definitions were stored, including
/// records whose `(entry, phone)` key already existed; `merged` is that
/// subset. `skipped` counts records dropped because of an error or because
/// their entry row could not be resolved.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub inserted: usize,
    pub skipped: usize,
    pub merged: usize,
}

pub struct Converter<'a> {
    pub db: &'a DictionaryDb,
    pub config: &'a Config,
}

impl<'a> Converter<'a> {
    pub fn new(db: &'a DictionaryDb, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Stores all records in source order. A failing record is logged and
    /// skipped; earlier writes for it are kept.
    pub fn process_records(&self, records: &[Mapping]) -> ConvertStats {
        let mut stats = ConvertStats::default();
        let pb = self.progress_bar(records.len() as u64);

        for (i, map) in records.iter().enumerate() {
            match self.process_record(map) {
                Ok(Some(outcome)) => {
                    stats.inserted += 1;
                    if let EntryOutcome::Merged(id) = outcome {
                        stats.merged += 1;
                        debug!("Entry {} merged into existing id {id}", display_id(map));
                    }
                }
                Ok(None) => {
                    pb.suspend(|| {
                        warn!(
                            "Entry {} could not be found after insert, skipping",
                            display_id(map)
                        )
                    });
                    stats.skipped += 1;
                }
                Err(e) => {
                    pb.suspend(|| warn!("Error inserting item {}: {e}", display_id(map)));
                    stats.skipped += 1;
                }
            }

            pb.inc(1);
            let interval = self.config.progress_log_interval;
            if interval > 0 && (i + 1) % interval == 0 {
                debug!("Processed {} / {} records", i + 1, records.len());
            }
        }

        pb.finish_and_clear();
        stats
    }

    /// Stores one record. Returns `Ok(None)` when the entry row cannot be
    /// resolved, in which case none of its definitions are written.
    fn process_record(&self, map: &Mapping) -> Result<Option<EntryOutcome>> {
        let record = SourceRecord::from_mapping(map)?;

        let Some(outcome) = self.db.insert_entry(&record.entry)? else {
            return Ok(None);
        };

        for def in &record.definitions {
            self.db.insert_definition(outcome.id(), def)?;
        }

        Ok(Some(outcome))
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} entries ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    }
}

/// Converts the YAML dataset at `input` into a fresh SQLite database at
/// `output`.
///
/// The input is fully loaded before the destination is touched, so a missing
/// or malformed file leaves no output behind.
pub fn convert_file(input: &Path, output: &Path, config: &Config) -> Result<Summary> {
    config.validate()?;
    let records = source::load(input)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let db = DictionaryDb::create(output, config.bulk_load)?;
    let tx = db.begin()?;

    let stats = Converter::new(&db, config).process_records(&records);
    info!(
        "Processed {} records: {} inserted ({} merged into existing entries), {} skipped",
        records.len(),
        stats.inserted,
        stats.merged,
        stats.skipped
    );

    db.populate_fts()?;
    if config.optimize_fts {
        db.optimize_fts()?;
    }

    let total_words = db.count_entries()?;
    let total_definitions = db.count_definitions()?;
    let word_types = db.count_types()?;

    for tc in db.type_distribution(config.top_types)? {
        info!("Type {:?}: {} definitions", tc.def_type, tc.count);
    }

    db.write_build_info(&[
        ("source_path", input.display().to_string()),
        ("created_at", Utc::now().to_rfc3339()),
        ("tool_version", env!("CARGO_PKG_VERSION").to_string()),
        ("entries_inserted", stats.inserted.to_string()),
        ("entries_skipped", stats.skipped.to_string()),
    ])?;

    tx.commit()?;
    db.close()?;

    let size_bytes = fs::metadata(output)?.len();

    Ok(Summary {
        output_path: output.to_path_buf(),
        total_words,
        total_definitions,
        word_types,
        inserted: stats.inserted as u64,
        skipped: stats.skipped as u64,
        merged: stats.merged as u64,
        size_bytes,
    })
}
