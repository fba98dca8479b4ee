//! Raw-zone ingestion: partition discovery and record loading.

pub mod discovery;
pub mod error;
pub mod json;
pub mod trends_csv;

use std::path::Path;

use chrono::NaiveDate;
use mart_model::RawRecord;
use tracing::info;

pub use discovery::{discover_snapshot_files, snapshot_dir};
pub use error::{IngestError, Result};
pub use json::read_raw_records;
pub use trends_csv::read_trends_csv;

/// Loads every record of one snapshot partition, files in filename order.
pub fn load_snapshot_batch(raw_zone_root: &Path, date: NaiveDate) -> Result<Vec<RawRecord>> {
    let files = discover_snapshot_files(raw_zone_root, date)?;
    let mut records = Vec::new();
    for file in &files {
        records.extend(read_raw_records(file)?);
    }
    info!(
        %date,
        files = files.len(),
        records = records.len(),
        "loaded raw snapshot partition"
    );
    Ok(records)
}
