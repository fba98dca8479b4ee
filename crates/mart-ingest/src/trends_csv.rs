//! Wide trend CSV reading.
//!
//! Provider exports carry one row per date with one column per keyword plus
//! an `isPartial` flag. The date column is usually the frame index and may
//! arrive unnamed; it is canonicalized to `date` here so the transform only
//! sees one shape.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use mart_model::{RawRecord, RawValue};

use crate::error::{IngestError, Result};

/// Reads a wide trend export into raw records, one per date row.
pub fn read_trends_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .iter()
        .enumerate()
        .map(|(idx, raw)| canonical_header(idx, raw))
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| IngestError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, cell)| (header.clone(), RawValue::Str(cell.trim().to_string())))
            .collect();
        records.push(record);
    }

    debug!(path = %path.display(), rows = records.len(), "read trend export");
    Ok(records)
}

/// Trims BOM and whitespace; the first column is the date index whatever the
/// provider called it.
fn canonical_header(idx: usize, raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if idx == 0 {
        return "date".to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_csv(body: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trends.csv");
        std::fs::write(&path, body).unwrap();
        (dir, path)
    }

    #[test]
    fn unnamed_index_column_becomes_date() {
        let (_dir, path) = write_csv(",ao khoac,giay sneaker,isPartial\n2026-01-18,41,<1,False\n");
        let records = read_trends_csv(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].str_field("date"), Some("2026-01-18"));
        assert_eq!(records[0].str_field("ao khoac"), Some("41"));
        assert_eq!(records[0].str_field("isPartial"), Some("False"));
    }

    #[test]
    fn named_date_column_is_kept() {
        let (_dir, path) = write_csv("date,ao khoac\n2026-01-18,41\n2026-01-19,44\n");
        let records = read_trends_csv(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].str_field("date"), Some("2026-01-19"));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let (_dir, path) = write_csv("date,ao khoac\n2026-01-18,41\n,\n");
        let records = read_trends_csv(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = read_trends_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Csv { .. }));
    }
}
