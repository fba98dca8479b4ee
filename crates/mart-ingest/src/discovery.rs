//! Raw-zone snapshot discovery.
//!
//! The raw zone is laid out as Hive-style date partitions:
//!
//! ```text
//! <root>/products/snapshot_date=YYYY-MM-DD/*.json
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{IngestError, Result};

/// Partition directory for one product snapshot date.
pub fn snapshot_dir(raw_zone_root: &Path, date: NaiveDate) -> PathBuf {
    raw_zone_root
        .join("products")
        .join(format!("snapshot_date={}", date.format("%Y-%m-%d")))
}

/// Lists the JSON files of one snapshot partition, sorted by filename.
///
/// A missing partition directory is [`IngestError::DirectoryNotFound`]; the
/// caller decides whether that is fatal for the run.
pub fn discover_snapshot_files(raw_zone_root: &Path, date: NaiveDate) -> Result<Vec<PathBuf>> {
    let dir = snapshot_dir(raw_zone_root, date);
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound { path: dir });
    }

    let entries = std::fs::read_dir(&dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.clone(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.clone(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()
    }

    #[test]
    fn lists_only_json_sorted() {
        let root = TempDir::new().unwrap();
        let dir = snapshot_dir(root.path(), date());
        std::fs::create_dir_all(&dir).unwrap();
        for name in &["page_2.json", "page_1.json", "notes.txt", "page_3.JSON"] {
            std::fs::write(dir.join(name), "[]").unwrap();
        }

        let files = discover_snapshot_files(root.path(), date()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["page_1.json", "page_2.json", "page_3.JSON"]);
    }

    #[test]
    fn missing_partition_is_an_error() {
        let root = TempDir::new().unwrap();
        let err = discover_snapshot_files(root.path(), date()).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }

    #[test]
    fn partition_path_is_hive_style() {
        let dir = snapshot_dir(Path::new("/data/raw"), date());
        assert_eq!(
            dir,
            PathBuf::from("/data/raw/products/snapshot_date=2026-01-18")
        );
    }
}
