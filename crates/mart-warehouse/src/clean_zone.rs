//! Clean-zone Parquet output.
//!
//! The clean zone mirrors the raw zone's Hive-style partitioning:
//!
//! ```text
//! <root>/<table>/snapshot_date=YYYY-MM-DD/part-001.parquet
//! ```
//!
//! Writing a partition twice overwrites the same part file, which keeps
//! reruns idempotent at the file level too.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use polars::prelude::{DataFrame, ParquetWriter};
use tracing::info;

/// Writes schema-enforced frames into the clean zone.
#[derive(Debug, Clone)]
pub struct CleanZoneWriter {
    root: PathBuf,
}

impl CleanZoneWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Partition directory for one table and date.
    pub fn partition_dir(&self, table: &str, date: NaiveDate) -> PathBuf {
        self.root
            .join(table)
            .join(format!("snapshot_date={}", date.format("%Y-%m-%d")))
    }

    /// Writes one partition, returning the part file path.
    pub fn write(&self, table: &str, date: NaiveDate, frame: &mut DataFrame) -> Result<PathBuf> {
        let dir = self.partition_dir(table, date);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create partition dir {}", dir.display()))?;

        let path = dir.join("part-001.parquet");
        let file = File::create(&path)
            .with_context(|| format!("create parquet file {}", path.display()))?;
        ParquetWriter::new(file)
            .finish(frame)
            .with_context(|| format!("write parquet {}", path.display()))?;

        info!(table, %date, rows = frame.height(), path = %path.display(), "wrote clean-zone partition");
        Ok(path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom, ParquetReader, Series, SerReader};
    use tempfile::TempDir;

    #[test]
    fn writes_readable_partition() {
        let root = TempDir::new().unwrap();
        let writer = CleanZoneWriter::new(root.path());
        let date = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();

        let columns: Vec<Column> = vec![
            Series::new("product_id".into(), vec![1i64, 2]).into(),
            Series::new("current_price".into(), vec![240_000i64, 99_000]).into(),
        ];
        let mut frame = DataFrame::new(columns).unwrap();

        let path = writer.write("fact_product_snapshots", date, &mut frame).unwrap();
        assert!(path.ends_with(
            "fact_product_snapshots/snapshot_date=2026-01-18/part-001.parquet"
        ));

        let read_back = ParquetReader::new(File::open(&path).unwrap())
            .finish()
            .unwrap();
        assert_eq!(read_back.height(), 2);
        assert_eq!(read_back.width(), 2);
    }

    #[test]
    fn rewrite_overwrites_same_part() {
        let root = TempDir::new().unwrap();
        let writer = CleanZoneWriter::new(root.path());
        let date = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();

        let mut frame = DataFrame::new(vec![
            Series::new("product_id".into(), vec![1i64]).into(),
        ] as Vec<Column>)
        .unwrap();
        let first = writer.write("dim_products", date, &mut frame).unwrap();
        let second = writer.write("dim_products", date, &mut frame).unwrap();
        assert_eq!(first, second);

        let entries: Vec<_> = std::fs::read_dir(writer.partition_dir("dim_products", date))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }
}
