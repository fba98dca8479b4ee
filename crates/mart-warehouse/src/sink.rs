//! The warehouse sink trait and an in-memory reference implementation.
//!
//! `MemoryWarehouse` exists for tests and dry runs: it implements the exact
//! replace-partition and merge semantics a production sink must honor, over
//! plain string cells.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use mart_common::any_to_string;
use polars::prelude::AnyValue;
use tracing::info;

use crate::batch::{LoadDisposition, TableBatch};

/// Outcome of loading one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub table: String,
    pub rows_in_batch: usize,
    pub rows_inserted: usize,
    pub rows_updated: usize,
    pub rows_deleted: usize,
}

/// Anything that can accept a table batch.
pub trait WarehouseSink {
    fn load(&mut self, batch: &TableBatch) -> Result<LoadReport>;
}

/// One stored row: column name to nullable cell text.
pub type StoredRow = BTreeMap<String, Option<String>>;

/// In-memory warehouse keyed by table name.
#[derive(Debug, Default)]
pub struct MemoryWarehouse {
    tables: BTreeMap<String, Vec<StoredRow>>,
}

impl MemoryWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self, table: &str) -> &[StoredRow] {
        self.tables.get(table).map_or(&[], Vec::as_slice)
    }

    fn merge_key(row: &StoredRow, keys: &[String]) -> String {
        keys.iter()
            .map(|key| row.get(key).cloned().flatten().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\u{1f}")
    }
}

impl WarehouseSink for MemoryWarehouse {
    fn load(&mut self, batch: &TableBatch) -> Result<LoadReport> {
        let incoming = frame_rows(batch)?;
        let mut report = LoadReport {
            table: batch.name.clone(),
            rows_in_batch: incoming.len(),
            rows_inserted: 0,
            rows_updated: 0,
            rows_deleted: 0,
        };
        let stored = self.tables.entry(batch.name.clone()).or_default();

        match &batch.disposition {
            LoadDisposition::ReplacePartition { column, date } => {
                let partition = date.format("%Y-%m-%d").to_string();
                let before = stored.len();
                stored.retain(|row| {
                    row.get(column).cloned().flatten().as_deref() != Some(partition.as_str())
                });
                report.rows_deleted = before - stored.len();
                report.rows_inserted = incoming.len();
                stored.extend(incoming);
            }
            LoadDisposition::MergeByKey { keys, protect } => {
                for row in incoming {
                    let key = Self::merge_key(&row, keys);
                    if let Some(existing) =
                        stored.iter_mut().find(|r| Self::merge_key(r, keys) == key)
                    {
                        for (column, incoming_value) in row {
                            let keep_existing = protect.contains(&column)
                                && incoming_value.is_none();
                            if !keep_existing {
                                existing.insert(column, incoming_value);
                            }
                        }
                        report.rows_updated += 1;
                    } else {
                        stored.push(row);
                        report.rows_inserted += 1;
                    }
                }
            }
        }

        info!(
            table = %report.table,
            inserted = report.rows_inserted,
            updated = report.rows_updated,
            deleted = report.rows_deleted,
            "loaded batch"
        );
        Ok(report)
    }
}

/// Materializes a frame as stored rows, nulls preserved.
fn frame_rows(batch: &TableBatch) -> Result<Vec<StoredRow>> {
    let df = &batch.frame;
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut row = StoredRow::new();
        for name in &names {
            let cell = df
                .column(name)
                .and_then(|c| c.get(idx))
                .with_context(|| format!("read cell {name}[{idx}] of {}", batch.name))?;
            let value = match cell {
                AnyValue::Null => None,
                other => Some(any_to_string(other)),
            };
            row.insert(name.clone(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}
