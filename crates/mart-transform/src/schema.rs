//! Target-schema enforcement for output frames.
//!
//! Every frame handed to the warehouse sink must carry exactly the target
//! columns, in target order. Missing columns become null-filled columns;
//! extra columns are dropped; repeated column names are a data-integrity
//! defect and abort the batch.

use anyhow::Result;
use polars::prelude::{DataFrame, DataType, Series};
use tracing::warn;

use mart_model::MartError;

/// Conforms `df` to the ordered `target` column list.
pub fn enforce_schema(mut df: DataFrame, target: &[&str]) -> Result<DataFrame> {
    check_duplicate_columns(&df)?;

    let height = df.height();
    for column in target {
        if df.column(column).is_err() {
            warn!(column, "missing column in output frame, filling with null");
            df.with_column(Series::full_null((*column).into(), height, &DataType::Null))?;
        }
    }

    let selected = df.select(target.iter().copied())?;
    check_duplicate_columns(&selected)?;
    Ok(selected)
}

/// Fails with [`MartError::DuplicateColumns`] if a column name repeats.
fn check_duplicate_columns(df: &DataFrame) -> Result<()> {
    let mut seen = std::collections::BTreeSet::new();
    let mut duplicates = Vec::new();
    for name in df.get_column_names() {
        if !seen.insert(name.as_str()) {
            duplicates.push(name.to_string());
        }
    }
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(MartError::DuplicateColumns {
            columns: duplicates,
        }
        .into())
    }
}
