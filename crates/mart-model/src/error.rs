//! Shared error taxonomy for the ETL pipeline.
//!
//! Parse failures on individual values are not errors at all: every value
//! parser degrades to a safe default. The variants here cover the row- and
//! batch-level failures that must reach the caller.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MartError {
    /// The raw zone held no records for the requested date. Distinct from
    /// `EmptyFactOutput`: the upstream fetcher produced nothing, so no
    /// transform was attempted.
    #[error("no raw records found for {date}; upstream fetch produced nothing")]
    EmptyRawZone { date: NaiveDate },

    /// Transformation ran but every row was dropped. Signals total upstream
    /// data failure, not sparsity.
    #[error("transform produced an empty fact table for {date}")]
    EmptyFactOutput { date: NaiveDate },

    /// The final frame carried a repeated column name. Data-integrity
    /// defect; the batch must not be written.
    #[error("duplicate columns in output schema: {columns:?}")]
    DuplicateColumns { columns: Vec<String> },

    /// Exchange rate was non-finite or not positive.
    #[error("invalid exchange rate: {rate}")]
    InvalidRate { rate: f64 },
}

pub type Result<T> = std::result::Result<T, MartError>;
