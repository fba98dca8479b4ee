//! Search-trend transformation: wide provider export to long fact rows.
//!
//! The provider exports one column per keyword plus a date column and an
//! optional `isPartial` column (name matched case-insensitively). Each raw
//! row melts into one observation per keyword, then overlapping fetch
//! windows are aggregated away.

use chrono::{DateTime, Utc};
use mart_model::{RawRecord, TrendObservation};
use tracing::{debug, warn};

use crate::dedup::aggregate_trends;
use crate::normalization::datetime::parse_snapshot_date;
use crate::normalization::numeric::parse_trend_score;

/// Counters for one trend transformation run.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendStats {
    pub raw_rows: usize,
    pub melted_rows: usize,
    pub rows_skipped_bad_date: usize,
    pub duplicates_removed: usize,
    pub partial_rows: usize,
}

/// Melts wide trend records into per-keyword observations and aggregates
/// duplicate (date, keyword) pairs.
///
/// `observed_at` is supplied by the caller so that identical input always
/// produces identical output.
pub fn melt_trends(
    rows: &[RawRecord],
    observed_at: DateTime<Utc>,
) -> (Vec<TrendObservation>, TrendStats) {
    let mut stats = TrendStats {
        raw_rows: rows.len(),
        ..TrendStats::default()
    };

    let mut observations = Vec::new();
    for row in rows {
        let Some(date) = row.str_field("date").and_then(parse_snapshot_date) else {
            stats.rows_skipped_bad_date += 1;
            continue;
        };

        let is_partial = partial_flag(row);

        for (field, value) in row.iter() {
            if field == "date" || field.eq_ignore_ascii_case("ispartial") {
                continue;
            }
            observations.push(TrendObservation {
                date,
                keyword: field.clone(),
                score: parse_trend_score(Some(value)),
                is_partial,
                observed_at,
            });
        }
    }
    stats.melted_rows = observations.len();

    if stats.rows_skipped_bad_date > 0 {
        warn!(
            skipped = stats.rows_skipped_bad_date,
            "skipped trend rows with unparseable dates"
        );
    }

    let (aggregated, removed) = aggregate_trends(observations);
    stats.duplicates_removed = removed;
    stats.partial_rows = aggregated.iter().filter(|o| o.is_partial).count();
    debug!(
        rows = aggregated.len(),
        partial = stats.partial_rows,
        "trend aggregation complete"
    );

    (aggregated, stats)
}

/// Reads the partial-data flag; a missing column means complete data.
fn partial_flag(row: &RawRecord) -> bool {
    row.iter()
        .find(|(field, _)| field.eq_ignore_ascii_case("ispartial"))
        .map(|(_, value)| match value {
            mart_model::RawValue::Bool(b) => *b,
            mart_model::RawValue::Str(s) => {
                matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes")
            }
            mart_model::RawValue::Int(v) => *v != 0,
            _ => false,
        })
        .unwrap_or(false)
}
