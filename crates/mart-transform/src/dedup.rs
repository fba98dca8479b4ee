//! Natural-key resolution for multi-observation batches.
//!
//! Two policies: product rows keep the most recently observed snapshot per
//! `product_id`, trend rows aggregate per (date, keyword). Removal is
//! reported for observability, never treated as an error.

use std::collections::BTreeMap;
use std::collections::HashSet;

use chrono::NaiveDate;
use mart_model::TrendObservation;
use tracing::info;

use crate::normalize::NormalizedProduct;

/// Keeps the latest observation per `product_id`.
///
/// Rows without a product id pass through untouched; row-level validation
/// drops them later. Returns the survivors and the number removed.
pub fn dedup_products(mut products: Vec<NormalizedProduct>) -> (Vec<NormalizedProduct>, usize) {
    let before = products.len();

    // Stable sort, newest observation first; unknown timestamps sink to the
    // end so a dated snapshot always beats an undated one.
    products.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));

    let mut seen: HashSet<i64> = HashSet::new();
    products.retain(|row| match row.product_id {
        Some(id) => seen.insert(id),
        None => true,
    });

    let removed = before - products.len();
    if removed > 0 {
        info!(removed, "removed duplicate product snapshots");
    }
    (products, removed)
}

/// Aggregates trend rows to one per (date, keyword).
///
/// Overlapping fetch windows report the same key with conflicting scores;
/// the highest-confidence resolution is score = max, is_partial = any
/// (a partial flag from any batch dominates), observed_at = max. Output is
/// ordered by (date, keyword), which keeps reruns byte-identical.
pub fn aggregate_trends(observations: Vec<TrendObservation>) -> (Vec<TrendObservation>, usize) {
    let before = observations.len();

    let mut merged: BTreeMap<(NaiveDate, String), TrendObservation> = BTreeMap::new();
    for obs in observations {
        let key = (obs.date, obs.keyword.clone());
        merged
            .entry(key)
            .and_modify(|existing| {
                existing.score = existing.score.max(obs.score);
                existing.is_partial = existing.is_partial || obs.is_partial;
                existing.observed_at = existing.observed_at.max(obs.observed_at);
            })
            .or_insert(obs);
    }

    let result: Vec<TrendObservation> = merged.into_values().collect();
    let removed = before - result.len();
    if removed > 0 {
        info!(removed, "aggregated duplicate trend observations");
    }
    (result, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mart_model::PipelineConfig;
    use mart_model::RawRecord;

    use crate::normalize::normalize_record;

    fn product(id: i64, observed_at: &str) -> NormalizedProduct {
        let mut record = RawRecord::new();
        record.insert("product_id", mart_model::RawValue::Int(id));
        record.insert(
            "_extracted_at",
            mart_model::RawValue::Str(observed_at.to_string()),
        );
        normalize_record(record, &PipelineConfig::default())
    }

    fn trend(date: (i32, u32, u32), keyword: &str, score: i64, partial: bool) -> TrendObservation {
        TrendObservation {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            keyword: keyword.to_string(),
            score,
            is_partial: partial,
            observed_at: Utc.with_ymd_and_hms(2026, 1, 19, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn latest_snapshot_wins() {
        let rows = vec![
            product(1, "2026-01-18T08:00:00Z"),
            product(1, "2026-01-18T20:00:00Z"),
            product(2, "2026-01-18T10:00:00Z"),
        ];
        let (deduped, removed) = dedup_products(rows);
        assert_eq!(removed, 1);
        assert_eq!(deduped.len(), 2);
        let survivor = deduped
            .iter()
            .find(|row| row.product_id == Some(1))
            .unwrap();
        assert_eq!(
            survivor.observed_at,
            Some(Utc.with_ymd_and_hms(2026, 1, 18, 20, 0, 0).unwrap())
        );
    }

    #[test]
    fn dated_beats_undated() {
        let mut undated = product(1, "2026-01-18T08:00:00Z");
        undated.observed_at = None;
        let dated = product(1, "2026-01-18T06:00:00Z");
        let (deduped, removed) = dedup_products(vec![undated, dated]);
        assert_eq!(removed, 1);
        assert!(deduped[0].observed_at.is_some());
    }

    #[test]
    fn missing_ids_pass_through() {
        let mut anonymous = product(1, "2026-01-18T08:00:00Z");
        anonymous.product_id = None;
        let (deduped, removed) = dedup_products(vec![anonymous.clone(), anonymous]);
        assert_eq!(removed, 0);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn trend_conflicts_resolve_to_max() {
        let (merged, removed) = aggregate_trends(vec![
            trend((2026, 1, 18), "ao khoac", 5, false),
            trend((2026, 1, 18), "ao khoac", 8, true),
            trend((2026, 1, 18), "giay sneaker", 61, false),
        ]);
        assert_eq!(removed, 1);
        assert_eq!(merged.len(), 2);
        let winner = merged.iter().find(|o| o.keyword == "ao khoac").unwrap();
        assert_eq!(winner.score, 8);
        assert!(winner.is_partial);
    }

    #[test]
    fn aggregation_output_is_ordered() {
        let (merged, _) = aggregate_trends(vec![
            trend((2026, 1, 19), "b", 1, false),
            trend((2026, 1, 18), "b", 1, false),
            trend((2026, 1, 18), "a", 1, false),
        ]);
        let keys: Vec<(NaiveDate, &str)> =
            merged.iter().map(|o| (o.date, o.keyword.as_str())).collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }
}
