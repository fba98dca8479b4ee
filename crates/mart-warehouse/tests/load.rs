//! Transform output flowing through the warehouse boundary.

use chrono::NaiveDate;
use mart_model::{PipelineConfig, RawRecord, RawValue};
use mart_transform::run_product_pipeline;
use mart_warehouse::{CleanZoneWriter, MemoryWarehouse, TableBatch, WarehouseSink};
use tempfile::TempDir;

fn record(fields: &[(&str, RawValue)]) -> RawRecord {
    fields
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

fn batch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()
}

fn sample_batch() -> Vec<RawRecord> {
    vec![record(&[
        ("product_id", RawValue::Int(42)),
        ("name", RawValue::Str("Áo khoác dù nam".into())),
        ("price", RawValue::Str("240.000đ".into())),
        ("category_path", RawValue::Str("1815 > 4593".into())),
        ("category_name", RawValue::Str("Áo khoác".into())),
        (
            "_extracted_at",
            RawValue::Str("2026-01-18T16:49:55.805Z".into()),
        ),
    ])]
}

#[test]
fn rerun_leaves_warehouse_unchanged() {
    let config = PipelineConfig::default();
    let mut warehouse = MemoryWarehouse::new();

    for _ in 0..2 {
        let out = run_product_pipeline(sample_batch(), batch_date(), &config).unwrap();
        warehouse
            .load(&TableBatch::fact_snapshots(out.fact, batch_date()))
            .unwrap();
        warehouse.load(&TableBatch::dim_products(out.dim_products)).unwrap();
        warehouse
            .load(&TableBatch::dim_categories(out.dim_categories))
            .unwrap();
    }

    assert_eq!(warehouse.rows("fact_product_snapshots").len(), 1);
    assert_eq!(warehouse.rows("dim_products").len(), 1);
    assert_eq!(warehouse.rows("dim_categories").len(), 1);

    let fact = &warehouse.rows("fact_product_snapshots")[0];
    assert_eq!(fact["current_price"].as_deref(), Some("240000"));
    assert_eq!(fact["snapshot_date"].as_deref(), Some("2026-01-18"));
}

#[test]
fn clean_zone_and_sink_agree_on_row_counts() {
    let config = PipelineConfig::default();
    let out = run_product_pipeline(sample_batch(), batch_date(), &config).unwrap();

    let tmp = TempDir::new().unwrap();
    let writer = CleanZoneWriter::new(tmp.path());
    let mut fact = out.fact.clone();
    writer
        .write("fact_product_snapshots", batch_date(), &mut fact)
        .unwrap();

    let mut warehouse = MemoryWarehouse::new();
    let report = warehouse
        .load(&TableBatch::fact_snapshots(out.fact, batch_date()))
        .unwrap();
    assert_eq!(report.rows_in_batch, fact.height());
}
