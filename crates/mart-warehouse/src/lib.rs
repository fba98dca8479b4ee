//! Warehouse boundary: how transformed frames land in storage.

pub mod batch;
pub mod clean_zone;
pub mod sink;

pub use batch::{
    DIM_CATEGORIES, DIM_EXCHANGE_RATES, DIM_PRODUCTS, FACT_PRODUCT_SNAPSHOTS, FACT_SEARCH_TRENDS,
    LoadDisposition, TableBatch,
};
pub use clean_zone::CleanZoneWriter;
pub use sink::{LoadReport, MemoryWarehouse, StoredRow, WarehouseSink};
