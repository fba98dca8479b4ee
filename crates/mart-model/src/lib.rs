//! Data model definitions for the market data mart.
//!
//! This crate defines the types shared across the ETL workspace:
//!
//! - **raw**: the untyped raw-record representation produced at the
//!   ingestion boundary
//! - **entities**: typed star-schema rows (fact and dimension entities)
//! - **schema**: target column sets for every warehouse table
//! - **config**: immutable pipeline configuration
//! - **error**: shared error taxonomy

pub mod config;
pub mod entities;
pub mod error;
pub mod raw;
pub mod schema;

pub use config::PipelineConfig;
pub use entities::{
    CategoryDimension, ExchangeRate, ProductDimension, ProductSnapshot, RateSource,
    TrendObservation,
};
pub use error::{MartError, Result};
pub use raw::{RawRecord, RawValue};
pub use schema::{
    DIM_CATEGORIES_SCHEMA, DIM_EXCHANGE_RATE_SCHEMA, DIM_PRODUCTS_SCHEMA, FACT_SNAPSHOT_SCHEMA,
    FACT_TRENDS_SCHEMA,
};
