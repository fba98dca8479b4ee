//! CLI library components for the mart ETL.

pub mod logging;
