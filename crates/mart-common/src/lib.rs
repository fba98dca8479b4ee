//! Shared utilities for the market data mart crates.
//!
//! This crate provides Polars `AnyValue` helpers used wherever frames are
//! inspected cell-wise (warehouse merges, summaries, tests).

pub mod polars;

pub use polars::any_to_string;
