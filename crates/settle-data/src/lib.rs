//! Data pipeline for the settlement engine.
//!
//! Responsible for discovering and reading settlement CSV files, parsing
//! rows into typed records, folding them into monthly aggregates, deriving
//! currency-scaled metrics, and serving filtered and year-over-year views.

pub mod accumulator;
pub mod filter;
pub mod metrics;
pub mod parser;
pub mod reader;
pub mod store;
pub mod yoy;

pub use settle_core as core;
