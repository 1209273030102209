//! Core domain types for the settlement aggregation engine.
//!
//! Holds the settlement record model, the fixed service-category
//! vocabulary, numeric parse/round utilities and month-key helpers shared
//! by the data pipeline and the reporting binary.

pub mod error;
pub mod models;
pub mod month;
pub mod numeric;
