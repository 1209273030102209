//! Monthly accumulation of settlement records.
//!
//! Folds a record stream into one [`MonthlyAggregate`] per month key,
//! maintaining running sums, four-bucket category sums per billing mode,
//! first-seen vendor order and first-wins vendor scores.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use settle_core::models::SettlementRecord;

use crate::metrics::DerivedMetrics;

// ── MonthlyAggregate ──────────────────────────────────────────────────────────

/// All settlement data for one month key.
///
/// Raw records are retained so filtered views can re-derive their sums
/// from the row set instead of slicing pre-computed buckets. Running sums
/// are raw yuan; the `metrics` field holds the currency-scaled derivation
/// produced by [`crate::metrics::DerivedMetricsCalculator`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// The month key, e.g. `"2024-01"`.
    pub month_key: String,
    /// Every record seen for this month, in input order.
    pub records: Vec<SettlementRecord>,
    /// Vendor names in first-seen order.
    pub vendor_names: Vec<String>,
    /// Vendor → first positive comprehensive score from a detail row.
    pub scores: HashMap<String, f64>,
    /// Sum of positive TOTAL-row monthly total costs.
    pub total_cost_sum: f64,
    /// Sum of positive TOTAL-row payable amounts.
    pub payable_sum: f64,
    /// Sum of positive TOTAL-row one-time post-discount amounts.
    pub one_time_cost_sum: f64,
    /// Sum of positive TOTAL-row subscription post-discount amounts.
    pub subscription_cost_sum: f64,
    /// One-time post-discount sums per category bucket.
    pub one_time_category_sums: [f64; 4],
    /// Subscription post-discount sums per category bucket.
    pub subscription_category_sums: [f64; 4],
    /// One-time post-discount sums per vendor (detail rows).
    pub one_time_vendor_sums: HashMap<String, f64>,
    /// Subscription post-discount sums per vendor (detail rows).
    pub subscription_vendor_sums: HashMap<String, f64>,
    /// Derived currency-scaled metrics, populated on finalization.
    pub metrics: DerivedMetrics,
}

impl MonthlyAggregate {
    /// Create an empty aggregate for `month_key`.
    pub fn new(month_key: impl Into<String>) -> Self {
        Self {
            month_key: month_key.into(),
            ..Self::default()
        }
    }

    /// Accumulate one record into this aggregate.
    ///
    /// TOTAL rows feed the month-level running sums (positive amounts
    /// only, so correction rows never invert a sum). Detail rows feed the
    /// category buckets, vendor sums and the first-wins score map.
    pub fn add_record(&mut self, record: SettlementRecord) {
        self.register_vendor(&record.vendor);

        if record.is_total_row() {
            if record.monthly_total_cost > 0.0 {
                self.total_cost_sum += record.monthly_total_cost;
            }
            if record.monthly_payable > 0.0 {
                self.payable_sum += record.monthly_payable;
            }
            if record.one_time_post_discount > 0.0 {
                self.one_time_cost_sum += record.one_time_post_discount;
            }
            if record.subscription_post_discount > 0.0 {
                self.subscription_cost_sum += record.subscription_post_discount;
            }
        } else {
            // First qualifying detail-row score wins; later rows never
            // overwrite it.
            if !record.vendor.is_empty()
                && record.comprehensive_score > 0.0
                && self.scores.get(&record.vendor).copied().unwrap_or(0.0) == 0.0
            {
                self.scores
                    .insert(record.vendor.clone(), record.comprehensive_score);
            }

            if let Some(category) = record.category() {
                let i = category.index();
                self.one_time_category_sums[i] += record.one_time_post_discount;
                self.subscription_category_sums[i] += record.subscription_post_discount;
            }

            // Vendor sums are not gated on category membership: every
            // detail row contributes to its vendor's totals.
            if !record.vendor.is_empty() {
                *self
                    .one_time_vendor_sums
                    .entry(record.vendor.clone())
                    .or_insert(0.0) += record.one_time_post_discount;
                *self
                    .subscription_vendor_sums
                    .entry(record.vendor.clone())
                    .or_insert(0.0) += record.subscription_post_discount;
            }
        }

        self.records.push(record);
    }

    /// Record a vendor in first-seen order with zero-initialized breakdown
    /// slots. No-op for empty names and vendors already registered.
    fn register_vendor(&mut self, vendor: &str) {
        if vendor.is_empty() || self.vendor_names.iter().any(|v| v == vendor) {
            return;
        }
        self.vendor_names.push(vendor.to_string());
        self.one_time_vendor_sums.insert(vendor.to_string(), 0.0);
        self.subscription_vendor_sums.insert(vendor.to_string(), 0.0);
    }
}

// ── MonthlyAccumulator ────────────────────────────────────────────────────────

/// Stateless helper that groups settlement records by month key.
pub struct MonthlyAccumulator;

impl MonthlyAccumulator {
    /// Fold `records` into one aggregate per month key.
    ///
    /// Aggregates are returned unfinalized; run the derivation pass over
    /// each one before querying scaled metrics.
    pub fn accumulate(records: &[SettlementRecord]) -> HashMap<String, MonthlyAggregate> {
        let mut map: HashMap<String, MonthlyAggregate> = HashMap::new();
        for record in records {
            map.entry(record.month_key.clone())
                .or_insert_with(|| MonthlyAggregate::new(record.month_key.clone()))
                .add_record(record.clone());
        }
        map
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
