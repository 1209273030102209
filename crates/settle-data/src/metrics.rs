//! Derivation of currency-scaled summary metrics.
//!
//! Post-processes a completed [`MonthlyAggregate`]: running sums scale to
//! 万 (ten-thousand yuan) units, the payable sum scales to an approximate
//! transaction count, and the category/vendor breakdowns are converted the
//! same way. Derivation is a pure function of the sums, so re-running it
//! is always safe.

use serde::{Deserialize, Serialize};
use settle_core::numeric::{round2, to_count, to_wan};

use crate::accumulator::MonthlyAggregate;

// ── DerivedMetrics ────────────────────────────────────────────────────────────

/// Currency-scaled summary of one monthly aggregate.
///
/// Breakdown vectors are parallel to the aggregate's `vendor_names` list;
/// category arrays follow the canonical bucket order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Total settlement cost, 万 units.
    pub total_cost: f64,
    /// Approximate transaction count (payable sum / 1000).
    pub total_count: f64,
    /// Average cost per transaction, yuan. Always re-derived from
    /// `total_cost` and `total_count`, never stored independently.
    pub avg_cost: f64,
    /// One-time billing-mode cost, 万 units.
    pub one_time_cost: f64,
    /// Subscription billing-mode cost, 万 units.
    pub subscription_cost: f64,
    /// One-time sums per category bucket, 万 units.
    pub one_time_categories: [f64; 4],
    /// Subscription sums per category bucket, 万 units.
    pub subscription_categories: [f64; 4],
    /// One-time sums per vendor, 万 units, parallel to `vendor_names`.
    pub one_time_vendors: Vec<f64>,
    /// Subscription sums per vendor, 万 units, parallel to `vendor_names`.
    pub subscription_vendors: Vec<f64>,
}

// ── DerivedMetricsCalculator ──────────────────────────────────────────────────

/// Stateless derivation pass over a monthly aggregate.
pub struct DerivedMetricsCalculator;

impl DerivedMetricsCalculator {
    /// Populate `aggregate.metrics` from its running sums. Idempotent.
    pub fn finalize(aggregate: &mut MonthlyAggregate) {
        aggregate.metrics = Self::compute(aggregate);
    }

    /// Compute the scaled metrics without mutating the aggregate.
    pub fn compute(aggregate: &MonthlyAggregate) -> DerivedMetrics {
        let total_cost = to_wan(aggregate.total_cost_sum);
        let total_count = to_count(aggregate.payable_sum);
        let avg_cost = if total_count > 0.0 {
            round2(total_cost * 10_000.0 / total_count)
        } else {
            0.0
        };

        let vendor_scaled = |sums: &std::collections::HashMap<String, f64>| {
            aggregate
                .vendor_names
                .iter()
                .map(|v| to_wan(sums.get(v).copied().unwrap_or(0.0)))
                .collect()
        };

        DerivedMetrics {
            total_cost,
            total_count,
            avg_cost,
            one_time_cost: to_wan(aggregate.one_time_cost_sum),
            subscription_cost: to_wan(aggregate.subscription_cost_sum),
            one_time_categories: aggregate.one_time_category_sums.map(to_wan),
            subscription_categories: aggregate.subscription_category_sums.map(to_wan),
            one_time_vendors: vendor_scaled(&aggregate.one_time_vendor_sums),
            subscription_vendors: vendor_scaled(&aggregate.subscription_vendor_sums),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
