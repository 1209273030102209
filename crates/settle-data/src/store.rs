//! Query surface over finalized monthly aggregates.
//!
//! The store owns every finalized [`MonthlyAggregate`] plus a
//! chronologically sorted key index, and answers the queries the
//! rendering/reporting layer consumes: month listing, lookups, filtered
//! views, year-over-year deltas and vendor summaries.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use settle_core::models::{Profession, SettlementRecord};
use settle_core::month::{compare_month_keys, prior_year_key};
use tracing::debug;

use crate::accumulator::{MonthlyAccumulator, MonthlyAggregate};
use crate::filter::ProfessionFilter;
use crate::metrics::DerivedMetricsCalculator;
use crate::yoy::{YearOverYear, YoYComparator};

// ── Result types ──────────────────────────────────────────────────────────────

/// Vendor-level rollup figures taken from a month's TOTAL rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorSummary {
    /// Monthly total cost, raw yuan.
    pub total_cost: f64,
    /// Comprehensive score reported on the rollup row.
    pub score: f64,
    /// Monthly payable amount, raw yuan.
    pub payable: f64,
    /// Monthly amount actually paid, raw yuan.
    pub actual_pay: f64,
}

/// Vendor list plus first-line scores for one month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorScores {
    /// Vendor names in first-seen order.
    pub vendor_names: Vec<String>,
    /// Vendor → first positive detail-row comprehensive score.
    pub first_line_scores: HashMap<String, f64>,
}

// ── AggregateStore ────────────────────────────────────────────────────────────

/// In-memory store of finalized aggregates, keyed by month.
///
/// Built once from a full record set; rebuilding from new input fully
/// replaces the previous state.
#[derive(Debug, Clone, Default)]
pub struct AggregateStore {
    aggregates: HashMap<String, MonthlyAggregate>,
    month_keys: Vec<String>,
}

impl AggregateStore {
    /// Accumulate and finalize `records` into a queryable store.
    pub fn from_records(records: &[SettlementRecord]) -> Self {
        let mut aggregates = MonthlyAccumulator::accumulate(records);
        for aggregate in aggregates.values_mut() {
            DerivedMetricsCalculator::finalize(aggregate);
        }

        let mut month_keys: Vec<String> = aggregates.keys().cloned().collect();
        month_keys.sort_by(|a, b| compare_month_keys(a, b));

        debug!(
            "Store built: {} months from {} records",
            month_keys.len(),
            records.len()
        );

        Self {
            aggregates,
            month_keys,
        }
    }

    /// Available month keys in ascending chronological order.
    pub fn month_keys(&self) -> &[String] {
        &self.month_keys
    }

    /// The most recent month key, if any data was loaded.
    pub fn latest_month(&self) -> Option<&str> {
        self.month_keys.last().map(String::as_str)
    }

    /// The finalized aggregate for `month_key`.
    pub fn get(&self, month_key: &str) -> Option<&MonthlyAggregate> {
        self.aggregates.get(month_key)
    }

    /// The profession-scoped view of a month.
    ///
    /// `Profession::All` borrows the stored aggregate; category selectors
    /// produce a re-derived copy. `None` when the month is unknown.
    pub fn filtered(
        &self,
        month_key: &str,
        profession: Profession,
    ) -> Option<Cow<'_, MonthlyAggregate>> {
        self.get(month_key)
            .map(|aggregate| ProfessionFilter::apply(aggregate, profession))
    }

    /// Year-over-year deltas for `month_key`.
    ///
    /// All-zero deltas when the month itself or its prior-year month is
    /// absent.
    pub fn year_over_year(&self, month_key: &str) -> YearOverYear {
        let Some(current) = self.get(month_key) else {
            return YearOverYear::default();
        };
        let prior = prior_year_key(month_key).and_then(|key| self.get(&key));
        YoYComparator::compare(current, prior)
    }

    /// Raw detail rows for a month; empty when the month is unknown.
    pub fn month_details(&self, month_key: &str) -> &[SettlementRecord] {
        self.get(month_key)
            .map(|aggregate| aggregate.records.as_slice())
            .unwrap_or(&[])
    }

    /// Vendor rollup summaries built from a month's TOTAL rows.
    pub fn vendor_summary(&self, month_key: &str) -> HashMap<String, VendorSummary> {
        let mut summary = HashMap::new();
        for record in self.month_details(month_key) {
            if record.is_total_row() && !record.vendor.is_empty() {
                summary.insert(
                    record.vendor.clone(),
                    VendorSummary {
                        total_cost: record.monthly_total_cost,
                        score: record.comprehensive_score,
                        payable: record.monthly_payable,
                        actual_pay: record.monthly_actual_pay,
                    },
                );
            }
        }
        summary
    }

    /// Vendor names and first-line scores for a month.
    pub fn vendor_scores(&self, month_key: &str) -> VendorScores {
        self.get(month_key)
            .map(|aggregate| VendorScores {
                vendor_names: aggregate.vendor_names.clone(),
                first_line_scores: aggregate.scores.clone(),
            })
            .unwrap_or_default()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use settle_core::models::{LABEL_RESIDENTIAL_BROADBAND, TOTAL_ROW_SENTINEL};

    fn rollup(month: &str, vendor: &str, total_cost: f64) -> SettlementRecord {
        SettlementRecord {
            month_key: month.to_string(),
            vendor: vendor.to_string(),
            service_category: TOTAL_ROW_SENTINEL.to_string(),
            monthly_total_cost: total_cost,
            monthly_payable: total_cost / 10.0,
            monthly_actual_pay: total_cost * 0.9,
            comprehensive_score: 93.0,
            ..SettlementRecord::default()
        }
    }

    fn detail(month: &str, vendor: &str, score: f64) -> SettlementRecord {
        SettlementRecord {
            month_key: month.to_string(),
            vendor: vendor.to_string(),
            service_category: LABEL_RESIDENTIAL_BROADBAND.to_string(),
            comprehensive_score: score,
            ..SettlementRecord::default()
        }
    }

    // ── ordering / lookup ─────────────────────────────────────────────────────

    #[test]
    fn test_month_keys_sorted_chronologically() {
        let records = vec![
            rollup("2023-09", "A", 100.0),
            rollup("2024-01", "A", 100.0),
            rollup("2023-10", "A", 100.0),
        ];
        let store = AggregateStore::from_records(&records);
        assert_eq!(store.month_keys(), &["2023-09", "2023-10", "2024-01"]);
        assert_eq!(store.latest_month(), Some("2024-01"));
    }

    #[test]
    fn test_empty_store() {
        let store = AggregateStore::from_records(&[]);
        assert!(store.month_keys().is_empty());
        assert_eq!(store.latest_month(), None);
        assert!(store.get("2024-01").is_none());
    }

    #[test]
    fn test_get_unknown_month() {
        let store = AggregateStore::from_records(&[rollup("2024-01", "A", 100.0)]);
        assert!(store.get("2024-02").is_none());
        assert!(store.filtered("2024-02", Profession::All).is_none());
        assert!(store.month_details("2024-02").is_empty());
    }

    #[test]
    fn test_aggregates_are_finalized() {
        let store = AggregateStore::from_records(&[rollup("2024-01", "A", 1_234_500.0)]);
        let agg = store.get("2024-01").unwrap();
        assert_eq!(agg.metrics.total_cost, 123.45);
    }

    // ── filtered view ─────────────────────────────────────────────────────────

    #[test]
    fn test_filtered_all_is_borrowed() {
        let store = AggregateStore::from_records(&[rollup("2024-01", "A", 100.0)]);
        let view = store.filtered("2024-01", Profession::All).unwrap();
        assert!(matches!(view, std::borrow::Cow::Borrowed(_)));
    }

    #[test]
    fn test_filtered_category_is_owned() {
        let records = vec![
            detail("2024-01", "A", 90.0),
            rollup("2024-01", "A", 100.0),
        ];
        let store = AggregateStore::from_records(&records);
        let view = store
            .filtered("2024-01", Profession::ResidentialBroadband)
            .unwrap();
        assert!(matches!(view, std::borrow::Cow::Owned(_)));
    }

    // ── year over year ────────────────────────────────────────────────────────

    #[test]
    fn test_yoy_with_prior_year_present() {
        let records = vec![
            rollup("2023-01", "A", 1_000_000.0),
            rollup("2024-01", "A", 1_200_000.0),
        ];
        let store = AggregateStore::from_records(&records);
        let yoy = store.year_over_year("2024-01");
        assert_eq!(yoy.total_change, 20.0);
    }

    #[test]
    fn test_yoy_without_prior_year_is_zero() {
        let store = AggregateStore::from_records(&[rollup("2024-01", "A", 1_000_000.0)]);
        let yoy = store.year_over_year("2024-01");
        assert_eq!(yoy.total_change, 0.0);
        assert_eq!(yoy, YearOverYear::default());
    }

    #[test]
    fn test_yoy_unknown_month_is_zero() {
        let store = AggregateStore::from_records(&[]);
        assert_eq!(store.year_over_year("2024-01"), YearOverYear::default());
    }

    // ── vendor queries ────────────────────────────────────────────────────────

    #[test]
    fn test_vendor_summary_from_rollup_rows() {
        let records = vec![
            detail("2024-01", "A", 90.0),
            rollup("2024-01", "A", 50_000.0),
            rollup("2024-01", "B", 30_000.0),
        ];
        let store = AggregateStore::from_records(&records);
        let summary = store.vendor_summary("2024-01");

        assert_eq!(summary.len(), 2);
        assert_eq!(summary["A"].total_cost, 50_000.0);
        assert_eq!(summary["A"].payable, 5_000.0);
        assert_eq!(summary["A"].actual_pay, 45_000.0);
        assert_eq!(summary["B"].score, 93.0);
    }

    #[test]
    fn test_vendor_scores_first_seen_order() {
        let records = vec![
            detail("2024-01", "铁通", 90.0),
            detail("2024-01", "长实", 85.0),
            rollup("2024-01", "嘉环", 10_000.0),
        ];
        let store = AggregateStore::from_records(&records);
        let scores = store.vendor_scores("2024-01");

        assert_eq!(scores.vendor_names, vec!["铁通", "长实", "嘉环"]);
        assert_eq!(scores.first_line_scores["铁通"], 90.0);
        // Rollup-only vendors carry no first-line score.
        assert!(!scores.first_line_scores.contains_key("嘉环"));
    }

    #[test]
    fn test_vendor_scores_unknown_month() {
        let store = AggregateStore::from_records(&[]);
        let scores = store.vendor_scores("2024-01");
        assert!(scores.vendor_names.is_empty());
        assert!(scores.first_line_scores.is_empty());
    }
}
