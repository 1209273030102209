//! Year-over-year comparison of monthly aggregates.
//!
//! Deltas are signed percentages between a month and the month exactly
//! twelve months prior. A missing prior year, or a zero denominator, is a
//! reporting convention that yields 0 rather than an error.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use settle_core::numeric::percent_change;

use crate::accumulator::MonthlyAggregate;

// ── YearOverYear ──────────────────────────────────────────────────────────────

/// Signed percentage deltas against the same month one year earlier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearOverYear {
    /// Total settlement cost delta, percent.
    pub total_change: f64,
    /// Transaction count delta, percent.
    pub count_change: f64,
    /// Average cost delta, percent.
    pub avg_change: f64,
    /// One-time billing-mode cost delta, percent.
    pub one_time_change: f64,
    /// Subscription billing-mode cost delta, percent.
    pub subscription_change: f64,
    /// Per-vendor score delta over the union of both years' vendors.
    pub score_changes: HashMap<String, f64>,
}

// ── YoYComparator ─────────────────────────────────────────────────────────────

/// Stateless comparison of two finalized aggregates a year apart.
pub struct YoYComparator;

impl YoYComparator {
    /// Compare `current` against the prior-year aggregate.
    ///
    /// With no prior aggregate every delta is exactly 0 — insufficient
    /// history, not an error.
    pub fn compare(current: &MonthlyAggregate, prior: Option<&MonthlyAggregate>) -> YearOverYear {
        let Some(prior) = prior else {
            return YearOverYear::default();
        };

        let c = &current.metrics;
        let p = &prior.metrics;

        let vendors: HashSet<&String> = current.scores.keys().chain(prior.scores.keys()).collect();
        let score_changes = vendors
            .into_iter()
            .map(|vendor| {
                let now = current.scores.get(vendor).copied().unwrap_or(0.0);
                let then = prior.scores.get(vendor).copied().unwrap_or(0.0);
                (vendor.clone(), percent_change(now, then))
            })
            .collect();

        YearOverYear {
            total_change: percent_change(c.total_cost, p.total_cost),
            count_change: percent_change(c.total_count, p.total_count),
            avg_change: percent_change(c.avg_cost, p.avg_cost),
            one_time_change: percent_change(c.one_time_cost, p.one_time_cost),
            subscription_change: percent_change(c.subscription_cost, p.subscription_cost),
            score_changes,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
