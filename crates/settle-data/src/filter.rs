//! Profession-scoped views of a monthly aggregate.
//!
//! Restricting a month to one service category is a re-derivation, not a
//! slice: the scoped sums come straight from the matching detail rows'
//! own columns, which deliberately differ from the category-bucket
//! figures used by the unfiltered view. The input aggregate is never
//! mutated.

use std::borrow::Cow;

use settle_core::models::{Profession, ServiceCategory};

use crate::accumulator::MonthlyAggregate;
use crate::metrics::DerivedMetricsCalculator;

/// Stateless profession filter over finalized aggregates.
pub struct ProfessionFilter;

impl ProfessionFilter {
    /// Produce the view of `aggregate` scoped to `profession`.
    ///
    /// `Profession::All` borrows the aggregate unchanged; any category
    /// selector builds a new aggregate restricted to that category's
    /// detail rows plus all TOTAL rows.
    pub fn apply(aggregate: &MonthlyAggregate, profession: Profession) -> Cow<'_, MonthlyAggregate> {
        match profession.category() {
            None => Cow::Borrowed(aggregate),
            Some(category) => Cow::Owned(Self::restrict(aggregate, category)),
        }
    }

    fn restrict(aggregate: &MonthlyAggregate, category: ServiceCategory) -> MonthlyAggregate {
        let mut scoped = MonthlyAggregate::new(aggregate.month_key.clone());

        // Re-accumulate the restricted row set so the breakdown buckets
        // and vendor sums reflect only the selected category.
        for record in &aggregate.records {
            if record.category() == Some(category) || record.is_total_row() {
                scoped.add_record(record.clone());
            }
        }

        // The scoped running sums come from the matching detail rows'
        // own columns, replacing whatever the TOTAL rows contributed
        // during re-accumulation.
        scoped.total_cost_sum = 0.0;
        scoped.payable_sum = 0.0;
        scoped.one_time_cost_sum = 0.0;
        scoped.subscription_cost_sum = 0.0;
        for record in &aggregate.records {
            if record.category() != Some(category) || record.is_total_row() {
                continue;
            }
            scoped.total_cost_sum += record.monthly_total_cost;
            scoped.payable_sum += record.monthly_payable;
            scoped.one_time_cost_sum += record.one_time_post_discount;
            scoped.subscription_cost_sum += record.subscription_post_discount;
        }

        // Scoped views source vendor scores from the rollup rows, unlike
        // the unfiltered view which reads detail rows. Last rollup wins.
        scoped.scores.clear();
        for record in &aggregate.records {
            if record.is_total_row()
                && !record.vendor.is_empty()
                && record.comprehensive_score != 0.0
            {
                scoped
                    .scores
                    .insert(record.vendor.clone(), record.comprehensive_score);
            }
        }

        DerivedMetricsCalculator::finalize(&mut scoped);
        scoped
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
