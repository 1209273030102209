//! Monthly report assembly and rendering.
//!
//! Pulls one month's (optionally profession-scoped) view plus its
//! year-over-year deltas out of the [`AggregateStore`] into a single
//! serializable structure, rendered either as plain text or JSON.

use anyhow::{bail, Result};
use chrono::Utc;
use serde::Serialize;
use settle_core::models::{Profession, ServiceCategory};
use settle_data::metrics::DerivedMetrics;
use settle_data::store::AggregateStore;
use settle_data::yoy::YearOverYear;

/// One vendor's line in the report.
#[derive(Debug, Clone, Serialize)]
pub struct VendorLine {
    pub vendor: String,
    /// First-line comprehensive score (rollup-derived in scoped views).
    pub score: f64,
    /// One-time billing-mode cost, 万 units.
    pub one_time_cost: f64,
    /// Subscription billing-mode cost, 万 units.
    pub subscription_cost: f64,
    /// Year-over-year score delta, percent.
    pub score_change: f64,
}

/// The complete monthly report for one month and profession selector.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    pub month_key: String,
    pub profession: String,
    /// Currency-scaled summary metrics for the selected view.
    pub metrics: DerivedMetrics,
    /// Category tags in canonical bucket order.
    pub category_tags: Vec<String>,
    pub vendors: Vec<VendorLine>,
    /// Year-over-year deltas (computed over the unfiltered aggregates).
    pub year_over_year: YearOverYear,
}

/// Assemble the report for `month_key` under `profession`.
pub fn build_monthly_report(
    store: &AggregateStore,
    month_key: &str,
    profession: Profession,
) -> Result<MonthlyReport> {
    let Some(view) = store.filtered(month_key, profession) else {
        bail!("no settlement data for month {}", month_key);
    };
    let year_over_year = store.year_over_year(month_key);

    let vendors = view
        .vendor_names
        .iter()
        .enumerate()
        .map(|(i, vendor)| VendorLine {
            vendor: vendor.clone(),
            score: view.scores.get(vendor).copied().unwrap_or(0.0),
            one_time_cost: view.metrics.one_time_vendors.get(i).copied().unwrap_or(0.0),
            subscription_cost: view
                .metrics
                .subscription_vendors
                .get(i)
                .copied()
                .unwrap_or(0.0),
            score_change: year_over_year
                .score_changes
                .get(vendor)
                .copied()
                .unwrap_or(0.0),
        })
        .collect();

    Ok(MonthlyReport {
        generated_at: Utc::now().to_rfc3339(),
        month_key: month_key.to_string(),
        profession: profession.tag().to_string(),
        metrics: view.metrics.clone(),
        category_tags: ServiceCategory::ALL
            .iter()
            .map(|c| c.tag().to_string())
            .collect(),
        vendors,
        year_over_year,
    })
}

/// Render the report as an aligned plain-text table.
pub fn render_text(report: &MonthlyReport) -> String {
    let m = &report.metrics;
    let yoy = &report.year_over_year;
    let mut out = String::new();

    out.push_str(&format!(
        "Settlement report {} ({})\n\n",
        report.month_key, report.profession
    ));
    out.push_str(&format!(
        "  total cost        {:>12.2} 万   ({:+.2}%)\n",
        m.total_cost, yoy.total_change
    ));
    out.push_str(&format!(
        "  transactions      {:>12.2}      ({:+.2}%)\n",
        m.total_count, yoy.count_change
    ));
    out.push_str(&format!(
        "  avg cost          {:>12.2} 元   ({:+.2}%)\n",
        m.avg_cost, yoy.avg_change
    ));
    out.push_str(&format!(
        "  one-time cost     {:>12.2} 万   ({:+.2}%)\n",
        m.one_time_cost, yoy.one_time_change
    ));
    out.push_str(&format!(
        "  subscription cost {:>12.2} 万   ({:+.2}%)\n",
        m.subscription_cost, yoy.subscription_change
    ));

    out.push_str("\nCategory breakdown (one-time / subscription, 万):\n");
    for (i, tag) in report.category_tags.iter().enumerate() {
        out.push_str(&format!(
            "  {:<22} {:>10.2} / {:>10.2}\n",
            tag, m.one_time_categories[i], m.subscription_categories[i]
        ));
    }

    out.push_str("\nVendors:\n");
    for line in &report.vendors {
        out.push_str(&format!(
            "  {:<12} score {:>6.1} ({:+.2}%)   {:>10.2} / {:>10.2}\n",
            line.vendor, line.score, line.score_change, line.one_time_cost, line.subscription_cost
        ));
    }

    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
