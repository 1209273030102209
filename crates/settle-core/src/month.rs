//! Month-key normalization and ordering.
//!
//! The canonical month key is `"YYYY-MM"`. Source files may instead carry
//! the localized label form `"2024年1月"`, which is normalized on parse.
//! Ordering is always numeric (year, then month), never plain string order.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{4})年").expect("valid year regex"))
}

fn month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})月").expect("valid month regex"))
}

/// Normalize a month label to `"YYYY-MM"`.
///
/// Localized labels like `"2024年1月"` become `"2024-01"`. Labels already
/// in key form pass through, and anything unparsable is returned verbatim
/// so downstream grouping still works (at the cost of fragmenting).
pub fn normalize_month_label(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.contains('年') && trimmed.contains('月') {
        let year = year_re()
            .captures(trimmed)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str());
        let month = month_re()
            .captures(trimmed)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str());
        if let (Some(year), Some(month)) = (year, month) {
            return format!("{}-{:0>2}", year, month);
        }
    }
    trimmed.to_string()
}

/// Split a `"YYYY-MM"` key into numeric `(year, month)`.
pub fn parse_month_key(key: &str) -> Option<(i32, u32)> {
    let (year, month) = key.split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}

/// Compare two month keys chronologically.
///
/// Both keys must parse for numeric comparison; otherwise falls back to
/// string order so unparsable keys still sort deterministically.
pub fn compare_month_keys(a: &str, b: &str) -> Ordering {
    match (parse_month_key(a), parse_month_key(b)) {
        (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
        _ => a.cmp(b),
    }
}

/// The key exactly twelve months before `key`, e.g. `"2024-01"` → `"2023-01"`.
///
/// Returns `None` when the year portion is not numeric.
pub fn prior_year_key(key: &str) -> Option<String> {
    let (year, month) = key.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    Some(format!("{}-{}", year - 1, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalize_month_label ──────────────────────────────────────────────

    #[test]
    fn test_normalize_localized_label() {
        assert_eq!(normalize_month_label("2024年1月"), "2024-01");
        assert_eq!(normalize_month_label("2024年12月"), "2024-12");
    }

    #[test]
    fn test_normalize_key_form_passes_through() {
        assert_eq!(normalize_month_label("2024-01"), "2024-01");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_month_label("  2023年9月 "), "2023-09");
    }

    #[test]
    fn test_normalize_unparsable_verbatim() {
        assert_eq!(normalize_month_label("FY24-Q1"), "FY24-Q1");
    }

    // ── ordering ───────────────────────────────────────────────────────────

    #[test]
    fn test_compare_month_keys_numeric_order() {
        let mut keys = vec!["2023-09", "2024-01", "2023-10"];
        keys.sort_by(|a, b| compare_month_keys(a, b));
        assert_eq!(keys, vec!["2023-09", "2023-10", "2024-01"]);
    }

    #[test]
    fn test_compare_month_keys_unpadded_month() {
        // "2023-9" sorts before "2023-10" numerically, after it as a string.
        assert_eq!(compare_month_keys("2023-9", "2023-10"), Ordering::Less);
    }

    #[test]
    fn test_compare_month_keys_string_fallback() {
        assert_eq!(compare_month_keys("alpha", "beta"), Ordering::Less);
    }

    // ── prior_year_key ─────────────────────────────────────────────────────

    #[test]
    fn test_prior_year_key() {
        assert_eq!(prior_year_key("2024-01"), Some("2023-01".to_string()));
        assert_eq!(prior_year_key("2024-12"), Some("2023-12".to_string()));
    }

    #[test]
    fn test_prior_year_key_unparsable_year() {
        assert_eq!(prior_year_key("FY24-Q1"), None);
        assert_eq!(prior_year_key("nodash"), None);
    }
}
