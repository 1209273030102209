//! Defensive numeric parsing and currency rounding.
//!
//! Settlement CSVs regularly carry blank cells, stray text and trailing
//! percent signs. Per the row-level fault-tolerance policy a bad cell is
//! never an error: it parses to 0 and the row keeps flowing.

/// Parse a decimal cell, returning 0.0 when the cell is blank or malformed.
pub fn parse_or_default(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(0.0)
}

/// Parse a coefficient cell that may carry a trailing percent sign.
///
/// `"95%"` parses as 95.0. Malformed cells default to 0.0.
pub fn parse_percent_or_default(cell: &str) -> f64 {
    parse_or_default(cell.trim().trim_end_matches('%'))
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scale a raw yuan figure to 万 (ten-thousand) units, rounded to 2 dp.
pub fn to_wan(raw_yuan: f64) -> f64 {
    round2(raw_yuan / 10_000.0)
}

/// Scale a payable sum to an approximate transaction count, rounded to 2 dp.
pub fn to_count(raw_payable: f64) -> f64 {
    round2(raw_payable / 1_000.0)
}

/// Signed percentage change from `prior` to `current`, to 2 dp.
///
/// Returns 0.0 when `prior` is zero or negative; a missing or empty prior
/// period is a reporting convention, not an error.
pub fn percent_change(current: f64, prior: f64) -> f64 {
    if prior > 0.0 {
        ((current - prior) / prior * 10_000.0).round() / 100.0
    } else {
        0.0
    }
}
