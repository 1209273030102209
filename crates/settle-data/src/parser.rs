//! Row parsing for settlement CSV content.
//!
//! Converts delimited text rows into [`SettlementRecord`]s. Parsing is
//! deliberately forgiving: comment and blank lines are skipped, short rows
//! and rows with an empty month label are dropped, and any malformed
//! numeric cell defaults to 0 rather than failing the row.

use settle_core::models::SettlementRecord;
use settle_core::month::normalize_month_label;
use settle_core::numeric::{parse_or_default, parse_percent_or_default};
use tracing::debug;

/// Lines starting with this character are comments.
pub const COMMENT_MARKER: char = '#';

// ── RecordParser ──────────────────────────────────────────────────────────────

/// Parses data rows against a header row.
///
/// The header is used only for column-count validation: a data row with
/// fewer fields than the header is skipped.
pub struct RecordParser {
    header_len: usize,
}

impl RecordParser {
    /// Build a parser from the header row's fields.
    pub fn from_header(header: &[&str]) -> Self {
        Self {
            header_len: header.len(),
        }
    }

    /// Parse one data row, or decide to skip it.
    ///
    /// A row is skipped when its field count is below the header's, or
    /// when its first field (the month label) is empty after trimming.
    pub fn parse_row(&self, fields: &[&str]) -> Option<SettlementRecord> {
        if fields.len() < self.header_len {
            debug!(
                "Skipping short row: {} fields, header has {}",
                fields.len(),
                self.header_len
            );
            return None;
        }
        let month_label = fields[0].trim();
        if month_label.is_empty() {
            debug!("Skipping row with empty month label");
            return None;
        }

        let text = |i: usize| fields.get(i).map(|s| s.trim()).unwrap_or("").to_string();
        let num = |i: usize| fields.get(i).map(|s| parse_or_default(s)).unwrap_or(0.0);

        Some(SettlementRecord {
            month_key: normalize_month_label(month_label),
            city: text(1),
            vendor: text(2),
            service_category: text(3),
            subscription_pre_discount: num(4),
            one_time_pre_discount: num(5),
            discount_rate: num(6),
            subscription_post_discount: num(7),
            one_time_post_discount: num(8),
            total_post_discount: num(9),
            monthly_score: num(10),
            monthly_coefficient: fields
                .get(11)
                .map(|s| parse_percent_or_default(s))
                .unwrap_or(0.0),
            monthly_payable: num(12),
            other_deductions: num(13),
            monthly_actual_pay: num(14),
            monthly_deposit: num(15),
            monthly_total_cost: num(16),
            comprehensive_score: num(17),
        })
    }
}

// ── Text-level parsing ────────────────────────────────────────────────────────

/// Parse a complete CSV payload into settlement records.
///
/// The first non-comment, non-blank line is the header; every following
/// line is a candidate data row. Rows the [`RecordParser`] rejects are
/// silently dropped.
pub fn parse_settlement_csv(text: &str) -> Vec<SettlementRecord> {
    let mut parser: Option<RecordParser> = None;
    let mut records = Vec::new();

    for line in text.lines() {
        if line.starts_with(COMMENT_MARKER) || line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        match &parser {
            None => parser = Some(RecordParser::from_header(&fields)),
            Some(p) => {
                if let Some(record) = p.parse_row(&fields) {
                    records.push(record);
                }
            }
        }
    }

    records
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use settle_core::models::{ServiceCategory, LABEL_RESIDENTIAL_BROADBAND, TOTAL_ROW_SENTINEL};

    const HEADER: &str = "年/月,地市,代维公司,服务专业,包年折扣前金额小计（元）,按次折扣前金额小计（元）,折扣率,包年折扣后金额小计（元）,按次折扣后金额小计（元）,折扣后金额合计（元）,月度考核得分,月度考核系数,月度应付费用（元）,其他扣款（元）,月度实付费用（元）,月度质保金（元）,月度合计费用（元）,综合得分";

    fn csv(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    // ── parse_settlement_csv ──────────────────────────────────────────────────

    #[test]
    fn test_parse_basic_row() {
        let row = format!(
            "2024年1月,长沙,铁通,{},1000,2000,0.9,900,1800,2700,95,98%,5000,0,4800,200,6000,92",
            LABEL_RESIDENTIAL_BROADBAND
        );
        let records = parse_settlement_csv(&csv(&[&row]));

        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.month_key, "2024-01");
        assert_eq!(rec.city, "长沙");
        assert_eq!(rec.vendor, "铁通");
        assert_eq!(rec.category(), Some(ServiceCategory::ResidentialBroadband));
        assert_eq!(rec.subscription_pre_discount, 1000.0);
        assert_eq!(rec.one_time_post_discount, 1800.0);
        assert_eq!(rec.monthly_coefficient, 98.0);
        assert_eq!(rec.monthly_total_cost, 6000.0);
        assert_eq!(rec.comprehensive_score, 92.0);
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = format!(
            "# generated file\n\n{}\n# interior comment\n2024-01,长沙,铁通,{},0,0,0,0,0,0,0,0,0,0,0,0,100,90\n\n",
            HEADER, TOTAL_ROW_SENTINEL
        );
        let records = parse_settlement_csv(&text);
        assert_eq!(records.len(), 1);
        assert!(records[0].is_total_row());
    }

    #[test]
    fn test_parse_skips_short_rows() {
        let records = parse_settlement_csv(&csv(&["2024-01,长沙,铁通"]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_skips_empty_month_label() {
        let row = format!(
            "  ,长沙,铁通,{},0,0,0,0,0,0,0,0,0,0,0,0,100,90",
            LABEL_RESIDENTIAL_BROADBAND
        );
        let records = parse_settlement_csv(&csv(&[&row]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_bad_numeric_cells_default_to_zero() {
        let row = format!(
            "2024-01,长沙,铁通,{},abc,,0.9,x,1800,2700,95,n/a,5000,0,4800,200,bad,92",
            LABEL_RESIDENTIAL_BROADBAND
        );
        let records = parse_settlement_csv(&csv(&[&row]));

        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.subscription_pre_discount, 0.0);
        assert_eq!(rec.one_time_pre_discount, 0.0);
        assert_eq!(rec.subscription_post_discount, 0.0);
        assert_eq!(rec.monthly_coefficient, 0.0);
        assert_eq!(rec.monthly_total_cost, 0.0);
        // Good cells on the same row still parse.
        assert_eq!(rec.one_time_post_discount, 1800.0);
        assert_eq!(rec.comprehensive_score, 92.0);
    }

    #[test]
    fn test_parse_month_key_passthrough_for_unparsable_label() {
        let row = format!(
            "FY24-Q1,长沙,铁通,{},0,0,0,0,0,0,0,0,0,0,0,0,100,90",
            LABEL_RESIDENTIAL_BROADBAND
        );
        let records = parse_settlement_csv(&csv(&[&row]));
        assert_eq!(records[0].month_key, "FY24-Q1");
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_settlement_csv("").is_empty());
        assert!(parse_settlement_csv("# only a comment\n").is_empty());
    }

    // ── RecordParser ──────────────────────────────────────────────────────────

    #[test]
    fn test_record_parser_extra_fields_allowed() {
        // More fields than the header is fine; extras are ignored.
        let parser = RecordParser::from_header(&["a", "b"]);
        let rec = parser.parse_row(&["2024-01", "city", "vendor"]).unwrap();
        assert_eq!(rec.month_key, "2024-01");
        assert_eq!(rec.vendor, "vendor");
    }
}
