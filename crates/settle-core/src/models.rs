use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Service-category cell value marking a vendor's monthly rollup row.
pub const TOTAL_ROW_SENTINEL: &str = "合计金额（元）";

/// Raw category label for residential broadband service.
pub const LABEL_RESIDENTIAL_BROADBAND: &str = "家庭宽带";
/// Raw category label for enterprise dedicated lines.
pub const LABEL_ENTERPRISE_LINE: &str = "集团专线";
/// Raw category label for transport lines.
pub const LABEL_TRANSPORT_LINE: &str = "传输线路";
/// Raw category label for base stations (towers included).
pub const LABEL_BASE_STATION: &str = "基站（含铁塔）";
/// Raw category label for distributed antenna / repeater systems.
pub const LABEL_DISTRIBUTED_ANTENNA: &str = "直放站室分";

/// One of the four fixed billing domains a detail row is bucketed into.
///
/// The two radio-side raw labels (base station, distributed antenna) merge
/// into the single [`ServiceCategory::Wireless`] bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    ResidentialBroadband,
    EnterpriseLine,
    TransportLine,
    Wireless,
}

impl ServiceCategory {
    /// All categories in canonical bucket order.
    pub const ALL: [ServiceCategory; 4] = [
        ServiceCategory::ResidentialBroadband,
        ServiceCategory::EnterpriseLine,
        ServiceCategory::TransportLine,
        ServiceCategory::Wireless,
    ];

    /// Map a raw CSV category label to its bucket.
    ///
    /// Labels outside the fixed vocabulary (including the TOTAL sentinel)
    /// return `None` and are excluded from category bucketing.
    pub fn from_label(label: &str) -> Option<ServiceCategory> {
        match label {
            LABEL_RESIDENTIAL_BROADBAND => Some(ServiceCategory::ResidentialBroadband),
            LABEL_ENTERPRISE_LINE => Some(ServiceCategory::EnterpriseLine),
            LABEL_TRANSPORT_LINE => Some(ServiceCategory::TransportLine),
            LABEL_BASE_STATION | LABEL_DISTRIBUTED_ANTENNA => Some(ServiceCategory::Wireless),
            _ => None,
        }
    }

    /// Position of this category in the four-bucket breakdown arrays.
    pub fn index(self) -> usize {
        match self {
            ServiceCategory::ResidentialBroadband => 0,
            ServiceCategory::EnterpriseLine => 1,
            ServiceCategory::TransportLine => 2,
            ServiceCategory::Wireless => 3,
        }
    }

    /// Stable machine-readable tag, matching the serde representation.
    pub fn tag(self) -> &'static str {
        match self {
            ServiceCategory::ResidentialBroadband => "residential-broadband",
            ServiceCategory::EnterpriseLine => "enterprise-line",
            ServiceCategory::TransportLine => "transport-line",
            ServiceCategory::Wireless => "wireless",
        }
    }
}

/// Profession selector for the filtered monthly view.
///
/// `All` keeps the unfiltered aggregate; any other variant restricts the
/// view to one service category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profession {
    All,
    ResidentialBroadband,
    EnterpriseLine,
    TransportLine,
    Wireless,
}

impl Profession {
    /// The category this selector restricts to, or `None` for `All`.
    pub fn category(self) -> Option<ServiceCategory> {
        match self {
            Profession::All => None,
            Profession::ResidentialBroadband => Some(ServiceCategory::ResidentialBroadband),
            Profession::EnterpriseLine => Some(ServiceCategory::EnterpriseLine),
            Profession::TransportLine => Some(ServiceCategory::TransportLine),
            Profession::Wireless => Some(ServiceCategory::Wireless),
        }
    }

    /// Stable machine-readable tag, matching the serde representation.
    pub fn tag(self) -> &'static str {
        match self {
            Profession::All => "all",
            Profession::ResidentialBroadband => "residential-broadband",
            Profession::EnterpriseLine => "enterprise-line",
            Profession::TransportLine => "transport-line",
            Profession::Wireless => "wireless",
        }
    }
}

impl FromStr for Profession {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "all" => Ok(Profession::All),
            "residential-broadband" => Ok(Profession::ResidentialBroadband),
            "enterprise-line" => Ok(Profession::EnterpriseLine),
            "transport-line" => Ok(Profession::TransportLine),
            "wireless" => Ok(Profession::Wireless),
            other => Err(format!("unknown profession selector: {}", other)),
        }
    }
}

/// One CSV data row: a city/vendor/service-line settlement for one month.
///
/// All numeric fields are raw yuan figures (or scores) and default to 0
/// when the source cell could not be parsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Normalized month key, `"YYYY-MM"`.
    pub month_key: String,
    /// City the settlement applies to.
    pub city: String,
    /// Maintenance vendor name.
    pub vendor: String,
    /// Raw service-category label (fixed vocabulary or the TOTAL sentinel).
    pub service_category: String,
    /// Subscription-mode amount before discount.
    pub subscription_pre_discount: f64,
    /// One-time-mode amount before discount.
    pub one_time_pre_discount: f64,
    /// Discount rate applied to this line.
    pub discount_rate: f64,
    /// Subscription-mode amount after discount.
    pub subscription_post_discount: f64,
    /// One-time-mode amount after discount.
    pub one_time_post_discount: f64,
    /// Combined post-discount amount.
    pub total_post_discount: f64,
    /// Monthly assessment score.
    pub monthly_score: f64,
    /// Monthly assessment coefficient (percent sign stripped on parse).
    pub monthly_coefficient: f64,
    /// Monthly payable amount.
    pub monthly_payable: f64,
    /// Other deductions.
    pub other_deductions: f64,
    /// Monthly amount actually paid.
    pub monthly_actual_pay: f64,
    /// Monthly quality deposit withheld.
    pub monthly_deposit: f64,
    /// Monthly total cost for this line.
    pub monthly_total_cost: f64,
    /// Comprehensive vendor performance score.
    pub comprehensive_score: f64,
}

impl SettlementRecord {
    /// Whether this row is a vendor-level rollup rather than a detail line.
    pub fn is_total_row(&self) -> bool {
        self.service_category == TOTAL_ROW_SENTINEL
    }

    /// The category bucket for this row, `None` for TOTAL rows and labels
    /// outside the fixed vocabulary.
    pub fn category(&self) -> Option<ServiceCategory> {
        ServiceCategory::from_label(&self.service_category)
    }
}
