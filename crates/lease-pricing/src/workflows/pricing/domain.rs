use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How an adjustment value is interpreted against a reference price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Percent,
    Dollar,
}

impl AdjustmentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Percent => "Percent",
            Self::Dollar => "Dollar",
        }
    }

    /// Percent adjustments are rounded to whole currency units; dollar
    /// adjustments pass through untouched.
    pub fn apply(self, reference_price: f64, value: f64) -> f64 {
        match self {
            Self::Percent => (reference_price * value / 100.0).round(),
            Self::Dollar => value,
        }
    }
}

/// Operator-maintained rent bounds for a unit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitTypeProfile {
    pub type_name: String,
    pub base_rent: f64,
    pub min_rent: f64,
    pub max_rent: f64,
}

/// Competing property used as a market reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketComp {
    pub property_name: String,
    #[serde(default)]
    pub rent_by_unit_type: BTreeMap<String, f64>,
    pub weight: f64,
    #[serde(default)]
    pub quality_score: f64,
}

impl MarketComp {
    /// Price quoted for `unit_type`; missing, zero or unusable prices count as 0.
    pub fn price_for(&self, unit_type: &str) -> f64 {
        self.rent_by_unit_type
            .get(unit_type)
            .copied()
            .filter(|price| price.is_finite() && *price > 0.0)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyThresholdRule {
    pub threshold_percent: f64,
    pub adjustment: f64,
    pub kind: AdjustmentKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseTermAdjustment {
    pub term_months: i32,
    pub adjustment: f64,
    pub kind: AdjustmentKind,
}

/// Cap on lease expirations landing in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationAllocation {
    pub month: String,
    #[serde(default)]
    pub allocated_percent: f64,
    pub max_units_for_month: u32,
    pub current_projected_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Good,
    Warning,
    Over,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Warning => "Warning",
            Self::Over => "Over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentRange {
    pub min: f64,
    pub max: f64,
}

/// Audit trail for how a suggested rent was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub north_star_price: f64,
    /// Filled in when the suggestion comes from a full quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_price: Option<f64>,
    pub base_rent: f64,
    pub occupancy_adjustment: f64,
    pub term_adjustment: f64,
    pub clamped_range: RentRange,
    pub was_clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSuggestion {
    pub term_months: i32,
    pub suggested_rent: f64,
    pub expiration_month: String,
    pub expiration_date: NaiveDate,
    pub is_allowed: bool,
    pub risk_level: RiskLevel,
    /// False when no allocation entry covers the expiration month.
    pub allocation_configured: bool,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    ConfigurationGap,
    ZeroCompWeight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingWarning {
    pub kind: WarningKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<i32>,
    pub detail: String,
}

impl PricingWarning {
    pub fn configuration_gap(term_months: Option<i32>, detail: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ConfigurationGap,
            term_months,
            detail: detail.into(),
        }
    }
}

/// Lease term dropped from a quote, with the field that disqualified it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedTerm {
    pub term_months: i32,
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl PricingError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Validation { field, .. } => field,
        }
    }
}
