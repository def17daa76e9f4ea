use super::domain::{
    ExcludedTerm, ExpirationAllocation, LeaseTermAdjustment, MarketComp, OccupancyThresholdRule,
    PricingSuggestion, PricingWarning, UnitTypeProfile,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of everything a pricing session needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub unit_type: UnitTypeProfile,
    pub move_in_date: NaiveDate,
    pub current_occupancy: f64,
    #[serde(default)]
    pub market_comps: Vec<MarketComp>,
    #[serde(default)]
    pub occupancy_thresholds: Vec<OccupancyThresholdRule>,
    #[serde(default)]
    pub lease_term_adjustments: Vec<LeaseTermAdjustment>,
    #[serde(default)]
    pub expiration_allocation: Vec<ExpirationAllocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub unit_type: String,
    pub move_in_date: NaiveDate,
    pub comp_price: f64,
    pub north_star_price: f64,
    pub occupancy_adjustment: f64,
    pub suggestions: Vec<PricingSuggestion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<ExcludedTerm>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PricingWarning>,
}

impl PricingResponse {
    /// Highest-ranked suggestion that does not breach its expiration cap.
    pub fn best_allowed(&self) -> Option<&PricingSuggestion> {
        self.suggestions.iter().find(|suggestion| suggestion.is_allowed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationCurveRequest {
    #[serde(default)]
    pub expiration_allocation: Vec<ExpirationAllocation>,
}
