//! Rent suggestions across lease terms, blending internal base rent with
//! market comps, occupancy thresholds and term adjustments, and checking each
//! term's expiration month against the allocation curve.

pub mod allocation;
pub mod calendar;
pub mod domain;
pub mod engine;
pub mod request;
pub mod router;

#[cfg(test)]
mod tests;

pub use allocation::{
    find_allocation, AllocationPolicy, ExpirationCurve, ExpirationCurveEntry,
    DEFAULT_WARNING_RATIO,
};
pub use domain::{
    AdjustmentKind, ExcludedTerm, ExpirationAllocation, LeaseTermAdjustment, MarketComp,
    OccupancyThresholdRule, PriceBreakdown, PricingError, PricingSuggestion, PricingWarning,
    RentRange, RiskLevel, UnitTypeProfile, WarningKind,
};
pub use engine::{
    compute_comp_price, compute_north_star_price, compute_occupancy_adjustment, rank_suggestions,
    suggest_rent_for_term, PricingEngine,
};
pub use request::{ExpirationCurveRequest, PricingRequest, PricingResponse};
pub use router::pricing_router;
