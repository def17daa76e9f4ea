use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::pricing::calendar::MONTH_NAMES;
use crate::workflows::pricing::{
    pricing_router, AdjustmentKind, ExpirationAllocation, LeaseTermAdjustment, MarketComp,
    OccupancyThresholdRule, PricingEngine, PricingRequest, UnitTypeProfile,
};

pub(super) fn move_in() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 15).expect("valid date")
}

pub(super) fn unit() -> UnitTypeProfile {
    UnitTypeProfile {
        type_name: "2BR".to_string(),
        base_rent: 1800.0,
        min_rent: 1600.0,
        max_rent: 2200.0,
    }
}

pub(super) fn comp(name: &str, prices: &[(&str, f64)], weight: f64) -> MarketComp {
    MarketComp {
        property_name: name.to_string(),
        rent_by_unit_type: prices
            .iter()
            .map(|(unit_type, price)| (unit_type.to_string(), *price))
            .collect(),
        weight,
        quality_score: 7.0,
    }
}

/// Weighted 25/75 so the comp price lands on 2050 exactly.
pub(super) fn comps() -> Vec<MarketComp> {
    vec![
        comp("Riverside Commons", &[("1BR", 1450.0), ("2BR", 1900.0)], 25.0),
        comp("Oak Ridge", &[("2BR", 2100.0)], 75.0),
    ]
}

/// Deliberately out of threshold order.
pub(super) fn thresholds() -> Vec<OccupancyThresholdRule> {
    vec![
        OccupancyThresholdRule {
            threshold_percent: 95.0,
            adjustment: 5.0,
            kind: AdjustmentKind::Percent,
        },
        OccupancyThresholdRule {
            threshold_percent: 98.0,
            adjustment: 15.0,
            kind: AdjustmentKind::Percent,
        },
        OccupancyThresholdRule {
            threshold_percent: 90.0,
            adjustment: -50.0,
            kind: AdjustmentKind::Dollar,
        },
    ]
}

pub(super) fn term(term_months: i32, adjustment: f64, kind: AdjustmentKind) -> LeaseTermAdjustment {
    LeaseTermAdjustment {
        term_months,
        adjustment,
        kind,
    }
}

pub(super) fn terms() -> Vec<LeaseTermAdjustment> {
    vec![
        term(12, 0.0, AdjustmentKind::Dollar),
        term(6, 5.0, AdjustmentKind::Percent),
        term(3, 10.0, AdjustmentKind::Percent),
        term(18, -25.0, AdjustmentKind::Dollar),
    ]
}

pub(super) fn allocation(month: &str, cap: u32, current: u32) -> ExpirationAllocation {
    ExpirationAllocation {
        month: month.to_string(),
        allocated_percent: 100.0 / 12.0,
        max_units_for_month: cap,
        current_projected_count: current,
    }
}

/// January is full, April sits in the warning band, the rest are roomy.
pub(super) fn allocations() -> Vec<ExpirationAllocation> {
    MONTH_NAMES
        .iter()
        .map(|month| match *month {
            "January" => allocation(month, 10, 10),
            "April" => allocation(month, 20, 19),
            _ => allocation(month, 20, 5),
        })
        .collect()
}

pub(super) fn request() -> PricingRequest {
    PricingRequest {
        unit_type: unit(),
        move_in_date: move_in(),
        current_occupancy: 96.0,
        market_comps: comps(),
        occupancy_thresholds: thresholds(),
        lease_term_adjustments: terms(),
        expiration_allocation: allocations(),
    }
}

pub(super) fn engine() -> PricingEngine {
    PricingEngine::default()
}

pub(super) fn router() -> axum::Router {
    pricing_router(Arc::new(engine()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
