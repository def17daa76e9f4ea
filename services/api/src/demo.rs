use crate::infra::{parse_date, parse_percent};
use crate::quote::{render_curve, render_quote};
use chrono::{Local, NaiveDate};
use clap::Args;
use lease_pricing::error::AppError;
use lease_pricing::workflows::pricing::{
    AdjustmentKind, ExpirationAllocation, LeaseTermAdjustment, MarketComp,
    OccupancyThresholdRule, PricingEngine, PricingRequest, UnitTypeProfile,
};

/// Portfolio size the demo allocation table is derived from.
const DEMO_TOTAL_UNITS: u32 = 240;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Move-in date for the quote (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) move_in: Option<NaiveDate>,
    /// Current portfolio occupancy (0-100). Defaults to 95.5.
    #[arg(long, value_parser = parse_percent)]
    pub(crate) occupancy: Option<f64>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let move_in = args.move_in.unwrap_or_else(|| Local::now().date_naive());
    let occupancy = args.occupancy.unwrap_or(95.5);

    let engine = PricingEngine::default();
    let request = demo_request(move_in, occupancy);

    println!("Lease pricing demo (fixed fixtures)");
    println!(
        "{} comps | {} occupancy rules | {} lease terms | {} allocation months\n",
        request.market_comps.len(),
        request.occupancy_thresholds.len(),
        request.lease_term_adjustments.len(),
        request.expiration_allocation.len()
    );

    let response = engine.quote(&request)?;
    render_quote(&response);

    println!();
    let curve = engine.expiration_curve(&request.expiration_allocation);
    render_curve(&curve);

    Ok(())
}

pub(crate) fn demo_request(move_in: NaiveDate, occupancy: f64) -> PricingRequest {
    PricingRequest {
        unit_type: UnitTypeProfile {
            type_name: "2BR".to_string(),
            base_rent: 1850.0,
            min_rent: 1650.0,
            max_rent: 2250.0,
        },
        move_in_date: move_in,
        current_occupancy: occupancy,
        market_comps: demo_comps(),
        occupancy_thresholds: vec![
            threshold(98.0, 6.0, AdjustmentKind::Percent),
            threshold(95.0, 3.0, AdjustmentKind::Percent),
            threshold(90.0, 0.0, AdjustmentKind::Dollar),
            threshold(0.0, -75.0, AdjustmentKind::Dollar),
        ],
        lease_term_adjustments: vec![
            term(3, 15.0, AdjustmentKind::Percent),
            term(6, 8.0, AdjustmentKind::Percent),
            term(9, 3.0, AdjustmentKind::Percent),
            term(12, 0.0, AdjustmentKind::Dollar),
            term(15, -20.0, AdjustmentKind::Dollar),
            term(18, -35.0, AdjustmentKind::Dollar),
        ],
        expiration_allocation: demo_allocation(),
    }
}

fn demo_comps() -> Vec<MarketComp> {
    let comp = |name: &str, one_bed: f64, two_bed: f64, weight: f64, quality: f64| MarketComp {
        property_name: name.to_string(),
        rent_by_unit_type: [
            ("1BR".to_string(), one_bed),
            ("2BR".to_string(), two_bed),
        ]
        .into_iter()
        .collect(),
        weight,
        quality_score: quality,
    };

    vec![
        comp("Riverside Commons", 1480.0, 1925.0, 40.0, 8.0),
        comp("Oak Ridge Flats", 1525.0, 2010.0, 35.0, 8.5),
        comp("Maple Court", 1390.0, 1840.0, 25.0, 6.5),
    ]
}

fn demo_allocation() -> Vec<ExpirationAllocation> {
    // Summer-weighted curve: (month, share of portfolio, leases already expiring).
    [
        ("January", 5.0, 11),
        ("February", 5.0, 8),
        ("March", 7.0, 12),
        ("April", 9.0, 21),
        ("May", 11.0, 20),
        ("June", 12.0, 29),
        ("July", 12.0, 22),
        ("August", 11.0, 18),
        ("September", 9.0, 14),
        ("October", 7.0, 16),
        ("November", 6.0, 9),
        ("December", 6.0, 14),
    ]
    .into_iter()
    .map(|(month, share, projected)| {
        ExpirationAllocation::from_share(month, share, DEMO_TOTAL_UNITS, projected)
    })
    .collect()
}

fn threshold(threshold_percent: f64, adjustment: f64, kind: AdjustmentKind) -> OccupancyThresholdRule {
    OccupancyThresholdRule {
        threshold_percent,
        adjustment,
        kind,
    }
}

fn term(term_months: i32, adjustment: f64, kind: AdjustmentKind) -> LeaseTermAdjustment {
    LeaseTermAdjustment {
        term_months,
        adjustment,
        kind,
    }
}
