use super::super::allocation::{find_allocation, AllocationPolicy};
use super::super::calendar::{add_calendar_months, month_label};
use super::super::domain::{
    ExpirationAllocation, LeaseTermAdjustment, MarketComp, OccupancyThresholdRule, PriceBreakdown,
    PricingError, PricingSuggestion, RentRange, RiskLevel, UnitTypeProfile,
};
use super::validation::{
    ensure_finite, validate_comps, validate_occupancy, validate_term, validate_threshold_rules,
    validate_unit_profile,
};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Weighted average of comp prices for `unit_type`.
///
/// Weights are normalized by their sum over the supplied comps. An empty set,
/// or one whose weights sum to zero, carries no pricing signal and yields 0.
pub fn compute_comp_price(unit_type: &str, comps: &[MarketComp]) -> Result<f64, PricingError> {
    validate_comps(comps)?;

    let total_weight: f64 = comps.iter().map(|comp| comp.weight).sum();
    if total_weight <= 0.0 {
        return Ok(0.0);
    }

    Ok(comps
        .iter()
        .map(|comp| comp.price_for(unit_type) * (comp.weight / total_weight))
        .sum())
}

/// Adjustment from the highest threshold at or below `current_occupancy`.
pub fn compute_occupancy_adjustment(
    base_price: f64,
    current_occupancy: f64,
    rules: &[OccupancyThresholdRule],
) -> Result<f64, PricingError> {
    ensure_finite("basePrice", base_price)?;
    validate_occupancy(current_occupancy)?;
    validate_threshold_rules(rules)?;

    let mut ordered: Vec<(usize, &OccupancyThresholdRule)> = rules.iter().enumerate().collect();
    ordered.sort_by(|(_, a), (_, b)| b.threshold_percent.total_cmp(&a.threshold_percent));

    let Some((index, rule)) = ordered
        .into_iter()
        .find(|(_, rule)| rule.threshold_percent <= current_occupancy)
    else {
        return Ok(0.0);
    };

    let adjustment = rule.kind.apply(base_price, rule.adjustment);
    ensure_finite(&format!("occupancyThresholds[{index}].adjustment"), adjustment)?;
    Ok(adjustment)
}

/// Midpoint of internal base rent and market comp price, rounded to whole
/// currency units. A plain blend, not a calibrated market model.
pub fn compute_north_star_price(base_rent: f64, comp_price: f64) -> f64 {
    ((base_rent + comp_price) / 2.0).round()
}

pub fn suggest_rent_for_term(
    unit: &UnitTypeProfile,
    term: &LeaseTermAdjustment,
    north_star_price: f64,
    occupancy_adjustment: f64,
    move_in_date: NaiveDate,
    allocations: &[ExpirationAllocation],
    policy: &AllocationPolicy,
) -> Result<PricingSuggestion, PricingError> {
    validate_unit_profile(unit)?;
    let months = validate_term(term)?;
    ensure_finite("northStarPrice", north_star_price)?;
    ensure_finite("occupancyAdjustment", occupancy_adjustment)?;

    let pre_term_rent = north_star_price + occupancy_adjustment;
    let term_adjustment = term.kind.apply(pre_term_rent, term.adjustment);
    let raw_rent = pre_term_rent + term_adjustment;
    let suggested_rent = raw_rent.clamp(unit.min_rent, unit.max_rent);

    let expiration_date = add_calendar_months(move_in_date, months).ok_or_else(|| {
        PricingError::invalid(
            "termMonths",
            format!("{months} months from {move_in_date} is outside the supported calendar"),
        )
    })?;

    let allocation = find_allocation(allocations, expiration_date.month0());
    let (is_allowed, risk_level) = match allocation {
        Some(allocation) => (policy.is_allowed(allocation), policy.risk_level(allocation)),
        None => (true, RiskLevel::Good),
    };

    Ok(PricingSuggestion {
        term_months: term.term_months,
        suggested_rent,
        expiration_month: month_label(expiration_date).to_string(),
        expiration_date,
        is_allowed,
        risk_level,
        allocation_configured: allocation.is_some(),
        breakdown: PriceBreakdown {
            north_star_price,
            comp_price: None,
            base_rent: unit.base_rent,
            occupancy_adjustment,
            term_adjustment,
            clamped_range: RentRange {
                min: unit.min_rent,
                max: unit.max_rent,
            },
            was_clamped: suggested_rent != raw_rent,
        },
    })
}

/// Highest rent first; equal rents surface the shorter term first.
pub fn rank_suggestions(mut suggestions: Vec<PricingSuggestion>) -> Vec<PricingSuggestion> {
    suggestions.sort_by(compare_suggestions);
    suggestions
}

fn compare_suggestions(a: &PricingSuggestion, b: &PricingSuggestion) -> Ordering {
    b.suggested_rent
        .total_cmp(&a.suggested_rent)
        .then_with(|| a.term_months.cmp(&b.term_months))
}
