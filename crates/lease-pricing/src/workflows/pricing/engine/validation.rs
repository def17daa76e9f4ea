use super::super::domain::{
    LeaseTermAdjustment, MarketComp, OccupancyThresholdRule, PricingError, UnitTypeProfile,
};
use super::super::request::PricingRequest;

const MAX_COMP_WEIGHT: f64 = 100.0;

pub(crate) fn validate_request(request: &PricingRequest) -> Result<(), PricingError> {
    validate_occupancy(request.current_occupancy)?;
    validate_unit_profile(&request.unit_type)?;
    if request.market_comps.is_empty() {
        return Err(PricingError::invalid(
            "marketComps",
            "at least one comp is required to price a unit",
        ));
    }
    validate_comps(&request.market_comps)?;
    validate_threshold_rules(&request.occupancy_thresholds)?;
    Ok(())
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(field, "must be a finite number"))
    }
}

pub(crate) fn validate_occupancy(current_occupancy: f64) -> Result<(), PricingError> {
    ensure_finite("currentOccupancy", current_occupancy)?;
    if !(0.0..=100.0).contains(&current_occupancy) {
        return Err(PricingError::invalid(
            "currentOccupancy",
            format!("{current_occupancy} is outside 0-100"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_unit_profile(unit: &UnitTypeProfile) -> Result<(), PricingError> {
    if unit.type_name.trim().is_empty() {
        return Err(PricingError::invalid("unitType.typeName", "must not be blank"));
    }

    for (field, value) in [
        ("unitType.baseRent", unit.base_rent),
        ("unitType.minRent", unit.min_rent),
        ("unitType.maxRent", unit.max_rent),
    ] {
        ensure_finite(field, value)?;
        if value < 0.0 {
            return Err(PricingError::invalid(field, "must not be negative"));
        }
    }

    if unit.min_rent > unit.max_rent {
        return Err(PricingError::invalid(
            "unitType.minRent",
            format!(
                "min rent {} exceeds max rent {}",
                unit.min_rent, unit.max_rent
            ),
        ));
    }

    if unit.base_rent < unit.min_rent || unit.base_rent > unit.max_rent {
        return Err(PricingError::invalid(
            "unitType.baseRent",
            format!(
                "base rent {} must sit within {}-{}",
                unit.base_rent, unit.min_rent, unit.max_rent
            ),
        ));
    }

    Ok(())
}

/// Weights must be finite and within 0-100. An empty set is accepted.
pub(crate) fn validate_comps(comps: &[MarketComp]) -> Result<(), PricingError> {
    for (index, comp) in comps.iter().enumerate() {
        let field = format!("marketComps[{index}].weight");
        ensure_finite(&field, comp.weight)?;
        if !(0.0..=MAX_COMP_WEIGHT).contains(&comp.weight) {
            return Err(PricingError::invalid(
                field,
                format!(
                    "weight {} for {} is outside 0-100",
                    comp.weight, comp.property_name
                ),
            ));
        }
    }

    Ok(())
}

pub(crate) fn validate_threshold_rules(rules: &[OccupancyThresholdRule]) -> Result<(), PricingError> {
    for (index, rule) in rules.iter().enumerate() {
        let threshold_field = format!("occupancyThresholds[{index}].thresholdPercent");
        ensure_finite(&threshold_field, rule.threshold_percent)?;
        if !(0.0..=100.0).contains(&rule.threshold_percent) {
            return Err(PricingError::invalid(
                threshold_field,
                format!("{} is outside 0-100", rule.threshold_percent),
            ));
        }
        ensure_finite(
            &format!("occupancyThresholds[{index}].adjustment"),
            rule.adjustment,
        )?;
    }
    Ok(())
}

/// Returns the term length as an unsigned month count.
pub(crate) fn validate_term(term: &LeaseTermAdjustment) -> Result<u32, PricingError> {
    if term.term_months <= 0 {
        return Err(PricingError::invalid(
            "termMonths",
            format!("term of {} months must be positive", term.term_months),
        ));
    }
    ensure_finite("adjustment", term.adjustment)?;
    Ok(term.term_months as u32)
}
