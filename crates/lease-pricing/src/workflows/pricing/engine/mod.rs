mod rules;
pub(crate) mod validation;

pub use rules::{
    compute_comp_price, compute_north_star_price, compute_occupancy_adjustment, rank_suggestions,
    suggest_rent_for_term,
};

use super::allocation::{AllocationPolicy, ExpirationCurve};
use super::domain::{
    ExcludedTerm, ExpirationAllocation, PricingError, PricingWarning, WarningKind,
};
use super::request::{PricingRequest, PricingResponse};
use crate::config::PricingConfig;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Stateless engine turning a pricing snapshot into ranked suggestions.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    policy: AllocationPolicy,
}

impl PricingEngine {
    pub fn new(policy: AllocationPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &PricingConfig) -> Self {
        Self::new(AllocationPolicy::new(config.risk_warning_ratio))
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    pub fn quote(&self, request: &PricingRequest) -> Result<PricingResponse, PricingError> {
        validation::validate_request(request)?;

        let unit = &request.unit_type;
        let mut warnings = Vec::new();

        let total_weight: f64 = request.market_comps.iter().map(|comp| comp.weight).sum();
        if total_weight <= 0.0 {
            warn!(unit_type = %unit.type_name, "market comps carry zero total weight");
            warnings.push(PricingWarning {
                kind: WarningKind::ZeroCompWeight,
                term_months: None,
                detail: "market comps carry zero total weight; comp price treated as 0".to_string(),
            });
        }

        let comp_price = compute_comp_price(&unit.type_name, &request.market_comps)?;
        let north_star_price = compute_north_star_price(unit.base_rent, comp_price);
        let occupancy_adjustment = compute_occupancy_adjustment(
            north_star_price,
            request.current_occupancy,
            &request.occupancy_thresholds,
        )?;
        debug!(
            unit_type = %unit.type_name,
            comp_price,
            north_star_price,
            occupancy_adjustment,
            "resolved reference prices"
        );

        let mut seen_terms = BTreeSet::new();
        let mut suggestions = Vec::with_capacity(request.lease_term_adjustments.len());
        let mut excluded = Vec::new();

        for term in &request.lease_term_adjustments {
            if seen_terms.contains(&term.term_months) {
                excluded.push(ExcludedTerm {
                    term_months: term.term_months,
                    field: "termMonths".to_string(),
                    reason: format!(
                        "duplicate {}-month term; the first entry is priced",
                        term.term_months
                    ),
                });
                continue;
            }

            let suggestion = match suggest_rent_for_term(
                unit,
                term,
                north_star_price,
                occupancy_adjustment,
                request.move_in_date,
                &request.expiration_allocation,
                &self.policy,
            ) {
                Ok(suggestion) => suggestion,
                Err(PricingError::Validation { field, reason }) => {
                    debug!(term_months = term.term_months, %field, %reason, "term excluded");
                    excluded.push(ExcludedTerm {
                        term_months: term.term_months,
                        field,
                        reason,
                    });
                    continue;
                }
            };
            seen_terms.insert(term.term_months);

            if !suggestion.allocation_configured {
                warn!(
                    term_months = term.term_months,
                    month = %suggestion.expiration_month,
                    "no expiration allocation for month; treating as unrestricted"
                );
                warnings.push(PricingWarning::configuration_gap(
                    Some(term.term_months),
                    format!(
                        "no expiration allocation for {}; term treated as unrestricted",
                        suggestion.expiration_month
                    ),
                ));
            }

            let mut suggestion = suggestion;
            suggestion.breakdown.comp_price = Some(comp_price);
            suggestions.push(suggestion);
        }

        let suggestions = rank_suggestions(suggestions);
        info!(
            unit_type = %unit.type_name,
            move_in = %request.move_in_date,
            suggestions = suggestions.len(),
            excluded = excluded.len(),
            warnings = warnings.len(),
            "pricing quote computed"
        );

        Ok(PricingResponse {
            unit_type: unit.type_name.clone(),
            move_in_date: request.move_in_date,
            comp_price,
            north_star_price,
            occupancy_adjustment,
            suggestions,
            excluded,
            warnings,
        })
    }

    pub fn expiration_curve(&self, allocations: &[ExpirationAllocation]) -> ExpirationCurve {
        let curve = ExpirationCurve::evaluate(allocations, &self.policy);
        debug!(
            months = curve.entries.len(),
            months_over = curve.months_over,
            months_at_warning = curve.months_at_warning,
            "expiration curve evaluated"
        );
        curve
    }
}
