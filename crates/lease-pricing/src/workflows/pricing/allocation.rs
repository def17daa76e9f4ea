use super::calendar::{month_index, MONTH_NAMES};
use super::domain::{ExpirationAllocation, PricingWarning, RiskLevel};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WARNING_RATIO: f64 = 0.9;

/// Separates the hard expiration cap from the soft early-warning band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPolicy {
    pub warning_ratio: f64,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            warning_ratio: DEFAULT_WARNING_RATIO,
        }
    }
}

impl AllocationPolicy {
    pub fn new(warning_ratio: f64) -> Self {
        Self { warning_ratio }
    }

    /// Strict less-than on the raw projected count.
    pub fn is_allowed(&self, allocation: &ExpirationAllocation) -> bool {
        allocation.current_projected_count < allocation.max_units_for_month
    }

    pub fn risk_level(&self, allocation: &ExpirationAllocation) -> RiskLevel {
        let current = allocation.current_projected_count;
        let cap = allocation.max_units_for_month;
        if current >= cap {
            RiskLevel::Over
        } else if f64::from(current) > f64::from(cap) * self.warning_ratio {
            RiskLevel::Warning
        } else {
            RiskLevel::Good
        }
    }
}

impl ExpirationAllocation {
    /// Derive the monthly cap from a share of the portfolio.
    pub fn from_share(
        month: impl Into<String>,
        allocated_percent: f64,
        total_units: u32,
        current_projected_count: u32,
    ) -> Self {
        let cap = (f64::from(total_units) * allocated_percent / 100.0)
            .round()
            .clamp(0.0, u32::MAX as f64) as u32;

        Self {
            month: month.into(),
            allocated_percent,
            max_units_for_month: cap,
            current_projected_count,
        }
    }

    pub fn month_index(&self) -> Option<u32> {
        month_index(&self.month)
    }
}

/// First entry whose label resolves to `month0` (zero-based).
pub fn find_allocation(
    allocations: &[ExpirationAllocation],
    month0: u32,
) -> Option<&ExpirationAllocation> {
    allocations
        .iter()
        .find(|allocation| allocation.month_index() == Some(month0))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationCurveEntry {
    pub month: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_index: Option<u32>,
    pub allocated_percent: f64,
    pub max_units_for_month: u32,
    pub current_projected_count: u32,
    pub remaining_capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<f64>,
    pub risk_level: RiskLevel,
    pub is_allowed: bool,
}

/// Month-by-month view of the expiration allocation table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationCurve {
    pub entries: Vec<ExpirationCurveEntry>,
    pub allocated_percent_total: f64,
    pub total_capacity: u32,
    pub total_projected: u32,
    pub months_at_warning: usize,
    pub months_over: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PricingWarning>,
}

const PERCENT_TOLERANCE: f64 = 0.5;

impl ExpirationCurve {
    pub fn evaluate(allocations: &[ExpirationAllocation], policy: &AllocationPolicy) -> Self {
        let mut warnings = Vec::new();
        let mut seen = [false; 12];

        let mut entries: Vec<ExpirationCurveEntry> = allocations
            .iter()
            .map(|allocation| {
                let index = allocation.month_index();
                match index {
                    Some(month0) if seen[month0 as usize] => {
                        warnings.push(PricingWarning::configuration_gap(
                            None,
                            format!(
                                "duplicate allocation entry '{}'; pricing uses the first {} entry",
                                allocation.month, MONTH_NAMES[month0 as usize]
                            ),
                        ));
                    }
                    Some(month0) => seen[month0 as usize] = true,
                    None => warnings.push(PricingWarning::configuration_gap(
                        None,
                        format!("allocation month '{}' is not a calendar month", allocation.month),
                    )),
                }

                let cap = allocation.max_units_for_month;
                let current = allocation.current_projected_count;
                let utilization = if cap == 0 {
                    None
                } else {
                    Some(f64::from(current) / f64::from(cap))
                };

                ExpirationCurveEntry {
                    month: allocation.month.clone(),
                    month_index: index,
                    allocated_percent: allocation.allocated_percent,
                    max_units_for_month: cap,
                    current_projected_count: current,
                    remaining_capacity: cap.saturating_sub(current),
                    utilization,
                    risk_level: policy.risk_level(allocation),
                    is_allowed: policy.is_allowed(allocation),
                }
            })
            .collect();

        // Calendar order; unknown labels trail in input order.
        entries.sort_by_key(|entry| entry.month_index.unwrap_or(u32::MAX));

        if allocations.is_empty() {
            warnings.push(PricingWarning::configuration_gap(
                None,
                "expiration allocation table is empty; every term is unrestricted",
            ));
        } else {
            for (month0, covered) in seen.iter().enumerate() {
                if !covered {
                    warnings.push(PricingWarning::configuration_gap(
                        None,
                        format!(
                            "no allocation configured for {}; expirations there are unrestricted",
                            MONTH_NAMES[month0]
                        ),
                    ));
                }
            }
        }

        let allocated_percent_total: f64 = entries.iter().map(|entry| entry.allocated_percent).sum();
        if !allocations.is_empty() && (allocated_percent_total - 100.0).abs() > PERCENT_TOLERANCE {
            warnings.push(PricingWarning::configuration_gap(
                None,
                format!("allocated percentages sum to {allocated_percent_total:.1}%, expected 100%"),
            ));
        }

        let total_capacity = entries
            .iter()
            .fold(0u32, |acc, entry| acc.saturating_add(entry.max_units_for_month));
        let total_projected = entries
            .iter()
            .fold(0u32, |acc, entry| acc.saturating_add(entry.current_projected_count));
        let months_at_warning = entries
            .iter()
            .filter(|entry| entry.risk_level == RiskLevel::Warning)
            .count();
        let months_over = entries
            .iter()
            .filter(|entry| entry.risk_level == RiskLevel::Over)
            .count();

        Self {
            entries,
            allocated_percent_total,
            total_capacity,
            total_projected,
            months_at_warning,
            months_over,
            warnings,
        }
    }

    pub fn entry(&self, month_label: &str) -> Option<&ExpirationCurveEntry> {
        let month0 = month_index(month_label)?;
        self.entries
            .iter()
            .find(|entry| entry.month_index == Some(month0))
    }
}
