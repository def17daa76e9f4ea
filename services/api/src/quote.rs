use crate::infra::{load_pricing_request, parse_date, parse_percent, read_json};
use chrono::NaiveDate;
use clap::Args;
use lease_pricing::config::AppConfig;
use lease_pricing::error::AppError;
use lease_pricing::workflows::pricing::{
    ExpirationCurve, ExpirationCurveRequest, PricingEngine, PricingResponse,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SuggestArgs {
    /// Pricing snapshot (JSON) with unit type, comps, thresholds, terms and allocation
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Optional comp survey CSV appended to the snapshot's comps
    #[arg(long)]
    pub(crate) comps_csv: Option<PathBuf>,
    /// Override the snapshot's move-in date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) move_in: Option<NaiveDate>,
    /// Override the snapshot's current occupancy (0-100)
    #[arg(long, value_parser = parse_percent)]
    pub(crate) occupancy: Option<f64>,
    /// Print the response as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CurveArgs {
    /// JSON file carrying an `expirationAllocation` array
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Print the curve as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

fn engine_from_env() -> Result<PricingEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(PricingEngine::from_config(&config.pricing))
}

pub(crate) fn run_suggest(args: SuggestArgs) -> Result<(), AppError> {
    let SuggestArgs {
        request,
        comps_csv,
        move_in,
        occupancy,
        json,
    } = args;

    let mut request = load_pricing_request(&request, comps_csv.as_deref())?;
    if let Some(move_in) = move_in {
        request.move_in_date = move_in;
    }
    if let Some(occupancy) = occupancy {
        request.current_occupancy = occupancy;
    }

    let response = engine_from_env()?.quote(&request)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        render_quote(&response);
    }
    Ok(())
}

pub(crate) fn run_curve(args: CurveArgs) -> Result<(), AppError> {
    let request: ExpirationCurveRequest = read_json(&args.request)?;
    let curve = engine_from_env()?.expiration_curve(&request.expiration_allocation);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&curve)?);
    } else {
        render_curve(&curve);
    }
    Ok(())
}

pub(crate) fn render_quote(response: &PricingResponse) {
    println!(
        "Pricing for {} moving in {}",
        response.unit_type, response.move_in_date
    );
    println!(
        "Comp price {:.2} | North Star {:.0} | occupancy adjustment {:+.0}",
        response.comp_price, response.north_star_price, response.occupancy_adjustment
    );

    if response.suggestions.is_empty() {
        println!("\nSuggestions: none");
    } else {
        println!("\nSuggestions (highest rent first)");
        for suggestion in &response.suggestions {
            let clamp_note = if suggestion.breakdown.was_clamped {
                " (clamped)"
            } else {
                ""
            };
            let availability = if suggestion.is_allowed {
                "available"
            } else {
                "blocked"
            };
            println!(
                "- {:>2} months: {:.0}{} | term {:+.0} | expires {} ({}) | {} | risk {}",
                suggestion.term_months,
                suggestion.suggested_rent,
                clamp_note,
                suggestion.breakdown.term_adjustment,
                suggestion.expiration_month,
                suggestion.expiration_date,
                availability,
                suggestion.risk_level.label()
            );
        }
    }

    match response.best_allowed() {
        Some(best) => println!(
            "\nRecommended: {} months at {:.0}",
            best.term_months, best.suggested_rent
        ),
        None => println!("\nRecommended: no term clears the expiration allocation"),
    }

    if !response.excluded.is_empty() {
        println!("\nExcluded terms");
        for excluded in &response.excluded {
            println!(
                "- {} months ({}): {}",
                excluded.term_months, excluded.field, excluded.reason
            );
        }
    }

    if !response.warnings.is_empty() {
        println!("\nWarnings");
        for warning in &response.warnings {
            println!("- {}", warning.detail);
        }
    }
}

pub(crate) fn render_curve(curve: &ExpirationCurve) {
    println!("Expiration curve");
    for entry in &curve.entries {
        let utilization = entry
            .utilization
            .map(|ratio| format!("{:.0}%", ratio * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "- {:<9} {:>5.1}% | {:>3}/{:<3} projected | {} used | {} left | {}",
            entry.month,
            entry.allocated_percent,
            entry.current_projected_count,
            entry.max_units_for_month,
            utilization,
            entry.remaining_capacity,
            entry.risk_level.label()
        );
    }
    println!(
        "Totals: {:.1}% allocated | {}/{} projected | {} month(s) at warning | {} over",
        curve.allocated_percent_total,
        curve.total_projected,
        curve.total_capacity,
        curve.months_at_warning,
        curve.months_over
    );

    if !curve.warnings.is_empty() {
        println!("\nWarnings");
        for warning in &curve.warnings {
            println!("- {}", warning.detail);
        }
    }
}
