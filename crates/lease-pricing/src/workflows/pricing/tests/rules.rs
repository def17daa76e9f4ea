use super::common::*;
use crate::workflows::pricing::{
    compute_comp_price, compute_north_star_price, compute_occupancy_adjustment, rank_suggestions,
    suggest_rent_for_term, AdjustmentKind, AllocationPolicy, OccupancyThresholdRule, RiskLevel,
};
use chrono::NaiveDate;

#[test]
fn comp_price_is_weight_normalized() {
    let even = vec![
        comp("A", &[("2BR", 2000.0)], 50.0),
        comp("B", &[("2BR", 3000.0)], 50.0),
    ];
    assert_eq!(compute_comp_price("2BR", &even), Ok(2500.0));
    assert_eq!(compute_comp_price("2BR", &comps()), Ok(2050.0));
}

#[test]
fn comp_price_treats_missing_prices_as_zero_contribution() {
    // Oak Ridge carries 75% of the weight but has no 1BR price.
    assert_eq!(compute_comp_price("1BR", &comps()), Ok(362.5));
}

#[test]
fn comp_price_without_signal_is_zero() {
    assert_eq!(compute_comp_price("2BR", &[]), Ok(0.0));
    let weightless = vec![comp("A", &[("2BR", 2000.0)], 0.0)];
    assert_eq!(compute_comp_price("2BR", &weightless), Ok(0.0));
}

#[test]
fn comp_price_rejects_out_of_range_weights() {
    let negative = vec![
        comp("A", &[("1BR", 2000.0)], 60.0),
        comp("B", &[("1BR", 3000.0)], -20.0),
    ];
    let err = compute_comp_price("1BR", &negative).unwrap_err();
    assert_eq!(err.field(), "marketComps[1].weight");

    let unweighable = vec![comp("A", &[("1BR", 2000.0)], f64::NAN)];
    let err = compute_comp_price("1BR", &unweighable).unwrap_err();
    assert_eq!(err.field(), "marketComps[0].weight");
}

#[test]
fn occupancy_adjustment_rejects_impossible_occupancy() {
    let err = compute_occupancy_adjustment(1500.0, 150.0, &thresholds()).unwrap_err();
    assert_eq!(err.field(), "currentOccupancy");

    let mut rules = thresholds();
    rules[1].threshold_percent = -4.0;
    let err = compute_occupancy_adjustment(1500.0, 96.0, &rules).unwrap_err();
    assert_eq!(err.field(), "occupancyThresholds[1].thresholdPercent");
}

#[test]
fn overflowing_occupancy_adjustment_names_matched_rule() {
    let mut rules = thresholds();
    rules[0].adjustment = 1e308;
    let err = compute_occupancy_adjustment(1925.0, 96.0, &rules).unwrap_err();
    assert_eq!(err.field(), "occupancyThresholds[0].adjustment");
    // The 98% rule is not reached at 96% occupancy, so its size is irrelevant.
    let mut rules = thresholds();
    rules[1].adjustment = 1e308;
    assert_eq!(compute_occupancy_adjustment(1925.0, 96.0, &rules), Ok(96.0));
}

#[test]
fn occupancy_rule_takes_highest_threshold_not_exceeding_occupancy() {
    assert_eq!(compute_occupancy_adjustment(2000.0, 96.0, &thresholds()), Ok(100.0));
    assert_eq!(compute_occupancy_adjustment(2000.0, 98.0, &thresholds()), Ok(300.0));
    assert_eq!(compute_occupancy_adjustment(2000.0, 91.0, &thresholds()), Ok(-50.0));
    assert_eq!(compute_occupancy_adjustment(2000.0, 80.0, &thresholds()), Ok(0.0));
    assert_eq!(compute_occupancy_adjustment(2000.0, 96.0, &[]), Ok(0.0));
}

#[test]
fn percent_occupancy_adjustment_rounds_to_whole_units() {
    let rules = vec![OccupancyThresholdRule {
        threshold_percent: 0.0,
        adjustment: 3.0,
        kind: AdjustmentKind::Percent,
    }];
    // 1925 * 3% = 57.75
    assert_eq!(compute_occupancy_adjustment(1925.0, 50.0, &rules), Ok(58.0));
}

#[test]
fn north_star_is_rounded_midpoint() {
    assert_eq!(compute_north_star_price(1800.0, 2050.0), 1925.0);
    assert_eq!(compute_north_star_price(1800.0, 2051.0), 1926.0);
}

#[test]
fn suggestion_is_clamped_to_unit_range() {
    let policy = AllocationPolicy::default();
    let high = suggest_rent_for_term(
        &unit(),
        &term(3, 40.0, AdjustmentKind::Percent),
        1925.0,
        96.0,
        move_in(),
        &allocations(),
        &policy,
    )
    .expect("valid term");
    assert_eq!(high.suggested_rent, 2200.0);
    assert!(high.breakdown.was_clamped);

    let low = suggest_rent_for_term(
        &unit(),
        &term(24, -900.0, AdjustmentKind::Dollar),
        1925.0,
        0.0,
        move_in(),
        &allocations(),
        &policy,
    )
    .expect("valid term");
    assert_eq!(low.suggested_rent, 1600.0);
    assert_eq!(low.breakdown.clamped_range.min, 1600.0);
}

#[test]
fn term_percent_applies_after_occupancy_adjustment() {
    let suggestion = suggest_rent_for_term(
        &unit(),
        &term(6, 5.0, AdjustmentKind::Percent),
        1925.0,
        96.0,
        move_in(),
        &allocations(),
        &AllocationPolicy::default(),
    )
    .expect("valid term");
    assert_eq!(suggestion.breakdown.term_adjustment, 101.0);
    assert_eq!(suggestion.suggested_rent, 2122.0);
    assert_eq!(suggestion.expiration_month, "April");
    assert!(suggestion.is_allowed);
    assert_eq!(suggestion.risk_level, RiskLevel::Warning);
}

#[test]
fn full_month_blocks_term() {
    let start = NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date");
    let table = vec![allocation("May", 10, 10)];
    let suggestion = suggest_rent_for_term(
        &unit(),
        &term(5, 0.0, AdjustmentKind::Dollar),
        1925.0,
        0.0,
        start,
        &table,
        &AllocationPolicy::default(),
    )
    .expect("valid term");
    assert_eq!(suggestion.expiration_month, "May");
    assert!(!suggestion.is_allowed);
    assert_eq!(suggestion.risk_level, RiskLevel::Over);
}

#[test]
fn missing_month_is_unrestricted() {
    let suggestion = suggest_rent_for_term(
        &unit(),
        &term(12, 0.0, AdjustmentKind::Dollar),
        1925.0,
        0.0,
        move_in(),
        &[allocation("May", 1, 1)],
        &AllocationPolicy::default(),
    )
    .expect("valid term");
    assert!(suggestion.is_allowed);
    assert!(!suggestion.allocation_configured);
    assert_eq!(suggestion.risk_level, RiskLevel::Good);
}

#[test]
fn non_positive_term_is_rejected_with_field() {
    let err = suggest_rent_for_term(
        &unit(),
        &term(0, 0.0, AdjustmentKind::Dollar),
        1925.0,
        0.0,
        move_in(),
        &allocations(),
        &AllocationPolicy::default(),
    )
    .unwrap_err();
    assert_eq!(err.field(), "termMonths");
}

#[test]
fn ranking_breaks_ties_on_shorter_term() {
    let policy = AllocationPolicy::default();
    let build = |months: i32| {
        suggest_rent_for_term(
            &unit(),
            &term(months, 0.0, AdjustmentKind::Dollar),
            2000.0,
            0.0,
            move_in(),
            &[],
            &policy,
        )
        .expect("valid term")
    };

    let ranked = rank_suggestions(vec![build(12), build(6)]);
    let order: Vec<i32> = ranked.iter().map(|s| s.term_months).collect();
    assert_eq!(order, vec![6, 12]);

    let again = rank_suggestions(ranked.clone());
    assert_eq!(again, ranked);
}
