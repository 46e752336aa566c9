use super::*;
use rosterforge_test::roster::{at, hourly_run};
use rosterforge_test::store::{standard_roles, standard_store};

fn timing(crew: &str, int_value: i32) -> PreferenceDeclaration {
    PreferenceDeclaration::new("t1", crew, PreferenceType::Timing).with_int_value(int_value)
}

/// 9:00-17:00 shift with a one-hour break starting at `break_hour`.
fn day_with_break(break_hour: u32) -> Vec<Assignment> {
    vec![
        at("ana", "REGISTER", 9, break_hour),
        at("ana", "BREAK", break_hour, break_hour + 1),
        at("ana", "PRODUCT", break_hour + 1, 17),
    ]
}

#[test]
fn test_first_hour_met_and_missed() {
    let day = hourly_run("ana", 9, &["REGISTER", "PRODUCT"]);
    let pref = PreferenceDeclaration::new("f1", "ana", PreferenceType::FirstHour).with_role("REGISTER");
    assert_eq!(PreferenceCalculator::first_hour(&pref, &day).satisfaction, 1.0);

    let other = PreferenceDeclaration::new("f2", "ana", PreferenceType::FirstHour).with_role("PRODUCT");
    let result = PreferenceCalculator::first_hour(&other, &day);
    assert_eq!(result.satisfaction, 0.0);
    assert!(!result.met);
    assert_eq!(result.details.as_deref(), Some("first hour spent on REGISTER"));
}

#[test]
fn test_first_hour_without_assignments() {
    let pref = PreferenceDeclaration::new("f1", "ana", PreferenceType::FirstHour).with_role("REGISTER");
    let result = PreferenceCalculator::first_hour(&pref, &[]);
    assert_eq!(result.satisfaction, 0.0);
    assert_eq!(result.details.as_deref(), Some("no assignments"));
}

#[test]
fn test_favorite_requires_strict_maximum() {
    let pref = PreferenceDeclaration::new("v1", "ana", PreferenceType::Favorite).with_role("PRODUCT");

    let most = hourly_run("ana", 9, &["PRODUCT", "PRODUCT", "REGISTER"]);
    assert!(PreferenceCalculator::favorite(&pref, &most).met);

    let tie = hourly_run("ana", 9, &["PRODUCT", "REGISTER"]);
    assert_eq!(PreferenceCalculator::favorite(&pref, &tie).satisfaction, 0.0);

    let never = hourly_run("ana", 9, &["REGISTER"]);
    let result = PreferenceCalculator::favorite(&pref, &never);
    assert_eq!(result.satisfaction, 0.0);
    assert_eq!(result.details.as_deref(), Some("never worked PRODUCT"));
}

#[test]
fn test_favorite_ignores_other_crew() {
    let pref = PreferenceDeclaration::new("v1", "ana", PreferenceType::Favorite).with_role("PRODUCT");
    let mut day = hourly_run("ana", 9, &["PRODUCT"]);
    day.extend(hourly_run("ben", 9, &["REGISTER", "REGISTER"]));
    assert_eq!(PreferenceCalculator::favorite(&pref, &day).satisfaction, 1.0);
}

#[test]
fn test_timing_midpoint_is_half_either_way() {
    let store = standard_store();
    let roles = standard_roles();
    let calc = PreferenceCalculator::new(&store, &roles);
    // Window for a 9:00 start runs 11:00-13:00.
    let day = day_with_break(12);
    assert!((calc.timing(&timing("ana", -1), &day).satisfaction - 0.5).abs() < 1e-9);
    assert!((calc.timing(&timing("ana", 1), &day).satisfaction - 0.5).abs() < 1e-9);
}

#[test]
fn test_timing_at_window_start() {
    let store = standard_store();
    let roles = standard_roles();
    let calc = PreferenceCalculator::new(&store, &roles);
    let day = day_with_break(11);
    assert_eq!(calc.timing(&timing("ana", -1), &day).satisfaction, 1.0);
    assert_eq!(calc.timing(&timing("ana", 1), &day).satisfaction, 0.0);
}

#[test]
fn test_timing_outside_window_clamps() {
    let store = standard_store();
    let roles = standard_roles();
    let calc = PreferenceCalculator::new(&store, &roles);
    let day = day_with_break(15);
    assert_eq!(calc.timing(&timing("ana", 1), &day).satisfaction, 1.0);
    assert_eq!(calc.timing(&timing("ana", -1), &day).satisfaction, 0.0);
}

#[test]
fn test_timing_short_shift_and_missing_break() {
    let store = standard_store();
    let roles = standard_roles();
    let calc = PreferenceCalculator::new(&store, &roles);

    let short = vec![at("ana", "REGISTER", 9, 12)];
    let result = calc.timing(&timing("ana", -1), &short);
    assert_eq!(result.satisfaction, 0.0);
    assert!(result.details.unwrap().contains("shorter than the 6:00"));

    let no_break = vec![at("ana", "REGISTER", 9, 17)];
    let result = calc.timing(&timing("ana", -1), &no_break);
    assert_eq!(result.details.as_deref(), Some("no break assigned"));
}

#[test]
fn test_timing_without_direction() {
    let store = standard_store();
    let roles = standard_roles();
    let calc = PreferenceCalculator::new(&store, &roles);
    let pref = PreferenceDeclaration::new("t1", "ana", PreferenceType::Timing);
    assert_eq!(calc.timing(&pref, &day_with_break(12)).satisfaction, 0.0);
}

#[test]
fn test_consecutive_one_switch_in_three_pairs() {
    let pref = PreferenceDeclaration::new("c1", "ana", PreferenceType::Consecutive);
    let day = hourly_run("ana", 9, &["REGISTER", "REGISTER", "PRODUCT", "PRODUCT"]);
    let result = PreferenceCalculator::consecutive(&pref, &day);
    assert!((result.satisfaction - 2.0 / 3.0).abs() < 1e-9);
    assert!(result.met);
    assert_eq!(result.details.as_deref(), Some("1 switch(es) over 3 adjacent pair(s)"));
}

#[test]
fn test_consecutive_single_role_is_perfect() {
    let pref = PreferenceDeclaration::new("c1", "ana", PreferenceType::Consecutive);
    let day = hourly_run("ana", 9, &["REGISTER", "REGISTER", "REGISTER"]);
    assert_eq!(PreferenceCalculator::consecutive(&pref, &day).satisfaction, 1.0);
    assert_eq!(PreferenceCalculator::consecutive(&pref, &[]).satisfaction, 1.0);
}

#[test]
fn test_consecutive_counts_only_touching_assignments() {
    let pref = PreferenceDeclaration::new("c1", "ana", PreferenceType::Consecutive);
    let day = vec![at("ana", "REGISTER", 9, 10), at("ana", "PRODUCT", 11, 12)];
    assert_eq!(PreferenceCalculator::consecutive(&pref, &day).satisfaction, 1.0);
}

#[test]
fn test_evaluate_all_keeps_input_order() {
    let store = standard_store();
    let roles = standard_roles();
    let calc = PreferenceCalculator::new(&store, &roles);
    let prefs = vec![
        PreferenceDeclaration::new("a", "ana", PreferenceType::Consecutive),
        timing("ana", 1).with_weights(2.0, 3.0),
        PreferenceDeclaration::new("c", "ana", PreferenceType::FirstHour).with_role("REGISTER"),
    ];
    let results = calc.evaluate_all(&prefs, &day_with_break(12));
    let ids: Vec<&str> = results.iter().map(|r| r.preference_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "t1", "c"]);
    assert_eq!(results[1].weight_applied, 6.0);
    assert_eq!(results[1].preference_type, PreferenceType::Timing);
}

#[test]
fn test_result_serializes_without_empty_details() {
    let pref = PreferenceDeclaration::new("f1", "ana", PreferenceType::FirstHour).with_role("REGISTER");
    let result = PreferenceCalculator::first_hour(&pref, &[at("ana", "REGISTER", 9, 10)]);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["preference_type"], "FIRST_HOUR");
    assert_eq!(json["met"], true);
    assert!(json.get("details").is_none());
}
