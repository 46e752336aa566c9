//! Tests for domain types.

use super::*;

#[test]
fn test_store_config_rejects_inverted_hours() {
    let store = StoreConfig::new(1320, 480);
    assert!(store.validate().is_err());

    let store = StoreConfig::new(480, 480);
    assert!(store.validate().is_err());
}

#[test]
fn test_store_config_rejects_inverted_break_window() {
    let store = StoreConfig::new(480, 1320).with_break_rule(360, 240, 120);
    let err = store.validate().unwrap_err();
    assert!(err.to_string().contains("break window"));
}

#[test]
fn test_store_config_rejects_zero_slot() {
    let store = StoreConfig::new(480, 1320).with_base_slot_minutes(0);
    assert!(store.validate().is_err());
}

#[test]
fn test_slots_round_up() {
    let store = StoreConfig::new(480, 1320).with_base_slot_minutes(15);
    assert_eq!(store.slots_for(60), 4);
    assert_eq!(store.slots_for(61), 5);
    assert_eq!(store.slots_for(0), 0);
}

#[test]
fn test_role_slot_range() {
    let role = RoleConfig::new("REGISTER", AssignmentModel::Hourly).with_slot_range(Some(2), Some(4));
    assert!(!role.accepts_block_of(1));
    assert!(role.accepts_block_of(2));
    assert!(role.accepts_block_of(4));
    assert!(!role.accepts_block_of(5));

    let open = RoleConfig::new("PRODUCT", AssignmentModel::Hourly);
    assert!(open.accepts_block_of(0));
    assert!(open.accepts_block_of(100));
}

#[test]
fn test_role_rejects_inverted_slot_range() {
    let role = RoleConfig::new("REGISTER", AssignmentModel::Hourly).with_slot_range(Some(5), Some(2));
    assert!(role.validate().is_err());
}

#[test]
fn test_break_role_constructor() {
    let role = RoleConfig::break_role("BREAK");
    assert!(role.is_break_role);
    assert_eq!(role.assignment_model, AssignmentModel::IndividualHours);
}

#[test]
fn test_timing_direction_zero_is_none() {
    let pref = PreferenceDeclaration::new("p", "ana", PreferenceType::Timing).with_int_value(0);
    assert_eq!(pref.timing_direction(), None);
    let pref = PreferenceDeclaration::new("p", "ana", PreferenceType::Timing).with_int_value(3);
    assert_eq!(pref.timing_direction(), Some(TimingDirection::Late));
}

#[test]
fn test_objective_weight_includes_boost() {
    let pref = PreferenceDeclaration::new("p", "ana", PreferenceType::Consecutive)
        .with_weights(2.0, 3.0)
        .with_adaptive_boost(1.5);
    assert_eq!(pref.weight_applied(), 6.0);
    assert_eq!(pref.objective_weight(), 9.0);
}

#[test]
fn test_window_requirement_validation() {
    assert!(WindowRequirement::new("DEMO", 12, 10, 1).validate().is_err());
    assert!(WindowRequirement::new("DEMO", 20, 25, 1).validate().is_err());
    assert!(WindowRequirement::new("DEMO", 10, 12, 1).validate().is_ok());
    assert!(HourlyRequirement::new("REGISTER", 24, 1).validate().is_err());
}

#[test]
fn test_crew_shift_span_of_assignments() {
    let assignments = vec![
        Assignment::new("ana", "REGISTER", 600, 660),
        Assignment::new("ana", "PRODUCT", 540, 600),
        Assignment::new("ben", "REGISTER", 300, 900),
    ];
    let shift = CrewShift::span_of("ana", &assignments).unwrap();
    assert_eq!((shift.start_minutes, shift.end_minutes), (540, 660));
    assert!(CrewShift::span_of("cleo", &assignments).is_none());
}
