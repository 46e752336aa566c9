use super::*;
use crate::scenario::Expectations;
use crate::HarnessError;
use rosterforge_core::HourlyRequirement;
use rosterforge_test::roster::{at, hourly_run};
use rosterforge_test::store::{standard_roles, standard_store};

/// Returns the same outcome for every input.
struct StubSolver(std::result::Result<SolverOutcome, String>);

impl RosterSolver for StubSolver {
    fn solve(&self, _input: &serde_json::Value) -> Result<SolverOutcome> {
        self.0.clone().map_err(HarnessError::Solver)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn solved(assignments: Vec<Assignment>) -> StubSolver {
    StubSolver(Ok(SolverOutcome::Solved(assignments)))
}

fn base_config() -> EngineConfig {
    let mut config = EngineConfig::new()
        .with_store(standard_store())
        .with_hourly_requirement(HourlyRequirement::new("REGISTER", 9, 1));
    config.roles = standard_roles();
    config
}

fn scenario(id: &str, should_succeed: bool, required: Vec<RequiredAssignment>) -> Scenario {
    Scenario {
        id: id.to_string(),
        constraint_type: "HOURLY_COVERAGE".to_string(),
        description: None,
        config: None,
        solver_input: serde_json::Value::Null,
        expectations: Expectations {
            should_succeed,
            required_assignments: required,
        },
    }
}

fn required(crew: &str, role: &str, min: Option<u32>, max: Option<u32>) -> RequiredAssignment {
    RequiredAssignment {
        crew_id: crew.to_string(),
        role: role.to_string(),
        min_slots: min,
        max_slots: max,
    }
}

#[test]
fn test_valid_roster_passes() {
    let solver = solved(hourly_run("ana", 9, &["REGISTER", "PRODUCT", "PRODUCT"]));
    let runner = ScenarioRunner::with_config(&solver, base_config());
    let report = runner
        .run(&scenario("ok", true, vec![required("ana", "PRODUCT", Some(2), Some(2))]))
        .unwrap();
    assert!(report.solved);
    assert!(report.succeeded);
    assert!(report.passed, "{:?}", report.failures);
}

#[test]
fn test_expected_failure_passes() {
    let solver = solved(vec![at("ana", "REGISTER", 9, 10), at("ben", "REGISTER", 9, 10)]);
    let runner = ScenarioRunner::with_config(&solver, base_config());
    let report = runner.run(&scenario("overstaffed", false, vec![])).unwrap();
    assert!(!report.succeeded);
    assert!(report.passed);
    assert_eq!(report.violations.len(), 1);
    assert!(report.violations[0].contains("overstaffed"));
}

#[test]
fn test_unexpected_success_fails() {
    let solver = solved(vec![at("ana", "REGISTER", 9, 10)]);
    let runner = ScenarioRunner::with_config(&solver, base_config());
    let report = runner.run(&scenario("too-easy", false, vec![])).unwrap();
    assert!(report.succeeded);
    assert!(!report.passed);
    assert_eq!(
        report.failures,
        vec!["expected the scenario to fail, but it succeeded"]
    );
}

#[test]
fn test_required_assignment_checks() {
    let solver = solved(vec![at("ana", "REGISTER", 9, 10), at("ana", "PRODUCT", 10, 13)]);
    let runner = ScenarioRunner::with_config(&solver, base_config());
    let report = runner
        .run(&scenario(
            "required",
            true,
            vec![
                required("ana", "PRODUCT", None, Some(2)),
                required("ben", "REGISTER", None, None),
                required("ana", "REGISTER", Some(2), None),
            ],
        ))
        .unwrap();
    assert!(!report.passed);
    assert!(report.violations.is_empty());
    assert_eq!(
        report.failures,
        vec![
            "ana has 3 slot(s) on PRODUCT, expected at most 2",
            "ben was not assigned to REGISTER",
            "ana has 1 slot(s) on REGISTER, expected at least 2",
        ]
    );
}

#[test]
fn test_infeasible_outcome() {
    let solver = StubSolver(Ok(SolverOutcome::Infeasible {
        reason: "no crew".to_string(),
    }));
    let runner = ScenarioRunner::with_config(&solver, base_config());

    let expected = runner.run(&scenario("infeasible", false, vec![])).unwrap();
    assert!(!expected.solved);
    assert!(expected.passed);

    let unexpected = runner.run(&scenario("infeasible", true, vec![])).unwrap();
    assert!(!unexpected.passed);
    assert_eq!(unexpected.failures, vec!["solver reported infeasible: no crew"]);
}

#[test]
fn test_scenario_config_overrides_base() {
    let solver = solved(vec![at("ana", "REGISTER", 9, 10)]);
    let runner = ScenarioRunner::with_config(&solver, base_config());
    let mut own = scenario("override", true, vec![]);
    let mut config = base_config();
    config.hourly_requirements = vec![HourlyRequirement::new("REGISTER", 9, 2)];
    own.config = Some(config);
    let report = runner.run(&own).unwrap();
    assert!(!report.passed);
    assert!(report.violations[0].contains("understaffed"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let solver = solved(vec![]);
    let mut config = base_config();
    config.hourly_requirements = vec![HourlyRequirement::new("CAFE", 9, 1)];
    let runner = ScenarioRunner::with_config(&solver, config);
    assert!(matches!(
        runner.run(&scenario("bad", true, vec![])),
        Err(HarnessError::Config(_))
    ));
}

#[test]
fn test_unknown_role_in_roster_is_an_error() {
    let solver = solved(vec![at("ana", "JANITOR", 9, 10)]);
    let runner = ScenarioRunner::with_config(&solver, base_config());
    assert!(matches!(
        runner.run(&scenario("janitor", true, vec![])),
        Err(HarnessError::Roster(_))
    ));
}

#[test]
fn test_run_all_counts_errors_as_failures() {
    let failing = StubSolver(Err("process crashed".to_string()));
    let runner = ScenarioRunner::with_config(&failing, base_config());
    let suite = runner.run_all(&[scenario("a", true, vec![]), scenario("b", false, vec![])]);
    assert_eq!(suite.failed, 2);
    assert!(!suite.all_passed());
    assert_eq!(suite.failed_ids(), vec!["a", "b"]);
    assert_eq!(suite.reports[0].failures, vec!["Solver error: process crashed"]);

    let solver = solved(vec![at("ana", "REGISTER", 9, 10)]);
    let runner = ScenarioRunner::with_config(&solver, base_config());
    let suite = runner.run_all(&[scenario("a", true, vec![]), scenario("b", false, vec![])]);
    assert_eq!((suite.passed, suite.failed), (1, 1));
    assert_eq!(suite.failed_ids(), vec!["b"]);
}
