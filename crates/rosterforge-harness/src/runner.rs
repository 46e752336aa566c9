//! Scenario execution.

use std::time::Instant;

use rosterforge_config::EngineConfig;
use rosterforge_core::{Assignment, StoreConfig};
use rosterforge_rules::RosterValidator;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::scenario::{RequiredAssignment, Scenario};
use crate::solver::{RosterSolver, SolverOutcome};

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub id: String,
    pub constraint_type: String,
    /// The solver returned a roster (as opposed to declaring infeasibility).
    pub solved: bool,
    /// The roster passed every rule and every required assignment.
    pub succeeded: bool,
    /// `succeeded` matches the scenario's `shouldSucceed`.
    pub passed: bool,
    /// Rule violations of the returned roster.
    pub violations: Vec<String>,
    /// Why the scenario did not pass, or why the roster did not succeed.
    pub failures: Vec<String>,
    pub duration_ms: u64,
}

/// Outcomes of a batch of scenarios.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuiteReport {
    pub reports: Vec<ScenarioReport>,
    pub passed: usize,
    pub failed: usize,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failed_ids(&self) -> Vec<&str> {
        self.reports
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.id.as_str())
            .collect()
    }
}

/// Runs scenarios through a solver and checks what comes back.
pub struct ScenarioRunner<'a> {
    solver: &'a dyn RosterSolver,
    base: EngineConfig,
}

impl std::fmt::Debug for ScenarioRunner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioRunner")
            .field("solver", &self.solver.name())
            .field("base", &self.base)
            .finish()
    }
}

/// Slots a crew member worked on a role, and whether the count fits.
fn required_assignment_failure(
    req: &RequiredAssignment,
    store: &StoreConfig,
    assignments: &[Assignment],
) -> Option<String> {
    let minutes: u32 = assignments
        .iter()
        .filter(|a| a.crew_id == req.crew_id && a.role_id == req.role)
        .map(Assignment::duration)
        .sum();
    if minutes == 0 {
        return Some(format!("{} was not assigned to {}", req.crew_id, req.role));
    }
    let slots = store.slots_for(minutes);
    if let Some(min) = req.min_slots.filter(|&min| slots < min) {
        return Some(format!(
            "{} has {slots} slot(s) on {}, expected at least {min}",
            req.crew_id, req.role
        ));
    }
    if let Some(max) = req.max_slots.filter(|&max| slots > max) {
        return Some(format!(
            "{} has {slots} slot(s) on {}, expected at most {max}",
            req.crew_id, req.role
        ));
    }
    None
}

impl<'a> ScenarioRunner<'a> {
    /// Creates a runner with a default base configuration.
    pub fn new(solver: &'a dyn RosterSolver) -> Self {
        Self::with_config(solver, EngineConfig::default())
    }

    /// Creates a runner whose configuration applies to scenarios that do
    /// not carry their own.
    pub fn with_config(solver: &'a dyn RosterSolver, base: EngineConfig) -> Self {
        Self { solver, base }
    }

    /// Runs one scenario.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration or a solver failure. A
    /// roster that breaks rules is reported, not returned as an error.
    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioReport> {
        let started = Instant::now();
        let config = scenario.config.as_ref().unwrap_or(&self.base);
        config.validate()?;
        let validator = RosterValidator::new(
            &config.store,
            &config.roles,
            &config.hourly_requirements,
            &config.window_requirements,
        )?;

        let mut violations = Vec::new();
        let mut failures = Vec::new();
        let solved = match self.solver.solve(&scenario.solver_input)? {
            SolverOutcome::Solved(assignments) => {
                violations = validator.validate(&assignments)?.violations;
                failures.extend(violations.iter().cloned());
                failures.extend(
                    scenario
                        .expectations
                        .required_assignments
                        .iter()
                        .filter_map(|req| required_assignment_failure(req, &config.store, &assignments)),
                );
                true
            }
            SolverOutcome::Infeasible { reason } => {
                failures.push(format!("solver reported infeasible: {reason}"));
                false
            }
        };

        let succeeded = solved && failures.is_empty();
        let passed = succeeded == scenario.expectations.should_succeed;
        if !passed && succeeded {
            failures.push("expected the scenario to fail, but it succeeded".to_string());
        }

        let report = ScenarioReport {
            id: scenario.id.clone(),
            constraint_type: scenario.constraint_type.clone(),
            solved,
            succeeded,
            passed,
            violations,
            failures,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            event = "scenario_end",
            scenario = %report.id,
            constraint = %report.constraint_type,
            solver = self.solver.name(),
            passed = report.passed,
            violations = report.violations.len(),
        );
        Ok(report)
    }

    /// Runs every scenario. A scenario that errors counts as failed, with
    /// the error as its failure.
    pub fn run_all(&self, scenarios: &[Scenario]) -> SuiteReport {
        let mut suite = SuiteReport::default();
        for scenario in scenarios {
            let report = self.run(scenario).unwrap_or_else(|err| {
                warn!(event = "scenario_error", scenario = %scenario.id, error = %err);
                ScenarioReport {
                    id: scenario.id.clone(),
                    constraint_type: scenario.constraint_type.clone(),
                    solved: false,
                    succeeded: false,
                    passed: false,
                    violations: Vec::new(),
                    failures: vec![err.to_string()],
                    duration_ms: 0,
                }
            });
            if report.passed {
                suite.passed += 1;
            } else {
                suite.failed += 1;
            }
            suite.reports.push(report);
        }
        suite
    }
}

#[cfg(test)]
mod tests;
