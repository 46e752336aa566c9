//! Constraint scenario harness.
//!
//! A scenario pairs a solver input with the outcome expected from it: the
//! runner hands the input to a [`RosterSolver`], validates whatever roster
//! comes back against every rule of the store, and checks the scenario's
//! explicit expectations on top.
//!
//! ```
//! use rosterforge_harness::{ReplaySolver, Scenario, ScenarioRunner};
//!
//! let scenario = Scenario::from_json_str(r#"{
//!     "id": "register-9am",
//!     "constraintType": "HOURLY_COVERAGE",
//!     "config": {
//!         "roles": [{ "code": "REGISTER", "assignment_model": "HOURLY" }],
//!         "hourly_requirements": [{ "role_id": "REGISTER", "hour": 9, "required_per_hour": 1 }]
//!     },
//!     "solverInput": {
//!         "assignments": [
//!             { "crew_id": "ana", "role_id": "REGISTER", "start_minutes": 540, "end_minutes": 600 }
//!         ]
//!     },
//!     "expectations": {
//!         "shouldSucceed": true,
//!         "requiredAssignments": [{ "crewId": "ana", "role": "REGISTER", "minSlots": 1 }]
//!     }
//! }"#).unwrap();
//!
//! let solver = ReplaySolver;
//! let runner = ScenarioRunner::new(&solver);
//! let report = runner.run(&scenario).unwrap();
//! assert!(report.passed, "{:?}", report.failures);
//! ```

mod error;
mod runner;
mod scenario;
mod solver;

pub use error::{HarnessError, Result};
pub use runner::{ScenarioReport, ScenarioRunner, SuiteReport};
pub use scenario::{Expectations, RequiredAssignment, Scenario};
pub use solver::{ReplaySolver, RosterSolver, SolverOutcome};
