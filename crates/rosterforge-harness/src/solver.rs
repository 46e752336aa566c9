//! The solver seam.

use rosterforge_core::Assignment;
use serde::Deserialize;

use crate::error::{HarnessError, Result};

/// What a solver produced for one input.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverOutcome {
    Solved(Vec<Assignment>),
    /// The solver proved or declared that no roster exists.
    Infeasible { reason: String },
}

/// Produces rosters from scenario inputs.
///
/// Production rosters come from an external optimizer; implementations
/// wrap whatever process or service runs it.
pub trait RosterSolver: Send + Sync {
    /// Solves one input.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Solver`] when the solver cannot run or its
    /// output cannot be read. Infeasibility is an outcome, not an error.
    fn solve(&self, input: &serde_json::Value) -> Result<SolverOutcome>;

    fn name(&self) -> &str;
}

/// Replays recorded solver output embedded in the input.
///
/// The input carries either `{"assignments": [...]}` or
/// `{"infeasible": "reason"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaySolver;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Recorded {
    #[serde(default)]
    assignments: Option<Vec<Assignment>>,
    #[serde(default)]
    infeasible: Option<String>,
}

impl RosterSolver for ReplaySolver {
    fn solve(&self, input: &serde_json::Value) -> Result<SolverOutcome> {
        let recorded = Recorded::deserialize(input)
            .map_err(|e| HarnessError::Solver(format!("unreadable recorded output: {e}")))?;
        match (recorded.assignments, recorded.infeasible) {
            (Some(assignments), None) => Ok(SolverOutcome::Solved(assignments)),
            (None, Some(reason)) => Ok(SolverOutcome::Infeasible { reason }),
            _ => Err(HarnessError::Solver(
                "recorded output needs exactly one of `assignments` or `infeasible`".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replays_assignments() {
        let input = json!({
            "assignments": [
                {"crew_id": "ana", "role_id": "REGISTER", "start_minutes": 540, "end_minutes": 600}
            ]
        });
        assert_eq!(
            ReplaySolver.solve(&input).unwrap(),
            SolverOutcome::Solved(vec![Assignment::new("ana", "REGISTER", 540, 600)])
        );
    }

    #[test]
    fn test_replays_infeasible() {
        let input = json!({"infeasible": "not enough crew"});
        assert!(matches!(
            ReplaySolver.solve(&input).unwrap(),
            SolverOutcome::Infeasible { reason } if reason == "not enough crew"
        ));
    }

    #[test]
    fn test_rejects_ambiguous_or_malformed_input() {
        assert!(ReplaySolver.solve(&json!({})).is_err());
        assert!(ReplaySolver.solve(&json!({"assignments": [], "infeasible": "x"})).is_err());
        assert!(ReplaySolver.solve(&json!({"assignments": "nope"})).is_err());
        assert!(ReplaySolver.solve(&json!(null)).is_err());
    }
}
