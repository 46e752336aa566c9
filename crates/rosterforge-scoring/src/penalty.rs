//! Objective-style role-switch penalty.
//!
//! Mirrors the switch-aversion term an external optimizer minimizes, so the
//! two can be compared. Unlike satisfaction this is raw and unnormalized:
//! every switch costs the preference's full objective weight.

use std::collections::BTreeMap;

use rosterforge_core::{Assignment, CrewId, PreferenceDeclaration, PreferenceType};
use rosterforge_rules::role_switches;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// `-(switches × base_weight × crew_weight × adaptive_boost)`.
///
/// Uses the same switch count as the CONSECUTIVE satisfaction score.
///
/// # Example
///
/// ```
/// use rosterforge_core::{Assignment, PreferenceDeclaration, PreferenceType};
/// use rosterforge_scoring::consecutive_penalty;
///
/// let pref = PreferenceDeclaration::new("c1", "ana", PreferenceType::Consecutive)
///     .with_weights(2.0, 1.5)
///     .with_adaptive_boost(2.0);
/// let day = vec![
///     Assignment::new("ana", "REGISTER", 540, 600),
///     Assignment::new("ana", "PRODUCT", 600, 660),
///     Assignment::new("ana", "REGISTER", 660, 720),
/// ];
/// assert_eq!(consecutive_penalty(&pref, &day), -12.0);
/// ```
pub fn consecutive_penalty(pref: &PreferenceDeclaration, assignments: &[Assignment]) -> f64 {
    let switches = role_switches(&pref.crew_id, pref.role_id.as_deref(), assignments).switches;
    -(switches as f64 * pref.objective_weight())
}

/// One CONSECUTIVE preference's contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyTerm {
    pub preference_id: String,
    pub crew_id: CrewId,
    pub switches: u32,
    pub penalty: f64,
}

/// Total penalty with its breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltyReport {
    /// Sum of every term; zero or negative.
    pub total: f64,
    pub per_crew: BTreeMap<CrewId, f64>,
    pub terms: Vec<PenaltyTerm>,
}

/// Result of comparing an optimizer-reported term against a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub reported: f64,
    pub computed: f64,
    /// `reported - computed`.
    pub delta: f64,
    pub drifted: bool,
}

/// Scores every CONSECUTIVE preference in a batch; other kinds are skipped.
#[derive(Debug, Clone, Copy)]
pub struct ConsecutivePenaltyScorer {
    tolerance: f64,
}

impl Default for ConsecutivePenaltyScorer {
    fn default() -> Self {
        Self { tolerance: 1e-6 }
    }
}

impl ConsecutivePenaltyScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute tolerance for [`detect_drift`](Self::detect_drift).
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub fn score(&self, prefs: &[PreferenceDeclaration], assignments: &[Assignment]) -> PenaltyReport {
        let mut report = PenaltyReport::default();
        for pref in prefs
            .iter()
            .filter(|p| p.preference_type == PreferenceType::Consecutive)
        {
            let switches =
                role_switches(&pref.crew_id, pref.role_id.as_deref(), assignments).switches;
            let penalty = -(switches as f64 * pref.objective_weight());
            report.total += penalty;
            *report.per_crew.entry(pref.crew_id.clone()).or_default() += penalty;
            report.terms.push(PenaltyTerm {
                preference_id: pref.id.clone(),
                crew_id: pref.crew_id.clone(),
                switches,
                penalty,
            });
        }
        debug!(
            event = "penalty_scored",
            terms = report.terms.len(),
            total = report.total,
        );
        report
    }

    /// Recomputes the penalty and compares it with what the optimizer
    /// reported for the same roster.
    pub fn detect_drift(
        &self,
        reported: f64,
        prefs: &[PreferenceDeclaration],
        assignments: &[Assignment],
    ) -> DriftReport {
        let computed = self.score(prefs, assignments).total;
        let delta = reported - computed;
        let drifted = delta.is_nan() || delta.abs() > self.tolerance;
        if drifted {
            warn!(
                event = "penalty_drift",
                reported,
                computed,
                delta,
                tolerance = self.tolerance,
            );
        }
        DriftReport {
            reported,
            computed,
            delta,
            drifted,
        }
    }
}
