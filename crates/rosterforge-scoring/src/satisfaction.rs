//! Per-preference satisfaction.
//!
//! Every preference kind maps to one pure function returning a
//! [`SatisfactionResult`]. A preference that cannot be met (no assignments,
//! no break, short shift) scores 0.0 with a reason in `details`; it is never
//! an error.

use std::collections::{HashMap, HashSet};

use rosterforge_core::clock::format_span;
use rosterforge_core::{
    Assignment, CrewId, CrewShift, PreferenceDeclaration, PreferenceType, RoleConfig, StoreConfig,
    TimingDirection,
};
use rosterforge_rules::{crew_day, role_switches};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How well one preference was satisfied on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionResult {
    pub preference_id: String,
    pub crew_id: CrewId,
    pub preference_type: PreferenceType,
    /// In `[0, 1]`.
    pub satisfaction: f64,
    /// `satisfaction > 0.5`.
    pub met: bool,
    /// `base_weight × crew_weight`.
    pub weight_applied: f64,
    /// Why the score is what it is, when not self-evident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SatisfactionResult {
    fn scored(pref: &PreferenceDeclaration, satisfaction: f64) -> Self {
        let satisfaction = satisfaction.clamp(0.0, 1.0);
        Self {
            preference_id: pref.id.clone(),
            crew_id: pref.crew_id.clone(),
            preference_type: pref.preference_type,
            satisfaction,
            met: satisfaction > 0.5,
            weight_applied: pref.weight_applied(),
            details: None,
        }
    }

    fn unmet(pref: &PreferenceDeclaration, reason: impl Into<String>) -> Self {
        Self::scored(pref, 0.0).with_details(reason)
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Computes satisfaction for declared preferences.
///
/// # Example
///
/// ```
/// use rosterforge_core::{
///     Assignment, PreferenceDeclaration, PreferenceType, RoleConfig, StoreConfig,
/// };
/// use rosterforge_scoring::PreferenceCalculator;
///
/// let store = StoreConfig::new(480, 1320);
/// let roles = vec![RoleConfig::break_role("BREAK")];
/// let calc = PreferenceCalculator::new(&store, &roles);
///
/// let day = vec![
///     Assignment::new("ana", "REGISTER", 540, 600),
///     Assignment::new("ana", "PRODUCT", 600, 660),
/// ];
/// let pref = PreferenceDeclaration::new("p1", "ana", PreferenceType::FirstHour)
///     .with_role("REGISTER");
///
/// let result = calc.evaluate(&pref, &day);
/// assert_eq!(result.satisfaction, 1.0);
/// assert!(result.met);
/// ```
#[derive(Debug)]
pub struct PreferenceCalculator<'a> {
    store: &'a StoreConfig,
    break_roles: HashSet<&'a str>,
}

impl<'a> PreferenceCalculator<'a> {
    /// Creates a calculator; break assignments are those on roles flagged
    /// `is_break_role`.
    pub fn new(store: &'a StoreConfig, roles: &'a [RoleConfig]) -> Self {
        Self {
            store,
            break_roles: roles
                .iter()
                .filter(|r| r.is_break_role)
                .map(|r| r.code.as_str())
                .collect(),
        }
    }

    /// Scores one preference, dispatching on its kind.
    pub fn evaluate(
        &self,
        pref: &PreferenceDeclaration,
        assignments: &[Assignment],
    ) -> SatisfactionResult {
        let result = match pref.preference_type {
            PreferenceType::FirstHour => Self::first_hour(pref, assignments),
            PreferenceType::Favorite => Self::favorite(pref, assignments),
            PreferenceType::Timing => self.timing(pref, assignments),
            PreferenceType::Consecutive => Self::consecutive(pref, assignments),
        };
        trace!(
            event = "preference_scored",
            preference = %result.preference_id,
            crew = %result.crew_id,
            kind = %result.preference_type,
            satisfaction = result.satisfaction,
        );
        result
    }

    /// Scores every preference, in input order.
    pub fn evaluate_all(
        &self,
        prefs: &[PreferenceDeclaration],
        assignments: &[Assignment],
    ) -> Vec<SatisfactionResult> {
        prefs.iter().map(|p| self.evaluate(p, assignments)).collect()
    }

    /// FIRST_HOUR: 1.0 iff the crew member's earliest assignment is on the
    /// preferred role.
    pub fn first_hour(pref: &PreferenceDeclaration, assignments: &[Assignment]) -> SatisfactionResult {
        let Some(role) = pref.role_id.as_deref() else {
            return SatisfactionResult::unmet(pref, "no preferred role declared");
        };
        let day = crew_day(&pref.crew_id, assignments);
        let Some(first) = day.first() else {
            return SatisfactionResult::unmet(pref, "no assignments");
        };
        if first.role_id == role {
            SatisfactionResult::scored(pref, 1.0)
        } else {
            SatisfactionResult::unmet(pref, format!("first hour spent on {}", first.role_id))
        }
    }

    /// FAVORITE: 1.0 iff the preferred role has strictly the most minutes.
    ///
    /// Ties are not satisfied, and a favorite never worked is not satisfied.
    pub fn favorite(pref: &PreferenceDeclaration, assignments: &[Assignment]) -> SatisfactionResult {
        let Some(role) = pref.role_id.as_deref() else {
            return SatisfactionResult::unmet(pref, "no preferred role declared");
        };
        let mut minutes: HashMap<&str, u32> = HashMap::new();
        for a in assignments.iter().filter(|a| a.crew_id == pref.crew_id) {
            *minutes.entry(a.role_id.as_str()).or_default() += a.duration();
        }
        let favorite = minutes.get(role).copied().unwrap_or(0);
        if favorite == 0 {
            return SatisfactionResult::unmet(pref, format!("never worked {role}"));
        }
        let rival = minutes
            .iter()
            .filter(|(r, _)| **r != role)
            .map(|(_, m)| *m)
            .max()
            .unwrap_or(0);
        if favorite > rival {
            SatisfactionResult::scored(pref, 1.0)
        } else {
            SatisfactionResult::unmet(
                pref,
                format!("{role} has {favorite} minutes, another role has {rival}"),
            )
        }
    }

    /// TIMING: position of the break inside the crew member's break window.
    ///
    /// The window is `[shift_start + break_window_start, shift_start +
    /// break_window_end]`. A break at the window start scores 1.0 for an
    /// early preference and 0.0 for a late one; the midpoint scores 0.5 for
    /// both.
    pub fn timing(&self, pref: &PreferenceDeclaration, assignments: &[Assignment]) -> SatisfactionResult {
        let Some(direction) = pref.timing_direction() else {
            return SatisfactionResult::unmet(pref, "no timing direction declared");
        };
        let Some(shift) = CrewShift::span_of(&pref.crew_id, assignments) else {
            return SatisfactionResult::unmet(pref, "no assignments");
        };
        if shift.duration() < self.store.req_shift_length_for_break {
            return SatisfactionResult::unmet(
                pref,
                format!(
                    "shift of {} is shorter than the {} required for a break",
                    format_span(shift.duration()),
                    format_span(self.store.req_shift_length_for_break)
                ),
            );
        }
        let Some(brk) = crew_day(&pref.crew_id, assignments)
            .into_iter()
            .find(|a| self.break_roles.contains(a.role_id.as_str()))
        else {
            return SatisfactionResult::unmet(pref, "no break assigned");
        };

        let window_start = i64::from(shift.start_minutes) + i64::from(self.store.break_window_start);
        let window_size = f64::from(self.store.break_window_size().max(1));
        let offset = (i64::from(brk.start_minutes) - window_start) as f64;
        let position = (offset / window_size).clamp(0.0, 1.0);

        let satisfaction = match direction {
            TimingDirection::Late => position,
            TimingDirection::Early => 1.0 - position,
        };
        SatisfactionResult::scored(pref, satisfaction)
    }

    /// CONSECUTIVE: `1 - switches / adjacent_pairs` over back-to-back
    /// assignments, vacuously 1.0 with nothing adjacent.
    pub fn consecutive(pref: &PreferenceDeclaration, assignments: &[Assignment]) -> SatisfactionResult {
        let count = role_switches(&pref.crew_id, pref.role_id.as_deref(), assignments);
        let result = SatisfactionResult::scored(pref, count.continuity());
        if count.switches > 0 {
            result.with_details(format!(
                "{} switch(es) over {} adjacent pair(s)",
                count.switches, count.adjacent_pairs
            ))
        } else {
            result
        }
    }
}

#[cfg(test)]
mod tests;
