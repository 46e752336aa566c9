//! Roster-level validation: every rule, in a stable order.

use std::collections::BTreeSet;

use rosterforge_core::clock::format_12h;
use rosterforge_core::{
    Assignment, AssignmentModel, HourlyRequirement, Result, RoleConfig, RosterError, StoreConfig,
    ValidationResult, WindowRequirement,
};
use tracing::debug;

use crate::blocks::crew_day;
use crate::hourly::HourlyCoverageValidator;
use crate::slots::ConsecutiveAndSlotSizeValidator;
use crate::store_hours::StoreHoursValidator;
use crate::window::WindowCoverageValidator;
use crate::RosterRule;

/// A crew member's own assignments must not overlap.
#[derive(Debug, Default)]
struct CrewOverlapRule;

impl RosterRule for CrewOverlapRule {
    fn validate(&self, assignments: &[Assignment]) -> Result<ValidationResult> {
        let crew: BTreeSet<&str> = assignments.iter().map(|a| a.crew_id.as_str()).collect();
        let mut result = ValidationResult::ok();
        for crew_id in crew {
            let day = crew_day(crew_id, assignments);
            // Sorted by start, so an earlier assignment overlaps `next` iff it
            // is still running when `next` starts.
            for (i, next) in day.iter().enumerate() {
                for prev in day[..i].iter().filter(|p| next.start_minutes < p.end_minutes) {
                    result.push(format!(
                        "{crew_id}: {} {}-{} overlaps {} {}-{}",
                        prev.role_id,
                        format_12h(prev.start_minutes),
                        format_12h(prev.end_minutes),
                        next.role_id,
                        format_12h(next.start_minutes),
                        format_12h(next.end_minutes),
                    ));
                }
            }
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Crew overlap"
    }
}

/// Runs every rule that applies to a store's configuration.
///
/// Rule order is fixed: crew overlap, store hours, hourly coverage, window
/// coverage, then block size and fragmentation. Violations from all rules
/// are concatenated in that order.
///
/// # Example
///
/// ```
/// use rosterforge_core::{
///     Assignment, AssignmentModel, HourlyRequirement, RoleConfig, StoreConfig,
/// };
/// use rosterforge_rules::RosterValidator;
///
/// let store = StoreConfig::new(480, 1320);
/// let roles = vec![RoleConfig::new("REGISTER", AssignmentModel::Hourly)];
/// let hourly = vec![HourlyRequirement::new("REGISTER", 9, 1)];
///
/// let validator = RosterValidator::new(&store, &roles, &hourly, &[]).unwrap();
/// let roster = vec![Assignment::new("ana", "REGISTER", 540, 600)];
/// assert!(validator.validate(&roster).unwrap().valid);
/// ```
pub struct RosterValidator<'a> {
    rules: Vec<Box<dyn RosterRule + 'a>>,
}

impl std::fmt::Debug for RosterValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterValidator")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<'a> RosterValidator<'a> {
    /// Builds the validator, failing fast on malformed configuration.
    ///
    /// # Errors
    ///
    /// - [`RosterError::Config`] for invalid store, role or requirement
    ///   settings, or a requirement whose role uses a different assignment
    ///   model than the requirement form
    /// - [`RosterError::UnknownRole`] for a requirement on an unknown role
    pub fn new(
        store: &'a StoreConfig,
        roles: &'a [RoleConfig],
        hourly: &'a [HourlyRequirement],
        windows: &'a [WindowRequirement],
    ) -> Result<Self> {
        let model_of = |code: &str| -> Result<AssignmentModel> {
            roles
                .iter()
                .find(|r| r.code == code)
                .map(|r| r.assignment_model)
                .ok_or_else(|| RosterError::UnknownRole(code.to_string()))
        };
        for req in hourly {
            let model = model_of(&req.role_id)?;
            if model != AssignmentModel::Hourly {
                return Err(RosterError::Config(format!(
                    "hourly requirement on role {} which is {model}",
                    req.role_id
                )));
            }
        }
        for req in windows {
            let model = model_of(&req.role_id)?;
            if model != AssignmentModel::CoverageWindow {
                return Err(RosterError::Config(format!(
                    "coverage window requirement on role {} which is {model}",
                    req.role_id
                )));
            }
        }

        let rules: Vec<Box<dyn RosterRule + 'a>> = vec![
            Box::new(CrewOverlapRule),
            Box::new(StoreHoursValidator::new(store, roles)?),
            Box::new(HourlyCoverageValidator::new(hourly)?),
            Box::new(WindowCoverageValidator::new(windows)?),
            Box::new(ConsecutiveAndSlotSizeValidator::new(store, roles)?),
        ];
        Ok(Self { rules })
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Validates the roster against every rule.
    pub fn validate(&self, assignments: &[Assignment]) -> Result<ValidationResult> {
        let mut result = ValidationResult::ok();
        for rule in &self.rules {
            let outcome = rule.validate(assignments)?;
            debug!(
                event = "rule_checked",
                rule = rule.name(),
                violations = outcome.violation_count(),
            );
            result.merge(outcome);
        }
        Ok(result)
    }
}
