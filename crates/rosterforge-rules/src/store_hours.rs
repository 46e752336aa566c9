//! Store hours rule.

use std::collections::HashMap;

use rosterforge_core::clock::{format_12h, format_span};
use rosterforge_core::{Assignment, Result, RoleConfig, RosterError, StoreConfig, ValidationResult};

use crate::RosterRule;

/// Checks one assignment against store hours.
///
/// Roles that allow work outside store hours always pass. Otherwise the
/// assignment must start at or after opening and end at or before closing;
/// each crossed bound yields one violation naming the overshoot.
///
/// # Example
///
/// ```
/// use rosterforge_core::{Assignment, AssignmentModel, RoleConfig, StoreConfig};
/// use rosterforge_rules::check_assignment;
///
/// let store = StoreConfig::new(480, 1320);
/// let register = RoleConfig::new("REGISTER", AssignmentModel::Hourly);
/// let early = Assignment::new("ana", "REGISTER", 419, 900);
///
/// let result = check_assignment(&early, &register, &store);
/// assert!(!result.valid);
/// assert!(result.violations[0].contains("before store opens"));
///
/// let truck = register.clone().outside_store_hours();
/// assert!(check_assignment(&early, &truck, &store).valid);
/// ```
pub fn check_assignment(
    assignment: &Assignment,
    role: &RoleConfig,
    store: &StoreConfig,
) -> ValidationResult {
    let mut result = ValidationResult::ok();
    if role.allow_outside_store_hours {
        return result;
    }

    let open = store.open_minutes_from_midnight;
    let close = store.close_minutes_from_midnight;

    if assignment.start_minutes < open {
        result.push(format!(
            "{} on {}: starts at {}, {} before store opens at {}",
            assignment.crew_id,
            assignment.role_id,
            format_12h(assignment.start_minutes),
            format_span(open - assignment.start_minutes),
            format_12h(open)
        ));
    }
    if assignment.end_minutes > close {
        result.push(format!(
            "{} on {}: ends at {}, {} after store closes at {}",
            assignment.crew_id,
            assignment.role_id,
            format_12h(assignment.end_minutes),
            format_span(assignment.end_minutes - close),
            format_12h(close)
        ));
    }
    result
}

/// Store hours rule over a whole roster.
#[derive(Debug)]
pub struct StoreHoursValidator<'a> {
    store: &'a StoreConfig,
    roles: HashMap<&'a str, &'a RoleConfig>,
}

impl<'a> StoreHoursValidator<'a> {
    /// Creates the rule, rejecting malformed store or role configuration.
    pub fn new(store: &'a StoreConfig, roles: &'a [RoleConfig]) -> Result<Self> {
        store.validate()?;
        let mut by_code = HashMap::with_capacity(roles.len());
        for role in roles {
            role.validate()?;
            by_code.insert(role.code.as_str(), role);
        }
        Ok(Self {
            store,
            roles: by_code,
        })
    }
}

impl RosterRule for StoreHoursValidator<'_> {
    fn validate(&self, assignments: &[Assignment]) -> Result<ValidationResult> {
        let mut result = ValidationResult::ok();
        for assignment in assignments {
            let role = self
                .roles
                .get(assignment.role_id.as_str())
                .ok_or_else(|| RosterError::UnknownRole(assignment.role_id.clone()))?;
            result.merge(check_assignment(assignment, role, self.store));
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Store hours"
    }
}
