//! Exact hourly headcount for HOURLY roles.

use std::cmp::Ordering;
use std::collections::HashSet;

use rosterforge_core::clock::{format_12h, hour_bounds};
use rosterforge_core::{Assignment, HourlyRequirement, Result, ValidationResult};

use crate::RosterRule;

/// Distinct crew on `role_id` whose assignment overlaps the hour.
pub(crate) fn headcount(role_id: &str, hour: u32, assignments: &[Assignment]) -> usize {
    assignments
        .iter()
        .filter(|a| a.role_id == role_id && a.overlaps_hour(hour))
        .map(|a| a.crew_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Formats an exact-headcount violation, or `None` when the count matches.
pub(crate) fn staffing_violation(
    label: &str,
    hour: u32,
    actual: usize,
    required: u32,
) -> Option<String> {
    let verdict = match actual.cmp(&(required as usize)) {
        Ordering::Equal => return None,
        Ordering::Less => "understaffed",
        Ordering::Greater => "overstaffed",
    };
    Some(format!(
        "{label} at {}: {verdict}, {actual} assigned vs {required} required",
        format_12h(hour_bounds(hour).0)
    ))
}

/// Exact headcount on each hour that carries a requirement.
///
/// Both under- and over-staffing are violations: requirements are targets,
/// not minimums.
///
/// # Example
///
/// ```
/// use rosterforge_core::{Assignment, HourlyRequirement};
/// use rosterforge_rules::{HourlyCoverageValidator, RosterRule};
///
/// let reqs = vec![HourlyRequirement::new("REGISTER", 9, 1)];
/// let rule = HourlyCoverageValidator::new(&reqs).unwrap();
///
/// let two = vec![
///     Assignment::new("ana", "REGISTER", 540, 600),
///     Assignment::new("ben", "REGISTER", 570, 630),
/// ];
/// let result = rule.validate(&two).unwrap();
/// assert!(result.violations[0].contains("overstaffed"));
/// ```
#[derive(Debug)]
pub struct HourlyCoverageValidator<'a> {
    requirements: &'a [HourlyRequirement],
}

impl<'a> HourlyCoverageValidator<'a> {
    pub fn new(requirements: &'a [HourlyRequirement]) -> Result<Self> {
        for req in requirements {
            req.validate()?;
        }
        Ok(Self { requirements })
    }
}

impl RosterRule for HourlyCoverageValidator<'_> {
    fn validate(&self, assignments: &[Assignment]) -> Result<ValidationResult> {
        Ok(self
            .requirements
            .iter()
            .filter_map(|req| {
                let actual = headcount(&req.role_id, req.hour, assignments);
                staffing_violation(&req.role_id, req.hour, actual, req.required_per_hour)
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Hourly coverage"
    }
}
