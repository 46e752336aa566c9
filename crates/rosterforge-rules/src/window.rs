//! Exact headcount across continuous coverage windows.

use rosterforge_core::{Assignment, Result, ValidationResult, WindowRequirement};

use crate::hourly::{headcount, staffing_violation};
use crate::RosterRule;

/// Actual vs required headcount for one hour of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourCoverage {
    pub hour: u32,
    pub actual: usize,
    pub required: u32,
}

impl HourCoverage {
    pub fn is_exact(&self) -> bool {
        self.actual == self.required as usize
    }
}

/// Exact headcount on every hour of each `[start_hour, end_hour)` window.
///
/// Used for promotional roles that must be staffed without gaps.
///
/// # Example
///
/// ```
/// use rosterforge_core::{Assignment, WindowRequirement};
/// use rosterforge_rules::WindowCoverageValidator;
///
/// let window = WindowRequirement::new("DEMO", 10, 12, 1);
/// let roster = vec![
///     Assignment::new("ana", "DEMO", 600, 660),
///     Assignment::new("ben", "DEMO", 660, 720),
/// ];
/// assert!(WindowCoverageValidator::is_window_fully_covered(&window, &roster));
///
/// let summary = WindowCoverageValidator::window_coverage_summary(&window, &roster);
/// assert_eq!(summary.len(), 2);
/// assert!(summary.iter().all(|h| h.actual == 1));
/// ```
#[derive(Debug)]
pub struct WindowCoverageValidator<'a> {
    requirements: &'a [WindowRequirement],
}

impl<'a> WindowCoverageValidator<'a> {
    pub fn new(requirements: &'a [WindowRequirement]) -> Result<Self> {
        for req in requirements {
            req.validate()?;
        }
        Ok(Self { requirements })
    }

    /// Per-hour actual vs required counts, for diagnostics.
    pub fn window_coverage_summary(
        requirement: &WindowRequirement,
        assignments: &[Assignment],
    ) -> Vec<HourCoverage> {
        requirement
            .hours()
            .map(|hour| HourCoverage {
                hour,
                actual: headcount(&requirement.role_id, hour, assignments),
                required: requirement.required_per_hour,
            })
            .collect()
    }

    /// Returns false at the first hour whose headcount is not exact.
    pub fn is_window_fully_covered(
        requirement: &WindowRequirement,
        assignments: &[Assignment],
    ) -> bool {
        requirement.hours().all(|hour| {
            headcount(&requirement.role_id, hour, assignments)
                == requirement.required_per_hour as usize
        })
    }
}

impl RosterRule for WindowCoverageValidator<'_> {
    fn validate(&self, assignments: &[Assignment]) -> Result<ValidationResult> {
        let mut result = ValidationResult::ok();
        for req in self.requirements {
            let label = format!("{} window", req.role_id);
            for hour in Self::window_coverage_summary(req, assignments) {
                if let Some(v) = staffing_violation(&label, hour.hour, hour.actual, hour.required) {
                    result.push(v);
                }
            }
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Window coverage"
    }
}
