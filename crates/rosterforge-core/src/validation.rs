//! Validation outcome shared by every rule.

/// Outcome of checking a roster against one or more rules.
///
/// Violations are human-readable and kept in the order they were found, so
/// an operator sees every issue in one pass.
///
/// # Example
///
/// ```
/// use rosterforge_core::ValidationResult;
///
/// let mut result = ValidationResult::ok();
/// assert!(result.valid);
///
/// result.push("Hour 9: understaffed (0/1)");
/// assert!(!result.valid);
/// assert_eq!(result.violations.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no violations.
    pub fn ok() -> Self {
        Self {
            valid: true,
            violations: Vec::new(),
        }
    }

    /// Builds a result from a list of violations; empty means valid.
    pub fn from_violations(violations: Vec<String>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// Records a violation.
    pub fn push(&mut self, violation: impl Into<String>) {
        self.violations.push(violation.into());
        self.valid = false;
    }

    /// Appends another result's violations after this one's.
    pub fn merge(&mut self, other: ValidationResult) {
        self.valid &= other.valid;
        self.violations.extend(other.violations);
    }

    /// Returns the number of violations.
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

impl FromIterator<String> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::from_violations(iter.into_iter().collect())
    }
}
