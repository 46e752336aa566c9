//! Role configuration.

use std::fmt;

use crate::error::{Result, RosterError};

/// How a role is staffed, which decides the coverage rule that applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AssignmentModel {
    /// Exact headcount on a sparse set of hours.
    #[default]
    Hourly,
    /// Exact headcount on every hour of a continuous window.
    CoverageWindow,
    /// Per-crew hour counts; no headcount rule.
    IndividualHours,
}

impl fmt::Display for AssignmentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentModel::Hourly => write!(f, "HOURLY"),
            AssignmentModel::CoverageWindow => write!(f, "COVERAGE_WINDOW"),
            AssignmentModel::IndividualHours => write!(f, "INDIVIDUAL_HOURS"),
        }
    }
}

/// Rules for one role. Assignments refer to a role by its `code`.
///
/// # Example
///
/// ```
/// use rosterforge_core::{AssignmentModel, RoleConfig};
///
/// let demo = RoleConfig::new("DEMO", AssignmentModel::CoverageWindow)
///     .with_slot_range(Some(1), Some(1))
///     .consecutive();
/// assert!(demo.validate().is_ok());
/// assert!(demo.slots_must_be_consecutive);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleConfig {
    pub code: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_outside_store_hours: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slots_must_be_consecutive: bool,
    /// Minimum block size in slots; `None` is unbounded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_slots: Option<u32>,
    /// Maximum block size in slots; `None` is unbounded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_slots: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub assignment_model: AssignmentModel,
    /// Assignments on this role are the crew member's break.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_break_role: bool,
}

impl RoleConfig {
    pub fn new(code: impl Into<String>, assignment_model: AssignmentModel) -> Self {
        Self {
            code: code.into(),
            allow_outside_store_hours: false,
            slots_must_be_consecutive: false,
            min_slots: None,
            max_slots: None,
            assignment_model,
            is_break_role: false,
        }
    }

    /// Creates an individual-hours break role.
    pub fn break_role(code: impl Into<String>) -> Self {
        Self {
            is_break_role: true,
            ..Self::new(code, AssignmentModel::IndividualHours)
        }
    }

    pub fn outside_store_hours(mut self) -> Self {
        self.allow_outside_store_hours = true;
        self
    }

    pub fn consecutive(mut self) -> Self {
        self.slots_must_be_consecutive = true;
        self
    }

    pub fn with_slot_range(mut self, min_slots: Option<u32>, max_slots: Option<u32>) -> Self {
        self.min_slots = min_slots;
        self.max_slots = max_slots;
        self
    }

    /// Returns true if a block of `slots` satisfies the slot range.
    #[inline]
    pub fn accepts_block_of(&self, slots: u32) -> bool {
        self.min_slots.map_or(true, |min| slots >= min)
            && self.max_slots.map_or(true, |max| slots <= max)
    }

    /// Checks the configuration invariants.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(RosterError::Config("role code must not be empty".to_string()));
        }
        if let (Some(min), Some(max)) = (self.min_slots, self.max_slots) {
            if min > max {
                return Err(RosterError::Config(format!(
                    "role {}: min_slots {} exceeds max_slots {}",
                    self.code, min, max
                )));
            }
        }
        Ok(())
    }
}
