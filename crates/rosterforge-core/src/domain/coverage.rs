//! Headcount requirements.
//!
//! Both forms are exact targets: too few and too many crew are both
//! violations.

use super::RoleId;
use crate::clock::HOURS_PER_DAY;
use crate::error::{Result, RosterError};

/// Required headcount for one role in one hour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourlyRequirement {
    pub role_id: RoleId,
    pub hour: u32,
    pub required_per_hour: u32,
}

impl HourlyRequirement {
    pub fn new(role_id: impl Into<RoleId>, hour: u32, required_per_hour: u32) -> Self {
        Self {
            role_id: role_id.into(),
            hour,
            required_per_hour,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.hour as usize >= HOURS_PER_DAY {
            return Err(RosterError::Config(format!(
                "role {}: requirement hour {} is outside the day",
                self.role_id, self.hour
            )));
        }
        Ok(())
    }
}

/// Required headcount for one role on every hour of `[start_hour, end_hour)`.
///
/// ```
/// use rosterforge_core::WindowRequirement;
///
/// let w = WindowRequirement::new("DEMO", 10, 14, 1);
/// assert_eq!(w.hours().collect::<Vec<_>>(), vec![10, 11, 12, 13]);
/// assert_eq!(w.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRequirement {
    pub role_id: RoleId,
    pub start_hour: u32,
    pub end_hour: u32,
    pub required_per_hour: u32,
}

impl WindowRequirement {
    pub fn new(role_id: impl Into<RoleId>, start_hour: u32, end_hour: u32, required_per_hour: u32) -> Self {
        Self {
            role_id: role_id.into(),
            start_hour,
            end_hour,
            required_per_hour,
        }
    }

    /// Hours covered by the window.
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.start_hour..self.end_hour
    }

    pub fn len(&self) -> usize {
        self.end_hour.saturating_sub(self.start_hour) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_hour >= self.end_hour {
            return Err(RosterError::Config(format!(
                "role {}: coverage window [{}, {}) is empty or inverted",
                self.role_id, self.start_hour, self.end_hour
            )));
        }
        if self.end_hour as usize > HOURS_PER_DAY {
            return Err(RosterError::Config(format!(
                "role {}: coverage window ends at hour {}, past the end of the day",
                self.role_id, self.end_hour
            )));
        }
        Ok(())
    }
}
