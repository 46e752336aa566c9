//! Assignments and crew shifts.

use super::{CrewId, RoleId};
use crate::clock::{hour_bounds, overlaps};

/// One crew member working one role over `[start_minutes, end_minutes)`.
///
/// Assignments are produced by the external optimizer and never mutated
/// afterwards. Two assignments of the same crew member must not overlap.
///
/// # Example
///
/// ```
/// use rosterforge_core::Assignment;
///
/// let a = Assignment::new("ana", "REGISTER", 540, 600);
/// assert_eq!(a.duration(), 60);
/// assert!(a.overlaps_hour(9));
/// assert!(!a.overlaps_hour(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub crew_id: CrewId,
    pub role_id: RoleId,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl Assignment {
    pub fn new(
        crew_id: impl Into<CrewId>,
        role_id: impl Into<RoleId>,
        start_minutes: u32,
        end_minutes: u32,
    ) -> Self {
        Self {
            crew_id: crew_id.into(),
            role_id: role_id.into(),
            start_minutes,
            end_minutes,
        }
    }

    /// Length of the assignment in minutes.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.end_minutes.saturating_sub(self.start_minutes)
    }

    /// Returns true if the assignment overlaps `[hour*60, hour*60+60)`.
    #[inline]
    pub fn overlaps_hour(&self, hour: u32) -> bool {
        let (start, end) = hour_bounds(hour);
        overlaps(self.start_minutes, self.end_minutes, start, end)
    }

    /// Returns true if `other` starts exactly where this one ends.
    #[inline]
    pub fn is_followed_by(&self, other: &Assignment) -> bool {
        self.end_minutes == other.start_minutes
    }
}

/// The interval a crew member is on the clock for the day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrewShift {
    pub crew_id: CrewId,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl CrewShift {
    pub fn new(crew_id: impl Into<CrewId>, start_minutes: u32, end_minutes: u32) -> Self {
        Self {
            crew_id: crew_id.into(),
            start_minutes,
            end_minutes,
        }
    }

    /// Creates a shift from whole hours, `[start_hour:00, end_hour:00)`.
    pub fn from_hours(crew_id: impl Into<CrewId>, start_hour: u32, end_hour: u32) -> Self {
        Self::new(crew_id, hour_bounds(start_hour).0, hour_bounds(end_hour).0)
    }

    /// Returns true if the whole hour lies inside the shift.
    ///
    /// ```
    /// use rosterforge_core::CrewShift;
    ///
    /// let shift = CrewShift::from_hours("ana", 9, 12);
    /// assert!(shift.covers_hour(9));
    /// assert!(shift.covers_hour(11));
    /// assert!(!shift.covers_hour(12));
    /// ```
    #[inline]
    pub fn covers_hour(&self, hour: u32) -> bool {
        let (start, end) = hour_bounds(hour);
        self.start_minutes <= start && self.end_minutes >= end
    }

    /// Length of the shift in minutes.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.end_minutes.saturating_sub(self.start_minutes)
    }

    /// Derives the shift of one crew member from their assignments.
    ///
    /// The shift spans the earliest start to the latest end. Returns `None`
    /// when the crew member has no assignments.
    pub fn span_of<'a, I>(crew_id: &str, assignments: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        let mut span: Option<(u32, u32)> = None;
        for a in assignments.into_iter().filter(|a| a.crew_id == crew_id) {
            span = Some(match span {
                None => (a.start_minutes, a.end_minutes),
                Some((s, e)) => (s.min(a.start_minutes), e.max(a.end_minutes)),
            });
        }
        span.map(|(start, end)| Self::new(crew_id, start, end))
    }
}
