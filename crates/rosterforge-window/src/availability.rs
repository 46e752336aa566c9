//! Per-hour availability of eligible crew.

use std::collections::BTreeSet;

use rosterforge_core::clock::HOURS_PER_DAY;
use rosterforge_core::{CrewId, CrewShift, RoleId};
use tracing::trace;

/// Eligible crew on the clock for each hour of the day, for one role.
///
/// A crew member is available at hour `h` when one of their shifts covers
/// the whole hour: `start <= h*60` and `end >= h*60 + 60`.
///
/// # Example
///
/// ```
/// use rosterforge_core::CrewShift;
/// use rosterforge_window::Availability;
///
/// let shifts = vec![
///     CrewShift::from_hours("ana", 9, 12),
///     CrewShift::from_hours("ben", 10, 12),
///     CrewShift::from_hours("cleo", 11, 12),
/// ];
/// let eligible = vec!["ana".to_string(), "ben".to_string(), "cleo".to_string()];
/// let avail = Availability::build("DEMO", &eligible, &shifts);
///
/// assert_eq!(avail.count(9), 1);
/// assert_eq!(avail.count(10), 2);
/// assert_eq!(avail.count(11), 3);
/// assert_eq!(avail.count(12), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    role_id: RoleId,
    crew_by_hour: Vec<BTreeSet<CrewId>>,
}

impl Availability {
    /// Aggregates shifts of the eligible crew. Shifts of other crew are
    /// ignored; a crew member with several shifts is available wherever any
    /// of them covers the hour.
    pub fn build(role_id: impl Into<RoleId>, eligible: &[CrewId], shifts: &[CrewShift]) -> Self {
        let role_id = role_id.into();
        let eligible: BTreeSet<&str> = eligible.iter().map(String::as_str).collect();
        let mut crew_by_hour = vec![BTreeSet::new(); HOURS_PER_DAY];
        for shift in shifts
            .iter()
            .filter(|s| eligible.contains(s.crew_id.as_str()))
        {
            for (hour, crew) in crew_by_hour.iter_mut().enumerate() {
                if shift.covers_hour(hour as u32) {
                    crew.insert(shift.crew_id.clone());
                }
            }
        }
        trace!(
            event = "availability_built",
            role = %role_id,
            avail = ?crew_by_hour.iter().map(BTreeSet::len).collect::<Vec<_>>(),
        );
        Self {
            role_id,
            crew_by_hour,
        }
    }

    pub fn role_id(&self) -> &str {
        &self.role_id
    }

    /// Number of eligible crew available at `hour`; 0 outside the day.
    pub fn count(&self, hour: u32) -> usize {
        self.crew_by_hour
            .get(hour as usize)
            .map_or(0, BTreeSet::len)
    }

    /// The 24-entry availability array.
    pub fn counts(&self) -> [usize; HOURS_PER_DAY] {
        let mut counts = [0; HOURS_PER_DAY];
        for (count, crew) in counts.iter_mut().zip(&self.crew_by_hour) {
            *count = crew.len();
        }
        counts
    }

    /// Eligible crew available at `hour`, sorted.
    pub fn crew_at(&self, hour: u32) -> impl Iterator<Item = &str> {
        self.crew_by_hour
            .get(hour as usize)
            .into_iter()
            .flat_map(|crew| crew.iter().map(String::as_str))
    }

    pub fn is_available(&self, crew_id: &str, hour: u32) -> bool {
        self.crew_by_hour
            .get(hour as usize)
            .is_some_and(|crew| crew.contains(crew_id))
    }

    /// Distinct crew available anywhere in `[start_hour, end_hour)`.
    pub fn distinct_crew(&self, start_hour: u32, end_hour: u32) -> BTreeSet<&str> {
        (start_hour..end_hour).flat_map(|h| self.crew_at(h)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_test::roster::shifts;

    fn crew(ids: &[&str]) -> Vec<CrewId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_only_eligible_crew_counted() {
        let shifts = shifts(&[("ana", 9, 12), ("ben", 9, 12)]);
        let avail = Availability::build("DEMO", &crew(&["ana"]), &shifts);
        assert_eq!(avail.count(10), 1);
        assert!(avail.is_available("ana", 10));
        assert!(!avail.is_available("ben", 10));
    }

    #[test]
    fn test_partial_hour_not_available() {
        let shifts = vec![CrewShift::new("ana", 570, 720)];
        let avail = Availability::build("DEMO", &crew(&["ana"]), &shifts);
        assert_eq!(avail.count(9), 0);
        assert_eq!(avail.count(10), 1);
        assert_eq!(avail.count(11), 1);
    }

    #[test]
    fn test_one_hour_each_gives_flat_profile() {
        let shifts = shifts(&[("ana", 9, 10), ("ben", 10, 11), ("cleo", 11, 12)]);
        let avail = Availability::build("DEMO", &crew(&["ana", "ben", "cleo"]), &shifts);
        assert_eq!(&avail.counts()[9..12], &[1, 1, 1]);
        assert_eq!(avail.counts().iter().sum::<usize>(), 3);
    }

    #[test]
    fn test_split_shifts_merge() {
        let shifts = shifts(&[("ana", 8, 10), ("ana", 14, 16)]);
        let avail = Availability::build("DEMO", &crew(&["ana"]), &shifts);
        assert_eq!(avail.count(9), 1);
        assert_eq!(avail.count(12), 0);
        assert_eq!(avail.count(15), 1);
    }

    #[test]
    fn test_distinct_crew_over_span() {
        let shifts = shifts(&[("ana", 9, 12), ("ben", 10, 12)]);
        let avail = Availability::build("DEMO", &crew(&["ana", "ben"]), &shifts);
        assert_eq!(avail.distinct_crew(9, 12).len(), 2);
        assert_eq!(avail.distinct_crew(9, 10).len(), 1);
        assert_eq!(avail.count(30), 0);
    }
}
