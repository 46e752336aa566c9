//! Longest feasible windows for one role.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use rosterforge_core::clock::{format_12h, hour_bounds, HOURS_PER_DAY};
use serde::{Deserialize, Serialize};

use crate::availability::Availability;

/// A continuous `[start_hour, end_hour)` run of hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HourWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl HourWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn hours(&self) -> Range<u32> {
        self.start_hour..self.end_hour
    }

    pub fn len(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for HourWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_12h(hour_bounds(self.start_hour).0),
            format_12h(hour_bounds(self.end_hour).0)
        )
    }
}

/// Furthest end for a window starting at `start`.
///
/// Each hour must have someone available, and since a crew member can
/// work only one hour of the role, a span of `n` hours needs at least `n`
/// distinct crew across it.
fn extend_from(avail: &Availability, start: u32) -> u32 {
    let mut distinct: BTreeSet<&str> = BTreeSet::new();
    let mut end = start;
    while (end as usize) < HOURS_PER_DAY && avail.count(end) > 0 {
        distinct.extend(avail.crew_at(end));
        if distinct.len() < (end + 1 - start) as usize {
            break;
        }
        end += 1;
    }
    end
}

/// Every window of globally maximal length, ordered by start.
///
/// Ties are all kept. Returns an empty list when no hour has anyone
/// available.
///
/// # Example
///
/// ```
/// use rosterforge_core::CrewShift;
/// use rosterforge_window::{find_all_longest_windows, Availability, HourWindow};
///
/// let shifts = vec![
///     CrewShift::from_hours("ana", 9, 12),
///     CrewShift::from_hours("ben", 10, 12),
///     CrewShift::from_hours("cleo", 11, 12),
/// ];
/// let eligible: Vec<String> = ["ana", "ben", "cleo"].iter().map(|s| s.to_string()).collect();
/// let avail = Availability::build("DEMO", &eligible, &shifts);
///
/// assert_eq!(find_all_longest_windows(&avail), vec![HourWindow::new(9, 12)]);
/// ```
pub fn find_all_longest_windows(avail: &Availability) -> Vec<HourWindow> {
    let mut best_len = 0;
    let mut longest = Vec::new();
    for start in 0..HOURS_PER_DAY as u32 {
        let window = HourWindow::new(start, extend_from(avail, start));
        if window.is_empty() || window.len() < best_len {
            continue;
        }
        if window.len() > best_len {
            best_len = window.len();
            longest.clear();
        }
        longest.push(window);
    }
    longest
}
