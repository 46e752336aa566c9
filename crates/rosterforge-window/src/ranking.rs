//! Ranking of window pairs.

use std::time::Instant;

use rayon::prelude::*;
use rosterforge_config::SearchConfig;
use rosterforge_core::{CrewId, CrewShift, RoleId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::availability::Availability;
use crate::search::{count_non_conflicting_assignments, SearchOutcome, SearchStats, WindowAssignment};
use crate::windows::{find_all_longest_windows, HourWindow};

/// Crew allowed to work a promotional role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEligibility {
    pub role_id: RoleId,
    pub crew: Vec<CrewId>,
}

impl RoleEligibility {
    pub fn new<I, S>(role_id: impl Into<RoleId>, crew: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CrewId>,
    {
        Self {
            role_id: role_id.into(),
            crew: crew.into_iter().map(Into::into).collect(),
        }
    }
}

/// A feasible window pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPair {
    pub primary: HourWindow,
    pub secondary: HourWindow,
    /// Distinct staffings found; a lower bound when `complete` is false.
    pub count: u64,
    pub complete: bool,
    pub witness: WindowAssignment,
    pub stats: SearchStats,
}

/// Every feasible pair of longest windows, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRanking {
    pub primary_windows: Vec<HourWindow>,
    pub secondary_windows: Vec<HourWindow>,
    pub pairs: Vec<RankedPair>,
    /// Pairs whose search hit the budget, kept or dropped.
    pub incomplete_pairs: usize,
}

impl WindowRanking {
    /// No pair could be staffed. A legitimate outcome, not an error.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn best(&self) -> Option<&RankedPair> {
        self.pairs.first()
    }
}

/// Finds and ranks promotional window pairs.
///
/// # Example
///
/// ```
/// use rosterforge_config::SearchConfig;
/// use rosterforge_core::CrewShift;
/// use rosterforge_window::{HourWindow, RoleEligibility, WindowScheduler};
///
/// let shifts = vec![
///     CrewShift::from_hours("ana", 9, 12),
///     CrewShift::from_hours("ben", 10, 12),
///     CrewShift::from_hours("cleo", 11, 12),
///     CrewShift::from_hours("dan", 14, 16),
///     CrewShift::from_hours("eve", 14, 16),
/// ];
/// let demo = RoleEligibility::new("DEMO", ["ana", "ben", "cleo"]);
/// let wine = RoleEligibility::new("WINE_DEMO", ["dan", "eve"]);
///
/// let ranking = WindowScheduler::new(SearchConfig::default()).rank(&demo, &wine, &shifts);
/// let best = ranking.best().unwrap();
/// assert_eq!(best.primary, HourWindow::new(9, 12));
/// assert_eq!(best.secondary, HourWindow::new(14, 16));
/// assert_eq!(best.count, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowScheduler {
    search: SearchConfig,
}

impl WindowScheduler {
    pub fn new(search: SearchConfig) -> Self {
        Self { search }
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Builds availability for both roles and ranks their longest windows.
    pub fn rank(
        &self,
        primary: &RoleEligibility,
        secondary: &RoleEligibility,
        shifts: &[CrewShift],
    ) -> WindowRanking {
        let primary = Availability::build(primary.role_id.clone(), &primary.crew, shifts);
        let secondary = Availability::build(secondary.role_id.clone(), &secondary.crew, shifts);
        self.rank_availability(&primary, &secondary)
    }

    /// Ranks every pair of longest windows by staffing count, descending.
    ///
    /// Pairs with no staffing are dropped. Equal counts keep window order.
    pub fn rank_availability(&self, primary: &Availability, secondary: &Availability) -> WindowRanking {
        let started = Instant::now();
        let primary_windows = find_all_longest_windows(primary);
        let secondary_windows = find_all_longest_windows(secondary);
        let candidates: Vec<(HourWindow, HourWindow)> = primary_windows
            .iter()
            .flat_map(|&p| secondary_windows.iter().map(move |&s| (p, s)))
            .collect();

        info!(
            event = "ranking_start",
            primary = primary.role_id(),
            secondary = secondary.role_id(),
            primary_windows = primary_windows.len(),
            secondary_windows = secondary_windows.len(),
            pairs = candidates.len(),
        );

        let search = |&(p, s): &(HourWindow, HourWindow)| {
            let outcome = count_non_conflicting_assignments((primary, p), (secondary, s), &self.search);
            (p, s, outcome)
        };
        let outcomes: Vec<(HourWindow, HourWindow, SearchOutcome)> = if self.search.parallel {
            candidates.par_iter().map(search).collect()
        } else {
            candidates.iter().map(search).collect()
        };

        let incomplete_pairs = outcomes.iter().filter(|(_, _, o)| !o.complete).count();
        let mut pairs: Vec<RankedPair> = outcomes
            .into_iter()
            .filter(|(_, _, o)| o.count > 0)
            .filter_map(|(primary, secondary, o)| {
                Some(RankedPair {
                    primary,
                    secondary,
                    count: o.count,
                    complete: o.complete,
                    witness: o.witness?,
                    stats: o.stats,
                })
            })
            .collect();
        pairs.sort_by(|a, b| b.count.cmp(&a.count));

        info!(
            event = "ranking_end",
            feasible_pairs = pairs.len(),
            incomplete_pairs,
            duration_ms = started.elapsed().as_millis() as u64,
        );
        WindowRanking {
            primary_windows,
            secondary_windows,
            pairs,
            incomplete_pairs,
        }
    }
}
