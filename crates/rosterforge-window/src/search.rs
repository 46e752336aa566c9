//! Budgeted backtracking over a pair of windows.
//!
//! The search walks the hours of the primary window, then the hours of the
//! secondary window, picking one available crew member per hour. State is
//! mutated in place and undone on the way back up.

use std::collections::BTreeSet;
use std::time::Instant;

use rosterforge_config::SearchConfig;
use rosterforge_core::clock::{hour_bounds, HOURS_PER_DAY};
use rosterforge_core::{Assignment, CrewId, RoleId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::availability::Availability;
use crate::windows::HourWindow;

/// Nodes between wall-clock checks.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Slot role index of the primary window; the secondary is 1.
const PRIMARY: usize = 0;

/// One crew member placed on one hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourPick {
    pub hour: u32,
    pub crew_id: CrewId,
}

/// A concrete staffing of both windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowAssignment {
    pub primary_role: RoleId,
    pub secondary_role: RoleId,
    pub primary: Vec<HourPick>,
    pub secondary: Vec<HourPick>,
}

impl WindowAssignment {
    /// One-hour assignments for both roles.
    pub fn to_assignments(&self) -> Vec<Assignment> {
        let role_picks = [
            (&self.primary_role, &self.primary),
            (&self.secondary_role, &self.secondary),
        ];
        role_picks
            .into_iter()
            .flat_map(|(role, picks)| {
                picks.iter().map(move |p| {
                    let (start, end) = hour_bounds(p.hour);
                    Assignment::new(p.crew_id.clone(), role.clone(), start, end)
                })
            })
            .collect()
    }

    /// Checks the staffing rules: each window hour staffed exactly once by
    /// an available crew member, nobody twice in a role, and nobody in both
    /// roles at the same hour.
    pub fn verify(
        &self,
        primary: (&Availability, HourWindow),
        secondary: (&Availability, HourWindow),
    ) -> bool {
        let role_ok = |picks: &[HourPick], (avail, window): (&Availability, HourWindow)| {
            let hours: Vec<u32> = picks.iter().map(|p| p.hour).collect();
            let crew: BTreeSet<&str> = picks.iter().map(|p| p.crew_id.as_str()).collect();
            hours == window.hours().collect::<Vec<_>>()
                && crew.len() == picks.len()
                && picks.iter().all(|p| avail.is_available(&p.crew_id, p.hour))
        };
        let no_double_booking = self.primary.iter().all(|p| {
            !self
                .secondary
                .iter()
                .any(|s| s.hour == p.hour && s.crew_id == p.crew_id)
        });
        role_ok(&self.primary, primary) && role_ok(&self.secondary, secondary) && no_double_booking
    }
}

/// Work done by one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub elapsed_ms: u64,
}

/// Result of counting the staffings of a window pair.
///
/// When the budget runs out, `complete` is false and `count` is the number
/// of staffings found so far: a lower bound, never an overestimate. Any
/// staffing found, complete or not, is kept as the witness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub count: u64,
    pub complete: bool,
    pub witness: Option<WindowAssignment>,
    pub stats: SearchStats,
}

/// One hour of one role, with the crew who could take it.
#[derive(Debug)]
struct Slot {
    role: usize,
    hour: u32,
    candidates: SmallVec<[usize; 8]>,
}

/// Mutable search state. Every `take` is paired with a `release`.
#[derive(Debug)]
struct SearchState {
    crew_count: usize,
    used: [Vec<bool>; 2],
    /// `busy[hour * crew_count + crew]`
    busy: Vec<bool>,
    picks: Vec<usize>,
}

impl SearchState {
    fn new(crew_count: usize) -> Self {
        Self {
            crew_count,
            used: [vec![false; crew_count], vec![false; crew_count]],
            busy: vec![false; HOURS_PER_DAY * crew_count],
            picks: Vec::new(),
        }
    }

    fn busy_index(&self, hour: u32, crew: usize) -> usize {
        hour as usize * self.crew_count + crew
    }

    fn can_take(&self, role: usize, hour: u32, crew: usize) -> bool {
        !self.used[role][crew] && !self.busy[self.busy_index(hour, crew)]
    }

    fn take(&mut self, role: usize, hour: u32, crew: usize) {
        let idx = self.busy_index(hour, crew);
        self.used[role][crew] = true;
        self.busy[idx] = true;
        self.picks.push(crew);
    }

    fn release(&mut self, role: usize, hour: u32, crew: usize) {
        let idx = self.busy_index(hour, crew);
        self.used[role][crew] = false;
        self.busy[idx] = false;
        self.picks.pop();
    }

    fn is_clean(&self) -> bool {
        self.picks.is_empty()
            && self.used.iter().all(|u| u.iter().all(|b| !b))
            && self.busy.iter().all(|b| !b)
    }
}

struct Search<'a> {
    crew: Vec<&'a str>,
    slots: Vec<Slot>,
    state: SearchState,
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    nodes: u64,
    count: u64,
    exhausted: bool,
    witness: Option<Vec<usize>>,
}

impl<'a> Search<'a> {
    fn new(
        primary: (&'a Availability, HourWindow),
        secondary: (&'a Availability, HourWindow),
        budget: &SearchConfig,
    ) -> Self {
        let roles = [primary, secondary];
        let crew: Vec<&str> = roles
            .iter()
            .flat_map(|&(avail, window)| window.hours().flat_map(move |h| avail.crew_at(h)))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index_of = |id: &str| crew.binary_search(&id).ok();

        let slots = roles
            .iter()
            .enumerate()
            .flat_map(|(role, &(avail, window))| window.hours().map(move |hour| (role, avail, hour)))
            .map(|(role, avail, hour)| Slot {
                role,
                hour,
                candidates: avail.crew_at(hour).filter_map(index_of).collect(),
            })
            .collect();

        Self {
            state: SearchState::new(crew.len()),
            crew,
            slots,
            node_limit: budget.node_limit,
            deadline: budget.time_limit().map(|limit| Instant::now() + limit),
            nodes: 0,
            count: 0,
            exhausted: false,
            witness: None,
        }
    }

    fn over_budget(&self) -> bool {
        if self.node_limit.is_some_and(|limit| self.nodes > limit) {
            return true;
        }
        self.nodes % CLOCK_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn explore(&mut self, depth: usize) {
        self.nodes += 1;
        if self.over_budget() {
            self.exhausted = true;
            return;
        }
        if depth == self.slots.len() {
            self.count += 1;
            if self.witness.is_none() {
                self.witness = Some(self.state.picks.clone());
            }
            return;
        }
        let (role, hour) = (self.slots[depth].role, self.slots[depth].hour);
        for i in 0..self.slots[depth].candidates.len() {
            let crew = self.slots[depth].candidates[i];
            if !self.state.can_take(role, hour, crew) {
                continue;
            }
            self.state.take(role, hour, crew);
            self.explore(depth + 1);
            self.state.release(role, hour, crew);
            if self.exhausted {
                return;
            }
        }
    }

    fn witness_assignment(&self, primary_role: &str, secondary_role: &str) -> Option<WindowAssignment> {
        let picks = self.witness.as_ref()?;
        let mut assignment = WindowAssignment {
            primary_role: primary_role.to_string(),
            secondary_role: secondary_role.to_string(),
            primary: Vec::new(),
            secondary: Vec::new(),
        };
        for (slot, &crew) in self.slots.iter().zip(picks) {
            let pick = HourPick {
                hour: slot.hour,
                crew_id: self.crew[crew].to_string(),
            };
            match slot.role {
                PRIMARY => assignment.primary.push(pick),
                _ => assignment.secondary.push(pick),
            }
        }
        Some(assignment)
    }
}

/// Counts the distinct staffings of a primary and a secondary window.
///
/// Stops at the budget in `budget` and reports a partial count. Empty
/// windows contribute no hours, so two empty windows count as one (empty)
/// staffing.
///
/// # Example
///
/// ```
/// use rosterforge_config::SearchConfig;
/// use rosterforge_core::CrewShift;
/// use rosterforge_window::{count_non_conflicting_assignments, Availability, HourWindow};
///
/// let shifts = vec![CrewShift::from_hours("ana", 9, 11), CrewShift::from_hours("ben", 9, 11)];
/// let crew: Vec<String> = vec!["ana".into(), "ben".into()];
/// let demo = Availability::build("DEMO", &crew, &shifts);
/// let wine = Availability::build("WINE_DEMO", &crew, &shifts);
///
/// let outcome = count_non_conflicting_assignments(
///     (&demo, HourWindow::new(9, 10)),
///     (&wine, HourWindow::new(9, 10)),
///     &SearchConfig::default(),
/// );
/// // ana on DEMO with ben on WINE_DEMO, or the other way round.
/// assert_eq!(outcome.count, 2);
/// assert!(outcome.complete);
/// ```
pub fn count_non_conflicting_assignments(
    primary: (&Availability, HourWindow),
    secondary: (&Availability, HourWindow),
    budget: &SearchConfig,
) -> SearchOutcome {
    let started = Instant::now();
    let mut search = Search::new(primary, secondary, budget);
    search.explore(0);
    debug_assert!(search.state.is_clean());

    let stats = SearchStats {
        nodes: search.nodes,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    if search.exhausted {
        warn!(
            event = "search_budget_exhausted",
            primary = %primary.1,
            secondary = %secondary.1,
            nodes = stats.nodes,
            partial_count = search.count,
        );
    } else {
        debug!(
            event = "pair_searched",
            primary = %primary.1,
            secondary = %secondary.1,
            nodes = stats.nodes,
            count = search.count,
        );
    }
    SearchOutcome {
        count: search.count,
        complete: !search.exhausted,
        witness: search.witness_assignment(primary.0.role_id(), secondary.0.role_id()),
        stats,
    }
}

#[cfg(test)]
mod tests;
