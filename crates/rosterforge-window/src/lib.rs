//! Coverage window combination search.
//!
//! Given two promotional roles (for example DEMO and WINE_DEMO), the crew
//! eligible for each, and the day's shifts, this crate finds every longest
//! window each role could be staffed for and ranks window pairs by how many
//! distinct ways they can be staffed together.
//!
//! The staffing rules are:
//! - one crew member per role per hour
//! - a crew member works at most one hour of each role per day
//! - a crew member never works both roles in the same hour
//!
//! Counting is a budgeted backtracking search; see [`SearchOutcome`] for
//! what a search returns when its budget runs out.

mod availability;
mod ranking;
mod search;
mod windows;

pub use availability::Availability;
pub use ranking::{RankedPair, RoleEligibility, WindowRanking, WindowScheduler};
pub use search::{
    count_non_conflicting_assignments, HourPick, SearchOutcome, SearchStats, WindowAssignment,
};
pub use windows::{find_all_longest_windows, HourWindow};
