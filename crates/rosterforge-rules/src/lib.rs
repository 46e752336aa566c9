//! Rule validation for finished rosters.
//!
//! This crate checks a set of assignments against the hard rules of a store:
//! - Block analysis (`blocks`): merging a crew member's day into same-role runs
//! - Store hours (`store_hours`)
//! - Exact hourly headcount (`hourly`)
//! - Exact headcount across a coverage window (`window`)
//! - Block sizes and fragmentation (`slots`)
//! - The roster-level validator that runs every rule (`roster`)
//!
//! Rule violations are data, not errors: every rule enumerates all of its
//! violations. Only malformed configuration returns `Err`.

pub mod blocks;
pub mod hourly;
pub mod roster;
pub mod slots;
pub mod store_hours;
pub mod window;

use rosterforge_core::{Assignment, Result, ValidationResult};

pub use blocks::{
    consecutive_blocks, crew_day, longest_consecutive_block, role_switches, Block, SwitchCount,
};
pub use hourly::HourlyCoverageValidator;
pub use roster::RosterValidator;
pub use slots::ConsecutiveAndSlotSizeValidator;
pub use store_hours::{check_assignment, StoreHoursValidator};
pub use window::{HourCoverage, WindowCoverageValidator};

/// A hard rule over a finished set of assignments.
pub trait RosterRule: Send + Sync {
    /// Checks every assignment and returns all violations found.
    ///
    /// # Errors
    ///
    /// Returns an error only when the assignments cannot be interpreted
    /// against the configuration, e.g. an unknown role code.
    fn validate(&self, assignments: &[Assignment]) -> Result<ValidationResult>;

    /// Returns the rule name.
    fn name(&self) -> &str;
}
