//! RosterForge - Retail roster verification and promotional window scheduling
//!
//! Checks a day's assignments against store rules, scores crew preferences,
//! banks the ones left unmet, and ranks promotional window pairs.
//!
//! # Example
//!
//! ```rust
//! use rosterforge::prelude::*;
//!
//! let shifts = vec![
//!     CrewShift::from_hours("ana", 9, 12),
//!     CrewShift::from_hours("ben", 10, 12),
//!     CrewShift::from_hours("cleo", 11, 12),
//! ];
//! let demo = RoleEligibility::new("DEMO", ["ana", "ben", "cleo"]);
//! let avail = Availability::build("DEMO", &demo.crew, &shifts);
//! assert_eq!(find_all_longest_windows(&avail), vec![HourWindow::new(9, 12)]);
//! ```

// Domain types and errors
pub use rosterforge_core::{
    clock, Assignment, AssignmentModel, CrewId, CrewShift, HourlyRequirement,
    PreferenceDeclaration, PreferenceType, RoleConfig, RoleId, RosterError, StoreConfig,
    TimingDirection, ValidationResult, WindowRequirement,
};

// Configuration
pub use rosterforge_config::{AgeGrowth, BankingConfig, ConfigError, EngineConfig, SearchConfig};

// Hard rules
pub use rosterforge_rules::{
    role_switches, ConsecutiveAndSlotSizeValidator, HourlyCoverageValidator, RosterRule,
    RosterValidator, StoreHoursValidator, WindowCoverageValidator,
};

// Preference scoring
pub use rosterforge_scoring::{
    average_satisfaction, consecutive_penalty, ConsecutivePenaltyScorer, DriftReport,
    PenaltyReport, PreferenceCalculator, SatisfactionResult, SatisfactionSummary,
};

// Banked preferences
pub use rosterforge_banking::{BankLedger, BankStatus, BankedPreference, BankingError};

// Promotional windows
pub use rosterforge_window::{
    count_non_conflicting_assignments, find_all_longest_windows, Availability, HourWindow,
    RankedPair, RoleEligibility, SearchOutcome, WindowAssignment, WindowRanking, WindowScheduler,
};

// Scenario harness
pub use rosterforge_harness::{
    HarnessError, ReplaySolver, RosterSolver, Scenario, ScenarioRunner, SolverOutcome,
    SuiteReport,
};

mod audit;
pub use audit::{audit_day, close_day, DayAudit, DayClose};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        Assignment, AssignmentModel, CrewShift, HourlyRequirement, PreferenceDeclaration,
        PreferenceType, RoleConfig, StoreConfig, WindowRequirement,
    };
    pub use super::{BankingConfig, EngineConfig, SearchConfig};
    pub use super::{PreferenceCalculator, RosterValidator, SatisfactionSummary};
    pub use super::BankLedger;
    pub use super::{
        find_all_longest_windows, Availability, HourWindow, RoleEligibility, WindowScheduler,
    };
    pub use super::{audit_day, close_day, DayAudit};
}
