//! Soft preference scoring for RosterForge.
//!
//! Two views of the same preferences:
//! - **Satisfaction** (`satisfaction`, `summary`): a 0-1 value per
//!   preference and a weighted average per crew and per day. This is the
//!   roster-quality number persisted with a roster.
//! - **Penalty** (`penalty`): the raw weighted role-switch penalty the
//!   external optimizer minimizes, recomputed here to audit it for drift.

pub mod penalty;
pub mod satisfaction;
pub mod summary;

pub use penalty::{consecutive_penalty, ConsecutivePenaltyScorer, DriftReport, PenaltyReport, PenaltyTerm};
pub use satisfaction::{PreferenceCalculator, SatisfactionResult};
pub use summary::{average_satisfaction, SatisfactionSummary};
