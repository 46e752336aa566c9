//! Roster domain types.
//!
//! | type | meaning |
//! |------|---------|
//! | [`Assignment`] | one crew member on one role for a half-open minute interval |
//! | [`CrewShift`] | the span a crew member is on the clock |
//! | [`StoreConfig`] | store hours, slot size, break rule |
//! | [`RoleConfig`] | per-role rules and assignment model |
//! | [`PreferenceDeclaration`] | a soft crew preference |
//! | [`HourlyRequirement`], [`WindowRequirement`] | exact headcount targets |

mod assignment;
mod coverage;
mod preference;
mod role;
mod store;

pub use assignment::{Assignment, CrewShift};
pub use coverage::{HourlyRequirement, WindowRequirement};
pub use preference::{PreferenceDeclaration, PreferenceType, TimingDirection};
pub use role::{AssignmentModel, RoleConfig};
pub use store::StoreConfig;

/// Identifier of a crew member.
pub type CrewId = String;

/// Identifier of a role; matches [`RoleConfig::code`].
pub type RoleId = String;

#[cfg(test)]
mod tests;
