//! RosterForge Core - Core types for roster verification
//!
//! This crate provides the fundamental vocabulary shared by every RosterForge crate:
//! - Domain types: assignments, store and role configuration, preferences
//! - Coverage requirements (hourly and window)
//! - Validation results
//! - Clock helpers for minute-of-day arithmetic and 12-hour formatting

pub mod clock;
pub mod domain;
pub mod error;
pub mod validation;

pub use domain::{
    Assignment, AssignmentModel, CrewId, CrewShift, HourlyRequirement, PreferenceDeclaration,
    PreferenceType, RoleConfig, RoleId, StoreConfig, TimingDirection, WindowRequirement,
};
pub use error::{Result, RosterError};
pub use validation::ValidationResult;
