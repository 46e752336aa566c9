//! Error types for RosterForge

use thiserror::Error;

/// Main error type for RosterForge operations.
///
/// Only configuration problems and misuse surface here. A roster that
/// breaks a rule is not an error; it is reported through
/// [`ValidationResult`](crate::ValidationResult).
#[derive(Debug, Error)]
pub enum RosterError {
    /// Malformed store, role, or requirement configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// An assignment or preference references a role with no configuration
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Result type alias for RosterForge operations
pub type Result<T> = std::result::Result<T, RosterError>;
