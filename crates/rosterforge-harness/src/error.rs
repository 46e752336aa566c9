//! Error types for the scenario harness.

use rosterforge_config::ConfigError;
use rosterforge_core::RosterError;
use thiserror::Error;

/// Failures that stop a scenario from being evaluated at all.
///
/// A scenario whose roster breaks a rule is not an error; it is a report
/// that may or may not match the scenario's expectations.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The solver could not be run or returned output it cannot stand behind
    #[error("Solver error: {0}")]
    Solver(String),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
