//! Configuration system for RosterForge.
//!
//! Load the store, its roles, headcount requirements, banking policy and the
//! window-search budget from TOML or YAML without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use rosterforge_config::EngineConfig;
//! use std::time::Duration;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     [store]
//!     base_slot_minutes = 60
//!     open_minutes_from_midnight = 480
//!     close_minutes_from_midnight = 1320
//!     req_shift_length_for_break = 360
//!     break_window_start = 120
//!     break_window_end = 240
//!
//!     [[roles]]
//!     code = "REGISTER"
//!     assignment_model = "HOURLY"
//!
//!     [[roles]]
//!     code = "DEMO"
//!     assignment_model = "COVERAGE_WINDOW"
//!     max_slots = 1
//!
//!     [[window_requirements]]
//!     role_id = "DEMO"
//!     start_hour = 10
//!     end_hour = 14
//!     required_per_hour = 1
//!
//!     [search]
//!     millis_spent_limit = 2000
//! "#).unwrap();
//!
//! assert_eq!(config.roles.len(), 2);
//! assert_eq!(config.search.time_limit(), Some(Duration::from_secs(2)));
//! assert!(config.validate().is_ok());
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use rosterforge_config::EngineConfig;
//!
//! let config = EngineConfig::load("roster.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use rosterforge_core::{HourlyRequirement, RoleConfig, RosterError, StoreConfig, WindowRequirement};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete engine configuration for one store.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Store hours, slot size and break rule.
    #[serde(default)]
    pub store: StoreConfig,

    /// Role rules, keyed by `code`.
    #[serde(default)]
    pub roles: Vec<RoleConfig>,

    /// Exact headcount targets for HOURLY roles.
    #[serde(default)]
    pub hourly_requirements: Vec<HourlyRequirement>,

    /// Exact headcount targets for COVERAGE_WINDOW roles.
    #[serde(default)]
    pub window_requirements: Vec<WindowRequirement>,

    /// Banked preference policy.
    #[serde(default)]
    pub banking: BankingConfig,

    /// Window combination search budget.
    #[serde(default)]
    pub search: SearchConfig,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the store configuration.
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Adds a role.
    pub fn with_role(mut self, role: RoleConfig) -> Self {
        self.roles.push(role);
        self
    }

    /// Adds an hourly requirement.
    pub fn with_hourly_requirement(mut self, requirement: HourlyRequirement) -> Self {
        self.hourly_requirements.push(requirement);
        self
    }

    /// Adds a coverage window requirement.
    pub fn with_window_requirement(mut self, requirement: WindowRequirement) -> Self {
        self.window_requirements.push(requirement);
        self
    }

    /// Sets the search node limit.
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.search.node_limit = Some(node_limit);
        self
    }

    /// Looks up a role by code.
    pub fn role(&self, code: &str) -> Option<&RoleConfig> {
        self.roles.iter().find(|r| r.code == code)
    }

    /// Checks every invariant of the configuration.
    ///
    /// Configuration problems reject the whole run rather than producing a
    /// misleading partial result.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()?;

        let mut codes = HashSet::new();
        for role in &self.roles {
            role.validate()?;
            if !codes.insert(role.code.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate role code: {}",
                    role.code
                )));
            }
        }

        for req in &self.hourly_requirements {
            req.validate()?;
            if !codes.contains(req.role_id.as_str()) {
                return Err(RosterError::UnknownRole(req.role_id.clone()).into());
            }
        }
        for req in &self.window_requirements {
            req.validate()?;
            if !codes.contains(req.role_id.as_str()) {
                return Err(RosterError::UnknownRole(req.role_id.clone()).into());
            }
        }

        self.banking.validate()?;
        Ok(())
    }
}

/// Banked preference policy.
///
/// ```
/// use rosterforge_config::BankingConfig;
///
/// let banking = BankingConfig::default();
/// assert_eq!(banking.max_multiplier, 3.0);
/// assert_eq!(banking.capped_multiplier(0), 1.0);
/// assert_eq!(banking.capped_multiplier(10_000), 3.0);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BankingConfig {
    /// Upper bound on weight growth, as a multiple of the original weight.
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: f64,

    /// Extra multiplier applied when a banked preference is redeemed.
    #[serde(default = "default_banking_bonus")]
    pub banking_bonus: f64,

    /// Days a banked preference stays redeemable.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: u32,

    /// How weight grows with age.
    #[serde(default)]
    pub growth: AgeGrowth,
}

fn default_max_multiplier() -> f64 {
    3.0
}

fn default_banking_bonus() -> f64 {
    1.5
}

fn default_expiry_days() -> u32 {
    14
}

impl Default for BankingConfig {
    fn default() -> Self {
        Self {
            max_multiplier: default_max_multiplier(),
            banking_bonus: default_banking_bonus(),
            expiry_days: default_expiry_days(),
            growth: AgeGrowth::default(),
        }
    }
}

impl BankingConfig {
    /// Age multiplier clamped to `[1, max_multiplier]`.
    pub fn capped_multiplier(&self, days_old: u32) -> f64 {
        self.growth
            .multiplier(days_old)
            .clamp(1.0, self.max_multiplier.max(1.0))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_multiplier.is_nan() || self.max_multiplier < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "banking.max_multiplier must be at least 1.0, got {}",
                self.max_multiplier
            )));
        }
        if self.banking_bonus.is_nan() || self.banking_bonus <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "banking.banking_bonus must be positive, got {}",
                self.banking_bonus
            )));
        }
        self.growth.validate()
    }
}

/// Age growth function for banked weights. Every variant is non-decreasing
/// in age and equals 1.0 on the day of banking.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgeGrowth {
    /// No growth.
    Flat,

    /// `1 + per_day × days`.
    Linear { per_day: f64 },

    /// `(1 + daily_rate)^days`.
    Exponential { daily_rate: f64 },
}

impl Default for AgeGrowth {
    fn default() -> Self {
        AgeGrowth::Linear { per_day: 0.1 }
    }
}

impl AgeGrowth {
    /// Uncapped multiplier for a preference banked `days_old` days ago.
    pub fn multiplier(&self, days_old: u32) -> f64 {
        let days = f64::from(days_old);
        match *self {
            AgeGrowth::Flat => 1.0,
            AgeGrowth::Linear { per_day } => 1.0 + per_day * days,
            AgeGrowth::Exponential { daily_rate } => (1.0 + daily_rate).powf(days),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let rate = match *self {
            AgeGrowth::Flat => return Ok(()),
            AgeGrowth::Linear { per_day } => per_day,
            AgeGrowth::Exponential { daily_rate } => daily_rate,
        };
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "banking growth rate must be a non-negative number, got {rate}"
            )));
        }
        Ok(())
    }
}

/// Budget for the window combination search.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Maximum backtracking nodes per window pair (None = unlimited).
    #[serde(default = "default_node_limit")]
    pub node_limit: Option<u64>,

    /// Maximum milliseconds per window pair.
    #[serde(default)]
    pub millis_spent_limit: Option<u64>,

    /// Evaluate window pairs on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_node_limit() -> Option<u64> {
    Some(5_000_000)
}

fn default_parallel() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            node_limit: default_node_limit(),
            millis_spent_limit: None,
            parallel: default_parallel(),
        }
    }
}

impl SearchConfig {
    /// An unbounded, sequential search. Only suitable for small inputs.
    pub fn unbounded() -> Self {
        Self {
            node_limit: None,
            millis_spent_limit: None,
            parallel: false,
        }
    }

    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    pub fn with_millis_spent_limit(mut self, millis: u64) -> Self {
        self.millis_spent_limit = Some(millis);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.millis_spent_limit.map(Duration::from_millis)
    }
}
