//! Scenario format.

use std::fs;
use std::path::Path;

use rosterforge_config::EngineConfig;
use rosterforge_core::{CrewId, RoleId};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A declarative constraint scenario.
///
/// `solverInput` is opaque to the harness and handed to the solver as-is.
/// `config` overrides the runner's base configuration for this scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    /// The rule the scenario exercises, e.g. `HOURLY_COVERAGE`.
    pub constraint_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EngineConfig>,
    #[serde(default)]
    pub solver_input: serde_json::Value,
    pub expectations: Expectations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectations {
    /// Whether the solver should produce a roster that passes every rule.
    pub should_succeed: bool,
    #[serde(default)]
    pub required_assignments: Vec<RequiredAssignment>,
}

/// A crew member that must appear on a role, optionally with a slot range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredAssignment {
    pub crew_id: CrewId,
    pub role: RoleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_slots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slots: Option<u32>,
}

impl Scenario {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Loads every scenario in a file: a single scenario or a list of them,
    /// as YAML for `.yaml`/`.yml` and JSON otherwise.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if yaml {
            Self::parse_many(serde_yaml::from_str::<OneOrMany>(&contents)?)
        } else {
            Self::parse_many(serde_json::from_str::<OneOrMany>(&contents)?)
        }
    }

    fn parse_many(parsed: OneOrMany) -> Result<Vec<Self>> {
        Ok(match parsed {
            OneOrMany::One(scenario) => vec![*scenario],
            OneOrMany::Many(scenarios) => scenarios,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Scenario>),
    One(Box<Scenario>),
}
