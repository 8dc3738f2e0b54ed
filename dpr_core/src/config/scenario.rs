//! Scenario files: simulation settings, one enemy and a party of characters

use super::ConfigError;
use crate::creature::{Character, Enemy};
use crate::error::Result;
use crate::simulation::SimConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed for one simulation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub simulation: SimConfig,
    pub enemy: Enemy,
    pub characters: Vec<Character>,
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.enemy.validate()?;
        for character in &self.characters {
            character.validate()?;
        }
        Ok(())
    }
}

/// Load a scenario, picking the format from the file extension
pub fn load_scenario(path: &Path) -> std::result::Result<Scenario, ConfigError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let scenario: Scenario = match extension.as_deref() {
        Some("toml") => super::load_toml(path)?,
        Some("json") => super::load_json(path)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    };
    scenario.validate()?;
    Ok(scenario)
}

/// Parse and validate a TOML scenario
pub fn parse_scenario_toml(content: &str) -> std::result::Result<Scenario, ConfigError> {
    let scenario: Scenario = super::parse_toml(content)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Parse and validate a JSON scenario
pub fn parse_scenario_json(content: &str) -> std::result::Result<Scenario, ConfigError> {
    let scenario: Scenario = super::parse_json(content)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Get the bundled scenario: four greatsword fighters against AC 18
pub fn default_scenario() -> std::result::Result<Scenario, ConfigError> {
    parse_scenario_toml(include_str!("../../config/default_scenario.toml"))
}
