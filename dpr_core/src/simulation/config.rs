//! Simulation configuration.

use crate::error::{DprError, Result};
use serde::{Deserialize, Serialize};

/// Armor classes swept when a scenario names none
pub const DEFAULT_ARMOR_CLASSES: std::ops::RangeInclusive<i32> = 10..=25;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of rounds simulated per attack
    pub trials: usize,

    /// Random seed for reproducibility (None = shuffle from OS entropy)
    pub seed: Option<u64>,

    /// Ignore `seed` and draw from OS entropy
    pub shuffle: bool,

    /// Keep only the damage column of each per-attack table
    pub save_memory: bool,

    /// Armor classes for a sweep (empty = 10 through 25)
    pub armor_classes: Vec<i32>,

    /// Sweep summaries per round total (true) or per attack (false)
    pub group_by_round: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: 10_000,
            seed: Some(1),
            shuffle: false,
            save_memory: false,
            armor_classes: Vec::new(),
            group_by_round: true,
        }
    }
}

impl SimConfig {
    /// Small, fixed-seed config for tests and quick checks
    pub fn quick(trials: usize) -> Self {
        Self {
            trials,
            ..Default::default()
        }
    }

    /// Seed actually used: `None` when shuffling
    pub fn effective_seed(&self) -> Option<u64> {
        if self.shuffle {
            None
        } else {
            self.seed
        }
    }

    /// Armor classes to sweep, falling back to the default range
    pub fn sweep_armor_classes(&self) -> Vec<i32> {
        if self.armor_classes.is_empty() {
            DEFAULT_ARMOR_CLASSES.collect()
        } else {
            self.armor_classes.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_trials(self.trials)?;
        validate_armor_classes(&self.armor_classes)
    }
}

pub(crate) fn validate_trials(trials: usize) -> Result<()> {
    if trials == 0 {
        return Err(DprError::validation("trial count must be positive"));
    }
    Ok(())
}

pub(crate) fn validate_armor_classes(armor_classes: &[i32]) -> Result<()> {
    if let Some(ac) = armor_classes.iter().find(|&&ac| ac < 0) {
        return Err(DprError::validation(format!("armor class must be non-negative, got {}", ac)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.trials, 10_000);
        assert_eq!(config.seed, Some(1));
        assert!(config.group_by_round);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_sweep_range() {
        let acs = SimConfig::default().sweep_armor_classes();
        assert_eq!(acs.len(), 16);
        assert_eq!(acs.first(), Some(&10));
        assert_eq!(acs.last(), Some(&25));

        let config = SimConfig {
            armor_classes: vec![12, 18],
            ..Default::default()
        };
        assert_eq!(config.sweep_armor_classes(), vec![12, 18]);
    }

    #[test]
    fn test_shuffle_drops_seed() {
        let config = SimConfig {
            shuffle: true,
            ..Default::default()
        };
        assert_eq!(config.effective_seed(), None);
        assert_eq!(SimConfig::default().effective_seed(), Some(1));
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert!(matches!(SimConfig::quick(0).validate(), Err(DprError::Validation(_))));
    }

    #[test]
    fn test_negative_armor_class_rejected() {
        let config = SimConfig {
            armor_classes: vec![15, -1],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DprError::Validation(_))));
    }
}
