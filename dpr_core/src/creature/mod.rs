//! Combatant model - Creature base record, Character, Enemy and Attack
//!
//! These are plain value records. Derived numbers (ability modifiers,
//! proficiency, spell DC) are computed on demand and never stored.

mod ability;
mod attack;
mod character;
mod enemy;

pub use ability::{ability_modifier, proficiency_bonus, Ability, AbilityScores};
pub use attack::{Attack, AttackType, DamageType};
pub use character::{Character, Feats};
pub use enemy::Enemy;

use crate::error::{DprError, Result};

/// Stats shared by characters and enemies
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub name: String,
    pub level: u32,
    pub abilities: AbilityScores,
    pub armor_class: i32,
    /// Not used by the combat math
    pub hit_points: i32,
    /// Flat reduction applied to each damaging hit
    pub damage_reduction: i32,
    pub resistance: bool,
    pub vulnerability: bool,
    pub saving_throw_proficient: bool,
    pub attacks: Vec<Attack>,
}

impl Default for Creature {
    fn default() -> Self {
        Creature {
            name: "Creature".to_string(),
            level: 1,
            abilities: AbilityScores::default(),
            armor_class: 10,
            hit_points: 12,
            damage_reduction: 0,
            resistance: false,
            vulnerability: false,
            saving_throw_proficient: false,
            attacks: Vec::new(),
        }
    }
}

impl Creature {
    /// Create a default creature with a name
    pub fn named(name: impl Into<String>) -> Self {
        Creature {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn ability_modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    pub fn proficiency_bonus(&self) -> i32 {
        proficiency_bonus(self.level)
    }

    pub fn spell_casting_modifier(&self, ability: Ability) -> i32 {
        self.ability_modifier(ability)
    }

    /// Check level and armor class ranges, then every owned attack
    pub fn validate(&self) -> Result<()> {
        if self.level < 1 {
            return Err(DprError::validation(format!(
                "creature '{}': level must be at least 1",
                self.name
            )));
        }
        if self.armor_class < 0 {
            return Err(DprError::validation(format!(
                "creature '{}': armor class must not be negative, got {}",
                self.name, self.armor_class
            )));
        }
        for attack in &self.attacks {
            attack.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_derived_values() {
        let creature = Creature {
            level: 9,
            abilities: AbilityScores {
                wisdom: 17,
                ..Default::default()
            },
            ..Creature::named("Cleric")
        };
        assert_eq!(creature.proficiency_bonus(), 4);
        assert_eq!(creature.ability_modifier(Ability::Wisdom), 3);
        assert_eq!(creature.spell_casting_modifier(Ability::Wisdom), 3);
    }

    #[test]
    fn test_level_zero_rejected() {
        let creature = Creature {
            level: 0,
            ..Default::default()
        };
        assert!(matches!(creature.validate(), Err(DprError::Validation(_))));
    }

    #[test]
    fn test_negative_armor_class_rejected() {
        let creature = Creature {
            armor_class: -1,
            ..Default::default()
        };
        assert!(matches!(creature.validate(), Err(DprError::Validation(_))));
    }
}
