//! Enemy - The target of every simulated attack

use super::ability::{Ability, AbilityScores};
use super::Creature;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The creature being attacked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EnemyRecord", into = "EnemyRecord")]
pub struct Enemy {
    pub creature: Creature,
    /// Flat bonus added to every saving throw the enemy makes
    pub saving_throw_bonus: i32,
}

impl Default for Enemy {
    fn default() -> Self {
        Enemy {
            creature: Creature {
                name: "Mind Flayer".to_string(),
                armor_class: 15,
                hit_points: 71,
                ..Default::default()
            },
            saving_throw_bonus: 0,
        }
    }
}

impl Enemy {
    /// Default enemy with a given armor class
    pub fn with_armor_class(armor_class: i32) -> Self {
        let mut enemy = Enemy::default();
        enemy.creature.armor_class = armor_class;
        enemy
    }

    pub fn name(&self) -> &str {
        &self.creature.name
    }

    pub fn armor_class(&self) -> i32 {
        self.creature.armor_class
    }

    /// Modifier the enemy adds to a saving throw of the given ability
    pub fn saving_throw_modifier(&self, ability: Ability) -> i32 {
        let mut modifier = self.creature.ability_modifier(ability) + self.saving_throw_bonus;
        if self.creature.saving_throw_proficient {
            modifier += self.creature.proficiency_bonus();
        }
        modifier
    }

    pub fn validate(&self) -> Result<()> {
        self.creature.validate()
    }
}

/// Flat on-disk shape of an enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct EnemyRecord {
    name: String,
    level: u32,
    #[serde(flatten)]
    abilities: AbilityScores,
    armor_class: i32,
    hit_points: i32,
    damage_reduction: i32,
    resistance: bool,
    vulnerability: bool,
    saving_throw_proficient: bool,
    saving_throw_bonus: i32,
}

impl Default for EnemyRecord {
    fn default() -> Self {
        Enemy::default().into()
    }
}

impl From<EnemyRecord> for Enemy {
    fn from(r: EnemyRecord) -> Self {
        Enemy {
            creature: Creature {
                name: r.name,
                level: r.level,
                abilities: r.abilities,
                armor_class: r.armor_class,
                hit_points: r.hit_points,
                damage_reduction: r.damage_reduction,
                resistance: r.resistance,
                vulnerability: r.vulnerability,
                saving_throw_proficient: r.saving_throw_proficient,
                attacks: Vec::new(),
            },
            saving_throw_bonus: r.saving_throw_bonus,
        }
    }
}

impl From<Enemy> for EnemyRecord {
    fn from(e: Enemy) -> Self {
        EnemyRecord {
            name: e.creature.name,
            level: e.creature.level,
            abilities: e.creature.abilities,
            armor_class: e.creature.armor_class,
            hit_points: e.creature.hit_points,
            damage_reduction: e.creature.damage_reduction,
            resistance: e.creature.resistance,
            vulnerability: e.creature.vulnerability,
            saving_throw_proficient: e.creature.saving_throw_proficient,
            saving_throw_bonus: e.saving_throw_bonus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enemy() {
        let enemy = Enemy::default();
        assert_eq!(enemy.armor_class(), 15);
        assert_eq!(enemy.creature.hit_points, 71);
    }

    #[test]
    fn test_saving_throw_modifier() {
        let mut enemy = Enemy::default();
        enemy.creature.abilities.dexterity = 14;
        enemy.creature.level = 5;
        assert_eq!(enemy.saving_throw_modifier(Ability::Dexterity), 2);

        enemy.creature.saving_throw_proficient = true;
        enemy.saving_throw_bonus = 1;
        // 2 + 3 proficiency + 1 bonus
        assert_eq!(enemy.saving_throw_modifier(Ability::Dexterity), 6);
    }

    #[test]
    fn test_deserialize_keeps_enemy_defaults() {
        let enemy: Enemy = toml::from_str(
            r#"
name = "Ogre"
resistance = true
strength = 19
"#,
        )
        .unwrap();
        assert_eq!(enemy.name(), "Ogre");
        assert_eq!(enemy.armor_class(), 15);
        assert!(enemy.creature.resistance);
        assert_eq!(enemy.creature.abilities.strength, 19);
    }
}
