//! Character - A player character with global roll modifiers and feats

use super::ability::{Ability, AbilityScores};
use super::attack::Attack;
use super::Creature;
use crate::dice::BonusTerm;
use crate::error::{DprError, Result};
use serde::{Deserialize, Serialize};

/// Feats, fighting styles, racial traits and class features that change the math
///
/// Each flag is an independent input to the context rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feats {
    // Feats
    /// -5 to hit, +10 damage with two-handed melee weapons
    #[serde(alias = "GWM")]
    pub great_weapon_master: bool,
    /// Roll melee weapon damage twice, keep the higher
    pub savage_attacker: bool,
    /// -5 to hit with ranged weapons
    pub sharpshooter: bool,
    /// Strength modifier to unarmed and improvised thrown attack and damage
    pub tavern_brawler: bool,

    // Fighting styles
    pub archery: bool,
    pub dueling: bool,
    /// Reroll 1s and 2s on two-handed weapon damage
    #[serde(alias = "GWF")]
    pub great_weapon_fighting: bool,
    /// Ability modifier to off-hand damage
    #[serde(alias = "TWF")]
    pub two_weapon_fighting: bool,

    // Racial
    /// Half-orc: one extra weapon die on a crit
    pub savage_attacks_half_orc: bool,

    // Barbarian
    pub raging: bool,
    pub brutal_critical: bool,

    // Paladin
    pub divine_smite: bool,
    /// Spell slot level spent on each smite
    pub divine_smite_level: u32,
    pub improved_divine_smite: bool,

    // Warlock
    pub agonizing_blast: bool,
    pub lifedrinker: bool,

    // Wizard
    pub empowered_evocation: bool,

    // Sorcerer
    pub elemental_affinity: bool,
}

impl Default for Feats {
    fn default() -> Self {
        Feats {
            great_weapon_master: false,
            savage_attacker: false,
            sharpshooter: false,
            tavern_brawler: false,
            archery: false,
            dueling: false,
            great_weapon_fighting: false,
            two_weapon_fighting: false,
            savage_attacks_half_orc: false,
            raging: false,
            brutal_critical: false,
            divine_smite: false,
            divine_smite_level: 1,
            improved_divine_smite: false,
            agonizing_blast: false,
            lifedrinker: false,
            empowered_evocation: false,
            elemental_affinity: false,
        }
    }
}

/// A player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CharacterRecord", into = "CharacterRecord")]
pub struct Character {
    pub creature: Creature,

    // === Attack roll ===
    pub advantage: bool,
    pub disadvantage: bool,
    pub crit_on: i32,
    pub attack_reroll_on: i32,

    // === Damage roll ===
    pub damage_reroll_on: i32,

    // === Spellcasting ===
    pub spell_dc_bonus: i32,

    // === Bonus lists applied to every attack ===
    pub bonus_attack: Vec<BonusTerm>,
    pub bonus_damage: Vec<BonusTerm>,
    pub bonus_crit: Vec<BonusTerm>,
    pub bonus_miss: Vec<BonusTerm>,

    pub feats: Feats,
}

impl Default for Character {
    fn default() -> Self {
        Character {
            creature: Creature::named("Character"),
            advantage: false,
            disadvantage: false,
            crit_on: 20,
            attack_reroll_on: 0,
            damage_reroll_on: 0,
            spell_dc_bonus: 0,
            bonus_attack: Vec::new(),
            bonus_damage: Vec::new(),
            bonus_crit: Vec::new(),
            bonus_miss: Vec::new(),
            feats: Feats::default(),
        }
    }
}

impl Character {
    /// Create a character with a name, level, scores and attacks
    pub fn new(name: impl Into<String>, level: u32, abilities: AbilityScores, attacks: Vec<Attack>) -> Self {
        Character {
            creature: Creature {
                name: name.into(),
                level,
                abilities,
                attacks,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.creature.name
    }

    pub fn attacks(&self) -> &[Attack] {
        &self.creature.attacks
    }

    pub fn ability_modifier(&self, ability: Ability) -> i32 {
        self.creature.ability_modifier(ability)
    }

    pub fn proficiency_bonus(&self) -> i32 {
        self.creature.proficiency_bonus()
    }

    /// 8 + proficiency + casting modifier + any spell DC bonus
    pub fn spell_difficulty_class(&self, ability: Ability) -> i32 {
        8 + self.proficiency_bonus() + self.creature.spell_casting_modifier(ability) + self.spell_dc_bonus
    }

    /// Check every range the rules depend on
    pub fn validate(&self) -> Result<()> {
        self.creature.validate()?;
        if !(1..=20).contains(&self.crit_on) {
            return Err(DprError::validation(format!(
                "character '{}': crit_on must be between 1 and 20, got {}",
                self.name(),
                self.crit_on
            )));
        }
        if self.attack_reroll_on < 0 || self.damage_reroll_on < 0 {
            return Err(DprError::validation(format!(
                "character '{}': reroll thresholds must not be negative",
                self.name()
            )));
        }
        if !(1..=9).contains(&self.feats.divine_smite_level) {
            return Err(DprError::validation(format!(
                "character '{}': divine smite level must be between 1 and 9, got {}",
                self.name(),
                self.feats.divine_smite_level
            )));
        }
        Ok(())
    }
}

/// Flat on-disk shape of a character
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct CharacterRecord {
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
    advantage: bool,
    disadvantage: bool,
    crit_on: i32,
    attack_reroll_on: i32,
    damage_reroll_on: i32,
    spell_dc_bonus: i32,
    bonus_attack: Vec<BonusTerm>,
    bonus_damage: Vec<BonusTerm>,
    bonus_crit: Vec<BonusTerm>,
    bonus_miss: Vec<BonusTerm>,
    #[serde(flatten)]
    feats: Feats,
    attacks: Vec<Attack>,
}

impl Default for CharacterRecord {
    fn default() -> Self {
        Character::default().into()
    }
}

impl From<CharacterRecord> for Character {
    fn from(r: CharacterRecord) -> Self {
        Character {
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
                attacks: r.attacks,
            },
            advantage: r.advantage,
            disadvantage: r.disadvantage,
            crit_on: r.crit_on,
            attack_reroll_on: r.attack_reroll_on,
            damage_reroll_on: r.damage_reroll_on,
            spell_dc_bonus: r.spell_dc_bonus,
            bonus_attack: r.bonus_attack,
            bonus_damage: r.bonus_damage,
            bonus_crit: r.bonus_crit,
            bonus_miss: r.bonus_miss,
            feats: r.feats,
        }
    }
}

impl From<Character> for CharacterRecord {
    fn from(c: Character) -> Self {
        CharacterRecord {
            name: c.creature.name,
            level: c.creature.level,
            abilities: c.creature.abilities,
            armor_class: c.creature.armor_class,
            hit_points: c.creature.hit_points,
            damage_reduction: c.creature.damage_reduction,
            resistance: c.creature.resistance,
            vulnerability: c.creature.vulnerability,
            saving_throw_proficient: c.creature.saving_throw_proficient,
            advantage: c.advantage,
            disadvantage: c.disadvantage,
            crit_on: c.crit_on,
            attack_reroll_on: c.attack_reroll_on,
            damage_reroll_on: c.damage_reroll_on,
            spell_dc_bonus: c.spell_dc_bonus,
            bonus_attack: c.bonus_attack,
            bonus_damage: c.bonus_damage,
            bonus_crit: c.bonus_crit,
            bonus_miss: c.bonus_miss,
            feats: c.feats,
            attacks: c.creature.attacks,
        }
    }
}
