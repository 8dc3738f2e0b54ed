//! Attack - One attack a character makes each round

use super::ability::Ability;
use crate::dice::{parse_die_expression, BonusTerm, DieExpression};
use crate::error::{DprError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an attack is delivered; selects which feat rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AttackType {
    WeaponMelee,
    WeaponRanged,
    Spell,
    Unarmed,
    Thrown,
}

impl AttackType {
    pub fn all() -> &'static [AttackType] {
        &[
            AttackType::WeaponMelee,
            AttackType::WeaponRanged,
            AttackType::Spell,
            AttackType::Unarmed,
            AttackType::Thrown,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackType::WeaponMelee => "weapon (melee)",
            AttackType::WeaponRanged => "weapon (ranged)",
            AttackType::Spell => "spell",
            AttackType::Unarmed => "unarmed",
            AttackType::Thrown => "thrown",
        }
    }

    /// Spells and unarmed strikes always add proficiency
    pub fn always_proficient(&self) -> bool {
        matches!(self, AttackType::Spell | AttackType::Unarmed)
    }
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttackType {
    type Err = DprError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weapon (melee)" | "weapon_melee" | "melee" => Ok(AttackType::WeaponMelee),
            "weapon (ranged)" | "weapon_ranged" | "ranged" => Ok(AttackType::WeaponRanged),
            "spell" => Ok(AttackType::Spell),
            "unarmed" => Ok(AttackType::Unarmed),
            "thrown" => Ok(AttackType::Thrown),
            _ => Err(DprError::validation(format!("unrecognized attack type '{}'", s))),
        }
    }
}

impl TryFrom<String> for AttackType {
    type Error = DprError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AttackType> for String {
    fn from(value: AttackType) -> Self {
        value.as_str().to_string()
    }
}

/// Damage type of an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Acid,
    Bludgeoning,
    Cold,
    Fire,
    Force,
    Lightning,
    Necrotic,
    Piercing,
    Poison,
    Psychic,
    Radiant,
    Slashing,
    Thunder,
}

impl DamageType {
    /// Types that Elemental Affinity can empower
    pub fn is_elemental(&self) -> bool {
        matches!(
            self,
            DamageType::Acid
                | DamageType::Cold
                | DamageType::Fire
                | DamageType::Lightning
                | DamageType::Poison
                | DamageType::Thunder
        )
    }
}

/// A single attack owned by a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attack {
    pub name: String,
    #[serde(rename = "type")]
    pub attack_type: AttackType,
    pub ability_stat: Ability,
    pub proficient: bool,
    /// Base damage expression, e.g. "2d6"
    pub damage: String,
    pub damage_type: DamageType,

    // === Attack roll overrides ===
    pub advantage: bool,
    pub disadvantage: bool,
    pub crit_on: i32,
    /// Hits automatically (e.g. magic missile)
    pub always_hit: bool,
    /// Crits automatically (e.g. melee against a paralyzed target)
    pub always_crit: bool,

    // === Weapon ===
    pub weapon_enhancement: i32,
    pub offhand: bool,
    pub two_handed: bool,

    // === Saving throw ===
    pub saving_throw: bool,
    pub saving_throw_stat: Option<Ability>,
    /// Fraction of damage dealt when the target succeeds on its save
    pub saving_throw_success_multiplier: f64,

    // === Bonus lists, e.g. ["1d4", 2] ===
    pub bonus_attack: Vec<BonusTerm>,
    pub bonus_damage: Vec<BonusTerm>,
    pub bonus_crit: Vec<BonusTerm>,
    pub bonus_miss: Vec<BonusTerm>,
}

impl Default for Attack {
    fn default() -> Self {
        Attack {
            name: "Attack".to_string(),
            attack_type: AttackType::WeaponMelee,
            ability_stat: Ability::Strength,
            proficient: true,
            damage: "1d6".to_string(),
            damage_type: DamageType::Slashing,
            advantage: false,
            disadvantage: false,
            crit_on: 20,
            always_hit: false,
            always_crit: false,
            weapon_enhancement: 0,
            offhand: false,
            two_handed: false,
            saving_throw: false,
            saving_throw_stat: None,
            saving_throw_success_multiplier: 0.5,
            bonus_attack: Vec::new(),
            bonus_damage: Vec::new(),
            bonus_crit: Vec::new(),
            bonus_miss: Vec::new(),
        }
    }
}

impl Attack {
    /// Create an attack with a name, type and base damage
    pub fn new(name: impl Into<String>, attack_type: AttackType, damage: impl Into<String>) -> Self {
        Attack {
            name: name.into(),
            attack_type,
            damage: damage.into(),
            ..Default::default()
        }
    }

    /// Parsed base damage expression
    pub fn damage_expression(&self) -> Result<DieExpression> {
        parse_die_expression(&self.damage)
    }

    /// Check ranges and rule consistency
    ///
    /// `crit_on` must lie in 1..=20 and the save multiplier must be a
    /// non-negative number (`Validation` errors). A saving throw is only
    /// accepted on a spell that names its `saving_throw_stat`; a saving throw
    /// on any other attack type, or without a stat, is rejected with a
    /// `Configuration` error rather than falling back to armor class.
    pub fn validate(&self) -> Result<()> {
        if !(1..=20).contains(&self.crit_on) {
            return Err(DprError::validation(format!(
                "attack '{}': crit_on must be between 1 and 20, got {}",
                self.name, self.crit_on
            )));
        }
        if !self.saving_throw_success_multiplier.is_finite() || self.saving_throw_success_multiplier < 0.0 {
            return Err(DprError::validation(format!(
                "attack '{}': saving throw success multiplier must be a non-negative number",
                self.name
            )));
        }
        if self.saving_throw {
            if self.attack_type != AttackType::Spell {
                return Err(DprError::configuration(format!(
                    "attack '{}': saving throws are only supported for spell attacks, not {}",
                    self.name, self.attack_type
                )));
            }
            if self.saving_throw_stat.is_none() {
                return Err(DprError::configuration(format!(
                    "attack '{}': saving throw attack has no saving_throw_stat",
                    self.name
                )));
            }
        }
        Ok(())
    }
}
