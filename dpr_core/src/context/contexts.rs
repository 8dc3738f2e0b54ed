//! AttackContext / DamageContext - Flattened numeric roll descriptions

use crate::dice::{DicePool, RollOptions};
use serde::{Deserialize, Serialize};

/// Everything needed to resolve the attack roll (or the target's save)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackContext {
    /// Bonus dice added to the d20; `bonus.modifier` is the total flat modifier
    pub bonus: DicePool,
    pub advantage: bool,
    pub disadvantage: bool,
    /// Natural roll at or above this crits
    pub crit_on: i32,
    /// d20 results at or below this are rerolled once
    pub reroll_on: i32,
    /// Armor class, or spell save DC for saving throws
    pub difficulty_class: i32,
    pub always_hit: bool,
    pub always_crit: bool,
    /// Hit means "the target failed its save": total below the DC
    pub saving_throw: bool,
}

impl Default for AttackContext {
    fn default() -> Self {
        AttackContext {
            bonus: DicePool::new(),
            advantage: false,
            disadvantage: false,
            crit_on: 20,
            reroll_on: 0,
            difficulty_class: 15,
            always_hit: false,
            always_crit: false,
            saving_throw: false,
        }
    }
}

impl AttackContext {
    /// Total flat modifier on the roll
    pub fn modifier(&self) -> i32 {
        self.bonus.modifier
    }

    pub fn roll_options(&self) -> RollOptions {
        RollOptions::new(self.advantage, self.disadvantage, self.reroll_on)
    }
}

/// Everything needed to roll damage for hit, crit and miss rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageContext {
    /// Damage dice and flat modifier dealt on a hit
    pub damage: DicePool,
    /// Resistance / vulnerability multiplier
    pub damage_multiplier: f64,
    /// Damage dice roll twice keep higher (Savage Attacker)
    pub advantage: bool,
    pub disadvantage: bool,
    /// Damage dice at or below this are rerolled once
    pub reroll_on: i32,
    /// Extra dice and modifier on a crit, beyond re-rolling `damage` dice
    pub crit: DicePool,
    /// Dice and modifier dealt on a miss or a passed save
    pub miss: DicePool,
    /// Multiplier applied to the miss pool (half damage on a passed save)
    pub failed_multiplier: f64,
    /// Flat reduction subtracted from each hit
    pub damage_reduction: i32,
}

impl Default for DamageContext {
    fn default() -> Self {
        DamageContext {
            damage: DicePool::new(),
            damage_multiplier: 1.0,
            advantage: false,
            disadvantage: false,
            reroll_on: 0,
            crit: DicePool::new(),
            miss: DicePool::new(),
            failed_multiplier: 1.0,
            damage_reduction: 0,
        }
    }
}

impl DamageContext {
    pub fn roll_options(&self) -> RollOptions {
        RollOptions::new(self.advantage, self.disadvantage, self.reroll_on)
    }
}

/// One attack's compiled context pair, tagged with the attack name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledAttack {
    pub name: String,
    pub attack: AttackContext,
    pub damage: DamageContext,
}
