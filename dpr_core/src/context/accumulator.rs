//! ContextAccumulator - Collects rule effects before building the contexts

use super::contexts::{AttackContext, CompiledAttack, DamageContext};
use crate::dice::DicePool;

/// Mutable scratch state for one (character, attack, enemy) compilation
///
/// Rules only touch this struct; it is turned into the immutable context
/// pair once every rule has run.
#[derive(Debug, Clone)]
pub struct ContextAccumulator {
    /// Modifier of the attack's governing ability
    pub ability_modifier: i32,

    // === Attack roll ===
    pub attack_bonus: DicePool,
    pub advantage: bool,
    pub disadvantage: bool,
    pub crit_on: i32,
    pub attack_reroll_on: i32,
    pub difficulty_class: i32,
    pub always_hit: bool,
    pub always_crit: bool,
    pub saving_throw: bool,

    // === Damage roll ===
    pub damage: DicePool,
    pub crit: DicePool,
    pub miss: DicePool,
    pub damage_advantage: bool,
    pub damage_disadvantage: bool,
    pub damage_reroll_on: i32,
    pub damage_multiplier: f64,
    pub failed_multiplier: f64,
    pub damage_reduction: i32,
}

impl Default for ContextAccumulator {
    fn default() -> Self {
        ContextAccumulator {
            ability_modifier: 0,
            attack_bonus: DicePool::new(),
            advantage: false,
            disadvantage: false,
            crit_on: 20,
            attack_reroll_on: 0,
            difficulty_class: 10,
            always_hit: false,
            always_crit: false,
            saving_throw: false,
            damage: DicePool::new(),
            crit: DicePool::new(),
            miss: DicePool::new(),
            damage_advantage: false,
            damage_disadvantage: false,
            damage_reroll_on: 0,
            damage_multiplier: 1.0,
            failed_multiplier: 1.0,
            damage_reduction: 0,
        }
    }
}

impl ContextAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the flat attack modifier
    pub fn add_attack_modifier(&mut self, value: i32) {
        self.attack_bonus.modifier += value;
    }

    /// Add to the flat damage modifier
    pub fn add_damage_modifier(&mut self, value: i32) {
        self.damage.modifier += value;
    }

    pub fn attack_modifier(&self) -> i32 {
        self.attack_bonus.modifier
    }

    pub fn damage_modifier(&self) -> i32 {
        self.damage.modifier
    }

    /// Build the immutable context pair
    pub fn finish(self, name: &str) -> CompiledAttack {
        CompiledAttack {
            name: name.to_string(),
            attack: AttackContext {
                bonus: self.attack_bonus,
                advantage: self.advantage,
                disadvantage: self.disadvantage,
                crit_on: self.crit_on,
                reroll_on: self.attack_reroll_on,
                difficulty_class: self.difficulty_class,
                always_hit: self.always_hit,
                always_crit: self.always_crit,
                saving_throw: self.saving_throw,
            },
            damage: DamageContext {
                damage: self.damage,
                damage_multiplier: self.damage_multiplier,
                advantage: self.damage_advantage,
                disadvantage: self.damage_disadvantage,
                reroll_on: self.damage_reroll_on,
                crit: self.crit,
                miss: self.miss,
                failed_multiplier: self.failed_multiplier,
                damage_reduction: self.damage_reduction,
            },
        }
    }
}
