//! Enemy-dependent rules and the final roll flags

use super::{ContextRule, RuleInput};
use crate::context::accumulator::ContextAccumulator;
use crate::creature::AttackType;
use crate::dice::DicePool;
use crate::error::{DprError, Result};

/// Resistance halves, vulnerability doubles; both compound
pub struct EnemyMultipliers;

impl ContextRule for EnemyMultipliers {
    fn id(&self) -> &str {
        "enemy_multipliers"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
        let enemy = &input.enemy.creature;
        if enemy.resistance {
            acc.damage_multiplier *= 0.5;
        }
        if enemy.vulnerability {
            acc.damage_multiplier *= 2.0;
        }
        acc.damage_reduction = enemy.damage_reduction;
        Ok(())
    }
}

/// Armor class, or the caster's spell DC against the enemy's save
pub struct DifficultyClassRule;

impl ContextRule for DifficultyClassRule {
    fn id(&self) -> &str {
        "difficulty_class"
    }

    fn priority(&self) -> i32 {
        200
    }

    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
        let attack = input.attack;
        acc.difficulty_class = input.enemy.armor_class();
        if !(attack.saving_throw && attack.attack_type == AttackType::Spell) {
            return Ok(());
        }
        let save_stat = attack.saving_throw_stat.ok_or_else(|| {
            DprError::configuration(format!(
                "attack '{}': saving throw attack has no saving_throw_stat",
                attack.name
            ))
        })?;
        acc.saving_throw = true;
        acc.difficulty_class = input.character.spell_difficulty_class(attack.ability_stat);
        // The enemy rolls the save: its modifier replaces the attacker's bonuses
        acc.attack_bonus = DicePool::flat(input.enemy.saving_throw_modifier(save_stat));
        Ok(())
    }
}

/// Advantage, disadvantage, crit threshold and attack rerolls
pub struct RollFlags;

impl ContextRule for RollFlags {
    fn id(&self) -> &str {
        "roll_flags"
    }

    fn priority(&self) -> i32 {
        300
    }

    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
        let character = input.character;
        let attack = input.attack;
        acc.advantage = character.advantage || attack.advantage;
        acc.disadvantage = character.disadvantage || attack.disadvantage;
        acc.crit_on = character.crit_on.min(attack.crit_on);
        acc.attack_reroll_on = character.attack_reroll_on;
        Ok(())
    }
}
