//! Ability modifier, proficiency and the bonus dice lists

use super::{ContextRule, RuleInput};
use crate::context::accumulator::ContextAccumulator;
use crate::dice::{fold_expressions, BonusTerm};
use crate::error::Result;

/// Ability modifier and proficiency on the attack roll
pub struct BaseModifiers;

impl ContextRule for BaseModifiers {
    fn id(&self) -> &str {
        "base_modifiers"
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
        let attack = input.attack;
        acc.ability_modifier = input.character.ability_modifier(attack.ability_stat);
        acc.add_attack_modifier(acc.ability_modifier);
        if attack.proficient || attack.attack_type.always_proficient() {
            acc.add_attack_modifier(input.character.proficiency_bonus());
        }
        acc.always_hit = attack.always_hit;
        acc.always_crit = attack.always_crit;
        acc.damage_reroll_on = input.character.damage_reroll_on;
        Ok(())
    }
}

/// Attack-level and character-level bonus lists, plus the base damage die
pub struct BonusDice;

impl ContextRule for BonusDice {
    fn id(&self) -> &str {
        "bonus_dice"
    }

    fn priority(&self) -> i32 {
        -90
    }

    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
        let character = input.character;
        let attack = input.attack;

        let mut damage_terms = Vec::with_capacity(attack.bonus_damage.len() + 1);
        damage_terms.push(BonusTerm::Expr(attack.damage.clone()));
        damage_terms.extend(attack.bonus_damage.iter().cloned());

        acc.attack_bonus.extend(&fold_expressions(&attack.bonus_attack)?);
        acc.attack_bonus.extend(&fold_expressions(&character.bonus_attack)?);
        acc.damage.extend(&fold_expressions(&damage_terms)?);
        acc.damage.extend(&fold_expressions(&character.bonus_damage)?);
        acc.crit.extend(&fold_expressions(&attack.bonus_crit)?);
        acc.crit.extend(&fold_expressions(&character.bonus_crit)?);
        acc.miss.extend(&fold_expressions(&attack.bonus_miss)?);
        acc.miss.extend(&fold_expressions(&character.bonus_miss)?);
        Ok(())
    }
}
