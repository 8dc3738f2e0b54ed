//! Unarmed strikes and thrown weapons

use super::{rage_bonus, ContextRule, RuleInput};
use crate::context::accumulator::ContextAccumulator;
use crate::creature::{Ability, AttackType};
use crate::error::Result;

/// Unarmed strikes
pub struct UnarmedRule;

impl ContextRule for UnarmedRule {
    fn id(&self) -> &str {
        "unarmed"
    }

    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
        if input.attack.attack_type != AttackType::Unarmed {
            return Ok(());
        }
        acc.add_damage_modifier(acc.ability_modifier);
        tavern_brawler(input, acc);
        Ok(())
    }
}

/// Thrown weapons
pub struct ThrownRule;

impl ContextRule for ThrownRule {
    fn id(&self) -> &str {
        "thrown"
    }

    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
        if input.attack.attack_type != AttackType::Thrown {
            return Ok(());
        }
        acc.add_damage_modifier(acc.ability_modifier);
        tavern_brawler(input, acc);
        if input.character.feats.raging {
            acc.add_damage_modifier(rage_bonus(input.character));
        }
        Ok(())
    }
}

fn tavern_brawler(input: &RuleInput<'_>, acc: &mut ContextAccumulator) {
    if input.character.feats.tavern_brawler {
        let strength = input.character.ability_modifier(Ability::Strength);
        acc.add_attack_modifier(strength);
        acc.add_damage_modifier(strength);
    }
}
