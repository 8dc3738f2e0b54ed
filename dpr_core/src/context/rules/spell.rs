//! Spell attacks and saving-throw spells

use super::{ContextRule, RuleInput};
use crate::context::accumulator::ContextAccumulator;
use crate::creature::{Ability, AttackType};
use crate::error::Result;

/// Spells: invocations, evocation and affinity bonuses, half damage on a save
pub struct SpellRule;

impl ContextRule for SpellRule {
    fn id(&self) -> &str {
        "spell"
    }

    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
        if input.attack.attack_type != AttackType::Spell {
            return Ok(());
        }
        let character = input.character;
        let feats = &character.feats;
        if feats.agonizing_blast {
            acc.add_damage_modifier(character.ability_modifier(Ability::Charisma));
        }
        if feats.empowered_evocation {
            acc.add_damage_modifier(character.ability_modifier(Ability::Intelligence));
        }
        if feats.elemental_affinity && input.attack.damage_type.is_elemental() {
            acc.add_damage_modifier(character.ability_modifier(Ability::Charisma));
        }
        if input.attack.saving_throw {
            // A passed save still deals the spell's damage, scaled down
            let damage = acc.damage.clone();
            acc.miss.extend(&damage);
            acc.failed_multiplier = input.attack.saving_throw_success_multiplier;
        }
        Ok(())
    }
}
