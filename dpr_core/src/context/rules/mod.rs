//! ContextRule - Trait and implementations for the compilation pipeline
//!
//! Each rule reads the character, attack and enemy and folds its effect into
//! the accumulator. Rules run in ascending priority, so later stages see the
//! values earlier stages derived.

mod base;
mod improvised;
mod spell;
mod target;
mod weapon;

pub use base::{BaseModifiers, BonusDice};
pub use improvised::{ThrownRule, UnarmedRule};
pub use spell::SpellRule;
pub use target::{DifficultyClassRule, EnemyMultipliers, RollFlags};
pub use weapon::{MeleeWeaponRule, RangedWeaponRule};

use super::accumulator::ContextAccumulator;
use crate::creature::{Attack, Character, Enemy};
use crate::error::Result;

/// Inputs visible to every rule
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub character: &'a Character,
    pub attack: &'a Attack,
    pub enemy: &'a Enemy,
}

/// Trait for anything that contributes to a compiled context
pub trait ContextRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &str;

    /// Application order (lower runs first)
    /// Suggested priorities:
    /// - Ability and proficiency: -100
    /// - Bonus dice lists: -90
    /// - Attack-type rules: 0
    /// - Enemy multipliers: 100
    /// - Difficulty class: 200
    /// - Roll flags: 300
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this rule to the accumulator
    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()>;
}

/// The standard rule set, sorted by priority
pub fn default_rules() -> Vec<Box<dyn ContextRule>> {
    let mut rules: Vec<Box<dyn ContextRule>> = vec![
        Box::new(BaseModifiers),
        Box::new(BonusDice),
        Box::new(MeleeWeaponRule),
        Box::new(RangedWeaponRule),
        Box::new(UnarmedRule),
        Box::new(ThrownRule),
        Box::new(SpellRule),
        Box::new(EnemyMultipliers),
        Box::new(DifficultyClassRule),
        Box::new(RollFlags),
    ];
    rules.sort_by_key(|r| r.priority());
    rules
}

/// Barbarian rage damage: +2, or +3 from level 9
pub(crate) fn rage_bonus(character: &Character) -> i32 {
    if character.creature.level >= 9 {
        3
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_sorted() {
        let rules = default_rules();
        let priorities: Vec<i32> = rules.iter().map(|r| r.priority()).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
        assert_eq!(rules.first().map(|r| r.id()), Some("base_modifiers"));
        assert_eq!(rules.last().map(|r| r.id()), Some("roll_flags"));
    }

    #[test]
    fn test_rule_ids_unique() {
        let rules = default_rules();
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn test_rage_bonus_by_level() {
        let mut barbarian = Character::default();
        barbarian.creature.level = 8;
        assert_eq!(rage_bonus(&barbarian), 2);
        barbarian.creature.level = 9;
        assert_eq!(rage_bonus(&barbarian), 3);
    }
}
