//! Melee and ranged weapon rules: feats, fighting styles and class features

use super::{rage_bonus, ContextRule, RuleInput};
use crate::context::accumulator::ContextAccumulator;
use crate::creature::{Ability, AttackType};
use crate::error::Result;

/// Melee weapon attacks
pub struct MeleeWeaponRule;

impl ContextRule for MeleeWeaponRule {
    fn id(&self) -> &str {
        "weapon_melee"
    }

    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
        if input.attack.attack_type != AttackType::WeaponMelee {
            return Ok(());
        }
        acc.add_damage_modifier(acc.ability_modifier);
        weapon_enhancement(input, acc);
        great_weapon_master(input, acc);
        savage_attacker(input, acc);
        dueling(input, acc);
        great_weapon_fighting(input, acc);
        offhand(input, acc);
        rage(input, acc);
        extra_crit_die(input, acc)?;
        divine_smite(input, acc);
        lifedrinker(input, acc);
        Ok(())
    }
}

/// Ranged weapon attacks
pub struct RangedWeaponRule;

impl ContextRule for RangedWeaponRule {
    fn id(&self) -> &str {
        "weapon_ranged"
    }

    fn apply(&self, input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
        if input.attack.attack_type != AttackType::WeaponRanged {
            return Ok(());
        }
        acc.add_damage_modifier(acc.ability_modifier);
        weapon_enhancement(input, acc);
        if input.character.feats.archery {
            acc.add_attack_modifier(2);
        }
        if input.character.feats.sharpshooter {
            acc.add_attack_modifier(-5);
        }
        offhand(input, acc);
        Ok(())
    }
}

fn weapon_enhancement(input: &RuleInput<'_>, acc: &mut ContextAccumulator) {
    let bonus = input.attack.weapon_enhancement;
    acc.add_attack_modifier(bonus);
    acc.add_damage_modifier(bonus);
}

fn great_weapon_master(input: &RuleInput<'_>, acc: &mut ContextAccumulator) {
    if input.character.feats.great_weapon_master && input.attack.two_handed {
        acc.add_attack_modifier(-5);
        acc.add_damage_modifier(10);
    }
}

fn savage_attacker(input: &RuleInput<'_>, acc: &mut ContextAccumulator) {
    if input.character.feats.savage_attacker {
        acc.damage_advantage = true;
    }
}

fn dueling(input: &RuleInput<'_>, acc: &mut ContextAccumulator) {
    if input.character.feats.dueling && !input.attack.two_handed {
        acc.add_damage_modifier(2);
    }
}

fn great_weapon_fighting(input: &RuleInput<'_>, acc: &mut ContextAccumulator) {
    if input.character.feats.great_weapon_fighting && input.attack.two_handed {
        acc.damage_reroll_on = acc.damage_reroll_on.max(2);
    }
}

/// Off-hand attacks lose the ability modifier unless Two-Weapon Fighting restores it
fn offhand(input: &RuleInput<'_>, acc: &mut ContextAccumulator) {
    if !input.attack.offhand {
        return;
    }
    acc.add_damage_modifier(-acc.ability_modifier);
    if input.character.feats.two_weapon_fighting && !input.attack.two_handed {
        acc.add_damage_modifier(acc.ability_modifier);
    }
}

fn rage(input: &RuleInput<'_>, acc: &mut ContextAccumulator) {
    if input.character.feats.raging {
        acc.add_damage_modifier(rage_bonus(input.character));
    }
}

/// Brutal Critical and half-orc Savage Attacks each add one weapon die on a crit
fn extra_crit_die(input: &RuleInput<'_>, acc: &mut ContextAccumulator) -> Result<()> {
    let feats = &input.character.feats;
    let sources = [feats.brutal_critical, feats.savage_attacks_half_orc];
    if !sources.contains(&true) {
        return Ok(());
    }
    let weapon_die = input.attack.damage_expression()?.size;
    for _ in sources.iter().filter(|&&enabled| enabled) {
        acc.crit.push_dice(1, weapon_die);
    }
    Ok(())
}

/// 2d8 at first level, +1d8 per slot level above first, capped at 5d8
fn divine_smite(input: &RuleInput<'_>, acc: &mut ContextAccumulator) {
    let feats = &input.character.feats;
    if feats.divine_smite {
        let dice = (2 + feats.divine_smite_level - 1).min(5);
        acc.damage.push_dice(dice, 8);
    }
    if feats.improved_divine_smite {
        acc.damage.push_dice(1, 8);
    }
}

fn lifedrinker(input: &RuleInput<'_>, acc: &mut ContextAccumulator) {
    if input.character.feats.lifedrinker {
        acc.add_damage_modifier(input.character.ability_modifier(Ability::Charisma));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::rules::{BaseModifiers, BonusDice};
    use crate::creature::{AbilityScores, Attack, Character, Enemy};

    fn compile(character: &Character, attack: &Attack) -> ContextAccumulator {
        let enemy = Enemy::default();
        let input = RuleInput {
            character,
            attack,
            enemy: &enemy,
        };
        let mut acc = ContextAccumulator::new();
        BaseModifiers.apply(&input, &mut acc).unwrap();
        BonusDice.apply(&input, &mut acc).unwrap();
        MeleeWeaponRule.apply(&input, &mut acc).unwrap();
        RangedWeaponRule.apply(&input, &mut acc).unwrap();
        acc
    }

    fn character() -> Character {
        Character::new(
            "Hero",
            12,
            AbilityScores {
                strength: 20,
                dexterity: 18,
                charisma: 16,
                ..Default::default()
            },
            vec![],
        )
    }

    fn greatsword() -> Attack {
        Attack {
            two_handed: true,
            ..Attack::new("Greatsword", AttackType::WeaponMelee, "2d6")
        }
    }

    fn longbow() -> Attack {
        Attack {
            ability_stat: Ability::Dexterity,
            ..Attack::new("Longbow", AttackType::WeaponRanged, "1d8")
        }
    }

    #[test]
    fn test_melee_adds_ability_to_damage() {
        let acc = compile(&character(), &greatsword());
        assert_eq!(acc.attack_modifier(), 9);
        assert_eq!(acc.damage_modifier(), 5);
        assert_eq!(acc.damage.counts, vec![2]);
        assert_eq!(acc.damage.sizes, vec![6]);
    }

    #[test]
    fn test_weapon_enhancement() {
        let attack = Attack {
            weapon_enhancement: 2,
            ..greatsword()
        };
        let acc = compile(&character(), &attack);
        assert_eq!(acc.attack_modifier(), 11);
        assert_eq!(acc.damage_modifier(), 7);
    }

    #[test]
    fn test_gwm_requires_two_handed() {
        let mut hero = character();
        hero.feats.great_weapon_master = true;
        let acc = compile(&hero, &greatsword());
        assert_eq!(acc.attack_modifier(), 4);
        assert_eq!(acc.damage_modifier(), 15);

        let longsword = Attack::new("Longsword", AttackType::WeaponMelee, "1d8");
        let acc = compile(&hero, &longsword);
        assert_eq!(acc.attack_modifier(), 9);
        assert_eq!(acc.damage_modifier(), 5);
    }

    #[test]
    fn test_dueling_one_handed_only() {
        let mut hero = character();
        hero.feats.dueling = true;
        let longsword = Attack::new("Longsword", AttackType::WeaponMelee, "1d8");
        assert_eq!(compile(&hero, &longsword).damage_modifier(), 7);
        assert_eq!(compile(&hero, &greatsword()).damage_modifier(), 5);
    }

    #[test]
    fn test_gwf_and_savage_attacker() {
        let mut hero = character();
        hero.feats.great_weapon_fighting = true;
        hero.feats.savage_attacker = true;
        let acc = compile(&hero, &greatsword());
        assert_eq!(acc.damage_reroll_on, 2);
        assert!(acc.damage_advantage);

        hero.damage_reroll_on = 3;
        assert_eq!(compile(&hero, &greatsword()).damage_reroll_on, 3);
    }

    #[test]
    fn test_offhand_and_two_weapon_fighting() {
        let shortsword = Attack {
            offhand: true,
            ..Attack::new("Shortsword", AttackType::WeaponMelee, "1d6")
        };
        let mut hero = character();
        assert_eq!(compile(&hero, &shortsword).damage_modifier(), 0);
        hero.feats.two_weapon_fighting = true;
        assert_eq!(compile(&hero, &shortsword).damage_modifier(), 5);
    }

    #[test]
    fn test_rage() {
        let mut hero = character();
        hero.feats.raging = true;
        assert_eq!(compile(&hero, &greatsword()).damage_modifier(), 8);
        hero.creature.level = 3;
        assert_eq!(compile(&hero, &greatsword()).damage_modifier(), 7);
    }

    #[test]
    fn test_brutal_critical_and_savage_attacks() {
        let mut hero = character();
        hero.feats.brutal_critical = true;
        hero.feats.savage_attacks_half_orc = true;
        let acc = compile(&hero, &greatsword());
        assert_eq!(acc.crit.counts, vec![1, 1]);
        assert_eq!(acc.crit.sizes, vec![6, 6]);
    }

    #[test]
    fn test_divine_smite_scaling_and_cap() {
        let mut hero = character();
        hero.feats.divine_smite = true;
        hero.feats.divine_smite_level = 1;
        assert_eq!(compile(&hero, &greatsword()).damage.counts, vec![2, 2]);
        hero.feats.divine_smite_level = 3;
        assert_eq!(compile(&hero, &greatsword()).damage.counts, vec![2, 4]);
        hero.feats.divine_smite_level = 9;
        assert_eq!(compile(&hero, &greatsword()).damage.counts, vec![2, 5]);

        hero.feats.improved_divine_smite = true;
        let acc = compile(&hero, &greatsword());
        assert_eq!(acc.damage.counts, vec![2, 5, 1]);
        assert_eq!(acc.damage.sizes, vec![6, 8, 8]);
    }

    #[test]
    fn test_lifedrinker() {
        let mut hero = character();
        hero.feats.lifedrinker = true;
        assert_eq!(compile(&hero, &greatsword()).damage_modifier(), 8);
    }

    #[test]
    fn test_ranged_archery_and_sharpshooter() {
        let mut hero = character();
        let acc = compile(&hero, &longbow());
        assert_eq!(acc.attack_modifier(), 8);
        assert_eq!(acc.damage_modifier(), 4);

        hero.feats.archery = true;
        assert_eq!(compile(&hero, &longbow()).attack_modifier(), 10);
        hero.feats.sharpshooter = true;
        assert_eq!(compile(&hero, &longbow()).attack_modifier(), 5);
    }

    #[test]
    fn test_melee_feats_do_not_touch_ranged() {
        let mut hero = character();
        hero.feats.raging = true;
        hero.feats.divine_smite = true;
        hero.feats.great_weapon_master = true;
        let attack = Attack {
            two_handed: true,
            ..longbow()
        };
        let acc = compile(&hero, &attack);
        assert_eq!(acc.damage_modifier(), 4);
        assert_eq!(acc.damage.counts, vec![1]);
        assert_eq!(acc.attack_modifier(), 8);
    }
}
