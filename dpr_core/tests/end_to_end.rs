//! End-to-end checks: compile, simulate and compare against closed-form odds

use dpr_core::prelude::*;
use dpr_core::summary::analytic::{expected_attack_damage, hit_odds};

fn greatsword_fighter(feats: impl FnOnce(&mut Character)) -> Character {
    let attacks = (0..3)
        .map(|_| Attack {
            two_handed: true,
            ..Attack::new("Greatsword", AttackType::WeaponMelee, "2d6")
        })
        .collect();
    let mut character = Character::new(
        "Fighter",
        12,
        AbilityScores {
            strength: 20,
            ..Default::default()
        },
        attacks,
    );
    feats(&mut character);
    character
}

#[test]
fn greatsword_fighter_matches_analytic_expectation() {
    let character = greatsword_fighter(|_| {});
    let enemy = Enemy::with_armor_class(18);

    let compiled = compile_contexts(&character, &enemy).unwrap();
    assert_eq!(compiled[0].attack.modifier(), 9);
    let odds = hit_odds(&compiled[0].attack);
    assert!((odds.hit - 0.6).abs() < 1e-9);
    assert!((odds.crit - 0.05).abs() < 1e-9);
    let expected = expected_attack_damage(&compiled[0]);
    assert!((expected - 7.55).abs() < 1e-9);

    let run = || {
        let mut sim = Simulator::seeded(1);
        sim.simulate_character_rounds(&[character.clone()], &enemy, 100_000, false)
            .unwrap()
            .remove(0)
    };
    let first = run();
    let second = run();
    assert_eq!(first, second);

    let per_attack = first.attack("Greatsword").unwrap();
    assert_eq!(per_attack.len(), 300_000);
    let mean = per_attack.mean(Column::Damage).unwrap();
    assert!((mean - expected).abs() / expected < 0.01, "per-attack mean {}", mean);

    let per_round = first.mean_damage_per_round();
    assert!((per_round - 3.0 * expected).abs() / (3.0 * expected) < 0.01, "per-round mean {}", per_round);

    let hit_rate = per_attack.mean(Column::Hit).unwrap();
    assert!((hit_rate - 0.6).abs() < 0.005);
}

#[test]
fn different_seeds_differ_but_agree_statistically() {
    let character = greatsword_fighter(|_| {});
    let enemy = Enemy::with_armor_class(18);
    let a = Simulator::seeded(1)
        .simulate_character_rounds(&[character.clone()], &enemy, 20_000, false)
        .unwrap();
    let b = Simulator::seeded(2)
        .simulate_character_rounds(&[character], &enemy, 20_000, false)
        .unwrap();
    assert_ne!(a[0].per_round, b[0].per_round);
    assert!((a[0].mean_damage_per_round() - b[0].mean_damage_per_round()).abs() < 0.5);
}

#[test]
fn great_weapon_master_shifts_contexts_exactly() {
    let enemy = Enemy::with_armor_class(18);
    let plain = compile_contexts(&greatsword_fighter(|_| {}), &enemy).unwrap();
    let gwm = compile_contexts(
        &greatsword_fighter(|c| c.feats.great_weapon_master = true),
        &enemy,
    )
    .unwrap();

    for (p, g) in plain.iter().zip(&gwm) {
        assert_eq!(g.attack.modifier() - p.attack.modifier(), -5);
        assert_eq!(g.damage.damage.modifier - p.damage.damage.modifier, 10);

        let mut realigned = g.clone();
        realigned.attack.bonus.modifier += 5;
        realigned.damage.damage.modifier -= 10;
        assert_eq!(&realigned, p);
    }
}

#[test]
fn resistance_and_vulnerability_net_to_one() {
    let mut enemy = Enemy::with_armor_class(18);
    enemy.creature.resistance = true;
    enemy.creature.vulnerability = true;
    let compiled = compile_contexts(&greatsword_fighter(|_| {}), &enemy).unwrap();
    for attack in &compiled {
        assert_eq!(attack.damage.damage_multiplier, 1.0);
    }

    enemy.creature.vulnerability = false;
    let compiled = compile_contexts(&greatsword_fighter(|_| {}), &enemy).unwrap();
    assert_eq!(compiled[0].damage.damage_multiplier, 0.5);
}

#[test]
fn simulated_rows_respect_roll_rules() {
    let character = greatsword_fighter(|c| c.crit_on = 18);
    let mut sim = Simulator::seeded(3);
    let report = sim
        .simulate_character_rounds(&[character], &Enemy::with_armor_class(40), 30_000, false)
        .unwrap()
        .remove(0);
    let table = report.attack("Greatsword").unwrap();
    let die = table.column(Column::AttackDie).unwrap();
    let hit = table.column(Column::Hit).unwrap();
    let crit = table.column(Column::HitCrit).unwrap();
    let from_crit = table.column(Column::DamageFromCrit).unwrap();
    for i in 0..table.len() {
        if die[i] == 1 {
            assert_eq!(hit[i], 0);
        }
        if crit[i] == 1 {
            assert_eq!(hit[i], 1);
            assert!(from_crit[i] >= 2);
        } else {
            assert_eq!(from_crit[i], 0);
        }
        // AC 40 is out of reach: only crits land
        assert_eq!(hit[i], crit[i]);
    }
}

#[test]
fn saving_throw_spell_never_crits_and_halves_on_save() {
    let fireball = Attack {
        saving_throw: true,
        saving_throw_stat: Some(Ability::Dexterity),
        ability_stat: Ability::Intelligence,
        damage_type: DamageType::Fire,
        ..Attack::new("Fireball", AttackType::Spell, "8d6")
    };
    let wizard = Character::new(
        "Wizard",
        5,
        AbilityScores {
            intelligence: 18,
            ..Default::default()
        },
        vec![fireball],
    );
    let mut enemy = Enemy::default();
    enemy.creature.abilities.dexterity = 14;

    let compiled = compile_contexts(&wizard, &enemy).unwrap();
    let odds = hit_odds(&compiled[0].attack);
    // DC 15 against +2: the save fails on 1 through 12
    assert!((odds.hit - 0.6).abs() < 1e-9);

    let mut sim = Simulator::seeded(4);
    let report = sim
        .simulate_character_rounds(&[wizard], &enemy, 50_000, false)
        .unwrap()
        .remove(0);
    let table = report.attack("Fireball").unwrap();
    assert!(table.column(Column::HitCrit).unwrap().iter().all(|&c| c == 0));
    assert!(table.column(Column::DamageFromCrit).unwrap().iter().all(|&c| c == 0));

    let hit = table.column(Column::Hit).unwrap();
    let miss_damage = table.column(Column::DamageMissFail).unwrap();
    let passed: Vec<i32> = (0..table.len()).filter(|&i| hit[i] == 0).map(|i| miss_damage[i]).collect();
    let passed_mean = passed.iter().map(|&d| f64::from(d)).sum::<f64>() / passed.len() as f64;
    assert!((passed_mean - 13.75).abs() < 0.2, "passed-save mean {}", passed_mean);

    let expected = expected_attack_damage(&compiled[0]);
    let mean = report.mean_damage_per_round();
    // Truncating odd halves costs 0.25 per passed save
    assert!((mean - (expected - 0.4 * 0.25)).abs() < 0.2, "mean {} vs {}", mean, expected);
}

#[test]
fn armor_class_sweep_tracks_analytic_curve() {
    let character = greatsword_fighter(|_| {});
    let enemy = Enemy::default();
    let mut sim = Simulator::seeded(5);
    let rows = sim
        .simulate_across_armor_classes(&[character.clone()], &enemy, &[], 20_000, SweepGrouping::ByRound)
        .unwrap();
    assert_eq!(rows.len(), 16);
    for row in &rows {
        let target = Enemy::with_armor_class(row.armor_class);
        let expected: f64 = compile_contexts(&character, &target)
            .unwrap()
            .iter()
            .map(dpr_core::summary::analytic::expected_attack_damage)
            .sum();
        assert!(
            (row.damage.mean - expected).abs() < 0.4,
            "AC {}: {} vs {}",
            row.armor_class,
            row.damage.mean,
            expected
        );
    }
    assert_eq!(enemy.armor_class(), 15);
}

#[test]
fn always_crit_saving_throw_spell_deals_no_crit_damage() {
    let sacred_flame = Attack {
        saving_throw: true,
        saving_throw_stat: Some(Ability::Dexterity),
        always_crit: true,
        ability_stat: Ability::Wisdom,
        damage_type: DamageType::Radiant,
        ..Attack::new("Sacred Flame", AttackType::Spell, "2d8")
    };
    let cleric = Character::new(
        "Cleric",
        5,
        AbilityScores {
            wisdom: 16,
            ..Default::default()
        },
        vec![sacred_flame],
    );

    let compiled = compile_contexts(&cleric, &Enemy::default()).unwrap();
    assert!(compiled[0].attack.saving_throw);
    assert_eq!(hit_odds(&compiled[0].attack).crit, 0.0);

    let report = Simulator::seeded(6)
        .simulate_character_rounds(&[cleric], &Enemy::default(), 1_000, false)
        .unwrap()
        .remove(0);
    let table = report.attack("Sacred Flame").unwrap();
    assert!(table.column(Column::HitCrit).unwrap().iter().all(|&c| c == 0));
    assert!(table.column(Column::DamageFromCrit).unwrap().iter().all(|&d| d == 0));
    assert!(table.column(Column::Hit).unwrap().iter().all(|&h| h == 1));
}
