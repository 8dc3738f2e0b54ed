//! Closed-form expectations for dice and single attacks
//!
//! These mirror what the simulation converges to and serve as a regression
//! oracle for it. Damage expectations ignore integer truncation after a
//! multiplier and the zero floor of damage reduction.

use crate::context::{AttackContext, CompiledAttack, DamageContext};
use crate::dice::{DicePool, RollOptions};
use serde::{Deserialize, Serialize};

/// Expected value of one fair die
pub fn expected_value(size: u32) -> f64 {
    (1.0 + f64::from(size)) / 2.0
}

/// Average of `count` fair dice
pub fn average_damage(count: u32, size: u32) -> f64 {
    f64::from(count) * expected_value(size)
}

/// Probability of each face 1..=size under the roll options
///
/// Entry `k - 1` is the probability of rolling `k`.
pub fn die_pmf(size: u32, options: RollOptions) -> Vec<f64> {
    if size == 0 {
        return Vec::new();
    }
    let faces = size as usize;
    let uniform = 1.0 / faces as f64;
    let reroll = options.reroll_on.clamp(0, size as i32) as usize;
    let rerolled_mass = reroll as f64 * uniform;
    let single: Vec<f64> = (1..=faces)
        .map(|k| {
            let kept = if k > reroll { uniform } else { 0.0 };
            kept + rerolled_mass * uniform
        })
        .collect();

    match (options.advantage, options.disadvantage) {
        (true, false) => {
            let cdf = cumulative(&single);
            (0..faces)
                .map(|i| cdf[i].powi(2) - if i == 0 { 0.0 } else { cdf[i - 1].powi(2) })
                .collect()
        }
        (false, true) => {
            let cdf = cumulative(&single);
            let survive = |i: usize| if i == 0 { 1.0 } else { 1.0 - cdf[i - 1] };
            (0..faces).map(|i| survive(i).powi(2) - (1.0 - cdf[i]).powi(2)).collect()
        }
        _ => single,
    }
}

fn cumulative(pmf: &[f64]) -> Vec<f64> {
    pmf.iter()
        .scan(0.0, |acc, p| {
            *acc += p;
            Some(*acc)
        })
        .collect()
}

/// Expected value of one die under the roll options
pub fn die_mean(size: u32, options: RollOptions) -> f64 {
    die_pmf(size, options)
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1) as f64 * p)
        .sum()
}

/// Expected total of a pool (dice plus flat modifier) under the roll options
pub fn pool_mean(pool: &DicePool, options: RollOptions) -> f64 {
    let dice: f64 = pool
        .dice()
        .map(|(count, size)| f64::from(count) * die_mean(size, options))
        .sum();
    dice + f64::from(pool.modifier)
}

/// Distribution of the summed dice of a pool as (lowest total, probabilities)
fn pool_pmf(pool: &DicePool, options: RollOptions) -> (i32, Vec<f64>) {
    let mut offset = 0;
    let mut pmf = vec![1.0];
    for (count, size) in pool.dice() {
        let face = die_pmf(size, options);
        for _ in 0..count {
            let mut next = vec![0.0; pmf.len() + face.len() - 1];
            for (i, p) in pmf.iter().enumerate() {
                for (j, q) in face.iter().enumerate() {
                    next[i + j] += p * q;
                }
            }
            pmf = next;
            offset += 1;
        }
    }
    (offset, pmf)
}

/// Hit, crit and miss probabilities of one attack roll
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitOdds {
    pub hit: f64,
    pub crit: f64,
}

impl HitOdds {
    pub fn miss(&self) -> f64 {
        1.0 - self.hit
    }

    /// Hits that are not crits
    pub fn non_crit(&self) -> f64 {
        self.hit - self.crit
    }
}

/// Exact hit and crit probabilities for an attack context
pub fn hit_odds(context: &AttackContext) -> HitOdds {
    if context.always_hit {
        return HitOdds { hit: 1.0, crit: 0.0 };
    }
    if context.always_crit {
        let crit = if context.saving_throw { 0.0 } else { 1.0 };
        return HitOdds { hit: 1.0, crit };
    }
    let options = context.roll_options();
    let d20 = die_pmf(20, options);
    let (offset, bonus) = pool_pmf(&context.bonus, options);
    let dc = context.difficulty_class;

    let mut odds = HitOdds { hit: 0.0, crit: 0.0 };
    for (i, p) in d20.iter().enumerate() {
        let die = i as i32 + 1;
        let is_crit = !context.saving_throw && die != 1 && die >= context.crit_on;
        if is_crit {
            odds.crit += p;
        }
        for (j, q) in bonus.iter().enumerate() {
            let total = die + context.modifier() + offset + j as i32;
            let hit = if context.saving_throw {
                total < dc
            } else {
                is_crit || (die != 1 && total >= dc)
            };
            if hit {
                odds.hit += p * q;
            }
        }
    }
    odds
}

/// Chance for a flat-modifier attack to hit `armor_class`
pub fn hit_chance(modifier: i32, armor_class: i32, crit_on: i32, advantage: bool, disadvantage: bool) -> f64 {
    let context = AttackContext {
        bonus: DicePool::flat(modifier),
        difficulty_class: armor_class,
        crit_on,
        advantage,
        disadvantage,
        ..Default::default()
    };
    hit_odds(&context).hit
}

/// Chance that a d20 lands at or above `crit_on`
pub fn crit_chance(crit_on: i32, advantage: bool, disadvantage: bool) -> f64 {
    let context = AttackContext {
        crit_on,
        advantage,
        disadvantage,
        ..Default::default()
    };
    hit_odds(&context).crit
}

/// Expected damage of a compiled attack, averaged over hits, crits and misses
pub fn expected_attack_damage(compiled: &CompiledAttack) -> f64 {
    let odds = hit_odds(&compiled.attack);
    expected_damage_given(&odds, &compiled.damage)
}

fn expected_damage_given(odds: &HitOdds, context: &DamageContext) -> f64 {
    let options = context.roll_options();
    let hit = (pool_mean(&context.damage, options) - f64::from(context.damage_reduction.max(0))).max(0.0);
    let crit = pool_mean(&context.damage, options) - f64::from(context.damage.modifier) + pool_mean(&context.crit, options);
    let miss = pool_mean(&context.miss, options) * context.failed_multiplier;
    context.damage_multiplier * (odds.hit * hit + odds.crit * crit + odds.miss() * miss)
}

/// One row of the crit chance chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CritChance {
    pub crit_on: i32,
    pub chance: f64,
    pub with_advantage: f64,
}

/// Crit chance for crit thresholds 20 down to 13, plain and with advantage
pub fn crit_chart() -> Vec<CritChance> {
    (13..=20)
        .rev()
        .map(|crit_on| CritChance {
            crit_on,
            chance: crit_chance(crit_on, false, false),
            with_advantage: crit_chance(crit_on, true, false),
        })
        .collect()
}
