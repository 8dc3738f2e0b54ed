//! Damage resolution over a whole batch of trials

use crate::context::DamageContext;
use crate::dice::{add_assign, DiceRoller, DicePool, RollOptions};
use crate::error::Result;
use rand::Rng;

/// Damage dealt per trial, split by source
#[derive(Debug, Clone, PartialEq)]
pub struct DamageRolls {
    pub total: Vec<i32>,
    /// Hit rows (crits included): flat modifier plus damage dice
    pub hit: Vec<i32>,
    /// Crit rows: damage dice rolled again plus crit-only bonuses
    pub crit: Vec<i32>,
    /// Miss or passed-save rows
    pub miss: Vec<i32>,
}

/// Roll damage for every row given the attack outcome masks
///
/// Only the rows selected by a mask are rolled. Fractional damage after a
/// multiplier is truncated toward zero.
pub fn damage_roll<R: Rng>(
    roller: &mut DiceRoller<R>,
    hit: &[bool],
    crit: &[bool],
    context: &DamageContext,
) -> Result<DamageRolls> {
    let options = context.roll_options();
    let multiplier = context.damage_multiplier;

    let hit_raw = roll_masked(roller, hit, &context.damage, true, options)?;
    let hit_damage: Vec<i32> = hit_raw
        .into_iter()
        .map(|d| scale(reduce(d, context.damage_reduction), multiplier))
        .collect();

    let missed: Vec<bool> = hit.iter().map(|&h| !h).collect();
    let miss_raw = roll_masked(roller, &missed, &context.miss, true, options)?;
    let miss_multiplier = context.failed_multiplier * multiplier;
    let miss_damage: Vec<i32> = miss_raw.into_iter().map(|d| scale(d, miss_multiplier)).collect();

    // No flat damage modifier on the second roll of the dice
    let mut crit_raw = roll_masked(roller, crit, &context.damage, false, options)?;
    let crit_bonus = roll_masked(roller, crit, &context.crit, true, options)?;
    add_assign(&mut crit_raw, &crit_bonus);
    let crit_damage: Vec<i32> = crit_raw.into_iter().map(|d| scale(d, multiplier)).collect();

    let total = hit_damage
        .iter()
        .zip(&crit_damage)
        .zip(&miss_damage)
        .map(|((h, c), m)| h + c + m)
        .collect();

    Ok(DamageRolls {
        total,
        hit: hit_damage,
        crit: crit_damage,
        miss: miss_damage,
    })
}

/// Roll `pool` only for rows where `mask` is set; other rows are zero
fn roll_masked<R: Rng>(
    roller: &mut DiceRoller<R>,
    mask: &[bool],
    pool: &DicePool,
    with_modifier: bool,
    options: RollOptions,
) -> Result<Vec<i32>> {
    let rows = mask.iter().filter(|&&m| m).count();
    let mut values = roller.roll_pool_dice(rows, pool, options)?.into_iter();
    let modifier = if with_modifier { pool.modifier } else { 0 };

    let mut out = vec![0; mask.len()];
    for (slot, &selected) in out.iter_mut().zip(mask) {
        if selected {
            *slot = values.next().unwrap_or(0) + modifier;
        }
    }
    Ok(out)
}

fn reduce(value: i32, reduction: i32) -> i32 {
    if reduction > 0 {
        (value - reduction).max(0)
    } else {
        value
    }
}

fn scale(value: i32, multiplier: f64) -> i32 {
    (f64::from(value) * multiplier).trunc() as i32
}
