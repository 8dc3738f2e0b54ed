//! DiceRoller - Batch die rolling over an owned, seedable generator
//!
//! Every method draws a whole batch at once and returns one value per row,
//! so callers combine rows with element-wise operations instead of looping
//! per trial.

use super::pool::DicePool;
use crate::error::{DprError, Result};
use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// How a batch of dice is rolled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOptions {
    /// Roll twice, keep the higher
    pub advantage: bool,
    /// Roll twice, keep the lower
    pub disadvantage: bool,
    /// Any draw at or below this value is rerolled once (0 = never)
    pub reroll_on: i32,
}

impl RollOptions {
    /// Plain roll: no advantage, no disadvantage, no rerolls
    pub fn plain() -> Self {
        Self::default()
    }

    /// Build options from the three flags
    pub fn new(advantage: bool, disadvantage: bool, reroll_on: i32) -> Self {
        RollOptions {
            advantage,
            disadvantage,
            reroll_on,
        }
    }
}

/// Owns the single random stream used by a simulation
#[derive(Debug, Clone)]
pub struct DiceRoller<R = ChaCha8Rng> {
    rng: R,
}

impl DiceRoller<ChaCha8Rng> {
    /// Deterministic roller: the same seed always yields the same rolls
    pub fn seeded(seed: u64) -> Self {
        DiceRoller {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Roller seeded from OS entropy ("shuffle")
    pub fn from_entropy() -> Self {
        DiceRoller {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> DiceRoller<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        DiceRoller { rng }
    }

    /// Draw `n` values uniformly from `1..=size`
    ///
    /// Draws at or below `reroll_on` are redrawn exactly once; the second
    /// result stands even if it is low again.
    pub fn roll_die(&mut self, n: usize, size: u32, reroll_on: i32) -> Result<Vec<i32>> {
        let die = die_distribution(size)?;
        let mut rolls: Vec<i32> = (&mut self.rng).sample_iter(die).take(n).collect();
        if reroll_on > 0 {
            let rerolls = rolls.iter().filter(|&&r| r <= reroll_on).count();
            let mut fresh = (&mut self.rng).sample_iter(die).take(rerolls);
            for roll in rolls.iter_mut().filter(|r| **r <= reroll_on) {
                if let Some(value) = fresh.next() {
                    *roll = value;
                }
            }
        }
        Ok(rolls)
    }

    /// Draw `n` values with advantage (element-wise max of two batches) or
    /// disadvantage (element-wise min)
    ///
    /// When neither or both flags are set a single plain batch is drawn.
    pub fn roll_with(&mut self, n: usize, size: u32, options: RollOptions) -> Result<Vec<i32>> {
        match (options.advantage, options.disadvantage) {
            (true, false) => {
                let first = self.roll_die(n, size, options.reroll_on)?;
                let second = self.roll_die(n, size, options.reroll_on)?;
                Ok(first.into_iter().zip(second).map(|(a, b)| a.max(b)).collect())
            }
            (false, true) => {
                let first = self.roll_die(n, size, options.reroll_on)?;
                let second = self.roll_die(n, size, options.reroll_on)?;
                Ok(first.into_iter().zip(second).map(|(a, b)| a.min(b)).collect())
            }
            _ => self.roll_die(n, size, options.reroll_on),
        }
    }

    /// Sum of `count` independent batches of `size`-sided dice, one total per row
    pub fn roll_sum(&mut self, n: usize, count: u32, size: u32, options: RollOptions) -> Result<Vec<i32>> {
        let mut totals = vec![0; n];
        for _ in 0..count {
            let batch = self.roll_with(n, size, options)?;
            add_assign(&mut totals, &batch);
        }
        Ok(totals)
    }

    /// Sum every die of a pool for `n` rows; the pool modifier is not included
    pub fn roll_pool_dice(&mut self, n: usize, pool: &DicePool, options: RollOptions) -> Result<Vec<i32>> {
        let mut totals = vec![0; n];
        for (count, size) in pool.dice() {
            let batch = self.roll_sum(n, count, size, options)?;
            add_assign(&mut totals, &batch);
        }
        Ok(totals)
    }
}

fn die_distribution(size: u32) -> Result<Uniform<i32>> {
    let upper = i32::try_from(size)
        .ok()
        .filter(|&s| s >= 1)
        .ok_or_else(|| DprError::validation(format!("die size must be between 1 and {}, got {}", i32::MAX, size)))?;
    Ok(Uniform::new_inclusive(1, upper))
}

/// Element-wise `target[i] += values[i]`
pub(crate) fn add_assign(target: &mut [i32], values: &[i32]) {
    for (t, v) in target.iter_mut().zip(values) {
        *t += v;
    }
}
