//! Attack roll resolution over a whole batch of trials

use crate::context::AttackContext;
use crate::dice::{add_assign, DiceRoller};
use crate::error::Result;
use rand::Rng;

/// Raw die value used for attacks that skip the roll
const AUTOMATIC_DIE: i32 = 20;

/// One attack roll per trial
#[derive(Debug, Clone, PartialEq)]
pub struct AttackRolls {
    /// d20 plus every modifier and bonus die
    pub totals: Vec<i32>,
    /// The natural d20
    pub dice: Vec<i32>,
    pub hit: Vec<bool>,
    pub crit: Vec<bool>,
}

impl AttackRolls {
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    fn automatic(n: usize, modifier: i32, crit: bool) -> Self {
        AttackRolls {
            totals: vec![AUTOMATIC_DIE + modifier; n],
            dice: vec![AUTOMATIC_DIE; n],
            hit: vec![true; n],
            crit: vec![crit; n],
        }
    }
}

/// Roll `n` attacks (or enemy saves) described by `context`
///
/// A natural 1 never hits and never crits. A crit always hits. In
/// saving-throw mode a hit is a failed save (total below the DC) and no row
/// crits, even when the context is flagged to always crit.
pub fn attack_roll<R: Rng>(roller: &mut DiceRoller<R>, n: usize, context: &AttackContext) -> Result<AttackRolls> {
    if context.always_hit {
        return Ok(AttackRolls::automatic(n, context.modifier(), false));
    }
    if context.always_crit {
        return Ok(AttackRolls::automatic(n, context.modifier(), !context.saving_throw));
    }

    let options = context.roll_options();
    let dice = roller.roll_with(n, 20, options)?;
    let mut totals: Vec<i32> = dice.iter().map(|d| d + context.modifier()).collect();
    let bonus = roller.roll_pool_dice(n, &context.bonus, options)?;
    add_assign(&mut totals, &bonus);

    let dc = context.difficulty_class;
    if context.saving_throw {
        let hit = totals.iter().map(|&t| t < dc).collect();
        return Ok(AttackRolls {
            totals,
            dice,
            hit,
            crit: vec![false; n],
        });
    }

    let crit: Vec<bool> = dice.iter().map(|&d| d >= context.crit_on && d != 1).collect();
    let hit = totals
        .iter()
        .zip(&dice)
        .zip(&crit)
        .map(|((&t, &d), &c)| c || (t >= dc && d != 1))
        .collect();
    Ok(AttackRolls { totals, dice, hit, crit })
}
