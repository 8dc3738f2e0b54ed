//! DicePool - Folded (count, size) pairs plus a flat modifier

use super::expression::parse_die_expression;
use crate::error::{DprError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a bonus list: either a flat number or a die expression
///
/// Deserializes from a bare integer (`2`) or a string (`"1d6"`, `"2d4+1"`, `"-1"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BonusTerm {
    Flat(i32),
    Expr(String),
}

impl From<i32> for BonusTerm {
    fn from(value: i32) -> Self {
        BonusTerm::Flat(value)
    }
}

impl From<&str> for BonusTerm {
    fn from(value: &str) -> Self {
        BonusTerm::Expr(value.to_string())
    }
}

impl From<String> for BonusTerm {
    fn from(value: String) -> Self {
        BonusTerm::Expr(value)
    }
}

/// A bag of dice stored as parallel `counts`/`sizes` lists plus a summed modifier
///
/// Zero-count and zero-size entries are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    pub counts: Vec<u32>,
    pub sizes: Vec<u32>,
    pub modifier: i32,
}

impl DicePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool holding a single flat modifier
    pub fn flat(modifier: i32) -> Self {
        DicePool {
            modifier,
            ..Default::default()
        }
    }

    /// Add `count` dice of `size` sides; zero entries are dropped
    pub fn push_dice(&mut self, count: u32, size: u32) {
        if count == 0 || size == 0 {
            return;
        }
        self.counts.push(count);
        self.sizes.push(size);
    }

    /// Join another pool into this one: dice lists concatenate, modifiers sum
    pub fn extend(&mut self, other: &DicePool) {
        for (count, size) in other.dice() {
            self.push_dice(count, size);
        }
        self.modifier += other.modifier;
    }

    /// Iterate over `(count, size)` pairs
    pub fn dice(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.counts.iter().copied().zip(self.sizes.iter().copied())
    }

    /// True when the pool holds no dice (the modifier may still be non-zero)
    pub fn has_no_dice(&self) -> bool {
        self.counts.is_empty()
    }

    /// Expected value of the dice plus the modifier
    pub fn average(&self) -> f64 {
        self.average_dice() + self.modifier as f64
    }

    /// Expected value of the dice alone
    pub fn average_dice(&self) -> f64 {
        self.dice()
            .map(|(count, size)| count as f64 * (1.0 + size as f64) / 2.0)
            .sum()
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .dice()
            .map(|(count, size)| format!("{}d{}", count, size))
            .collect();
        if self.modifier != 0 || parts.is_empty() {
            parts.push(self.modifier.to_string());
        }
        write!(f, "{}", parts.join("+").replace("+-", "-"))
    }
}

/// Fold a list of bonus terms into one pool
///
/// Integers are pure modifiers, empty strings contribute nothing, expression
/// modifiers (`"2d6+3"`) are summed with the flat terms.
pub fn fold_expressions(terms: &[BonusTerm]) -> Result<DicePool> {
    let mut pool = DicePool::new();
    for term in terms {
        match term {
            BonusTerm::Flat(value) => pool.modifier += value,
            BonusTerm::Expr(text) => {
                let normalized: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                if normalized.is_empty() {
                    continue;
                }
                if normalized.to_lowercase().contains('d') {
                    let expr = parse_die_expression(&normalized)?;
                    pool.push_dice(expr.count, expr.size);
                    pool.modifier += expr.modifier;
                } else {
                    let value: i32 = normalized
                        .parse()
                        .map_err(|_| DprError::parse(text, "expected a die expression or an integer"))?;
                    pool.modifier += value;
                }
            }
        }
    }
    Ok(pool)
}
