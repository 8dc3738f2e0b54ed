//! Dice algebra - Expression parsing, pool folding and batch rolling

mod expression;
mod pool;
mod roller;

pub use expression::{parse_die_expression, DieExpression};
pub use pool::{fold_expressions, BonusTerm, DicePool};
pub use roller::{DiceRoller, RollOptions};

pub(crate) use roller::add_assign;
