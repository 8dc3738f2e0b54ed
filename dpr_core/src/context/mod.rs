//! Context compiler - Flattens the rules into per-attack roll contexts

mod accumulator;
mod compiler;
mod contexts;
pub mod rules;

pub use accumulator::ContextAccumulator;
pub use compiler::{compile_contexts, ContextCompiler};
pub use contexts::{AttackContext, CompiledAttack, DamageContext};
pub use rules::{ContextRule, RuleInput};
