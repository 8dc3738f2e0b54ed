//! dpr_core - Monte Carlo damage-per-round engine for tabletop combatants
//!
//! This library provides:
//! - Dice algebra: die expressions, dice pools and batch rolling
//! - Combatants: Character, Enemy and their Attacks
//! - Context compiler: rules that flatten a character's attack against an
//!   enemy into numeric AttackContext / DamageContext pairs
//! - Simulator: vectorised attack and damage rolls over many trials,
//!   per-round totals and armor class sweeps
//! - Summary statistics and closed-form expectations

pub mod config;
pub mod context;
pub mod creature;
pub mod dice;
pub mod error;
pub mod prelude;
pub mod simulation;
pub mod summary;

// Re-export core types for convenience
pub use config::{default_scenario, load_scenario, ConfigError, Scenario};
pub use context::{compile_contexts, AttackContext, CompiledAttack, ContextCompiler, DamageContext};
pub use creature::{Ability, AbilityScores, Attack, AttackType, Character, Creature, DamageType, Enemy, Feats};
pub use dice::{fold_expressions, parse_die_expression, DicePool, DiceRoller, DieExpression, RollOptions};
pub use error::{DprError, Result};
pub use simulation::{CharacterReport, Column, SimConfig, Simulator, SweepGrouping, SweepRow, TrialTable};
pub use summary::{describe, Summary};
