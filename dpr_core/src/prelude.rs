//! Prelude module for convenient imports
//!
//! ```rust
//! use dpr_core::prelude::*;
//! ```

// Combatants
pub use crate::creature::{Ability, AbilityScores, Attack, AttackType, Character, DamageType, Enemy, Feats};

// Dice
pub use crate::dice::{DicePool, DiceRoller, RollOptions};

// Contexts
pub use crate::context::{compile_contexts, AttackContext, CompiledAttack, DamageContext};

// Simulation
pub use crate::simulation::{CharacterReport, Column, SimConfig, Simulator, SweepGrouping, SweepRow, TrialTable};

// Summaries
pub use crate::summary::{describe, Summary};

// Config
pub use crate::config::{default_scenario, Scenario};

pub use crate::error::{DprError, Result};
