//! Simulation engine - Batch attack and damage rolls over many trials

mod attack;
mod config;
mod damage;
mod runner;
mod table;

pub use attack::{attack_roll, AttackRolls};
pub use config::{SimConfig, DEFAULT_ARMOR_CLASSES};
pub use damage::{damage_roll, DamageRolls};
pub use runner::{AttackSummary, AttackTable, CharacterReport, Simulator, SweepGrouping, SweepRow};
pub use table::{Column, TrialTable};
