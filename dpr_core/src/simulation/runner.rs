//! Simulator - Runs compiled attacks for characters, rounds and AC sweeps

use super::attack::attack_roll;
use super::config::{validate_armor_classes, validate_trials, SimConfig, DEFAULT_ARMOR_CLASSES};
use super::damage::damage_roll;
use super::table::{Column, TrialTable};
use crate::context::{AttackContext, CompiledAttack, ContextCompiler, DamageContext};
use crate::creature::{Character, Enemy};
use crate::dice::DiceRoller;
use crate::error::Result;
use crate::summary::{describe, describe_table, Summary, TableSummary};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

/// All trials of one attack name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackTable {
    pub name: String,
    pub table: TrialTable,
}

/// Summary statistics of one attack name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackSummary {
    pub name: String,
    pub summary: TableSummary,
}

/// Results of simulating one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterReport {
    pub name: String,
    /// One table per distinct attack name, in first-appearance order
    pub per_attack: Vec<AttackTable>,
    /// Every attack summed per round
    pub per_round: TrialTable,
    pub per_attack_summary: Vec<AttackSummary>,
}

impl CharacterReport {
    /// Summary of the per-round totals
    pub fn per_round_summary(&self) -> Result<TableSummary> {
        describe_table(&self.per_round)
    }

    /// Mean damage per round
    pub fn mean_damage_per_round(&self) -> f64 {
        self.per_round.mean(Column::Damage).unwrap_or(0.0)
    }

    pub fn attack(&self, name: &str) -> Option<&TrialTable> {
        self.per_attack.iter().find(|a| a.name == name).map(|a| &a.table)
    }
}

/// How an armor class sweep reduces its results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepGrouping {
    /// One row per character: damage summed over the round
    ByRound,
    /// One row per character and attack name
    ByAttack,
}

/// One summary row of an armor class sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub character: String,
    /// Set when grouped by attack
    pub attack: Option<String>,
    pub armor_class: i32,
    pub damage: Summary,
}

impl SweepRow {
    /// "Character" or "Character-Attack"
    pub fn label(&self) -> String {
        match &self.attack {
            Some(attack) => format!("{}-{}", self.character, attack),
            None => self.character.clone(),
        }
    }
}

/// Owns the random stream and the rule pipeline for a batch of simulations
pub struct Simulator<R = ChaCha8Rng> {
    roller: DiceRoller<R>,
    compiler: ContextCompiler,
}

impl Simulator<ChaCha8Rng> {
    /// Deterministic simulator
    pub fn seeded(seed: u64) -> Self {
        Simulator::new(DiceRoller::seeded(seed))
    }

    /// Simulator seeded from a config (entropy when the seed is unset)
    pub fn from_config(config: &SimConfig) -> Self {
        Simulator::new(DiceRoller::from_seed_option(config.effective_seed()))
    }
}

impl<R: Rng> Simulator<R> {
    pub fn new(roller: DiceRoller<R>) -> Self {
        Simulator {
            roller,
            compiler: ContextCompiler::new(),
        }
    }

    /// Swap the rule pipeline used to compile contexts
    pub fn with_compiler(mut self, compiler: ContextCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn roller_mut(&mut self) -> &mut DiceRoller<R> {
        &mut self.roller
    }

    /// Simulate `trials` independent rounds of one attack
    pub fn simulate_rounds(&mut self, attack: &AttackContext, damage: &DamageContext, trials: usize) -> Result<TrialTable> {
        validate_trials(trials)?;
        let rolls = attack_roll(&mut self.roller, trials, attack)?;
        let damage = damage_roll(&mut self.roller, &rolls.hit, &rolls.crit, damage)?;
        Ok(TrialTable::from_rolls(&rolls, &damage))
    }

    /// Simulate compiled attacks, grouped by name and summed per round
    ///
    /// With `damage_only` every table keeps just the damage column.
    pub fn simulate_compiled(
        &mut self,
        compiled: &[CompiledAttack],
        trials: usize,
        damage_only: bool,
    ) -> Result<(Vec<AttackTable>, TrialTable)> {
        validate_trials(trials)?;
        let columns: &[Column] = if damage_only { &[Column::Damage] } else { &Column::ALL };
        let mut per_attack: Vec<AttackTable> = Vec::new();
        let mut per_round = TrialTable::zeros(trials, columns);

        for attack in compiled {
            let mut table = self.simulate_rounds(&attack.attack, &attack.damage, trials)?;
            table.retain(columns);
            debug!(
                attack = %attack.name,
                trials,
                mean_damage = table.mean(Column::Damage).unwrap_or(0.0),
                "simulated attack"
            );
            per_round.add_rows(&table);
            match per_attack.iter_mut().find(|a| a.name == attack.name) {
                Some(existing) => existing.table.append(&table),
                None => per_attack.push(AttackTable {
                    name: attack.name.clone(),
                    table,
                }),
            }
        }
        if !damage_only {
            per_round.set_round_index();
        }
        Ok((per_attack, per_round))
    }

    /// Simulate every character's attacks against the enemy
    pub fn simulate_character_rounds(
        &mut self,
        characters: &[Character],
        enemy: &Enemy,
        trials: usize,
        save_memory: bool,
    ) -> Result<Vec<CharacterReport>> {
        validate_trials(trials)?;
        characters
            .iter()
            .map(|character| self.simulate_character(character, enemy, trials, save_memory))
            .collect()
    }

    fn simulate_character(
        &mut self,
        character: &Character,
        enemy: &Enemy,
        trials: usize,
        save_memory: bool,
    ) -> Result<CharacterReport> {
        let span = info_span!("character", name = character.name());
        let _guard = span.enter();

        let compiled = self.compiler.compile(character, enemy)?;
        let (mut per_attack, per_round) = self.simulate_compiled(&compiled, trials, false)?;
        let per_attack_summary = per_attack
            .iter()
            .map(|a| {
                Ok(AttackSummary {
                    name: a.name.clone(),
                    summary: describe_table(&a.table)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if save_memory {
            for attack in &mut per_attack {
                attack.table.retain(&[Column::Damage]);
            }
        }

        let report = CharacterReport {
            name: character.name().to_string(),
            per_attack,
            per_round,
            per_attack_summary,
        };
        info!(
            attacks = compiled.len(),
            trials,
            mean_damage_per_round = report.mean_damage_per_round(),
            "character simulated"
        );
        Ok(report)
    }

    /// Summarise damage for every character at every armor class
    ///
    /// Contexts are recompiled per armor class against a copy of the enemy;
    /// the caller's enemy is left untouched. An empty list sweeps 10 to 25.
    pub fn simulate_across_armor_classes(
        &mut self,
        characters: &[Character],
        enemy: &Enemy,
        armor_classes: &[i32],
        trials: usize,
        grouping: SweepGrouping,
    ) -> Result<Vec<SweepRow>> {
        validate_trials(trials)?;
        validate_armor_classes(armor_classes)?;
        let armor_classes: Vec<i32> = if armor_classes.is_empty() {
            DEFAULT_ARMOR_CLASSES.collect()
        } else {
            armor_classes.to_vec()
        };

        let mut rows = Vec::new();
        for armor_class in armor_classes {
            let span = info_span!("armor_class", ac = armor_class);
            let _guard = span.enter();
            let mut target = enemy.clone();
            target.creature.armor_class = armor_class;

            for character in characters {
                let compiled = self.compiler.compile(character, &target)?;
                let (per_attack, per_round) = self.simulate_compiled(&compiled, trials, true)?;
                match grouping {
                    SweepGrouping::ByRound => rows.push(SweepRow {
                        character: character.name().to_string(),
                        attack: None,
                        armor_class,
                        damage: describe(per_round.damage())?,
                    }),
                    SweepGrouping::ByAttack => {
                        for attack in per_attack {
                            rows.push(SweepRow {
                                character: character.name().to_string(),
                                damage: describe(attack.table.damage())?,
                                attack: Some(attack.name),
                                armor_class,
                            });
                        }
                    }
                }
            }
            info!(characters = characters.len(), "armor class simulated");
        }
        Ok(rows)
    }

    /// Character batch with the trial count and memory mode of a config
    pub fn run(&mut self, config: &SimConfig, characters: &[Character], enemy: &Enemy) -> Result<Vec<CharacterReport>> {
        config.validate()?;
        self.simulate_character_rounds(characters, enemy, config.trials, config.save_memory)
    }

    /// Armor class sweep with the armor classes and grouping of a config
    pub fn sweep(&mut self, config: &SimConfig, characters: &[Character], enemy: &Enemy) -> Result<Vec<SweepRow>> {
        config.validate()?;
        let grouping = if config.group_by_round {
            SweepGrouping::ByRound
        } else {
            SweepGrouping::ByAttack
        };
        self.simulate_across_armor_classes(characters, enemy, &config.sweep_armor_classes(), config.trials, grouping)
    }
}
