//! ContextCompiler - Runs the rule pipeline for every attack of a character

use super::accumulator::ContextAccumulator;
use super::contexts::CompiledAttack;
use super::rules::{default_rules, ContextRule, RuleInput};
use crate::creature::{Attack, Character, Enemy};
use crate::error::Result;
use tracing::debug;

/// Turns (character, attack, enemy) into flattened context pairs
pub struct ContextCompiler {
    rules: Vec<Box<dyn ContextRule>>,
}

impl Default for ContextCompiler {
    fn default() -> Self {
        ContextCompiler {
            rules: default_rules(),
        }
    }
}

impl ContextCompiler {
    /// Compiler with the standard rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiler with a custom rule set; rules are sorted by priority
    pub fn with_rules(mut rules: Vec<Box<dyn ContextRule>>) -> Self {
        rules.sort_by_key(|r| r.priority());
        ContextCompiler { rules }
    }

    /// Ids of the rules in application order
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Compile one attack against one enemy
    pub fn compile_attack(&self, character: &Character, attack: &Attack, enemy: &Enemy) -> Result<CompiledAttack> {
        attack.validate()?;
        let input = RuleInput {
            character,
            attack,
            enemy,
        };
        let mut acc = ContextAccumulator::new();
        for rule in &self.rules {
            rule.apply(&input, &mut acc)?;
        }
        let compiled = acc.finish(&attack.name);
        debug!(
            character = character.name(),
            attack = %compiled.name,
            attack_bonus = %compiled.attack.bonus,
            damage = %compiled.damage.damage,
            difficulty_class = compiled.attack.difficulty_class,
            "compiled attack context"
        );
        Ok(compiled)
    }

    /// Compile every attack the character owns, in order
    pub fn compile(&self, character: &Character, enemy: &Enemy) -> Result<Vec<CompiledAttack>> {
        character.validate()?;
        enemy.validate()?;
        character
            .attacks()
            .iter()
            .map(|attack| self.compile_attack(character, attack, enemy))
            .collect()
    }
}

/// Compile with the standard rule set
pub fn compile_contexts(character: &Character, enemy: &Enemy) -> Result<Vec<CompiledAttack>> {
    ContextCompiler::new().compile(character, enemy)
}
