//! dpr - Simulate damage per round for a party against one enemy
//!
//! Loads a scenario file (or the bundled greatsword preset), runs the
//! simulation and prints summary tables.

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dpr_core::config::{default_scenario, load_scenario};
use dpr_core::Simulator;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Damage-per-round simulator
#[derive(Parser, Debug)]
#[command(name = "dpr", version, about = "Monte Carlo damage-per-round simulator")]
struct Args {
    /// Scenario file (.toml or .json); the bundled preset when omitted
    scenario: Option<PathBuf>,

    /// Rounds simulated per attack
    #[arg(short, long)]
    trials: Option<usize>,

    /// Random seed
    #[arg(short, long, conflicts_with = "shuffle")]
    seed: Option<u64>,

    /// Seed from OS entropy instead of a fixed seed
    #[arg(long)]
    shuffle: bool,

    /// Sweep armor classes instead of simulating the enemy's own
    #[arg(long)]
    sweep: bool,

    /// Armor classes to sweep (repeatable); 10 through 25 when omitted
    #[arg(long = "ac", requires = "sweep")]
    armor_classes: Vec<i32>,

    /// Summarise the sweep per attack rather than per round
    #[arg(long, requires = "sweep")]
    by_attack: bool,

    /// Keep only the damage column of per-attack tables
    #[arg(long)]
    save_memory: bool,

    /// Print the crit chance chart and exit
    #[arg(long)]
    crit_chart: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "dpr=debug,dpr_core=debug"
    } else {
        "dpr=info,dpr_core=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if args.crit_chart {
        print!("{}", report::crit_chart_table(&dpr_core::summary::analytic::crit_chart()));
        return Ok(());
    }

    let mut scenario = match &args.scenario {
        Some(path) => load_scenario(path).with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => default_scenario().context("Bundled scenario is invalid")?,
    };

    // Command-line flags override the scenario file
    let config = &mut scenario.simulation;
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.shuffle |= args.shuffle;
    config.save_memory |= args.save_memory;
    if !args.armor_classes.is_empty() {
        config.armor_classes = args.armor_classes.clone();
    }
    if args.by_attack {
        config.group_by_round = false;
    }
    config.validate()?;

    info!(
        characters = scenario.characters.len(),
        enemy = scenario.enemy.name(),
        trials = scenario.simulation.trials,
        seed = ?scenario.simulation.effective_seed(),
        "running scenario"
    );

    let mut simulator = Simulator::from_config(&scenario.simulation);
    if args.sweep {
        let rows = simulator.sweep(&scenario.simulation, &scenario.characters, &scenario.enemy)?;
        print!("{}", report::sweep_table(&rows));
    } else {
        let reports = simulator.run(&scenario.simulation, &scenario.characters, &scenario.enemy)?;
        for character in &reports {
            print!("{}", report::character_table(character)?);
        }
    }

    Ok(())
}
