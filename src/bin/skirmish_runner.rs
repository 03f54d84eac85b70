//! Headless Skirmish Runner
//!
//! Plays one scenario with a minimax squad against a chosen opponent and
//! prints the outcome as JSON or text.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use skirmish_ai::agent::{HoldGroundAgent, MinimaxAgent, PatrolAgent, TurnAgent};
use skirmish_ai::core::{parse_plies, Result, SearchConfig, Side};
use skirmish_ai::search::SearchStats;
use skirmish_ai::sim::{run_episode, EpisodeOutcome, Scenario};
use tracing_subscriber::EnvFilter;

/// Headless Skirmish Runner - minimax squad vs a scripted or searching opponent
#[derive(Parser, Debug)]
#[command(name = "skirmish_runner")]
#[command(about = "Run a minimax squad through a skirmish scenario")]
struct Args {
    /// Search depth in plies (required)
    #[arg(long)]
    plies: Option<String>,

    /// Scenario file
    #[arg(long, default_value = "data/scenarios/footmen_vs_archers.toml")]
    scenario: PathBuf,

    /// Tuning file with replan radius and evaluation weights
    #[arg(long)]
    config: Option<PathBuf>,

    /// Opponent: hold, patrol or minimax
    #[arg(long, default_value = "hold")]
    enemy: String,

    /// Turn limit (defaults to the scenario's own)
    #[arg(long)]
    max_turns: Option<u32>,

    /// Random seed for the patrolling opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    #[serde(flatten)]
    outcome: EpisodeOutcome,
    plies: u32,
    seed: u64,
    last_search: SearchStats,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    // Bad configuration is fatal before any turn is played
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let scenario = match Scenario::load(&args.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            tracing::error!(path = %args.scenario.display(), error = %e, "failed to load scenario");
            std::process::exit(1);
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let max_turns = args.max_turns.unwrap_or(scenario.max_turns);

    let result = build_agents(&args, &config, seed).and_then(|(mut friendly, mut enemy)| {
        let outcome = run_episode(&scenario, &mut friendly, enemy.as_mut(), max_turns)?;
        Ok(RunResult {
            outcome,
            plies: config.plies,
            seed,
            last_search: friendly.last_stats(),
        })
    });

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "episode failed");
            std::process::exit(1);
        }
    };

    match args.format.as_str() {
        "text" => print_text(&result),
        "json" => print_json(&result),
        other => {
            tracing::warn!(format = other, "unknown format, defaulting to json");
            print_json(&result);
        }
    }
}

fn load_config(args: &Args) -> Result<SearchConfig> {
    let config = SearchConfig::with_plies(parse_plies(args.plies.as_deref())?);
    match &args.config {
        Some(path) => config.with_tuning_file(path),
        None => {
            config.validate()?;
            Ok(config)
        }
    }
}

fn build_agents(args: &Args, config: &SearchConfig, seed: u64) -> Result<(MinimaxAgent, Box<dyn TurnAgent>)> {
    let friendly = MinimaxAgent::new(Side::Friendly, config.clone())?;
    let enemy: Box<dyn TurnAgent> = match args.enemy.as_str() {
        "patrol" => Box::new(PatrolAgent::new(Side::Enemy, seed)),
        "minimax" => Box::new(MinimaxAgent::new(Side::Enemy, config.clone())?),
        "hold" => Box::new(HoldGroundAgent::new(Side::Enemy)),
        other => {
            tracing::warn!(enemy = other, "unknown opponent, holding ground");
            Box::new(HoldGroundAgent::new(Side::Enemy))
        }
    };
    Ok((friendly, enemy))
}

fn print_json(result: &RunResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!(error = %e, "failed to serialize result"),
    }
}

fn print_text(result: &RunResult) {
    let outcome = &result.outcome;
    println!("Skirmish Result");
    println!("===============");
    println!("Scenario: {} ({:?})", outcome.scenario, outcome.objective);
    println!("Agents: {} vs {}", outcome.friendly_agent, outcome.enemy_agent);
    match outcome.winner {
        Some(side) => println!("Winner: {:?}", side),
        None => println!("Winner: none (turn limit)"),
    }
    println!("Turns: {}", outcome.turns);
    println!(
        "Friendly: {} alive, {} hp | Enemy: {} alive, {} hp",
        outcome.friendly_alive, outcome.friendly_hp, outcome.enemy_alive, outcome.enemy_hp
    );
    println!("Commands: {} issued, {} rejected", outcome.commands_issued, outcome.commands_rejected);
    println!();
    println!("Plies: {}", result.plies);
    println!(
        "Last search: {} expanded, {} leaves, {} cutoffs",
        result.last_search.nodes_expanded, result.last_search.leaves_evaluated, result.last_search.cutoffs
    );
    println!("Seed: {}", result.seed);
}
