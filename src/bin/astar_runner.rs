//! Headless A* Runner
//!
//! Walks a footman to the enemy townhall with the path agent and reports the
//! outcome together with planning and execution time.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use skirmish_ai::agent::{HoldGroundAgent, PathAgent, PatrolAgent, TurnAgent};
use skirmish_ai::core::{Result, SearchConfig, Side};
use skirmish_ai::sim::{run_episode, EpisodeOutcome, Scenario};
use tracing_subscriber::EnvFilter;

/// Headless A* Runner - single-unit navigation with replanning
#[derive(Parser, Debug)]
#[command(name = "astar_runner")]
#[command(about = "Navigate a unit to the enemy townhall with A*")]
struct Args {
    /// Scenario file
    #[arg(long, default_value = "data/scenarios/townhall_dynamic.toml")]
    scenario: PathBuf,

    /// Tuning file; only the replan radius is used here
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the replan radius
    #[arg(long)]
    replan_radius: Option<u32>,

    /// Opponent: patrol (moving blocker) or hold (static)
    #[arg(long, default_value = "patrol")]
    enemy: String,

    /// Turn limit (defaults to the scenario's own)
    #[arg(long)]
    max_turns: Option<u32>,

    /// Random seed for the patrolling blocker
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
    replan_radius: u32,
    plans: u32,
    plan_secs: f64,
    execution_secs: f64,
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    let radius = match replan_radius(&args) {
        Ok(radius) => radius,
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

    let mut friendly = PathAgent::new(Side::Friendly).with_replan_radius(radius);
    let mut enemy: Box<dyn TurnAgent> = match args.enemy.as_str() {
        "hold" => Box::new(HoldGroundAgent::new(Side::Enemy)),
        "patrol" => Box::new(PatrolAgent::new(Side::Enemy, seed)),
        other => {
            tracing::warn!(enemy = other, "unknown opponent, using patrol");
            Box::new(PatrolAgent::new(Side::Enemy, seed))
        }
    };

    let outcome = match run_episode(&scenario, &mut friendly, enemy.as_mut(), max_turns) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "episode failed");
            std::process::exit(1);
        }
    };

    let timing = friendly.timing();
    let result = RunResult {
        outcome,
        replan_radius: radius,
        plans: timing.plans,
        plan_secs: timing.plan.as_secs_f64(),
        execution_secs: timing.execution.as_secs_f64(),
        seed,
    };

    match args.format.as_str() {
        "text" => {
            let outcome = &result.outcome;
            println!("A* Navigation Result");
            println!("====================");
            println!("Scenario: {}", outcome.scenario);
            match outcome.winner {
                Some(Side::Friendly) => println!("Outcome: target destroyed"),
                Some(Side::Enemy) => println!("Outcome: footman lost"),
                None => println!("Outcome: turn limit reached"),
            }
            println!("Turns: {}", outcome.turns);
            println!("Plans: {} (replan radius {})", result.plans, result.replan_radius);
            println!("Planning time: {:.6}s", result.plan_secs);
            println!("Execution time: {:.6}s", result.execution_secs);
            println!("Total time: {:.6}s", result.plan_secs + result.execution_secs);
            println!("Seed: {}", result.seed);
        }
        other => {
            if other != "json" {
                tracing::warn!(format = other, "unknown format, defaulting to json");
            }
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!(error = %e, "failed to serialize result"),
            }
        }
    }
}

fn replan_radius(args: &Args) -> Result<u32> {
    if let Some(radius) = args.replan_radius {
        return Ok(radius);
    }
    // Any valid ply count will do; the path agent does not search
    let config = SearchConfig::with_plies(1);
    let config = match &args.config {
        Some(path) => config.with_tuning_file(path)?,
        None => config,
    };
    Ok(config.replan_radius)
}
