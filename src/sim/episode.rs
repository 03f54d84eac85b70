//! Turn loop driving two agents through one scenario

use serde::Serialize;

use crate::agent::TurnAgent;
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{Side, Turn};
use crate::sim::arena::Arena;
use crate::sim::scenario::{Objective, Scenario};

/// Summary of a finished episode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeOutcome {
    pub scenario: String,
    pub objective: Objective,
    pub friendly_agent: String,
    pub enemy_agent: String,
    /// `None` when the turn limit ran out first
    pub winner: Option<Side>,
    pub turns: Turn,
    pub friendly_hp: i32,
    pub enemy_hp: i32,
    pub friendly_alive: usize,
    pub enemy_alive: usize,
    pub commands_issued: u32,
    pub commands_rejected: u32,
}

#[derive(Default)]
struct Tally {
    issued: u32,
    rejected: u32,
}

/// Play `scenario` to completion or `max_turns`
///
/// Each turn Friendly acts first, then Enemy, each seeing the world as the
/// other left it. The episode ends as soon as either side has won.
pub fn run_episode(
    scenario: &Scenario,
    friendly: &mut dyn TurnAgent,
    enemy: &mut dyn TurnAgent,
    max_turns: Turn,
) -> Result<EpisodeOutcome> {
    if friendly.side() != Side::Friendly || enemy.side() != Side::Enemy {
        return Err(SkirmishError::Scenario(format!(
            "agents must play friendly then enemy (got {:?} and {:?})",
            friendly.side(),
            enemy.side()
        )));
    }

    let mut arena = Arena::new(scenario.world());
    let mut tally = Tally::default();
    let mut winner = arena.winner(scenario.objective);
    let mut turns: Turn = 0;

    tracing::info!(
        scenario = %scenario.name,
        friendly = friendly.name(),
        enemy = enemy.name(),
        max_turns,
        "episode started"
    );

    while winner.is_none() && turns < max_turns {
        let first = turns == 0;
        turns += 1;

        take_turn(friendly, &mut arena, first, &mut tally);
        winner = arena.winner(scenario.objective);
        if winner.is_none() {
            take_turn(enemy, &mut arena, first, &mut tally);
            winner = arena.winner(scenario.objective);
        }
        arena.advance_turn();
    }

    friendly.on_episode_end(arena.world());
    enemy.on_episode_end(arena.world());

    let world = arena.world();
    let outcome = EpisodeOutcome {
        scenario: scenario.name.clone(),
        objective: scenario.objective,
        friendly_agent: friendly.name().to_string(),
        enemy_agent: enemy.name().to_string(),
        winner,
        turns,
        friendly_hp: world.total_hp(Side::Friendly),
        enemy_hp: world.total_hp(Side::Enemy),
        friendly_alive: world.units_of(Side::Friendly).count(),
        enemy_alive: world.units_of(Side::Enemy).count(),
        commands_issued: tally.issued,
        commands_rejected: tally.rejected,
    };

    tracing::info!(winner = ?outcome.winner, turns = outcome.turns, "episode finished");
    Ok(outcome)
}

fn take_turn(agent: &mut dyn TurnAgent, arena: &mut Arena, first: bool, tally: &mut Tally) {
    let commands = if first {
        agent.on_episode_start(arena.world())
    } else {
        agent.on_turn(arena.world())
    };
    let report = arena.apply(agent.side(), &commands);

    tally.issued += commands.len() as u32;
    tally.rejected += report.rejected;
    tracing::debug!(
        side = ?agent.side(),
        turn = arena.world().turn,
        moves = report.moves,
        attacks = report.attacks,
        rejected = report.rejected,
        "turn resolved"
    );
}
