// ═══════════════════════════════════════════════════════════════════════
// Game Runner — runs a complete headless game with agents
//
// The runner plays the part of the service around the engine: it owns a
// GameRoom, asks whichever agent holds the current seat for an action,
// and feeds it back in until the game finishes or the decision budget
// runs out.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::{Result, TournamentError};
use conquest_agents::Agent;
use conquest_engine::types::*;
use conquest_engine::{GameConfig, GameRoom};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of a completed game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResult {
    pub seed: u64,
    pub winner: Option<PlayerId>,
    pub winner_agent: Option<String>,
    pub turns: u32,
    pub decisions: usize,
    pub player_results: Vec<PlayerResult>,
}

impl GameResult {
    /// Pretty-printed JSON, as `play --json` prints it.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerResult {
    pub player: PlayerId,
    pub agent_name: String,
    pub final_territories: usize,
    pub final_armies: u32,
    pub eliminated: bool,
}

/// Run a complete game with the given agents, one per seat.
/// The roster is taken from the agents' own player ids.
pub fn run_game(
    agents: &mut [Box<dyn Agent>],
    seed: u64,
    config: GameConfig,
    max_decisions: usize, // safety limit against stalemates
) -> Result<GameResult> {
    let roster: Vec<PlayerId> = agents.iter().map(|a| a.player().clone()).collect();
    let room_id = format!("sim-{}", seed);
    let mut room = GameRoom::new(&room_id, &roster, config, seed)?;
    let mut decisions = 0;

    while !room.is_finished() {
        let current = room.state().current_player.clone();
        let agent = agents.iter_mut()
            .find(|a| a.player() == &current)
            .ok_or_else(|| TournamentError::MissingAgent(current.clone()))?;

        let action = agent.decide(room.state());
        room.apply(&action)?;
        decisions += 1;

        if decisions >= max_decisions && !room.is_finished() {
            return Err(TournamentError::DecisionLimit { max: max_decisions, turn: room.state().turn });
        }
    }

    let seed = room.seed();
    let result = build_result(&room.into_state(), agents, seed, decisions);
    info!(
        seed,
        turns = result.turns,
        decisions,
        winner = result.winner.as_ref().map_or("<none>", |w| w.as_str()),
        "game finished"
    );
    Ok(result)
}

/// Play one game per seed in parallel. `make_agents` seats a fresh set of
/// agents for each seed; results come back in seed order.
pub fn run_series<F>(
    seeds: &[u64],
    config: &GameConfig,
    max_decisions: usize,
    make_agents: F,
) -> Vec<(u64, Result<GameResult>)>
where
    F: Fn(u64) -> Vec<Box<dyn Agent>> + Sync,
{
    seeds
        .par_iter()
        .map(|&seed| {
            let mut agents = make_agents(seed);
            let outcome = run_game(&mut agents, seed, config.clone(), max_decisions);
            match &outcome {
                Ok(r) => debug!(seed, turns = r.turns, "series game done"),
                Err(e) => warn!(seed, error = %e, "series game failed"),
            }
            (seed, outcome)
        })
        .collect()
}

fn build_result(state: &GameState, agents: &[Box<dyn Agent>], seed: u64, decisions: usize) -> GameResult {
    let agent_name = |player: &PlayerId| {
        agents.iter()
            .find(|a| a.player() == player)
            .map_or_else(String::new, |a| a.name().to_string())
    };

    let player_results = state.players.iter()
        .map(|p| PlayerResult {
            player: p.id.clone(),
            agent_name: agent_name(&p.id),
            final_territories: p.territory_count(),
            final_armies: state.owned_by(&p.id).map(|t| t.armies).sum(),
            eliminated: p.eliminated,
        })
        .collect();

    GameResult {
        seed,
        winner: state.winner.clone(),
        winner_agent: state.winner.as_ref().map(agent_name),
        turns: state.turn,
        decisions,
        player_results,
    }
}
