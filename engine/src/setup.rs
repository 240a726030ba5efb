// ═══════════════════════════════════════════════════════════════════════
// Game setup — creates the initial GameState for a roster of players
// ═══════════════════════════════════════════════════════════════════════

use crate::config::GameConfig;
use crate::engine;
use crate::error::{GameError, Result};
use crate::map;
use crate::reinforcement::calculate_reinforcement_armies;
use crate::types::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use tracing::info;

/// Armies placed on every territory at the start, player-owned or neutral.
pub const STARTING_ARMIES: u32 = 3;

/// Create the initial game state using a seeded ChaCha8 stream.
/// Same seed and roster give the same board.
pub fn initialize(room_id: &str, player_ids: &[PlayerId], config: GameConfig, seed: u64) -> Result<GameState> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    initialize_with(room_id, player_ids, config, &mut rng)
}

/// Create the initial game state with a caller-supplied random source.
pub fn initialize_with<R: Rng + ?Sized>(
    room_id: &str,
    player_ids: &[PlayerId],
    config: GameConfig,
    rng: &mut R,
) -> Result<GameState> {
    if player_ids.is_empty() {
        return Err(GameError::MalformedAction("roster is empty".into()));
    }
    let unique: BTreeSet<&PlayerId> = player_ids.iter().collect();
    if unique.len() != player_ids.len() {
        return Err(GameError::MalformedAction("roster contains duplicate player ids".into()));
    }
    config.validate()?;

    // Turn order = uniform shuffle of the roster
    let mut turn_order = player_ids.to_vec();
    turn_order.shuffle(rng);

    let mut players: Vec<Player> = turn_order.iter().enumerate()
        .map(|(seat, id)| Player {
            id: id.clone(),
            label: format!("Player {}", seat + 1),
            color: PLAYER_COLORS[seat % PLAYER_COLORS.len()].to_string(),
            pool: 0,
            territories: BTreeSet::new(),
            eliminated: false,
        })
        .collect();

    // Deal floor(N / (players + 1)) territories each; the rest stay neutral
    let mut territories = map::catalog();
    let mut deal: Vec<TerritoryId> = territories.iter().map(|t| t.id).collect();
    deal.shuffle(rng);

    let per_player = territories.len() / (players.len() + 1);
    let mut cards = deal.into_iter();
    for player in &mut players {
        for id in cards.by_ref().take(per_player) {
            territories[id.index()].owner = Owner::Player(player.id.clone());
            player.territories.insert(id);
        }
    }
    for id in cards {
        territories[id.index()].owner = Owner::Neutral;
    }
    for t in &mut territories {
        t.armies = STARTING_ARMIES;
    }

    let mut state = GameState {
        room_id: room_id.to_string(),
        phase: Phase::Setup,
        current_player: turn_order[0].clone(),
        turn: 1,
        territories,
        players,
        moved_this_phase: BTreeSet::new(),
        has_attacked_this_turn: false,
        last_battle: None,
        config,
        winner: None,
    };

    for i in 0..state.players.len() {
        let id = state.players[i].id.clone();
        if state.players[i].territories.is_empty() {
            state.players[i].eliminated = true;
        } else {
            state.players[i].pool = calculate_reinforcement_armies(&state, &id);
        }
    }

    // A roster too large to deal to holds nobody but the empty-handed
    let first_active = state.active_players().next().map(|p| p.id.clone());
    if let Some(first) = first_active {
        state.current_player = first;
    }
    engine::check_victory(&mut state);

    info!(
        room = %state.room_id,
        players = state.players.len(),
        per_player,
        movement = ?state.config.movement_type,
        first = %state.current_player,
        "game initialized"
    );
    Ok(state)
}
