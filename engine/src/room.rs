// ═══════════════════════════════════════════════════════════════════════
// GameRoom — one live game, owned by whoever runs the room
//
// Bundles the authoritative GameState with its own seeded random stream
// so actions for a room are applied one at a time, in order, and a replay
// of the same seed and action log reproduces the same game.
// ═══════════════════════════════════════════════════════════════════════

use crate::config::GameConfig;
use crate::engine::{self, Outcome};
use crate::error::{GameError, Result, RuleViolation};
use crate::setup;
use crate::types::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct GameRoom {
    state: GameState,
    rng: ChaCha8Rng,
    seed: u64,
    actions_applied: u64,
}

impl GameRoom {
    /// Deal a new game. The seed drives both setup and every dice roll.
    pub fn new(room_id: &str, player_ids: &[PlayerId], config: GameConfig, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = setup::initialize_with(room_id, player_ids, config, &mut rng)?;
        Ok(GameRoom { state, rng, seed, actions_applied: 0 })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn actions_applied(&self) -> u64 {
        self.actions_applied
    }

    pub fn room_id(&self) -> &str {
        &self.state.room_id
    }

    fn check_room(&self, action: &Action) -> Result<()> {
        if action.room_id != self.state.room_id {
            return Err(RuleViolation::WrongRoom {
                expected: self.state.room_id.clone(),
                actual: action.room_id.clone(),
            }
            .into());
        }
        Ok(())
    }

    pub fn validate(&self, action: &Action) -> Result<bool> {
        match self.check_room(action) {
            Ok(()) => engine::validate_action(&self.state, action),
            Err(GameError::Rejected(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Validate and apply in one step.
    pub fn apply(&mut self, action: &Action) -> Result<Outcome> {
        self.check_room(action)?;
        match engine::process_action(&mut self.state, action, &mut self.rng) {
            Ok(outcome) => {
                self.actions_applied += 1;
                Ok(outcome)
            }
            Err(e) => {
                warn!(room = %self.state.room_id, player = %action.player_id, error = %e, "action rejected");
                Err(e)
            }
        }
    }

    /// Apply a raw JSON action from the wire.
    pub fn apply_json(&mut self, json: &str) -> Result<Outcome> {
        let action = engine::parse_action(json)?;
        self.apply(&action)
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        engine::legal_actions(&self.state)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }
}
