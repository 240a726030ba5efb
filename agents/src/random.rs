// ═══════════════════════════════════════════════════════════════════════
// Random Agent — makes all decisions randomly.
// Serves as baseline and for testing game engine stability.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::{self, Agent};
use conquest_engine::types::*;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;

/// Chance of launching another attack while one is available.
const ATTACK_APPETITE: f64 = 0.7;

pub struct RandomAgent {
    player: PlayerId,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(player: PlayerId, seed: u64) -> Self {
        RandomAgent {
            player,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str { "Random" }
    fn player(&self) -> &PlayerId { &self.player }

    fn deploy(&mut self, state: &GameState) -> Option<(TerritoryId, u32)> {
        let pool = agent::pool(state, &self.player);
        if pool == 0 {
            return None;
        }
        let owned: Vec<TerritoryId> = state.owned_by(&self.player).map(|t| t.id).collect();
        let &target = owned.choose(&mut self.rng)?;
        let armies = self.rng.gen_range(1..=pool);
        Some((target, armies))
    }

    fn attack(&mut self, state: &GameState) -> Option<(TerritoryId, TerritoryId)> {
        let options = agent::attack_options(state, &self.player);
        if options.is_empty() || !self.rng.gen_bool(ATTACK_APPETITE) {
            return None;
        }
        options.choose(&mut self.rng).copied()
    }

    fn fortify(&mut self, state: &GameState) -> Option<(TerritoryId, TerritoryId, u32)> {
        if self.rng.gen_bool(0.5) {
            return None;
        }
        let options = agent::fortify_options(state, &self.player);
        let (from, destinations) = options.choose(&mut self.rng)?;
        let &to = destinations.choose(&mut self.rng)?;
        let available = state.territory(*from)?.armies;
        let armies = self.rng.gen_range(1..available);
        Some((*from, to, armies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conquest_engine::{initialize, validate_action, GameConfig, MovementType};

    #[test]
    fn test_random_agent_actions_are_legal() {
        let config = GameConfig::with_movement(MovementType::PathMulti);
        let state = initialize("rnd", &["x".into(), "y".into()], config, 3).unwrap();
        let mut seats: Vec<RandomAgent> = state.players.iter()
            .enumerate()
            .map(|(i, p)| RandomAgent::new(p.id.clone(), 100 + i as u64))
            .collect();

        let mut state = state;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            if state.is_finished() {
                break;
            }
            let seat = state.player_index(&state.current_player).unwrap();
            let action = seats[seat].decide(&state);
            assert_eq!(validate_action(&state, &action), Ok(true), "{:?}", action);
            conquest_engine::process_action(&mut state, &action, &mut rng).unwrap();
        }
    }
}
