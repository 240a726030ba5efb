// ═══════════════════════════════════════════════════════════════════════
// Heuristic Agent — makes decisions using simple strategic heuristics.
// Significantly stronger than RandomAgent.
//
//   Reinforce: stack the whole pool on the most threatened border.
//   Attack:    only with a clear numbers edge, preferring weak targets
//              and territories that finish a continent.
//   Fortify:   pull idle interior armies toward the front line.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::{self, Agent};
use conquest_engine::map;
use conquest_engine::types::*;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;

/// Attack only when the source outnumbers the target by at least this many.
const ATTACK_MARGIN: u32 = 2;

pub struct HeuristicAgent {
    player: PlayerId,
    rng: ChaCha8Rng,
}

impl HeuristicAgent {
    pub fn new(player: PlayerId, seed: u64) -> Self {
        HeuristicAgent {
            player,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// How many territories of `continent` the player is missing.
    fn missing_in_continent(&self, state: &GameState, continent: Continent) -> usize {
        map::continent_members(continent)
            .filter(|&id| state.territory(id).is_some_and(|t| !t.owner.is(&self.player)))
            .count()
    }

    /// Attack desirability: bigger ratio is better, finishing a continent is a bonus.
    fn attack_score(&self, state: &GameState, from: TerritoryId, to: TerritoryId) -> Option<f64> {
        let source = state.territory(from)?;
        let target = state.territory(to)?;
        if source.armies < target.armies + ATTACK_MARGIN {
            return None;
        }
        let mut score = source.armies as f64 / target.armies.max(1) as f64;
        if self.missing_in_continent(state, target.continent) == 1 {
            score += target.continent.classic_bonus() as f64;
        }
        if target.owner == Owner::Neutral {
            score *= 0.75;
        }
        Some(score)
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str { "Heuristic" }
    fn player(&self) -> &PlayerId { &self.player }

    fn deploy(&mut self, state: &GameState) -> Option<(TerritoryId, u32)> {
        let pool = agent::pool(state, &self.player);
        if pool == 0 {
            return None;
        }
        let mut borders = agent::border_territories(state, &self.player);
        if borders.is_empty() {
            borders = state.owned_by(&self.player).map(|t| t.id).collect();
        }
        // Shuffle first so ties are broken randomly but reproducibly
        borders.shuffle(&mut self.rng);
        let target = borders.into_iter().max_by_key(|&id| {
            let pressure = agent::hostile_pressure(state, id, &self.player) as i64;
            let own = state.territory(id).map_or(0, |t| t.armies) as i64;
            pressure - own
        })?;
        Some((target, pool))
    }

    fn attack(&mut self, state: &GameState) -> Option<(TerritoryId, TerritoryId)> {
        let mut options = agent::attack_options(state, &self.player);
        options.shuffle(&mut self.rng);
        options.into_iter()
            .filter_map(|(from, to)| self.attack_score(state, from, to).map(|s| (from, to, s)))
            .max_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(from, to, _)| (from, to))
    }

    fn fortify(&mut self, state: &GameState) -> Option<(TerritoryId, TerritoryId, u32)> {
        // One consolidating move per phase is enough
        if !state.moved_this_phase.is_empty() {
            return None;
        }
        let borders = agent::border_territories(state, &self.player);
        let mut best: Option<(TerritoryId, TerritoryId, u32)> = None;
        for (from, destinations) in agent::fortify_options(state, &self.player) {
            if borders.contains(&from) {
                continue;
            }
            let spare = state.territory(from).map_or(0, |t| t.armies.saturating_sub(1));
            let Some(&to) = destinations.iter()
                .filter(|d| borders.contains(*d))
                .max_by_key(|&&d| agent::hostile_pressure(state, d, &self.player))
            else {
                continue;
            };
            if best.map_or(true, |(_, _, armies)| spare > armies) {
                best = Some((from, to, spare));
            }
        }
        best.filter(|&(_, _, armies)| armies > 0)
    }
}
