// ═══════════════════════════════════════════════════════════════════════
// Agent Trait — interface that all automated players implement
//
// Agents read the full GameState (every army count is public in this
// game) and answer with an Action for their own seat. The engine still
// validates everything; an agent that returns an illegal action simply
// gets it rejected.
//
// `decide` dispatches on the phase. Returning `None` from a phase method
// means "I'm done with this phase" and becomes an end_turn.
// ═══════════════════════════════════════════════════════════════════════

use conquest_engine::movement;
use conquest_engine::types::*;

pub trait Agent: Send + Sync {
    /// Human-readable name for this agent (e.g., "Random", "Heuristic").
    fn name(&self) -> &str;

    /// The seat this agent plays.
    fn player(&self) -> &PlayerId;

    /// Make a decision for the current state.
    fn decide(&mut self, state: &GameState) -> Action {
        let kind = match state.phase {
            Phase::Setup => ActionKind::BeginTurn,
            Phase::Reinforcement => match self.deploy(state) {
                Some((territory, armies)) => ActionKind::Deploy { territory, armies },
                None => ActionKind::EndTurn,
            },
            Phase::Attack => match self.attack(state) {
                Some((from, to)) => ActionKind::Attack { from, to, armies: None },
                None => ActionKind::EndTurn,
            },
            Phase::Fortify => match self.fortify(state) {
                Some((from, to, armies)) => ActionKind::Fortify { from, to, armies },
                None => ActionKind::EndTurn,
            },
            Phase::Finished => ActionKind::EndTurn,
        };
        Action::new(state.room_id.clone(), self.player().clone(), kind)
    }

    // ── Individual decision methods ────────────────────────────────────

    /// Where to place reinforcements, and how many. None = keep the rest.
    fn deploy(&mut self, state: &GameState) -> Option<(TerritoryId, u32)>;

    /// Which neighbour to roll against next. None = stop attacking.
    fn attack(&mut self, state: &GameState) -> Option<(TerritoryId, TerritoryId)>;

    /// One fortify move (from, to, armies). None = end the turn.
    fn fortify(&mut self, state: &GameState) -> Option<(TerritoryId, TerritoryId, u32)>;
}

// ── Shared board helpers ───────────────────────────────────────────────

/// The acting player's reinforcement pool.
pub fn pool(state: &GameState, player: &PlayerId) -> u32 {
    state.player(player).map_or(0, |p| p.pool)
}

/// Is this territory held by someone the player must fight?
pub fn is_hostile(state: &GameState, id: TerritoryId, player: &PlayerId) -> bool {
    state.territory(id).is_some_and(|t| match t.owner.player() {
        Some(owner) => !movement::same_alliance(state, owner, player),
        None => true,
    })
}

/// Total hostile armies adjacent to `id`.
pub fn hostile_pressure(state: &GameState, id: TerritoryId, player: &PlayerId) -> u32 {
    state.territory(id).map_or(0, |t| {
        t.adjacent.iter()
            .filter(|&&adj| is_hostile(state, adj, player))
            .filter_map(|&adj| state.territory(adj))
            .map(|adj| adj.armies)
            .sum()
    })
}

/// Owned territories touching at least one hostile territory.
pub fn border_territories(state: &GameState, player: &PlayerId) -> Vec<TerritoryId> {
    state.owned_by(player)
        .filter(|t| t.adjacent.iter().any(|&adj| is_hostile(state, adj, player)))
        .map(|t| t.id)
        .collect()
}

/// Every (from, to) pair the player could attack right now with the default risk.
pub fn attack_options(state: &GameState, player: &PlayerId) -> Vec<(TerritoryId, TerritoryId)> {
    let mut options = Vec::new();
    for t in state.owned_by(player).filter(|t| t.armies >= 2) {
        for &adj in &t.adjacent {
            if is_hostile(state, adj, player) {
                options.push((t.id, adj));
            }
        }
    }
    options
}

/// Every source territory with spare armies and its legal destinations.
pub fn fortify_options(state: &GameState, player: &PlayerId) -> Vec<(TerritoryId, Vec<TerritoryId>)> {
    state.owned_by(player)
        .filter(|t| t.armies >= 2)
        .map(|t| (t.id, movement::valid_destinations(state, t.id, player)))
        .filter(|(_, destinations)| !destinations.is_empty())
        .collect()
}
