// ═══════════════════════════════════════════════════════════════════════
// Movement — fortify legality under the configured movement regime
// ═══════════════════════════════════════════════════════════════════════

use crate::config::MovementType;
use crate::error::RuleViolation;
use crate::types::*;
use std::collections::VecDeque;

/// Whether two players fight on the same side.
/// Team rules are not designed yet, so this is identity regardless of `team_play`.
pub fn same_alliance(_state: &GameState, a: &PlayerId, b: &PlayerId) -> bool {
    a == b
}

/// Can `player` route armies through (or into) this territory?
fn is_friendly(state: &GameState, id: TerritoryId, player: &PlayerId) -> bool {
    state.territory(id)
        .and_then(|t| t.owner.player())
        .is_some_and(|owner| same_alliance(state, owner, player))
}

/// Breadth-first search from `from` to `to` through friendly territory only.
pub fn is_reachable(state: &GameState, from: TerritoryId, to: TerritoryId, player: &PlayerId) -> bool {
    if from == to {
        return true;
    }
    let mut visited = vec![false; state.territories.len()];
    let mut queue: VecDeque<TerritoryId> = VecDeque::new();

    let Some(start) = visited.get_mut(from.index()) else {
        return false;
    };
    *start = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        let Some(territory) = state.territory(current) else {
            continue;
        };
        for &adj in &territory.adjacent {
            if adj.index() >= visited.len() || visited[adj.index()] {
                continue;
            }
            if !is_friendly(state, adj, player) {
                continue;
            }
            if adj == to {
                return true;
            }
            visited[adj.index()] = true;
            queue.push_back(adj);
        }
    }

    false
}

/// Destination rule for the active movement type. Ownership of both ends
/// is checked by the caller.
pub fn check_destination(
    state: &GameState,
    from: TerritoryId,
    to: TerritoryId,
    player: &PlayerId,
) -> Result<(), RuleViolation> {
    if from == to {
        return Err(RuleViolation::SameTerritory);
    }
    let movement = state.config.movement_type;
    if movement.uses_paths() {
        if is_reachable(state, from, to, player) {
            Ok(())
        } else {
            Err(RuleViolation::Unreachable { from, to })
        }
    } else {
        let adjacent = state.territory(from).is_some_and(|t| t.is_adjacent(to));
        if adjacent {
            Ok(())
        } else {
            Err(RuleViolation::NotAdjacent { from, to })
        }
    }
}

/// Single-move regimes allow one fortify per phase; the others one per source territory.
pub fn check_allowance(state: &GameState, from: TerritoryId) -> Result<(), RuleViolation> {
    let exhausted = if state.config.movement_type.single_move() {
        !state.moved_this_phase.is_empty()
    } else {
        state.moved_this_phase.contains(&from)
    };
    if exhausted {
        Err(RuleViolation::MoveAllowanceExhausted(from))
    } else {
        Ok(())
    }
}

/// Full fortify route check: friendly ends, destination rule, allowance.
pub fn check_route(
    state: &GameState,
    from: TerritoryId,
    to: TerritoryId,
    player: &PlayerId,
) -> Result<(), RuleViolation> {
    if !is_friendly(state, from, player) {
        return Err(RuleViolation::NotOwner(from));
    }
    if !is_friendly(state, to, player) {
        return Err(RuleViolation::NotOwner(to));
    }
    check_destination(state, from, to, player)?;
    check_allowance(state, from)
}

/// All territories `player` may fortify into from `from` right now.
pub fn valid_destinations(state: &GameState, from: TerritoryId, player: &PlayerId) -> Vec<TerritoryId> {
    state.territories.iter()
        .map(|t| t.id)
        .filter(|&to| to != from && check_route(state, from, to, player).is_ok())
        .collect()
}

/// Human readable regime description, used by the runner.
pub fn describe(movement: MovementType) -> &'static str {
    match movement {
        MovementType::ClassicAdjacent => "adjacent moves, one per phase",
        MovementType::AdjacentMulti => "adjacent moves, one per territory",
        MovementType::PathSingle => "connected paths, one per phase",
        MovementType::PathMulti => "connected paths, one per territory",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::map::*;
    use crate::setup::initialize_with;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Two players; alice owns everything in the Americas, bob owns the rest.
    fn americas_state(movement: MovementType) -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = initialize_with(
            "room",
            &["alice".into(), "bob".into()],
            GameConfig::with_movement(movement),
            &mut rng,
        )
        .unwrap();
        let alice = PlayerId::from("alice");
        let bob = PlayerId::from("bob");
        for player in &mut state.players {
            player.territories.clear();
        }
        for t in &mut state.territories {
            let owner = if t.id.0 <= ARGENTINA.0 { alice.clone() } else { bob.clone() };
            t.owner = Owner::Player(owner.clone());
            t.armies = 3;
            if let Some(p) = state.players.iter_mut().find(|p| p.id == owner) {
                p.territories.insert(t.id);
            }
        }
        state.phase = Phase::Fortify;
        state
    }

    #[test]
    fn test_adjacent_regime_rejects_distant_target() {
        let state = americas_state(MovementType::ClassicAdjacent);
        let alice = PlayerId::from("alice");
        assert!(check_route(&state, ALASKA, ALBERTA, &alice).is_ok());
        assert_eq!(
            check_route(&state, ALASKA, ARGENTINA, &alice),
            Err(RuleViolation::NotAdjacent { from: ALASKA, to: ARGENTINA })
        );
    }

    #[test]
    fn test_path_regime_follows_owned_chain() {
        let state = americas_state(MovementType::PathSingle);
        let alice = PlayerId::from("alice");
        assert!(is_reachable(&state, ALASKA, ARGENTINA, &alice));
        assert!(check_route(&state, ALASKA, ARGENTINA, &alice).is_ok());
    }

    #[test]
    fn test_path_blocked_by_enemy_territory() {
        let mut state = americas_state(MovementType::PathMulti);
        let alice = PlayerId::from("alice");
        // Cut South America off at Venezuela
        state.territories[VENEZUELA.index()].owner = Owner::Player("bob".into());
        assert!(!is_reachable(&state, ALASKA, ARGENTINA, &alice));
        assert_eq!(
            check_route(&state, ALASKA, PERU, &alice),
            Err(RuleViolation::Unreachable { from: ALASKA, to: PERU })
        );
    }

    #[test]
    fn test_neutral_territory_blocks_path() {
        let mut state = americas_state(MovementType::PathSingle);
        let alice = PlayerId::from("alice");
        state.territories[CENTRAL_AMERICA.index()].owner = Owner::Neutral;
        assert!(!is_reachable(&state, ALASKA, BRAZIL, &alice));
    }

    #[test]
    fn test_cannot_fortify_into_enemy() {
        let state = americas_state(MovementType::PathMulti);
        let alice = PlayerId::from("alice");
        assert_eq!(
            check_route(&state, ALASKA, KAMCHATKA, &alice),
            Err(RuleViolation::NotOwner(KAMCHATKA))
        );
    }

    #[test]
    fn test_single_move_regimes_cap_phase() {
        for movement in [MovementType::ClassicAdjacent, MovementType::PathSingle] {
            let mut state = americas_state(movement);
            let alice = PlayerId::from("alice");
            state.moved_this_phase.insert(ALASKA);
            assert_eq!(
                check_route(&state, ONTARIO, QUEBEC, &alice),
                Err(RuleViolation::MoveAllowanceExhausted(ONTARIO))
            );
        }
    }

    #[test]
    fn test_multi_move_regimes_cap_per_territory() {
        for movement in [MovementType::AdjacentMulti, MovementType::PathMulti] {
            let mut state = americas_state(movement);
            let alice = PlayerId::from("alice");
            state.moved_this_phase.insert(ALASKA);
            assert!(check_route(&state, ONTARIO, QUEBEC, &alice).is_ok());
            assert_eq!(
                check_route(&state, ALASKA, ALBERTA, &alice),
                Err(RuleViolation::MoveAllowanceExhausted(ALASKA))
            );
        }
    }

    #[test]
    fn test_valid_destinations() {
        let state = americas_state(MovementType::ClassicAdjacent);
        let alice = PlayerId::from("alice");
        let mut dests = valid_destinations(&state, ALASKA, &alice);
        dests.sort();
        // Kamchatka belongs to bob
        assert_eq!(dests, vec![NORTHWEST_TERRITORY, ALBERTA]);

        let state = americas_state(MovementType::PathSingle);
        assert_eq!(valid_destinations(&state, ALASKA, &alice).len(), 12);
    }

    #[test]
    fn test_same_alliance_is_identity() {
        let mut state = americas_state(MovementType::ClassicAdjacent);
        state.config.team_play = true;
        assert!(same_alliance(&state, &"alice".into(), &"alice".into()));
        assert!(!same_alliance(&state, &"alice".into(), &"bob".into()));
    }
}
