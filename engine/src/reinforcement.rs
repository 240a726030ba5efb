// ═══════════════════════════════════════════════════════════════════════
// Reinforcement — armies granted at the start of a turn
// ═══════════════════════════════════════════════════════════════════════

use crate::config::ContinentBonus;
use crate::types::*;

pub const MIN_REINFORCEMENT: u32 = 3;

/// Base armies from territory count alone.
pub fn territory_armies(territory_count: u32) -> u32 {
    let mut armies = (territory_count / 3).max(MIN_REINFORCEMENT);
    if territory_count > 12 {
        armies += (territory_count - 12) / 3;
    }
    armies
}

/// Does `player` own every territory of a classic continent?
pub fn controls_continent(state: &GameState, player: &PlayerId, continent: Continent) -> bool {
    let mut members = state.territories.iter().filter(|t| t.continent == continent).peekable();
    members.peek().is_some() && members.all(|t| t.owner.is(player))
}

fn controls_group(state: &GameState, player: &PlayerId, bonus: &ContinentBonus) -> bool {
    !bonus.territories.is_empty()
        && bonus.territories.iter()
            .all(|&id| state.territory(id).is_some_and(|t| t.owner.is(player)))
}

/// Continent bonus from the game's custom table, or the classic one.
pub fn continent_bonus(state: &GameState, player: &PlayerId) -> u32 {
    match &state.config.continent_bonuses {
        Some(table) => table.iter()
            .filter(|b| controls_group(state, player, b))
            .map(|b| b.bonus_armies)
            .sum(),
        None => Continent::ALL.iter()
            .filter(|&&c| controls_continent(state, player, c))
            .map(|c| c.classic_bonus())
            .sum(),
    }
}

/// Total armies `player` receives at the start of their turn.
pub fn calculate_reinforcement_armies(state: &GameState, player: &PlayerId) -> u32 {
    let territory_count = state.territories.iter().filter(|t| t.owner.is(player)).count() as u32;
    territory_armies(territory_count) + continent_bonus(state, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::map::{self, *};

    fn state_with_owned(owned: &[TerritoryId], config: GameConfig) -> GameState {
        let alice = PlayerId::from("alice");
        let mut territories = map::catalog();
        for t in &mut territories {
            t.owner = if owned.contains(&t.id) { Owner::Player(alice.clone()) } else { Owner::Neutral };
            t.armies = 1;
        }
        GameState {
            room_id: "r".into(),
            phase: Phase::Reinforcement,
            current_player: alice.clone(),
            turn: 1,
            territories,
            players: vec![Player {
                id: alice,
                label: "Player 1".into(),
                color: PLAYER_COLORS[0].into(),
                pool: 0,
                territories: owned.iter().copied().collect(),
                eliminated: false,
            }],
            moved_this_phase: Default::default(),
            has_attacked_this_turn: false,
            last_battle: None,
            config,
            winner: None,
        }
    }

    #[test]
    fn test_territory_formula() {
        assert_eq!(territory_armies(0), 3);
        assert_eq!(territory_armies(8), 3);
        assert_eq!(territory_armies(9), 3);
        assert_eq!(territory_armies(11), 3);
        assert_eq!(territory_armies(12), 4);
        // max(3, 4) + floor(1/3)
        assert_eq!(territory_armies(13), 4);
        assert_eq!(territory_armies(15), 6);
        assert_eq!(territory_armies(21), 10);
        assert_eq!(territory_armies(42), 24);
    }

    #[test]
    fn test_thirteen_territories_no_continent() {
        // Spread over continents so none is complete
        let owned: Vec<TerritoryId> = (0..42u8).step_by(3).take(13).map(TerritoryId).collect();
        let state = state_with_owned(&owned, GameConfig::default());
        assert_eq!(calculate_reinforcement_armies(&state, &"alice".into()), 4);
    }

    #[test]
    fn test_classic_continent_bonus() {
        let australia: Vec<TerritoryId> = continent_members(Continent::Australia).collect();
        let state = state_with_owned(&australia, GameConfig::default());
        let alice = PlayerId::from("alice");
        assert!(controls_continent(&state, &alice, Continent::Australia));
        assert!(!controls_continent(&state, &alice, Continent::Asia));
        assert_eq!(calculate_reinforcement_armies(&state, &alice), 3 + 2);
    }

    #[test]
    fn test_multiple_continents() {
        let mut owned: Vec<TerritoryId> = continent_members(Continent::NorthAmerica).collect();
        owned.extend(continent_members(Continent::SouthAmerica));
        let state = state_with_owned(&owned, GameConfig::default());
        // 13 territories -> 4, plus 5 + 2
        assert_eq!(calculate_reinforcement_armies(&state, &"alice".into()), 11);
    }

    #[test]
    fn test_custom_table_replaces_classic() {
        let australia: Vec<TerritoryId> = continent_members(Continent::Australia).collect();
        let config = GameConfig {
            continent_bonuses: Some(vec![
                ContinentBonus { name: None, territories: vec![INDONESIA, SIAM], bonus_armies: 4 },
                ContinentBonus { name: None, territories: vec![NEW_GUINEA], bonus_armies: 1 },
            ]),
            ..GameConfig::default()
        };
        let state = state_with_owned(&australia, config);
        // Siam is not owned; classic Australia bonus no longer applies
        assert_eq!(calculate_reinforcement_armies(&state, &"alice".into()), 3 + 1);
    }

    #[test]
    fn test_partial_continent_gives_nothing() {
        let mut europe: Vec<TerritoryId> = continent_members(Continent::Europe).collect();
        europe.pop();
        let state = state_with_owned(&europe, GameConfig::default());
        assert_eq!(continent_bonus(&state, &"alice".into()), 0);
    }
}
