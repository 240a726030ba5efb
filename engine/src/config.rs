// ═══════════════════════════════════════════════════════════════════════
// Game configuration — movement regime, team play, continent bonuses
// ═══════════════════════════════════════════════════════════════════════

use crate::error::{GameError, Result};
use crate::map;
use crate::types::TerritoryId;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rules for which fortify moves are legal and how many per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Adjacent only, one move per phase.
    #[default]
    ClassicAdjacent,
    /// Adjacent only, each territory may move once.
    AdjacentMulti,
    /// Any owned path, one move per phase.
    PathSingle,
    /// Any owned path, each territory may move once.
    PathMulti,
}

impl MovementType {
    pub const ALL: [MovementType; 4] = [
        MovementType::ClassicAdjacent,
        MovementType::AdjacentMulti,
        MovementType::PathSingle,
        MovementType::PathMulti,
    ];

    pub fn uses_paths(self) -> bool {
        matches!(self, MovementType::PathSingle | MovementType::PathMulti)
    }

    /// One move total per phase, rather than one per source territory.
    pub fn single_move(self) -> bool {
        matches!(self, MovementType::ClassicAdjacent | MovementType::PathSingle)
    }

    pub fn parse(s: &str) -> Option<MovementType> {
        match s {
            "classic_adjacent" => Some(MovementType::ClassicAdjacent),
            "adjacent_multi" => Some(MovementType::AdjacentMulti),
            "path_single" => Some(MovementType::PathSingle),
            "path_multi" => Some(MovementType::PathMulti),
            _ => None,
        }
    }
}

/// A custom continent: owning every listed territory grants the bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinentBonus {
    #[serde(default)]
    pub name: Option<String>,
    pub territories: Vec<TerritoryId>,
    #[serde(rename = "bonusArmies", alias = "bonus_armies")]
    pub bonus_armies: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub movement_type: MovementType,
    /// Reserved; alliances are identity-only for now.
    pub team_play: bool,
    /// Overrides the classic continent table when present.
    pub continent_bonuses: Option<Vec<ContinentBonus>>,
}

impl GameConfig {
    pub fn with_movement(movement_type: MovementType) -> Self {
        GameConfig { movement_type, ..GameConfig::default() }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: GameConfig =
            toml::from_str(s).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Reject empty bonus groups and references outside the catalog.
    pub fn validate(&self) -> Result<()> {
        if let Some(bonuses) = &self.continent_bonuses {
            for bonus in bonuses {
                if bonus.territories.is_empty() {
                    return Err(GameError::Config(format!(
                        "continent bonus {} lists no territories",
                        bonus.name.as_deref().unwrap_or("<unnamed>")
                    )));
                }
                if let Some(bad) = bonus.territories.iter().find(|t| t.index() >= map::NUM_TERRITORIES) {
                    return Err(GameError::UnknownTerritory(*bad));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.movement_type, MovementType::ClassicAdjacent);
        assert!(!config.team_play);
        assert!(config.continent_bonuses.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let config = GameConfig::from_toml_str(
            r#"
            movement_type = "path_multi"
            team_play = false

            [[continent_bonuses]]
            name = "antipodes"
            territories = [38, 39]
            bonusArmies = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.movement_type, MovementType::PathMulti);
        let bonuses = config.continent_bonuses.unwrap();
        assert_eq!(bonuses.len(), 1);
        assert_eq!(bonuses[0].bonus_armies, 4);
        assert_eq!(bonuses[0].territories, vec![TerritoryId(38), TerritoryId(39)]);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str("team_play = true").unwrap();
        assert_eq!(config.movement_type, MovementType::ClassicAdjacent);
        assert!(config.team_play);
    }

    #[test]
    fn test_rejects_unknown_movement_type() {
        let err = GameConfig::from_toml_str(r#"movement_type = "teleport""#).unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_bonus_territory() {
        let err = GameConfig::from_toml_str(
            r#"
            [[continent_bonuses]]
            territories = [200]
            bonusArmies = 1
            "#,
        )
        .unwrap_err();
        assert_eq!(err, GameError::UnknownTerritory(TerritoryId(200)));
    }

    #[test]
    fn test_rejects_empty_bonus() {
        let err = GameConfig::from_toml_str(
            r#"
            [[continent_bonuses]]
            territories = []
            bonusArmies = 1
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_movement_type_parse() {
        for mt in MovementType::ALL {
            let json = serde_json::to_string(&mt).unwrap();
            assert_eq!(MovementType::parse(json.trim_matches('"')), Some(mt));
        }
        assert_eq!(MovementType::parse("nope"), None);
    }
}
