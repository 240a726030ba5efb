// ═══════════════════════════════════════════════════════════════════════
// Core types — territories, players, phases, actions, game state
// ═══════════════════════════════════════════════════════════════════════

use crate::config::GameConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ── Identifiers ────────────────────────────────────────────────────────

/// Compact, copyable territory identifier. Index into the static TERRITORIES array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct TerritoryId(pub u8);

impl TerritoryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Player identifier as handed over by the calling service (user id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

// ── Enums ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Continent {
    NorthAmerica,
    SouthAmerica,
    Europe,
    Africa,
    Asia,
    Australia,
}

impl Continent {
    pub const ALL: [Continent; 6] = [
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Europe,
        Continent::Africa,
        Continent::Asia,
        Continent::Australia,
    ];

    /// Bonus armies on the classic map.
    pub fn classic_bonus(self) -> u32 {
        match self {
            Continent::NorthAmerica => 5,
            Continent::SouthAmerica => 2,
            Continent::Europe => 5,
            Continent::Africa => 3,
            Continent::Asia => 7,
            Continent::Australia => 2,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Continent::NorthAmerica => "north-america",
            Continent::SouthAmerica => "south-america",
            Continent::Europe => "europe",
            Continent::Africa => "africa",
            Continent::Asia => "asia",
            Continent::Australia => "australia",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Reinforcement,
    Attack,
    Fortify,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Reinforcement => write!(f, "reinforcement"),
            Phase::Attack => write!(f, "attack"),
            Phase::Fortify => write!(f, "fortify"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// Who holds a territory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    #[default]
    Unset,
    Neutral,
    Player(PlayerId),
}

impl Owner {
    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            Owner::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn is(&self, player: &PlayerId) -> bool {
        matches!(self, Owner::Player(p) if p == player)
    }
}

// ── Territory ──────────────────────────────────────────────────────────

/// Dynamic per-territory state. Seeded from the catalog, one copy per game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub key: String,
    pub name: String,
    pub continent: Continent,
    pub owner: Owner,
    pub armies: u32,
    pub adjacent: Vec<TerritoryId>,
}

impl Territory {
    pub fn is_adjacent(&self, other: TerritoryId) -> bool {
        self.adjacent.contains(&other)
    }
}

// ── Player ─────────────────────────────────────────────────────────────

pub const PLAYER_COLORS: [&str; 8] = [
    "#e53935", "#1e88e5", "#43a047", "#fdd835", "#8e24aa", "#fb8c00", "#00acc1", "#6d4c41",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub label: String,
    pub color: String,
    /// Unplaced reinforcement armies.
    pub pool: u32,
    /// Kept in sync with `Territory::owner`.
    pub territories: BTreeSet<TerritoryId>,
    pub eliminated: bool,
}

impl Player {
    pub fn territory_count(&self) -> usize {
        self.territories.len()
    }
}

// ── Actions ────────────────────────────────────────────────────────────

/// What a player wants to do, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    Deploy {
        #[serde(rename = "territoryId")]
        territory: TerritoryId,
        armies: u32,
    },
    Attack {
        #[serde(rename = "fromTerritoryId")]
        from: TerritoryId,
        #[serde(rename = "toTerritoryId")]
        to: TerritoryId,
        #[serde(default)]
        armies: Option<u32>,
    },
    Fortify {
        #[serde(rename = "fromTerritoryId")]
        from: TerritoryId,
        #[serde(rename = "toTerritoryId")]
        to: TerritoryId,
        armies: u32,
    },
    EndTurn,
    BeginTurn,
    GoBackToReinforcement,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Deploy { .. } => "deploy",
            ActionKind::Attack { .. } => "attack",
            ActionKind::Fortify { .. } => "fortify",
            ActionKind::EndTurn => "end_turn",
            ActionKind::BeginTurn => "begin_turn",
            ActionKind::GoBackToReinforcement => "go_back_to_reinforcement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "roomId")]
    pub room_id: String,
    #[serde(rename = "playerId")]
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub kind: ActionKind,
}

impl Action {
    pub fn new(room_id: impl Into<String>, player_id: PlayerId, kind: ActionKind) -> Self {
        Action { room_id: room_id.into(), player_id, kind }
    }
}

// ── Battle Result ──────────────────────────────────────────────────────

/// Outcome of a single attack. Also kept on the state until the turn advances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub attacker: PlayerId,
    pub defender: Owner,
    pub attacker_rolls: Vec<u8>,
    pub defender_rolls: Vec<u8>,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    pub conquered: bool,
    /// Player knocked out by this attack, if any.
    pub eliminated: Option<PlayerId>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

// ── Game State ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub room_id: String,
    pub phase: Phase,
    pub current_player: PlayerId,
    /// Completed rounds through all active players, starting at 1.
    pub turn: u32,
    /// Indexed by TerritoryId.
    pub territories: Vec<Territory>,
    /// In turn order.
    pub players: Vec<Player>,
    /// Territories that have already been the source of a fortify move this phase.
    pub moved_this_phase: BTreeSet<TerritoryId>,
    pub has_attacked_this_turn: bool,
    pub last_battle: Option<BattleResult>,
    pub config: GameConfig,
    pub winner: Option<PlayerId>,
}

impl GameState {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id.index())
    }

    pub fn territory_mut(&mut self, id: TerritoryId) -> Option<&mut Territory> {
        self.territories.get_mut(id.index())
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.eliminated)
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Territories owned by a player, in catalog order.
    pub fn owned_by<'a>(&'a self, player: &'a PlayerId) -> impl Iterator<Item = &'a Territory> + 'a {
        self.territories.iter().filter(move |t| t.owner.is(player))
    }
}
