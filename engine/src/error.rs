// ═══════════════════════════════════════════════════════════════════════
// Errors — rule violations vs. programmer errors
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{Phase, PlayerId, TerritoryId};
use thiserror::Error;

/// Why a well-formed action is not legal in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("action is for room {actual}, this game is room {expected}")]
    WrongRoom { expected: String, actual: String },

    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },

    #[error("{action} is not allowed during the {phase} phase")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("the game is over")]
    GameFinished,

    #[error("territory {0} is not owned by the acting player")]
    NotOwner(TerritoryId),

    #[error("cannot attack own territory {0}")]
    OwnTerritory(TerritoryId),

    #[error("army amount must be positive")]
    NonPositiveAmount,

    #[error("territory {territory} has {available} armies, needs more than {required}")]
    InsufficientArmies { territory: TerritoryId, available: u32, required: u32 },

    #[error("deploying {requested} armies exceeds the pool of {pool}")]
    ExceedsPool { requested: u32, pool: u32 },

    #[error("{from} and {to} are not adjacent")]
    NotAdjacent { from: TerritoryId, to: TerritoryId },

    #[error("no owned path from {from} to {to}")]
    Unreachable { from: TerritoryId, to: TerritoryId },

    #[error("source and destination are the same territory")]
    SameTerritory,

    #[error("no fortify moves left for {0} this phase")]
    MoveAllowanceExhausted(TerritoryId),

    #[error("cannot return to reinforcement after attacking")]
    AlreadyAttacked,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown territory {0}")]
    UnknownTerritory(TerritoryId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("malformed action: {0}")]
    MalformedAction(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("illegal action: {0}")]
    Rejected(#[from] RuleViolation),
}

impl GameError {
    /// True for ordinary rule violations, false for bad references or input.
    pub fn is_rejection(&self) -> bool {
        matches!(self, GameError::Rejected(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
