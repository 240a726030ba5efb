use conquest_engine::{GameError, PlayerId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("engine error: {0}")]
    Engine(#[from] GameError),

    #[error("no agent seated for player {0}")]
    MissingAgent(PlayerId),

    #[error("could not encode result: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("game exceeded {max} decisions without finishing (turn {turn})")]
    DecisionLimit { max: usize, turn: u32 },
}

pub type Result<T> = std::result::Result<T, TournamentError>;
