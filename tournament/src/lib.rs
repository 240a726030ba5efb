pub mod error;
pub mod runner;
pub mod database;

pub use error::TournamentError;
pub use runner::{run_game, run_series, GameResult, PlayerResult};
pub use database::Database;
