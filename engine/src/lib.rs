pub mod types;
pub mod error;
pub mod config;
pub mod map;
pub mod combat;
pub mod movement;
pub mod reinforcement;
pub mod setup;
pub mod engine;
pub mod room;


pub use types::*;
pub use config::{ContinentBonus, GameConfig, MovementType};
pub use error::{GameError, RuleViolation};
pub use engine::{check_action, legal_actions, parse_action, process_action, validate_action, Outcome};
pub use room::GameRoom;
pub use setup::{initialize, initialize_with};
