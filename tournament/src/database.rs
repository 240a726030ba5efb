// ═══════════════════════════════════════════════════════════════════════
// Database — SQLite storage for tournament results and ELO ratings
// ═══════════════════════════════════════════════════════════════════════

use crate::error::Result;
use crate::runner::GameResult;
use rusqlite::{params, Connection};
use tracing::debug;

/// Starting rating for a newly registered agent.
pub const INITIAL_ELO: f64 = 1500.0;

/// K-factor used by `record_game`.
pub const DEFAULT_K: f64 = 32.0;

pub struct Database {
    conn: Connection,
}

/// One leaderboard row: name, rating, games played, games won.
pub type Standing = (String, f64, u32, u32);

impl Database {
    /// Open (or create) a database at the given path.
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Database { conn };
        db.create_schema()?;
        Ok(db)
    }

    /// In-memory database (useful for tests).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.create_schema()?;
        Ok(db)
    }

    fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch("
            CREATE TABLE IF NOT EXISTS agents (
                id          INTEGER PRIMARY KEY,
                name        TEXT NOT NULL UNIQUE,
                elo         REAL NOT NULL DEFAULT 1500.0,
                games       INTEGER NOT NULL DEFAULT 0,
                wins        INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS games (
                id          INTEGER PRIMARY KEY,
                seed        INTEGER NOT NULL,
                turns       INTEGER NOT NULL,
                decisions   INTEGER NOT NULL,
                winner      TEXT,
                played_at   TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS game_players (
                id          INTEGER PRIMARY KEY,
                game_id     INTEGER NOT NULL REFERENCES games(id),
                agent_id    INTEGER NOT NULL REFERENCES agents(id),
                player      TEXT NOT NULL,
                territories INTEGER NOT NULL,
                armies      INTEGER NOT NULL,
                eliminated  INTEGER NOT NULL
            );
        ")?;
        Ok(())
    }

    /// Register an agent (or return existing ID).
    pub fn register_agent(&self, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO agents (name) VALUES (?1)",
            params![name],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM agents WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Store a completed game and bump per-agent game and win counts.
    /// Agents are registered on first sight. Returns the game id.
    pub fn store_game(&self, result: &GameResult) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO games (seed, turns, decisions, winner) VALUES (?1, ?2, ?3, ?4)",
            params![
                result.seed as i64,
                result.turns as i64,
                result.decisions as i64,
                result.winner.as_ref().map(|w| w.as_str()),
            ],
        )?;
        let game_id = self.conn.last_insert_rowid();

        for pr in &result.player_results {
            let agent_id = self.register_agent(&pr.agent_name)?;
            self.conn.execute(
                "INSERT INTO game_players (game_id, agent_id, player, territories, armies, eliminated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    game_id,
                    agent_id,
                    pr.player.as_str(),
                    pr.final_territories as i64,
                    pr.final_armies as i64,
                    pr.eliminated,
                ],
            )?;

            let won = result.winner.as_ref() == Some(&pr.player);
            self.conn.execute(
                "UPDATE agents SET games = games + 1, wins = wins + ?1 WHERE id = ?2",
                params![if won { 1 } else { 0 }, agent_id],
            )?;
        }

        debug!(game_id, seed = result.seed, "stored game");
        Ok(game_id)
    }

    fn elo(&self, agent_id: i64) -> Result<f64> {
        let elo = self.conn.query_row(
            "SELECT elo FROM agents WHERE id = ?1",
            params![agent_id],
            |row| row.get(0),
        )?;
        Ok(elo)
    }

    /// Update ELO ratings for a set of agents after a game.
    /// Simple multiplayer ELO: winner is scored against each loser in turn.
    pub fn update_elo(&self, winner_id: i64, loser_ids: &[i64], k: f64) -> Result<()> {
        for &loser_id in loser_ids {
            let winner_elo = self.elo(winner_id)?;
            let loser_elo = self.elo(loser_id)?;

            let expected_winner = 1.0 / (1.0 + 10f64.powf((loser_elo - winner_elo) / 400.0));
            let expected_loser = 1.0 - expected_winner;

            let delta_w = k * (1.0 - expected_winner);
            let delta_l = k * (0.0 - expected_loser);

            self.conn.execute(
                "UPDATE agents SET elo = elo + ?1 WHERE id = ?2",
                params![delta_w, winner_id],
            )?;
            self.conn.execute(
                "UPDATE agents SET elo = elo + ?1 WHERE id = ?2",
                params![delta_l, loser_id],
            )?;
        }
        Ok(())
    }

    /// Store a game and, when it has a winner, rate the winning agent
    /// against every differently-named losing agent.
    pub fn record_game(&self, result: &GameResult) -> Result<i64> {
        let game_id = self.store_game(result)?;
        let Some(winner_name) = &result.winner_agent else {
            return Ok(game_id);
        };
        let winner_id = self.register_agent(winner_name)?;

        let mut loser_ids = Vec::new();
        for pr in &result.player_results {
            if Some(&pr.player) == result.winner.as_ref() || &pr.agent_name == winner_name {
                continue;
            }
            let id = self.register_agent(&pr.agent_name)?;
            if !loser_ids.contains(&id) {
                loser_ids.push(id);
            }
        }
        self.update_elo(winner_id, &loser_ids, DEFAULT_K)?;
        Ok(game_id)
    }

    /// Get ELO leaderboard.
    pub fn leaderboard(&self) -> Result<Vec<Standing>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, elo, games, wins FROM agents ORDER BY elo DESC, name ASC"
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, u32>(3)?,
            ))
        })?;
        let board = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(board)
    }

    /// Get total number of games stored.
    pub fn game_count(&self) -> Result<u32> {
        let count = self.conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::PlayerResult;
    use conquest_engine::PlayerId;

    fn finished(seed: u64, winner: &str, seats: &[(&str, &str)]) -> GameResult {
        GameResult {
            seed,
            winner: Some(PlayerId::from(winner)),
            winner_agent: seats.iter().find(|(p, _)| *p == winner).map(|(_, a)| a.to_string()),
            turns: 12,
            decisions: 300,
            player_results: seats.iter()
                .map(|(player, agent)| PlayerResult {
                    player: PlayerId::from(*player),
                    agent_name: agent.to_string(),
                    final_territories: if *player == winner { 20 } else { 0 },
                    final_armies: if *player == winner { 45 } else { 0 },
                    eliminated: *player != winner,
                })
                .collect(),
        }
    }

    #[test]
    fn test_register_agent_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let a = db.register_agent("Heuristic").unwrap();
        let b = db.register_agent("Heuristic").unwrap();
        let c = db.register_agent("Random").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_store_game_counts_games_and_wins() {
        let db = Database::in_memory().unwrap();
        db.store_game(&finished(1, "p1", &[("p1", "Heuristic"), ("p2", "Random")])).unwrap();
        db.store_game(&finished(2, "p2", &[("p1", "Heuristic"), ("p2", "Random")])).unwrap();
        db.store_game(&finished(3, "p1", &[("p1", "Heuristic"), ("p2", "Random")])).unwrap();
        assert_eq!(db.game_count().unwrap(), 3);

        let board = db.leaderboard().unwrap();
        let heuristic = board.iter().find(|r| r.0 == "Heuristic").unwrap();
        let random = board.iter().find(|r| r.0 == "Random").unwrap();
        assert_eq!((heuristic.2, heuristic.3), (3, 2));
        assert_eq!((random.2, random.3), (3, 1));
        // store_game alone leaves ratings untouched
        assert_eq!(heuristic.1, INITIAL_ELO);
    }

    #[test]
    fn test_draw_is_stored_without_winner() {
        let db = Database::in_memory().unwrap();
        let mut result = finished(9, "p1", &[("p1", "Random")]);
        result.winner = None;
        result.winner_agent = None;
        db.record_game(&result).unwrap();
        assert_eq!(db.game_count().unwrap(), 1);
        assert_eq!(db.leaderboard().unwrap()[0].1, INITIAL_ELO);
    }

    #[test]
    fn test_update_elo_is_zero_sum_for_equal_ratings() {
        let db = Database::in_memory().unwrap();
        let w = db.register_agent("W").unwrap();
        let l = db.register_agent("L").unwrap();
        db.update_elo(w, &[l], 32.0).unwrap();
        let board = db.leaderboard().unwrap();
        assert_eq!(board[0].0, "W");
        assert!((board[0].1 - 1516.0).abs() < 1e-9);
        assert!((board[1].1 - 1484.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_game_rates_agents() {
        let db = Database::in_memory().unwrap();
        for seed in 0..5 {
            db.record_game(&finished(seed, "a", &[("a", "Heuristic"), ("b", "Random"), ("c", "Random")]))
                .unwrap();
        }
        let board = db.leaderboard().unwrap();
        assert_eq!(board[0].0, "Heuristic");
        assert!(board[0].1 > INITIAL_ELO);
        assert!(board[1].1 < INITIAL_ELO);
    }

    #[test]
    fn test_mirror_match_keeps_rating() {
        let db = Database::in_memory().unwrap();
        db.record_game(&finished(1, "a", &[("a", "Random"), ("b", "Random")])).unwrap();
        assert_eq!(db.leaderboard().unwrap()[0].1, INITIAL_ELO);
    }
}
