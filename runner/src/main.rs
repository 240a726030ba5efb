// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for running games and tournaments
// ═══════════════════════════════════════════════════════════════════════

use clap::{Parser, Subcommand};
use conquest_agents::{Agent, HeuristicAgent, RandomAgent};
use conquest_engine::movement;
use conquest_engine::{GameConfig, GameError, MovementType, PlayerId};
use conquest_tournament::{run_game, run_series, Database, TournamentError};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn,conquest_tournament=info";

#[derive(Parser)]
#[command(name = "conquest-runner", about = "Territory conquest simulation lab")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Board rules shared by every subcommand that plays games.
#[derive(clap::Args, Clone)]
struct RulesArgs {
    /// TOML file with a full game configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Movement type: classic_adjacent, adjacent_multi, path_single, path_multi
    #[arg(short, long)]
    movement: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single game
    Play {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 3)]
        players: usize,
        /// Agent type: "random", "heuristic", or "mixed"
        #[arg(short, long, default_value = "heuristic")]
        agent: String,
        #[arg(long, default_value_t = 50_000)]
        max_decisions: usize,
        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        rules: RulesArgs,
    },
    /// Run a tournament of N games in parallel
    Tournament {
        #[arg(short, long, default_value_t = 100)]
        games: u32,
        #[arg(short, long, default_value_t = 3)]
        players: usize,
        #[arg(short, long, default_value = "results.db")]
        db: String,
        /// Agent type: "random", "heuristic", or "mixed" (alternating seats)
        #[arg(short, long, default_value = "mixed")]
        agent: String,
        #[arg(long, default_value_t = 50_000)]
        max_decisions: usize,
        #[command(flatten)]
        rules: RulesArgs,
    },
    /// Show leaderboard from database
    Leaderboard {
        #[arg(short, long, default_value = "results.db")]
        db: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { seed, players, agent, max_decisions, json, rules } => {
            cmd_play(seed, players, &agent, max_decisions, json, &rules)
        }
        Commands::Tournament { games, players, db, agent, max_decisions, rules } => {
            cmd_tournament(games, players, &db, &agent, max_decisions, &rules)
        }
        Commands::Leaderboard { db } => cmd_leaderboard(&db),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_rules(rules: &RulesArgs) -> Result<GameConfig, GameError> {
    let mut config = match &rules.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    if let Some(name) = &rules.movement {
        config.movement_type = MovementType::parse(name)
            .ok_or_else(|| GameError::Config(format!("unknown movement type '{}'", name)))?;
    }
    Ok(config)
}

fn cmd_play(
    seed: u64,
    player_count: usize,
    agent_type: &str,
    max_decisions: usize,
    json: bool,
    rules: &RulesArgs,
) -> Result<(), TournamentError> {
    let config = load_rules(rules)?;
    let movement_type = config.movement_type;
    let mut agents = make_agents(seed, player_count, agent_type);
    let result = run_game(&mut agents, seed, config, max_decisions)?;

    if json {
        println!("{}", result.to_json()?);
        return Ok(());
    }

    println!("=== Conquest ===\n");
    println!("seed={}, players={}, agent={}", seed, player_count, agent_type);
    println!("movement: {}\n", movement::describe(movement_type));
    println!("Game finished!");
    println!("  Winner: {}", result.winner.as_ref().map_or("nobody", |w| w.as_str()));
    println!("  Turns played: {}", result.turns);
    println!("  Decisions: {}", result.decisions);
    println!();
    println!("  Final standings:");
    for pr in &result.player_results {
        println!("    {:6} {:10} -- territories: {:>2}, armies: {:>4}{}",
            pr.player.as_str(),
            pr.agent_name,
            pr.final_territories,
            pr.final_armies,
            if pr.eliminated { "  (eliminated)" } else { "" },
        );
    }
    Ok(())
}

fn cmd_tournament(
    num_games: u32,
    player_count: usize,
    db_path: &str,
    agent_type: &str,
    max_decisions: usize,
    rules: &RulesArgs,
) -> Result<(), TournamentError> {
    println!("=== Tournament: {} games, {} players, agent={} ===\n", num_games, player_count, agent_type);

    let config = load_rules(rules)?;
    let db = Database::new(db_path)?;

    let seeds: Vec<u64> = (0..num_games).map(|g| 42 + g as u64 * 1000).collect();
    info!(games = num_games, players = player_count, movement = ?config.movement_type, db = db_path, "tournament started");
    let results = run_series(&seeds, &config, max_decisions, |seed| {
        make_agents(seed, player_count, agent_type)
    });

    let mut wins: BTreeMap<String, u32> = BTreeMap::new();
    let mut errors = 0u32;
    for (seed, outcome) in results {
        match outcome {
            Ok(result) => {
                let winner = result.winner_agent.clone().unwrap_or_else(|| "(no winner)".to_string());
                *wins.entry(winner).or_insert(0) += 1;
                db.record_game(&result)?;
            }
            Err(e) => {
                errors += 1;
                eprintln!("Game seed={}: ERROR -- {}", seed, e);
            }
        }
    }

    println!("--- Summary ({} games, {} errors) ---", num_games, errors);
    for (name, w) in &wins {
        let pct = if num_games > 0 { *w as f64 / num_games as f64 * 100.0 } else { 0.0 };
        println!("  {:12}: {:>4} wins ({:.1}%)", name, w, pct);
    }
    println!("\nResults saved to: {}", db_path);
    println!("Total games in DB: {}", db.game_count()?);
    Ok(())
}

fn cmd_leaderboard(db_path: &str) -> Result<(), TournamentError> {
    let db = Database::new(db_path)?;
    let board = db.leaderboard()?;
    if board.is_empty() {
        println!("No agents found. Run some tournaments first.");
        return Ok(());
    }
    println!("=== Leaderboard ===\n");
    println!("{:<20} {:>8} {:>8} {:>8}", "Agent", "ELO", "Games", "Wins");
    println!("{}", "-".repeat(48));
    for (name, elo, games, wins_count) in &board {
        println!("{:<20} {:>8.1} {:>8} {:>8}", name, elo, games, wins_count);
    }
    Ok(())
}

fn make_agents(seed: u64, player_count: usize, agent_type: &str) -> Vec<Box<dyn Agent>> {
    (0..player_count)
        .map(|i| {
            let player = PlayerId::new(format!("p{}", i + 1));
            let agent_seed = seed + i as u64;
            let agent: Box<dyn Agent> = match agent_type {
                "heuristic" => Box::new(HeuristicAgent::new(player, agent_seed)),
                "mixed" => {
                    if i % 2 == 0 {
                        Box::new(HeuristicAgent::new(player, agent_seed))
                    } else {
                        Box::new(RandomAgent::new(player, agent_seed))
                    }
                }
                _ => Box::new(RandomAgent::new(player, agent_seed)),
            };
            agent
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_agents_mixed_alternates() {
        let agents = make_agents(1, 4, "mixed");
        let names: Vec<&str> = agents.iter().map(|a| a.name()).collect();
        assert_eq!(names, ["Heuristic", "Random", "Heuristic", "Random"]);
        assert_eq!(agents[3].player().as_str(), "p4");
    }

    #[test]
    fn test_movement_flag_overrides_default() {
        let rules = RulesArgs { config: None, movement: Some("path_single".into()) };
        assert_eq!(load_rules(&rules).unwrap().movement_type, MovementType::PathSingle);

        let rules = RulesArgs { config: None, movement: Some("teleport".into()) };
        assert!(matches!(load_rules(&rules), Err(GameError::Config(_))));
    }
}
