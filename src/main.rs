//! Strictly Tic-Tac-Toe - Unified CLI
//!
//! Plays games from the command line and manages saved games.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use strictly_tictactoe_json::{
    FileStore, GameEngine, GameStatus, Position, SaveConfig, SaveRepository, SnapshotStore,
    SqliteStore, StoreBackend,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SaveConfig::load_or_default(&cli.config)?;
    if let Some(backend) = cli.backend {
        config = config.with_backend(backend);
    }
    debug!(?config, "Using save config");

    let store = open_store(&config)?;
    let mut repo = SaveRepository::new(store);

    match cli.command {
        Command::Play {
            moves,
            save,
            single_player,
            difficulty,
        } => run_play(&mut repo, &moves, save, single_player, difficulty),
        Command::List => run_list(&repo),
        Command::Show { key } => run_show(&repo, &key),
    }
}

/// Opens the configured backing store.
#[instrument(skip(config), fields(backend = ?config.backend()))]
fn open_store(config: &SaveConfig) -> Result<Box<dyn SnapshotStore>> {
    let store: Box<dyn SnapshotStore> = match config.backend() {
        StoreBackend::Files => {
            let store = FileStore::new(config.save_dir());
            info!(dir = %store.dir().display(), "File store ready");
            Box::new(store)
        }
        StoreBackend::Sqlite => {
            let store = SqliteStore::open(config.db_path().clone())?;
            info!(db_path = %store.db_path(), "SQLite store ready");
            Box::new(store)
        }
    };
    Ok(store)
}

/// Parses "row,col" pairs.
fn parse_moves(moves: &str) -> Result<Vec<Position>> {
    moves
        .split_whitespace()
        .map(|m| {
            Position::parse_row_col(m)
                .with_context(|| format!("Invalid move '{}', expected row,col in 0..3", m))
        })
        .collect()
}

fn print_engine(engine: &GameEngine) {
    println!("{}", engine.board().display());
    println!();
    match engine.status() {
        GameStatus::InProgress => println!("Turn: {}", engine.current_turn()),
        GameStatus::Won(player) => {
            let line = engine
                .winning_line()
                .map(|l| l.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            println!("Player {} wins: {}", player, line);
        }
        GameStatus::Draw => println!("Draw"),
    }
    println!("Score: X = {} | O = {}", engine.score_x(), engine.score_o());
}

/// Plays the given moves, optionally saving the result.
#[instrument(skip(repo))]
fn run_play<S: SnapshotStore>(
    repo: &mut SaveRepository<S>,
    moves: &str,
    save: bool,
    single_player: bool,
    difficulty: i32,
) -> Result<()> {
    let mut engine = GameEngine::new();
    engine.set_single_player_mode(single_player);
    engine.set_computer_difficulty(difficulty);

    for pos in parse_moves(moves)? {
        let outcome = engine.mark(pos);
        debug!(?pos, ?outcome, "Move applied");
    }
    print_engine(&engine);

    if save {
        let key = repo.save(engine.snapshot())?;
        println!("Saved as {}", key);
    }
    Ok(())
}

/// Prints every saved game.
#[instrument(skip(repo))]
fn run_list<S: SnapshotStore>(repo: &SaveRepository<S>) -> Result<()> {
    let summaries = repo.list()?;
    if summaries.is_empty() {
        println!("No saved games");
        return Ok(());
    }
    for summary in summaries {
        println!(
            "{}  {}  {}",
            summary.identifier(),
            summary.date(),
            summary.description()
        );
    }
    Ok(())
}

/// Loads and prints one saved game.
#[instrument(skip(repo))]
fn run_show<S: SnapshotStore>(repo: &SaveRepository<S>, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        bail!("Save key must not be empty");
    }
    let snapshot = repo.load(key)?;
    let engine = GameEngine::from_snapshot(snapshot);
    print_engine(&engine);
    Ok(())
}
