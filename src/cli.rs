//! Command-line interface for strictly_tictactoe_json.

use clap::{Parser, Subcommand};
use strictly_tictactoe_json::StoreBackend;

/// Strictly Tic-Tac-Toe - play, save and load games
#[derive(Parser, Debug)]
#[command(name = "strictly_tictactoe_json")]
#[command(about = "Tic-tac-toe with JSON save games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it does not exist)
    #[arg(long, global = true, default_value = "tictactoe.toml")]
    pub config: std::path::PathBuf,

    /// Override the configured backing store
    #[arg(long, global = true, value_enum)]
    pub backend: Option<StoreBackend>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a sequence of moves and print the result
    Play {
        /// Moves as space-separated "row,col" pairs, e.g. "0,0 1,1 0,1"
        #[arg(short, long)]
        moves: String,

        /// Save the resulting game
        #[arg(long)]
        save: bool,

        /// Mark the game as single-player
        #[arg(long)]
        single_player: bool,

        /// Computer difficulty recorded with the game
        #[arg(long, default_value = "0")]
        difficulty: i32,
    },

    /// List saved games, most recent first
    List,

    /// Load a saved game and print it
    Show {
        /// Save key, as printed by `list`
        key: String,
    },
}
