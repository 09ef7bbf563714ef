//! Command-line interface for togyz_qumalaq.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Togyz Qumalaq - rules engine with a language-model opponent
#[derive(Parser, Debug)]
#[command(name = "togyz_qumalaq")]
#[command(about = "Togyz Qumalaq rules engine and opponent move provider", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play full games: player one moves at random, player two through the provider
    Play {
        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Path to a provider configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Read a game state (JSON) and print the provider's move for player two
    Suggest {
        /// Path to the state file; reads stdin when omitted
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Path to a provider configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
