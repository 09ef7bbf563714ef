//! Togyz Qumalaq - Unified CLI
//!
//! Plays full games against the language-model opponent, or answers
//! one-off move requests for a serialized position.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rand::Rng;
use std::io::Read;
use std::path::PathBuf;
use togyz_qumalaq::{GameState, Move, MoveProvider, Player, ProviderConfig};
use tracing::{debug, instrument, warn};
use tracing_subscriber::EnvFilter;

/// Bail-out bound for self-play loops; positions can in principle cycle.
const MAX_PLIES: u32 = 10_000;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { games, config } => run_play(games, config).await,
        Command::Suggest { state, config } => run_suggest(state, config).await,
    }
}

/// Plays `games` full games and prints one result line per game.
#[instrument(skip(config))]
async fn run_play(games: u32, config: Option<PathBuf>) -> Result<()> {
    let provider = MoveProvider::new(&load_config(config)?);
    let mut wins = [0u32; 2];
    let mut draws = 0u32;

    for game in 1..=games {
        let mut state = GameState::new();
        let mut plies = 0u32;

        while !state.is_game_over() && plies < MAX_PLIES {
            let mv = match state.current_player() {
                // Player one stands in for a human with a random choice.
                Player::One => random_legal_move(&state),
                Player::Two => match provider.select_move(&state).await {
                    Some(mv) => mv,
                    None => break,
                },
            };
            debug!(game, player = ?state.current_player(), pit = mv.pit().get(), "Applying move");
            state = state.apply_move(mv);
            plies += 1;
        }

        if !state.is_game_over() {
            warn!(game, plies, "Game stopped before finishing");
            println!("game {game}: unfinished after {plies} plies");
            continue;
        }

        let outcome = match state.winner() {
            Some(player) => {
                wins[player.index()] += 1;
                format!("player {} wins", player.number())
            }
            None => {
                draws += 1;
                "draw".to_string()
            }
        };
        println!(
            "game {game}: {outcome} after {plies} plies (kazan {} - {})",
            state.kazan(Player::One),
            state.kazan(Player::Two),
        );
    }

    if games > 1 {
        println!(
            "total: player 1 wins {}, player 2 wins {}, draws {}",
            wins[0], wins[1], draws
        );
    }
    Ok(())
}

/// Reads a position (JSON) from a file or stdin and prints the
/// provider's move for player two, or `null` when it has none.
#[instrument(skip(state_path, config))]
async fn run_suggest(state_path: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let raw = match state_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let state: GameState = serde_json::from_str(&raw)?;

    let provider = MoveProvider::new(&load_config(config)?);
    let output = match provider.select_move(&state).await {
        Some(mv) => serde_json::json!({ "move": [mv.player().index(), mv.pit().get()] }),
        None => serde_json::Value::Null,
    };
    println!("{output}");
    Ok(())
}

/// Loads the provider configuration, defaulting when no file is given.
fn load_config(path: Option<PathBuf>) -> Result<ProviderConfig> {
    match path {
        Some(path) => Ok(ProviderConfig::from_file(path)?),
        None => Ok(ProviderConfig::default()),
    }
}

/// Uniform random choice for the player to move.
fn random_legal_move(state: &GameState) -> Move {
    let legal = state.legal_moves();
    legal[rand::thread_rng().gen_range(0..legal.len())]
}
