//! Togyz Qumalaq library - rules engine with a language-model opponent
//!
//! Togyz Qumalaq (Nine Kumalaks) is a two-player mancala game played on
//! two rows of nine pits. This library provides the full rules engine
//! plus a move provider that lets an LLM play player two, with a random
//! fallback so play never stalls.
//!
//! # Architecture
//!
//! - **Game**: immutable rules engine; [`GameState::apply_move`] returns
//!   a new state and never fails
//! - **Provider**: move selection for player two via LLM APIs (OpenAI,
//!   Anthropic) with uniform random fallback
//! - **Config**: TOML provider configuration with environment-based
//!   API keys
//!
//! # Example
//!
//! ```no_run
//! use togyz_qumalaq::{GameState, Move, MoveProvider, PitIndex, Player, ProviderConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Player one opens from their last pit.
//! let state = GameState::new();
//! let state = state.apply_move(Move::new(Player::One, PitIndex::new(8)?));
//!
//! // Player two answers through the provider (random without a credential).
//! let provider = MoveProvider::new(&ProviderConfig::default());
//! if let Some(reply) = provider.select_move(&state).await {
//!     let state = state.apply_move(reply);
//!     println!("kazans: {} - {}", state.kazan(Player::One), state.kazan(Player::Two));
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod game;
mod llm_client;
mod provider;

// Crate-level exports - Game types and rules
pub use game::{
    GameError, GameState, Move, PitIndex, Player, Tuzdik, INITIAL_SEEDS, KAZAN_WIN, PITS,
    TOTAL_SEEDS,
};

// Crate-level exports - Provider configuration
pub use config::{ConfigError, ProviderConfig};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Move provider
pub use provider::{describe_state, LlmSuggester, MoveProvider, MoveSuggester, ProviderError};
