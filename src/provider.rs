//! Opponent move selection for player two.
//!
//! A [`MoveProvider`] asks an LLM for the next move and falls back to
//! a uniformly random legal move whenever the model is unreachable,
//! over its time budget, or answers with something unusable. Selection
//! therefore never fails on a position where player two can move at
//! all.

use crate::config::ProviderConfig;
use crate::game::{GameState, Move, PitIndex, Player, KAZAN_WIN, PITS};
use crate::llm_client::{LlmClient, LlmError};
use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// System prompt sent with every suggestion request.
const SYSTEM_PROMPT: &str = "You are an expert Togyz Qumalaq (Nine Kumalaks) player. \
     You play as player 2, owning row 1. When asked for a move, respond with ONLY a JSON \
     object of the form {\"move\": [1, pit]} where pit is a number from 0 to 8, and \
     nothing else.";

/// Source of raw move suggestions.
///
/// Implementations receive a textual encoding of the position and
/// return the model's reply verbatim; parsing and validation stay with
/// [`MoveProvider`], so tests can drive selection with canned replies.
#[async_trait]
pub trait MoveSuggester: Send + Sync {
    /// Produces a reply for the encoded position.
    async fn suggest(&self, position: &str) -> Result<String, LlmError>;
}

/// Suggester backed by the configured LLM API.
pub struct LlmSuggester {
    client: LlmClient,
}

impl LlmSuggester {
    /// Creates a suggester over an initialized client.
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MoveSuggester for LlmSuggester {
    #[instrument(skip(self, position))]
    async fn suggest(&self, position: &str) -> Result<String, LlmError> {
        self.client.generate(SYSTEM_PROMPT, position).await
    }
}

/// Move selection failures the provider recovers from internally.
#[derive(Debug)]
pub enum ProviderError {
    /// No API credential was configured, so no suggester exists.
    Unavailable,
    /// The reply was not the JSON object the contract demands.
    MalformedResponse(String),
    /// The reply was well-formed but named a pit player two cannot play.
    IllegalSuggestion {
        /// The suggested pit index.
        pit: usize,
    },
    /// The underlying API call failed or timed out.
    Llm(LlmError),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Unavailable => {
                write!(f, "no language model credential configured")
            }
            ProviderError::MalformedResponse(detail) => {
                write!(f, "malformed suggestion: {}", detail)
            }
            ProviderError::IllegalSuggestion { pit } => {
                write!(f, "suggested pit {} is not a legal move", pit)
            }
            ProviderError::Llm(error) => {
                write!(f, "language model request failed: {}", error)
            }
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Llm(error) => Some(error),
            _ => None,
        }
    }
}

impl From<LlmError> for ProviderError {
    fn from(error: LlmError) -> Self {
        ProviderError::Llm(error)
    }
}

/// Selects moves for player two.
///
/// Usable with zero external dependencies: without an API credential
/// every selection is uniformly random over the legal moves, and any
/// suggester failure degrades to the same choice.
pub struct MoveProvider {
    suggester: Option<Box<dyn MoveSuggester>>,
    timeout: Duration,
}

impl MoveProvider {
    /// Creates a provider from configuration.
    ///
    /// Falls back to random-only mode when no API credential is set,
    /// rather than failing.
    #[instrument(skip(config), fields(provider = ?config.llm_provider()))]
    pub fn new(config: &ProviderConfig) -> Self {
        let timeout = Duration::from_secs(*config.llm_timeout_secs());
        match config.create_llm_config() {
            Ok(llm_config) => {
                info!("Move provider using language model suggestions");
                Self {
                    suggester: Some(Box::new(LlmSuggester::new(LlmClient::new(llm_config)))),
                    timeout,
                }
            }
            Err(error) => {
                warn!(%error, "No language model credential, provider runs in random mode");
                Self {
                    suggester: None,
                    timeout,
                }
            }
        }
    }

    /// Creates a provider over a custom suggester.
    pub fn with_suggester(suggester: Box<dyn MoveSuggester>, timeout: Duration) -> Self {
        Self {
            suggester: Some(suggester),
            timeout,
        }
    }

    /// Creates a provider that always selects uniformly at random.
    pub fn without_suggester() -> Self {
        Self {
            suggester: None,
            timeout: Duration::ZERO,
        }
    }

    /// Picks a legal move for player two in the given position.
    ///
    /// Returns `None` when it is not player two's turn, when player
    /// two has no legal move, or when the game is already over.
    /// Otherwise always returns a legal move: a rejected or failed
    /// suggestion degrades to a uniformly random choice. The state is
    /// only read, and dropping the returned future merely abandons the
    /// API call.
    #[instrument(skip(self, state))]
    pub async fn select_move(&self, state: &GameState) -> Option<Move> {
        if state.is_game_over() {
            debug!("Game is over, nothing to select");
            return None;
        }
        if state.current_player() != Player::Two {
            debug!("Not player two's turn");
            return None;
        }
        let legal = state.legal_moves();
        if legal.is_empty() {
            debug!("Player two has no legal move");
            return None;
        }

        match self.suggested_move(state).await {
            Ok(mv) => {
                info!(pit = mv.pit().get(), "Accepted suggested move");
                Some(mv)
            }
            Err(error) => {
                warn!(%error, "Falling back to a random move");
                Some(random_move(&legal))
            }
        }
    }

    /// Runs the suggestion pipeline: encode the position, call the
    /// suggester under the configured timeout, parse and validate.
    async fn suggested_move(&self, state: &GameState) -> Result<Move, ProviderError> {
        let suggester = self.suggester.as_ref().ok_or(ProviderError::Unavailable)?;
        let position = describe_state(state);
        let reply = tokio::time::timeout(self.timeout, suggester.suggest(&position))
            .await
            .map_err(|_| {
                ProviderError::Llm(LlmError::new("Suggestion request timed out".to_string()))
            })??;
        debug!(reply = %reply, "Suggester replied");
        parse_suggestion(&reply, state)
    }
}

/// Encodes a position as the request text the suggester receives.
///
/// Spells out both rows, both kazans, the tuzdik, whose turn it is,
/// and the pits player two may currently choose, then restates the
/// reply contract.
pub fn describe_state(state: &GameState) -> String {
    let board = state.board();
    let row_one = join_counts(&board[0]);
    let row_two = join_counts(&board[1]);

    let tuzdik_line = match state.tuzdik() {
        Some(tuzdik) => format!(
            "Player {} owns a tuzdik (sacred pit) at pit index {} on the opposite row; it is skipped when sowing and can never be captured.",
            tuzdik.owner().number(),
            tuzdik.pit().get()
        ),
        None => "No tuzdik (sacred pit) has been created yet.".to_string(),
    };

    let turn_line = match state.current_player() {
        Player::One => "It is player 1's turn.",
        Player::Two => "It is your turn (player 2).",
    };

    let legal_pits = state
        .legal_moves()
        .iter()
        .map(|mv| mv.pit().get().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Current Togyz Qumalaq position:\n\
         - Player 1 pits (row 0, indices 0-8): [{row_one}]\n\
         - Player 2 pits (row 1, your side, indices 0-8): [{row_two}]\n\
         - Player 1 kazan: {kazan_one} seeds\n\
         - Player 2 kazan: {kazan_two} seeds\n\
         - {tuzdik_line}\n\
         - {turn_line}\n\
         \n\
         Rules reminder:\n\
         - Seeds are sown counter-clockwise, one per pit, skipping any tuzdik.\n\
         - If the last seed lands on the opponent's row and makes the count even, you capture that pit.\n\
         - If the last seed lands on the opponent's row and makes the count exactly 3, that pit becomes your tuzdik (once per game, never pit 8).\n\
         - First player to collect {win} seeds wins.\n\
         \n\
         Your legal pits right now: [{legal_pits}].\n\
         \n\
         Respond with ONLY a JSON object in this exact format: {{\"move\": [1, pit]}}\n\
         where pit is the index (0-8) of the pit you choose from your row.",
        kazan_one = state.kazan(Player::One),
        kazan_two = state.kazan(Player::Two),
        win = KAZAN_WIN,
    )
}

/// Formats one row of seed counts for the prompt.
fn join_counts(row: &[u32; PITS]) -> String {
    row.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shape the reply contract demands.
#[derive(Debug, Deserialize)]
struct Suggestion {
    /// Row index and pit index, in that order.
    #[serde(rename = "move")]
    mv: [i64; 2],
}

/// Parses a raw reply into a move and checks it against the position.
fn parse_suggestion(reply: &str, state: &GameState) -> Result<Move, ProviderError> {
    let body = strip_code_fence(reply.trim());
    let suggestion: Suggestion = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("not a move object: {}", e)))?;

    let (row, pit) = (suggestion.mv[0], suggestion.mv[1]);
    if row != Player::Two.index() as i64 {
        return Err(ProviderError::MalformedResponse(format!(
            "row {} is not player two's row",
            row
        )));
    }
    let pit = usize::try_from(pit).map_err(|_| {
        ProviderError::MalformedResponse(format!("pit {} is out of range", pit))
    })?;
    let pit = PitIndex::new(pit)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    let mv = Move::new(Player::Two, pit);
    if !state.is_legal_move(mv) {
        return Err(ProviderError::IllegalSuggestion { pit: pit.get() });
    }
    Ok(mv)
}

/// Peels a markdown code fence off a reply, if one is present.
fn strip_code_fence(reply: &str) -> &str {
    let Some(inner) = reply.strip_prefix("```") else {
        return reply;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    match inner.strip_suffix("```") {
        Some(body) => body.trim(),
        None => reply,
    }
}

/// Uniform choice among the legal moves; `legal` must be non-empty.
fn random_move(legal: &[Move]) -> Move {
    let mut rng = rand::thread_rng();
    legal[rng.gen_range(0..legal.len())]
}
