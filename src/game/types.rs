//! Core domain types for Togyz Qumalaq.

use serde::{Deserialize, Serialize};

/// Number of pits in each player's row.
pub const PITS: usize = 9;

/// Seeds in every pit at the start of a game.
pub const INITIAL_SEEDS: u32 = 9;

/// Seeds in play over the lifetime of a game (2 rows of 9 pits, 9 seeds each).
pub const TOTAL_SEEDS: u32 = 162;

/// Kazan count that decides the game (more than half of all seeds).
pub const KAZAN_WIN: u32 = 81;

/// Player in the game.
///
/// Serializes as the bare number `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    /// Player one (moves first, owns row 0).
    One,
    /// Player two (owns row 1).
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Row and kazan index for this player (0 for player one, 1 for player two).
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Player number used on the wire and in prompts (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Resolves a raw row index to the player who owns that row.
    pub fn from_row(row: usize) -> Result<Self, GameError> {
        match row {
            0 => Ok(Player::One),
            1 => Ok(Player::Two),
            other => Err(GameError::InvalidRow(other)),
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.number()
    }
}

impl TryFrom<u8> for Player {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(GameError::InvalidPlayer(other)),
        }
    }
}

/// A pit position within a row (0 through 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PitIndex(pub(super) usize);

impl PitIndex {
    /// Creates a pit index, rejecting values outside the row.
    pub fn new(index: usize) -> Result<Self, GameError> {
        if index < PITS {
            Ok(Self(index))
        } else {
            Err(GameError::InvalidIndex(index))
        }
    }

    /// Returns the raw index.
    pub fn get(self) -> usize {
        self.0
    }

    /// Iterates every pit index in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..PITS).map(Self)
    }
}

/// A move: the player sowing and the pit they lift from.
///
/// A move only identifies a pit on the mover's own row; whether it is
/// legal in a given state is decided by [`GameState::is_legal_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Player whose row the seeds are lifted from.
    player: Player,
    /// Source pit on that row.
    pit: PitIndex,
}

impl Move {
    /// Creates a move for the given player and pit.
    pub fn new(player: Player, pit: PitIndex) -> Self {
        Self { player, pit }
    }

    /// Creates a move from raw row and pit indices.
    pub fn from_indices(row: usize, pit: usize) -> Result<Self, GameError> {
        Ok(Self {
            player: Player::from_row(row)?,
            pit: PitIndex::new(pit)?,
        })
    }

    /// The player making the move.
    pub fn player(self) -> Player {
        self.player
    }

    /// The source pit.
    pub fn pit(self) -> PitIndex {
        self.pit
    }
}

/// The sacred pit.
///
/// Created at most once per game, it sits on the row _opposite_ its
/// owner, never receives another seed, and can never be captured. Its
/// row owner may still lift from it like any other pit.
///
/// Serializes as the pair `[owner, pit]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "(u8, usize)", try_from = "(u8, usize)")]
pub struct Tuzdik {
    /// Player who created the tuzdik and collects nothing further from it.
    owner: Player,
    /// Pit index on the owner's opponent's row.
    pit: PitIndex,
}

impl Tuzdik {
    /// Creates a tuzdik owned by `owner` at `pit` on the opponent's row.
    pub fn new(owner: Player, pit: PitIndex) -> Self {
        Self { owner, pit }
    }

    /// The player who created the tuzdik.
    pub fn owner(self) -> Player {
        self.owner
    }

    /// Pit index within the row the tuzdik sits on.
    pub fn pit(self) -> PitIndex {
        self.pit
    }

    /// Raw board coordinates of the sacred pit.
    pub fn location(self) -> (usize, usize) {
        (self.owner.opponent().index(), self.pit.get())
    }
}

impl From<Tuzdik> for (u8, usize) {
    fn from(tuzdik: Tuzdik) -> Self {
        (tuzdik.owner.number(), tuzdik.pit.get())
    }
}

impl TryFrom<(u8, usize)> for Tuzdik {
    type Error = GameError;

    fn try_from((owner, pit): (u8, usize)) -> Result<Self, Self::Error> {
        Ok(Self {
            owner: Player::try_from(owner)?,
            pit: PitIndex::new(pit)?,
        })
    }
}

/// Complete game state.
///
/// Plain data with no hidden identity: states compare by value,
/// round-trip through serde, and evolve only through
/// [`GameState::apply_move`], which returns a fresh value and leaves
/// its input untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Seed counts; row 0 belongs to player one, row 1 to player two.
    pub(super) board: [[u32; PITS]; 2],
    /// Captured seeds, indexed by player.
    pub(super) kazan: [u32; 2],
    /// Player to move.
    pub(super) current_player: Player,
    /// Cached terminal flag, kept in step with the kazan and board.
    pub(super) game_over: bool,
    /// Cached winner, `None` while in progress or on a draw.
    pub(super) winner: Option<Player>,
    /// The sacred pit, if one has been created.
    pub(super) tuzdik: Option<Tuzdik>,
}

impl GameState {
    /// Seed counts for both rows; row 0 belongs to player one.
    pub fn board(&self) -> &[[u32; PITS]; 2] {
        &self.board
    }

    /// Seeds currently in `pit` on `player`'s row.
    pub fn seeds(&self, player: Player, pit: PitIndex) -> u32 {
        self.board[player.index()][pit.get()]
    }

    /// Captured seeds in `player`'s kazan.
    pub fn kazan(&self, player: Player) -> u32 {
        self.kazan[player.index()]
    }

    /// The player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The sacred pit, if one has been created.
    pub fn tuzdik(&self) -> Option<Tuzdik> {
        self.tuzdik
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected raw value when constructing a typed index or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Pit index outside 0 through 8.
    InvalidIndex(usize),
    /// Row index other than 0 or 1.
    InvalidRow(usize),
    /// Player number other than 1 or 2.
    InvalidPlayer(u8),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidIndex(index) => {
                write!(f, "pit index {} out of range (must be 0-8)", index)
            }
            GameError::InvalidRow(row) => {
                write!(f, "row index {} out of range (must be 0 or 1)", row)
            }
            GameError::InvalidPlayer(player) => {
                write!(f, "player number {} out of range (must be 1 or 2)", player)
            }
        }
    }
}

impl std::error::Error for GameError {}
