//! Move application and game-ending rules for Togyz Qumalaq.
//!
//! The two rows form a single counter-clockwise ring: row 0 is walked
//! from pit 8 down to pit 0, row 1 from pit 0 up to pit 8, and the walk
//! wraps from the end of each row onto the start of the other.

use super::types::{GameState, Move, PitIndex, Player, Tuzdik, INITIAL_SEEDS, KAZAN_WIN, PITS};
use std::cmp::Ordering;
use tracing::instrument;

impl GameState {
    /// Creates the opening position: nine seeds in every pit, empty
    /// kazans, player one to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: [[INITIAL_SEEDS; PITS]; 2],
            kazan: [0; 2],
            current_player: Player::One,
            game_over: false,
            winner: None,
            tuzdik: None,
        }
    }

    /// Assembles a state from raw parts, recomputing the terminal flag
    /// and winner from the counts given.
    ///
    /// Accepts any seed counts; hosts use this to resume a stored
    /// position mid-game.
    pub fn from_parts(
        board: [[u32; PITS]; 2],
        kazan: [u32; 2],
        current_player: Player,
        tuzdik: Option<Tuzdik>,
    ) -> Self {
        let mut state = Self {
            board,
            kazan,
            current_player,
            game_over: false,
            winner: None,
            tuzdik,
        };
        state.game_over = state.is_game_over();
        state.winner = state.winner();
        state
    }

    /// Whether `mv` may be played in this state: the mover must be the
    /// player whose turn it is, and the source pit must hold at least
    /// one seed.
    ///
    /// Deliberately says nothing about the game being over; that stays
    /// the concern of [`GameState::apply_move`].
    pub fn is_legal_move(&self, mv: Move) -> bool {
        mv.player() == self.current_player && self.seeds(mv.player(), mv.pit()) > 0
    }

    /// Every legal move for the player to move, in ascending pit order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let player = self.current_player;
        PitIndex::all()
            .filter(|&pit| self.seeds(player, pit) > 0)
            .map(|pit| Move::new(player, pit))
            .collect()
    }

    /// Plays `mv` and returns the resulting state.
    ///
    /// Total over all inputs: an illegal move, or any move once the
    /// game is over, returns the state unchanged. `self` is never
    /// mutated.
    #[instrument(skip(self), fields(player = ?self.current_player))]
    pub fn apply_move(&self, mv: Move) -> GameState {
        if self.is_game_over() || !self.is_legal_move(mv) {
            return self.clone();
        }

        let mut next = self.clone();
        let mover = next.current_player;

        // Lift every seed from the source pit.
        let mut remaining = next.board[mv.player().index()][mv.pit().get()];
        next.board[mv.player().index()][mv.pit().get()] = 0;

        // Sow one seed per pit along the ring. The sacred pit is passed
        // over without receiving a seed and without consuming one.
        let skipped = next.tuzdik.map(Tuzdik::location);
        let (mut row, mut pit) = (mv.player().index(), mv.pit().get());
        while remaining > 0 {
            (row, pit) = next_position(row, pit);
            if Some((row, pit)) == skipped {
                continue;
            }
            next.board[row][pit] += 1;
            remaining -= 1;
        }

        // The final seed decides: a pit on the opponent's row brought to
        // exactly three becomes the mover's tuzdik (once per game, never
        // the last pit); an even count there is captured instead.
        let landed = next.board[row][pit];
        if row == mover.opponent().index() {
            if landed == 3 && pit != PITS - 1 && next.tuzdik.is_none() {
                next.tuzdik = Some(Tuzdik::new(mover, PitIndex(pit)));
            } else if landed % 2 == 0 {
                next.kazan[mover.index()] += landed;
                next.board[row][pit] = 0;
            }
        }

        next.current_player = mover.opponent();
        next.game_over = next.is_game_over();
        next.winner = next.winner();
        next
    }

    /// Whether the game has ended: a kazan reached the winning count,
    /// or either row is out of seeds.
    ///
    /// Computed from the counts alone, so it holds for assembled states
    /// as well as played ones.
    pub fn is_game_over(&self) -> bool {
        self.kazan[0] >= KAZAN_WIN
            || self.kazan[1] >= KAZAN_WIN
            || self.board[0].iter().all(|&seeds| seeds == 0)
            || self.board[1].iter().all(|&seeds| seeds == 0)
    }

    /// The winner of a finished game, decided by kazan counts alone.
    ///
    /// Returns `None` while the game is in progress, and also for a
    /// finished game with equal kazans (a draw).
    pub fn winner(&self) -> Option<Player> {
        if !self.is_game_over() {
            return None;
        }
        match self.kazan[0].cmp(&self.kazan[1]) {
            Ordering::Greater => Some(Player::One),
            Ordering::Less => Some(Player::Two),
            Ordering::Equal => None,
        }
    }
}

/// Next pit along the counter-clockwise ring.
fn next_position(row: usize, pit: usize) -> (usize, usize) {
    if row == 0 {
        if pit > 0 { (0, pit - 1) } else { (1, 0) }
    } else if pit < PITS - 1 {
        (1, pit + 1)
    } else {
        (0, PITS - 1)
    }
}
