mod rules;
mod types;

pub use types::{
    GameError, GameState, Move, PitIndex, Player, Tuzdik, INITIAL_SEEDS, KAZAN_WIN, PITS,
    TOTAL_SEEDS,
};
