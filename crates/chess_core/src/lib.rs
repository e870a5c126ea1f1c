pub mod board;
pub mod chess960;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod status;
pub mod time_control;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use chess960::{POSITION_COUNT, STANDARD_INDEX, StartingPosition};
pub use error::{ChessError, ChessResult};
pub use eval::{EvalWeights, Evaluator, PIECE_VALUES, evaluate};
pub use game::{Game, MoveRecord, Proposal};
pub use movegen::*;
pub use notation::*;
pub use perft::{perft, perft_divide};
pub use status::*;
pub use time_control::*;
pub use types::*;

use std::time::Duration;

// =============================================================================
// Engine trait: implemented by every move chooser (search, random, ...)
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found
    pub best_move: Move,
    /// Evaluation score in centipawns from the side to move's perspective
    pub score: i32,
    /// Deepest fully completed search depth
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Wall-clock time spent choosing the move
    pub elapsed: Duration,
    /// Whether search was stopped early due to time limit
    pub stopped: bool,
}

/// Trait that all chess engines must implement.
///
/// Engines never mutate the caller's position; they work on their own copy.
pub trait Engine: Send {
    /// Choose a move for the side to move in `pos`.
    ///
    /// Fails with [`ChessError::GameOver`] when there are no legal moves and
    /// with [`ChessError::IllegalConfiguration`] for unusable limits.
    fn search(&mut self, pos: &Position, limits: &SearchLimits) -> ChessResult<SearchResult>;

    /// Keys of the positions played so far, ending with the position about
    /// to be searched. Engines that detect repetition use them.
    fn set_position_history(&mut self, _keys: &[u64]) {}

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
