//! Error taxonomy shared by the rules engine and the engines built on it.
//!
//! Move, undo/redo and index errors are recoverable and returned to the
//! caller. `IllegalConfiguration` signals a defect in the caller or the
//! engine itself and should not be retried.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The submitted move is not in the current legal set.
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// The game already reached checkmate, stalemate or a draw.
    #[error("Game is over")]
    GameOver,

    /// Undo or redo requested with an empty stack.
    #[error("No {0} history available")]
    NoHistory(&'static str),

    /// Chess960 index outside `0..960`.
    #[error("Invalid Chess960 position index {0} (must be 0-959)")]
    InvalidPositionIndex(u16),

    /// Search depth of zero, or a position breaking board invariants.
    #[error("Illegal configuration: {0}")]
    IllegalConfiguration(String),

    /// A promotion is waiting for its piece choice.
    #[error("A promotion is pending; resolve or cancel it first")]
    PromotionPending,

    /// `resolve_promotion` without a proposed promotion move.
    #[error("No promotion is pending")]
    NoPendingPromotion,

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
}

/// Result type alias for rules-engine operations
pub type ChessResult<T> = Result<T, ChessError>;
