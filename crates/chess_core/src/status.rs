//! Terminal-state detection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{board::Position, movegen::legal_moves_into, types::Color};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    /// 100 half-moves without a capture or pawn move.
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// Short outcome label used in game records.
    pub fn label(self) -> &'static str {
        match self {
            GameStatus::InProgress => "in-progress",
            GameStatus::Checkmate { .. } => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw(_) => "draw",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw(DrawReason::FiftyMoveRule) => write!(f, "draw by fifty-move rule"),
            GameStatus::Draw(DrawReason::ThreefoldRepetition) => {
                write!(f, "draw by threefold repetition")
            }
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "draw by insufficient material")
            }
        }
    }
}

/// Status of a position on its own (no repetition history).
pub fn position_status(pos: &Position) -> GameStatus {
    status_with_history(pos, &[])
}

/// Status of a position given the keys of every earlier position of the
/// game, current one included. Mate and stalemate take precedence over draws.
pub fn status_with_history(pos: &Position, history: &[u64]) -> GameStatus {
    let mut tmp = pos.clone();
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);

    if moves.is_empty() {
        return if pos.in_check(pos.side_to_move) {
            GameStatus::Checkmate {
                winner: pos.side_to_move.other(),
            }
        } else {
            GameStatus::Stalemate
        };
    }
    if pos.is_fifty_move_draw() {
        return GameStatus::Draw(DrawReason::FiftyMoveRule);
    }
    let key = pos.position_key();
    if history.iter().filter(|&&k| k == key).count() >= 3 {
        return GameStatus::Draw(DrawReason::ThreefoldRepetition);
    }
    if pos.is_insufficient_material() {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }
    GameStatus::InProgress
}
