//! Static evaluation with Chess960 adjustments.

use serde::{Deserialize, Serialize};

use crate::{board::Position, types::*};

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 300, 325, 500, 900, 0];

/// Tunable Chess960 terms, in centipawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Bonus for a side that still has two or more bishops.
    pub bishop_pair: i32,
    /// Penalty per rook still on its starting square.
    pub unmoved_rook: i32,
    /// Plies during which the unmoved-rook penalty is not applied.
    pub rook_grace_plies: u32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            bishop_pair: 50,
            unmoved_rook: 30,
            rook_grace_plies: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    pub weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    /// Score from `perspective`'s point of view. Zero-sum: the score for
    /// one color is exactly the negation of the score for the other.
    pub fn evaluate(&self, pos: &Position, perspective: Color) -> i32 {
        let white = self.side_score(pos, Color::White) - self.side_score(pos, Color::Black);
        match perspective {
            Color::White => white,
            Color::Black => -white,
        }
    }

    fn side_score(&self, pos: &Position, c: Color) -> i32 {
        let mut score = 0;
        let mut bishops = 0;
        for pc in pos.board.iter().flatten().filter(|pc| pc.color == c) {
            score += PIECE_VALUES[pc.kind.idx()];
            if pc.kind == PieceKind::Bishop {
                bishops += 1;
            }
        }
        if bishops >= 2 {
            score += self.weights.bishop_pair;
        }
        if pos.ply() >= self.weights.rook_grace_plies {
            score -= self.weights.unmoved_rook * pos.unmoved_rooks[c.idx()].count_ones() as i32;
        }
        score
    }
}

/// Evaluates with the default weights.
pub fn evaluate(pos: &Position, perspective: Color) -> i32 {
    Evaluator::default().evaluate(pos, perspective)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
