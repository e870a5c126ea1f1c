//! Classical Chess960 Engine
//!
//! Alpha-beta search over the core evaluator (material, bishop pair,
//! undeveloped rooks).

mod search;

use std::time::Instant;

use chess960_core::{
    ChessResult, Engine, EvalWeights, Evaluator, Position, SearchLimits, SearchResult,
    move_to_uci,
};
use tracing::debug;

pub use search::{MATE_SCORE, SearchOutcome, order_moves, pick_best_move};

/// Classical chess engine using negamax with alpha-beta pruning.
///
/// This engine uses:
/// - Negamax search with alpha-beta pruning
/// - Capture/promotion-first move ordering
/// - 50-move rule and threefold repetition detection
/// - Iterative deepening when a move time is set
#[derive(Debug, Clone, Default)]
pub struct ClassicalEngine {
    evaluator: Evaluator,
    /// Position keys of the game leading up to the next search
    game_history: Vec<u64>,
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: EvalWeights) -> Self {
        Self {
            evaluator: Evaluator::new(weights),
            ..Self::default()
        }
    }

    pub fn weights(&self) -> EvalWeights {
        self.evaluator.weights
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position, limits: &SearchLimits) -> ChessResult<SearchResult> {
        self.nodes = 0;
        let started = Instant::now();
        limits.start();

        let outcome = search::pick_best_move(
            pos,
            limits,
            &self.evaluator,
            &self.game_history,
            &mut self.nodes,
        )?;
        let elapsed = started.elapsed();

        debug!(
            best = %move_to_uci(pos, outcome.best_move),
            score = outcome.score,
            depth = outcome.depth,
            nodes = self.nodes,
            ?elapsed,
            "search finished"
        );

        Ok(SearchResult {
            best_move: outcome.best_move,
            score: outcome.score,
            depth: outcome.depth,
            nodes: self.nodes,
            elapsed,
            stopped: outcome.stopped,
        })
    }

    fn set_position_history(&mut self, keys: &[u64]) {
        self.game_history.clear();
        self.game_history.extend_from_slice(keys);
    }

    fn name(&self) -> &str {
        "Classical"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
        self.game_history.clear();
    }
}
