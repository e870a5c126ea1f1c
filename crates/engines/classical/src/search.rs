//! Negamax search with alpha-beta pruning

use std::cmp::Reverse;

use chess960_core::{
    ChessError, ChessResult, Evaluator, Move, PIECE_VALUES, Position, SearchLimits, TimeControl,
    legal_moves_into,
};
use tracing::debug;

/// Score of being checkmated at the root; a mate `n` plies away scores
/// `MATE_SCORE - n`, so shorter mates are preferred.
pub const MATE_SCORE: i32 = 100_000;
const INFINITY: i32 = i32::MAX / 2;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Move,
    pub score: i32,
    /// Deepest iteration that completed
    pub depth: u8,
    /// True if search was stopped early due to time
    pub stopped: bool,
}

/// Searches `pos` within `limits` and returns the best move with its score.
///
/// `game_history` holds the position keys of the game so far, ending with
/// `pos` itself; repetitions inside the search count against it.
///
/// Without a move time the search runs once at `limits.depth`. With one it
/// deepens iteratively from depth 1; depth 1 always completes and a deeper
/// iteration cut short by the clock is thrown away.
pub fn pick_best_move(
    pos: &Position,
    limits: &SearchLimits,
    evaluator: &Evaluator,
    game_history: &[u64],
    nodes: &mut u64,
) -> ChessResult<SearchOutcome> {
    limits.validate()?;

    let mut tmp = pos.clone();
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);
    if moves.is_empty() {
        return Err(ChessError::GameOver);
    }
    order_moves(&mut moves);

    let mut history = game_history.to_vec();
    if history.last() != Some(&tmp.position_key()) {
        history.push(tmp.position_key());
    }

    let mut searcher = Searcher {
        evaluator,
        tc: &limits.time_control,
        nodes: 0,
        history,
        stopped: false,
    };

    let timed = limits.move_time.is_some();
    let first_depth = if timed { 1 } else { limits.depth };
    let mut outcome: Option<SearchOutcome> = None;

    for depth in first_depth..=limits.depth {
        // Depth 1 runs to completion so there is always a move to play.
        let interruptible = timed && depth > 1;
        let result = searcher.search_root(&mut tmp, &moves, depth, interruptible);
        let Some((best_move, score)) = result else {
            debug!(depth, nodes = searcher.nodes, "iteration interrupted, discarded");
            if let Some(o) = outcome.as_mut() {
                o.stopped = true;
            }
            break;
        };
        debug!(depth, score, nodes = searcher.nodes, "iteration complete");
        outcome = Some(SearchOutcome {
            best_move,
            score,
            depth,
            stopped: false,
        });

        // Search the previous best first on the next iteration.
        if let Some(i) = moves.iter().position(|&m| m == best_move) {
            moves[..=i].rotate_right(1);
        }
        if score.abs() >= MATE_SCORE - i32::from(limits.depth) {
            break;
        }
    }

    *nodes = searcher.nodes;
    Ok(outcome.expect("first iteration is never interrupted"))
}

/// Captures and promotions first, most valuable victim / least valuable
/// attacker; quiet moves keep generation order. The sort is stable, so the
/// result is deterministic.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(order_key(mv)));
}

fn order_key(mv: &Move) -> i32 {
    let mut key = 0;
    if let Some(victim) = mv.captured {
        key += 10 * PIECE_VALUES[victim.kind.idx()] - PIECE_VALUES[mv.piece.kind.idx()];
    }
    if let Some(promo) = mv.promo {
        key += PIECE_VALUES[promo.idx()];
    }
    key
}

struct Searcher<'a> {
    evaluator: &'a Evaluator,
    tc: &'a TimeControl,
    nodes: u64,
    history: Vec<u64>,
    stopped: bool,
}

impl Searcher<'_> {
    /// Full-window search of every root move. Returns `None` if the clock
    /// interrupted it.
    fn search_root(
        &mut self,
        pos: &mut Position,
        moves: &[Move],
        depth: u8,
        interruptible: bool,
    ) -> Option<(Move, i32)> {
        let mut alpha = -INFINITY;
        let mut best = (moves[0], -INFINITY);

        for &mv in moves {
            let undo = pos.make_move(mv);
            self.history.push(pos.position_key());
            self.nodes += 1;

            let score = -self.negamax(pos, depth - 1, -INFINITY, -alpha, 1, interruptible);

            self.history.pop();
            pos.unmake_move(mv, undo);

            if self.stopped {
                return None;
            }
            // Strictly greater: the first of equally scored moves is kept.
            if score > best.1 {
                best = (mv, score);
            }
            alpha = alpha.max(score);
        }
        Some(best)
    }

    /// Recursive negamax search with alpha-beta pruning, scored from the
    /// side to move's perspective.
    fn negamax(
        &mut self,
        pos: &mut Position,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: i32,
        interruptible: bool,
    ) -> i32 {
        // Check time periodically
        if interruptible && self.tc.should_check_time(self.nodes) && self.tc.check_time() {
            self.stopped = true;
            return 0;
        }

        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);

        if moves.is_empty() {
            if pos.in_check(pos.side_to_move) {
                return -(MATE_SCORE - ply); // Checkmate
            }
            return 0; // Stalemate
        }

        // Immediate draw conditions
        if pos.is_fifty_move_draw() || pos.is_insufficient_material() {
            return 0;
        }
        let key = pos.position_key();
        if self.history.iter().filter(|&&k| k == key).count() >= 3 {
            return 0; // threefold repetition
        }

        if depth == 0 {
            return self.evaluator.evaluate(pos, pos.side_to_move);
        }

        order_moves(&mut moves);
        let mut best = -INFINITY;

        for mv in moves {
            let undo = pos.make_move(mv);
            self.history.push(pos.position_key());
            self.nodes += 1;

            let score = -self.negamax(pos, depth - 1, -beta, -alpha, ply + 1, interruptible);

            self.history.pop();
            pos.unmake_move(mv, undo);

            if self.stopped {
                return best;
            }

            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break; // Beta cutoff
            }
        }

        best
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
