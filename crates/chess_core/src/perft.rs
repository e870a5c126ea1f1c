//! Move-path enumeration for validating the move generator.

use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Number of legal move sequences of length `depth` from `pos`.
///
/// The position is restored before returning.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    let mut buffers = vec![Vec::with_capacity(64); depth as usize];
    count_leaves(pos, &mut buffers)
}

/// One move buffer per remaining ply, so the walk never allocates.
fn count_leaves(pos: &mut Position, buffers: &mut [Vec<Move>]) -> u64 {
    let Some((moves, deeper)) = buffers.split_first_mut() else {
        return 1;
    };
    moves.clear();
    legal_moves_into(pos, moves);
    if deeper.is_empty() {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mv| {
            let undo = pos.make_move(mv);
            let n = count_leaves(pos, deeper);
            pos.unmake_move(mv, undo);
            n
        })
        .sum()
}

/// Per-root-move node counts, for comparing against a reference generator.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    let mut roots = Vec::with_capacity(64);
    legal_moves_into(pos, &mut roots);
    roots
        .into_iter()
        .map(|mv| {
            let undo = pos.make_move(mv);
            let nodes = perft(pos, depth.saturating_sub(1));
            pos.unmake_move(mv, undo);
            (mv, nodes)
        })
        .collect()
}
