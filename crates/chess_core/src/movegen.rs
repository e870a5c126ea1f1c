use crate::{
    board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position},
    types::*,
};

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Legal moves of the piece standing on `from` (empty for an empty square
/// or a piece of the side not to move).
pub fn legal_moves_from(pos: &Position, from: u8) -> Vec<Move> {
    let mut moves = legal_moves(pos);
    moves.retain(|mv| mv.from == from);
    moves
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
/// The position is restored before returning.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for sq in 0..64u8 {
        let pc = match pos.piece_at(sq) {
            Some(p) => p,
            None => continue,
        };
        if pc.color != pos.side_to_move {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, sq, pc, out),
            PieceKind::Knight => gen_steps(pos, sq, pc, out, &KNIGHT_DELTAS),
            PieceKind::Bishop => gen_slider(pos, sq, pc, out, &DIAGONALS),
            PieceKind::Rook => gen_slider(pos, sq, pc, out, &ORTHOGONALS),
            PieceKind::Queen => {
                gen_slider(pos, sq, pc, out, &DIAGONALS);
                gen_slider(pos, sq, pc, out, &ORTHOGONALS);
            }
            PieceKind::King => {
                gen_steps(pos, sq, pc, out, &KING_DELTAS);
                gen_castle(pos, sq, pc, out);
            }
        }
    }
}

fn push_pawn_move(from: u8, to: u8, pawn: Piece, captured: Option<Piece>, out: &mut Vec<Move>) {
    let promo_rank = pawn.color.other().back_rank();
    if rank_of(to) == promo_rank {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move {
                from,
                to,
                piece: pawn,
                captured,
                promo: Some(pk),
                flag: MoveFlag::Promotion,
            });
        }
    } else {
        match captured {
            Some(victim) => out.push(Move::capture(from, to, pawn, victim)),
            None => out.push(Move::quiet(from, to, pawn)),
        }
    }
}

fn gen_pawn(pos: &Position, from: u8, pawn: Piece, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);

    let dir: i8 = match pawn.color {
        Color::White => 1,
        Color::Black => -1,
    };
    let start_rank: i8 = match pawn.color {
        Color::White => 1,
        Color::Black => 6,
    };

    // forward 1
    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, pawn, None, out);

        // forward 2 from start
        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::quiet(from, to2, pawn));
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(victim) if victim.color != pawn.color => {
                push_pawn_move(from, to, pawn, Some(victim), out);
            }
            Some(_) => {}
            None if pos.en_passant == Some(to) => {
                let victim_sq = sq(f + df, r).expect("en-passant victim beside pawn");
                if let Some(victim) = pos.piece_at(victim_sq)
                    && victim == Piece::new(pawn.color.other(), PieceKind::Pawn)
                {
                    out.push(Move {
                        from,
                        to,
                        piece: pawn,
                        captured: Some(victim),
                        promo: None,
                        flag: MoveFlag::EnPassant,
                    });
                }
            }
            None => {}
        }
    }
}

/// Knight and king single steps.
fn gen_steps(pos: &Position, from: u8, pc: Piece, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::quiet(from, to, pc)),
                Some(victim) if victim.color != pc.color => {
                    out.push(Move::capture(from, to, pc, victim))
                }
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, pc: Piece, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::quiet(from, to, pc)),
                Some(victim) if victim.color != pc.color => {
                    out.push(Move::capture(from, to, pc, victim));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

/// Chess960 castling. King and rook land on the classical squares (g/f or
/// c/d) wherever they start. Every square either piece crosses, including
/// its destination, must be empty apart from the castling king and rook;
/// the king must not be in check nor cross or land on an attacked square.
fn gen_castle(pos: &Position, king_from: u8, king: Piece, out: &mut Vec<Move>) {
    let c = king.color;
    let rank = c.back_rank();
    if rank_of(king_from) != rank {
        return;
    }
    // Can't castle out of check.
    if pos.in_check(c) {
        return;
    }

    for side in CastleSide::BOTH {
        let Some(rook_from) = pos.castling_rook_square(c, side) else {
            continue;
        };
        if pos.piece_at(rook_from) != Some(Piece::new(c, PieceKind::Rook)) {
            continue;
        }
        let on_expected_side = match side {
            CastleSide::King => rook_from > king_from,
            CastleSide::Queen => rook_from < king_from,
        };
        if !on_expected_side {
            continue;
        }
        let (Some(king_to), Some(rook_to)) =
            (sq(side.king_to_file(), rank), sq(side.rook_to_file(), rank))
        else {
            continue;
        };

        let blocked = span(king_from, king_to)
            .chain(span(rook_from, rook_to))
            .any(|s| s != king_from && s != rook_from && pos.piece_at(s).is_some());
        if blocked {
            continue;
        }

        // Both pieces move at once, so test attacks with them lifted.
        let mut lifted = pos.clone();
        lifted.set_piece(king_from, None);
        lifted.set_piece(rook_from, None);
        if span(king_from, king_to).any(|s| lifted.is_square_attacked(s, c.other())) {
            continue;
        }

        out.push(Move {
            from: king_from,
            to: king_to,
            piece: king,
            captured: None,
            promo: None,
            flag: match side {
                CastleSide::King => MoveFlag::CastleKingside,
                CastleSide::Queen => MoveFlag::CastleQueenside,
            },
        });
    }
}

/// Squares on one rank from `a` to `b`, both inclusive.
fn span(a: u8, b: u8) -> std::ops::RangeInclusive<u8> {
    a.min(b)..=a.max(b)
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
