//! Move notation: coordinate (UCI, Chess960 castling convention) and SAN.

use crate::{board::Position, movegen::legal_moves, types::*};

fn promo_char(kind: PieceKind) -> char {
    kind.letter().to_ascii_lowercase()
}

/// Coordinate notation. Castling is written as the king capturing its own
/// rook (`e1h1`), which stays unambiguous when the king does not move.
pub fn move_to_uci(pos: &Position, mv: Move) -> String {
    let mut s = String::new();
    s.push_str(&sq_to_coord(mv.from));
    let to = match mv.castle_side() {
        Some(side) => pos
            .castling_rook_square(mv.piece.color, side)
            .unwrap_or(mv.to),
        None => mv.to,
    };
    s.push_str(&sq_to_coord(to));
    if let Some(p) = mv.promo {
        s.push(promo_char(p));
    }
    s
}

/// Parses coordinate notation against the legal moves so flags and captured
/// pieces are correct. Castling is accepted as king-to-rook, or as
/// king-to-destination when no ordinary king move shares those squares.
/// A promotion without a piece letter resolves to a queen.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if txt.len() < 4 || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.as_bytes().get(4) {
        Some(&b) => Some(PieceKind::from_letter(b as char).filter(|k| {
            PieceKind::PROMOTIONS.contains(k)
        })?),
        None => None,
    };

    let legals = legal_moves(pos);
    let candidates: Vec<Move> = legals.iter().copied().filter(|m| m.from == from).collect();

    // King onto own rook.
    if let Some(mv) = candidates.iter().find(|m| {
        m.castle_side()
            .and_then(|side| pos.castling_rook_square(m.piece.color, side))
            == Some(to)
    }) {
        return Some(*mv);
    }

    let plain: Vec<&Move> = candidates
        .iter()
        .filter(|m| m.to == to && !m.is_castle())
        .collect();
    if let Some(mv) = plain
        .iter()
        .find(|m| m.promo == promo.or(m.promo.map(|_| PieceKind::Queen)))
    {
        return Some(**mv);
    }
    if plain.is_empty() {
        return candidates.into_iter().find(|m| m.is_castle() && m.to == to);
    }
    None
}

/// Standard Algebraic Notation, including `+`/`#` suffixes.
pub fn move_to_san(pos: &Position, mv: Move) -> String {
    let mut san = match mv.castle_side() {
        Some(CastleSide::King) => "O-O".to_string(),
        Some(CastleSide::Queen) => "O-O-O".to_string(),
        None => san_body(pos, mv),
    };

    let mut after = pos.clone();
    after.make_move(mv);
    let them = after.side_to_move;
    if after.in_check(them) {
        san.push(if legal_moves(&after).is_empty() { '#' } else { '+' });
    }
    san
}

fn san_body(pos: &Position, mv: Move) -> String {
    let mut san = String::new();

    if mv.piece.kind == PieceKind::Pawn {
        if mv.is_capture() {
            san.push((b'a' + file_of(mv.from) as u8) as char);
            san.push('x');
        }
    } else {
        san.push(mv.piece.kind.letter());

        // Disambiguate among same-kind pieces reaching the same square.
        let rivals: Vec<Move> = legal_moves(pos)
            .into_iter()
            .filter(|m| m.piece == mv.piece && m.to == mv.to && m.from != mv.from && !m.is_castle())
            .collect();
        if !rivals.is_empty() {
            let coord = sq_to_coord(mv.from);
            if rivals.iter().all(|m| file_of(m.from) != file_of(mv.from)) {
                san.push_str(&coord[0..1]);
            } else if rivals.iter().all(|m| rank_of(m.from) != rank_of(mv.from)) {
                san.push_str(&coord[1..2]);
            } else {
                san.push_str(&coord);
            }
        }

        if mv.is_capture() {
            san.push('x');
        }
    }

    san.push_str(&sq_to_coord(mv.to));

    if let Some(promo) = mv.promo {
        san.push('=');
        san.push(promo.letter());
    }
    san
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
