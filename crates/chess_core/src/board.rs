use crate::error::{ChessError, ChessResult};
use crate::types::*;

/// Chess960 castling rights: for each (color, side) the file of the rook
/// that may still castle. Rights are only ever removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    rooks: [[Option<u8>; 2]; 2],
}

impl CastlingRights {
    pub fn none() -> Self {
        Self::default()
    }

    /// Full rights for both colors with the given rook files.
    pub fn both(queen_rook_file: u8, king_rook_file: u8) -> Self {
        let mut rights = Self::none();
        for c in Color::BOTH {
            rights.set(c, CastleSide::Queen, queen_rook_file);
            rights.set(c, CastleSide::King, king_rook_file);
        }
        rights
    }

    pub fn get(&self, c: Color, side: CastleSide) -> Option<u8> {
        self.rooks[c.idx()][side.idx()]
    }
    pub fn set(&mut self, c: Color, side: CastleSide, rook_file: u8) {
        self.rooks[c.idx()][side.idx()] = Some(rook_file);
    }
    pub fn revoke(&mut self, c: Color, side: CastleSide) {
        self.rooks[c.idx()][side.idx()] = None;
    }
    pub fn revoke_color(&mut self, c: Color) {
        self.rooks[c.idx()] = [None, None];
    }
    /// Drop whichever right of `c` belongs to the rook on `file`.
    pub fn revoke_file(&mut self, c: Color, file: u8) {
        for side in CastleSide::BOTH {
            if self.get(c, side) == Some(file) {
                self.revoke(c, side);
            }
        }
    }
    pub fn is_empty(&self) -> bool {
        self.rooks.iter().flatten().all(Option::is_none)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    /// Per color, bit `f` set while the rook that started on back-rank file
    /// `f` has neither moved nor been captured.
    pub unmoved_rooks: [u8; 2],
}

/// State that `make_move` cannot recover from the move itself.
#[derive(Clone, Debug)]
pub struct Undo {
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub unmoved_rooks: [u8; 2],
}

impl Position {
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            unmoved_rooks: [0, 0],
        }
    }

    /// Classical starting array (Chess960 index 518).
    pub fn startpos() -> Self {
        crate::chess960::position_from_back_rank(&crate::chess960::STANDARD_BACK_RANK)
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        // Forsyth-Edwards Notation parser; castling accepts KQkq and Shredder file letters.
        let bad = |msg: &str| ChessError::InvalidFen(format!("{msg} in '{fen}'"));
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(bad("expected at least 4 fields"));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut pos = Position::empty();
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(bad("board section needs 8 ranks"));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = PieceKind::from_letter(ch)
                        .ok_or_else(|| bad(&format!("invalid piece char '{ch}'")))?;
                    let s = sq(file, rank).ok_or_else(|| bad("too many files in rank"))?;
                    pos.board[s as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(bad("too many files in rank"));
                }
            }
            if file != 8 {
                return Err(bad("not enough files in rank"));
            }
        }

        pos.side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(bad("invalid side to move")),
        };

        if castle_part != "-" {
            for c in castle_part.chars() {
                let color = if c.is_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let rank = color.back_rank();
                let king_file = pos
                    .king_sq(color)
                    .filter(|&k| rank_of(k) == rank)
                    .map(file_of)
                    .ok_or_else(|| bad("castling right without king on back rank"))?;
                let is_rook = |f: i8| {
                    sq(f, rank).and_then(|s| pos.piece_at(s))
                        == Some(Piece::new(color, PieceKind::Rook))
                };
                let (side, rook_file) = match c.to_ascii_lowercase() {
                    'k' => (
                        CastleSide::King,
                        (king_file + 1..8).rev().find(|&f| is_rook(f)),
                    ),
                    'q' => (CastleSide::Queen, (0..king_file).find(|&f| is_rook(f))),
                    l @ 'a'..='h' => {
                        let f = (l as u8 - b'a') as i8;
                        let side = if f > king_file {
                            CastleSide::King
                        } else {
                            CastleSide::Queen
                        };
                        (side, Some(f).filter(|&f| f != king_file && is_rook(f)))
                    }
                    _ => return Err(bad(&format!("invalid castling char '{c}'"))),
                };
                let rook_file = rook_file.ok_or_else(|| bad("castling right without rook"))?;
                pos.castling.set(color, side, rook_file as u8);
                pos.unmoved_rooks[color.idx()] |= 1 << rook_file;
            }
        }

        pos.en_passant = if ep_part == "-" {
            None
        } else {
            Some(coord_to_sq(ep_part).ok_or_else(|| bad("invalid en-passant square"))?)
        };

        pos.halfmove_clock = halfmove_part
            .parse()
            .map_err(|_| bad("invalid halfmove clock"))?;
        pos.fullmove_number = fullmove_part
            .parse()
            .map_err(|_| bad("invalid fullmove number"))?;

        pos.validate()?;
        Ok(pos)
    }

    /// FEN with Shredder-style castling field (rook files, e.g. `HAha`).
    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match sq(file, rank).and_then(|s| self.piece_at(s)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let mut castle = String::new();
        for c in Color::BOTH {
            for side in CastleSide::BOTH {
                if let Some(f) = self.castling.get(c, side) {
                    let letter = (b'a' + f) as char;
                    castle.push(match c {
                        Color::White => letter.to_ascii_uppercase(),
                        Color::Black => letter,
                    });
                }
            }
        }
        if castle.is_empty() {
            castle.push('-');
        }
        out.push_str(&castle);

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }
        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    /// Checks the board invariants legal play relies on.
    pub fn validate(&self) -> ChessResult<()> {
        let fail = |msg: String| Err(ChessError::IllegalConfiguration(msg));
        for c in Color::BOTH {
            let kings = self.count(c, PieceKind::King);
            if kings != 1 {
                return fail(format!("{c} has {kings} kings"));
            }
            for side in CastleSide::BOTH {
                if self.castling_rook_square(c, side).is_some_and(|rsq| {
                    self.piece_at(rsq) != Some(Piece::new(c, PieceKind::Rook))
                }) {
                    return fail(format!("{c} {side:?}-side castling rook missing"));
                }
            }
        }
        for s in 0..64u8 {
            if let Some(pc) = self.piece_at(s)
                && pc.kind == PieceKind::Pawn
                && (rank_of(s) == 0 || rank_of(s) == 7)
            {
                return fail(format!("pawn on back rank at {}", sq_to_coord(s)));
            }
        }
        if let Some(ep) = self.en_passant {
            let expected = match self.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if rank_of(ep) != expected {
                return fail(format!("en-passant square {} on wrong rank", sq_to_coord(ep)));
            }
        }
        Ok(())
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        for i in 0..64 {
            if let Some(pc) = self.board[i]
                && pc.color == c
                && pc.kind == PieceKind::King
            {
                return Some(i as u8);
            }
        }
        None
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn count(&self, c: Color, kind: PieceKind) -> u32 {
        self.board
            .iter()
            .flatten()
            .filter(|pc| pc.color == c && pc.kind == kind)
            .count() as u32
    }

    /// Square of the rook `c` may still castle with on `side`.
    pub fn castling_rook_square(&self, c: Color, side: CastleSide) -> Option<u8> {
        self.castling
            .get(c, side)
            .and_then(|f| sq(f as i8, c.back_rank()))
    }

    /// Plies played since the start of the game, derived from the move counters.
    pub fn ply(&self) -> u32 {
        let base = self.fullmove_number.saturating_sub(1) * 2;
        match self.side_to_move {
            Color::White => base,
            Color::Black => base + 1,
        }
    }

    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        // Pawn attacks
        let tf = file_of(target);
        let tr = rank_of(target);
        let pawn_dirs: &[(i8, i8)] = match by {
            Color::White => &[(-1, -1), (1, -1)], // target attacked from the rank below
            Color::Black => &[(-1, 1), (1, 1)],
        };
        for (df, dr) in pawn_dirs {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.piece_at(s) == Some(Piece::new(by, PieceKind::Pawn))
            {
                return true;
            }
        }

        for (df, dr) in KNIGHT_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.piece_at(s) == Some(Piece::new(by, PieceKind::Knight))
            {
                return true;
            }
        }

        for (df, dr) in KING_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.piece_at(s) == Some(Piece::new(by, PieceKind::King))
            {
                return true;
            }
        }

        // Sliding: bishop/rook/queen
        for (dirs, slider) in [(DIAGONALS, PieceKind::Bishop), (ORTHOGONALS, PieceKind::Rook)] {
            for (df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(sq2) = sq(f, r) {
                    if let Some(pc) = self.piece_at(sq2) {
                        if pc.color == by && (pc.kind == slider || pc.kind == PieceKind::Queen) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let us = mv.piece.color;
        let them = us.other();
        let undo = Undo {
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            unmoved_rooks: self.unmoved_rooks,
        };

        self.en_passant = None;

        if let Some(side) = mv.castle_side() {
            let rank = us.back_rank();
            let rook_from = self
                .castling_rook_square(us, side)
                .expect("castling move without castling right");
            let rook_to = sq(side.rook_to_file(), rank).expect("rook destination on board");
            // Lift both pieces first: origins and destinations may overlap.
            self.set_piece(mv.from, None);
            self.set_piece(rook_from, None);
            self.set_piece(rook_to, Some(Piece::new(us, PieceKind::Rook)));
            self.set_piece(mv.to, Some(mv.piece));
            self.unmoved_rooks[us.idx()] &= !(1 << file_of(rook_from));
        } else {
            if mv.is_en_passant() {
                let cap = sq(file_of(mv.to), rank_of(mv.from)).expect("en-passant victim square");
                self.set_piece(cap, None);
            }
            assert!(
                self.piece_at(mv.from) == Some(mv.piece),
                "no piece on from-square {}",
                sq_to_coord(mv.from)
            );
            self.set_piece(mv.from, None);
            let placed = match mv.promo {
                Some(kind) => Piece::new(us, kind),
                None => mv.piece,
            };
            self.set_piece(mv.to, Some(placed));

            // Double pawn push sets en-passant square
            if mv.piece.kind == PieceKind::Pawn && (rank_of(mv.to) - rank_of(mv.from)).abs() == 2 {
                self.en_passant = sq(file_of(mv.from), (rank_of(mv.from) + rank_of(mv.to)) / 2);
            }
        }

        // Castling rights: king move drops both, a rook leaving or captured on
        // its home square drops that side.
        if mv.piece.kind == PieceKind::King {
            self.castling.revoke_color(us);
        }
        if mv.piece.kind == PieceKind::Rook && rank_of(mv.from) == us.back_rank() {
            self.castling.revoke_file(us, file_of(mv.from) as u8);
            self.unmoved_rooks[us.idx()] &= !(1 << file_of(mv.from));
        }
        if let Some(cp) = mv.captured
            && cp.kind == PieceKind::Rook
            && rank_of(mv.to) == them.back_rank()
        {
            self.castling.revoke_file(them, file_of(mv.to) as u8);
            self.unmoved_rooks[them.idx()] &= !(1 << file_of(mv.to));
        }

        self.halfmove_clock = if mv.piece.kind == PieceKind::Pawn || mv.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };

        // Switch side
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = them;

        undo
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        // Restore side
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.unmoved_rooks = undo.unmoved_rooks;

        let us = mv.piece.color;
        if let Some(side) = mv.castle_side() {
            let rank = us.back_rank();
            let rook_from = self
                .castling_rook_square(us, side)
                .expect("castling right restored before rook");
            let rook_to = sq(side.rook_to_file(), rank).expect("rook destination on board");
            self.set_piece(mv.to, None);
            self.set_piece(rook_to, None);
            self.set_piece(rook_from, Some(Piece::new(us, PieceKind::Rook)));
            self.set_piece(mv.from, Some(mv.piece));
            return;
        }

        self.set_piece(mv.from, Some(mv.piece));
        if mv.is_en_passant() {
            self.set_piece(mv.to, None);
            let cap = sq(file_of(mv.to), rank_of(mv.from)).expect("en-passant victim square");
            self.set_piece(cap, mv.captured);
        } else {
            self.set_piece(mv.to, mv.captured);
        }
    }

    /// Lightweight FNV-based hash over board, side, castling, and ep for repetition detection.
    pub fn position_key(&self) -> u64 {
        fn mix(mut h: u64, x: u64) -> u64 {
            h ^= x;
            h = h.wrapping_mul(0x100000001b3);
            h
        }

        let mut h = 0xcbf29ce484222325u64;
        h = mix(h, self.side_to_move.idx() as u64 + 1);
        for c in Color::BOTH {
            for side in CastleSide::BOTH {
                h = mix(h, self.castling.get(c, side).map_or(0xff, u64::from));
            }
        }
        if let Some(ep) = self.en_passant
            && self.en_passant_capturable(ep)
        {
            h = mix(h, 29 + ep as u64);
        }
        for (i, sq) in self.board.iter().enumerate() {
            let v = if let Some(pc) = sq {
                (i as u64) ^ ((pc.color.idx() as u64 + 1) << 6) ^ ((pc.kind.idx() as u64 + 1) << 8)
            } else {
                i as u64
            };
            h = mix(h, v);
        }
        h
    }

    /// A pawn of the side to move stands beside the pawn that just
    /// double-stepped past `ep`. Pins are not considered.
    fn en_passant_capturable(&self, ep: u8) -> bool {
        let us = self.side_to_move;
        let victim_rank = match us {
            Color::White => rank_of(ep) - 1,
            Color::Black => rank_of(ep) + 1,
        };
        [-1, 1].into_iter().any(|df| {
            sq(file_of(ep) + df, victim_rank)
                .and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.color == us && pc.kind == PieceKind::Pawn)
        })
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can ever deliver mate: bare kings, a single minor piece,
    /// or only bishops that all stand on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut bishops_light = 0;
        let mut bishops_dark = 0;
        for (i, pc) in self.board.iter().enumerate() {
            let Some(pc) = pc else { continue };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop if is_light_square(i as u8) => bishops_light += 1,
                PieceKind::Bishop => bishops_dark += 1,
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        match knights {
            0 => bishops_light == 0 || bishops_dark == 0,
            1 => bishops_light + bishops_dark == 0,
            _ => false,
        }
    }
}

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
