//! Chess960 starting positions.
//!
//! Positions are numbered 0..960 with the Scharnagl scheme, built directly
//! (no rejection sampling):
//! - light-square bishop on b/d/f/h     => index % 4
//! - dark-square bishop on a/c/e/g      => (index / 4) % 4
//! - queen on one of the 6 free files   => (index / 16) % 6
//! - knight pair among the 5 free files => index / 96, lexicographic pairs
//! - the last three files get rook, king, rook in that order, so the king
//!   always stands between the rooks.
//!
//! Index 518 is the classical array `RNBQKBNR`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{CastlingRights, Position};
use crate::error::{ChessError, ChessResult};
use crate::types::*;

pub const POSITION_COUNT: u16 = 960;
pub const STANDARD_INDEX: u16 = 518;

pub const STANDARD_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Knight placements among five free files, in lexicographic order.
const KNIGHT_PAIRS: [(usize, usize); 10] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (1, 2),
    (1, 3),
    (1, 4),
    (2, 3),
    (2, 4),
    (3, 4),
];

/// Back-rank arrangement (file a first) for a Chess960 index.
pub fn back_rank(index: u16) -> ChessResult<[PieceKind; 8]> {
    if index >= POSITION_COUNT {
        return Err(ChessError::InvalidPositionIndex(index));
    }
    let n = index as usize;
    let mut slots: [Option<PieceKind>; 8] = [None; 8];

    slots[(n % 4) * 2 + 1] = Some(PieceKind::Bishop);
    slots[((n / 4) % 4) * 2] = Some(PieceKind::Bishop);

    let free = free_files(&slots);
    slots[free[(n / 16) % 6]] = Some(PieceKind::Queen);

    let free = free_files(&slots);
    let (a, b) = KNIGHT_PAIRS[n / 96];
    slots[free[a]] = Some(PieceKind::Knight);
    slots[free[b]] = Some(PieceKind::Knight);

    let free = free_files(&slots);
    slots[free[0]] = Some(PieceKind::Rook);
    slots[free[1]] = Some(PieceKind::King);
    slots[free[2]] = Some(PieceKind::Rook);

    Ok(slots.map(|s| s.expect("every file filled")))
}

fn free_files(slots: &[Option<PieceKind>; 8]) -> Vec<usize> {
    (0..8).filter(|&f| slots[f].is_none()).collect()
}

/// Inverse of [`back_rank`].
pub fn index_of(back: &[PieceKind; 8]) -> Option<u16> {
    (0..POSITION_COUNT).find(|&i| back_rank(i).is_ok_and(|b| &b == back))
}

pub fn random_index<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.gen_range(0..POSITION_COUNT)
}

/// Identifies the starting array a game was played from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingPosition {
    pub index: u16,
    pub back_rank: [PieceKind; 8],
}

impl StartingPosition {
    pub fn new(index: u16) -> ChessResult<Self> {
        Ok(Self {
            index,
            back_rank: back_rank(index)?,
        })
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let index = random_index(rng);
        Self {
            index,
            back_rank: back_rank(index).expect("random index within range"),
        }
    }

    /// Back rank as letters, e.g. `RNBQKBNR`.
    pub fn code(&self) -> String {
        self.back_rank.iter().map(|k| k.letter()).collect()
    }

    pub fn position(&self) -> Position {
        position_from_back_rank(&self.back_rank)
    }
}

impl fmt::Display for StartingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index, self.code())
    }
}

/// Full initial position for a back rank: mirrored pieces, pawns on ranks
/// 2 and 7, castling rights on both rook files.
pub(crate) fn position_from_back_rank(back: &[PieceKind; 8]) -> Position {
    let mut p = Position::empty();
    let mut rook_files = Vec::with_capacity(2);
    for (f, &kind) in back.iter().enumerate() {
        p.board[f] = Some(Piece::new(Color::White, kind));
        p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
        p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        if kind == PieceKind::Rook {
            rook_files.push(f as u8);
        }
    }
    // Rooks are listed by file, so the first is the queen-side one.
    p.castling = CastlingRights::both(rook_files[0], rook_files[1]);
    let mask = (1u8 << rook_files[0]) | (1u8 << rook_files[1]);
    p.unmoved_rooks = [mask, mask];
    p
}

impl Position {
    /// Initial position for Chess960 index `0..960`.
    pub fn chess960(index: u16) -> ChessResult<Self> {
        Ok(StartingPosition::new(index)?.position())
    }

    /// Uniformly random Chess960 start; seed the generator for reproducible runs.
    pub fn chess960_random<R: Rng + ?Sized>(rng: &mut R) -> (Self, StartingPosition) {
        let start = StartingPosition::random(rng);
        tracing::debug!(index = start.index, back_rank = %start.code(), "generated Chess960 start");
        (start.position(), start)
    }
}
