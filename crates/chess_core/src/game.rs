//! Game state management: turn sequencing, undo/redo and terminal detection.
//!
//! `Game` owns the only mutable [`Position`] of a game. Every mutation goes
//! through `&mut self`, so a presentation layer running on another thread
//! has to serialize access (for example by holding the game in a `Mutex`).

use rand::Rng;
use tracing::debug;

use crate::{
    board::Position,
    chess960::StartingPosition,
    error::{ChessError, ChessResult},
    movegen::{legal_moves, legal_moves_from},
    notation::{move_to_san, move_to_uci, parse_uci_move},
    status::{GameStatus, status_with_history},
    types::*,
};

/// A move that was played, with the position it was played from.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    pub mv: Move,
    /// Standard Algebraic Notation representation
    pub san: String,
    pub before: Position,
}

/// Outcome of [`Game::propose_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proposal {
    Applied(GameStatus),
    /// The move promotes; call [`Game::resolve_promotion`] with the piece.
    PendingPromotion { from: u8, to: u8 },
}

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    start: Option<StartingPosition>,
    status: GameStatus,
    moves: Vec<MoveRecord>,
    redo_stack: Vec<Move>,
    /// Position keys for threefold repetition, one per position reached.
    position_history: Vec<u64>,
    pending_promotion: Option<(u8, u8)>,
}

impl Game {
    /// New game from Chess960 index `0..960`.
    pub fn new(index: u16) -> ChessResult<Self> {
        let start = StartingPosition::new(index)?;
        Ok(Self::with_start(start.position(), Some(start)))
    }

    /// New game from a uniformly random Chess960 index.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (position, start) = Position::chess960_random(rng);
        Self::with_start(position, Some(start))
    }

    /// Game continuing from an arbitrary position (e.g. parsed from FEN).
    pub fn from_position(position: Position) -> ChessResult<Self> {
        position.validate()?;
        Ok(Self::with_start(position, None))
    }

    fn with_start(position: Position, start: Option<StartingPosition>) -> Self {
        let initial_hash = position.position_key();
        let mut game = Self {
            position,
            start,
            status: GameStatus::InProgress,
            moves: Vec::new(),
            redo_stack: Vec::new(),
            position_history: vec![initial_hash],
            pending_promotion: None,
        };
        game.refresh_status();
        game
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
    pub fn status(&self) -> GameStatus {
        self.status
    }
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }
    pub fn starting_position(&self) -> Option<StartingPosition> {
        self.start
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.moves
    }
    pub fn san_history(&self) -> Vec<&str> {
        self.moves.iter().map(|r| r.san.as_str()).collect()
    }
    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().map(|r| r.mv)
    }
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }
    pub fn can_undo(&self) -> bool {
        !self.moves.is_empty()
    }
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
    /// Repetition keys of every position reached, current one last.
    pub fn position_keys(&self) -> &[u64] {
        &self.position_history
    }
    pub fn pending_promotion(&self) -> Option<(u8, u8)> {
        self.pending_promotion
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves(&self.position)
    }

    /// Legal moves of the piece on `from`, for highlighting.
    pub fn legal_moves_from(&self, from: u8) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves_from(&self.position, from)
    }

    /// Plays a move from the current legal set. Clears the redo stack.
    pub fn apply_move(&mut self, mv: Move) -> ChessResult<GameStatus> {
        self.ensure_playable()?;
        let status = self.play(mv)?;
        self.redo_stack.clear();
        Ok(status)
    }

    /// First phase of square-based move entry. Promotions are held back
    /// until [`Game::resolve_promotion`] names the piece.
    pub fn propose_move(&mut self, from: u8, to: u8) -> ChessResult<Proposal> {
        self.ensure_playable()?;
        let promotes = legal_moves_from(&self.position, from)
            .iter()
            .any(|m| m.to == to && m.is_promotion());
        if promotes {
            self.pending_promotion = Some((from, to));
            debug!(from = %sq_to_coord(from), to = %sq_to_coord(to), "promotion pending");
            return Ok(Proposal::PendingPromotion { from, to });
        }

        let text = format!("{}{}", sq_to_coord(from), sq_to_coord(to));
        let mv = parse_uci_move(&self.position, &text)
            .ok_or_else(|| ChessError::InvalidMove(text.clone()))?;
        self.apply_move(mv).map(Proposal::Applied)
    }

    /// Second phase of a promotion: completes the pending move with `kind`.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> ChessResult<GameStatus> {
        let (from, to) = self
            .pending_promotion
            .ok_or(ChessError::NoPendingPromotion)?;
        let mv = legal_moves_from(&self.position, from)
            .into_iter()
            .find(|m| m.to == to && m.promo == Some(kind))
            .ok_or_else(|| {
                ChessError::InvalidMove(format!(
                    "{}{} cannot promote to {kind:?}",
                    sq_to_coord(from),
                    sq_to_coord(to)
                ))
            })?;
        self.pending_promotion = None;
        self.apply_move(mv)
    }

    /// Drops a pending promotion. Returns whether one was pending.
    pub fn cancel_promotion(&mut self) -> bool {
        self.pending_promotion.take().is_some()
    }

    /// Takes back the last move. Allowed from a finished game, which then
    /// resumes.
    pub fn undo(&mut self) -> ChessResult<Move> {
        if self.pending_promotion.is_some() {
            return Err(ChessError::PromotionPending);
        }
        let record = self.moves.pop().ok_or(ChessError::NoHistory("undo"))?;
        self.position = record.before;
        self.position_history.pop();
        self.redo_stack.push(record.mv);
        self.refresh_status();
        debug!(san = %record.san, "undid move");
        Ok(record.mv)
    }

    /// Replays the most recently undone move.
    pub fn redo(&mut self) -> ChessResult<GameStatus> {
        self.ensure_playable()?;
        let mv = *self.redo_stack.last().ok_or(ChessError::NoHistory("redo"))?;
        let status = self.play(mv)?;
        self.redo_stack.pop();
        Ok(status)
    }

    fn ensure_playable(&self) -> ChessResult<()> {
        if self.pending_promotion.is_some() {
            return Err(ChessError::PromotionPending);
        }
        if self.is_over() {
            return Err(ChessError::GameOver);
        }
        Ok(())
    }

    fn play(&mut self, mv: Move) -> ChessResult<GameStatus> {
        if !legal_moves(&self.position).contains(&mv) {
            return Err(ChessError::InvalidMove(move_to_uci(&self.position, mv)));
        }

        // Generate SAN before making the move
        let san = move_to_san(&self.position, mv);
        let before = self.position.clone();
        self.position.make_move(mv);
        self.moves.push(MoveRecord { mv, san, before });

        // Add position hash to history for repetition detection
        self.position_history.push(self.position.position_key());

        self.refresh_status();
        debug!(
            ply = self.moves.len(),
            san = %self.moves[self.moves.len() - 1].san,
            status = %self.status,
            "applied move"
        );
        Ok(self.status)
    }

    fn refresh_status(&mut self) {
        self.status = status_with_history(&self.position, &self.position_history);
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
