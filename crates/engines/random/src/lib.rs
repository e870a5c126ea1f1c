//! Random Move Chess Engine
//!
//! Selects moves uniformly at random from all legal moves. Serves as the
//! baseline opponent in self-play and as a fallback when no search is
//! configured. Seed it for reproducible games.

use std::time::Instant;

use chess960_core::{
    ChessError, ChessResult, Engine, Position, SearchLimits, SearchResult, legal_moves_into,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;


/// A chess engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    /// Engine seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine whose choices repeat for the same seed and positions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, pos: &Position, limits: &SearchLimits) -> ChessResult<SearchResult> {
        limits.validate()?;
        let started = Instant::now();

        let mut pos_copy = pos.clone();
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut pos_copy, &mut moves);

        let best_move = *moves.choose(&mut self.rng).ok_or(ChessError::GameOver)?;

        Ok(SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: 1,
            elapsed: started.elapsed(),
            stopped: false,
        })
    }

    fn name(&self) -> &str {
        "Random"
    }
}
