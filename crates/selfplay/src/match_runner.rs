//! Match runner for playing games between engines

use std::time::Instant;

use chess960_core::{Color, Engine, Game};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::SelfPlayConfig;
use crate::error::Result;
use crate::results::GameRecord;

/// Plays configured games and turns them into records
pub struct MatchRunner {
    config: SelfPlayConfig,
    rng: StdRng,
}

impl MatchRunner {
    pub fn new(config: SelfPlayConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play a single game to its end or to the ply limit.
    pub fn play_game(
        &mut self,
        white: &mut dyn Engine,
        black: &mut dyn Engine,
    ) -> Result<GameRecord> {
        let mut game = match self.config.start_index {
            Some(index) => Game::new(index)?,
            None => Game::random(&mut self.rng),
        };
        white.new_game();
        black.new_game();

        let max_plies = self.config.max_plies as usize;
        let mut decision_times = Vec::new();
        let mut adjudicated = false;

        while !game.is_over() {
            if game.ply_count() >= max_plies {
                warn!(plies = game.ply_count(), "ply limit reached, adjudicating");
                adjudicated = true;
                break;
            }

            let (engine, player): (&mut dyn Engine, _) = match game.side_to_move() {
                Color::White => (&mut *white, &self.config.white),
                Color::Black => (&mut *black, &self.config.black),
            };
            // Fresh limits per move so a timed search gets its own budget
            let limits = player.search_limits()?;
            engine.set_position_history(game.position_keys());

            let started = Instant::now();
            let result = engine.search(game.position(), &limits)?;
            decision_times.push(started.elapsed());

            debug!(
                engine = engine.name(),
                score = result.score,
                depth = result.depth,
                nodes = result.nodes,
                "move chosen"
            );
            game.apply_move(result.best_move)?;
        }

        let record = GameRecord::from_game(
            &game,
            &self.config.white.label(),
            &self.config.black.label(),
            &decision_times,
            adjudicated,
        );
        info!(
            start = record.starting_position.map(|s| s.index),
            outcome = record.outcome.label(),
            winner = ?record.winner,
            plies = record.move_count,
            "game finished"
        );
        Ok(record)
    }

    /// Play `config.games` games, handing each record to `on_game` as it finishes.
    pub fn run_match<F>(
        &mut self,
        white: &mut dyn Engine,
        black: &mut dyn Engine,
        mut on_game: F,
    ) -> Result<Vec<GameRecord>>
    where
        F: FnMut(&GameRecord) -> Result<()>,
    {
        let mut records = Vec::with_capacity(self.config.games as usize);
        for game_num in 0..self.config.games {
            let record = self.play_game(white, black)?;
            info!(
                game = game_num + 1,
                total = self.config.games,
                id = %record.game_id,
                "recorded"
            );
            on_game(&record)?;
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
