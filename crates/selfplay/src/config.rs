//! Self-play configuration, read from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chess960_core::{
    ChessError, ChessResult, Engine, EvalWeights, POSITION_COUNT, SearchLimits,
};
use classical_engine::ClassicalEngine;
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which engine plays a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Classical,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub kind: PlayerKind,
    /// Search depth in plies
    pub depth: u8,
    /// Per-move budget; enables iterative deepening when set
    pub move_time_ms: Option<u64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            kind: PlayerKind::Classical,
            depth: 3,
            move_time_ms: None,
        }
    }
}

impl PlayerConfig {
    /// Fresh limits for one move (each search restarts its own clock).
    pub fn search_limits(&self) -> ChessResult<SearchLimits> {
        SearchLimits::new(self.depth, self.move_time_ms.map(Duration::from_millis))
    }

    pub fn build_engine(&self, weights: EvalWeights, seed: Option<u64>) -> Box<dyn Engine> {
        match self.kind {
            PlayerKind::Classical => Box::new(ClassicalEngine::with_weights(weights)),
            PlayerKind::Random => Box::new(seed.map(RandomEngine::seeded).unwrap_or_default()),
        }
    }

    /// Short name used in game records, e.g. `classical-d3`.
    pub fn label(&self) -> String {
        match (self.kind, self.move_time_ms) {
            (PlayerKind::Random, _) => "random".to_string(),
            (PlayerKind::Classical, None) => format!("classical-d{}", self.depth),
            (PlayerKind::Classical, Some(ms)) => format!("classical-d{}-{ms}ms", self.depth),
        }
    }
}

/// Configuration for a self-play run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    /// Number of games to play
    pub games: u32,
    /// Plies after which an unfinished game is adjudicated
    pub max_plies: u32,
    /// Seed for start positions and random players; entropy when absent
    pub seed: Option<u64>,
    /// JSON-lines file the records are appended to
    pub output: PathBuf,
    /// Fixed Chess960 start index; a random start per game when absent
    pub start_index: Option<u16>,
    pub white: PlayerConfig,
    pub black: PlayerConfig,
    pub eval: EvalWeights,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_plies: 300,
            seed: None,
            output: PathBuf::from("games.jsonl"),
            start_index: None,
            white: PlayerConfig::default(),
            black: PlayerConfig::default(),
            eval: EvalWeights::default(),
        }
    }
}

impl SelfPlayConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Rejects settings no game could be played with.
    pub fn validate(&self) -> ChessResult<()> {
        self.white.search_limits()?;
        self.black.search_limits()?;
        if self.max_plies == 0 {
            return Err(ChessError::IllegalConfiguration(
                "max_plies must be at least 1".into(),
            ));
        }
        if let Some(index) = self.start_index
            && index >= POSITION_COUNT
        {
            return Err(ChessError::InvalidPositionIndex(index));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
