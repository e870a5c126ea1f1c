//! Game records: JSON-lines storage and reporting

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::Duration;

use chess960_core::{Color, DrawReason, Game, GameStatus, StartingPosition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SelfPlayError};

/// How a recorded game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Checkmate,
    Stalemate,
    Draw,
    /// Stopped at the ply limit without a result.
    Adjudicated,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Checkmate => "checkmate",
            Outcome::Stalemate => "stalemate",
            Outcome::Draw => "draw",
            Outcome::Adjudicated => "adjudicated",
        }
    }
}

/// One row per finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: Uuid,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_reason: Option<DrawReason>,
    pub winner: Option<Color>,
    /// Plies played
    pub move_count: usize,
    pub avg_decision_time_ms: f64,
    /// Chess960 start (index and back rank), absent for games started
    /// from an arbitrary position
    pub starting_position: Option<StartingPosition>,
    pub timestamp: DateTime<Utc>,
    pub white: String,
    pub black: String,
    #[serde(default)]
    pub moves: Vec<String>,
}

impl GameRecord {
    /// Record for a finished (or abandoned, when `adjudicated`) game.
    pub fn from_game(
        game: &Game,
        white: &str,
        black: &str,
        decision_times: &[Duration],
        adjudicated: bool,
    ) -> Self {
        let status = game.status();
        let (outcome, draw_reason) = match status {
            _ if adjudicated => (Outcome::Adjudicated, None),
            GameStatus::Checkmate { .. } => (Outcome::Checkmate, None),
            GameStatus::Stalemate => (Outcome::Stalemate, None),
            GameStatus::Draw(reason) => (Outcome::Draw, Some(reason)),
            GameStatus::InProgress => (Outcome::Adjudicated, None),
        };

        let avg_decision_time_ms = if decision_times.is_empty() {
            0.0
        } else {
            let total: Duration = decision_times.iter().sum();
            total.as_secs_f64() * 1000.0 / decision_times.len() as f64
        };

        Self {
            game_id: Uuid::new_v4(),
            outcome,
            draw_reason,
            winner: status.winner(),
            move_count: game.ply_count(),
            avg_decision_time_ms,
            starting_position: game.starting_position(),
            timestamp: Utc::now(),
            white: white.to_string(),
            black: black.to_string(),
            moves: game.san_history().into_iter().map(String::from).collect(),
        }
    }

    /// Player label of the winner, if any.
    pub fn winner_name(&self) -> Option<&str> {
        self.winner.map(|c| match c {
            Color::White => self.white.as_str(),
            Color::Black => self.black.as_str(),
        })
    }
}

/// Appends one record as a JSON line, creating the file if needed.
pub fn append_record(path: &Path, record: &GameRecord) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let line = serde_json::to_string(record)?;
    writeln!(file, "{line}")?;
    Ok(())
}

/// Loads every record of a JSON-lines file, skipping blank lines.
pub fn load_records(path: &Path) -> Result<Vec<GameRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| SelfPlayError::Record {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Aggregates over a set of game records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_games: usize,
    /// Games that reached a result (not adjudicated)
    pub completed_games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    /// Mean over games of each game's average decision time
    pub avg_decision_time_ms: f64,
    pub outcomes: BTreeMap<Outcome, usize>,
    /// Games played and won, per player label
    pub players: BTreeMap<String, PlayerStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub games: usize,
    pub wins: usize,
}

impl PlayerStats {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

pub fn summarize(records: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        total_games: records.len(),
        ..Summary::default()
    };

    let mut time_total = 0.0;
    for record in records {
        *summary.outcomes.entry(record.outcome).or_default() += 1;
        if record.outcome != Outcome::Adjudicated {
            summary.completed_games += 1;
        }
        match record.winner {
            Some(Color::White) => summary.white_wins += 1,
            Some(Color::Black) => summary.black_wins += 1,
            None => summary.draws += 1,
        }
        time_total += record.avg_decision_time_ms;

        // A player facing itself counts the game once.
        summary.players.entry(record.white.clone()).or_default().games += 1;
        if record.black != record.white {
            summary.players.entry(record.black.clone()).or_default().games += 1;
        }
        if let Some(name) = record.winner_name() {
            summary.players.entry(name.to_string()).or_default().wins += 1;
        }
    }
    if !records.is_empty() {
        summary.avg_decision_time_ms = time_total / records.len() as f64;
    }
    summary
}

impl Summary {
    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Self-play summary ===\n\n");
        report.push_str(&format!(
            "Games: {} total, {} completed\n",
            self.total_games, self.completed_games
        ));
        report.push_str(&format!(
            "White wins: {}, Black wins: {}, Draws/unfinished: {}\n",
            self.white_wins, self.black_wins, self.draws
        ));
        report.push_str(&format!(
            "Average decision time: {:.1} ms\n\n",
            self.avg_decision_time_ms
        ));

        report.push_str("Outcomes:\n");
        for (outcome, count) in &self.outcomes {
            report.push_str(&format!("  {:<12} {:>5}\n", outcome.label(), count));
        }

        report.push('\n');
        report.push_str(&format!(
            "{:<24} {:>6} {:>6} {:>8}\n",
            "Player", "Games", "Wins", "Win %"
        ));
        report.push_str(&"-".repeat(47));
        report.push('\n');
        for (name, stats) in &self.players {
            report.push_str(&format!(
                "{:<24} {:>6} {:>6} {:>7.1}%\n",
                name,
                stats.games,
                stats.wins,
                stats.win_rate() * 100.0
            ));
        }
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
