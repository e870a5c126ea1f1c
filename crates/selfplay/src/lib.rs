//! Self-play runner for the Chess960 engines
//!
//! This crate provides infrastructure for:
//! - Playing engine-vs-engine games from Chess960 starts
//! - Persisting one record per finished game as JSON lines
//! - Summarizing record files (outcomes, win rates, decision times)
//!
//! # Usage
//!
//! ```bash
//! # Play the games described by a config file
//! cargo run -p selfplay -- play --config crates/selfplay/selfplay.toml
//!
//! # Summarize the records written so far
//! cargo run -p selfplay -- report games.jsonl
//! ```

mod config;
mod error;
mod match_runner;
mod results;

pub use config::*;
pub use error::*;
pub use match_runner::*;
pub use results::*;
