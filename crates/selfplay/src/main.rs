//! Self-play CLI
//!
//! Play engine-vs-engine Chess960 games and summarize the records.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chess960_core::{StartingPosition, legal_moves};
use clap::{Parser, Subcommand};
use selfplay::{MatchRunner, SelfPlayConfig, append_record, load_records, summarize};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "selfplay", version, about = "Chess960 engine self-play runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play the games described by a config file
    Play {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the number of games
        #[arg(short, long)]
        games: Option<u32>,
        /// Override the seed
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Summarize a JSON-lines record file
    Report { file: PathBuf },
    /// Show a Chess960 start position by index
    Position { index: u16 },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Play {
            config,
            games,
            seed,
        } => play(config, games, seed),
        Command::Report { file } => report(file),
        Command::Position { index } => show_position(index),
    }
}

fn play(path: PathBuf, games: Option<u32>, seed: Option<u64>) -> Result<()> {
    let mut config = SelfPlayConfig::load(&path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    if let Some(games) = games {
        config.games = games;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate().context("invalid config")?;

    let mut white = config.white.build_engine(config.eval, config.seed);
    let mut black = config
        .black
        .build_engine(config.eval, config.seed.map(|s| s.wrapping_add(1)));
    info!(
        games = config.games,
        white = %config.white.label(),
        black = %config.black.label(),
        output = %config.output.display(),
        "starting self-play"
    );

    let output = config.output.clone();
    let mut runner = MatchRunner::new(config);
    let records = runner
        .run_match(white.as_mut(), black.as_mut(), |record| {
            append_record(&output, record)
        })
        .context("self-play aborted")?;

    summarize(&records).print_report();
    Ok(())
}

fn report(path: PathBuf) -> Result<()> {
    let records =
        load_records(&path).with_context(|| format!("failed to read {}", path.display()))?;
    summarize(&records).print_report();
    Ok(())
}

fn show_position(index: u16) -> Result<()> {
    let start = StartingPosition::new(index)?;
    let pos = start.position();
    println!("{start}");
    println!("FEN: {}", pos.to_fen());
    println!("Legal moves: {}", legal_moves(&pos).len());
    Ok(())
}
