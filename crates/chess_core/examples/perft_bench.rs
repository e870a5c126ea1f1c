//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p chess960_core -- [depth] [index|fen]
//!
//! Examples:
//!   # Default: depth 4 over a spread of Chess960 starts
//!   cargo flamegraph --example perft_bench -p chess960_core
//!
//!   # One Chess960 start by index
//!   cargo flamegraph --example perft_bench -p chess960_core -- 5 518
//!
//!   # Custom position
//!   cargo flamegraph --example perft_bench -p chess960_core -- 4 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"

use chess960_core::{Position, StartingPosition, perft};
use std::env;
use std::time::{Duration, Instant};

const SAMPLE_INDICES: &[u16] = &[0, 100, 259, 518, 700, 959];

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    match args.get(2) {
        Some(arg) => {
            let pos = match arg.parse::<u16>() {
                Ok(index) => Position::chess960(index),
                Err(_) => Position::from_fen(arg),
            };
            match pos {
                Ok(pos) => {
                    run(arg, pos, depth);
                }
                Err(e) => eprintln!("{e}"),
            }
        }
        None => {
            println!("=== Perft Benchmark Suite (depth {depth}) ===");
            let mut total_nodes = 0u64;
            let mut total_time = Duration::ZERO;
            for &index in SAMPLE_INDICES {
                let Ok(start) = StartingPosition::new(index) else {
                    continue;
                };
                let (nodes, elapsed) = run(&start.to_string(), start.position(), depth);
                total_nodes += nodes;
                total_time += elapsed;
            }
            println!("{:=<70}", "");
            println!(
                "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
                nps(total_nodes, total_time)
            );
        }
    }
}

fn run(label: &str, mut pos: Position, depth: u8) -> (u64, Duration) {
    let start = Instant::now();
    let nodes = perft(&mut pos, depth);
    let elapsed = start.elapsed();
    println!(
        "{label:.<30} {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
        nps(nodes, elapsed)
    );
    (nodes, elapsed)
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}
