use std::time::Instant;

use rayon::prelude::*;

use chess960_core::{Position, perft, perft_divide};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 1_000_000;

/// (name, FEN, [(depth, nodes)]) reference counts.
const CASES: &[(&str, &str, &[(u8, u64)])] = &[
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[(1, 20), (2, 400), (3, 8_902), (4, 197_281), (5, 4_865_609)],
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[(1, 48), (2, 2_039), (3, 97_862), (4, 4_085_603)],
    ),
    (
        "position 3",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[(1, 14), (2, 191), (3, 2_812), (4, 43_238), (5, 674_624)],
    ),
    (
        "position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[(1, 6), (2, 264), (3, 9_467)],
    ),
    (
        "position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[(1, 44), (2, 1_486), (3, 62_379)],
    ),
    (
        "chess960 #1",
        "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9",
        &[(1, 21), (2, 528), (3, 12_189)],
    ),
];

#[test]
fn perft_reference_positions() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();

    CASES.par_iter().for_each(|(name, fen, depths)| {
        let case_start = Instant::now();
        let mut total_nodes = 0u64;

        for &(depth, expected) in depths.iter() {
            if !full && expected > NODE_LIMIT {
                eprintln!(
                    "Skipping depth {depth} for {name} (expected {expected} nodes), set {FULL_PERFT_ENV}=1 to run all."
                );
                continue;
            }
            let mut pos = Position::from_fen(fen).unwrap();
            let got = perft(&mut pos, depth);
            assert_eq!(
                got, expected,
                "Perft mismatch for {name} '{fen}' at depth {depth}"
            );
            total_nodes += got;
        }

        println!(
            "{name} done: total nodes {total_nodes}, elapsed {:.3?}",
            case_start.elapsed()
        );
    });
}

#[test]
fn perft_leaves_position_untouched() {
    let mut pos = Position::from_fen(CASES[1].1).unwrap();
    let before = pos.clone();
    perft(&mut pos, 3);
    assert_eq!(pos, before);
}

#[test]
fn perft_divide_sums_to_perft() {
    let mut pos = Position::chess960(0).unwrap();
    let divided = perft_divide(&mut pos, 3);
    let total: u64 = divided.iter().map(|(_, n)| n).sum();
    assert_eq!(total, perft(&mut pos, 3));
    assert_eq!(divided.len() as u64, perft(&mut pos, 1));
}

#[test]
fn perft_every_chess960_start_is_mirror_symmetric() {
    // No first move by White changes Black's options, so depth 2 is depth 1 squared.
    (0..960u16).into_par_iter().for_each(|index| {
        let mut pos = Position::chess960(index).unwrap();
        let d1 = perft(&mut pos, 1);
        let d2 = perft(&mut pos, 2);
        assert_eq!(d2, d1 * d1, "index {index}");
    });
}
