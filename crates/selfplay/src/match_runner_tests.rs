use super::*;
use crate::config::{PlayerConfig, PlayerKind};
use crate::results::Outcome;
use random_engine::RandomEngine;

fn random_player() -> PlayerConfig {
    PlayerConfig {
        kind: PlayerKind::Random,
        ..PlayerConfig::default()
    }
}

fn config(games: u32, max_plies: u32, seed: u64) -> SelfPlayConfig {
    SelfPlayConfig {
        games,
        max_plies,
        seed: Some(seed),
        white: random_player(),
        black: random_player(),
        ..SelfPlayConfig::default()
    }
}

#[test]
fn test_short_games_are_adjudicated() {
    // No start allows a result within two plies
    let mut runner = MatchRunner::new(config(3, 2, 11));
    let mut white = RandomEngine::seeded(1);
    let mut black = RandomEngine::seeded(2);

    let mut seen = 0;
    let records = runner
        .run_match(&mut white, &mut black, |_| {
            seen += 1;
            Ok(())
        })
        .unwrap();

    assert_eq!(seen, 3);
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.outcome, Outcome::Adjudicated);
        assert_eq!(record.move_count, 2);
        assert_eq!(record.moves.len(), 2);
        assert_eq!(record.winner, None);
        assert!(record.starting_position.is_some_and(|s| s.index < 960));
        assert_eq!(record.white, "random");
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let play = || {
        let mut runner = MatchRunner::new(config(2, 60, 42));
        let mut white = RandomEngine::seeded(3);
        let mut black = RandomEngine::seeded(4);
        runner.run_match(&mut white, &mut black, |_| Ok(())).unwrap()
    };
    let (a, b) = (play(), play());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.starting_position, y.starting_position);
        assert_eq!(x.moves, y.moves);
        assert_eq!(x.outcome, y.outcome);
        assert_ne!(x.game_id, y.game_id);
    }
}

#[test]
fn test_fixed_start_index() {
    let mut cfg = config(1, 6, 5);
    cfg.start_index = Some(518);
    let mut runner = MatchRunner::new(cfg);
    let mut white = RandomEngine::seeded(5);
    let mut black = RandomEngine::seeded(6);
    let record = runner.play_game(&mut white, &mut black).unwrap();
    assert_eq!(record.starting_position.map(|s| s.code()).as_deref(), Some("RNBQKBNR"));
}

#[test]
fn test_classical_against_random() {
    let mut cfg = config(1, 40, 9);
    cfg.white = PlayerConfig {
        kind: PlayerKind::Classical,
        depth: 1,
        move_time_ms: None,
    };
    let mut runner = MatchRunner::new(cfg.clone());
    let mut white = cfg.white.build_engine(cfg.eval, None);
    let mut black = cfg.black.build_engine(cfg.eval, Some(10));

    let record = runner.play_game(white.as_mut(), black.as_mut()).unwrap();
    assert!(record.move_count <= 40);
    assert_eq!(record.moves.len(), record.move_count);
    assert_eq!(record.white, "classical-d1");
    if record.outcome == Outcome::Adjudicated {
        assert_eq!(record.move_count, 40);
    }
    if record.outcome != Outcome::Checkmate {
        assert_eq!(record.winner, None);
    }
}
