use super::*;
use crate::error::SelfPlayError;

const SAMPLE: &str = include_str!("../selfplay.toml");

#[test]
fn test_sample_config_parses() {
    let config = SelfPlayConfig::from_toml_str(SAMPLE).unwrap();
    assert_eq!(config.games, 10);
    assert_eq!(config.max_plies, 300);
    assert_eq!(config.seed, Some(960));
    assert_eq!(config.output, PathBuf::from("games.jsonl"));
    assert_eq!(config.start_index, None);
    assert_eq!(config.white.kind, PlayerKind::Classical);
    assert_eq!(config.black.move_time_ms, Some(500));
    assert_eq!(config.eval.rook_grace_plies, 20);
    config.validate().unwrap();
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = SelfPlayConfig::from_toml_str("").unwrap();
    assert_eq!(config, SelfPlayConfig::default());
    assert_eq!(config.eval, EvalWeights::default());
}

#[test]
fn test_partial_player_section() {
    let config = SelfPlayConfig::from_toml_str("[black]\nkind = \"random\"\n").unwrap();
    assert_eq!(config.black.kind, PlayerKind::Random);
    assert_eq!(config.black.depth, 3);
    assert_eq!(config.white, PlayerConfig::default());
}

#[test]
fn test_unknown_player_kind_is_rejected() {
    let err = SelfPlayConfig::from_toml_str("[white]\nkind = \"neural\"\n").unwrap_err();
    assert!(matches!(err, SelfPlayError::Config(_)));
}

#[test]
fn test_validate_rejects_bad_settings() {
    let mut config = SelfPlayConfig::default();
    config.white.depth = 0;
    assert!(matches!(
        config.validate(),
        Err(ChessError::IllegalConfiguration(_))
    ));

    let mut config = SelfPlayConfig::default();
    config.max_plies = 0;
    assert!(matches!(
        config.validate(),
        Err(ChessError::IllegalConfiguration(_))
    ));

    let config = SelfPlayConfig {
        start_index: Some(960),
        ..SelfPlayConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ChessError::InvalidPositionIndex(960))
    );
}

#[test]
fn test_player_labels() {
    let mut player = PlayerConfig::default();
    assert_eq!(player.label(), "classical-d3");
    player.move_time_ms = Some(250);
    assert_eq!(player.label(), "classical-d3-250ms");
    player.kind = PlayerKind::Random;
    assert_eq!(player.label(), "random");
}

#[test]
fn test_search_limits_follow_player() {
    let player = PlayerConfig {
        kind: PlayerKind::Classical,
        depth: 4,
        move_time_ms: Some(100),
    };
    let limits = player.search_limits().unwrap();
    assert_eq!(limits.depth, 4);
    assert_eq!(limits.move_time, Some(Duration::from_millis(100)));

    let engine = player.build_engine(EvalWeights::default(), None);
    assert_eq!(engine.name(), "Classical");
    let engine = PlayerConfig {
        kind: PlayerKind::Random,
        ..player
    }
    .build_engine(EvalWeights::default(), Some(1));
    assert_eq!(engine.name(), "Random");
}
