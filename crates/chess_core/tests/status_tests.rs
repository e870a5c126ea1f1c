//! Terminal-state detection through the public API:
//! - Checkmate
//! - Stalemate
//! - Fifty-move rule
//! - Threefold repetition
//! - Insufficient material

use chess960_core::{
    Color, DrawReason, GameStatus, Position, parse_uci_move, position_status, status_with_history,
};

fn status(fen: &str) -> GameStatus {
    position_status(&Position::from_fen(fen).unwrap())
}

// =============================================================================
// Checkmate / Stalemate
// =============================================================================

#[test]
fn test_scholars_mate_is_checkmate() {
    let s = status("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert_eq!(s, GameStatus::Checkmate { winner: Color::White });
    assert_eq!(s.winner(), Some(Color::White));
    assert_eq!(s.label(), "checkmate");
}

#[test]
fn test_check_is_not_checkmate() {
    let s = status("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    assert_eq!(s, GameStatus::InProgress);
}

#[test]
fn test_stalemate_king_in_corner() {
    // Black king in corner, white queen stalemates
    assert_eq!(status("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    assert_eq!(status("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
}

#[test]
fn test_mate_takes_precedence_over_fifty_moves() {
    let s = status("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 100 60");
    assert!(matches!(s, GameStatus::Checkmate { .. }));
}

// =============================================================================
// Fifty-Move Rule
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    assert_eq!(
        status("8/8/8/4k3/8/4K3/4P3/8 w - - 100 60"),
        GameStatus::Draw(DrawReason::FiftyMoveRule)
    );
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves() {
    assert_eq!(status("8/8/8/4k3/8/4K3/4P3/8 w - - 99 60"), GameStatus::InProgress);
}

// =============================================================================
// Threefold Repetition
// =============================================================================

#[test]
fn test_threefold_needs_three_occurrences() {
    let pos = Position::from_fen(
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    )
    .unwrap();
    let other = Position::startpos().position_key();
    let key = pos.position_key();

    let twice = [key, other, key];
    assert_eq!(status_with_history(&pos, &twice), GameStatus::InProgress);

    let thrice = [key, other, key, other, key];
    assert_eq!(
        status_with_history(&pos, &thrice),
        GameStatus::Draw(DrawReason::ThreefoldRepetition)
    );
}

#[test]
fn test_castling_rights_distinguish_repetitions() {
    let a = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    let b = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1").unwrap();
    assert_ne!(a.position_key(), b.position_key());
}

#[test]
fn test_en_passant_distinguishes_repetitions() {
    // Black's d4 pawn can take on e3, so the target matters.
    let a = Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
        .unwrap();
    let b = Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
        .unwrap();
    assert_ne!(a.position_key(), b.position_key());
}

#[test]
fn test_uncapturable_en_passant_is_ignored() {
    let a = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
        .unwrap();
    let b = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
        .unwrap();
    assert_eq!(a.position_key(), b.position_key());
}

#[test]
fn test_repetition_counts_position_after_double_push() {
    // 1. e4 Nf6 2. Nf3 Ng8 3. Ng1 Nf6 4. Nf3 Ng8 5. Ng1: the position after
    // 1. e4 recurs for the third time, even though only the first one had an
    // en-passant target.
    let mut pos = Position::startpos();
    let mut keys = vec![pos.position_key()];
    for uci in [
        "e2e4", "g8f6", "g1f3", "f6g8", "f3g1", "g8f6", "g1f3", "f6g8", "f3g1",
    ] {
        let mv = parse_uci_move(&pos, uci).unwrap();
        pos.make_move(mv);
        keys.push(pos.position_key());
    }
    assert_eq!(
        status_with_history(&pos, &keys),
        GameStatus::Draw(DrawReason::ThreefoldRepetition)
    );
}

// =============================================================================
// Insufficient Material
// =============================================================================

#[test]
fn test_insufficient_material_draws() {
    for fen in [
        "8/8/8/4k3/8/4K3/8/8 w - - 0 1",
        "8/8/8/4k3/8/4KB2/8/8 w - - 0 1",
        "8/8/4n3/4k3/8/4K3/8/8 w - - 0 1",
        // Both bishops on dark squares (f8 and c1).
        "5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
    ] {
        assert_eq!(
            status(fen),
            GameStatus::Draw(DrawReason::InsufficientMaterial),
            "{fen}"
        );
    }
}

#[test]
fn test_sufficient_material_plays_on() {
    for fen in [
        "2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",
        "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1",
    ] {
        assert_eq!(status(fen), GameStatus::InProgress, "{fen}");
    }
}
