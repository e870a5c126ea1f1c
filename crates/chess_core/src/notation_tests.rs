use super::*;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn uci(p: &Position, txt: &str) -> Move {
    parse_uci_move(p, txt).unwrap_or_else(|| panic!("{txt} should parse"))
}

#[test]
fn test_uci_roundtrip_simple() {
    let p = Position::startpos();
    let mv = uci(&p, "e2e4");
    assert_eq!(mv.piece.kind, PieceKind::Pawn);
    assert_eq!(move_to_uci(&p, mv), "e2e4");
    assert!(parse_uci_move(&p, "e2e5").is_none());
    assert!(parse_uci_move(&p, "zz").is_none());
}

#[test]
fn test_uci_castling_king_takes_rook() {
    let p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let short = uci(&p, "e1h1");
    assert_eq!(short.castle_side(), Some(CastleSide::King));
    assert_eq!(move_to_uci(&p, short), "e1h1");

    // King destination is accepted too when no plain move matches.
    assert_eq!(uci(&p, "e1g1"), short);
    assert_eq!(uci(&p, "e1c1").castle_side(), Some(CastleSide::Queen));
}

#[test]
fn test_uci_plain_move_wins_over_castle_destination() {
    // Rook b1, king c1: "c1d1" is an ordinary king step, while castling
    // queenside is written king-onto-rook.
    let p = pos("4k3/8/8/8/8/8/8/1RK5 w B - 0 1");
    assert!(!uci(&p, "c1d1").is_castle());
    assert_eq!(uci(&p, "c1b1").castle_side(), Some(CastleSide::Queen));
}

#[test]
fn test_uci_promotion() {
    let p = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(uci(&p, "a7a8n").promo, Some(PieceKind::Knight));
    assert_eq!(uci(&p, "a7a8").promo, Some(PieceKind::Queen));
    assert!(parse_uci_move(&p, "a7a8k").is_none());
}

#[test]
fn test_san_basic() {
    let p = Position::startpos();
    assert_eq!(move_to_san(&p, uci(&p, "e2e4")), "e4");
    assert_eq!(move_to_san(&p, uci(&p, "g1f3")), "Nf3");
}

#[test]
fn test_san_castling_and_check() {
    let p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert_eq!(move_to_san(&p, uci(&p, "e1h1")), "O-O");
    assert_eq!(move_to_san(&p, uci(&p, "e1a1")), "O-O-O");
    assert_eq!(move_to_san(&p, uci(&p, "a1a8")), "Rxa8+");
}

#[test]
fn test_san_disambiguation() {
    let p = pos("4k3/8/8/8/8/8/4K3/R6R w - - 0 1");
    assert_eq!(move_to_san(&p, uci(&p, "a1d1")), "Rad1");
    let p = pos("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
    assert_eq!(move_to_san(&p, uci(&p, "a1a3")), "R1a3");
}

#[test]
fn test_san_mate_and_promotion() {
    let p = pos("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1");
    assert_eq!(move_to_san(&p, uci(&p, "a1a8")), "Ra8#");

    let p = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(move_to_san(&p, uci(&p, "a7a8q")), "a8=Q+");
    assert_eq!(move_to_san(&p, uci(&p, "a7a8n")), "a8=N");
}

#[test]
fn test_san_pawn_capture() {
    let p = pos("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
    assert_eq!(move_to_san(&p, uci(&p, "e4d5")), "exd5");
}
