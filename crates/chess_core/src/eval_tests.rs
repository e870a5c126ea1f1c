use super::*;
use crate::chess960::POSITION_COUNT;

#[test]
fn test_every_start_is_balanced() {
    for index in 0..POSITION_COUNT {
        let pos = Position::chess960(index).unwrap();
        assert_eq!(evaluate(&pos, Color::White), 0, "index {index}");
    }
}

#[test]
fn test_zero_sum() {
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
        .unwrap();
    let eval = Evaluator::default();
    assert_eq!(
        eval.evaluate(&pos, Color::White),
        -eval.evaluate(&pos, Color::Black)
    );
}

#[test]
fn test_material_counts() {
    // White is a knight up: 300.
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/3NK3 w - - 0 1").unwrap();
    assert_eq!(evaluate(&pos, Color::White), 300);
    assert_eq!(evaluate(&pos, Color::Black), -300);
}

#[test]
fn test_bishop_pair_bonus() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1").unwrap();
    assert_eq!(evaluate(&pos, Color::White), 2 * 325 + 50);

    let single = Position::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
    assert_eq!(evaluate(&single, Color::White), 325);
}

#[test]
fn test_unmoved_rook_penalty() {
    // White keeps castling rights on both rooks, black has none.
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert_eq!(evaluate(&pos, Color::White), -60);
}

#[test]
fn test_rook_grace_period() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQ - 0 3").unwrap();
    assert_eq!(pos.ply(), 4);

    let lenient = Evaluator::new(EvalWeights {
        rook_grace_plies: 10,
        ..EvalWeights::default()
    });
    assert_eq!(lenient.evaluate(&pos, Color::White), 0);

    let strict = Evaluator::new(EvalWeights {
        rook_grace_plies: 4,
        ..EvalWeights::default()
    });
    assert_eq!(strict.evaluate(&pos, Color::White), -60);
}
