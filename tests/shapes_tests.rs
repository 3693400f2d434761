//! Shape catalog and piece tests

use blockfall::core::{mask_cells, rotation_states, Piece, PieceGenerator};
use blockfall::types::{RotationDirection, ShapeKind, MINOS_PER_PIECE};

// ============== Catalog ==============

#[test]
fn test_s_piece_states() {
    let states = rotation_states(ShapeKind::S);
    let flat: Vec<_> = mask_cells(&states[0]).collect();
    assert_eq!(flat, vec![(2, 2), (3, 2), (1, 3), (2, 3)]);
    let upright: Vec<_> = mask_cells(&states[1]).collect();
    assert_eq!(upright, vec![(2, 1), (2, 2), (3, 2), (3, 3)]);
}

#[test]
fn test_i_piece_states() {
    let states = rotation_states(ShapeKind::I);
    let horizontal: Vec<_> = mask_cells(&states[1]).collect();
    assert_eq!(horizontal, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
}

#[test]
fn test_t_piece_states() {
    let states = rotation_states(ShapeKind::T);
    let up: Vec<_> = mask_cells(&states[0]).collect();
    assert_eq!(up, vec![(2, 1), (1, 2), (2, 2), (3, 2)]);
    let down: Vec<_> = mask_cells(&states[2]).collect();
    assert_eq!(down, vec![(1, 2), (2, 2), (3, 2), (2, 3)]);
}

#[test]
fn test_every_mask_fits_four_cells() {
    for kind in ShapeKind::ALL {
        for state in rotation_states(kind) {
            assert_eq!(mask_cells(state).count(), MINOS_PER_PIECE, "{:?}", kind);
        }
    }
}

// ============== Rotation ==============

#[test]
fn test_rotation_cycles_back_to_start() {
    for kind in ShapeKind::ALL {
        let start = Piece::spawn(kind, 0, 0);
        let n = start.rotation_count();
        let mut piece = start;
        for _ in 0..n {
            piece = piece.rotated(RotationDirection::Clockwise);
        }
        assert_eq!(piece, start, "{:?} clockwise", kind);
        for _ in 0..n {
            piece = piece.rotated(RotationDirection::CounterClockwise);
        }
        assert_eq!(piece, start, "{:?} counter-clockwise", kind);
    }
}

#[test]
fn test_cw_then_ccw_is_identity() {
    for kind in ShapeKind::ALL {
        for rotation in 0..4 {
            let piece = Piece::spawn(kind, rotation, 3);
            let back = piece
                .rotated(RotationDirection::Clockwise)
                .rotated(RotationDirection::CounterClockwise);
            assert_eq!(back, piece);
        }
    }
}

// ============== Generator ==============

#[test]
fn test_seeded_generators_agree() {
    let mut a = PieceGenerator::new(1998, 11);
    let mut b = PieceGenerator::new(1998, 11);
    let first: Vec<Piece> = (0..50).map(|_| a.draw()).collect();
    let second: Vec<Piece> = (0..50).map(|_| b.draw()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_generated_pieces_spawn_at_anchor() {
    let mut generator = PieceGenerator::new(5, 11);
    for _ in 0..50 {
        let piece = generator.draw();
        assert_eq!((piece.x, piece.y), (3, -2));
    }
}
