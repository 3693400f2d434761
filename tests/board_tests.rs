//! Board tests - legality, merging and row clearing

use blockfall::core::{Board, Piece};
use blockfall::types::{ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Sparse marker cells: one per row, in a column that depends on the row
fn sparse_board(full_rows: &[usize]) -> Board {
    let mut board = Board::new();
    for y in 0..BOARD_HEIGHT as usize {
        if full_rows.contains(&y) {
            for x in 0..BOARD_WIDTH as i8 {
                board.set(x, y as i8, Some(9));
            }
        } else if y % 3 == 0 {
            board.set((y % BOARD_WIDTH as usize) as i8, y as i8, Some((y % 11) as u8));
        }
    }
    board
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.filled_count(), 0);
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    assert!(board.set(5, 10, Some(3)));
    assert_eq!(board.get(5, 10), Some(Some(3)));
    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
    assert!(!board.set(-1, 0, Some(3)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(3)));
}

#[test]
fn test_is_legal_rejects_walls_floor_and_overlap() {
    let mut board = Board::new();
    // O occupies template columns 1-2 and rows 2-3
    let o = Piece::spawn(ShapeKind::O, 0, 0);
    assert!(board.is_legal(&o, 0, 0));
    assert!(board.is_legal(&o, -4, 0));
    assert!(!board.is_legal(&o, -5, 0));
    assert!(board.is_legal(&o, 4, 0));
    assert!(!board.is_legal(&o, 5, 0));
    assert!(board.is_legal(&o, 0, 18));
    assert!(!board.is_legal(&o, 0, 19));

    board.set(5, 1, Some(0));
    assert!(!board.is_legal(&o, 0, 0));
    assert!(board.is_legal(&o, -2, 0));
}

#[test]
fn test_cells_above_the_board_are_legal() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, 0, Some(1));
    }
    // vertical I with all cells above row 0
    let i = Piece::spawn(ShapeKind::I, 0, 0).shifted(0, -3);
    assert!(i.occupied_cells().iter().all(|&(_, y)| y < 0));
    assert!(board.is_legal(&i, 0, 0));
    assert!(board.is_legal(&i, 0, 1));
    // one more row reaches the filled row 0
    assert!(!board.is_legal(&i, 0, 2));
}

#[test]
fn test_merge_writes_color() {
    let mut board = Board::new();
    let t = Piece::spawn(ShapeKind::T, 0, 7).shifted(0, 10);
    board.merge(&t);
    assert_eq!(board.filled_count(), 4);
    for (x, y) in t.occupied_cells() {
        assert_eq!(board.get(x, y), Some(Some(7)));
    }
}

#[test]
fn test_clear_without_full_rows_is_a_noop() {
    let mut board = sparse_board(&[]);
    let before = board.clone();
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_clear_two_separated_rows() {
    let mut board = sparse_board(&[5, 7]);
    let before = board.clone();
    let filled_before = board.filled_count();

    assert!(board.row_is_full(5));
    assert!(board.row_is_full(7));
    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(board.filled_count(), filled_before - 2 * BOARD_WIDTH as usize);

    let before_rows: Vec<&[_]> = before.rows().collect();
    let after_rows: Vec<&[_]> = board.rows().collect();
    // rows below the lower cleared row stay put
    for y in 8..BOARD_HEIGHT as usize {
        assert_eq!(after_rows[y], before_rows[y]);
    }
    // the row between the cleared rows moves down by one
    assert_eq!(after_rows[7], before_rows[6]);
    // rows above both move down by two
    for y in 0..5 {
        assert_eq!(after_rows[y + 2], before_rows[y]);
    }
    assert!(after_rows[0].iter().all(|cell| cell.is_none()));
    assert!(after_rows[1].iter().all(|cell| cell.is_none()));
}

#[test]
fn test_clear_adjacent_rows_re_examines_index() {
    let mut board = Board::from_rows(&[
        "1.........",
        "2222222222",
        "3333333333",
        "..4.......",
    ]);
    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(board.get(0, 18), Some(Some(1)));
    assert_eq!(board.get(2, 19), Some(Some(4)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_drop_distance_with_single_column_obstruction() {
    let mut board = Board::new();
    board.set(5, 12, Some(2));
    // vertical I in column 5 (template column 2, anchor x 3)
    let i = Piece::spawn(ShapeKind::I, 0, 0);
    let distance = board.drop_distance(&i);
    assert!(board.is_legal(&i, 0, distance));
    assert!(!board.is_legal(&i, 0, distance + 1));
    // bottom cell rests on row 11
    let landed = i.shifted(0, distance);
    assert_eq!(landed.occupied_cells().iter().map(|&(_, y)| y).max(), Some(11));

    // one column over nothing blocks until the floor
    let beside = i.shifted(1, 0);
    let distance = board.drop_distance(&beside);
    assert_eq!(beside.shifted(0, distance).occupied_cells().last(), Some(&(6, 19)));
}

#[test]
fn test_write_grid_matches_cells() {
    let board = Board::from_rows(&["5........6"]);
    let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    board.write_grid(&mut grid);
    assert_eq!(grid[19][0], Some(5));
    assert_eq!(grid[19][9], Some(6));
    assert_eq!(grid[18][0], None);
}
