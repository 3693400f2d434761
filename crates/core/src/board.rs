//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a palette index.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Cells above row 0 are free space, so a piece can spawn partly off the top
//! and fall into view. The floor and both walls are hard limits.

use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a single board coordinate may hold a piece cell
    ///
    /// Takes `i16` so a translated cell can never wrap back onto the board.
    fn is_free(&self, x: i16, y: i16) -> bool {
        if x < 0 || x >= i16::from(BOARD_WIDTH) || y >= i16::from(BOARD_HEIGHT) {
            return false;
        }
        if y < 0 {
            return true;
        }
        // in range on both axes, so the narrowing is lossless
        matches!(self.get(x as i8, y as i8), Some(None))
    }

    /// Check whether `piece` moved by `(dx, dy)` fits
    ///
    /// Every occupied cell must lie within the walls and above the floor, and
    /// any cell on the visible board must be empty. Cells above row 0 are
    /// always free.
    pub fn is_legal(&self, piece: &Piece, dx: i8, dy: i8) -> bool {
        piece
            .occupied_cells()
            .iter()
            .all(|&(x, y)| {
                self.is_free(i16::from(x) + i16::from(dx), i16::from(y) + i16::from(dy))
            })
    }

    /// Largest `dy` for which `piece` still fits, scanning down from its position
    ///
    /// Returns 0 when the piece cannot move down at all.
    pub fn drop_distance(&self, piece: &Piece) -> i8 {
        let mut distance = 0;
        while distance < i8::MAX && self.is_legal(piece, 0, distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Write `piece.color` into every occupied cell on the visible board
    ///
    /// Cells above row 0 are dropped. Callers must only merge a piece that
    /// `is_legal` at its current position.
    pub fn merge(&mut self, piece: &Piece) {
        debug_assert!(
            self.is_legal(piece, 0, 0),
            "merging a piece that overlaps the board: {:?}",
            piece
        );
        for &(x, y) in piece.occupied_cells().iter() {
            if y >= 0 {
                self.set(x, y, Some(piece.color));
            }
        }
    }

    /// Check if a row is completely filled
    pub fn row_is_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove row `y`, shift every row above it down by one and empty row 0
    fn collapse_row(&mut self, y: usize) {
        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * WIDTH;
            self.cells.copy_within(src_start..src_start + WIDTH, row * WIDTH);
        }
        self.cells[..WIDTH].fill(None);
    }

    /// Clear all full rows and return how many were removed
    ///
    /// Scans bottom to top. After collapsing a full row the same index is
    /// examined again, since the row above has just moved into it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = HEIGHT;
        while y > 0 {
            if self.row_is_full(y - 1) {
                self.collapse_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Iterate over rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Copy the grid into a row-major 2D array
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, `.` for empty and a digit for a colour
    ///
    /// Rows are aligned to the bottom of the board; missing rows are empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= HEIGHT, "too many rows");
        let mut board = Self::new();
        let top = HEIGHT - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), WIDTH, "row {} has the wrong width", i);
            for (x, ch) in row.chars().enumerate() {
                let cell = ch.to_digit(10).map(|d| d as u8);
                board.set(x as i8, (top + i) as i8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn above_the_board_is_free_space() {
        let board = Board::new();
        assert!(board.is_free(0, -5));
        assert!(board.is_free(9, -1));
        assert!(!board.is_free(-1, -1));
        assert!(!board.is_free(10, -1));
        assert!(!board.is_free(0, 20));
    }

    #[test]
    fn large_offsets_never_wrap_onto_the_board() {
        let board = Board::new();
        let piece = Piece {
            y: 10,
            ..Piece::spawn(ShapeKind::I, 0, 1)
        };
        assert!(!board.is_legal(&piece, 0, 120));
        assert!(!board.is_legal(&piece, 0, i8::MAX));
        assert!(!board.is_legal(&piece, i8::MAX, 0));
        assert!(!board.is_legal(&piece, i8::MIN, 0));
        assert!(board.is_legal(&piece, 0, i8::MIN));
        assert!(!board.is_free(0, i16::from(i8::MAX) + 4));
    }

    #[test]
    fn drop_distance_from_far_above_stops_at_i8_max() {
        let board = Board::new();
        let piece = Piece {
            y: i8::MIN,
            ..Piece::spawn(ShapeKind::O, 0, 1)
        };
        assert_eq!(board.drop_distance(&piece), i8::MAX);
    }

    #[test]
    fn merge_drops_cells_above_the_top() {
        let mut board = Board::new();
        // Vertical I at spawn: rows -2..=1 in column 5
        let piece = Piece::spawn(ShapeKind::I, 0, 6);
        board.merge(&piece);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(5, 0), Some(Some(6)));
        assert_eq!(board.get(5, 1), Some(Some(6)));
    }

    #[test]
    fn collapse_row_shifts_everything_above() {
        let mut board = Board::new();
        board.set(0, 0, Some(1));
        board.set(0, 1, Some(2));
        board.set(0, 2, Some(3));
        board.collapse_row(2);
        assert_eq!(board.get(0, 0), Some(None));
        assert_eq!(board.get(0, 1), Some(Some(1)));
        assert_eq!(board.get(0, 2), Some(Some(2)));
    }

    #[test]
    fn from_rows_aligns_to_bottom() {
        let board = Board::from_rows(&["1.........", "22222.2222"]);
        assert_eq!(board.get(0, 18), Some(Some(1)));
        assert_eq!(board.get(5, 19), Some(None));
        assert_eq!(board.get(9, 19), Some(Some(2)));
        assert_eq!(board.filled_count(), 10);
    }
}
