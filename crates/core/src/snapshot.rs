//! Snapshot module - read-only view of a session for renderers
//!
//! `GameSnapshot` is plain `Copy` data so a driver can keep one buffer around
//! and refresh it with [`crate::Session::snapshot_into`] every frame.

use crate::piece::Piece;
use crate::shapes::Mask;
use crate::types::{Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Board grid, row-major, row 0 at the top
pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub rotation: usize,
    pub mask: &'static Mask,
    pub x: i8,
    pub y: i8,
    pub color: u8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            mask: value.mask(),
            x: value.x,
            y: value.y,
            color: value.color,
        }
    }
}

impl PieceSnapshot {
    /// Board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        crate::shapes::mask_cells(self.mask)
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<PieceSnapshot>,
    /// Anchor row the active piece would land on after a hard drop
    pub ghost_y: Option<i8>,
    pub next: Option<PieceSnapshot>,
    pub score: u32,
    pub tier: u32,
    pub fall_interval_ms: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Cell at `(x, y)`, `None` when empty or out of range
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.board.get(y).and_then(|row| row.get(x)).copied().flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: None,
            score: 0,
            tier: 1,
            fall_interval_ms: 0,
            paused: false,
            game_over: false,
        }
    }
}
