//! Piece module - a shape kind placed on the board
//!
//! A piece refers to its geometry by rotation index only; the masks live in
//! [`crate::shapes`]. [`Piece::occupied_cells`] is the one place where mask
//! offsets are translated into board coordinates, and both collision testing
//! and merging go through it.

use arrayvec::ArrayVec;

use crate::shapes::{mask_cells, rotation_count, rotation_states, Mask};
use crate::types::{RotationDirection, ShapeKind, MINOS_PER_PIECE, SPAWN_X, SPAWN_Y};

/// Board coordinates of a piece's occupied cells
pub type OccupiedCells = ArrayVec<(i8, i8), MINOS_PER_PIECE>;

/// A falling (or queued) piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    /// Index into the kind's rotation states
    pub rotation: usize,
    /// Column of the template's top-left corner
    pub x: i8,
    /// Row of the template's top-left corner (negative while spawning)
    pub y: i8,
    /// Palette index the renderer paints this piece with
    pub color: u8,
}

impl Piece {
    /// Create a piece at the spawn anchor
    ///
    /// `rotation` is reduced modulo the kind's state count.
    pub fn spawn(kind: ShapeKind, rotation: usize, color: u8) -> Self {
        Self {
            kind,
            rotation: rotation % rotation_count(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
            color,
        }
    }

    /// Mask of the current rotation state
    pub fn mask(&self) -> &'static Mask {
        &rotation_states(self.kind)[self.rotation]
    }

    /// Number of rotation states of this piece's kind
    pub fn rotation_count(&self) -> usize {
        rotation_count(self.kind)
    }

    /// Board coordinates of every occupied cell
    pub fn occupied_cells(&self) -> OccupiedCells {
        mask_cells(self.mask())
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
            .collect()
    }

    /// Copy moved by `(dx, dy)`, saturating at the `i8` range
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Copy turned one state in `direction`; the anchor does not move
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let count = self.rotation_count();
        let rotation = match direction {
            RotationDirection::Clockwise => (self.rotation + 1) % count,
            RotationDirection::CounterClockwise => (self.rotation + count - 1) % count,
        };
        Self { rotation, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_uses_reference_anchor() {
        let piece = Piece::spawn(ShapeKind::T, 0, 4);
        assert_eq!((piece.x, piece.y), (3, -2));
        assert_eq!(piece.color, 4);
    }

    #[test]
    fn spawn_wraps_rotation() {
        assert_eq!(Piece::spawn(ShapeKind::S, 3, 0).rotation, 1);
        assert_eq!(Piece::spawn(ShapeKind::O, 2, 0).rotation, 0);
    }

    #[test]
    fn occupied_cells_are_translated_by_anchor() {
        let piece = Piece::spawn(ShapeKind::O, 0, 0);
        let cells = piece.occupied_cells();
        assert_eq!(cells.as_slice(), &[(4, 0), (5, 0), (4, 1), (5, 1)]);

        let moved = piece.shifted(-1, 3).occupied_cells();
        assert_eq!(moved.as_slice(), &[(3, 3), (4, 3), (3, 4), (4, 4)]);
    }

    #[test]
    fn rotation_wraps_both_ways() {
        let piece = Piece::spawn(ShapeKind::T, 0, 0);
        assert_eq!(piece.rotated(RotationDirection::CounterClockwise).rotation, 3);
        assert_eq!(piece.rotated(RotationDirection::Clockwise).rotation, 1);

        let i = Piece::spawn(ShapeKind::I, 1, 0);
        assert_eq!(i.rotated(RotationDirection::Clockwise).rotation, 0);
    }

    #[test]
    fn rotation_keeps_anchor() {
        let piece = Piece::spawn(ShapeKind::L, 0, 0).shifted(2, 5);
        let turned = piece.rotated(RotationDirection::Clockwise);
        assert_eq!((turned.x, turned.y), (piece.x, piece.y));
    }

    #[test]
    fn o_piece_rotation_is_identity() {
        let piece = Piece::spawn(ShapeKind::O, 0, 0);
        assert_eq!(piece.rotated(RotationDirection::Clockwise), piece);
        assert_eq!(piece.rotated(RotationDirection::CounterClockwise), piece);
    }
}
