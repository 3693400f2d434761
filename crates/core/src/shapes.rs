//! Shape catalog - rotation states of the seven piece kinds
//!
//! Every rotation state is a 5x5 occupancy mask, so collision math can assume
//! the same bounding box for every kind. The tables are built at compile time
//! from text templates where `#` marks an occupied cell.
//!
//! Rotation is a plain index into [`rotation_states`]; there is no wall-kick
//! data. O has one state, S, Z and I have two, J, L and T have four.

use crate::types::{ShapeKind, TEMPLATE_SIZE};

/// Occupancy mask of one rotation state, indexed `[row][column]`
pub type Mask = [[bool; TEMPLATE_SIZE]; TEMPLATE_SIZE];

/// Build a mask from five rows of five template characters
const fn mask(rows: [&str; TEMPLATE_SIZE]) -> Mask {
    let mut out = [[false; TEMPLATE_SIZE]; TEMPLATE_SIZE];
    let mut y = 0;
    while y < TEMPLATE_SIZE {
        let row = rows[y].as_bytes();
        let mut x = 0;
        while x < TEMPLATE_SIZE {
            out[y][x] = row[x] == b'#';
            x += 1;
        }
        y += 1;
    }
    out
}

static S_STATES: [Mask; 2] = [
    mask([".....", ".....", "..##.", ".##..", "....."]),
    mask([".....", "..#..", "..##.", "...#.", "....."]),
];

static Z_STATES: [Mask; 2] = [
    mask([".....", ".....", ".##..", "..##.", "....."]),
    mask([".....", "..#..", ".##..", ".#...", "....."]),
];

static I_STATES: [Mask; 2] = [
    mask(["..#..", "..#..", "..#..", "..#..", "....."]),
    mask([".....", ".....", "####.", ".....", "....."]),
];

static O_STATES: [Mask; 1] = [mask([".....", ".....", ".##..", ".##..", "....."])];

static J_STATES: [Mask; 4] = [
    mask([".....", ".#...", ".###.", ".....", "....."]),
    mask([".....", "..##.", "..#..", "..#..", "....."]),
    mask([".....", ".....", ".###.", "...#.", "....."]),
    mask([".....", "..#..", "..#..", ".##..", "....."]),
];

static L_STATES: [Mask; 4] = [
    mask([".....", "...#.", ".###.", ".....", "....."]),
    mask([".....", "..#..", "..#..", "..##.", "....."]),
    mask([".....", ".....", ".###.", ".#...", "....."]),
    mask([".....", ".##..", "..#..", "..#..", "....."]),
];

static T_STATES: [Mask; 4] = [
    mask([".....", "..#..", ".###.", ".....", "....."]),
    mask([".....", "..#..", "..##.", "..#..", "....."]),
    mask([".....", ".....", ".###.", "..#..", "....."]),
    mask([".....", "..#..", ".##..", "..#..", "....."]),
];

/// Ordered rotation states of a kind (never empty)
pub fn rotation_states(kind: ShapeKind) -> &'static [Mask] {
    match kind {
        ShapeKind::S => &S_STATES,
        ShapeKind::Z => &Z_STATES,
        ShapeKind::J => &J_STATES,
        ShapeKind::L => &L_STATES,
        ShapeKind::I => &I_STATES,
        ShapeKind::O => &O_STATES,
        ShapeKind::T => &T_STATES,
    }
}

/// Number of rotation states of a kind
pub fn rotation_count(kind: ShapeKind) -> usize {
    rotation_states(kind).len()
}

/// Occupied `(dx, dy)` offsets of a mask, row by row
pub fn mask_cells(mask: &Mask) -> impl Iterator<Item = (i8, i8)> + '_ {
    mask.iter().enumerate().flat_map(|(dy, row)| {
        row.iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(dx, _)| (dx as i8, dy as i8))
    })
}
