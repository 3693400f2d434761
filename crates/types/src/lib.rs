//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Apart from [`Rules`] (which is deserialised from the optional config file),
//! everything here is plain data, usable from the simulation core, the input
//! mapping and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Piece templates**: 5x5 occupancy masks
//! - **Spawn anchor**: (3, -2), so a fresh piece emerges from above the board
//!
//! # Timing Defaults
//!
//! All durations are whole milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 33 | Frame interval of the terminal runner (~30 Hz) |
//! | `BASE_FALL_INTERVAL_MS` | 270 | Gravity interval before tier reduction |
//! | `FALL_STEP_MS` | 20 | Reduction of the gravity interval per tier |
//! | `MIN_FALL_INTERVAL_MS` | 20 | Floor of the gravity interval |
//! | `SIDEWAYS_REPEAT_MS` | 150 | Auto-repeat for a held left/right |
//! | `SOFT_DROP_REPEAT_MS` | 100 | Auto-repeat for a held soft drop |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, Rules, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::ALL.len(), 7);
//! assert!(Intent::Quit.allowed_while_paused());
//! assert!(Rules::default().validate().is_ok());
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of every piece template
pub const TEMPLATE_SIZE: usize = 5;

/// Occupied cells per piece
pub const MINOS_PER_PIECE: usize = 4;

/// Spawn anchor column: centres the template horizontally
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - (TEMPLATE_SIZE / 2) as i8;

/// Spawn anchor row: the template starts above the visible board
pub const SPAWN_Y: i8 = -2;

/// Frame interval of the terminal runner (~30 Hz)
pub const FRAME_MS: u32 = 33;

/// Score points needed per difficulty tier
pub const ACCELERATION: u32 = 5;

/// Gravity interval before the tier reduction is applied
pub const BASE_FALL_INTERVAL_MS: u32 = 270;

/// Gravity interval reduction per difficulty tier
pub const FALL_STEP_MS: u32 = 20;

/// Lowest gravity interval reachable at high tiers
pub const MIN_FALL_INTERVAL_MS: u32 = 20;

/// Auto-repeat interval while left or right is held
pub const SIDEWAYS_REPEAT_MS: u32 = 150;

/// Auto-repeat interval while soft drop is held
pub const SOFT_DROP_REPEAT_MS: u32 = 100;

/// Number of colours a piece can be painted with
pub const PALETTE_SIZE: u8 = 11;

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    S,
    Z,
    J,
    L,
    I,
    O,
    T,
}

impl ShapeKind {
    /// Every kind, in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
    ];

    /// Single uppercase letter, as shown in the side panel
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
        }
    }
}

/// Direction of a single rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Discrete input intents consumed by the simulation
///
/// Held movements come in start/stop pairs so the session can apply its own
/// auto-repeat timing; everything else is a one-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeftStart,
    MoveLeftStop,
    MoveRightStart,
    MoveRightStop,
    SoftDropStart,
    SoftDropStop,
    RotateCw,
    RotateCcw,
    HardDrop,
    PauseToggle,
    Quit,
}

impl Intent {
    /// Intents still honoured while the session is paused
    pub fn allowed_while_paused(&self) -> bool {
        matches!(self, Intent::PauseToggle | Intent::Quit)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(color)`: Cell filled with the given palette index
pub type Cell = Option<u8>;

/// Tunable rules of a session
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Score points per difficulty tier
    pub acceleration: u32,
    pub base_fall_interval_ms: u32,
    pub fall_step_ms: u32,
    pub min_fall_interval_ms: u32,
    pub sideways_repeat_ms: u32,
    pub soft_drop_repeat_ms: u32,
    pub palette_size: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            base_fall_interval_ms: BASE_FALL_INTERVAL_MS,
            fall_step_ms: FALL_STEP_MS,
            min_fall_interval_ms: MIN_FALL_INTERVAL_MS,
            sideways_repeat_ms: SIDEWAYS_REPEAT_MS,
            soft_drop_repeat_ms: SOFT_DROP_REPEAT_MS,
            palette_size: PALETTE_SIZE,
        }
    }
}

/// Rejected rule values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("min_fall_interval_ms ({min}) exceeds base_fall_interval_ms ({base})")]
    FloorAboveBase { min: u32, base: u32 },
}

impl Rules {
    /// Check the values a session cannot run with
    pub fn validate(&self) -> Result<(), RulesError> {
        let non_zero = [
            ("acceleration", self.acceleration),
            ("min_fall_interval_ms", self.min_fall_interval_ms),
            ("sideways_repeat_ms", self.sideways_repeat_ms),
            ("soft_drop_repeat_ms", self.soft_drop_repeat_ms),
            ("palette_size", self.palette_size as u32),
        ];
        if let Some(&(field, _)) = non_zero.iter().find(|(_, v)| *v == 0) {
            return Err(RulesError::Zero { field });
        }
        if self.min_fall_interval_ms > self.base_fall_interval_ms {
            return Err(RulesError::FloorAboveBase {
                min: self.min_fall_interval_ms,
                base: self.base_fall_interval_ms,
            });
        }
        Ok(())
    }
}
