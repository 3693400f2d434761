//! Core simulation - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the shape
//! catalog, pieces, the board, the speed curve and the session state machine.
//! It does no I/O and reads no clock. Time enters only as the `elapsed_ms`
//! argument of [`Session::step`], and randomness only through the generator
//! injected at construction, so a seed replays a whole game.
//!
//! # Module Structure
//!
//! - [`shapes`]: 5x5 rotation masks of the seven kinds
//! - [`piece`]: a kind placed on the board (rotation index, anchor, colour)
//! - [`rng`]: seedable piece generator
//! - [`board`]: 10x20 grid with legality checks, merging and row clearing
//! - [`difficulty`]: score to tier to gravity interval
//! - [`session`]: the game loop, intents, events
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - **Random pieces**: kind, rotation and colour are drawn independently
//! - **Simple rotation**: the next state in the catalog, rejected on collision
//!   (no wall kicks)
//! - **Hard drop**: moves to the landing row; the lock happens on the next
//!   gravity step
//! - **Scoring**: one point per cleared row; every 5 points speed gravity up
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Intent, Rules, Session};
//!
//! let mut session = Session::new(1998, Rules::default());
//! session.step(&[Intent::MoveRightStart, Intent::MoveRightStop], 33);
//! session.step(&[Intent::HardDrop], 33);
//!
//! // The piece rests on the floor until the next gravity step locks it.
//! while session.board().filled_count() == 0 {
//!     session.tick(33);
//! }
//! assert_eq!(session.board().filled_count(), 4);
//! assert_eq!(session.score(), 0);
//! ```

pub mod board;
pub mod difficulty;
pub mod piece;
pub mod rng;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use difficulty::{fall_interval_ms, tier_for, Difficulty};
pub use piece::Piece;
pub use rng::PieceGenerator;
pub use session::{Events, GameEvent, HorizontalDirection, Phase, Session};
pub use shapes::{mask_cells, rotation_states, Mask};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use types::{Intent, Rules, ShapeKind};
