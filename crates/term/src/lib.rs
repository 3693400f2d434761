//! Terminal rendering for the falling-block game.
//!
//! A small, game-oriented rendering layer: [`BoardView`] turns a snapshot
//! into a [`Frame`] of styled glyphs without touching the terminal, and
//! [`TerminalRenderer`] flushes frames through crossterm. Board cells are two
//! columns wide to keep them roughly square.

pub mod board_view;
pub mod frame;
pub mod palette;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use board_view::{BoardView, Viewport};
pub use frame::{Frame, Glyph, Rgb, Style};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
