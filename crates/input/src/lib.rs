//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Intent`] and tracks held
//! movement keys, including on terminals that never report key releases.

pub mod held;
pub mod map;

pub use blockfall_types as types;

pub use held::{HeldKeys, Released, Routed, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
pub use map::{map_key, should_quit};
