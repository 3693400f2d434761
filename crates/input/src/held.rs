//! Held-key tracking for terminals without key-release events.
//!
//! Most terminals only report presses. A held key shows up as a stream of
//! repeated presses, and nothing marks the moment it is let go. `HeldKeys`
//! filters the repeated presses into a single `*Start` intent and synthesises
//! the matching `*Stop` once no press has been seen for the release timeout.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{map_key, should_quit};
use crate::types::Intent;

// Short enough that a tap does not turn into a sustained hold.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Intents synthesised by one update
pub type Released = ArrayVec<Intent, 3>;

/// Intents produced by one routed key: the stops plus one intent
pub type Routed = ArrayVec<Intent, 4>;

/// Movement keys that can be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeldKey {
    Left,
    Right,
    Down,
}

impl HeldKey {
    const ALL: [HeldKey; 3] = [HeldKey::Left, HeldKey::Right, HeldKey::Down];

    fn for_intent(intent: Intent) -> Option<Self> {
        match intent {
            Intent::MoveLeftStart | Intent::MoveLeftStop => Some(HeldKey::Left),
            Intent::MoveRightStart | Intent::MoveRightStop => Some(HeldKey::Right),
            Intent::SoftDropStart | Intent::SoftDropStop => Some(HeldKey::Down),
            _ => None,
        }
    }

    fn stop(self) -> Intent {
        match self {
            HeldKey::Left => Intent::MoveLeftStop,
            HeldKey::Right => Intent::MoveRightStop,
            HeldKey::Down => Intent::SoftDropStop,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Tracks which movement keys are held.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    /// Milliseconds since each held key was last seen
    since_seen: [Option<u32>; 3],
    /// `None` when the terminal reports releases itself
    release_timeout_ms: Option<u32>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::with_release_timeout_ms(DEFAULT_KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_release_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            since_seen: [None; 3],
            release_timeout_ms: Some(timeout_ms),
        }
    }

    /// Tracker for terminals that deliver release events
    pub fn with_release_events() -> Self {
        Self {
            since_seen: [None; 3],
            release_timeout_ms: None,
        }
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        HeldKey::for_intent(intent).is_some_and(|key| self.since_seen[key.index()].is_some())
    }

    /// Turn a key event into at most one intent.
    ///
    /// A press of a key that is already held only refreshes it.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Intent> {
        if key.kind == KeyEventKind::Repeat {
            let press = KeyEvent {
                kind: KeyEventKind::Press,
                ..key
            };
            if let Some(held) = map_key(press).and_then(HeldKey::for_intent) {
                self.refresh(held);
            }
            return None;
        }

        let intent = map_key(key)?;
        let Some(held) = HeldKey::for_intent(intent) else {
            return Some(intent);
        };

        if key.kind == KeyEventKind::Release {
            self.since_seen[held.index()] = None;
            return Some(intent);
        }

        let slot = &mut self.since_seen[held.index()];
        let already_held = slot.is_some();
        *slot = Some(0);
        if already_held {
            return None;
        }
        // Left and right are exclusive: the session drops the other direction.
        match held {
            HeldKey::Left => self.since_seen[HeldKey::Right.index()] = None,
            HeldKey::Right => self.since_seen[HeldKey::Left.index()] = None,
            HeldKey::Down => {}
        }
        Some(intent)
    }

    /// Turn a key event into intents, given whether the game is paused.
    ///
    /// While paused any key press resumes, and Esc or Ctrl-C quits. Pausing
    /// forgets every held key, so a movement key held through the pause has
    /// to be pressed again afterwards.
    pub fn route(&mut self, key: KeyEvent, paused: bool) -> Routed {
        let mut routed = Routed::new();
        if paused {
            if key.kind == KeyEventKind::Press {
                routed.extend(self.release_all());
                routed.push(if should_quit(key) {
                    Intent::Quit
                } else {
                    Intent::PauseToggle
                });
            }
            return routed;
        }
        match self.handle_key(key) {
            Some(Intent::PauseToggle) => {
                routed.extend(self.release_all());
                routed.push(Intent::PauseToggle);
            }
            Some(intent) => routed.push(intent),
            None => {}
        }
        routed
    }

    /// Age the held keys and release the ones not seen within the timeout.
    pub fn update(&mut self, elapsed_ms: u32) -> Released {
        let mut released = Released::new();
        let Some(timeout) = self.release_timeout_ms else {
            return released;
        };
        for key in HeldKey::ALL {
            let slot = &mut self.since_seen[key.index()];
            if let Some(age) = slot {
                *age = age.saturating_add(elapsed_ms);
                if *age > timeout {
                    *slot = None;
                    released.push(key.stop());
                }
            }
        }
        released
    }

    /// Forget every held key, returning the stops to send.
    pub fn release_all(&mut self) -> Released {
        let mut released = Released::new();
        for key in HeldKey::ALL {
            if self.since_seen[key.index()].take().is_some() {
                released.push(key.stop());
            }
        }
        released
    }

    fn refresh(&mut self, key: HeldKey) {
        if let Some(age) = &mut self.since_seen[key.index()] {
            *age = 0;
        }
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new()
    }
}
