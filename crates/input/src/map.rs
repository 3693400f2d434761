//! Key mapping from terminal events to intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key event to an intent.
///
/// Presses start held movements and trigger one-shots; releases stop held
/// movements. Terminal auto-repeat events map to nothing since the session
/// runs its own repeat timers.
pub fn map_key(key: KeyEvent) -> Option<Intent> {
    if is_ctrl_c(key) {
        return (key.kind == KeyEventKind::Press).then_some(Intent::Quit);
    }
    match key.kind {
        KeyEventKind::Press => map_press(key.code),
        KeyEventKind::Release => map_release(key.code),
        KeyEventKind::Repeat => None,
    }
}

fn map_press(code: KeyCode) -> Option<Intent> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::MoveLeftStart),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::MoveRightStart),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::SoftDropStart),

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Intent::RotateCw),
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(Intent::RotateCcw)
        }

        // Actions
        KeyCode::Char(' ') => Some(Intent::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Intent::PauseToggle),
        KeyCode::Esc => Some(Intent::Quit),

        _ => None,
    }
}

fn map_release(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::MoveLeftStop),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::MoveRightStop),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::SoftDropStop),
        _ => None,
    }
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Check if key should end the program outright.
pub fn should_quit(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && (key.code == KeyCode::Esc || is_ctrl_c(key))
}
