//! Key mapping from terminal events to game actions.

use crate::types::{GameAction, ViewAngle};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Release events are ignored so terminals that report them do not double-fire.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::RotateColors),

        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),

        // Camera presets
        KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::View(ViewAngle::Front)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::View(ViewAngle::Tilted)),
        KeyCode::Char('v') | KeyCode::Char('V') => Some(GameAction::View(ViewAngle::Side)),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
