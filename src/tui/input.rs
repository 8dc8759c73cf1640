use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::action::Action;

/// Returns true only for actual key presses (ignores repeats/releases).
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

pub fn key_to_action(key: &KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('e') | KeyCode::Char('E') => Action::Interact,

        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Action::Move(0, -1),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Action::Move(0, 1),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Action::Move(-1, 0),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Action::Move(1, 0),

        _ => Action::None,
    }
}
