//! Key mapping from terminal events to match actions.

use crate::types::{Command, PlayerId};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Player(PlayerId, Command),
    Pause,
    Restart,
}

/// Map keyboard input to match actions.
///
/// Player one (left side): `W`/`S` steer, `D` forward, `A` backward, `E` rotate.
/// Player two (right side): arrows steer and move (left is forward),
/// `Enter` or `/` rotate.
pub fn handle_key_event(key: KeyEvent) -> Option<InputAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    use Command::*;
    use PlayerId::{One, Two};

    let action = match key.code {
        // Player one
        KeyCode::Char('w') | KeyCode::Char('W') => InputAction::Player(One, SteerUp),
        KeyCode::Char('s') | KeyCode::Char('S') => InputAction::Player(One, SteerDown),
        KeyCode::Char('d') | KeyCode::Char('D') => InputAction::Player(One, Forward),
        KeyCode::Char('a') | KeyCode::Char('A') => InputAction::Player(One, Backward),
        KeyCode::Char('e') | KeyCode::Char('E') => InputAction::Player(One, Rotate),

        // Player two
        KeyCode::Up => InputAction::Player(Two, SteerUp),
        KeyCode::Down => InputAction::Player(Two, SteerDown),
        KeyCode::Left => InputAction::Player(Two, Forward),
        KeyCode::Right => InputAction::Player(Two, Backward),
        KeyCode::Enter | KeyCode::Char('/') => InputAction::Player(Two, Rotate),

        // Match
        KeyCode::Char('p') | KeyCode::Char('P') => InputAction::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Restart,

        _ => return None,
    };
    Some(action)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
