//! Key mapping from terminal events to game commands.

use crate::types::GameCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the command it triggers, if any.
pub fn map_key(key: KeyEvent) -> Option<GameCommand> {
    match key.code {
        KeyCode::Enter => Some(GameCommand::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameCommand::TogglePause),

        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameCommand::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameCommand::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameCommand::MoveDown),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameCommand::RotateCw),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(GameCommand::RotateCcw),

        KeyCode::Char(' ') => Some(GameCommand::HardDrop),

        _ => None,
    }
}

/// Whether the key should leave the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Soft-drop key (held rather than tapped).
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Option<GameCommand> {
        map_key(KeyEvent::from(code))
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(key(KeyCode::Enter), Some(GameCommand::Start));
        assert_eq!(key(KeyCode::Char('p')), Some(GameCommand::TogglePause));
        assert_eq!(key(KeyCode::Char('P')), Some(GameCommand::TogglePause));
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Left), Some(GameCommand::MoveLeft));
        assert_eq!(key(KeyCode::Right), Some(GameCommand::MoveRight));
        assert_eq!(key(KeyCode::Down), Some(GameCommand::MoveDown));
        assert_eq!(key(KeyCode::Char('A')), Some(GameCommand::MoveLeft));
        assert_eq!(key(KeyCode::Char('d')), Some(GameCommand::MoveRight));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(key(KeyCode::Up), Some(GameCommand::RotateCw));
        assert_eq!(key(KeyCode::Char('z')), Some(GameCommand::RotateCw));
        assert_eq!(key(KeyCode::Char('W')), Some(GameCommand::RotateCw));
        assert_eq!(key(KeyCode::Char('x')), Some(GameCommand::RotateCcw));
    }

    #[test]
    fn test_hard_drop_and_unmapped() {
        assert_eq!(key(KeyCode::Char(' ')), Some(GameCommand::HardDrop));
        assert_eq!(key(KeyCode::Char('c')), None);
        assert_eq!(key(KeyCode::Tab), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
