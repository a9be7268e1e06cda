//! Key mapping from terminal events to slot actions.

use crate::types::SlotAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to slot actions.
pub fn handle_key_event(key: KeyEvent) -> Option<SlotAction> {
    match key.code {
        // Spin
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(SlotAction::Spin)
        }

        // Autoplay
        KeyCode::Char('a') | KeyCode::Char('A') => Some(SlotAction::ToggleAutoplay),
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => Some(SlotAction::AutoplayFaster),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => Some(SlotAction::AutoplaySlower),

        // Reset
        KeyCode::Char('r') | KeyCode::Char('R') => Some(SlotAction::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_spin_keys() {
        for code in [KeyCode::Char(' '), KeyCode::Enter, KeyCode::Char('S')] {
            assert_eq!(handle_key_event(KeyEvent::from(code)), Some(SlotAction::Spin));
        }
    }

    #[test]
    fn test_autoplay_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('a'))),
            Some(SlotAction::ToggleAutoplay)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('-'))),
            Some(SlotAction::AutoplayFaster)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('+'))),
            Some(SlotAction::AutoplaySlower)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(SlotAction::AutoplaySlower)
        );
    }

    #[test]
    fn test_reset_and_unmapped_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(SlotAction::Reset)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
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
