//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Grid movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One slot left.
    Left,
    /// One slot right.
    Right,
    /// One row up.
    Up,
    /// One row down.
    Down,
}

/// User intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    /// Leave the application.
    Quit,
    /// Re-run the whole pipeline.
    Reload,
    /// Open the enlarged view for the selected slot.
    Open,
    /// Close the enlarged view.
    Close,
    /// Move the selection.
    Move(Direction),
}

/// Maps keys to gallery actions.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key is a quit event.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                ..
            } | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Decodes a key press. While the enlarged view is open only closing and
    /// quitting are accepted.
    #[must_use]
    pub fn action_for(key: &KeyEvent, enlarged_open: bool) -> Option<GalleryAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if Self::is_quit_event(key) {
            return Some(GalleryAction::Quit);
        }

        if enlarged_open {
            return matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace)
                .then_some(GalleryAction::Close);
        }

        let action = match key.code {
            KeyCode::Char('r') => GalleryAction::Reload,
            KeyCode::Enter => GalleryAction::Open,
            KeyCode::Left | KeyCode::Char('h') => GalleryAction::Move(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => GalleryAction::Move(Direction::Right),
            KeyCode::Up | KeyCode::Char('k') => GalleryAction::Move(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => GalleryAction::Move(Direction::Down),
            _ => return None,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test_case(KeyCode::Char('r'), Some(GalleryAction::Reload) ; "reload")]
    #[test_case(KeyCode::Enter, Some(GalleryAction::Open) ; "open")]
    #[test_case(KeyCode::Char('h'), Some(GalleryAction::Move(Direction::Left)) ; "vim_left")]
    #[test_case(KeyCode::Down, Some(GalleryAction::Move(Direction::Down)) ; "arrow_down")]
    #[test_case(KeyCode::Esc, None ; "esc_without_view")]
    #[test_case(KeyCode::Char('x'), None ; "unbound")]
    fn test_gallery_keys(code: KeyCode, expected: Option<GalleryAction>) {
        let key = make_key_event(code, KeyModifiers::NONE);
        assert_eq!(EventHandler::action_for(&key, false), expected);
    }

    #[test_case(KeyCode::Esc, Some(GalleryAction::Close) ; "esc")]
    #[test_case(KeyCode::Enter, Some(GalleryAction::Close) ; "enter")]
    #[test_case(KeyCode::Char('r'), None ; "reload_ignored")]
    #[test_case(KeyCode::Right, None ; "move_ignored")]
    fn test_enlarged_keys(code: KeyCode, expected: Option<GalleryAction>) {
        let key = make_key_event(code, KeyModifiers::NONE);
        assert_eq!(EventHandler::action_for(&key, true), expected);
    }

    #[test]
    fn test_quit_events() {
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert_eq!(
            EventHandler::action_for(
                &make_key_event(KeyCode::Char('q'), KeyModifiers::NONE),
                true
            ),
            Some(GalleryAction::Quit)
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let key = KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(EventHandler::action_for(&key, false), None);
    }
}
