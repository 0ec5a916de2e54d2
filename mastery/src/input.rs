use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers};

/// Terminal-independent key, so tests can drive the app without crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    /// Anything the app has no binding for.
    Unbound,
}

/// Modifier key state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// Key event with modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        }
    }

    /// True for Ctrl+`c` (case-insensitive).
    pub fn is_ctrl_char(&self, c: char) -> bool {
        self.modifiers.ctrl && matches!(self.key, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }

    /// Printable character typed without Ctrl or Alt, if any.
    pub fn typed_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt && !c.is_control() => {
                Some(c)
            }
            _ => None,
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => Key::Unbound,
        }
    }
}

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(event: CrosstermKeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers {
                ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
                alt: event.modifiers.contains(KeyModifiers::ALT),
                shift: event.modifiers.contains(KeyModifiers::SHIFT),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_char_ignores_control_combinations() {
        assert_eq!(KeyEvent::new(Key::Char('a')).typed_char(), Some('a'));
        assert_eq!(KeyEvent::with_ctrl(Key::Char('a')).typed_char(), None);
        assert_eq!(KeyEvent::new(Key::Enter).typed_char(), None);
    }

    #[test]
    fn test_ctrl_char_is_case_insensitive() {
        assert!(KeyEvent::with_ctrl(Key::Char('R')).is_ctrl_char('r'));
        assert!(!KeyEvent::new(Key::Char('r')).is_ctrl_char('r'));
    }

    #[test]
    fn test_unmapped_crossterm_keys_are_unbound() {
        assert_eq!(Key::from(KeyCode::F(5)), Key::Unbound);
        assert_eq!(Key::from(KeyCode::Char('x')), Key::Char('x'));
    }
}
