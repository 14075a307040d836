//! Global keyboard shortcuts
//!
//! Backspace and Delete undo the last change, unless the keystroke is aimed
//! at something the user is typing into. Mapping is pure so it can be
//! tested without any windowing layer.

use std::str::FromStr;

/// Errors that can occur while parsing key names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("Unknown key name '{0}'")]
    UnknownKey(String),
}

/// Physical key reported by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Delete,
    Escape,
    Enter,
    Char(char),
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "backspace" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "escape" | "esc" => Ok(Key::Escape),
            "enter" | "return" => Ok(Key::Enter),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(Key::Char(ch)),
                    _ => Err(KeyParseError::UnknownKey(s.to_string())),
                }
            }
        }
    }
}

/// Element that had focus when the key was pressed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FocusTarget {
    /// Nothing focused, or a non-editable element
    #[default]
    Document,
    /// A form element, identified by tag name (`INPUT`, `TEXTAREA`, ...)
    Element { tag: String, content_editable: bool },
}

impl FocusTarget {
    /// Text field shorthand
    pub fn input() -> Self {
        FocusTarget::Element {
            tag: "INPUT".to_string(),
            content_editable: false,
        }
    }

    /// Whether keystrokes here edit text rather than the layout
    pub fn is_editable(&self) -> bool {
        match self {
            FocusTarget::Document => false,
            FocusTarget::Element { tag, content_editable } => {
                *content_editable
                    || matches!(tag.to_ascii_uppercase().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
            }
        }
    }
}

/// A key press together with its focus context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub target: FocusTarget,
}

impl KeyPress {
    pub fn new(key: Key, target: FocusTarget) -> Self {
        Self { key, target }
    }
}

/// Actions a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Undo,
}

/// Maps a key press to a layout action
///
/// `can_undo` reflects whether history is non-empty: with nothing to undo
/// the key is left alone so the platform can handle it normally.
///
/// # Example
/// ```rust
/// use mahjong_tiles::input::keyboard::{map_key_press, FocusTarget, Key, KeyAction, KeyPress};
///
/// let press = KeyPress::new(Key::Backspace, FocusTarget::Document);
/// assert_eq!(map_key_press(&press, true), Some(KeyAction::Undo));
/// assert_eq!(map_key_press(&press, false), None);
/// ```
pub fn map_key_press(press: &KeyPress, can_undo: bool) -> Option<KeyAction> {
    if !matches!(press.key, Key::Backspace | Key::Delete) {
        return None;
    }
    if !can_undo || press.target.is_editable() {
        return None;
    }
    Some(KeyAction::Undo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_keys_map_to_undo() {
        for key in [Key::Backspace, Key::Delete] {
            let press = KeyPress::new(key, FocusTarget::Document);
            assert_eq!(map_key_press(&press, true), Some(KeyAction::Undo));
        }
    }

    #[test]
    fn other_keys_are_ignored() {
        for key in [Key::Escape, Key::Enter, Key::Char('z')] {
            let press = KeyPress::new(key, FocusTarget::Document);
            assert_eq!(map_key_press(&press, true), None);
        }
    }

    #[test]
    fn editable_targets_suppress_undo() {
        let targets = [
            FocusTarget::input(),
            FocusTarget::Element { tag: "textarea".into(), content_editable: false },
            FocusTarget::Element { tag: "SELECT".into(), content_editable: false },
            FocusTarget::Element { tag: "DIV".into(), content_editable: true },
        ];
        for target in targets {
            assert!(target.is_editable());
            let press = KeyPress::new(Key::Backspace, target);
            assert_eq!(map_key_press(&press, true), None);
        }
    }

    #[test]
    fn plain_elements_are_not_editable() {
        let button = FocusTarget::Element { tag: "BUTTON".into(), content_editable: false };
        assert!(!button.is_editable());
        assert_eq!(map_key_press(&KeyPress::new(Key::Delete, button), true), Some(KeyAction::Undo));
    }

    #[test]
    fn empty_history_leaves_key_alone() {
        let press = KeyPress::new(Key::Delete, FocusTarget::Document);
        assert_eq!(map_key_press(&press, false), None);
    }

    #[test]
    fn parse_key_names() {
        assert_eq!("Backspace".parse::<Key>(), Ok(Key::Backspace));
        assert_eq!("del".parse::<Key>(), Ok(Key::Delete));
        assert_eq!("q".parse::<Key>(), Ok(Key::Char('q')));
        assert!(matches!("shift".parse::<Key>(), Err(KeyParseError::UnknownKey(_))));
    }
}
