//! Static translation of key presses into actions.
//!
//! Digits, `.`, the operator symbols, `=` and the named editing keys have fixed
//! meanings. Letters come from a small table that configuration may extend or
//! override. Keys that map to nothing are ignored.

use super::action::Action;
use crate::core::{MemoryOp, Operator, UnaryFunction};
use std::collections::HashMap;

/// Generic key representation, independent of any terminal or windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character key
    Char(char),
    Enter,
    Backspace,
    Delete,
    Escape,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Key for a key name such as `"Enter"` or `"7"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" | "Return" => Self::Enter,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Escape" | "Esc" => Self::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Unknown,
                }
            }
        }
    }
}

/// Key table.
///
/// `c` and `C` clear. Cosine has no default key; bind one through the
/// `[keys]` configuration table.
#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    letters: HashMap<char, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

impl Keymap {
    pub fn new() -> Self {
        let letters = HashMap::from([
            ('c', Action::Clear),
            ('C', Action::Clear),
            ('m', Action::Memory(MemoryOp::Clear)),
            ('r', Action::Memory(MemoryOp::Recall)),
            ('p', Action::Memory(MemoryOp::Add)),
            ('n', Action::Memory(MemoryOp::Subtract)),
            ('q', Action::Function(UnaryFunction::Sqrt)),
            ('e', Action::Function(UnaryFunction::Square)),
            ('s', Action::Function(UnaryFunction::Sin)),
            ('t', Action::Function(UnaryFunction::Tan)),
        ]);
        Self { letters }
    }

    /// Add bindings, replacing existing ones for the same key.
    ///
    /// Bindings for fixed keys are skipped; see [`Keymap::is_fixed`].
    pub fn with_bindings(mut self, bindings: impl IntoIterator<Item = (char, Action)>) -> Self {
        for (key, action) in bindings {
            if !Self::is_fixed(key) {
                self.letters.insert(key, action);
            }
        }
        self
    }

    /// Whether a character has a meaning that cannot be rebound.
    pub fn is_fixed(key: char) -> bool {
        key.is_ascii_digit() || key == '.' || key == '=' || Operator::from_symbol(key).is_some()
    }

    /// Translate a key press. Returns `None` for unmapped keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pocketcalc::input::{Action, Key, Keymap};
    ///
    /// let keymap = Keymap::new();
    /// assert_eq!(keymap.translate(Key::Char('7')), Some(Action::Digit(7)));
    /// assert_eq!(keymap.translate(Key::Enter), Some(Action::Equals));
    /// assert_eq!(keymap.translate(Key::Char('z')), None);
    /// ```
    pub fn translate(&self, key: Key) -> Option<Action> {
        match key {
            Key::Char(c) => {
                if let Some(action) = Action::digit(c) {
                    return Some(action);
                }
                if let Some(op) = Operator::from_symbol(c) {
                    return Some(Action::Operator(op));
                }
                match c {
                    '.' => Some(Action::Decimal),
                    '=' => Some(Action::Equals),
                    _ => self.letters.get(&c).copied(),
                }
            }
            Key::Enter => Some(Action::Equals),
            Key::Backspace | Key::Delete => Some(Action::Delete),
            Key::Escape => Some(Action::Clear),
            Key::Unknown => None,
        }
    }
}
