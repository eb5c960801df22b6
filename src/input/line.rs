//! Turning a line of terminal input into presses.
//!
//! Whitespace separates tokens. A token naming a labeled control is a button
//! press, a token naming a special key is that key, and anything else is typed
//! one character at a time.

use super::action::Action;
use super::keymap::Key;
use super::router::Calculator;
use crate::display::Display;

/// One user interaction at the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// Click on a labeled control
    Button(Action),
    /// Keyboard key
    Key(Key),
}

impl Calculator {
    /// Apply a press. Unmapped keys yield `None`.
    pub fn press(&mut self, press: Press) -> Option<Display> {
        match press {
            Press::Button(action) => Some(self.dispatch(action)),
            Press::Key(key) => self.press_key(key),
        }
    }
}

/// Split a line into presses.
///
/// # Example
///
/// ```rust
/// use pocketcalc::input::{parse_line, Action, Key, Press};
/// use pocketcalc::core::UnaryFunction;
///
/// let presses = parse_line("9 sqrt Enter");
/// assert_eq!(presses, vec![
///     Press::Key(Key::Char('9')),
///     Press::Button(Action::Function(UnaryFunction::Sqrt)),
///     Press::Key(Key::Enter),
/// ]);
/// ```
pub fn parse_line(line: &str) -> Vec<Press> {
    let mut presses = Vec::new();
    for token in line.split_whitespace() {
        if let Some(action) = Action::from_button_label(token) {
            presses.push(Press::Button(action));
            continue;
        }
        match Key::from_name(token) {
            Key::Unknown => presses.extend(token.chars().map(|c| Press::Key(Key::Char(c)))),
            key => presses.push(Press::Key(key)),
        }
    }
    presses
}
