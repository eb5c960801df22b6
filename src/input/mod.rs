//! Input routing: the boundary between user interaction and the pure core.
//!
//! - `Action`: explicit enumeration of what a press can do
//! - `Keymap`: static key to action table
//! - `Calculator`: owns the interaction state and applies actions to it
//! - `parse_line`: terminal input to presses

mod action;
mod keymap;
mod line;
mod router;

pub use action::{Action, UnknownAction};
pub use keymap::{Key, Keymap};
pub use line::{parse_line, Press};
pub use router::Calculator;
