//! Pocketcalc: an event-driven calculator state machine
//!
//! Pocketcalc follows the "pure core, imperative shell" philosophy. The core
//! evaluates calculations as pure functions from one interaction state to the
//! next, while the input router and terminal session own the single mutable
//! state and decide when to replace it.
//!
//! # Core Concepts
//!
//! - **InteractionState**: current entry, pending operand and operator, memory register
//! - **Actions**: an explicit enumeration of what a button or key press can do
//! - **Guards**: pure predicates that gate actions on the current state
//! - **Trace log**: immutable, append-only record of completed operations
//!
//! # Example
//!
//! ```rust
//! use pocketcalc::input::{parse_line, Calculator};
//!
//! let mut calculator = Calculator::new();
//! for press in parse_line("9 sqrt") {
//!     calculator.press(press);
//! }
//!
//! assert_eq!(calculator.display().result, "3");
//! assert_eq!(calculator.history().latest().unwrap().text, "sqrt(9) = 3");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod display;
pub mod input;
pub mod shell;

// Re-export commonly used types
pub use builder::{BuildError, CalculatorBuilder};
pub use config::Config;
pub use crate::core::{InteractionState, Operator, TraceLog};
pub use display::Display;
pub use input::{Action, Calculator, Key};
