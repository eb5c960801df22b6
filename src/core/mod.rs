//! Core calculator types and logic.
//!
//! This module contains the pure functional core of the calculator:
//! - The interaction state and its derived phase
//! - Guard predicates for action preconditions
//! - Operand parsing and number formatting
//! - Evaluation of calculations, functions and memory operations
//! - The immutable trace log
//!
//! Nothing in this module performs I/O; the router in `input` is the only
//! place that replaces state.

mod evaluator;
pub mod guard;
mod history;
mod number;
mod state;

pub use evaluator::{apply_function, apply_memory, calculate, Evaluation, MemoryOp, UnaryFunction};
pub use guard::Guard;
pub use history::{TraceEntry, TraceKind, TraceLog};
pub use number::{format_number, parse_operand, NumberError};
pub use state::{InteractionState, Operator, Phase};
