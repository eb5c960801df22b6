//! Interaction state of the calculator.
//!
//! A single `InteractionState` value holds everything the calculator knows
//! between user actions. It carries no behavior beyond pure inspection; the
//! router mutates it and the evaluator derives new values from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operator awaiting its second operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Remainder,
}

impl Operator {
    /// Symbol shown in the expression line and trace entries.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
        }
    }

    /// Operator for a symbol character, if any.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '%' => Some(Self::Remainder),
            _ => None,
        }
    }

    /// Apply the operator with IEEE 754 semantics.
    ///
    /// Division by zero yields an infinity or NaN rather than failing.
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
            Self::Remainder => lhs % rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Where the user is within a calculation.
///
/// Derived from the interaction state; used for logging and the status line.
/// None of the phases is terminal since the calculator runs indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing typed and nothing pending
    Ready,
    /// Typing the first operand
    Entering,
    /// Operator chosen, second operand not started
    AwaitingOperand,
    /// Typing the second operand
    EnteringOperand,
}

impl Phase {
    /// Get the phase's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Entering => "Entering",
            Self::AwaitingOperand => "AwaitingOperand",
            Self::EnteringOperand => "EnteringOperand",
        }
    }
}

/// Everything the calculator tracks between actions.
///
/// # Example
///
/// ```rust
/// use pocketcalc::core::{InteractionState, Phase};
///
/// let state = InteractionState::new();
/// assert_eq!(state.current_entry, "");
/// assert_eq!(state.memory_value, 0.0);
/// assert_eq!(state.phase(), Phase::Ready);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    /// Operand currently being typed
    pub current_entry: String,
    /// Operand captured when an operator was chosen; empty when nothing is pending
    pub pending_operand: String,
    /// Operator waiting for its second operand
    pub pending_operator: Option<Operator>,
    /// Memory register, independent of the current calculation
    pub memory_value: f64,
}

impl InteractionState {
    /// Create a fresh state with empty entries and a zeroed memory register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an operation is waiting for its second operand.
    pub fn has_pending(&self) -> bool {
        !self.pending_operand.is_empty()
    }

    /// Whether the current entry already contains a decimal point.
    pub fn has_decimal_point(&self) -> bool {
        self.current_entry.contains('.')
    }

    /// Classify the state (pure).
    pub fn phase(&self) -> Phase {
        match (self.pending_operator.is_some(), self.current_entry.is_empty()) {
            (false, true) => Phase::Ready,
            (false, false) => Phase::Entering,
            (true, true) => Phase::AwaitingOperand,
            (true, false) => Phase::EnteringOperand,
        }
    }

    /// Reset entry and pending operation, leaving memory untouched.
    pub fn clear_entry(&mut self) {
        self.current_entry.clear();
        self.pending_operand.clear();
        self.pending_operator = None;
    }
}
