//! Pure evaluation of calculations, functions and memory operations.
//!
//! Each operation takes the current interaction state and returns the state
//! that should replace it along with the trace entry describing what happened.
//! Operand text that does not parse yields `None`: the caller keeps its state
//! and records nothing.

use super::history::{TraceEntry, TraceKind};
use super::number::{format_number, parse_operand, NumberError};
use super::state::InteractionState;
use serde::{Deserialize, Serialize};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

/// Single-argument math function applied to the current entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryFunction {
    Sqrt,
    Square,
    Sin,
    Cos,
    Tan,
}

impl UnaryFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }

    /// Apply the function. Trigonometry works in radians.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Sqrt => value.sqrt(),
            Self::Square => value.powi(2),
            Self::Sin => value.sin(),
            Self::Cos => value.cos(),
            Self::Tan => value.tan(),
        }
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operation on the memory register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryOp {
    #[serde(rename = "mc")]
    Clear,
    #[serde(rename = "mr")]
    Recall,
    #[serde(rename = "m+")]
    Add,
    #[serde(rename = "m-")]
    Subtract,
}

impl MemoryOp {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "mc",
            Self::Recall => "mr",
            Self::Add => "m+",
            Self::Subtract => "m-",
        }
    }
}

impl fmt::Display for MemoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a successful evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// State to install in place of the input state
    pub state: InteractionState,
    /// Trace of the operation
    pub entry: TraceEntry,
}

fn operand(text: &str) -> Validation<f64, NonEmptyVec<NumberError>> {
    match parse_operand(text) {
        Ok(value) => Validation::success(value),
        Err(error) => Validation::fail(error),
    }
}

fn log_aborted(operation: &str, errors: &NonEmptyVec<NumberError>) {
    for error in errors.iter() {
        debug!(operation, %error, "evaluation aborted");
    }
}

/// Apply the pending operator to the pending operand and the current entry.
///
/// The result replaces the current entry and the pending operand is cleared.
/// The pending operator is left for the caller to replace or clear.
///
/// # Example
///
/// ```rust
/// use pocketcalc::core::{calculate, InteractionState, Operator};
///
/// let state = InteractionState {
///     current_entry: "5".to_string(),
///     pending_operand: "12".to_string(),
///     pending_operator: Some(Operator::Add),
///     memory_value: 0.0,
/// };
///
/// let evaluation = calculate(&state).unwrap();
/// assert_eq!(evaluation.state.current_entry, "17");
/// assert_eq!(evaluation.entry.text, "12 + 5 = 17");
/// ```
pub fn calculate(state: &InteractionState) -> Option<Evaluation> {
    let operator = state.pending_operator?;

    // Report both operands when both are bad.
    let parsed = Validation::all_vec(vec![
        operand(&state.pending_operand),
        operand(&state.current_entry),
    ]);
    let values = match parsed {
        Validation::Success(values) => values,
        Validation::Failure(errors) => {
            log_aborted(operator.symbol(), &errors);
            return None;
        }
    };
    let [lhs, rhs] = values.as_slice() else {
        return None;
    };

    let result = operator.apply(*lhs, *rhs);
    let text = format!(
        "{} {} {} = {}",
        format_number(*lhs),
        operator,
        format_number(*rhs),
        format_number(result)
    );

    Some(Evaluation {
        state: InteractionState {
            current_entry: format_number(result),
            pending_operand: String::new(),
            ..state.clone()
        },
        entry: TraceEntry::new(TraceKind::Calculation, text),
    })
}

/// Apply a unary function to the current entry.
///
/// # Example
///
/// ```rust
/// use pocketcalc::core::{apply_function, InteractionState, UnaryFunction};
///
/// let state = InteractionState {
///     current_entry: "9".to_string(),
///     ..InteractionState::new()
/// };
///
/// let evaluation = apply_function(&state, UnaryFunction::Sqrt).unwrap();
/// assert_eq!(evaluation.state.current_entry, "3");
/// assert_eq!(evaluation.entry.text, "sqrt(9) = 3");
/// ```
pub fn apply_function(state: &InteractionState, function: UnaryFunction) -> Option<Evaluation> {
    let value = match operand(&state.current_entry) {
        Validation::Success(value) => value,
        Validation::Failure(errors) => {
            log_aborted(function.name(), &errors);
            return None;
        }
    };

    let result = function.apply(value);
    let text = format!(
        "{}({}) = {}",
        function,
        format_number(value),
        format_number(result)
    );

    Some(Evaluation {
        state: InteractionState {
            current_entry: format_number(result),
            ..state.clone()
        },
        entry: TraceEntry::new(TraceKind::Function, text),
    })
}

/// Apply a memory operation.
///
/// Every memory operation needs a numeric current entry, and the trace shows
/// that entry, even for `mc` and `mr`.
///
/// # Example
///
/// ```rust
/// use pocketcalc::core::{apply_memory, InteractionState, MemoryOp};
///
/// let state = InteractionState {
///     current_entry: "7".to_string(),
///     memory_value: 5.0,
///     ..InteractionState::new()
/// };
///
/// let evaluation = apply_memory(&state, MemoryOp::Recall).unwrap();
/// assert_eq!(evaluation.state.current_entry, "5");
/// assert_eq!(evaluation.entry.text, "Memory mr: 7");
/// ```
pub fn apply_memory(state: &InteractionState, op: MemoryOp) -> Option<Evaluation> {
    let value = match operand(&state.current_entry) {
        Validation::Success(value) => value,
        Validation::Failure(errors) => {
            log_aborted(op.label(), &errors);
            return None;
        }
    };

    let mut next = state.clone();
    match op {
        MemoryOp::Clear => next.memory_value = 0.0,
        MemoryOp::Recall => next.current_entry = format_number(state.memory_value),
        MemoryOp::Add => next.memory_value = state.memory_value + value,
        MemoryOp::Subtract => next.memory_value = state.memory_value - value,
    }

    let text = format!("Memory {}: {}", op, format_number(value));
    Some(Evaluation {
        state: next,
        entry: TraceEntry::new(TraceKind::Memory, text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Operator;

    fn pending(lhs: &str, operator: Operator, rhs: &str) -> InteractionState {
        InteractionState {
            current_entry: rhs.to_string(),
            pending_operand: lhs.to_string(),
            pending_operator: Some(operator),
            memory_value: 0.0,
        }
    }

    fn entry(text: &str) -> InteractionState {
        InteractionState {
            current_entry: text.to_string(),
            ..InteractionState::new()
        }
    }

    #[test]
    fn calculate_applies_each_operator() {
        let cases = [
            (Operator::Add, "17"),
            (Operator::Subtract, "7"),
            (Operator::Multiply, "60"),
            (Operator::Divide, "2.4"),
            (Operator::Remainder, "2"),
        ];
        for (operator, expected) in cases {
            let evaluation = calculate(&pending("12", operator, "5")).unwrap();
            assert_eq!(evaluation.state.current_entry, expected);
            assert!(evaluation.state.pending_operand.is_empty());
            assert_eq!(evaluation.entry.kind, TraceKind::Calculation);
        }
    }

    #[test]
    fn calculate_keeps_operator_and_memory() {
        let mut state = pending("2", Operator::Multiply, "3");
        state.memory_value = 4.0;

        let evaluation = calculate(&state).unwrap();
        assert_eq!(evaluation.state.pending_operator, Some(Operator::Multiply));
        assert_eq!(evaluation.state.memory_value, 4.0);
    }

    #[test]
    fn division_by_zero_is_infinite() {
        let evaluation = calculate(&pending("4", Operator::Divide, "0")).unwrap();
        assert_eq!(evaluation.state.current_entry, "Infinity");
        assert_eq!(evaluation.entry.text, "4 / 0 = Infinity");

        let evaluation = calculate(&pending("0", Operator::Divide, "0")).unwrap();
        assert_eq!(evaluation.state.current_entry, "NaN");
    }

    #[test]
    fn calculate_aborts_on_unparseable_operand() {
        assert!(calculate(&pending("12", Operator::Add, ".")).is_none());
        assert!(calculate(&pending("", Operator::Add, "5")).is_none());
        assert!(calculate(&pending(".", Operator::Add, "")).is_none());
        assert!(calculate(&pending("NaN", Operator::Add, "1")).is_none());
    }

    #[test]
    fn calculate_requires_operator() {
        let state = InteractionState {
            pending_operator: None,
            ..pending("1", Operator::Add, "2")
        };
        assert!(calculate(&state).is_none());
    }

    #[test]
    fn functions_trace_input_and_result() {
        let evaluation = apply_function(&entry("9"), UnaryFunction::Sqrt).unwrap();
        assert_eq!(evaluation.entry.text, "sqrt(9) = 3");

        let evaluation = apply_function(&entry("1.5"), UnaryFunction::Square).unwrap();
        assert_eq!(evaluation.state.current_entry, "2.25");
        assert_eq!(evaluation.entry.text, "square(1.5) = 2.25");

        let evaluation = apply_function(&entry("0"), UnaryFunction::Cos).unwrap();
        assert_eq!(evaluation.state.current_entry, "1");
    }

    #[test]
    fn trig_functions_use_radians() {
        let evaluation = apply_function(&entry("0"), UnaryFunction::Sin).unwrap();
        assert_eq!(evaluation.state.current_entry, "0");

        let evaluation = apply_function(&entry("1"), UnaryFunction::Tan).unwrap();
        assert_eq!(evaluation.state.current_entry, format_number(1f64.tan()));
    }

    #[test]
    fn sqrt_of_negative_is_nan() {
        let evaluation = apply_function(&entry("-4"), UnaryFunction::Sqrt).unwrap();
        assert_eq!(evaluation.state.current_entry, "NaN");
    }

    #[test]
    fn function_aborts_on_empty_entry() {
        assert!(apply_function(&entry(""), UnaryFunction::Sin).is_none());
        assert!(apply_function(&entry("."), UnaryFunction::Sqrt).is_none());
    }

    #[test]
    fn memory_add_and_subtract_use_entry() {
        let evaluation = apply_memory(&entry("5"), MemoryOp::Add).unwrap();
        assert_eq!(evaluation.state.memory_value, 5.0);
        assert_eq!(evaluation.entry.text, "Memory m+: 5");

        let evaluation = apply_memory(&evaluation.state, MemoryOp::Subtract).unwrap();
        assert_eq!(evaluation.state.memory_value, 0.0);
        assert_eq!(evaluation.entry.text, "Memory m-: 5");
    }

    #[test]
    fn memory_add_aborts_without_number() {
        assert!(apply_memory(&entry(""), MemoryOp::Add).is_none());
        assert!(apply_memory(&entry("."), MemoryOp::Subtract).is_none());
    }

    #[test]
    fn memory_clear_and_recall_trace_entry() {
        let state = InteractionState {
            memory_value: 5.0,
            ..entry("7")
        };

        let recalled = apply_memory(&state, MemoryOp::Recall).unwrap();
        assert_eq!(recalled.state.current_entry, "5");
        assert_eq!(recalled.state.memory_value, 5.0);
        assert_eq!(recalled.entry.text, "Memory mr: 7");

        let cleared = apply_memory(&state, MemoryOp::Clear).unwrap();
        assert_eq!(cleared.state.memory_value, 0.0);
        assert_eq!(cleared.state.current_entry, "7");
        assert_eq!(cleared.entry.text, "Memory mc: 7");
    }

    #[test]
    fn memory_clear_and_recall_abort_without_number() {
        let state = InteractionState {
            memory_value: 5.0,
            ..entry("")
        };

        assert!(apply_memory(&state, MemoryOp::Recall).is_none());
        assert!(apply_memory(&state, MemoryOp::Clear).is_none());
        assert!(apply_memory(&entry("."), MemoryOp::Recall).is_none());
    }

    #[test]
    fn evaluation_does_not_touch_input_state() {
        let state = pending("12", Operator::Add, "5");
        let before = state.clone();
        let _ = calculate(&state);
        assert_eq!(state, before);
    }
}
