//! Routes actions to state changes.

use super::action::Action;
use super::keymap::{Key, Keymap};
use crate::core::guard::{accepts_decimal_point, has_entry, has_pending_operation};
use crate::core::{
    apply_function, apply_memory, calculate, Evaluation, Guard, InteractionState, TraceLog,
};
use crate::display::Display;
use std::mem;
use tracing::debug;

/// Preconditions the router checks before acting.
#[derive(Debug, Clone)]
struct Preconditions {
    decimal: Guard,
    operator: Guard,
    equals: Guard,
}

impl Default for Preconditions {
    fn default() -> Self {
        Self {
            decimal: accepts_decimal_point(),
            operator: has_entry(),
            equals: has_pending_operation().and(has_entry()),
        }
    }
}

/// The calculator: interaction state, trace log and key table.
///
/// Every action runs to completion and returns the refreshed display.
///
/// # Example
///
/// ```rust
/// use pocketcalc::input::{Action, Calculator};
/// use pocketcalc::core::Operator;
///
/// let mut calculator = Calculator::new();
/// calculator.dispatch(Action::Digit(1));
/// calculator.dispatch(Action::Digit(2));
/// calculator.dispatch(Action::Operator(Operator::Add));
/// calculator.dispatch(Action::Digit(5));
/// let display = calculator.dispatch(Action::Equals);
///
/// assert_eq!(display.result, "17");
/// assert_eq!(calculator.history().latest().unwrap().text, "12 + 5 = 17");
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    state: InteractionState,
    history: TraceLog,
    keymap: Keymap,
    guards: Preconditions,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Create a calculator with a fresh state and the default key table.
    pub fn new() -> Self {
        Self::with_parts(InteractionState::new(), Keymap::new())
    }

    pub(crate) fn with_parts(state: InteractionState, keymap: Keymap) -> Self {
        Self {
            state,
            history: TraceLog::new(),
            keymap,
            guards: Preconditions::default(),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn history(&self) -> &TraceLog {
        &self.history
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Current display lines.
    pub fn display(&self) -> Display {
        Display::render(&self.state)
    }

    /// Translate a key press and dispatch it.
    ///
    /// Returns `None`, leaving everything untouched, for unmapped keys.
    pub fn press_key(&mut self, key: Key) -> Option<Display> {
        let Some(action) = self.keymap.translate(key) else {
            debug!(?key, "ignoring unmapped key");
            return None;
        };
        Some(self.dispatch(action))
    }

    /// Apply one action and return the refreshed display.
    pub fn dispatch(&mut self, action: Action) -> Display {
        debug!(%action, phase = self.state.phase().name(), "dispatch");

        match action {
            Action::Digit(digit) => {
                let Some(digit) = char::from_digit(u32::from(digit), 10) else {
                    debug!(digit, "ignoring out-of-range digit");
                    return self.display();
                };
                if self.state.current_entry == "0" {
                    self.state.current_entry.clear();
                }
                self.state.current_entry.push(digit);
            }
            Action::Decimal => {
                if self.guards.decimal.check(&self.state) {
                    self.state.current_entry.push('.');
                }
            }
            Action::Operator(op) => {
                if self.guards.operator.check(&self.state) {
                    // Chained operators settle the previous operation first.
                    if self.state.has_pending() {
                        match calculate(&self.state) {
                            Some(evaluation) => self.apply(evaluation),
                            None => return self.display(),
                        }
                    }
                    self.state.pending_operator = Some(op);
                    self.state.pending_operand = mem::take(&mut self.state.current_entry);
                }
            }
            Action::Equals => {
                if self.guards.equals.check(&self.state) {
                    if let Some(evaluation) = calculate(&self.state) {
                        self.apply(evaluation);
                        self.state.pending_operator = None;
                        self.state.pending_operand.clear();
                    }
                }
            }
            Action::Clear => self.state.clear_entry(),
            Action::Delete => {
                self.state.current_entry.pop();
            }
            Action::Function(function) => {
                if let Some(evaluation) = apply_function(&self.state, function) {
                    self.apply(evaluation);
                }
            }
            Action::Memory(op) => {
                if let Some(evaluation) = apply_memory(&self.state, op) {
                    self.apply(evaluation);
                }
            }
        }

        self.display()
    }

    /// Install an evaluation's state and record its trace entry.
    fn apply(&mut self, evaluation: Evaluation) {
        debug!(trace = %evaluation.entry, "recorded");
        self.state = evaluation.state;
        self.history.push(evaluation.entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MemoryOp, Operator, UnaryFunction};

    fn type_digits(calculator: &mut Calculator, digits: &str) {
        for c in digits.chars() {
            let action = if c == '.' {
                Action::Decimal
            } else {
                Action::digit(c).unwrap()
            };
            calculator.dispatch(action);
        }
    }

    #[test]
    fn digits_append() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "123");
        assert_eq!(calculator.state().current_entry, "123");
    }

    #[test]
    fn out_of_range_digit_is_ignored() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "4");

        let display = calculator.dispatch(Action::Digit(12));
        assert_eq!(display.result, "4");
        assert_eq!(calculator.state().current_entry, "4");

        calculator.dispatch(Action::Digit(u8::MAX));
        assert_eq!(calculator.state().current_entry, "4");
    }

    #[test]
    fn history_grows_in_place() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "9");
        calculator.dispatch(Action::Function(UnaryFunction::Sqrt));
        calculator.dispatch(Action::Function(UnaryFunction::Square));

        let texts: Vec<&str> = calculator
            .history()
            .entries()
            .iter()
            .map(|entry| entry.text.as_str())
            .collect();
        assert_eq!(texts, ["sqrt(9) = 3", "square(3) = 9"]);
    }

    #[test]
    fn leading_zero_is_replaced() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "07");
        assert_eq!(calculator.state().current_entry, "7");

        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "0.5");
        assert_eq!(calculator.state().current_entry, "0.5");
    }

    #[test]
    fn decimal_point_only_once() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "1..2.");
        assert_eq!(calculator.state().current_entry, "1.2");
    }

    #[test]
    fn operator_moves_entry_to_pending() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "12");
        let display = calculator.dispatch(Action::Operator(Operator::Multiply));

        let state = calculator.state();
        assert_eq!(state.pending_operand, "12");
        assert_eq!(state.pending_operator, Some(Operator::Multiply));
        assert!(state.current_entry.is_empty());
        assert_eq!(display.expression, "12 * ");
        assert_eq!(display.result, "0");
    }

    #[test]
    fn operator_without_entry_is_ignored() {
        let mut calculator = Calculator::new();
        calculator.dispatch(Action::Operator(Operator::Add));
        assert_eq!(calculator.state(), &InteractionState::new());

        type_digits(&mut calculator, "4");
        calculator.dispatch(Action::Operator(Operator::Add));
        calculator.dispatch(Action::Operator(Operator::Subtract));
        assert_eq!(calculator.state().pending_operator, Some(Operator::Add));
    }

    #[test]
    fn chained_operator_uses_previous_operator() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "2");
        calculator.dispatch(Action::Operator(Operator::Add));
        type_digits(&mut calculator, "3");
        calculator.dispatch(Action::Operator(Operator::Multiply));

        let state = calculator.state();
        assert_eq!(state.pending_operand, "5");
        assert_eq!(state.pending_operator, Some(Operator::Multiply));
        assert!(state.current_entry.is_empty());
        assert_eq!(calculator.history().latest().unwrap().text, "2 + 3 = 5");

        type_digits(&mut calculator, "4");
        let display = calculator.dispatch(Action::Equals);
        assert_eq!(display.result, "20");
    }

    #[test]
    fn chained_operator_with_bad_entry_is_a_no_op() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "2");
        calculator.dispatch(Action::Operator(Operator::Add));
        calculator.dispatch(Action::Decimal);
        let before = calculator.state().clone();

        calculator.dispatch(Action::Operator(Operator::Subtract));

        assert_eq!(calculator.state(), &before);
        assert!(calculator.history().is_empty());
    }

    #[test]
    fn equals_clears_pending_operation() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "9");
        calculator.dispatch(Action::Operator(Operator::Subtract));
        type_digits(&mut calculator, "4");
        let display = calculator.dispatch(Action::Equals);

        assert_eq!(display.result, "5");
        assert_eq!(display.expression, "  5");
        assert!(!calculator.state().has_pending());
        assert_eq!(calculator.state().pending_operator, None);
    }

    #[test]
    fn equals_with_unparseable_entry_changes_nothing() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "9");
        calculator.dispatch(Action::Operator(Operator::Subtract));
        calculator.dispatch(Action::Decimal);
        let before = calculator.state().clone();

        calculator.dispatch(Action::Equals);

        assert_eq!(calculator.state(), &before);
        assert!(calculator.history().is_empty());
    }

    #[test]
    fn delete_drops_last_character() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "12.5");
        calculator.dispatch(Action::Delete);
        assert_eq!(calculator.state().current_entry, "12.");
        calculator.dispatch(Action::Delete);
        calculator.dispatch(Action::Delete);
        calculator.dispatch(Action::Delete);
        calculator.dispatch(Action::Delete);
        assert_eq!(calculator.state().current_entry, "");
    }

    #[test]
    fn clear_keeps_memory_and_history() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "5");
        calculator.dispatch(Action::Memory(MemoryOp::Add));
        calculator.dispatch(Action::Operator(Operator::Add));
        type_digits(&mut calculator, "1");

        calculator.dispatch(Action::Clear);

        let state = calculator.state();
        assert!(state.current_entry.is_empty());
        assert!(state.pending_operand.is_empty());
        assert_eq!(state.pending_operator, None);
        assert_eq!(state.memory_value, 5.0);
        assert_eq!(calculator.history().len(), 1);
    }

    #[test]
    fn function_replaces_entry() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "3");
        let display = calculator.dispatch(Action::Function(UnaryFunction::Square));
        assert_eq!(display.result, "9");
        assert_eq!(calculator.history().latest().unwrap().text, "square(3) = 9");
    }

    #[test]
    fn function_on_second_operand_keeps_pending() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "1");
        calculator.dispatch(Action::Operator(Operator::Add));
        type_digits(&mut calculator, "16");
        calculator.dispatch(Action::Function(UnaryFunction::Sqrt));

        assert_eq!(calculator.state().pending_operand, "1");
        let display = calculator.dispatch(Action::Equals);
        assert_eq!(display.result, "5");
    }

    #[test]
    fn typing_after_result_appends() {
        let mut calculator = Calculator::new();
        type_digits(&mut calculator, "9");
        calculator.dispatch(Action::Function(UnaryFunction::Sqrt));
        type_digits(&mut calculator, "1");
        assert_eq!(calculator.state().current_entry, "31");
    }

    #[test]
    fn press_key_translates_and_dispatches() {
        let mut calculator = Calculator::new();
        for key in ['4', '*', '2'] {
            calculator.press_key(Key::Char(key));
        }
        let display = calculator.press_key(Key::Enter).unwrap();
        assert_eq!(display.result, "8");
    }

    #[test]
    fn unmapped_key_returns_none() {
        let mut calculator = Calculator::new();
        assert!(calculator.press_key(Key::Char('z')).is_none());
        assert!(calculator.press_key(Key::Unknown).is_none());
        assert_eq!(calculator.state(), &InteractionState::new());
    }
}
