//! Discrete user actions.

use crate::core::{MemoryOp, Operator, UnaryFunction};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Everything a button press or key press can ask the calculator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Digit 0-9
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    /// Reset entry and pending operation (memory survives)
    Clear,
    /// Drop the last typed character
    Delete,
    Function(UnaryFunction),
    Memory(MemoryOp),
}

/// Name that matches no action.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl Action {
    /// Action for a digit character.
    pub fn digit(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self::Digit(d as u8))
    }

    /// Action for a labeled control that has no single-key equivalent.
    ///
    /// These are the labels the terminal front end accepts as whole tokens.
    pub fn from_button_label(label: &str) -> Option<Self> {
        let action = match label {
            "sqrt" | "√" => Self::Function(UnaryFunction::Sqrt),
            "square" | "x²" => Self::Function(UnaryFunction::Square),
            "sin" => Self::Function(UnaryFunction::Sin),
            "cos" => Self::Function(UnaryFunction::Cos),
            "tan" => Self::Function(UnaryFunction::Tan),
            "mc" => Self::Memory(MemoryOp::Clear),
            "mr" => Self::Memory(MemoryOp::Recall),
            "m+" => Self::Memory(MemoryOp::Add),
            "m-" => Self::Memory(MemoryOp::Subtract),
            "clear" | "AC" => Self::Clear,
            "del" | "DEL" => Self::Delete,
            _ => return None,
        };
        Some(action)
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(action) = Self::from_button_label(s) {
            return Ok(action);
        }

        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(action) = Self::digit(c) {
                return Ok(action);
            }
            if let Some(op) = Operator::from_symbol(c) {
                return Ok(Self::Operator(op));
            }
        }

        match s {
            "." | "decimal" => Ok(Self::Decimal),
            "=" | "equals" => Ok(Self::Equals),
            "delete" => Ok(Self::Delete),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Decimal => f.write_str("."),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Equals => f.write_str("="),
            Self::Clear => f.write_str("clear"),
            Self::Delete => f.write_str("delete"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Memory(op) => write!(f, "{op}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("7".parse(), Ok(Action::Digit(7)));
        assert_eq!("%".parse(), Ok(Action::Operator(Operator::Remainder)));
        assert_eq!("equals".parse(), Ok(Action::Equals));
        assert_eq!("decimal".parse(), Ok(Action::Decimal));
        assert_eq!("cos".parse(), Ok(Action::Function(UnaryFunction::Cos)));
        assert_eq!("m-".parse(), Ok(Action::Memory(MemoryOp::Subtract)));
        assert_eq!("clear".parse(), Ok(Action::Clear));
        assert_eq!("delete".parse(), Ok(Action::Delete));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "log".parse::<Action>(),
            Err(UnknownAction("log".to_string()))
        );
        assert!("".parse::<Action>().is_err());
        assert!("12".parse::<Action>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let actions = [
            Action::Digit(0),
            Action::Decimal,
            Action::Operator(Operator::Divide),
            Action::Equals,
            Action::Clear,
            Action::Delete,
            Action::Function(UnaryFunction::Square),
            Action::Memory(MemoryOp::Recall),
        ];
        for action in actions {
            assert_eq!(action.to_string().parse(), Ok(action));
        }
    }

    #[test]
    fn button_labels_cover_controls_without_keys() {
        assert_eq!(
            Action::from_button_label("x²"),
            Some(Action::Function(UnaryFunction::Square))
        );
        assert_eq!(Action::from_button_label("del"), Some(Action::Delete));
        assert_eq!(Action::from_button_label("5"), None);
    }
}
