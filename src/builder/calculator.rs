//! Builder for constructing calculators.

use crate::builder::error::BuildError;
use crate::config::Config;
use crate::core::{parse_operand, InteractionState};
use crate::input::{Calculator, Keymap};

/// Builder for constructing a [`Calculator`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use pocketcalc::builder::CalculatorBuilder;
/// use pocketcalc::input::Action;
/// use pocketcalc::core::MemoryOp;
///
/// let mut calculator = CalculatorBuilder::new()
///     .memory(42.0)
///     .entry("0")
///     .build()
///     .unwrap();
/// let display = calculator.dispatch(Action::Memory(MemoryOp::Recall));
/// assert_eq!(display.result, "42");
/// ```
#[derive(Debug, Default)]
pub struct CalculatorBuilder {
    config: Option<Config>,
    memory: f64,
    entry: Option<String>,
}

impl CalculatorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a configuration (key bindings are taken from it).
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Start with a value in the memory register.
    pub fn memory(mut self, value: f64) -> Self {
        self.memory = value;
        self
    }

    /// Start with text in the current entry.
    pub fn entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = Some(entry.into());
        self
    }

    /// Build the calculator.
    /// Returns an error if the config is invalid or a starting value is unusable.
    pub fn build(self) -> Result<Calculator, BuildError> {
        let keymap = match &self.config {
            Some(config) => config.keymap()?,
            None => Keymap::new(),
        };

        if !self.memory.is_finite() {
            return Err(BuildError::NonFiniteMemory(self.memory));
        }

        let current_entry = match self.entry {
            Some(entry) if parse_operand(&entry).is_err() => {
                return Err(BuildError::InvalidEntry(entry));
            }
            Some(entry) => entry,
            None => String::new(),
        };

        let state = InteractionState {
            current_entry,
            memory_value: self.memory,
            ..InteractionState::new()
        };

        Ok(Calculator::with_parts(state, keymap))
    }
}
