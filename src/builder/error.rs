//! Build errors for the calculator builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a calculator.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("Initial memory value must be finite (got {0})")]
    NonFiniteMemory(f64),

    #[error("Initial entry '{0}' is not a number")]
    InvalidEntry(String),
}
