//! Builder API for calculator construction.
//!
//! `Calculator::new()` covers the common case; the builder adds configuration
//! and a starting memory register or entry.

pub mod calculator;
pub mod error;

pub use calculator::CalculatorBuilder;
pub use error::BuildError;
