//! Guard predicates for action preconditions.
//!
//! Guards are pure boolean functions over the interaction state. The router
//! consults them before an action mutates anything, so a failed precondition
//! leaves the state untouched.

use super::state::InteractionState;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if an action may run.
///
/// # Example
///
/// ```rust
/// use pocketcalc::core::{Guard, InteractionState};
///
/// let has_entry = Guard::new(|s: &InteractionState| !s.current_entry.is_empty());
///
/// let mut state = InteractionState::new();
/// assert!(!has_entry.check(&state));
///
/// state.current_entry = "7".to_string();
/// assert!(has_entry.check(&state));
/// ```
pub struct Guard<S = InteractionState> {
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows the action in this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }

    /// Guard that passes only when both guards pass.
    pub fn and(self, other: Guard<S>) -> Self
    where
        S: 'static,
    {
        Guard::new(move |s: &S| self.check(s) && other.check(s))
    }
}

impl<S> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

/// The current entry is non-empty.
pub fn has_entry() -> Guard {
    Guard::new(|s: &InteractionState| !s.current_entry.is_empty())
}

/// The current entry has no decimal point yet.
pub fn accepts_decimal_point() -> Guard {
    Guard::new(|s: &InteractionState| !s.has_decimal_point())
}

/// A pending operand and operator exist.
pub fn has_pending_operation() -> Guard {
    Guard::new(|s: &InteractionState| s.has_pending() && s.pending_operator.is_some())
}
