//! What the user sees: the expression line, the result line and the trace list.

use crate::core::{InteractionState, TraceEntry, TraceLog};
use chrono::Local;
use serde::Serialize;

/// Snapshot of the two display lines, rebuilt after every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Display {
    /// Pending operand, operator and current entry
    pub expression: String,
    /// Current entry, or `0` when nothing is typed
    pub result: String,
}

impl Display {
    /// Render the display lines for a state.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pocketcalc::core::{InteractionState, Operator};
    /// use pocketcalc::display::Display;
    ///
    /// let state = InteractionState {
    ///     current_entry: "5".to_string(),
    ///     pending_operand: "12".to_string(),
    ///     pending_operator: Some(Operator::Add),
    ///     memory_value: 0.0,
    /// };
    ///
    /// let display = Display::render(&state);
    /// assert_eq!(display.expression, "12 + 5");
    /// assert_eq!(display.result, "5");
    /// ```
    pub fn render(state: &InteractionState) -> Self {
        let operator = state.pending_operator.map_or("", |op| op.symbol());
        let result = if state.current_entry.is_empty() {
            "0".to_string()
        } else {
            state.current_entry.clone()
        };

        Self {
            expression: format!(
                "{} {} {}",
                state.pending_operand, operator, state.current_entry
            ),
            result,
        }
    }
}

/// Scrolled view over the trace log.
///
/// Shows at most `rows` entries and always keeps the newest one visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryView {
    pub rows: usize,
    pub show_timestamps: bool,
}

impl HistoryView {
    pub fn new(rows: usize, show_timestamps: bool) -> Self {
        Self {
            rows,
            show_timestamps,
        }
    }

    /// Visible entries of `log`, oldest first.
    pub fn visible<'a>(&self, log: &'a TraceLog) -> &'a [TraceEntry] {
        log.tail(self.rows)
    }

    /// Visible entries added after the first `seen` entries of `log`.
    pub fn visible_since<'a>(&self, log: &'a TraceLog, seen: usize) -> &'a [TraceEntry] {
        let visible = self.visible(log);
        let hidden = log.len() - visible.len();
        let skip = seen.saturating_sub(hidden).min(visible.len());
        &visible[skip..]
    }

    /// Format one row of the list.
    pub fn format_row(&self, entry: &TraceEntry) -> String {
        if self.show_timestamps {
            let local = entry.timestamp.with_timezone(&Local);
            format!("{} {}", local.format("%H:%M:%S"), entry.text)
        } else {
            entry.text.clone()
        }
    }
}
