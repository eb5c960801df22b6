//! Trace log of completed operations.
//!
//! Provides immutable, append-only tracking of calculations, function
//! applications and memory operations, newest last.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What produced a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Calculation,
    Function,
    Memory,
}

/// Record of a single completed operation.
///
/// # Example
///
/// ```rust
/// use pocketcalc::core::{TraceEntry, TraceKind};
///
/// let entry = TraceEntry::new(TraceKind::Function, "sqrt(9) = 3");
/// assert_eq!(entry.text, "sqrt(9) = 3");
/// assert_eq!(entry.to_string(), "sqrt(9) = 3");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Kind of operation
    pub kind: TraceKind,
    /// Human-readable trace, e.g. `12 + 5 = 17`
    pub text: String,
    /// When the operation completed
    pub timestamp: DateTime<Utc>,
}

impl TraceEntry {
    /// Create an entry stamped with the current time.
    pub fn new(kind: TraceKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Ordered log of trace entries.
///
/// The log is immutable - `record` returns a new log with the entry added.
///
/// # Example
///
/// ```rust
/// use pocketcalc::core::{TraceEntry, TraceKind, TraceLog};
///
/// let log = TraceLog::new();
/// let log = log.record(TraceEntry::new(TraceKind::Calculation, "12 + 5 = 17"));
/// let log = log.record(TraceEntry::new(TraceKind::Function, "sqrt(17) = 4.123105625617661"));
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.latest().unwrap().text, "sqrt(17) = 4.123105625617661");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceLog {
    entries: Vec<TraceEntry>,
}

impl TraceLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record an entry, returning a new log.
    ///
    /// This does not mutate the existing log.
    ///
    /// ```rust
    /// use pocketcalc::core::{TraceEntry, TraceKind, TraceLog};
    ///
    /// let log = TraceLog::new();
    /// let new_log = log.record(TraceEntry::new(TraceKind::Memory, "Memory m+: 5"));
    ///
    /// assert_eq!(new_log.len(), 1);
    /// assert!(log.is_empty()); // Original unchanged
    /// ```
    pub fn record(&self, entry: TraceEntry) -> Self {
        let mut log = self.clone();
        log.push(entry);
        log
    }

    /// Append an entry in place. Entries are never removed or reordered.
    pub fn push(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    /// The newest `rows` entries, oldest first.
    ///
    /// This is the view of a list scrolled all the way down.
    pub fn tail(&self, rows: usize) -> &[TraceEntry] {
        let start = self.entries.len().saturating_sub(rows);
        &self.entries[start..]
    }

    /// Time between the first and last entry.
    ///
    /// Returns `None` for an empty log.
    pub fn span(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }
}
