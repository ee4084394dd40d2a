//! Completed computations, newest last
//!
//! Entries hold result text exactly as the display showed it, so a history
//! line reads the same as the trace under the display.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single completed computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Left-hand side, e.g. `"5 + 3"`
    pub expression: String,
    /// Formatted result, e.g. `"8"`
    pub result: String,
    /// Unix epoch millis
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time
    #[must_use]
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self::with_timestamp(expression, result, Self::current_timestamp())
    }

    /// Creates an entry with a fixed timestamp
    #[must_use]
    pub fn with_timestamp(
        expression: impl Into<String>,
        result: impl Into<String>,
        timestamp: u64,
    ) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            timestamp,
        }
    }

    /// Splits a trace like `"5 + 3 = 8"` into expression and result
    ///
    /// Splits on the last `" = "`; returns `None` when there is none.
    #[must_use]
    pub fn from_trace(trace: &str) -> Option<Self> {
        let (expression, result) = trace.rsplit_once(" = ")?;
        Some(Self::new(expression, result))
    }

    fn current_timestamp() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }

    /// `"<expression> = <result>"`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}

/// Bounded history of computations
///
/// Once full, each new entry evicts the oldest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// Creates a history with [`Self::DEFAULT_MAX_ENTRIES`] capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history holding at most `max_entries` (minimum 1)
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Appends an entry, evicting the oldest when full
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Records an expression and its result
    pub fn record(&mut self, expression: &str, result: &str) {
        self.push(HistoryEntry::new(expression, result));
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capacity
    #[must_use]
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Oldest entry
    #[must_use]
    pub fn first(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// The last `n` entries, newest first
    #[must_use]
    pub fn last_n(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Serializes entries to a JSON array, oldest first
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Restores a history from a JSON array
    ///
    /// Uses the default capacity; only the newest entries survive if the
    /// array is longer.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        let mut history = Self::new();
        for entry in entries {
            history.push(entry);
        }
        Ok(history)
    }

    /// One `"<expression> = <result>"` line per entry
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.entries
            .iter()
            .map(HistoryEntry::display)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== HistoryEntry tests =====

    #[test]
    fn test_history_entry_new() {
        let entry = HistoryEntry::new("2 + 2", "4");
        assert_eq!(entry.expression, "2 + 2");
        assert_eq!(entry.result, "4");
        assert!(entry.timestamp > 0);
    }

    #[test]
    fn test_history_entry_with_timestamp() {
        let entry = HistoryEntry::with_timestamp("3 * 3", "9", 1_234_567_890);
        assert_eq!(entry.expression, "3 * 3");
        assert_eq!(entry.result, "9");
        assert_eq!(entry.timestamp, 1_234_567_890);
    }

    #[test]
    fn test_history_entry_display() {
        let entry = HistoryEntry::new("5 + 3", "8");
        assert_eq!(entry.display(), "5 + 3 = 8");
    }

    #[test]
    fn test_history_entry_from_trace() {
        let entry = HistoryEntry::from_trace("-7 * 3 = -21").unwrap();
        assert_eq!(entry.expression, "-7 * 3");
        assert_eq!(entry.result, "-21");
    }

    #[test]
    fn test_history_entry_from_trace_rejects_plain_text() {
        assert!(HistoryEntry::from_trace("").is_none());
        assert!(HistoryEntry::from_trace("42").is_none());
    }

    #[test]
    fn test_history_entry_serialize() {
        let entry = HistoryEntry::with_timestamp("2 * 3", "6", 1000);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"expression":"2 * 3","result":"6","timestamp":1000}"#
        );
    }

    #[test]
    fn test_history_entry_deserialize() {
        let json = r#"{"expression":"10 / 4","result":"2.5","timestamp":2000}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.expression, "10 / 4");
        assert_eq!(entry.result, "2.5");
        assert_eq!(entry.timestamp, 2000);
    }

    // ===== History tests =====

    #[test]
    fn test_history_new() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert_eq!(history.max_entries(), History::DEFAULT_MAX_ENTRIES);
        assert_eq!(History::default(), history);
    }

    #[test]
    fn test_history_with_capacity_floor() {
        assert_eq!(History::with_capacity(50).max_entries(), 50);
        assert_eq!(History::with_capacity(0).max_entries(), 1);
    }

    #[test]
    fn test_history_record() {
        let mut history = History::new();
        history.record("3 + 4", "7");
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().display(), "3 + 4 = 7");
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = History::with_capacity(3);
        for n in ["1", "2", "3", "4"] {
            history.record(n, n);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.first().unwrap().result, "2");
        assert_eq!(history.last().unwrap().result, "4");
    }

    #[test]
    fn test_history_clear() {
        let mut history = History::new();
        history.record("1", "1");
        history.clear();
        assert!(history.is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn test_history_iteration_order() {
        let mut history = History::new();
        history.record("a", "1");
        history.record("b", "2");
        history.record("c", "3");

        let forward: Vec<&str> = history.iter().map(|e| e.result.as_str()).collect();
        assert_eq!(forward, ["1", "2", "3"]);
    }

    #[test]
    fn test_history_last_n() {
        let mut history = History::new();
        for n in ["1", "2", "3", "4"] {
            history.record(n, n);
        }

        let last_2: Vec<&str> = history
            .last_n(2)
            .iter()
            .map(|e| e.result.as_str())
            .collect();
        assert_eq!(last_2, ["4", "3"]);
        assert_eq!(history.last_n(10).len(), 4);
    }

    #[test]
    fn test_history_json_round_trip() {
        let mut original = History::new();
        original.push(HistoryEntry::with_timestamp("1 + 1", "2", 100));
        original.push(HistoryEntry::with_timestamp("0.1 + 0.2", "0.3", 200));

        let json = original.to_json().unwrap();
        assert!(json.starts_with('['));
        let restored = History::from_json(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_history_from_json_invalid() {
        assert!(History::from_json("invalid json").is_err());
        assert!(History::from_json(r#"[{"expression":"a"}]"#).is_err());
    }

    #[test]
    fn test_history_export_formatted() {
        let mut history = History::new();
        history.push(HistoryEntry::with_timestamp("1 + 1", "2", 1000));
        history.push(HistoryEntry::with_timestamp("2 * 3", "6", 2000));

        assert_eq!(history.export_formatted(), "1 + 1 = 2\n2 * 3 = 6");
        assert_eq!(History::new().export_formatted(), "");
    }
}
