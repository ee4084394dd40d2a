//! Calculator session: state, history and keypad behind one handle

use crate::core::history::{History, HistoryEntry};
use crate::core::{CalcError, CalcResult, CalculatorState, Event};
use crate::keypad::Keypad;
use std::mem;
use tracing::debug;

/// Shown under the display when there is no trace, so the line keeps its height
pub const EMPTY_HISTORY_LINE: &str = "\u{00A0}";

/// Parses a whitespace-separated key script into events
///
/// Each token is a key name (`5`, `+`, `Enter`, `Escape`), a keypad label
/// (`±`, `⌫`, `C`), or `Negate` for the sign key. Tokens made only of
/// digits and `.` are split into one key per character, so `12.5` is four
/// keys.
pub fn parse_script(script: &str) -> CalcResult<Vec<Event>> {
    let keypad = Keypad::new();
    let mut events = Vec::new();
    for token in script.split_whitespace() {
        if let Some(event) = script_event(&keypad, token) {
            events.push(event);
        } else if token.chars().all(|c| c.is_ascii_digit() || c == '.') {
            events.extend(token.chars().filter_map(|c| Event::from_key(&c.to_string())));
        } else {
            return Err(CalcError::UnknownKey(token.to_string()));
        }
    }
    Ok(events)
}

fn script_event(keypad: &Keypad, token: &str) -> Option<Event> {
    if token == "Negate" {
        return Some(Event::ToggleSign);
    }
    Event::from_key(token).or_else(|| {
        keypad
            .find_button_by_label(token)
            .and_then(|idx| keypad.get_button(idx))
            .map(|btn| btn.event)
    })
}

/// Owns the one mutable [`CalculatorState`] of a session
///
/// Every successful equals lands in [`History`]; the keypad tracks which
/// button was pressed last.
#[derive(Debug, Clone, Default)]
pub struct CalculatorApp {
    state: CalculatorState,
    history: History,
    keypad: Keypad,
}

impl CalculatorApp {
    /// Creates a session with the default history capacity
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session keeping at most `capacity` history entries
    #[must_use]
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            history: History::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Current state snapshot
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Completed computations
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The keypad, with the last pressed button highlighted
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Formatted primary display
    #[must_use]
    pub fn display(&self) -> String {
        self.state.display()
    }

    /// Trace of the last computation, or [`EMPTY_HISTORY_LINE`]
    #[must_use]
    pub fn history_line(&self) -> &str {
        match self.state.last_operation_text() {
            "" => EMPTY_HISTORY_LINE,
            trace => trace,
        }
    }

    /// Applies one event
    pub fn dispatch(&mut self, event: Event) {
        self.keypad.highlight(event);
        self.state = mem::take(&mut self.state).apply(event);

        if event == Event::Equals && !self.state.is_error() {
            if let Some(entry) = HistoryEntry::from_trace(self.state.last_operation_text()) {
                debug!(entry = %entry.display(), "recorded");
                self.history.push(entry);
            }
        }
    }

    /// Routes a keyboard key name; returns false when the key is ignored
    pub fn press_key(&mut self, key: &str) -> bool {
        match Event::from_key(key) {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => {
                debug!(key, "key ignored");
                false
            }
        }
    }

    /// Presses the keypad button with this label or element id
    /// (`"7"`, `"±"`, `"btn-equals"`)
    pub fn press_button(&mut self, label: &str) -> CalcResult<()> {
        let event = self
            .keypad
            .find_button_by_label(label)
            .or_else(|| self.keypad.find_button_by_id(label))
            .and_then(|idx| self.keypad.get_button(idx))
            .map(|btn| btn.event)
            .ok_or_else(|| CalcError::UnknownKey(label.to_string()))?;
        self.dispatch(event);
        Ok(())
    }

    /// Runs a key script (see [`parse_script`]) and returns the number of
    /// events applied
    ///
    /// Nothing is applied if any token is unknown.
    pub fn run_script(&mut self, script: &str) -> CalcResult<usize> {
        let events = parse_script(script)?;
        for event in &events {
            self.dispatch(*event);
        }
        Ok(events.len())
    }

    /// Back to power-on: state cleared, history emptied, keypad released
    pub fn reset(&mut self) {
        self.state = CalculatorState::new();
        self.history.clear();
        self.keypad.release_all();
    }
}
