//! Keypad state machine
//!
//! [`CalculatorState`] is a plain value. Each operation consumes the state
//! and returns its successor, so a caller can keep snapshots, compare them,
//! or replay an event log without touching any UI.
//!
//! Evaluation failures (division by zero, overflow, unparseable operands)
//! never escape as errors. They move the state into the error display,
//! which is left by [`CalculatorState::clear`] or by typing a digit.

use crate::core::{
    compute, format_display, number_to_text, parse_operand, CalcError, Operation, ERROR_MARKER,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Digits an operand may hold, not counting sign or decimal point
pub const MAX_INPUT_DIGITS: usize = 18;

/// A single keypad input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Digit `0`-`9`
    Digit(char),
    /// Decimal point
    Decimal,
    /// One of `+ - * /`
    Operator(Operation),
    /// Evaluate the pending operation
    Equals,
    /// Flip the sign of the current operand
    ToggleSign,
    /// Divide the current operand by 100
    Percent,
    /// Delete the last entered character
    Backspace,
    /// Reset everything
    Clear,
}

/// Calculator session state
///
/// Deserialization checks the snapshot: `current` must be a numeral or the
/// error marker, and an operator needs a captured operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateSnapshot")]
pub struct CalculatorState {
    current: String,
    previous: Option<String>,
    operator: Option<Operation>,
    waiting_for_next: bool,
    last_operation_text: String,
}

/// Unchecked wire form of [`CalculatorState`]
#[derive(Deserialize)]
struct StateSnapshot {
    current: String,
    previous: Option<String>,
    operator: Option<Operation>,
    waiting_for_next: bool,
    last_operation_text: String,
}

impl TryFrom<StateSnapshot> for CalculatorState {
    type Error = CalcError;

    fn try_from(raw: StateSnapshot) -> Result<Self, Self::Error> {
        if raw.current != ERROR_MARKER && !is_numeral(&raw.current) {
            return Err(CalcError::InvalidState(format!(
                "current operand {:?} is not a number",
                raw.current
            )));
        }
        if let Some(previous) = raw.previous.as_deref() {
            if !is_numeral(previous) {
                return Err(CalcError::InvalidState(format!(
                    "captured operand {previous:?} is not a number"
                )));
            }
        }
        if raw.operator.is_some() != raw.previous.is_some() {
            return Err(CalcError::InvalidState(
                "operator and captured operand must be set together".to_string(),
            ));
        }
        if raw.current == ERROR_MARKER && raw.operator.is_some() {
            return Err(CalcError::InvalidState(
                "error display cannot have a pending operator".to_string(),
            ));
        }
        Ok(Self {
            current: raw.current,
            previous: raw.previous,
            operator: raw.operator,
            waiting_for_next: raw.waiting_for_next,
            last_operation_text: raw.last_operation_text,
        })
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates the power-on state: `"0"` on the display, nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: "0".to_string(),
            previous: None,
            operator: None,
            waiting_for_next: false,
            last_operation_text: String::new(),
        }
    }

    /// The operand being edited, or the error marker
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Operand captured before the pending operator
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// The pending operator
    #[must_use]
    pub const fn operator(&self) -> Option<Operation> {
        self.operator
    }

    /// True when the next digit starts a fresh operand
    #[must_use]
    pub const fn waiting_for_next(&self) -> bool {
        self.waiting_for_next
    }

    /// Trace of the last completed computation, e.g. `"5 + 3 = 8"`
    #[must_use]
    pub fn last_operation_text(&self) -> &str {
        &self.last_operation_text
    }

    /// True while the display shows the error marker
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.current == ERROR_MARKER
    }

    /// The formatted primary display
    #[must_use]
    pub fn display(&self) -> String {
        format_display(&self.current)
    }

    /// Applies one keypad event
    #[must_use]
    pub fn apply(self, event: Event) -> Self {
        debug!(?event, current = %self.current, "applying event");
        match event {
            Event::Digit(d) => self.input_digit(d),
            Event::Decimal => self.input_digit('.'),
            Event::Operator(op) => self.apply_operator(op),
            Event::Equals => self.equals(),
            Event::ToggleSign => self.toggle_sign(),
            Event::Percent => self.apply_percent(),
            Event::Backspace => self.backspace(),
            Event::Clear => self.clear(),
        }
    }

    /// Enters a digit or the decimal point
    ///
    /// Characters other than `0`-`9` and `.` are ignored. A result shown in
    /// exponent form (`1e-7`) is replaced rather than extended.
    #[must_use]
    pub fn input_digit(mut self, d: char) -> Self {
        if !(d.is_ascii_digit() || d == '.') {
            return self;
        }

        if self.waiting_for_next || is_exponent_form(&self.current) {
            self.current = if d == '.' {
                "0.".to_string()
            } else {
                d.to_string()
            };
            self.waiting_for_next = false;
            return self;
        }

        if d == '.' && self.current.contains('.') {
            return self;
        }

        if self.current == "0" && d != '.' {
            self.current = d.to_string();
        } else {
            if digit_count(&self.current) >= MAX_INPUT_DIGITS {
                return self;
            }
            self.current.push(d);
        }

        self.current = strip_leading_zeros(&self.current);
        self
    }

    /// Registers a binary operator, first resolving any pending one
    ///
    /// Ignored while the error marker is shown.
    #[must_use]
    pub fn apply_operator(mut self, op: Operation) -> Self {
        if self.is_error() {
            debug!(%op, "operator ignored in error state");
            return self;
        }

        match (self.previous.clone(), self.operator) {
            (Some(previous), Some(pending)) if !self.waiting_for_next => {
                match compute(&previous, &self.current, pending) {
                    Ok(result) => {
                        let text = number_to_text(result);
                        self.previous = Some(text.clone());
                        self.current = text;
                    }
                    Err(err) => {
                        warn!(%err, "chained evaluation failed");
                        return self.into_error();
                    }
                }
            }
            _ => self.previous = Some(self.current.clone()),
        }

        self.operator = Some(op);
        self.waiting_for_next = true;
        self
    }

    /// Evaluates the pending operation
    #[must_use]
    pub fn equals(mut self) -> Self {
        let (Some(previous), Some(op)) = (self.previous.clone(), self.operator) else {
            self.last_operation_text.clear();
            return self;
        };

        match compute(&previous, &self.current, op) {
            Ok(result) => {
                let text = number_to_text(result);
                self.last_operation_text = format!(
                    "{} {} {} = {}",
                    format_display(&previous),
                    op,
                    format_display(&self.current),
                    format_display(&text)
                );
                debug!(trace = %self.last_operation_text, "evaluated");
                self.current = text;
                self.previous = None;
                self.operator = None;
                self.waiting_for_next = true;
                self
            }
            Err(err) => {
                warn!(%err, "evaluation failed");
                self.into_error()
            }
        }
    }

    /// Adds or removes a leading minus sign
    ///
    /// No-op on `"0"` and on the error marker.
    #[must_use]
    pub fn toggle_sign(mut self) -> Self {
        if self.current == "0" || self.is_error() {
            return self;
        }
        self.current = match self.current.strip_prefix('-') {
            Some(rest) => rest.to_string(),
            None => format!("-{}", self.current),
        };
        self
    }

    /// Replaces the current operand with one hundredth of itself
    ///
    /// Unparseable text, including the error marker, becomes `"0"`.
    #[must_use]
    pub fn apply_percent(mut self) -> Self {
        self.current = match parse_operand(&self.current) {
            Ok(value) => number_to_text(value / 100.0),
            Err(_) => "0".to_string(),
        };
        self
    }

    /// Deletes the last character of the current operand
    #[must_use]
    pub fn backspace(mut self) -> Self {
        if self.waiting_for_next || is_exponent_form(&self.current) {
            self.current = "0".to_string();
            self.waiting_for_next = false;
            return self;
        }

        if self.current.chars().count() <= 1 {
            self.current = "0".to_string();
        } else {
            self.current.pop();
            if self.current.is_empty() || self.current == "-" {
                self.current = "0".to_string();
            }
        }
        self
    }

    /// Returns to the power-on state
    #[must_use]
    pub fn clear(self) -> Self {
        Self::new()
    }

    fn into_error(mut self) -> Self {
        self.current = ERROR_MARKER.to_string();
        self.previous = None;
        self.operator = None;
        self.waiting_for_next = true;
        self.last_operation_text.clear();
        self
    }
}

/// Operand text as the state machine produces it: untrimmed, finite
fn is_numeral(text: &str) -> bool {
    !text.is_empty() && text.trim() == text && !text.starts_with('+') && parse_operand(text).is_ok()
}

/// Result text such as `1e-7` that cannot be edited digit by digit
fn is_exponent_form(text: &str) -> bool {
    text.contains('e')
}

/// Digits in an operand, ignoring sign and decimal point
fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

/// Drops superfluous leading zeros, keeping one before a decimal point
fn strip_leading_zeros(text: &str) -> String {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let trimmed = body.trim_start_matches('0');
    let body = if trimmed.is_empty() || trimmed.starts_with('.') {
        format!("0{trimmed}")
    } else {
        trimmed.to_string()
    };
    format!("{sign}{body}")
}
