//! Calculator core: operand arithmetic, display formatting and the keypad
//! state machine.
//!
//! Nothing in here touches a terminal or a DOM. Every state operation takes
//! a [`CalculatorState`] by value and hands back the next one.

pub mod format;
pub mod history;
mod operations;
pub mod state;

pub use format::{format_display, number_to_text, DIGIT_BUDGET};
pub use operations::{compute, parse_operand, Operation};
pub use state::{CalculatorState, Event, MAX_INPUT_DIGITS};

use thiserror::Error;

/// Text shown in place of a number after a failed evaluation
pub const ERROR_MARKER: &str = "Error";

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// The state machine never returns these to its caller: a failed
/// evaluation is absorbed into the [`ERROR_MARKER`] display state. They
/// surface from [`compute`] and from key/operator parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result overflowed (infinity)
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Operand is not a decimal number
    #[error("Invalid operand: {0}")]
    ParseError(String),
    /// Invalid result (NaN)
    #[error("Invalid result: {0}")]
    InvalidResult(String),
    /// Character is not one of `+ - * /`
    #[error("Unknown operator: {0}")]
    UnknownOperator(char),
    /// Key name has no calculator binding
    #[error("Unknown key: {0}")]
    UnknownKey(String),
    /// Restored state snapshot breaks a state machine rule
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
