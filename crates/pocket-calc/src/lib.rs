//! Pocket Calculator - keypad calculator engine
//!
//! A four-function calculator driven one key at a time, the way a pocket
//! calculator or a web keypad is. The engine is a pure state machine: each
//! key consumes a [`CalculatorState`](core::CalculatorState) and returns the
//! next one, and display text is derived from it on demand.
//!
//! # Layers
//!
//! - [`core`]: operand arithmetic, display formatting, the state machine
//!   and history
//! - [`keypad`]: keyboard key routing and the on-screen button grid
//! - [`app`]: a session handle owning the state, history and keypad
//!
//! # Example
//!
//! ```rust
//! use pocket_calc::prelude::*;
//!
//! let mut app = CalculatorApp::new();
//! app.run_script("5 + 3 Enter").unwrap();
//! assert_eq!(app.display(), "8");
//! assert_eq!(app.history_line(), "5 + 3 = 8");
//!
//! // Errors are a display state, not a panic
//! app.run_script("8 / 0 =").unwrap();
//! assert_eq!(app.display(), "Error");
//!
//! // The state machine can be driven directly
//! let state = CalculatorState::new()
//!     .input_digit('7')
//!     .toggle_sign();
//! assert_eq!(state.current(), "-7");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod app;
pub mod core;
pub mod keypad;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::app::{parse_script, CalculatorApp, EMPTY_HISTORY_LINE};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        compute, format_display, number_to_text, CalcError, CalcResult, CalculatorState, Event,
        Operation, DIGIT_BUDGET, ERROR_MARKER, MAX_INPUT_DIGITS,
    };
    pub use crate::keypad::{Keypad, KeypadButton};
}
