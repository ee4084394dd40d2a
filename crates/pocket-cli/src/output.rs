//! Output rendering
//!
//! Everything is rendered to a `String` first so commands can be tested
//! without a terminal; [`Printer`] writes the result to stdout.

use crate::config::CliConfig;
use console::{style, Term};
use pocket_calc::prelude::*;
use serde::Serialize;

/// Output styling options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styling {
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
    /// Print the history line under the display
    pub show_history_line: bool,
}

impl Styling {
    /// Resolves styling from the effective configuration
    #[must_use]
    pub fn from_config(config: &CliConfig) -> Self {
        Self {
            use_color: config.color.should_color(),
            quiet: config.verbosity.is_quiet(),
            show_history_line: config.show_history_line,
        }
    }

    /// Plain text with the history line, for tests and pipes
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            use_color: false,
            quiet: false,
            show_history_line: true,
        }
    }
}

/// Display plus, unless quiet or disabled, the history line beneath it
#[must_use]
pub fn render_session(app: &CalculatorApp, styling: Styling) -> String {
    let display = app.display();
    let display = if styling.use_color {
        if app.state().is_error() {
            style(display).red().bold().to_string()
        } else {
            style(display).bold().to_string()
        }
    } else {
        display
    };

    if styling.quiet || !styling.show_history_line {
        return display;
    }

    let history_line = if styling.use_color {
        style(app.history_line()).dim().to_string()
    } else {
        app.history_line().to_string()
    };
    format!("{display}\n{history_line}")
}

/// One `<key>  <display>` line, used by `eval --trace`
#[must_use]
pub fn render_trace_step(event: Event, app: &CalculatorApp, styling: Styling) -> String {
    let key = format!("{:>9}", event.key_name());
    if styling.use_color {
        format!("{}  {}", style(key).cyan(), app.display())
    } else {
        format!("{key}  {}", app.display())
    }
}

#[derive(Serialize)]
struct SessionSnapshot<'a> {
    display: String,
    history_line: &'a str,
    state: &'a CalculatorState,
    history: Vec<&'a HistoryEntry>,
}

/// Final state and history as pretty JSON
pub fn render_json(app: &CalculatorApp) -> Result<String, serde_json::Error> {
    let snapshot = SessionSnapshot {
        display: app.display(),
        history_line: app.state().last_operation_text(),
        state: app.state(),
        history: app.history().iter().collect(),
    };
    serde_json::to_string_pretty(&snapshot)
}

/// The keypad grid, highlighted button in color when enabled
#[must_use]
pub fn render_keypad(keypad: &Keypad, styling: Styling) -> String {
    let text = keypad.render();
    if !styling.use_color {
        return text;
    }
    let Some(btn) = keypad.pressed_button().and_then(|idx| keypad.get_button(idx)) else {
        return text;
    };
    let marker = format!("[>{}<]", btn.label);
    text.replace(&marker, &style(marker.clone()).reverse().to_string())
}

/// Writes rendered output to stdout
#[derive(Debug)]
pub struct Printer {
    term: Term,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    /// Printer on stdout
    #[must_use]
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Writes `text` followed by a newline
    pub fn line(&self, text: &str) -> std::io::Result<()> {
        self.term.write_line(text)
    }
}
