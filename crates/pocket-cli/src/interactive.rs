//! Interactive terminal mode
//!
//! Raw-mode keyboard loop on the alternate screen. Each key press is mapped
//! to a calculator event and the display is redrawn.

use crate::error::CliResult;
use crate::output::{render_keypad, render_session, Styling};
use crossterm::{
    cursor::MoveTo,
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use pocket_calc::prelude::*;
use std::io::{self, Write};
use tracing::{debug, info};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed an event to the calculator
    Press(Event),
    /// Leave interactive mode
    Quit,
    /// No action (ignored input)
    None,
}

/// Maps terminal key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') => KeyAction::Press(Event::Clear),
                _ => KeyAction::None,
            };
        }

        let key = match code {
            KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Char('n' | '_') => return KeyAction::Press(Event::ToggleSign),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            _ => return KeyAction::None,
        };

        Event::from_key(&key).map_or(KeyAction::None, KeyAction::Press)
    }
}

/// Restores the terminal on drop, including on early return
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Computations listed under the keypad, newest first
pub const RECENT_ENTRIES: usize = 3;

/// Screen contents for one frame, with `\r\n` line ends for raw mode
#[must_use]
pub fn render_frame(app: &CalculatorApp, styling: Styling) -> String {
    let session = render_session(app, Styling { quiet: false, ..styling });
    let keypad = render_keypad(app.keypad(), styling);
    let help = "digits . + - * / % Enter Backspace Esc, n negates, q quits";
    let recent: String = app
        .history()
        .last_n(RECENT_ENTRIES)
        .iter()
        .map(|entry| format!("  {}\n", entry.display()))
        .collect();
    format!("{session}\n\n{keypad}\n\n{recent}{help}\n").replace('\n', "\r\n")
}

fn draw(out: &mut impl Write, app: &CalculatorApp, styling: Styling) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.write_all(render_frame(app, styling).as_bytes())?;
    out.flush()
}

/// Runs the interactive loop until the user quits
pub fn run(mut app: CalculatorApp, styling: Styling) -> CliResult<CalculatorApp> {
    let handler = InputHandler::new();
    let _guard = RawModeGuard::enter()?;
    let mut stdout = io::stdout();
    info!("interactive mode started");

    loop {
        draw(&mut stdout, &app, styling)?;

        let TermEvent::Key(key) = event::read()? else {
            continue;
        };
        match handler.handle_key(key) {
            KeyAction::Press(event) => app.dispatch(event),
            KeyAction::Quit => break,
            KeyAction::None => debug!(?key, "key ignored"),
        }
    }

    info!(computations = app.history().len(), "interactive mode finished");
    Ok(app)
}
