//! Subcommand handlers
//!
//! Each handler returns the text to print so it can be tested directly.

use crate::commands::{Cli, EvalArgs, FormatArgs, KeypadArgs};
use crate::config::{CliConfig, ColorChoice, Verbosity};
use crate::error::{CliError, CliResult};
use crate::output::{render_json, render_keypad, render_session, render_trace_step, Styling};
use pocket_calc::prelude::*;
use tracing::info;

/// Effective configuration: defaults, then `--config`, then flags
pub fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::new(),
    };

    if cli.quiet || cli.verbose > 0 {
        config = config.with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));
    }
    if let Some(color) = cli.color {
        config = config.with_color(ColorChoice::from(color));
    }
    Ok(config)
}

/// `pocket eval`
pub fn eval(config: &CliConfig, args: &EvalArgs) -> CliResult<String> {
    let events = parse_script(&args.keys.join(" "))?;
    let styling = Styling::from_config(config);
    let mut app = CalculatorApp::with_history_capacity(config.history_capacity);
    let mut lines = Vec::new();

    for event in &events {
        app.dispatch(*event);
        if args.trace {
            lines.push(render_trace_step(*event, &app, styling));
        }
    }
    info!(keys = events.len(), display = %app.display(), "evaluated key script");

    if args.json {
        return Ok(render_json(&app)?);
    }
    lines.push(render_session(&app, styling));
    Ok(lines.join("\n"))
}

/// `pocket format`
pub fn format(args: &FormatArgs) -> CliResult<String> {
    let formatted = format_display(&args.value);
    if formatted == ERROR_MARKER && args.value.trim() != ERROR_MARKER {
        return Err(CliError::invalid_argument(format!(
            "not a finite decimal number: {}",
            args.value
        )));
    }
    Ok(formatted)
}

/// `pocket keypad`
pub fn keypad(config: &CliConfig, args: &KeypadArgs) -> CliResult<String> {
    let mut keypad = Keypad::new();
    if let Some(key) = &args.highlight {
        let event = Event::from_key(key)
            .ok_or_else(|| CliError::invalid_argument(format!("no key named {key:?}")))?;
        keypad.highlight(event);
    }
    Ok(render_keypad(&keypad, Styling::from_config(config)))
}

/// `pocket config`
pub fn show_config(config: &CliConfig) -> CliResult<String> {
    Ok(config.to_yaml()?.trim_end().to_string())
}
