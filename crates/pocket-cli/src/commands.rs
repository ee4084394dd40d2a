//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Pocket: a keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "pocket")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, global = true)]
    pub color: Option<ColorArg>,

    /// YAML configuration file
    #[arg(long, global = true, env = "POCKET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a sequence of keys and print the display
    ///
    /// Keys are key names separated by spaces: digits, `.`, `+ - * /`,
    /// `%`, `=` or `Enter`, `Backspace`, `Escape`, `Negate`. Runs of
    /// digits such as `125` are split into single keys.
    Eval(EvalArgs),

    /// Format a number the way the display shows it
    Format(FormatArgs),

    /// Print the keypad layout
    Keypad(KeypadArgs),

    /// Run the calculator in the terminal
    Interactive,

    /// Show the effective configuration
    Config,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Keys to press, in order
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Print the final state and history as JSON
    #[arg(long, conflicts_with = "trace")]
    pub json: bool,

    /// Print the display after every key
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for the format command
#[derive(Parser, Debug)]
pub struct FormatArgs {
    /// Decimal text, e.g. 0.1 or -1234567890123
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for the keypad command
#[derive(Parser, Debug)]
pub struct KeypadArgs {
    /// Highlight the button a key name maps to
    #[arg(long)]
    pub highlight: Option<String>,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
