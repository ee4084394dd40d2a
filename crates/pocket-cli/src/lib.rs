//! Pocket CLI library
//!
//! Command-line front end for the `pocket-calc` keypad calculator. The
//! binary is a thin `main` over [`handlers`]; everything that produces
//! output renders to a `String` first so it can be tested without a
//! terminal.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod interactive;
pub mod logging;
pub mod output;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, FormatArgs, KeypadArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{Printer, Styling};
