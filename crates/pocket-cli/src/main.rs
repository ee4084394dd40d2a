//! Pocket: keypad calculator on the command line
//!
//! ## Usage
//!
//! ```bash
//! pocket eval 5 + 3 =              # 8, then "5 + 3 = 8"
//! pocket eval --trace 12 / 4 =     # display after every key
//! pocket eval --json 1 / 3 =       # state and history as JSON
//! pocket format 0.30000000000000004
//! pocket keypad --highlight Enter
//! pocket interactive               # q or Ctrl-C quits
//! ```

use clap::Parser;
use pocket_cli::{
    handlers, interactive, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Printer,
    Styling,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = handlers::build_config(&cli)?;
    logging::init(config.verbosity, cli.log_json, config.color)?;
    apply_color(&config);
    tracing::debug!(?config, "configuration resolved");

    let printer = Printer::new();
    let output = match &cli.command {
        Commands::Eval(args) => handlers::eval(&config, args)?,
        Commands::Format(args) => handlers::format(args)?,
        Commands::Keypad(args) => handlers::keypad(&config, args)?,
        Commands::Config => handlers::show_config(&config)?,
        Commands::Interactive => {
            let app = pocket_calc::app::CalculatorApp::with_history_capacity(
                config.history_capacity,
            );
            let app = interactive::run(app, Styling::from_config(&config))?;
            app.history().export_formatted()
        }
    };

    if !output.is_empty() {
        printer.line(&output)?;
    }
    Ok(())
}

fn apply_color(config: &CliConfig) {
    match config.color {
        ColorChoice::Always => console::set_colors_enabled(true),
        ColorChoice::Never => console::set_colors_enabled(false),
        ColorChoice::Auto => {}
    }
}
