//! # Strata CLI
//!
//! Scaffolds a layered .NET solution and unwinds everything it created if
//! any step fails.
//!
//! ## Startup sequence
//!
//! 1. Short-circuit on `-h` / `--help` anywhere in the arguments.
//! 2. Parse CLI arguments.
//! 3. Initialise the tracing subscriber (logging).
//! 4. Load configuration (defaults + file + env).
//! 5. Build the [`OutputManager`].
//! 6. Dispatch to the scaffold or completions handler.
//! 7. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                     |
//! |------|---------------------------------------------|
//! |  0   | Success, help or version                    |
//! |  1   | External tool, filesystem or internal error |
//! |  2   | User / input error                          |
//! |  4   | Configuration error                         |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, help_requested},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod progress;

fn main() -> ExitCode {
    // Missing .env is the normal case.
    let _ = dotenvy::dotenv();

    if help_requested(std::env::args_os()) {
        return match Cli::command().print_long_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::from(1),
        };
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --version lands here too, with exit code 0.
            let code = e.exit_code();
            let _ = e.print();
            return ExitCode::from(u8::try_from(code).unwrap_or(2));
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: Some(e.into()),
                },
                cli.global.verbose > 0,
                cli.global.no_color,
            );
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;
    let no_color = !output.supports_color();

    match run(cli, &config, output) {
        Ok(()) => {
            info!("Strata completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, no_color),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.scaffold.completions {
        Some(shell) => commands::completions::execute(shell),
        None => commands::scaffold::execute(cli.scaffold, config, output),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// Usage errors are followed by the full usage text.
fn handle_error(err: CliError, verbose: bool, no_color: bool) -> ExitCode {
    err.log();

    let colored = !no_color && std::io::stderr().is_terminal();
    let msg = if colored {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    if err.shows_usage() {
        let help = Cli::command().render_help();
        if colored {
            eprintln!("\n{}", help.ansi());
        } else {
            eprintln!("\n{help}");
        }
    }

    ExitCode::from(err.exit_code())
}
