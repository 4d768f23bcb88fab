//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, help
//! text, and value enums. No business logic lives here.

use std::ffi::OsStr;
use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold a layered .NET solution with Docker support",
    long_about = "Strata creates API, Domain, Application, Infrastructure, Shared and \
                  Tests projects, wires their references, registers them in a \
                  solution and writes a Dockerfile and docker-compose.yml. \
                  If any step fails, everything created so far is removed.",
    after_help = "EXAMPLES:\n\
        \x20 strata Acme\n\
        \x20 strata Acme ~/src\n\
        \x20 strata Acme --dry-run\n\
        \x20 strata --completions bash > ~/.local/share/bash-completion/completions/strata",
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub scaffold: ScaffoldArgs,
}

/// Arguments describing the solution to create.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Solution name; also the prefix of every project.
    ///
    /// Not required by the parser: a missing name is reported with the full
    /// help text, the same way an invalid one is.
    #[arg(
        value_name = "PROJECT_NAME",
        help = "Name of the solution to create (e.g. Acme)"
    )]
    pub name: Option<String>,

    /// Parent directory of the solution root.
    #[arg(
        value_name = "PROJECT_PATH",
        help = "Directory to create the solution in [default: current directory]"
    )]
    pub path: Option<PathBuf>,

    /// Show what would be created without touching the disk or running dotnet.
    #[arg(long = "dry-run", help = "Print the plan without executing it")]
    pub dry_run: bool,

    /// Print a shell completion script and exit.
    #[arg(
        long = "completions",
        value_name = "SHELL",
        value_enum,
        conflicts_with_all = ["name", "path", "dry_run"],
        help = "Generate a completion script for SHELL"
    )]
    pub completions: Option<Shell>,
}

/// Shells supported by `--completions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

/// `true` if `-h` or `--help` appears anywhere in the arguments, including
/// after a `--` terminator.
///
/// Checked ahead of clap so that help wins even when other arguments would
/// fail to parse.
pub fn help_requested<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter().skip(1).any(|a| {
        let a = a.as_ref();
        a == "-h" || a == "--help"
    })
}
