//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, Shell};

pub fn execute(shell: Shell) -> crate::error::CliResult<()> {
    let mut cmd = Cli::command();
    let mut out = std::io::stdout();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, "strata", &mut out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, "strata", &mut out),
        Shell::Fish => generate(shells::Fish, &mut cmd, "strata", &mut out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, "strata", &mut out),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, "strata", &mut out),
    };

    Ok(())
}
