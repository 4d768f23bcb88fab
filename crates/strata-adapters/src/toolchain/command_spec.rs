use std::ffi::OsString;
use std::fmt;
use std::process::Command;

// ============================================================================
// CommandSpec - argv-style process specification
// ============================================================================

/// Specification for a command to execute.
///
/// Arguments are discrete `OsString` elements, never a shell string, so
/// project names and paths reach the toolchain verbatim.
///
/// # Example
///
/// ```rust
/// use strata_adapters::CommandSpec;
///
/// let cmd = CommandSpec::new("dotnet")
///     .arg("restore")
///     .arg("Acme.sln");
///
/// assert_eq!(cmd.args.len(), 2);
/// assert_eq!(cmd.to_string(), "dotnet restore Acme.sln");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements (NOT shell strings)
    pub args: Vec<OsString>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Convert to a `std::process::Command`. Paths in the arguments are
    /// absolute, so the child inherits the caller's working directory.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Human-readable rendering for logs and error messages. Arguments with
/// whitespace are double-quoted; this is not a shell-safe escaping.
impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
