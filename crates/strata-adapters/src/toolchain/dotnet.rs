//! `dotnet` CLI adapter for the [`Toolchain`] port.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::{debug, instrument, trace};

use strata_core::{
    application::{ApplicationError, ports::Toolchain},
    domain::TemplateKind,
    error::StrataResult,
};

use super::CommandSpec;

/// Runs the real .NET SDK.
///
/// Each port call maps to exactly one `dotnet` invocation:
///
/// | Port call          | Command                                         |
/// |--------------------|-------------------------------------------------|
/// | `new_project`      | `dotnet new <kind> -n <name> -o <dir>`          |
/// | `new_solution`     | `dotnet new sln -n <name> -o <dir>`             |
/// | `add_to_solution`  | `dotnet sln <sln> add <csproj>`                 |
/// | `add_references`   | `dotnet add <csproj> reference <csproj>...`     |
/// | `restore`          | `dotnet restore <sln>`                          |
#[derive(Debug, Clone)]
pub struct DotnetToolchain {
    program: OsString,
}

impl DotnetToolchain {
    pub fn new() -> Self {
        Self::with_program("dotnet")
    }

    /// Use a different executable (a pinned SDK, a wrapper script).
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn base(&self) -> CommandSpec {
        CommandSpec::new(self.program.clone())
    }

    pub fn new_project_command(
        &self,
        kind: TemplateKind,
        name: &str,
        output_dir: &Path,
    ) -> CommandSpec {
        self.base()
            .args(["new", kind.as_str(), "-n", name, "-o"])
            .arg(output_dir)
    }

    pub fn add_references_command(&self, project: &Path, targets: &[PathBuf]) -> CommandSpec {
        self.base()
            .arg("add")
            .arg(project)
            .arg("reference")
            .args(targets)
    }

    pub fn new_solution_command(&self, name: &str, output_dir: &Path) -> CommandSpec {
        self.base()
            .args(["new", "sln", "-n", name, "-o"])
            .arg(output_dir)
    }

    pub fn add_to_solution_command(&self, solution: &Path, project: &Path) -> CommandSpec {
        self.base()
            .arg("sln")
            .arg(solution)
            .arg("add")
            .arg(project)
    }

    pub fn restore_command(&self, solution: &Path) -> CommandSpec {
        self.base().arg("restore").arg(solution)
    }
}

impl Default for DotnetToolchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolchain for DotnetToolchain {
    fn new_project(&self, kind: TemplateKind, name: &str, output_dir: &Path) -> StrataResult<()> {
        run(&self.new_project_command(kind, name, output_dir))
    }

    fn add_references(&self, project: &Path, targets: &[PathBuf]) -> StrataResult<()> {
        run(&self.add_references_command(project, targets))
    }

    fn new_solution(&self, name: &str, output_dir: &Path) -> StrataResult<()> {
        run(&self.new_solution_command(name, output_dir))
    }

    fn add_to_solution(&self, solution: &Path, project: &Path) -> StrataResult<()> {
        run(&self.add_to_solution_command(solution, project))
    }

    fn restore(&self, solution: &Path) -> StrataResult<()> {
        run(&self.restore_command(solution))
    }
}

/// Run to completion, capturing output. Non-zero exit is an error.
#[instrument(skip_all, fields(command = %spec))]
pub(crate) fn run(spec: &CommandSpec) -> StrataResult<()> {
    debug!("Running external command");

    let output = spec
        .to_command()
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ApplicationError::ExternalTool {
            command: spec.to_string(),
            status: None,
            stderr: e.to_string(),
        })?;

    trace!(stdout = %String::from_utf8_lossy(&output.stdout), "Command output");

    if output.status.success() {
        return Ok(());
    }

    // dotnet reports most failures on stdout.
    let stderr = if output.stderr.iter().all(u8::is_ascii_whitespace) {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        String::from_utf8_lossy(&output.stderr).into_owned()
    };

    Err(ApplicationError::ExternalTool {
        command: spec.to_string(),
        status: output.status.code(),
        stderr,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::error::StrataError;

    fn argv(spec: &CommandSpec) -> Vec<String> {
        spec.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn new_project_argv() {
        let tc = DotnetToolchain::new();
        let spec = tc.new_project_command(
            TemplateKind::WebApi,
            "Acme.API",
            Path::new("/w/Acme/Acme.API"),
        );
        assert_eq!(spec.program, OsString::from("dotnet"));
        assert_eq!(argv(&spec), ["new", "webapi", "-n", "Acme.API", "-o", "/w/Acme/Acme.API"]);
    }

    #[test]
    fn solution_argv() {
        let tc = DotnetToolchain::new();
        assert_eq!(
            argv(&tc.new_solution_command("Acme", Path::new("/w/Acme"))),
            ["new", "sln", "-n", "Acme", "-o", "/w/Acme"]
        );
        assert_eq!(
            argv(&tc.add_to_solution_command(
                Path::new("/w/Acme/Acme.sln"),
                Path::new("/w/Acme/Acme.Tests/Acme.Tests.csproj"),
            )),
            ["sln", "/w/Acme/Acme.sln", "add", "/w/Acme/Acme.Tests/Acme.Tests.csproj"]
        );
    }

    #[test]
    fn references_are_one_call_per_source() {
        let tc = DotnetToolchain::new();
        let spec = tc.add_references_command(
            Path::new("api.csproj"),
            &[PathBuf::from("domain.csproj"), PathBuf::from("app.csproj")],
        );
        assert_eq!(
            argv(&spec),
            ["add", "api.csproj", "reference", "domain.csproj", "app.csproj"]
        );
    }

    #[test]
    fn custom_program_is_used() {
        let tc = DotnetToolchain::with_program("/opt/dotnet/dotnet");
        let spec = tc.restore_command(Path::new("Acme.sln"));
        assert_eq!(spec.to_string(), "/opt/dotnet/dotnet restore Acme.sln");
    }

    #[test]
    fn missing_program_is_an_external_tool_error() {
        let tc = DotnetToolchain::with_program("strata-test-no-such-program");
        let err = tc.restore(Path::new("Acme.sln")).unwrap_err();
        match err {
            StrataError::Application(ApplicationError::ExternalTool { status, .. }) => {
                assert_eq!(status, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_carries_status_and_stderr() {
        let spec = CommandSpec::new("sh").args(["-c", "echo boom >&2; exit 3"]);
        let err = run(&spec).unwrap_err();
        match err {
            StrataError::Application(ApplicationError::ExternalTool { status, stderr, .. }) => {
                assert_eq!(status, Some(3));
                assert!(stderr.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn stdout_is_used_when_stderr_is_empty() {
        let spec = CommandSpec::new("sh").args(["-c", "echo 'error NU1101'; exit 1"]);
        let err = run(&spec).unwrap_err();
        assert!(err.suggestions().iter().any(|s| s.contains("NU1101")));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_ok() {
        assert!(run(&CommandSpec::new("true")).is_ok());
    }
}
