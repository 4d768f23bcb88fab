//! A toolchain that records commands instead of running them.
//!
//! Backs `--dry-run` (paired with a [`MemoryFilesystem`], it produces the
//! exact command list a real run would issue) and pipeline tests (with
//! failure injection).

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use strata_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, Toolchain},
    },
    domain::TemplateKind,
    error::{StrataError, StrataResult},
};

use super::{CommandSpec, DotnetToolchain};
use crate::filesystem::MemoryFilesystem;

/// The five toolchain operations, for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    NewProject,
    AddReferences,
    NewSolution,
    AddToSolution,
    Restore,
}

#[derive(Debug, Clone)]
pub struct RecordingToolchain {
    commands: Arc<Mutex<Vec<CommandSpec>>>,
    renderer: DotnetToolchain,
    filesystem: Option<MemoryFilesystem>,
    fail_on: Option<Operation>,
}

impl RecordingToolchain {
    /// Record commands as `renderer` would build them.
    pub fn new(renderer: DotnetToolchain) -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            renderer,
            filesystem: None,
            fail_on: None,
        }
    }

    /// Simulate generator side effects (project files, the `.sln`) in `fs`.
    pub fn materializing(mut self, fs: MemoryFilesystem) -> Self {
        self.filesystem = Some(fs);
        self
    }

    /// Fail every call of `op` with a non-zero exit.
    pub fn failing_on(mut self, op: Operation) -> Self {
        self.fail_on = Some(op);
        self
    }

    /// Commands issued so far, in order.
    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    fn issue(&self, op: Operation, spec: CommandSpec) -> StrataResult<()> {
        let rendered = spec.to_string();
        self.commands
            .lock()
            .map_err(|_| StrataError::Internal {
                message: "command log lock poisoned".into(),
            })?
            .push(spec);

        if self.fail_on == Some(op) {
            return Err(ApplicationError::ExternalTool {
                command: rendered,
                status: Some(1),
                stderr: "simulated failure".into(),
            }
            .into());
        }
        Ok(())
    }

    fn touch(&self, dir: &Path, file_name: String) -> StrataResult<()> {
        if let Some(fs) = &self.filesystem {
            fs.create_dir_all(dir)?;
            fs.write_file(&dir.join(file_name), "")?;
        }
        Ok(())
    }
}

impl Toolchain for RecordingToolchain {
    fn new_project(&self, kind: TemplateKind, name: &str, output_dir: &Path) -> StrataResult<()> {
        self.issue(
            Operation::NewProject,
            self.renderer.new_project_command(kind, name, output_dir),
        )?;
        self.touch(output_dir, format!("{name}.csproj"))
    }

    fn add_references(&self, project: &Path, targets: &[PathBuf]) -> StrataResult<()> {
        self.issue(
            Operation::AddReferences,
            self.renderer.add_references_command(project, targets),
        )
    }

    fn new_solution(&self, name: &str, output_dir: &Path) -> StrataResult<()> {
        self.issue(
            Operation::NewSolution,
            self.renderer.new_solution_command(name, output_dir),
        )?;
        self.touch(output_dir, format!("{name}.sln"))
    }

    fn add_to_solution(&self, solution: &Path, project: &Path) -> StrataResult<()> {
        self.issue(
            Operation::AddToSolution,
            self.renderer.add_to_solution_command(solution, project),
        )
    }

    fn restore(&self, solution: &Path) -> StrataResult<()> {
        self.issue(Operation::Restore, self.renderer.restore_command(solution))
    }
}
