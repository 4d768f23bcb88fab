//! Driven (output) ports - implemented by infrastructure.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::TemplateKind;
use crate::error::StrataResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFilesystem` (production)
/// - `strata_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StrataResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file, or a directory and all of its contents.
    fn remove_all(&self, path: &Path) -> StrataResult<()>;
}

/// Port for the external build toolchain.
///
/// Every call is synchronous and blocks until the command exits. A non-zero
/// exit status is reported as `ApplicationError::ExternalTool`.
///
/// Implemented by:
/// - `strata_adapters::toolchain::DotnetToolchain` (production)
/// - `strata_adapters::toolchain::RecordingToolchain` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Toolchain {
    /// Materialise a project from `kind` named `name` into `output_dir`.
    fn new_project(&self, kind: TemplateKind, name: &str, output_dir: &Path) -> StrataResult<()>;

    /// Declare that `project` references every project in `targets`.
    fn add_references(&self, project: &Path, targets: &[PathBuf]) -> StrataResult<()>;

    /// Create an empty grouping manifest `<output_dir>/<name>.sln`.
    fn new_solution(&self, name: &str, output_dir: &Path) -> StrataResult<()>;

    /// Register `project` inside `solution`.
    fn add_to_solution(&self, solution: &Path, project: &Path) -> StrataResult<()>;

    /// Resolve and fetch dependencies for everything in `solution`.
    fn restore(&self, solution: &Path) -> StrataResult<()>;
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Structure,
    Solution,
    References,
    SupportFiles,
    Restore,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Structure => "Creating project structure",
            Self::Solution => "Creating solution",
            Self::References => "Adding project references",
            Self::SupportFiles => "Creating Docker files",
            Self::Restore => "Restoring packages",
        };
        f.write_str(s)
    }
}

/// Something observable happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldEvent {
    StageStarted(Stage),
    LayerCreated { name: String, template: TemplateKind },
    SolutionCreated { path: PathBuf },
    LayerRegistered { name: String },
    ReferencesAdded { from: String, to: Vec<String> },
    SupportFileWritten { path: PathBuf },
    RestoreCompleted,
    RollbackStarted { entries: usize },
    RollbackRemoved { path: PathBuf },
    RollbackFailed { path: PathBuf, reason: String },
    RollbackCompleted,
}

/// Port for progress reporting.
pub trait ProgressSink {
    fn on_event(&self, event: &ScaffoldEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_event(&self, _event: &ScaffoldEvent) {}
}
