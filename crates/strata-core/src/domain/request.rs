//! The validated scaffolding request.

use std::path::{Path, PathBuf};

use super::{DomainError, ProjectName};

/// What to scaffold and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    project_name: ProjectName,
    project_path: PathBuf,
}

impl ScaffoldRequest {
    pub fn new(project_name: ProjectName, project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_name,
            project_path: project_path.into(),
        }
    }

    /// Build a request from raw positional arguments.
    ///
    /// A missing or empty `path` falls back to `cwd`; a relative one is
    /// resolved against it.
    pub fn from_args(
        name: Option<&str>,
        path: Option<&Path>,
        cwd: &Path,
    ) -> Result<Self, DomainError> {
        let name = name.ok_or(DomainError::MissingRequiredField {
            field: "PROJECT_NAME",
        })?;
        let project_name = ProjectName::parse(name)?;
        let project_path = match path.filter(|p| !p.as_os_str().is_empty()) {
            Some(p) => cwd.join(p),
            None => cwd.to_path_buf(),
        };

        Ok(Self::new(project_name, project_path))
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn service_name(&self) -> String {
        self.project_name.service_name()
    }

    /// `<project_path>/<project_name>`.
    pub fn root_path(&self) -> PathBuf {
        self.project_path.join(self.project_name.as_str())
    }
}
