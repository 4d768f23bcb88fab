//! The full, deterministic plan for one scaffolding run.
//!
//! Everything the pipeline will touch is computed up front from the request:
//! no I/O happens here. The same plan backs `--dry-run` output.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{
    DomainError, LayerSpec, ProjectName, ReferenceEdge, RenderContext, ScaffoldRequest,
    SupportFile,
};

/// A support file with its destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub kind: SupportFile,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldPlan {
    pub project_name: ProjectName,
    pub service_name: String,
    pub root: PathBuf,
    pub solution: PathBuf,
    pub layers: Vec<LayerSpec>,
    pub references: Vec<ReferenceEdge>,
    pub support_files: Vec<PlannedFile>,
}

impl ScaffoldPlan {
    pub fn for_request(request: &ScaffoldRequest) -> Result<Self, DomainError> {
        let project = request.project_name().clone();
        let root = request.root_path();
        let layers = LayerSpec::all(&project);
        let references = ReferenceEdge::resolve(&layers)?;
        let support_files = SupportFile::ALL
            .iter()
            .map(|kind| PlannedFile {
                kind: *kind,
                path: kind.path(&root),
            })
            .collect();

        Ok(Self {
            solution: root.join(format!("{project}.sln")),
            service_name: project.service_name(),
            project_name: project,
            root,
            layers,
            references,
            support_files,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(&self.project_name)
    }
}
