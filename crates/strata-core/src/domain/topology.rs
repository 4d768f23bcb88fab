//! Inter-layer "references" edges.
//!
//! The dependency graph is fixed and lives in [`REFERENCE_TABLE`]. Each row
//! becomes exactly one external "add reference" call listing all targets.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{DomainError, Layer, LayerSpec};

/// Source layer → layers it depends on. Layers without outgoing edges are
/// omitted.
pub const REFERENCE_TABLE: &[(Layer, &[Layer])] = &[
    (
        Layer::Api,
        &[Layer::Domain, Layer::Application, Layer::Infrastructure],
    ),
    (Layer::Application, &[Layer::Domain]),
    (Layer::Infrastructure, &[Layer::Domain]),
];

/// A directed "depends on" group from one layer to its targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEdge {
    pub from: LayerSpec,
    pub to: Vec<LayerSpec>,
}

impl ReferenceEdge {
    /// Resolve the reference table against concrete layer specs.
    pub fn resolve(layers: &[LayerSpec]) -> Result<Vec<Self>, DomainError> {
        let lookup = |layer: Layer| {
            layers
                .iter()
                .find(|spec| spec.layer == layer)
                .cloned()
                .ok_or_else(|| DomainError::UnknownLayer {
                    layer: layer.to_string(),
                })
        };

        REFERENCE_TABLE
            .iter()
            .map(|(from, targets)| -> Result<Self, DomainError> {
                Ok(Self {
                    from: lookup(*from)?,
                    to: targets
                        .iter()
                        .map(|t| lookup(*t))
                        .collect::<Result<_, _>>()?,
                })
            })
            .collect()
    }

    pub fn source_project(&self, root: &Path) -> PathBuf {
        self.from.project_file(root)
    }

    pub fn target_projects(&self, root: &Path) -> Vec<PathBuf> {
        self.to.iter().map(|t| t.project_file(root)).collect()
    }

    /// Flatten to `(from, to)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Layer, Layer)> + '_ {
        self.to.iter().map(|t| (self.from.layer, t.layer))
    }
}
