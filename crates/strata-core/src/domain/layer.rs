//! Architectural layers and the templates that generate them.
//!
//! # Design
//!
//! The set of layers is a single declarative table, [`LAYER_TABLE`]. Creation
//! order, solution registration order and rollback order all follow the
//! table order.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::ProjectName;

/// Project template used by the external generator for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    WebApi,
    ClassLibrary,
    TestSuite,
}

impl TemplateKind {
    /// Short name understood by `dotnet new`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WebApi => "webapi",
            Self::ClassLibrary => "classlib",
            Self::TestSuite => "xunit",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One architectural tier of the generated solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Layer {
    Api,
    Domain,
    Application,
    Infrastructure,
    Shared,
    Tests,
}

/// A row of the layer table.
#[derive(Debug, Clone, Copy)]
pub struct LayerDef {
    pub layer: Layer,
    pub suffix: &'static str,
    pub template: TemplateKind,
}

/// Every layer, in creation order.
pub const LAYER_TABLE: [LayerDef; 6] = [
    LayerDef {
        layer: Layer::Api,
        suffix: "API",
        template: TemplateKind::WebApi,
    },
    LayerDef {
        layer: Layer::Domain,
        suffix: "Domain",
        template: TemplateKind::ClassLibrary,
    },
    LayerDef {
        layer: Layer::Application,
        suffix: "Application",
        template: TemplateKind::ClassLibrary,
    },
    LayerDef {
        layer: Layer::Infrastructure,
        suffix: "Infrastructure",
        template: TemplateKind::ClassLibrary,
    },
    LayerDef {
        layer: Layer::Shared,
        suffix: "Shared",
        template: TemplateKind::ClassLibrary,
    },
    LayerDef {
        layer: Layer::Tests,
        suffix: "Tests",
        template: TemplateKind::TestSuite,
    },
];

impl Layer {
    // Variants are declared in table order.
    fn def(self) -> &'static LayerDef {
        &LAYER_TABLE[self as usize]
    }

    pub fn suffix(self) -> &'static str {
        self.def().suffix
    }

    pub fn template(self) -> TemplateKind {
        self.def().template
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A layer bound to a concrete project: `<ProjectName>.<Suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSpec {
    pub layer: Layer,
    pub name: String,
    pub template: TemplateKind,
}

impl LayerSpec {
    pub fn new(project: &ProjectName, layer: Layer) -> Self {
        Self {
            layer,
            name: format!("{}.{}", project, layer.suffix()),
            template: layer.template(),
        }
    }

    /// All six layers of `project`, in table order.
    pub fn all(project: &ProjectName) -> Vec<Self> {
        LAYER_TABLE
            .iter()
            .map(|def| Self::new(project, def.layer))
            .collect()
    }

    /// Directory the generator writes this layer into.
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(&self.name)
    }

    /// The layer's build unit (`<dir>/<name>.csproj`).
    pub fn project_file(&self, root: &Path) -> PathBuf {
        self.dir(root).join(format!("{}.csproj", self.name))
    }
}
