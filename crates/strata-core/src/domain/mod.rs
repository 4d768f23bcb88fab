// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Strata.
//!
//! Pure data and rules: the validated request, the fixed layer and reference
//! tables, the support file templates, and the plan derived from them.
//!
//! - **No I/O**: No filesystem, process or network calls
//! - **Declarative topology**: Layers and edges are tables, not branches
//! - **Deterministic**: The same request always yields the same plan

pub mod error;
pub mod layer;
pub mod plan;
pub mod project_name;
pub mod render;
pub mod request;
pub mod support_files;
pub mod topology;

pub use error::{DomainError, ErrorCategory};
pub use layer::{LAYER_TABLE, Layer, LayerDef, LayerSpec, TemplateKind};
pub use plan::{PlannedFile, ScaffoldPlan};
pub use project_name::ProjectName;
pub use render::RenderContext;
pub use request::ScaffoldRequest;
pub use support_files::SupportFile;
pub use topology::{REFERENCE_TABLE, ReferenceEdge};
