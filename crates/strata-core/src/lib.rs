//! Strata Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers for the Strata layered-solution
//! scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           strata-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         ScaffoldService pipeline        │
//! │  structure → solution → references →    │
//! │  support files → restore                │
//! │  (RollbackLedger unwound on failure)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Ports: Toolchain, Filesystem,         │
//! │          ProgressSink                   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      strata-adapters (Infrastructure)   │
//! │   (DotnetToolchain, LocalFilesystem)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use strata_core::prelude::*;
//!
//! let request = ScaffoldRequest::new(ProjectName::parse("Acme")?, "/tmp/work");
//! let service = ScaffoldService::new(toolchain, filesystem);
//! let outcome = service.scaffold(&request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, RollbackLedger, RollbackReport, ScaffoldEvent, ScaffoldOutcome,
        ScaffoldService, Stage,
        ports::{Filesystem, ProgressSink, Toolchain},
    };
    pub use crate::domain::{
        Layer, LayerSpec, ProjectName, ReferenceEdge, ScaffoldPlan, ScaffoldRequest,
        SupportFile, TemplateKind,
    };
    pub use crate::error::{StrataError, StrataResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
