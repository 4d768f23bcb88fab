//! Application ports (traits) for external dependencies.
//!
//! Ports define what the pipeline needs from the outside world. Adapters in
//! `strata-adapters` (and the CLI, for progress) implement them.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the pipeline, implemented by infrastructure
//!   - `Filesystem`: Directory/file creation and rollback deletion
//!   - `Toolchain`: The external project generator, reference tool, manifest
//!     tool and dependency resolver
//!   - `ProgressSink`: Stage-by-stage progress reporting

pub mod output;

pub use output::{Filesystem, NullProgress, ProgressSink, ScaffoldEvent, Stage, Toolchain};

#[cfg(test)]
pub use output::MockToolchain;
