//! Infrastructure adapters for Strata.
//!
//! This crate implements the ports defined in `strata-core::application::ports`.
//! It contains all process spawning and filesystem I/O.

pub mod filesystem;
pub mod toolchain;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use toolchain::{CommandSpec, DotnetToolchain, Operation, RecordingToolchain};
