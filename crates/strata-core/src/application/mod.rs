//! Application layer for Strata.
//!
//! This layer contains:
//! - **Services**: The scaffolding pipeline (ScaffoldService)
//! - **Ledger**: The rollback ledger threaded through every stage
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but holds no rules of
//! its own. Layer names, edges and file bodies live in `crate::domain`.

pub mod error;
pub mod ledger;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use services::{ScaffoldOutcome, ScaffoldService};

pub use ports::{Filesystem, NullProgress, ProgressSink, ScaffoldEvent, Stage, Toolchain};

pub use error::ApplicationError;
pub use ledger::{RollbackEntry, RollbackLedger, RollbackOutcome, RollbackReport};
