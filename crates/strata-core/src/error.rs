//! Unified error handling for Strata Core.
//!
//! Wraps domain and application errors, and carries the rollback outcome
//! when a pipeline run is unwound.

use thiserror::Error;

use crate::application::{ApplicationError, RollbackReport};
use crate::domain::DomainError;

/// Root error type for Strata Core operations.
#[derive(Debug, Error, Clone)]
pub enum StrataError {
    /// Errors from the domain layer (rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// A pipeline stage failed and everything recorded so far was unwound.
    #[error("{source}")]
    ScaffoldFailed {
        source: Box<StrataError>,
        rollback: RollbackReport,
    },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StrataError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::ScaffoldFailed { source, rollback } => {
                let mut out = source.suggestions();
                // An empty report means the run failed before creating anything.
                if rollback.entries.is_empty() {
                    return out;
                }
                let leftovers: Vec<_> = rollback.failures().collect();
                if leftovers.is_empty() {
                    out.push("All generated files were removed".into());
                } else {
                    for entry in leftovers {
                        out.push(format!(
                            "Could not remove {}; delete it manually",
                            entry.path.display()
                        ));
                    }
                }
                out
            }
            Self::Internal { .. } => vec![
                "This appears to be a bug in Strata".into(),
                "Please report this issue with the output of `-vvv`".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::ScaffoldFailed { source, .. } => source.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The rollback report, if this error unwound a pipeline run.
    pub fn rollback(&self) -> Option<&RollbackReport> {
        match self {
            Self::ScaffoldFailed { rollback, .. } => Some(rollback),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    ExternalTool,
    Filesystem,
    Internal,
}

/// Convenient result type alias.
pub type StrataResult<T> = Result<T, StrataError>;
