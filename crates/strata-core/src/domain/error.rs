// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside rollback reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Topology Errors
    // ========================================================================
    #[error("Reference table names layer '{layer}' which is not part of the plan")]
    UnknownLayer { layer: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, '.', '-' and '_' only".into(),
                "Start with a letter or digit".into(),
                "Examples: Acme, Acme.Billing, order_service".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for <{}>", field),
                "Use --help for usage information".into(),
            ],
            Self::UnknownLayer { .. } => vec![
                "This is a bug in the layer table, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::MissingRequiredField { .. } => {
                ErrorCategory::Validation
            }
            Self::UnknownLayer { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
