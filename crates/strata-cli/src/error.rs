//! Error handling for the Strata CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use strata_core::application::RollbackOutcome;
use strata_core::domain::DomainError;
use strata_core::error::StrataError;

pub use strata_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Arguments parsed, but something required is missing.
    #[error("{message}")]
    Usage { message: String },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// A configuration file or environment override could not be used.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `strata-core`, possibly after a rollback.
    #[error("Scaffolding failed: {0}")]
    Core(#[from] StrataError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidProjectName { name, reason } => {
                Self::InvalidProjectName { name, reason }
            }
            DomainError::MissingRequiredField { field } => Self::Usage {
                message: format!("Missing required argument <{field}>"),
            },
            other => Self::Core(StrataError::Domain(other)),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Usage { .. } => vec!["Run `strata --help` for usage information".into()],
            Self::InvalidProjectName { .. } => vec![
                "Use only letters, digits, '.', '_' and '-'".into(),
                "Start the name with a letter or digit (e.g. Acme, Contoso.Billing)".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "Check the file given with --config, or {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Environment overrides use STRATA_<SECTION>__<KEY>, e.g. STRATA_TOOLCHAIN__PROGRAM"
                    .into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the disk is not full".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Usage { .. } | Self::InvalidProjectName { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::ExternalTool | CoreCategory::Filesystem | CoreCategory::Internal => {
                    ErrorCategory::Internal
                }
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// `true` when the usage line should follow the message.
    pub fn shows_usage(&self) -> bool {
        matches!(self, Self::Usage { .. } | Self::InvalidProjectName { .. })
    }

    fn rollback_lines(&self) -> Vec<String> {
        let Self::Core(core) = self else {
            return Vec::new();
        };
        let Some(report) = core.rollback() else {
            return Vec::new();
        };
        report
            .entries
            .iter()
            .map(|entry| match &entry.outcome {
                RollbackOutcome::Removed => format!("removed  {}", entry.path.display()),
                RollbackOutcome::AlreadyAbsent => format!("absent   {}", entry.path.display()),
                RollbackOutcome::Failed { reason } => {
                    format!("FAILED   {} ({reason})", entry.path.display())
                }
            })
            .collect()
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }

            let rollback = self.rollback_lines();
            if !rollback.is_empty() {
                output.push_str(&format!("\n{}\n", "Rollback:".yellow().bold()));
                for line in rollback {
                    output.push_str(&format!("  {}\n", line.dimmed()));
                }
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Format the error without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }

            let rollback = self.rollback_lines();
            if !rollback.is_empty() {
                out.push_str("\nRollback:\n");
                for line in rollback {
                    out.push_str(&format!("  {line}\n"));
                }
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error at debug level; stderr already carries the formatted report.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::debug!("User error: {}", self),
            ErrorCategory::Configuration => tracing::debug!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::debug!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    Configuration,
    /// Internal/system error, including a failed external tool.
    Internal,
}

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
