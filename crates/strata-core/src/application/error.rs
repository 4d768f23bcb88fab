//! Application layer errors.
//!
//! These errors represent failures in orchestration: external commands and
//! filesystem operations. Rule violations are `DomainError`s.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the scaffolding pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// An external toolchain command could not be started or exited non-zero.
    #[error("External command failed: `{command}` ({})", describe_status(.status))]
    ExternalTool {
        command: String,
        /// `None` when the process never started or was killed by a signal.
        status: Option<i32>,
        stderr: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project root already exists; refusing to scaffold into it.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "did not run to completion".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ExternalTool {
                command, stderr, ..
            } => {
                let mut out = vec![format!("Command: {command}")];
                if let Some(line) = stderr.lines().rev().find(|l| !l.trim().is_empty()) {
                    out.push(format!("Tool output: {}", line.trim()));
                }
                out.push("Ensure the .NET SDK is installed and on your PATH".into());
                out.push("Override the executable with toolchain.program in the config".into());
                out
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name or target path".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ExternalTool { .. } => ErrorCategory::ExternalTool,
            Self::FilesystemError { .. } => ErrorCategory::Filesystem,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
        }
    }
}
