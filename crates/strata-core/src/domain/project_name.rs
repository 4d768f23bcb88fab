//! The validated project name.
//!
//! The name is interpolated verbatim into directory names, the solution
//! manifest, the compose service key and the Dockerfile entrypoint, so the
//! accepted alphabet is deliberately narrow.

use std::fmt;

use serde::{Serialize, Serializer};

use super::DomainError;

/// A project name that is safe to use as a path segment and YAML key.
///
/// Invariant: non-empty, `[A-Za-z0-9._-]` only, starts with an ASCII
/// alphanumeric, never `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Parse and validate a raw project name.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let name = raw.into();

        let reject = |reason: &str| DomainError::InvalidProjectName {
            name: name.clone(),
            reason: reason.into(),
        };

        if name.trim().is_empty() {
            return Err(reject("name cannot be empty"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(reject("name cannot contain path separators"));
        }
        if name.chars().any(char::is_control) {
            return Err(reject("name cannot contain control characters"));
        }
        if name == "." || name == ".." || name.starts_with('.') {
            return Err(reject("name cannot start with '.'"));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
        {
            return Err(reject(&format!("character '{bad}' is not allowed")));
        }
        if !name.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return Err(reject("name must start with a letter or digit"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased name used for container artifacts (compose service key,
    /// container name).
    pub fn service_name(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ProjectName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
