//! Rollback ledger - the pipeline's undo log.
//!
//! Every path the pipeline creates (or attempts to create) is recorded in
//! insertion order. On failure the ledger is consumed by [`RollbackLedger::rollback`],
//! which deletes each recorded path that still exists. Rollback is
//! best-effort: deletion failures are reported, never raised.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::application::ports::Filesystem;

/// Append-only list of paths eligible for deletion on failure.
#[derive(Debug, Default)]
pub struct RollbackLedger {
    entries: Vec<PathBuf>,
}

impl RollbackLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path. Duplicates are kept; the second delete is a no-op.
    pub fn record(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::debug!(path = %path.display(), "Recorded for rollback");
        self.entries.push(path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delete every recorded path that exists, in insertion order.
    ///
    /// Consumes the ledger, so a run can be unwound at most once. Never
    /// fails: a path that cannot be removed is reported as
    /// [`RollbackOutcome::Failed`] and the pass continues.
    pub fn rollback(self, filesystem: &dyn Filesystem) -> RollbackReport {
        info!(entries = self.entries.len(), "Rolling back");

        let entries = self
            .entries
            .into_iter()
            .map(|path| {
                let outcome = remove_one(filesystem, &path);
                RollbackEntry { path, outcome }
            })
            .collect();

        info!("Rollback completed");
        RollbackReport { entries }
    }
}

fn remove_one(filesystem: &dyn Filesystem, path: &Path) -> RollbackOutcome {
    if !filesystem.exists(path) {
        tracing::debug!(path = %path.display(), "Already absent");
        return RollbackOutcome::AlreadyAbsent;
    }

    match filesystem.remove_all(path) {
        Ok(()) => {
            info!(path = %path.display(), "Removed");
            RollbackOutcome::Removed
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not remove");
            RollbackOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// What happened to one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RollbackOutcome {
    Removed,
    /// Never created, removed with an earlier ancestor, or recorded twice.
    AlreadyAbsent,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollbackEntry {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: RollbackOutcome,
}

/// Result of one rollback pass, in ledger order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RollbackReport {
    pub entries: Vec<RollbackEntry>,
}

impl RollbackReport {
    pub fn removed(&self) -> impl Iterator<Item = &Path> {
        self.entries
            .iter()
            .filter(|e| e.outcome == RollbackOutcome::Removed)
            .map(|e| e.path.as_path())
    }

    pub fn failures(&self) -> impl Iterator<Item = &RollbackEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, RollbackOutcome::Failed { .. }))
    }

    /// `true` when nothing recorded was left behind.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}
