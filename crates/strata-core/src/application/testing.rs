//! Test doubles shared by the application tests.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::ApplicationError;
use crate::application::ports::{Filesystem, ProgressSink, ScaffoldEvent};
use crate::error::StrataResult;

#[derive(Debug, Default)]
struct FakeInner {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    denied_creates: HashSet<PathBuf>,
    denied_writes: HashSet<PathBuf>,
    denied_removals: HashSet<PathBuf>,
    removals: Vec<PathBuf>,
}

/// In-memory filesystem with failure injection.
#[derive(Debug, Clone, Default)]
pub struct FakeFilesystem {
    inner: Arc<Mutex<FakeInner>>,
}

impl FakeFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny_create(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unwrap().denied_creates.insert(path.into());
    }

    pub fn deny_write(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unwrap().denied_writes.insert(path.into());
    }

    pub fn deny_removal(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unwrap().denied_removals.insert(path.into());
    }

    pub fn removals(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().removals.clone()
    }

    pub fn read(&self, path: &Path) -> Option<String> {
        self.inner.lock().unwrap().files.get(path).cloned()
    }

    pub fn is_empty_under(&self, root: &Path) -> bool {
        let inner = self.inner.lock().unwrap();
        !inner.dirs.iter().any(|p| p.starts_with(root))
            && !inner.files.keys().any(|p| p.starts_with(root))
    }
}

impl Filesystem for FakeFilesystem {
    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.denied_creates.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not a directory".into(),
            }
            .into());
        }
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                inner.dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.denied_writes.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into());
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.dirs.contains(path) || inner.files.contains_key(path)
    }

    fn remove_all(&self, path: &Path) -> StrataResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.denied_removals.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into());
        }
        inner.dirs.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.removals.push(path.to_path_buf());
        Ok(())
    }
}

/// Collects every progress event.
#[derive(Debug, Clone, Default)]
pub struct RecordingProgress {
    events: Arc<Mutex<Vec<ScaffoldEvent>>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<ScaffoldEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn on_event(&self, event: &ScaffoldEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
