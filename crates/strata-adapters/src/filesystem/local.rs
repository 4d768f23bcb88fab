//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use strata_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StrataError, StrataResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        // Dangling symlinks count: they still occupy the name.
        path.symlink_metadata().is_ok()
    }

    fn remove_all(&self, path: &Path) -> StrataResult<()> {
        let metadata = path
            .symlink_metadata()
            .map_err(|e| map_io_error(path, e, "inspect"))?;

        if metadata.is_dir() {
            std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
        } else {
            std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
        }
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StrataError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
