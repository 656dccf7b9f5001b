//! Testing utilities for report-finder
//!
//! Provides `ReportTree`, a temporary directory that tests populate with
//! report files before running a finder over it.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::discovery::ReportFinder;
use crate::events::RecordingSink;

/// Temporary directory tree that is removed on drop
pub struct ReportTree {
    dir: TempDir,
}

impl ReportTree {
    /// Create an empty tree
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temporary directory"),
        }
    }

    /// Root of the tree
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file with default content at `relative`, creating parent
    /// directories as needed. Returns the full path.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn create_file(&self, relative: &str) -> PathBuf {
        self.create_file_with_content(relative, b"test content")
    }

    /// Create a file with custom content.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn create_file_with_content(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Create a directory at `relative`.
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// A finder over this tree, together with the sink recording its events
    #[must_use]
    pub fn finder(&self) -> (ReportFinder, RecordingSink) {
        let sink = RecordingSink::new();
        let finder = ReportFinder::with_sink(self.path(), Arc::new(sink.clone()));
        (finder, sink)
    }
}

impl Default for ReportTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_tree_creates_nested_files() {
        let tree = ReportTree::new();
        let path = tree.create_file("a/b/report.xml");
        assert!(path.is_file());
        assert_eq!(fs::read(&path).unwrap(), b"test content");
    }

    #[test]
    fn test_report_tree_is_removed_on_drop() {
        let root = {
            let tree = ReportTree::new();
            tree.create_file("report.xml");
            tree.path().to_path_buf()
        };
        assert!(!root.exists());
    }
}
