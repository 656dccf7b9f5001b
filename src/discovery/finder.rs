use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use super::error::DiscoveryError;
use super::traits::ReportPatternFinder;
use crate::events::{EventSink, ReportEvent, SearchMode, TracingSink};
use crate::patterns::GlobMatcher;

/// Finds report files below a fixed base directory.
///
/// The directory is walked depth-first. Entries of each directory are visited
/// in file-name order and a subdirectory's contents come right after the
/// subdirectory itself, so for a tree holding `a/report.xml` and `b.xml` the
/// order is `a/report.xml`, `b.xml`. Symlinks to regular files are reported,
/// symlinked directories are not descended.
///
/// The finder keeps no state between calls; each call walks the tree again.
#[derive(Clone)]
pub struct ReportFinder {
    base_dir: PathBuf,
    sink: Arc<dyn EventSink>,
}

impl ReportFinder {
    /// Create a finder that reports events through `tracing`.
    ///
    /// The directory is not required to exist yet.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_sink(base_dir, Arc::new(TracingSink))
    }

    /// Create a finder with an explicit event sink.
    #[must_use]
    pub fn with_sink(base_dir: impl Into<PathBuf>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            base_dir: base_dir.into(),
            sink,
        }
    }

    /// The directory as given at construction.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute form of the base directory, used for results and events.
    fn report_directory(&self) -> PathBuf {
        std::path::absolute(&self.base_dir).unwrap_or_else(|_| self.base_dir.clone())
    }

    fn search(&self, pattern: &str, mode: SearchMode) -> Result<Vec<PathBuf>, DiscoveryError> {
        let directory = self.report_directory();
        self.sink.emit(&ReportEvent::SearchStarted {
            mode,
            pattern: pattern.to_string(),
            directory: directory.clone(),
        });

        let matcher = GlobMatcher::compile(pattern)?;

        if !directory.is_dir() {
            self.sink.emit(&ReportEvent::DirectoryMissing { directory });
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for candidate in candidates(&directory) {
            let (relative, path) = candidate?;
            if !matcher.matches(&relative) {
                continue;
            }
            matches.push(path);
            if mode == SearchMode::First {
                break;
            }
        }

        if matches.is_empty() {
            self.sink.emit(&ReportEvent::NoMatch {
                pattern: pattern.to_string(),
                directory,
            });
        } else if mode == SearchMode::First {
            self.sink.emit(&ReportEvent::MatchFound {
                pattern: pattern.to_string(),
                directory,
            });
        } else {
            self.sink.emit(&ReportEvent::MatchesFound {
                count: matches.len(),
                pattern: pattern.to_string(),
                directory,
            });
        }

        Ok(matches)
    }
}

impl ReportPatternFinder for ReportFinder {
    fn find_reports_matching(&self, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
        self.search(pattern, SearchMode::All)
    }

    fn find_report_matching(&self, pattern: &str) -> Result<Option<PathBuf>, DiscoveryError> {
        Ok(self.search(pattern, SearchMode::First)?.into_iter().next())
    }
}

impl fmt::Debug for ReportFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportFinder")
            .field("base_dir", &self.base_dir)
            .finish_non_exhaustive()
    }
}

/// Regular files below `directory` as `(relative, absolute)` pairs, where
/// `relative` uses `/` separators regardless of platform.
fn candidates(
    directory: &Path,
) -> impl Iterator<Item = Result<(String, PathBuf), DiscoveryError>> + '_ {
    WalkDir::new(directory)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(DiscoveryError::traversal(directory, e))),
            };
            match is_regular_file(&entry) {
                Ok(true) => {
                    let relative = relative_path(directory, entry.path());
                    Some(Ok((relative, entry.into_path())))
                }
                Ok(false) => None,
                Err(e) => Some(Err(e)),
            }
        })
}

fn is_regular_file(entry: &DirEntry) -> Result<bool, DiscoveryError> {
    if entry.file_type().is_file() {
        return Ok(true);
    }
    if !entry.path_is_symlink() {
        return Ok(false);
    }
    // Dangling links (`NotFound`) are skipped, any other failure on the target is an error
    match fs::metadata(entry.path()) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(DiscoveryError::io(entry.path(), e)),
    }
}

fn relative_path(directory: &Path, path: &Path) -> String {
    path.strip_prefix(directory)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
