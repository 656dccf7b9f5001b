use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::patterns::PatternError;

/// Errors produced while searching for reports
///
/// A missing base directory or an empty match set is never an error; see
/// [`crate::events::ReportEvent::DirectoryMissing`].
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The include pattern did not compile
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// Reading the directory tree failed (permission denied, I/O error, ...)
    #[error("Failed to traverse {}: {source}", .path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DiscoveryError {
    /// Wrap a walk error, attributing it to the entry that failed or to the
    /// base directory when walkdir does not name one.
    pub(crate) fn traversal(base_dir: &Path, source: walkdir::Error) -> Self {
        let path = source.path().map_or_else(|| base_dir.to_path_buf(), Path::to_path_buf);
        Self::Traversal {
            path,
            source: io::Error::from(source),
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Traversal {
            path: path.to_path_buf(),
            source,
        }
    }
}
