use std::path::PathBuf;

use super::error::DiscoveryError;

/// Trait for report discovery based on an include pattern
pub trait ReportPatternFinder {
    /// Find every report matching `pattern`, in traversal order.
    ///
    /// # Errors
    /// Returns `DiscoveryError` if the pattern is invalid or the directory
    /// tree cannot be read. A missing base directory yields `Ok(vec![])`.
    fn find_reports_matching(&self, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError>;

    /// Find the first report matching `pattern`.
    ///
    /// Always equal to the first element of
    /// [`find_reports_matching`](Self::find_reports_matching) for the same
    /// pattern and an unchanged tree.
    ///
    /// # Errors
    /// Same conditions as `find_reports_matching`.
    fn find_report_matching(&self, pattern: &str) -> Result<Option<PathBuf>, DiscoveryError>;
}
