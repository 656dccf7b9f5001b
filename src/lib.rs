//! report-finder - locate analysis-tool report files with glob patterns
//!
//! The core is [`discovery::ReportFinder`], which walks a base directory and
//! returns every regular file whose path (relative to that directory) matches
//! an include pattern compiled by [`patterns::GlobMatcher`].
//!
//! [`sensor::SensorContext`] resolves the pattern for a report type from
//! [`config::Settings`] and can feed each discovered report to a
//! [`sensor::ReportParser`]. What happened along the way is reported through
//! an injected [`events::EventSink`].
//!
//! ```no_run
//! use report_finder::discovery::{ReportFinder, ReportPatternFinder};
//!
//! let finder = ReportFinder::new("build");
//! for report in finder.find_reports_matching("**/*-report.xml")? {
//!     println!("{}", report.display());
//! }
//! # Ok::<(), report_finder::discovery::DiscoveryError>(())
//! ```

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod discovery;
pub mod events;
pub mod patterns;
pub mod sensor;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ReportError {
    /// Discovery error
    #[error("Discovery error: {0}")]
    Discovery(#[from] discovery::DiscoveryError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
