use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure reported by a [`ReportParser`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Turns the contents of one report file into analysis data
pub trait ReportParser {
    type Report;

    /// Parse the report read from `path`.
    ///
    /// # Errors
    /// Returns `ParseError` if `contents` is not a valid report.
    fn parse(&self, path: &Path, contents: &str) -> Result<Self::Report, ParseError>;
}

/// A successfully parsed report and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReport<R> {
    pub path: PathBuf,
    pub report: R,
}
