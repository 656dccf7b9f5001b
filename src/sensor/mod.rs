//! Report sensors - the glue between settings and report discovery.
//!
//! A sensor names the setting that holds its report pattern and the pattern
//! to use when that setting is absent. [`SensorContext`] resolves the pattern,
//! runs the finder over a project directory and optionally hands every
//! report to a [`ReportParser`].

pub mod parser;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use parser::{ParseError, ParsedReport, ReportParser};

use crate::ReportError;
use crate::config::Settings;
use crate::discovery::{ReportFinder, ReportPatternFinder};
use crate::events::{EventSink, ReportEvent, TracingSink};

/// Setting consulted by [`ConfiguredSensor`] when no key is given
pub const DEFAULT_REPORT_PATH_KEY: &str = "report.path";

/// Pattern used by [`ConfiguredSensor`] when no default is given
pub const DEFAULT_REPORT_PATTERN: &str = "*-report.xml";

/// Capability of a concrete report type
pub trait ReportSensor {
    /// Setting holding the report pattern
    fn report_path_key(&self) -> &str;

    /// Pattern used when the setting is absent
    fn default_report_path(&self) -> &str;
}

/// Pick the configured pattern, or `default` when it is absent or blank.
#[must_use]
pub fn resolve_pattern(configured: Option<&str>, default: &str) -> String {
    configured
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Sensor defined entirely by its key and default pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredSensor {
    key: String,
    default_pattern: String,
}

impl ConfiguredSensor {
    #[must_use]
    pub fn new(key: impl Into<String>, default_pattern: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default_pattern: default_pattern.into(),
        }
    }
}

impl Default for ConfiguredSensor {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_PATH_KEY, DEFAULT_REPORT_PATTERN)
    }
}

impl ReportSensor for ConfiguredSensor {
    fn report_path_key(&self) -> &str {
        &self.key
    }

    fn default_report_path(&self) -> &str {
        &self.default_pattern
    }
}

/// Settings and event sink shared by every sensor of a run
#[derive(Clone)]
pub struct SensorContext {
    settings: Settings,
    sink: Arc<dyn EventSink>,
}

impl SensorContext {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_sink(settings, Arc::new(TracingSink))
    }

    #[must_use]
    pub fn with_sink(settings: Settings, sink: Arc<dyn EventSink>) -> Self {
        Self { settings, sink }
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The report pattern for `sensor`, from settings or its default.
    pub fn read_report_path<S: ReportSensor + ?Sized>(&self, sensor: &S) -> String {
        let key = sensor.report_path_key();
        let configured = self.settings.get(key).filter(|v| !v.trim().is_empty());

        let event = if configured.is_some() {
            ReportEvent::ConfiguredPathFound { key: key.to_string() }
        } else {
            ReportEvent::DefaultPathUsed { key: key.to_string() }
        };
        self.sink.emit(&event);

        resolve_pattern(configured.as_deref(), sensor.default_report_path())
    }

    /// A finder over `project_dir` sharing this context's sink
    #[must_use]
    pub fn finder(&self, project_dir: &Path) -> ReportFinder {
        ReportFinder::with_sink(project_dir, Arc::clone(&self.sink))
    }

    /// All reports for `sensor` below `project_dir`.
    ///
    /// # Errors
    /// Returns `ReportError::Discovery` if the resolved pattern is invalid or
    /// the directory cannot be walked.
    pub fn collect_available_reports<S: ReportSensor + ?Sized>(
        &self,
        sensor: &S,
        project_dir: &Path,
    ) -> Result<Vec<PathBuf>, ReportError> {
        let pattern = self.read_report_path(sensor);
        Ok(self.finder(project_dir).find_reports_matching(&pattern)?)
    }

    /// Collect the reports for `sensor` and parse each one.
    ///
    /// Reports that cannot be read as UTF-8 or that `parser` rejects are
    /// skipped with a [`ReportEvent::ReportSkipped`] warning.
    ///
    /// # Errors
    /// Same conditions as [`collect_available_reports`](Self::collect_available_reports).
    pub fn parse_available_reports<S, P>(
        &self,
        sensor: &S,
        project_dir: &Path,
        parser: &P,
    ) -> Result<Vec<ParsedReport<P::Report>>, ReportError>
    where
        S: ReportSensor + ?Sized,
        P: ReportParser + ?Sized,
    {
        let mut parsed = Vec::new();
        for path in self.collect_available_reports(sensor, project_dir)? {
            let result = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|contents| parser.parse(&path, &contents).map_err(|e| e.to_string()));
            match result {
                Ok(report) => parsed.push(ParsedReport { path, report }),
                Err(reason) => self.sink.emit(&ReportEvent::ReportSkipped { path, reason }),
            }
        }
        Ok(parsed)
    }
}
