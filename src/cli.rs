//! Command-line interface definitions and execution
//!
//! This module defines the CLI structure for report-finder using the `clap`
//! crate, and runs a parsed command against the library.
//!
//! # Commands
//!
//! - **find** (`f`): print every report matching a pattern
//! - **first**: print the first matching report
//!
//! When the pattern is omitted it is read from the settings key given with
//! `--key`, falling back to `--default-pattern`.
//!
//! # Examples
//!
//! ```bash
//! report-finder -C build find '**/*-report.xml'
//! report-finder --config sonar.toml --key report.coverage first
//! report-finder --json find
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::ReportError;
use crate::config::Settings;
use crate::discovery::ReportPatternFinder;
use crate::events::EventSink;
use crate::sensor::{ConfiguredSensor, DEFAULT_REPORT_PATH_KEY, DEFAULT_REPORT_PATTERN, SensorContext};

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(name = "report-finder")]
#[command(about = "Locate analysis-tool report files with glob patterns", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory to search
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub directory: PathBuf,

    /// Settings file (TOML); defaults to the user config file when present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Settings key holding the report pattern
    #[arg(short, long, global = true, default_value = DEFAULT_REPORT_PATH_KEY)]
    pub key: String,

    /// Pattern used when the settings key is absent
    #[arg(long, global = true, default_value = DEFAULT_REPORT_PATTERN)]
    pub default_pattern: String,

    /// Only print the matching paths
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every report matching the pattern
    #[command(visible_alias = "f")]
    Find {
        /// Include pattern; read from settings when omitted
        pattern: Option<String>,
    },
    /// Print the first report matching the pattern
    First {
        /// Include pattern; read from settings when omitted
        pattern: Option<String>,
    },
}

impl Commands {
    /// The pattern given on the command line, if any
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Find { pattern } | Self::First { pattern } => pattern.as_deref(),
        }
    }
}

impl Cli {
    /// Parse arguments from the process environment
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Settings from `--config`, or from the default settings file.
    ///
    /// # Errors
    /// Returns `ReportError::InvalidInput` if `--config` names a missing file
    /// and `ReportError::Config` if the settings cannot be parsed.
    pub fn settings(&self) -> Result<Settings, ReportError> {
        match &self.config {
            Some(path) if !path.is_file() => Err(ReportError::InvalidInput(format!(
                "Config file not found: {}",
                path.display()
            ))),
            Some(path) => Ok(Settings::load(path)?),
            None => Ok(Settings::load_default()?),
        }
    }

    /// The sensor described by `--key` and `--default-pattern`
    #[must_use]
    pub fn sensor(&self) -> ConfiguredSensor {
        ConfiguredSensor::new(self.key.clone(), self.default_pattern.clone())
    }
}

/// Result of a run, used by the binary to pick an exit status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub pattern: String,
    pub directory: PathBuf,
    pub reports: Vec<PathBuf>,
}

impl Outcome {
    /// One-line human summary
    #[must_use]
    pub fn summary(&self) -> String {
        match self.reports.len() {
            0 => format!(
                "No report(s) matching {} found in {}",
                self.pattern,
                self.directory.display()
            ),
            n => format!(
                "Found {n} report(s) matching {} in {}",
                self.pattern,
                self.directory.display()
            ),
        }
    }
}

/// Run `cli` with `settings`, writing the matching paths to `out`.
///
/// # Errors
/// Returns `ReportError` if the pattern is invalid, the directory cannot be
/// walked, or writing the output fails.
pub fn run(
    cli: &Cli,
    settings: Settings,
    sink: Arc<dyn EventSink>,
    out: &mut impl Write,
) -> Result<Outcome, ReportError> {
    let context = SensorContext::with_sink(settings, sink);
    let pattern = match cli.command.pattern() {
        Some(pattern) => pattern.to_string(),
        None => context.read_report_path(&cli.sensor()),
    };

    let finder = context.finder(&cli.directory);
    let reports = match cli.command {
        Commands::Find { .. } => finder.find_reports_matching(&pattern)?,
        Commands::First { .. } => finder.find_report_matching(&pattern)?.into_iter().collect(),
    };

    let outcome = Outcome {
        pattern,
        directory: absolute_or_given(&cli.directory),
        reports,
    };

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &outcome)?;
        writeln!(out)?;
    } else {
        for report in &outcome.reports {
            writeln!(out, "{}", report.display())?;
        }
    }

    Ok(outcome)
}

fn absolute_or_given(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
