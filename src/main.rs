//! report-finder CLI entry point
//!
//! Prints the report files below a directory that match an include pattern.
//!
//! # Usage
//!
//! ```bash
//! # Every XML report at any depth below the current directory
//! report-finder find '*.xml'
//!
//! # First coverage report below build/
//! report-finder -C build first 'coverage/**/cobertura.xml'
//!
//! # Pattern taken from the `report.path` key of a settings file
//! report-finder --config sonar.toml find
//! ```
//!
//! # Exit status
//!
//! `0` when at least one report was printed, `1` when nothing matched and
//! `2` on errors.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use colored::Colorize;
use report_finder::cli::{self, Cli, Outcome};
use report_finder::events::TracingSink;
use report_finder::ReportError;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn execute(cli: &Cli) -> Result<Outcome, ReportError> {
    let settings = cli.settings()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::run(cli, settings, Arc::new(TracingSink), &mut out)
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(outcome) => {
            let found = !outcome.reports.is_empty();
            if !cli.quiet && !cli.json {
                let summary = outcome.summary();
                if found {
                    eprintln!("{}", summary.green());
                } else {
                    eprintln!("{}", summary.yellow());
                }
            }
            if found { ExitCode::SUCCESS } else { ExitCode::from(1) }
        }
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::from(2)
        }
    }
}
