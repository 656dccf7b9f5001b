//! Observability side channel for report discovery
//!
//! Discovery never logs through process-wide state directly. Instead every
//! component receives an [`EventSink`] and reports what it did as a
//! [`ReportEvent`]. The default [`TracingSink`] forwards events to `tracing`;
//! [`RecordingSink`] keeps them in memory so tests can assert on them.
//!
//! Events are advisory. A missing report directory, for instance, is only
//! visible as a [`ReportEvent::DirectoryMissing`] warning; the finder itself
//! returns an empty result and no error.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Severity of a [`ReportEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Warn,
}

/// Which finder operation produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Collect every matching report
    All,
    /// Stop at the first matching report
    First,
}

/// Structured events emitted while resolving and discovering reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// A search is about to walk `directory`
    SearchStarted {
        mode: SearchMode,
        pattern: String,
        directory: PathBuf,
    },
    /// The base directory does not exist (or is not a directory)
    DirectoryMissing { directory: PathBuf },
    /// The walk completed without any match
    NoMatch { pattern: String, directory: PathBuf },
    /// A find-first walk stopped at its first match
    MatchFound { pattern: String, directory: PathBuf },
    /// A find-all walk produced `count` matches
    MatchesFound {
        count: usize,
        pattern: String,
        directory: PathBuf,
    },
    /// The report path was read from configuration
    ConfiguredPathFound { key: String },
    /// No configured report path, falling back to the sensor default
    DefaultPathUsed { key: String },
    /// A discovered report could not be read or parsed
    ReportSkipped { path: PathBuf, reason: String },
}

impl ReportEvent {
    #[must_use]
    pub const fn level(&self) -> Level {
        match self {
            Self::DirectoryMissing { .. } | Self::ReportSkipped { .. } => Level::Warn,
            Self::SearchStarted { .. }
            | Self::NoMatch { .. }
            | Self::MatchFound { .. }
            | Self::MatchesFound { .. }
            | Self::ConfiguredPathFound { .. }
            | Self::DefaultPathUsed { .. } => Level::Debug,
        }
    }
}

impl fmt::Display for ReportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchStarted { mode, pattern, directory } => {
                let noun = match mode {
                    SearchMode::All => "reports",
                    SearchMode::First => "report",
                };
                write!(f, "Trying to find {noun} matching {pattern} in {}", directory.display())
            }
            Self::DirectoryMissing { directory } => {
                write!(f, "Report directory does not exist {}", directory.display())
            }
            Self::NoMatch { pattern, directory } => {
                write!(f, "No report(s) matching {pattern} was found in {}", directory.display())
            }
            Self::MatchFound { pattern, directory } => {
                write!(f, "Found report matching {pattern} in {}", directory.display())
            }
            Self::MatchesFound { count, pattern, directory } => write!(
                f,
                "Found {count} report(s) matching {pattern} in {}",
                directory.display()
            ),
            Self::ConfiguredPathFound { key } => {
                write!(f, "Found report path for configuration key {key}")
            }
            Self::DefaultPathUsed { key } => write!(
                f,
                "Found no report path for configuration key {key}, using default path"
            ),
            Self::ReportSkipped { path, reason } => {
                write!(f, "Skipping report {}: {reason}", path.display())
            }
        }
    }
}

/// Receiver of [`ReportEvent`]s
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &ReportEvent);
}

/// Forwards events to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &ReportEvent) {
        match event {
            ReportEvent::SearchStarted { pattern, directory, .. } => {
                tracing::debug!(%pattern, directory = %directory.display(), "{event}");
            }
            ReportEvent::DirectoryMissing { directory } => {
                tracing::warn!(directory = %directory.display(), "{event}");
            }
            ReportEvent::NoMatch { pattern, directory }
            | ReportEvent::MatchFound { pattern, directory } => {
                tracing::debug!(%pattern, directory = %directory.display(), "{event}");
            }
            ReportEvent::MatchesFound { count, pattern, directory } => {
                tracing::debug!(count, %pattern, directory = %directory.display(), "{event}");
            }
            ReportEvent::ConfiguredPathFound { key } | ReportEvent::DefaultPathUsed { key } => {
                tracing::debug!(%key, "{event}");
            }
            ReportEvent::ReportSkipped { path, reason } => {
                tracing::warn!(path = %path.display(), %reason, "{event}");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &ReportEvent) {}
}

/// Keeps events in memory, in emission order.
///
/// Clones share the same buffer, so a test can hand one clone to a finder and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ReportEvent>> {
        // Poisoning is ignored: every critical section leaves the Vec consistent
        self.events.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// All recorded events
    #[must_use]
    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// Rendered messages of the events recorded at `level`
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|e| e.level() == level)
            .map(ToString::to_string)
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &ReportEvent) {
        self.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_messages() {
        let directory = PathBuf::from("/tmp/reports");
        let started = ReportEvent::SearchStarted {
            mode: SearchMode::All,
            pattern: "*.xml".into(),
            directory: directory.clone(),
        };
        assert_eq!(started.to_string(), "Trying to find reports matching *.xml in /tmp/reports");

        let first = ReportEvent::SearchStarted {
            mode: SearchMode::First,
            pattern: "*.xml".into(),
            directory: directory.clone(),
        };
        assert_eq!(first.to_string(), "Trying to find report matching *.xml in /tmp/reports");

        let found = ReportEvent::MatchesFound {
            count: 2,
            pattern: "*.xml".into(),
            directory: directory.clone(),
        };
        assert_eq!(found.to_string(), "Found 2 report(s) matching *.xml in /tmp/reports");

        let found_first = ReportEvent::MatchFound {
            pattern: "*.xml".into(),
            directory,
        };
        assert_eq!(found_first.to_string(), "Found report matching *.xml in /tmp/reports");
        assert_eq!(found_first.level(), Level::Debug);
    }

    #[test]
    fn test_event_levels() {
        let missing = ReportEvent::DirectoryMissing { directory: PathBuf::from("/nope") };
        assert_eq!(missing.level(), Level::Warn);
        let default = ReportEvent::DefaultPathUsed { key: "report.path".into() };
        assert_eq!(default.level(), Level::Debug);
    }

    #[test]
    fn test_null_sink_accepts_events() {
        let sink: Arc<dyn EventSink> = Arc::new(NullSink);
        sink.emit(&ReportEvent::DirectoryMissing { directory: PathBuf::from("/nope") });
    }

    #[test]
    fn test_recording_sink_shares_buffer_between_clones() {
        let sink = RecordingSink::new();
        let other = sink.clone();
        other.emit(&ReportEvent::ConfiguredPathFound { key: "k".into() });
        other.emit(&ReportEvent::DirectoryMissing { directory: PathBuf::from("/nope") });

        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.messages(Level::Debug), vec!["Found report path for configuration key k"]);
        assert_eq!(sink.messages(Level::Warn), vec!["Report directory does not exist /nope"]);

        sink.clear();
        assert!(other.events().is_empty());
    }
}
