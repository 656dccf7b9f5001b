use thiserror::Error;

/// Errors produced while compiling an include pattern
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// Empty pattern is invalid
    #[error("Empty report pattern provided")]
    InvalidEmpty,
    /// Glob failed to parse
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },
}

impl PatternError {
    #[must_use]
    pub fn glob_parse(pattern: &str, reason: &str) -> Self {
        Self::InvalidGlob {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}
