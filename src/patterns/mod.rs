//! Pattern module - include patterns used to select report files.

pub mod error;
pub mod glob;

pub use error::PatternError;
pub use glob::GlobMatcher;

/// Whether `token` contains any wildcard understood by [`GlobMatcher`].
#[must_use]
pub fn contains_wildcard(token: &str) -> bool {
    token.contains('*') || token.contains('?')
}
