use super::error::PatternError;

/// A single matching unit inside one path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    /// `?`: exactly one character
    AnyChar,
    /// `*`: zero or more characters, bounded by the segment
    AnyRun,
}

/// One `/`-separated component of a compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// `**` occupying a whole segment: zero or more whole segments
    Recursive,
    Literal(String),
    Wildcard(Vec<Token>),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw == "**" {
            return Self::Recursive;
        }
        if !super::contains_wildcard(raw) {
            return Self::Literal(raw.to_string());
        }
        let tokens = raw
            .chars()
            .map(|c| match c {
                '*' => Token::AnyRun,
                '?' => Token::AnyChar,
                other => Token::Literal(other),
            })
            .collect();
        Self::Wildcard(tokens)
    }

    fn matches_name(&self, name: &str) -> bool {
        match self {
            Self::Recursive => true,
            Self::Literal(literal) => literal == name,
            Self::Wildcard(tokens) => match_tokens(tokens, name),
        }
    }
}

/// Compiled include pattern.
///
/// Supported syntax:
/// - `?` matches exactly one character within a segment
/// - `*` matches zero or more characters within a segment
/// - `**` as a whole segment matches zero or more segments
///
/// A pattern without any `/` is tested against the basename at every depth,
/// so `*.xml` finds `a.xml` as well as `build/reports/b.xml`. A pattern with a
/// `/` is anchored at the base directory. A trailing `/` selects everything
/// below that directory (`reports/` is `reports/**`).
///
/// Matching is case-sensitive. `[`, `]`, `{` and `}` are plain characters.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    original: String,
    segments: Vec<Segment>,
    anchored: bool,
}

impl GlobMatcher {
    /// Compile an include pattern.
    ///
    /// # Errors
    /// * Returns `PatternError::InvalidEmpty` if `pattern` is empty.
    /// * Returns `PatternError::InvalidGlob` for absolute patterns, `..`
    ///   segments, or patterns without any path segment (such as `.` or `./`).
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::InvalidEmpty);
        }

        let normalized = pattern.replace('\\', "/");
        if normalized.starts_with('/') {
            return Err(PatternError::glob_parse(
                pattern,
                "absolute patterns are not supported",
            ));
        }
        let anchored = normalized.contains('/');

        let mut segments: Vec<Segment> = Vec::new();
        for raw in normalized.split('/').filter(|s| !s.is_empty() && *s != ".") {
            if raw == ".." {
                return Err(PatternError::glob_parse(
                    pattern,
                    "parent directory segments are not supported",
                ));
            }
            push_segment(&mut segments, Segment::parse(raw));
        }

        if segments.is_empty() {
            return Err(PatternError::glob_parse(pattern, "pattern has no path segments"));
        }
        if !anchored && segments.first() != Some(&Segment::Recursive) {
            segments.insert(0, Segment::Recursive);
        }
        if normalized.ends_with('/') {
            push_segment(&mut segments, Segment::Recursive);
        }

        Ok(Self {
            original: pattern.to_string(),
            segments,
            anchored,
        })
    }

    /// Test a `/`-separated path, relative to the search root.
    #[must_use]
    pub fn matches(&self, relative_path: &str) -> bool {
        let parts: Vec<&str> = relative_path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.is_empty() {
            return false;
        }
        match_segments(&self.segments, &parts)
    }

    /// The pattern as supplied by the caller.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Whether the pattern is anchored at the base directory, as opposed to
    /// a bare pattern matching basenames at any depth.
    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.anchored
    }
}

impl PartialEq for GlobMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original
    }
}

impl Eq for GlobMatcher {}

fn push_segment(segments: &mut Vec<Segment>, segment: Segment) {
    // `**/**` is the same as `**`
    if segment == Segment::Recursive && segments.last() == Some(&Segment::Recursive) {
        return;
    }
    segments.push(segment);
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::Recursive, rest)) => {
            if rest.is_empty() {
                return true;
            }
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((segment, rest)) => path
            .split_first()
            .is_some_and(|(name, tail)| segment.matches_name(name) && match_segments(rest, tail)),
    }
}

fn match_tokens(tokens: &[Token], name: &str) -> bool {
    let text: Vec<char> = name.chars().collect();
    let (mut t, mut p) = (0, 0);
    // Position of the last `*` and the text index it currently absorbs up to
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match tokens.get(p) {
            Some(Token::AnyRun) => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(Token::AnyChar) => {
                t += 1;
                p += 1;
            }
            Some(Token::Literal(c)) if *c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star_p, star_t)) => {
                    p = star_p + 1;
                    t = star_t + 1;
                    backtrack = Some((star_p, star_t + 1));
                }
                None => return false,
            },
        }
    }

    tokens[p..].iter().all(|token| *token == Token::AnyRun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob(p: &str) -> GlobMatcher {
        GlobMatcher::compile(p).expect("pattern should compile")
    }

    #[test]
    fn test_literal_pattern_requires_exact_name() {
        let m = glob("report.xml");
        assert!(m.matches("report.xml"));
        assert!(!m.matches("report.xml.bak"));
        assert!(!m.matches("my-report.xml"));
    }

    #[test]
    fn test_bare_pattern_matches_basename_at_any_depth() {
        let m = glob("*.xml");
        assert!(!m.is_anchored());
        assert!(m.matches("foobar.xml"));
        assert!(m.matches("build/foobar.xml"));
        assert!(m.matches("a/b/c/foobar.xml"));
        assert!(!m.matches("a/b/c/foobar.json"));
        // A directory name matching the pattern does not make its files match
        assert!(!m.matches("dir.xml/readme.txt"));
    }

    #[test]
    fn test_anchored_pattern_only_matches_from_root() {
        let m = glob("build/*.xml");
        assert!(m.is_anchored());
        assert!(m.matches("build/report.xml"));
        assert!(!m.matches("sub/build/report.xml"));
        assert!(!m.matches("build/nested/report.xml"));
    }

    #[test]
    fn test_dot_slash_prefix_anchors_pattern() {
        let m = glob("./report.xml");
        assert!(m.is_anchored());
        assert!(m.matches("report.xml"));
        assert!(!m.matches("a/report.xml"));
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        let m = glob("build/*");
        assert!(m.matches("build/x.xml"));
        assert!(!m.matches("build/a/x.xml"));
    }

    #[test]
    fn test_question_mark_matches_exactly_one_char() {
        let m = glob("report-?.xml");
        assert!(m.matches("report-1.xml"));
        assert!(m.matches("report-é.xml"));
        assert!(!m.matches("report-.xml"));
        assert!(!m.matches("report-12.xml"));

        let across = glob("a?b");
        assert!(!across.matches("a/b"));
    }

    #[test]
    fn test_double_star_matches_zero_or_more_segments() {
        let m = glob("**/report.xml");
        assert!(m.matches("report.xml"));
        assert!(m.matches("a/report.xml"));
        assert!(m.matches("a/b/report.xml"));

        let middle = glob("build/**/coverage.xml");
        assert!(middle.matches("build/coverage.xml"));
        assert!(middle.matches("build/x/y/coverage.xml"));
        assert!(!middle.matches("other/build/coverage.xml"));
    }

    #[test]
    fn test_double_star_inside_segment_is_segment_bounded() {
        let m = glob("build/a**b");
        assert!(m.matches("build/ab"));
        assert!(m.matches("build/axxb"));
        assert!(!m.matches("build/a/b"));
        assert!(!m.matches("build/a/x/b"));
    }

    #[test]
    fn test_repeated_double_star_collapses() {
        let m = glob("**/**/report.xml");
        assert_eq!(m.segments, glob("**/report.xml").segments);
        assert!(m.matches("report.xml"));
    }

    #[test]
    fn test_trailing_slash_selects_everything_below() {
        let m = glob("reports/");
        assert!(m.matches("reports/a.xml"));
        assert!(m.matches("reports/x/y/b.json"));
        assert!(!m.matches("other/a.xml"));
    }

    #[test]
    fn test_backslashes_are_normalized() {
        let m = glob("build\\*.xml");
        assert!(m.is_anchored());
        assert!(m.matches("build/report.xml"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let m = glob("Report.xml");
        assert!(m.matches("Report.xml"));
        assert!(!m.matches("report.xml"));
        assert!(!m.matches("REPORT.XML"));
    }

    #[test]
    fn test_brackets_are_literal() {
        let m = glob("[ab].xml");
        assert!(m.matches("[ab].xml"));
        assert!(!m.matches("a.xml"));
    }

    #[test]
    fn test_star_alone_matches_every_file() {
        let m = glob("*");
        assert!(m.matches("a"));
        assert!(m.matches("a/b/c.txt"));
        assert!(!m.matches(""));
    }

    #[test]
    fn test_multiple_stars_backtrack() {
        let m = glob("*-*-report.xml");
        assert!(m.matches("a-b-report.xml"));
        assert!(m.matches("a-b-c-report.xml"));
        assert!(!m.matches("ab-report.xml"));
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        assert_eq!(GlobMatcher::compile("").unwrap_err(), PatternError::InvalidEmpty);
    }

    #[test]
    fn test_invalid_patterns_are_rejected() {
        for p in ["/etc/report.xml", "../report.xml", "./", ".", "//"] {
            match GlobMatcher::compile(p) {
                Err(PatternError::InvalidGlob { pattern, .. }) => assert_eq!(pattern, p),
                other => panic!("Expected InvalidGlob for '{p}', got {other:?}"),
            }
        }
    }
}
