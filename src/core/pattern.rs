//! Search pattern construction for a mapping's `from` term.

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Escaped literal wrapped in word boundaries.
    Word,
    /// Slash-delimited regex passed through verbatim.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub source: String,
    pub kind: PatternKind,
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Build the search pattern for `from`.
///
/// A leading `/` marks the raw-regex form: exactly one leading and one
/// trailing character are removed, whatever the trailing character is, and
/// the remainder is used as-is. Anything else matches `from` as a whole word.
pub fn build(from: &str) -> Result<Pattern> {
    match from.strip_prefix('/') {
        Some(rest) => raw(rest),
        None => Ok(word(from)),
    }
}

/// Check that `pattern` compiles under the `regex` crate's syntax, the
/// dialect fastmod uses.
pub fn check_regex(pattern: &str) -> Result<()> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| Error::mapping_invalid_pattern(pattern, e.to_string()))
}

fn word(from: &str) -> Pattern {
    Pattern {
        source: format!(r"\b{}\b", regex::escape(from)),
        kind: PatternKind::Word,
    }
}

fn raw(rest: &str) -> Result<Pattern> {
    let mut chars = rest.chars();
    if chars.next_back().is_none() {
        return Err(Error::mapping_invalid_pattern(
            "",
            "raw pattern needs a closing delimiter after '/'",
        ));
    }

    Ok(Pattern {
        source: chars.as_str().to_string(),
        kind: PatternKind::Raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn word_pattern_is_bounded() {
        let pattern = build("ilk").unwrap();
        assert_eq!(pattern.as_str(), r"\bilk\b");
        assert_eq!(pattern.kind, PatternKind::Word);
    }

    #[test]
    fn word_pattern_matches_whole_tokens_only() {
        let re = Regex::new(build("ilk").unwrap().as_str()).unwrap();
        assert!(re.is_match("ilk"));
        assert!(re.is_match("the ilk type"));
        assert!(!re.is_match("milk"));
        assert!(!re.is_match("ilkType"));
    }

    #[test]
    fn word_pattern_escapes_metacharacters() {
        let pattern = build("a.b").unwrap();
        assert_eq!(pattern.as_str(), r"\ba\.b\b");

        let re = Regex::new(pattern.as_str()).unwrap();
        assert!(re.is_match("x a.b y"));
        assert!(!re.is_match("x axb y"));
    }

    #[test]
    fn raw_pattern_strips_delimiters() {
        let pattern = build("/foo.*bar/").unwrap();
        assert_eq!(pattern.as_str(), "foo.*bar");
        assert_eq!(pattern.kind, PatternKind::Raw);

        assert_eq!(build("/^legacy.*$/").unwrap().as_str(), "^legacy.*$");
    }

    #[test]
    fn raw_pattern_strips_last_char_whatever_it_is() {
        assert_eq!(build("/abcX").unwrap().as_str(), "abc");
        assert_eq!(build("/ab√").unwrap().as_str(), "ab");
    }

    #[test]
    fn raw_pattern_of_two_chars_is_empty() {
        assert_eq!(build("//").unwrap().as_str(), "");
    }

    #[test]
    fn raw_pattern_is_not_compiled_by_build() {
        assert_eq!(build("/foo(?=bar)/").unwrap().as_str(), "foo(?=bar)");
    }

    #[test]
    fn lone_slash_is_rejected() {
        let err = build("/").unwrap_err();
        assert_eq!(err.code, ErrorCode::MappingInvalidPattern);
    }

    #[test]
    fn check_regex_accepts_word_patterns() {
        assert!(check_regex(build("a.b").unwrap().as_str()).is_ok());
    }

    #[test]
    fn check_regex_rejects_uncompilable() {
        let err = check_regex("foo(").unwrap_err();
        assert_eq!(err.code, ErrorCode::MappingInvalidPattern);
        assert_eq!(err.details["pattern"], "foo(");

        assert!(check_regex("foo(?=bar)").is_err());
    }
}
