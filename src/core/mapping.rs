//! Mapping file grammar.
//!
//! Each line of a mapping file has the shape `<from> -> <to>[:<anything>]`.
//! Lines that don't fit are ignored; a `from` starting with `#` disables the
//! mapping. Lines are matched as raw bytes so a stray non-UTF-8 comment can't
//! stop a run.

use regex::bytes::Regex;
use std::sync::LazyLock;

static MAPPING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    // `from` is greedy up to the last " -> " that still leaves a `to`;
    // `to` stops before the first ':' (trailing content is a free-form note)
    Regex::new(r"(?-u)^(.+) -> ([^:]+):?").unwrap()
});

/// A single `from -> to` rename request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub from: String,
    pub to: String,
}

impl Mapping {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// How a mapping file line was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Mapping(Mapping),
    /// Commented-out mapping (`# old -> new`), parsed but never applied.
    Disabled(Mapping),
    /// An active mapping whose `from` or `to` is not valid UTF-8. The
    /// mapping holds a lossy copy for diagnostics.
    NotUtf8(Mapping),
    Unmatched,
}

pub fn classify(line: &[u8]) -> LineKind {
    let Some(caps) = MAPPING_LINE.captures(line) else {
        return LineKind::Unmatched;
    };
    let (from, to) = (&caps[1], &caps[2]);

    let lossy = || {
        Mapping::new(
            String::from_utf8_lossy(from).into_owned(),
            String::from_utf8_lossy(to).into_owned(),
        )
    };

    if from.starts_with(b"#") {
        return LineKind::Disabled(lossy());
    }

    match (std::str::from_utf8(from), std::str::from_utf8(to)) {
        (Ok(from), Ok(to)) => LineKind::Mapping(Mapping::new(from, to)),
        _ => LineKind::NotUtf8(lossy()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<Mapping> {
        match classify(line.as_bytes()) {
            LineKind::Mapping(m) | LineKind::Disabled(m) | LineKind::NotUtf8(m) => Some(m),
            LineKind::Unmatched => None,
        }
    }

    #[test]
    fn parses_simple_mapping() {
        assert_eq!(
            parse("ilk -> collateralType"),
            Some(Mapping::new("ilk", "collateralType"))
        );
    }

    #[test]
    fn trailing_note_after_colon_is_dropped() {
        assert_eq!(
            parse("urn -> vault: the CDP owner"),
            Some(Mapping::new("urn", "vault"))
        );
        assert_eq!(parse("urn -> vault:"), Some(Mapping::new("urn", "vault")));
    }

    #[test]
    fn to_is_kept_verbatim() {
        assert_eq!(
            parse("gem -> token amount : note"),
            Some(Mapping::new("gem", "token amount "))
        );
    }

    #[test]
    fn from_is_greedy() {
        assert_eq!(parse("a -> b -> c"), Some(Mapping::new("a -> b", "c")));
    }

    #[test]
    fn greedy_from_backs_off_when_to_would_be_empty() {
        assert_eq!(parse("a -> b -> :x"), Some(Mapping::new("a", "b -> ")));
    }

    #[test]
    fn non_matching_lines() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("just a comment"), None);
        assert_eq!(parse("a->b"), None);
        assert_eq!(parse(" -> b"), None);
        assert_eq!(parse("a -> :b"), None);
    }

    #[test]
    fn raw_regex_from_is_captured_whole() {
        assert_eq!(
            parse("/^legacy.*$/ -> modern"),
            Some(Mapping::new("/^legacy.*$/", "modern"))
        );
    }

    #[test]
    fn non_ascii_mapping_keeps_characters() {
        assert_eq!(
            classify("café -> coffee".as_bytes()),
            LineKind::Mapping(Mapping::new("café", "coffee"))
        );
    }

    #[test]
    fn classify_disabled() {
        assert_eq!(
            classify(b"# disabled -> shouldNotRun"),
            LineKind::Disabled(Mapping::new("# disabled", "shouldNotRun"))
        );
        assert_eq!(
            classify(b"#old -> new"),
            LineKind::Disabled(Mapping::new("#old", "new"))
        );
    }

    #[test]
    fn classify_active_and_unmatched() {
        assert_eq!(
            classify(b"ilk -> collateralType"),
            LineKind::Mapping(Mapping::new("ilk", "collateralType"))
        );
        assert_eq!(classify(b"# heading"), LineKind::Unmatched);
    }

    #[test]
    fn latin1_lines_are_classified_not_rejected() {
        assert_eq!(classify(b"Notes: caf\xe9"), LineKind::Unmatched);
        assert_eq!(
            classify(b"# caf\xe9 -> coffee"),
            LineKind::Disabled(Mapping::new("# caf\u{fffd}", "coffee"))
        );
        assert_eq!(
            classify(b"caf\xe9 -> coffee"),
            LineKind::NotUtf8(Mapping::new("caf\u{fffd}", "coffee"))
        );
    }

    #[test]
    fn latin1_trailing_note_does_not_taint_mapping() {
        assert_eq!(
            classify(b"urn -> vault: caf\xe9"),
            LineKind::Mapping(Mapping::new("urn", "vault"))
        );
    }
}
