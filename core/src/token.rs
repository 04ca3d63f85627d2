//! Raw argument token classification.
//!
//! Every raw argument is either a long option (`--name`, `--name=value`), a
//! short option (`-n`, `-n=value`) or a plain token. Option names consist of
//! ASCII letters, digits and underscores only; anything else that merely
//! looks like a flag (`-`, `--`, `---x`, `--a.b`) is plain and ends up as a
//! positional argument or an option value.

use std::sync::LazyLock;

use regex::Regex;

static LONG_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^--[A-Za-z0-9_]+(=.*)?$").expect("static regex must compile")
});
static SHORT_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^-[A-Za-z0-9_]+(=.*)?$").expect("static regex must compile")
});

/// Classification of a raw argument token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `--name` or `--name=value`.
    LongOption,
    /// `-n` or `-n=value`.
    ShortOption,
    /// Anything else.
    Plain,
}

impl TokenKind {
    /// Number of leading dashes to strip, or `None` for plain tokens.
    pub fn prefix_len(self) -> Option<usize> {
        match self {
            TokenKind::LongOption => Some(2),
            TokenKind::ShortOption => Some(1),
            TokenKind::Plain => None,
        }
    }
}

/// Classifies a raw argument token.
///
/// # Examples
///
/// ```
/// use argtree_core::{TokenKind, classify};
///
/// assert_eq!(classify("--name=andy"), TokenKind::LongOption);
/// assert_eq!(classify("-n"), TokenKind::ShortOption);
/// assert_eq!(classify("---name"), TokenKind::Plain);
/// assert_eq!(classify("--"), TokenKind::Plain);
/// ```
pub fn classify(token: &str) -> TokenKind {
    if LONG_OPTION.is_match(token) {
        TokenKind::LongOption
    } else if SHORT_OPTION.is_match(token) {
        TokenKind::ShortOption
    } else {
        TokenKind::Plain
    }
}

/// Strips `prefix_len` leading characters and splits on the first `=`.
///
/// The value is empty when the token carries no `=`; whether the option was
/// given a value at all is for the caller to track.
///
/// # Examples
///
/// ```
/// use argtree_core::split;
///
/// assert_eq!(split("--name=andy", 2), ("name", "andy"));
/// assert_eq!(split("-n", 1), ("n", ""));
/// assert_eq!(split("--url=a=b", 2), ("url", "a=b"));
/// ```
pub fn split(token: &str, prefix_len: usize) -> (&str, &str) {
    let body = token.get(prefix_len..).unwrap_or_default();
    body.split_once('=').unwrap_or((body, ""))
}

/// Classifies `token` and, if it is an option, splits it into name and value.
pub fn split_option(token: &str) -> Option<(&str, &str)> {
    classify(token)
        .prefix_len()
        .map(|prefix_len| split(token, prefix_len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_option_classification() {
        let cases = [
            ("--name", TokenKind::LongOption),
            ("--name=andy", TokenKind::LongOption),
            ("--name=", TokenKind::LongOption),
            ("--snake_case_1", TokenKind::LongOption),
            ("---name=andy", TokenKind::Plain),
            ("name", TokenKind::Plain),
            ("---", TokenKind::Plain),
            ("--", TokenKind::Plain),
            ("-", TokenKind::Plain),
        ];

        for (token, expected) in cases {
            assert_eq!(classify(token), expected, "token {token:?}");
        }
    }

    #[test]
    fn test_short_option_classification() {
        let cases = [
            ("-n", TokenKind::ShortOption),
            ("-n=andy", TokenKind::ShortOption),
            ("-abc", TokenKind::ShortOption),
            ("-3", TokenKind::ShortOption),
            ("n", TokenKind::Plain),
            ("--", TokenKind::Plain),
            ("-", TokenKind::Plain),
        ];

        for (token, expected) in cases {
            assert_eq!(classify(token), expected, "token {token:?}");
        }
    }

    #[test]
    fn test_punctuation_in_name_is_plain() {
        assert_eq!(classify("--dry-run"), TokenKind::Plain);
        assert_eq!(classify("--a.b=1"), TokenKind::Plain);
        assert_eq!(classify("-n!"), TokenKind::Plain);
        assert_eq!(classify("--=value"), TokenKind::Plain);
    }

    #[test]
    fn test_value_may_contain_anything() {
        assert_eq!(classify("--msg=hello world"), TokenKind::LongOption);
        assert_eq!(classify("--msg=line1\nline2"), TokenKind::LongOption);
        assert_eq!(
            split_option("--msg=line1\nline2"),
            Some(("msg", "line1\nline2"))
        );
    }

    #[test]
    fn test_split() {
        assert_eq!(split("--name", 2), ("name", ""));
        assert_eq!(split("--name=andy", 2), ("name", "andy"));
        assert_eq!(split("-n", 1), ("n", ""));
        assert_eq!(split("-n=andy", 1), ("n", "andy"));
        assert_eq!(split("--expr=a=b", 2), ("expr", "a=b"));
        assert_eq!(split("-", 2), ("", ""));
    }

    #[test]
    fn test_split_option_rejects_plain() {
        assert_eq!(split_option("---name"), None);
        assert_eq!(split_option("name"), None);
        assert_eq!(split_option("-n=5"), Some(("n", "5")));
    }
}
