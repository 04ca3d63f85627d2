//! Parser behavior settings.
//!
//! [`ParserConfig`] is serde-serializable so a host can embed it in its own
//! configuration, and every field has a default.

use serde::{Deserialize, Serialize};

/// What to do with a valueless option that is the last token.
///
/// `prog greet --loud` leaves `--loud` waiting for a value that never comes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrailingFlag {
    /// Record the option as the boolean sentinel `"true"` (the default).
    #[default]
    AsTrue,
    /// Fail with [`ParseError::DanglingFlag`](crate::ParseError::DanglingFlag).
    Reject,
}

/// Settings for the argument scan.
///
/// # Examples
///
/// ```
/// use argtree_core::{ParserConfig, TrailingFlag};
///
/// let config = ParserConfig::default();
/// assert_eq!(config.trailing_flag, TrailingFlag::AsTrue);
///
/// let strict = ParserConfig::default().with_trailing_flag(TrailingFlag::Reject);
/// assert_eq!(strict.trailing_flag, TrailingFlag::Reject);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Handling of a trailing valueless option.
    pub trailing_flag: TrailingFlag,
}

impl ParserConfig {
    pub fn with_trailing_flag(mut self, trailing_flag: TrailingFlag) -> Self {
        self.trailing_flag = trailing_flag;
        self
    }
}
