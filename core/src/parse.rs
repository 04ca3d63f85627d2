//! Single-pass argument scan.
//!
//! Walks the raw arguments left to right, keeping one piece of state: the
//! option (if any) still waiting for its value. A valueless option takes the
//! next plain token verbatim; if the next token is another option instead,
//! the waiting option is recorded as the boolean sentinel [`FLAG_SENTINEL`].

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::token::{TokenKind, classify, split};
use crate::{ParserConfig, TrailingFlag};

/// Raw value recorded for an option given without a value.
pub const FLAG_SENTINEL: &str = "true";

/// Supplied option names (long or short, as typed) mapped to raw values,
/// in the order they were first supplied.
pub type RawOptions = IndexMap<String, String>;

/// Everything a scan found: positional tokens and raw options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Plain tokens that were not consumed as option values, in order.
    pub positionals: Vec<String>,
    /// Raw option mapping.
    pub options: RawOptions,
}

/// A command invocation before its options are bound.
///
/// `command` is the first positional token, `args` the remaining ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContext {
    pub command: String,
    pub args: Vec<String>,
    pub options: RawOptions,
}

/// Scans raw arguments (program name already stripped).
///
/// Unlike [`build`], finding no positional token is not an error here.
///
/// # Errors
///
/// Returns [`ParseError::DanglingFlag`] when the last token is a valueless
/// option and `config` rejects trailing flags.
///
/// # Examples
///
/// ```
/// use argtree_core::{ParserConfig, scan};
///
/// let parsed = scan(["--verbose", "-o", "out.txt", "file"], &ParserConfig::default()).unwrap();
/// assert_eq!(parsed.positionals, vec!["file"]);
/// assert_eq!(parsed.options["verbose"], "true");
/// assert_eq!(parsed.options["o"], "out.txt");
/// ```
pub fn scan<I, S>(args: I, config: &ParserConfig) -> Result<ParsedArgs, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedArgs::default();
    let mut open_flag: Option<String> = None;

    for arg in args {
        let token = arg.as_ref();
        match classify(token) {
            kind @ (TokenKind::LongOption | TokenKind::ShortOption) => {
                if let Some(name) = open_flag.take() {
                    trace!(option = %name, "option followed by option, inferred boolean");
                    parsed.options.insert(name, FLAG_SENTINEL.to_string());
                }

                let prefix_len = kind.prefix_len().unwrap_or_default();
                let (name, value) = split(token, prefix_len);
                if value.is_empty() {
                    open_flag = Some(name.to_string());
                } else {
                    parsed.options.insert(name.to_string(), value.to_string());
                }
            }
            TokenKind::Plain => match open_flag.take() {
                Some(name) => {
                    trace!(option = %name, value = token, "option value");
                    parsed.options.insert(name, token.to_string());
                }
                None => parsed.positionals.push(token.to_string()),
            },
        }
    }

    if let Some(name) = open_flag {
        match config.trailing_flag {
            TrailingFlag::AsTrue => {
                trace!(option = %name, "trailing option, inferred boolean");
                parsed.options.insert(name, FLAG_SENTINEL.to_string());
            }
            TrailingFlag::Reject => return Err(ParseError::DanglingFlag(name)),
        }
    }

    debug!(
        positionals = parsed.positionals.len(),
        options = parsed.options.len(),
        "scanned arguments"
    );
    Ok(parsed)
}

/// Builds the raw context for one command invocation.
///
/// # Errors
///
/// Returns [`ParseError::NoCommand`] when no positional token was found, or
/// [`ParseError::DanglingFlag`] as for [`scan`].
///
/// # Examples
///
/// ```
/// use argtree_core::{ParseError, ParserConfig, build};
///
/// let ctx = build(["greet", "--name=andy", "-n", "23"], &ParserConfig::default()).unwrap();
/// assert_eq!(ctx.command, "greet");
/// assert!(ctx.args.is_empty());
/// assert_eq!(ctx.options["name"], "andy");
/// assert_eq!(ctx.options["n"], "23");
///
/// let empty: [&str; 0] = [];
/// assert_eq!(build(empty, &ParserConfig::default()), Err(ParseError::NoCommand));
/// ```
pub fn build<I, S>(args: I, config: &ParserConfig) -> Result<RawContext, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ParsedArgs {
        positionals,
        options,
    } = scan(args, config)?;

    let mut positionals = positionals.into_iter();
    let command = positionals.next().ok_or(ParseError::NoCommand)?;

    Ok(RawContext {
        command,
        args: positionals.collect(),
        options,
    })
}
