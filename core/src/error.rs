//! Error types for parsing, binding and dispatch.
//!
//! Every stage returns its failure as a value. Only
//! [`Cli::run_main`](crate::Cli::run_main) turns an error into output and an
//! exit status.

use thiserror::Error;

use crate::{HandlerError, ValidationError, ValueType};

/// Failures of the argument scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No positional token was supplied.
    #[error("no command given")]
    NoCommand,
    /// The last token was a valueless option and trailing options are rejected.
    #[error("option '{0}' expects a value")]
    DanglingFlag(String),
}

/// Failures reconciling supplied options against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// Both the long and the short spelling of one option were supplied.
    #[error("conflicting options: --{long} and -{short} were both given")]
    Conflict { long: String, short: String },
    /// The supplied value does not parse as the declared type.
    #[error("invalid value '{value}' for option '{name}': expected {expected}")]
    InvalidType {
        name: String,
        value: String,
        expected: ValueType,
    },
    /// A required option was not supplied.
    #[error("missing required option '{0}'")]
    MissingRequired(String),
    /// A supplied option is not declared for the command.
    #[error("unexpected option '{0}'")]
    UnexpectedOption(String),
}

/// Failures of a full dispatch run.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command tree declaration is malformed.
    #[error("invalid command declaration: {0}")]
    InvalidDeclaration(#[from] ValidationError),
    /// The argument scan failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The first positional argument names no registered command.
    #[error("command not found: {0}")]
    CommandNotFound(String),
    /// The resolved command has no handler.
    #[error("no handler registered for '{}'", .path.join(" "))]
    NoHandler { path: Vec<String> },
    /// Options for the command at `path` failed to bind.
    #[error("{}: {source}", .path.join(" "))]
    Bind {
        path: Vec<String>,
        #[source]
        source: BindError,
    },
    /// The command handler returned an error.
    #[error("{0}")]
    Handler(HandlerError),
}

impl DispatchError {
    /// Returns the command path the error concerns, root first.
    ///
    /// Errors raised before a command was resolved report an empty path.
    pub fn path(&self) -> &[String] {
        match self {
            DispatchError::NoHandler { path } | DispatchError::Bind { path, .. } => path,
            _ => &[],
        }
    }
}
