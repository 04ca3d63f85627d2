//! Command tree declaration, argument parsing and dispatch.
//!
//! A host program declares its command line once at startup and hands the
//! raw process arguments to [`Cli::run`]:
//!
//! - [`OptionSchema`]: an option with long and/or short name, value type,
//!   default and usage text.
//! - [`Command`]: a named command with options, nested subcommands and a
//!   handler.
//! - [`Cli`]: the application root: global options, the
//!   [`CommandRegistry`], and the dispatch pipeline.
//!
//! The pipeline is made of small pure steps that can also be used on their
//! own: [`classify`]/[`split`] tokenize one argument, [`scan`]/[`build`] turn
//! the argument list into positionals and raw options, and [`bind`] reconciles
//! raw options against a schema, yielding the typed values a [`Context`]
//! exposes to handlers.
//!
//! # Example
//!
//! ```
//! use argtree_core::*;
//!
//! let cli = Cli::new("prog").with_command(
//!     Command::new("greet")
//!         .with_option(OptionSchema::long("name", ValueType::String).with_default("world"))
//!         .with_option(OptionSchema::short("n", ValueType::Uint))
//!         .with_handler(|_ctx| Ok(())),
//! );
//!
//! let options = cli
//!     .inspect(["prog", "greet", "--name=andy", "-n", "23"], |ctx| ctx.to_json())
//!     .unwrap();
//! assert_eq!(options["options"], serde_json::json!({"name": "andy", "n": 23}));
//! assert_eq!(options["args"], serde_json::json!([]));
//! ```

mod bind;
mod config;
mod context;
mod dispatch;
mod error;
pub mod help;
mod parse;
mod registry;
mod token;
mod types;
mod validate;

pub use bind::{BoundOptions, bind, coerce, parse_bool};
pub use config::{ParserConfig, TrailingFlag};
pub use context::{Ancestors, Context};
pub use dispatch::Cli;
pub use error::{BindError, DispatchError, ParseError};
pub use parse::{FLAG_SENTINEL, ParsedArgs, RawContext, RawOptions, build, scan};
pub use registry::CommandRegistry;
pub use token::{TokenKind, classify, split, split_option};
pub use types::*;
pub use validate::{ValidationError, validate_cli, validate_options};
