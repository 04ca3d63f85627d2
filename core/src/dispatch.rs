//! Application root and dispatch pipeline.
//!
//! A run moves through `Start → Parsed → CommandResolved → OptionsBound →
//! Executed`, stopping at the first failure:
//!
//! 1. the raw arguments are scanned (no positional at all: `NoCommand`);
//! 2. the positionals are matched against the command tree
//!    (`CommandNotFound`, or `NoHandler` when the leaf cannot run);
//! 3. every raw option is routed to the deepest level on the resolved path
//!    that declares it, and each level is bound outermost first, each context
//!    borrowing the one above it;
//! 4. the leaf handler runs exactly once with the innermost context.

use std::process::ExitCode;

use tracing::debug;

use crate::error::{DispatchError, ParseError};
use crate::help::{self, HelpLevel};
use crate::parse::{RawOptions, scan};
use crate::validate::validate_cli;
use crate::{
    Command, CommandRegistry, Context, Handler, HandlerResult, OptionSchema, ParserConfig,
    ValidationError,
};

/// A command-line application: global options, commands and settings.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use argtree_core::*;
///
/// let seen = Arc::new(Mutex::new(None));
/// let sink = Arc::clone(&seen);
///
/// let cli = Cli::new("prog")
///     .with_option(
///         OptionSchema::new(Some("verbose"), Some("v"), ValueType::Bool).with_default(false),
///     )
///     .with_command(
///         Command::new("greet")
///             .with_option(OptionSchema::long("name", ValueType::String).with_default("world"))
///             .with_option(OptionSchema::short("n", ValueType::Uint))
///             .with_handler(move |ctx| {
///                 let greeting = format!(
///                     "{} x{}",
///                     ctx.string_option("name").unwrap_or_default(),
///                     ctx.uint_option("n").unwrap_or_default()
///                 );
///                 *sink.lock().unwrap() = Some((greeting, ctx.bool_option("verbose")));
///                 Ok(())
///             }),
///     );
///
/// cli.run(["prog", "greet", "--name=andy", "-n", "23", "-v"]).unwrap();
/// assert_eq!(*seen.lock().unwrap(), Some(("andy x23".to_string(), Some(true))));
///
/// assert!(matches!(
///     cli.run(["prog"]),
///     Err(DispatchError::Parse(ParseError::NoCommand))
/// ));
/// ```
#[derive(Debug)]
pub struct Cli {
    name: String,
    version: Option<String>,
    usage: String,
    options: Vec<OptionSchema>,
    registry: CommandRegistry,
    handler: Option<AppHandler>,
    config: ParserConfig,
}

struct AppHandler(Handler);

impl std::fmt::Debug for AppHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Handler")
    }
}

impl Cli {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: None,
            usage: String::new(),
            options: Vec::new(),
            registry: CommandRegistry::new(),
            handler: None,
            config: ParserConfig::default(),
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    /// Adds a global option, visible to every command through the root
    /// context.
    pub fn with_option(mut self, option: OptionSchema) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.registry.register(command);
        self
    }

    /// Sets the handler run when no commands are registered.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Context<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.handler = Some(AppHandler(Box::new(handler)));
        self
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Global options.
    pub fn options(&self) -> &[OptionSchema] {
        &self.options
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Checks the declaration for mistakes. See [`validate_cli`].
    pub fn validate(&self) -> Vec<ValidationError> {
        validate_cli(self)
    }

    /// Runs the full pipeline over `argv`, whose first item is the program
    /// name and is skipped.
    ///
    /// # Errors
    ///
    /// Returns the first failure of any stage, including the handler's own
    /// error as [`DispatchError::Handler`].
    pub fn run<I, S>(&self, argv: I) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dispatch(argv, |handler, ctx| {
            debug!(path = ?ctx.path(), "executing handler");
            handler(ctx).map_err(DispatchError::Handler)
        })
    }

    /// Runs the pipeline up to `OptionsBound` and hands the innermost
    /// context to `f` instead of the command handler.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run), minus handler failures.
    pub fn inspect<I, S, R>(
        &self,
        argv: I,
        f: impl FnOnce(&Context<'_>) -> R,
    ) -> Result<R, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dispatch(argv, |_, ctx| Ok(f(ctx)))
    }

    /// Runs the pipeline and maps the outcome to a process exit code.
    ///
    /// Failures are reported on stderr as `error: <message>` followed by
    /// help for the command path the failure concerns.
    pub fn run_main<I, S>(&self, argv: I) -> ExitCode
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.run(argv) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                if !matches!(err, DispatchError::Handler(_)) {
                    let path: Vec<&str> = err.path().iter().skip(1).map(String::as_str).collect();
                    eprintln!();
                    eprint!("{}", self.help_for(&path));
                }
                ExitCode::FAILURE
            }
        }
    }

    /// Renders help for the command at `path` (names below the root).
    ///
    /// Unknown trailing names are ignored; an empty path describes the
    /// application itself.
    pub fn help_for(&self, path: &[&str]) -> String {
        let mut levels = vec![HelpLevel {
            command: &self.name,
            options: &self.options,
        }];
        let mut children = self.registry.commands();
        for name in path {
            let Some(command) = children.iter().find(|c| c.name == *name) else {
                break;
            };
            levels.push(HelpLevel {
                command: &command.name,
                options: &command.options,
            });
            children = &command.subcommands;
        }

        let mut out = String::new();
        if levels.len() == 1 {
            match &self.version {
                Some(version) => out.push_str(&format!("{} {version}\n", self.name)),
                None => out.push_str(&format!("{}\n", self.name)),
            }
            if !self.usage.is_empty() {
                out.push_str(&self.usage);
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str(&help::render_levels(&levels, children));
        out
    }

    fn dispatch<I, S, R>(
        &self,
        argv: I,
        finish: impl FnOnce(&Handler, &Context<'_>) -> Result<R, DispatchError>,
    ) -> Result<R, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(err) = self.validate().into_iter().next() {
            return Err(err.into());
        }

        let parsed = scan(argv.into_iter().skip(1), &self.config)?;
        debug!(state = "parsed", positionals = ?parsed.positionals);

        if self.registry.is_empty() {
            let handler = self.handler.as_ref().ok_or_else(|| DispatchError::NoHandler {
                path: vec![self.name.clone()],
            })?;
            let root = Context::bind(
                self.name.clone(),
                parsed.positionals.clone(),
                &parsed.options,
                &self.options,
                None,
            )
            .map_err(|source| DispatchError::Bind {
                path: vec![self.name.clone()],
                source,
            })?;
            debug!(state = "options_bound", command = %self.name);
            return finish(&handler.0, &root);
        }

        let first = parsed.positionals.first().ok_or(ParseError::NoCommand)?;
        let (commands, _) = self
            .registry
            .resolve(&parsed.positionals)
            .ok_or_else(|| DispatchError::CommandNotFound(first.clone()))?;

        let names: Vec<String> = std::iter::once(self.name.clone())
            .chain(commands.iter().map(|c| c.name.clone()))
            .collect();
        let leaf = commands
            .last()
            .copied()
            .ok_or_else(|| DispatchError::CommandNotFound(first.clone()))?;
        let handler = leaf
            .handler()
            .ok_or_else(|| DispatchError::NoHandler { path: names.clone() })?;
        debug!(state = "command_resolved", path = ?names);

        let mut schemas: Vec<&[OptionSchema]> = vec![self.options.as_slice()];
        schemas.extend(commands.iter().map(|c| c.options.as_slice()));
        let routed = route(&parsed.options, &schemas);

        let levels = Levels {
            names: &names,
            schemas: &schemas,
            routed: &routed,
            positionals: &parsed.positionals,
        };
        levels.bind_from(0, None, move |ctx| {
            debug!(state = "options_bound", path = ?ctx.path());
            finish(handler, ctx)
        })
    }
}

/// Splits raw options across path levels: each name goes to the deepest
/// level declaring it, undeclared names to the leaf.
fn route(raw: &RawOptions, schemas: &[&[OptionSchema]]) -> Vec<RawOptions> {
    let mut routed = vec![RawOptions::new(); schemas.len()];
    let leaf = schemas.len() - 1;

    for (name, value) in raw {
        let level = schemas
            .iter()
            .rposition(|schema| schema.iter().any(|opt| opt.matches(name)))
            .unwrap_or(leaf);
        routed[level].insert(name.clone(), value.clone());
    }

    routed
}

struct Levels<'l> {
    names: &'l [String],
    schemas: &'l [&'l [OptionSchema]],
    routed: &'l [RawOptions],
    positionals: &'l [String],
}

impl Levels<'_> {
    /// Binds level `index` under `parent`, then recurses inward; the
    /// innermost context is handed to `finish`.
    ///
    /// Level 0 (the root) sees every positional; level `i` sees the
    /// positionals after its own name.
    fn bind_from<R>(
        &self,
        index: usize,
        parent: Option<&Context<'_>>,
        finish: impl FnOnce(&Context<'_>) -> Result<R, DispatchError>,
    ) -> Result<R, DispatchError> {
        let args = self.positionals[index..].to_vec();
        let ctx = Context::bind(
            self.names[index].clone(),
            args,
            &self.routed[index],
            self.schemas[index],
            parent,
        )
        .map_err(|source| DispatchError::Bind {
            path: self.names[..=index].to_vec(),
            source,
        })?;

        if index + 1 == self.names.len() {
            finish(&ctx)
        } else {
            self.bind_from(index + 1, Some(&ctx), finish)
        }
    }
}
