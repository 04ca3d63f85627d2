//! Bound command contexts and parent chaining.
//!
//! A [`Context`] is what a handler receives: the command name, its positional
//! arguments and its typed options. Nested commands get one context per
//! level, each borrowing the enclosing level's context, so option lookups
//! that miss locally continue outward. That is how flags declared at the
//! application root reach every command beneath it.

use serde_json::{Value, json};
use tracing::debug;

use crate::bind::{BoundOptions, bind};
use crate::error::BindError;
use crate::parse::{RawContext, RawOptions};
use crate::{OptionSchema, OptionValue};

/// A command invocation with bound options.
///
/// # Examples
///
/// ```
/// use argtree_core::{Context, OptionSchema, RawOptions, ValueType};
///
/// let global = vec![OptionSchema::long("verbose", ValueType::Bool).with_default(false)];
/// let mut raw = RawOptions::new();
/// raw.insert("verbose".into(), "true".into());
/// let root = Context::bind("prog", vec!["greet".into()], &raw, &global, None).unwrap();
///
/// let local = vec![OptionSchema::new(Some("name"), Some("n"), ValueType::String)];
/// let mut raw = RawOptions::new();
/// raw.insert("n".into(), "andy".into());
/// let greet = Context::bind("greet", vec![], &raw, &local, Some(&root)).unwrap();
///
/// assert_eq!(greet.string_option("name"), Some("andy"));
/// assert_eq!(greet.string_option("n"), Some("andy"));
/// assert_eq!(greet.bool_option("verbose"), Some(true));
/// assert_eq!(greet.path(), vec!["prog", "greet"]);
/// ```
#[derive(Debug, Clone)]
pub struct Context<'a> {
    command: String,
    args: Vec<String>,
    options: BoundOptions,
    schema: &'a [OptionSchema],
    parent: Option<&'a Context<'a>>,
}

impl<'a> Context<'a> {
    /// Binds `raw` against `schema` and wraps the result in a context.
    ///
    /// # Errors
    ///
    /// Any [`BindError`]; `raw` is left untouched.
    pub fn bind(
        command: impl Into<String>,
        args: Vec<String>,
        raw: &RawOptions,
        schema: &'a [OptionSchema],
        parent: Option<&'a Context<'a>>,
    ) -> Result<Self, BindError> {
        let command = command.into();
        let options = bind(raw, schema)?;
        debug!(command = %command, depth = parent.map_or(0, |p| p.depth() + 1), "context bound");
        Ok(Self {
            command,
            args,
            options,
            schema,
            parent,
        })
    }

    /// Name of the command this context belongs to.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Positional arguments following the command, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Options bound at this level, keyed by display name.
    pub fn options(&self) -> &BoundOptions {
        &self.options
    }

    /// Option declarations this level was bound against.
    pub fn schema(&self) -> &'a [OptionSchema] {
        self.schema
    }

    pub fn parent(&self) -> Option<&'a Context<'a>> {
        self.parent
    }

    /// Number of enclosing contexts.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Iterates from this context outward to the root.
    pub fn ancestors(&self) -> Ancestors<'_, 'a> {
        Ancestors { next: Some(self) }
    }

    /// Command names from the root down to this context.
    pub fn path(&self) -> Vec<&str> {
        let mut path: Vec<&str> = self.ancestors().map(Context::command).collect();
        path.reverse();
        path
    }

    /// Looks up an option by display name or alias, falling back to
    /// enclosing contexts.
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.ancestors().find_map(|ctx| ctx.local_option(name))
    }

    fn local_option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name).or_else(|| {
            self.schema
                .iter()
                .find(|opt| opt.matches(name))
                .and_then(|opt| self.options.get(opt.display_name()))
        })
    }

    pub fn bool_option(&self, name: &str) -> Option<bool> {
        self.option(name).and_then(OptionValue::as_bool)
    }

    pub fn int_option(&self, name: &str) -> Option<i64> {
        self.option(name).and_then(OptionValue::as_int)
    }

    pub fn uint_option(&self, name: &str) -> Option<u64> {
        self.option(name).and_then(OptionValue::as_uint)
    }

    pub fn float_option(&self, name: &str) -> Option<f64> {
        self.option(name).and_then(OptionValue::as_float)
    }

    pub fn string_option(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(OptionValue::as_str)
    }

    /// Renders this level as `{"command", "args", "options"}` JSON.
    pub fn to_json(&self) -> Value {
        json!({
            "command": self.command,
            "args": self.args,
            "options": self.options,
        })
    }
}

impl RawContext {
    /// Binds this invocation's options against `schema` as a root context.
    ///
    /// # Errors
    ///
    /// Any [`BindError`]; `self` is left untouched.
    pub fn bind<'a>(&self, schema: &'a [OptionSchema]) -> Result<Context<'a>, BindError> {
        Context::bind(
            self.command.clone(),
            self.args.clone(),
            &self.options,
            schema,
            None,
        )
    }
}

/// Iterator over a context and its enclosing contexts.
pub struct Ancestors<'c, 'a> {
    next: Option<&'c Context<'a>>,
}

impl<'c, 'a> Iterator for Ancestors<'c, 'a> {
    type Item = &'c Context<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent;
        Some(current)
    }
}
