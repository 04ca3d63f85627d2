//! Declaration types for command trees.
//!
//! A host program describes its command line with these types once at
//! startup: [`OptionSchema`] for every option, [`Command`] for every named
//! command (optionally nested), and the handler each command runs. Option
//! values are carried by [`OptionValue`], a sum type over the supported
//! [`ValueType`]s.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Context;

/// Error returned by a command handler.
///
/// Handler failures are opaque to the dispatcher: they are surfaced as the
/// outcome of the run and never retried.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by a command handler.
pub type HandlerResult = Result<(), HandlerError>;

/// A command handler, invoked with the fully bound [`Context`].
pub type Handler = Box<dyn Fn(&Context<'_>) -> HandlerResult + Send + Sync>;

/// Value type of an option.
///
/// # Examples
///
/// ```
/// use argtree_core::ValueType;
///
/// assert_eq!(ValueType::default(), ValueType::String);
/// assert_eq!(ValueType::Uint.to_string(), "uint");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// `true`/`false` and the other boolean spellings.
    Bool,
    /// Base-10 signed 64-bit integer.
    Int,
    /// Base-10 unsigned 64-bit integer.
    Uint,
    /// 64-bit floating point number.
    Float,
    /// Any string, taken verbatim (the default).
    #[default]
    String,
}

impl ValueType {
    /// Returns the lowercase name used in messages and help text.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Uint => "uint",
            ValueType::Float => "float",
            ValueType::String => "string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed option value.
///
/// Serializes untagged, so a bound option mapping renders as plain JSON
/// (`{"name": "andy", "n": 23}`).
///
/// # Examples
///
/// ```
/// use argtree_core::{OptionValue, ValueType};
///
/// let value = OptionValue::from(23u64);
/// assert_eq!(value.value_type(), ValueType::Uint);
/// assert_eq!(value.as_uint(), Some(23));
/// assert_eq!(value.as_int(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
}

impl OptionValue {
    /// Returns the [`ValueType`] this value belongs to.
    pub fn value_type(&self) -> ValueType {
        match self {
            OptionValue::Bool(_) => ValueType::Bool,
            OptionValue::Int(_) => ValueType::Int,
            OptionValue::Uint(_) => ValueType::Uint,
            OptionValue::Float(_) => ValueType::Float,
            OptionValue::String(_) => ValueType::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            OptionValue::Uint(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            OptionValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(i) => write!(f, "{i}"),
            OptionValue::Uint(u) => write!(f, "{u}"),
            OptionValue::Float(x) => write!(f, "{x}"),
            OptionValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        OptionValue::Uint(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

/// Schema for one command-line option.
///
/// Names are stored without their dash prefix: an option with long name
/// `"name"` is supplied as `--name`, one with short name `"n"` as `-n`. At
/// least one name must be present. An option without a default value is
/// required.
///
/// # Examples
///
/// ```
/// use argtree_core::{OptionSchema, ValueType};
///
/// let name = OptionSchema::new(Some("name"), Some("n"), ValueType::String)
///     .with_default("world")
///     .with_usage("Who to greet");
/// assert_eq!(name.display_name(), "name");
/// assert!(!name.is_required());
/// assert!(name.matches("n"));
///
/// let count = OptionSchema::short("c", ValueType::Uint);
/// assert_eq!(count.display_name(), "c");
/// assert!(count.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "OptionSchemaRepr")]
pub struct OptionSchema {
    /// Long name, supplied as `--long`.
    pub long: Option<String>,
    /// Short name, supplied as `-short`.
    pub short: Option<String>,
    /// Type the supplied value is coerced to.
    pub value_type: ValueType,
    /// Value used when the option is not supplied.
    pub default: Option<OptionValue>,
    /// Description shown in help text.
    pub usage: String,
    /// Value placeholder shown in help text (e.g. `NAME`).
    pub placeholder: Option<String>,
}

impl OptionSchema {
    /// Creates an option with the given names. Empty names count as absent.
    pub fn new(long: Option<&str>, short: Option<&str>, value_type: ValueType) -> Self {
        let non_empty = |name: Option<&str>| name.filter(|n| !n.is_empty()).map(String::from);
        Self {
            long: non_empty(long),
            short: non_empty(short),
            value_type,
            default: None,
            usage: String::new(),
            placeholder: None,
        }
    }

    /// Creates an option with only a long name.
    pub fn long(name: &str, value_type: ValueType) -> Self {
        Self::new(Some(name), None, value_type)
    }

    /// Creates an option with only a short name.
    pub fn short(name: &str, value_type: ValueType) -> Self {
        Self::new(None, Some(name), value_type)
    }

    /// Sets the default value, making the option optional.
    pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Adds a usage description.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    /// Adds a help-text placeholder for the value.
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    /// Returns the canonical name: long name if present, else short name.
    ///
    /// Bound option mappings are keyed by this name.
    pub fn display_name(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .unwrap_or_default()
    }

    /// An option without a default must be supplied.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Checks if `name` is this option's long or short name.
    pub fn matches(&self, name: &str) -> bool {
        self.long.as_deref() == Some(name) || self.short.as_deref() == Some(name)
    }
}

/// Wire form of [`OptionSchema`]. An untagged default reads back as the
/// narrowest number type that fits, so it is re-typed by `value_type`.
#[derive(Deserialize)]
struct OptionSchemaRepr {
    long: Option<String>,
    short: Option<String>,
    #[serde(default)]
    value_type: ValueType,
    default: Option<OptionValue>,
    #[serde(default)]
    usage: String,
    placeholder: Option<String>,
}

impl From<OptionSchemaRepr> for OptionSchema {
    fn from(repr: OptionSchemaRepr) -> Self {
        let value_type = repr.value_type;
        Self {
            long: repr.long,
            short: repr.short,
            value_type,
            default: repr.default.map(|value| retype_number(value, value_type)),
            usage: repr.usage,
            placeholder: repr.placeholder,
        }
    }
}

/// Moves a number into the variant of `value_type` when it fits. Anything
/// else is returned unchanged and left for validation to report.
fn retype_number(value: OptionValue, value_type: ValueType) -> OptionValue {
    match (value, value_type) {
        (OptionValue::Int(i), ValueType::Uint) if i >= 0 => OptionValue::Uint(i as u64),
        (OptionValue::Uint(u), ValueType::Int) if u <= i64::MAX as u64 => {
            OptionValue::Int(u as i64)
        }
        (OptionValue::Int(i), ValueType::Float) => OptionValue::Float(i as f64),
        (OptionValue::Uint(u), ValueType::Float) => OptionValue::Float(u as f64),
        (value, _) => value,
    }
}

/// A named command with its options, nested subcommands and handler.
///
/// Commands are built once at startup and never change afterwards.
///
/// # Examples
///
/// ```
/// use argtree_core::{Command, OptionSchema, ValueType};
///
/// let remote = Command::new("remote")
///     .with_usage("Manage remotes")
///     .with_subcommand(
///         Command::new("add")
///             .with_option(OptionSchema::long("fetch", ValueType::Bool).with_default(false))
///             .with_handler(|_ctx| Ok(())),
///     );
///
/// assert!(remote.find_subcommand("add").is_some());
/// assert!(remote.handler().is_none());
/// assert_eq!(remote.subcommand_names(), vec!["add"]);
/// ```
pub struct Command {
    /// Name, unique among its siblings.
    pub name: String,
    /// One-line description shown in help text.
    pub usage: String,
    /// Options accepted by this command, in declaration order.
    pub options: Vec<OptionSchema>,
    /// Nested commands (e.g. `remote add`).
    pub subcommands: Vec<Command>,
    handler: Option<Handler>,
}

impl Command {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            usage: String::new(),
            options: Vec::new(),
            subcommands: Vec::new(),
            handler: None,
        }
    }

    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    pub fn with_option(mut self, option: OptionSchema) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_subcommand(mut self, sub: Command) -> Self {
        self.subcommands.push(sub);
        self
    }

    /// Sets the function run when this command is the resolved leaf.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Context<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    pub fn find_subcommand(&self, name: &str) -> Option<&Command> {
        self.subcommands.iter().find(|c| c.name == name)
    }

    pub fn subcommand_names(&self) -> Vec<&str> {
        self.subcommands.iter().map(|c| c.name.as_str()).collect()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("options", &self.options)
            .field("subcommands", &self.subcommands)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}
