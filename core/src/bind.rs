//! Option binding: reconciling raw options against a schema.
//!
//! For each declared option the raw mapping is consulted under both its long
//! and short name. Exactly one hit is coerced to the declared type; no hit
//! falls back to the default (or fails if the option is required); two hits
//! are a conflict. Every consumed name is removed from a working copy of the
//! raw mapping, and anything left over afterwards was never declared.
//!
//! Binding never modifies its input, so a failed bind leaves the raw mapping
//! exactly as supplied.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::BindError;
use crate::parse::RawOptions;
use crate::{OptionSchema, OptionValue, ValueType};

/// Canonical option names mapped to typed values, in schema order.
pub type BoundOptions = IndexMap<String, OptionValue>;

/// Binds `raw` against `schema`.
///
/// # Errors
///
/// - [`BindError::Conflict`] when both spellings of an option were supplied,
///   even with equal values.
/// - [`BindError::InvalidType`] when a value does not parse as the declared type.
/// - [`BindError::MissingRequired`] when an option without default is absent.
/// - [`BindError::UnexpectedOption`] for the first supplied name no schema
///   entry consumed.
///
/// # Examples
///
/// ```
/// use argtree_core::{OptionSchema, OptionValue, RawOptions, ValueType, bind};
///
/// let schema = vec![
///     OptionSchema::long("name", ValueType::String).with_default("world"),
///     OptionSchema::short("n", ValueType::Uint),
/// ];
/// let mut raw = RawOptions::new();
/// raw.insert("n".into(), "23".into());
///
/// let bound = bind(&raw, &schema).unwrap();
/// assert_eq!(bound["name"], OptionValue::from("world"));
/// assert_eq!(bound["n"], OptionValue::Uint(23));
/// ```
pub fn bind(raw: &RawOptions, schema: &[OptionSchema]) -> Result<BoundOptions, BindError> {
    let mut remaining = raw.clone();
    let mut bound = BoundOptions::with_capacity(schema.len());

    for option in schema {
        let display_name = option.display_name();
        let long = lookup(&remaining, option.long.as_deref());
        let short = lookup(&remaining, option.short.as_deref());

        let value = match (long, short) {
            (Some(_), Some(_)) => {
                return Err(BindError::Conflict {
                    long: option.long.clone().unwrap_or_default(),
                    short: option.short.clone().unwrap_or_default(),
                });
            }
            (None, None) => match &option.default {
                Some(default) => {
                    debug!(option = display_name, default = %default, "using default");
                    default.clone()
                }
                None => return Err(BindError::MissingRequired(display_name.to_string())),
            },
            (Some(raw_value), None) | (None, Some(raw_value)) => {
                coerce(option.value_type, raw_value).ok_or_else(|| BindError::InvalidType {
                    name: display_name.to_string(),
                    value: raw_value.to_string(),
                    expected: option.value_type,
                })?
            }
        };

        for name in [&option.long, &option.short].into_iter().flatten() {
            remaining.shift_remove(name.as_str());
        }
        bound.insert(display_name.to_string(), value);
    }

    if let Some(name) = remaining.keys().next() {
        return Err(BindError::UnexpectedOption(name.clone()));
    }

    debug!(options = bound.len(), "bound options");
    Ok(bound)
}

fn lookup<'r>(raw: &'r RawOptions, name: Option<&str>) -> Option<&'r str> {
    name.and_then(|n| raw.get(n)).map(String::as_str)
}

/// Coerces a raw string to `value_type`, or `None` if it does not parse.
///
/// # Examples
///
/// ```
/// use argtree_core::{OptionValue, ValueType, coerce};
///
/// assert_eq!(coerce(ValueType::Bool, "T"), Some(OptionValue::Bool(true)));
/// assert_eq!(coerce(ValueType::Int, "-7"), Some(OptionValue::Int(-7)));
/// assert_eq!(coerce(ValueType::Uint, "-7"), None);
/// assert_eq!(coerce(ValueType::Uint, "+7"), None);
/// ```
pub fn coerce(value_type: ValueType, raw: &str) -> Option<OptionValue> {
    match value_type {
        ValueType::Bool => parse_bool(raw).map(OptionValue::Bool),
        ValueType::Int => raw.parse().ok().map(OptionValue::Int),
        // unsigned values take no sign, not even `+`
        ValueType::Uint if raw.starts_with('+') => None,
        ValueType::Uint => raw.parse().ok().map(OptionValue::Uint),
        ValueType::Float => raw.parse().ok().map(OptionValue::Float),
        ValueType::String => Some(OptionValue::String(raw.to_string())),
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
