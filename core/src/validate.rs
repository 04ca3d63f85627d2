//! Command tree declaration validation.
//!
//! Catches declaration mistakes that would otherwise only surface as
//! confusing parse or bind failures at run time: unnamed or duplicate
//! commands, options with no usable name, duplicate option names within one
//! command, and defaults of the wrong type.
//!
//! # Examples
//!
//! ```
//! use argtree_core::*;
//!
//! let cli = Cli::new("prog")
//!     .with_option(
//!         OptionSchema::new(Some("verbose"), Some("v"), ValueType::Bool).with_default(false),
//!     )
//!     .with_command(Command::new("greet"));
//! assert!(validate_cli(&cli).is_empty());
//!
//! // Invalid: dashes belong to the syntax, not the name
//! let bad = Cli::new("prog").with_option(OptionSchema::long("--verbose", ValueType::Bool));
//! assert!(!validate_cli(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Cli, Command, OptionSchema, ValueType};

/// Declaration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Command name has leading or trailing whitespace and could never match
    /// an argument.
    #[error("command name has surrounding whitespace: '{0}'")]
    UntrimmedCommandName(String),
    /// Two sibling commands share a name.
    #[error("duplicate command in scope: {0}")]
    DuplicateCommand(String),
    /// An option has neither a long nor a short name.
    #[error("option must define a long or short name")]
    MissingOptionName,
    /// An option name contains characters other than letters, digits and `_`.
    #[error("invalid option name: {0}")]
    InvalidOptionName(String),
    /// Two options of one command share a name.
    #[error("duplicate option in scope: {0}")]
    DuplicateOption(String),
    /// A default value does not have the option's declared type.
    #[error("default for option '{option}' is {found}, expected {expected}")]
    DefaultTypeMismatch {
        option: String,
        expected: ValueType,
        found: ValueType,
    },
}

/// Validates an application declaration: its global options and every
/// command beneath it.
pub fn validate_cli(cli: &Cli) -> Vec<ValidationError> {
    let mut errors = validate_options(cli.options());
    if !errors.is_empty() {
        return errors;
    }

    errors.extend(validate_commands(cli.registry().commands()));
    errors
}

fn validate_commands(commands: &[Command]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for command in commands {
        let name = command.name.as_str();
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyCommandName);
            return errors;
        }
        if name.trim() != name {
            errors.push(ValidationError::UntrimmedCommandName(name.to_string()));
            return errors;
        }

        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateCommand(name.to_string()));
            return errors;
        }

        errors.extend(validate_options(&command.options));
        errors.extend(validate_commands(&command.subcommands));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

/// Validates the option declarations of a single command.
pub fn validate_options(options: &[OptionSchema]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for option in options {
        if option.long.is_none() && option.short.is_none() {
            errors.push(ValidationError::MissingOptionName);
            return errors;
        }

        for name in [&option.long, &option.short].into_iter().flatten() {
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                errors.push(ValidationError::InvalidOptionName(name.clone()));
                return errors;
            }
            if !seen.insert(name.as_str()) {
                errors.push(ValidationError::DuplicateOption(name.clone()));
                return errors;
            }
        }

        if let Some(default) = &option.default {
            if default.value_type() != option.value_type {
                errors.push(ValidationError::DefaultTypeMismatch {
                    option: option.display_name().to_string(),
                    expected: option.value_type,
                    found: default.value_type(),
                });
                return errors;
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_duplicate_commands() {
        let cli = Cli::new("prog")
            .with_command(Command::new("greet"))
            .with_command(Command::new("greet"));

        assert_eq!(
            validate_cli(&cli),
            vec![ValidationError::DuplicateCommand("greet".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_empty_nested_command() {
        let cli = Cli::new("prog")
            .with_command(Command::new("remote").with_subcommand(Command::new(" ")));

        assert_eq!(validate_cli(&cli), vec![ValidationError::EmptyCommandName]);
    }

    #[test]
    fn test_validate_rejects_padded_command_name() {
        let cli = Cli::new("prog")
            .with_command(Command::new("greet"))
            .with_command(Command::new(" greet"));

        assert_eq!(
            validate_cli(&cli),
            vec![ValidationError::UntrimmedCommandName(" greet".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_nameless_option() {
        let options = vec![OptionSchema::new(None, Some(""), ValueType::Bool)];

        assert_eq!(
            validate_options(&options),
            vec![ValidationError::MissingOptionName]
        );
    }

    #[test]
    fn test_validate_rejects_punctuation_in_name() {
        let options = vec![OptionSchema::long("dry-run", ValueType::Bool)];

        assert_eq!(
            validate_options(&options),
            vec![ValidationError::InvalidOptionName("dry-run".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_option_names() {
        let same_option = vec![OptionSchema::new(Some("age"), Some("age"), ValueType::Uint)];
        assert_eq!(
            validate_options(&same_option),
            vec![ValidationError::DuplicateOption("age".to_string())]
        );

        let across_options = vec![
            OptionSchema::new(Some("name"), Some("n"), ValueType::String),
            OptionSchema::short("n", ValueType::Uint),
        ];
        assert_eq!(
            validate_options(&across_options),
            vec![ValidationError::DuplicateOption("n".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_default_of_wrong_type() {
        let options = vec![OptionSchema::long("age", ValueType::Uint).with_default(23i64)];

        assert_eq!(
            validate_options(&options),
            vec![ValidationError::DefaultTypeMismatch {
                option: "age".to_string(),
                expected: ValueType::Uint,
                found: ValueType::Int,
            }]
        );
    }

    #[test]
    fn test_validate_accepts_shadowed_global_option() {
        let cli = Cli::new("prog")
            .with_option(OptionSchema::long("level", ValueType::Uint).with_default(1u64))
            .with_command(
                Command::new("run")
                    .with_option(OptionSchema::long("level", ValueType::Uint).with_default(2u64)),
            );

        assert!(validate_cli(&cli).is_empty());
    }
}
