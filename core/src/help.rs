//! Help text rendering.
//!
//! Help is built from a chain of levels, outermost first: the application
//! root, then each command on the way to the one being described. Every level
//! contributes a segment to the usage line and a block of option lines.
//! Nothing here writes to the console.

use std::fmt::Write;

use crate::{Command, Context, OptionSchema};

/// One level of a command path: its name and declared options.
#[derive(Debug, Clone, Copy)]
pub struct HelpLevel<'a> {
    pub command: &'a str,
    pub options: &'a [OptionSchema],
}

/// Renders the usage line for a command path.
///
/// # Examples
///
/// ```
/// use argtree_core::help::{HelpLevel, usage_line};
/// use argtree_core::{OptionSchema, ValueType};
///
/// let global = vec![OptionSchema::long("verbose", ValueType::Bool).with_default(false)];
/// let levels = [
///     HelpLevel { command: "prog", options: &global },
///     HelpLevel { command: "greet", options: &[] },
/// ];
/// assert_eq!(usage_line(&levels), "Usage: prog [prog_options] greet [arguments]");
/// ```
pub fn usage_line(levels: &[HelpLevel<'_>]) -> String {
    let mut line = String::from("Usage:");
    for level in levels {
        line.push(' ');
        line.push_str(level.command);
        if !level.options.is_empty() {
            let _ = write!(line, " [{}_options]", level.command);
        }
    }
    line.push_str(" [arguments]");
    line
}

/// Renders one option: its spellings, placeholder, usage and default.
///
/// # Examples
///
/// ```
/// use argtree_core::help::option_line;
/// use argtree_core::{OptionSchema, ValueType};
///
/// let opt = OptionSchema::new(Some("name"), Some("n"), ValueType::String)
///     .with_placeholder("NAME")
///     .with_usage("Who to greet")
///     .with_default("world");
/// assert_eq!(option_line(&opt), "-n, --name <NAME>\tWho to greet (default: world)");
///
/// let count = OptionSchema::short("c", ValueType::Uint);
/// assert_eq!(option_line(&count), "-c\t(required)");
/// ```
pub fn option_line(option: &OptionSchema) -> String {
    let spellings: Vec<String> = option
        .short
        .iter()
        .map(|s| format!("-{s}"))
        .chain(option.long.iter().map(|l| format!("--{l}")))
        .collect();

    let mut line = spellings.join(", ");
    if let Some(placeholder) = &option.placeholder {
        let _ = write!(line, " <{placeholder}>");
    }
    line.push('\t');
    line.push_str(&option.usage);

    let note = match &option.default {
        Some(default) => format!("(default: {default})"),
        None => "(required)".to_string(),
    };
    if !option.usage.is_empty() {
        line.push(' ');
    }
    line.push_str(&note);
    line
}

/// Renders a `"<command> options:"` block per level that declares options.
pub fn options_section(levels: &[HelpLevel<'_>]) -> String {
    let mut out = String::new();
    for level in levels.iter().filter(|l| !l.options.is_empty()) {
        let _ = writeln!(out, "{} options:", level.command);
        for option in level.options {
            let _ = writeln!(out, "  {}", option_line(option));
        }
    }
    out
}

/// Lists commands with their usage descriptions.
pub fn commands_section(commands: &[Command]) -> String {
    let mut out = String::from("Commands:\n");
    for command in commands {
        let _ = writeln!(out, "  {}\t{}", command.name, command.usage);
    }
    out
}

/// Renders usage and options for a path of levels, plus the commands
/// available beneath the last level.
pub fn render_levels(levels: &[HelpLevel<'_>], commands: &[Command]) -> String {
    let mut out = usage_line(levels);
    out.push('\n');
    let options = options_section(levels);
    if !options.is_empty() {
        out.push('\n');
        out.push_str(&options);
    }
    if !commands.is_empty() {
        out.push('\n');
        out.push_str(&commands_section(commands));
    }
    out
}

/// Renders help for a bound context by walking its parent chain.
pub fn render(ctx: &Context<'_>) -> String {
    let mut levels: Vec<HelpLevel<'_>> = ctx
        .ancestors()
        .map(|c| HelpLevel {
            command: c.command(),
            options: c.schema(),
        })
        .collect();
    levels.reverse();
    render_levels(&levels, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RawOptions, ValueType};

    #[test]
    fn test_option_line_long_only_with_usage() {
        let opt = OptionSchema::long("shout", ValueType::Bool)
            .with_default(false)
            .with_usage("Print in upper case");

        assert_eq!(option_line(&opt), "--shout\tPrint in upper case (default: false)");
    }

    #[test]
    fn test_options_section_skips_empty_levels() {
        let global = vec![
            OptionSchema::new(Some("verbose"), Some("v"), ValueType::Bool).with_default(false),
        ];
        let levels = [
            HelpLevel {
                command: "prog",
                options: &global,
            },
            HelpLevel {
                command: "greet",
                options: &[],
            },
        ];

        assert_eq!(
            options_section(&levels),
            "prog options:\n  -v, --verbose\t(default: false)\n"
        );
    }

    #[test]
    fn test_render_walks_parent_chain() {
        let global = vec![OptionSchema::long("verbose", ValueType::Bool).with_default(false)];
        let local = vec![OptionSchema::long("name", ValueType::String).with_default("world")];
        let root = Context::bind("prog", vec![], &RawOptions::new(), &global, None).unwrap();
        let greet =
            Context::bind("greet", vec![], &RawOptions::new(), &local, Some(&root)).unwrap();

        let help = render(&greet);
        assert!(
            help.starts_with("Usage: prog [prog_options] greet [greet_options] [arguments]\n")
        );
        let prog_at = help.find("prog options:").unwrap();
        let greet_at = help.find("greet options:").unwrap();
        assert!(prog_at < greet_at);
    }

    #[test]
    fn test_commands_section() {
        let commands = vec![
            Command::new("greet").with_usage("Say hello"),
            Command::new("echo").with_usage("Print arguments"),
        ];

        assert_eq!(
            commands_section(&commands),
            "Commands:\n  greet\tSay hello\n  echo\tPrint arguments\n"
        );
    }
}
