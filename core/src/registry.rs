//! The set of commands a program accepts.

use crate::Command;

/// Top-level commands, owned and looked up by name.
///
/// # Examples
///
/// ```
/// use argtree_core::{Command, CommandRegistry};
///
/// let registry = CommandRegistry::new()
///     .with_command(Command::new("greet"))
///     .with_command(Command::new("remote").with_subcommand(Command::new("add")));
///
/// let positionals: Vec<String> = ["remote", "add", "origin"].map(String::from).to_vec();
/// let (path, rest) = registry.resolve(&positionals).unwrap();
/// assert_eq!(path.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["remote", "add"]);
/// assert_eq!(rest, ["origin"]);
///
/// assert!(registry.resolve(&["pull".to_string()]).is_none());
/// ```
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.register(command);
        self
    }

    pub fn register(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolves the command named by the first positional, descending into
    /// subcommands for as long as the following positionals name one.
    ///
    /// Returns the resolved path (outermost first) and the positionals left
    /// over for the leaf, or `None` if the first positional is missing or
    /// unknown.
    pub fn resolve<'r, 'p>(
        &'r self,
        positionals: &'p [String],
    ) -> Option<(Vec<&'r Command>, &'p [String])> {
        let (first, mut rest) = positionals.split_first()?;
        let mut current = self.get(first)?;
        let mut path = vec![current];

        while let Some((next, tail)) = rest.split_first() {
            let Some(sub) = current.find_subcommand(next) else {
                break;
            };
            current = sub;
            path.push(sub);
            rest = tail;
        }

        Some((path, rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn registry() -> CommandRegistry {
        CommandRegistry::new()
            .with_command(Command::new("greet"))
            .with_command(
                Command::new("remote")
                    .with_subcommand(Command::new("add"))
                    .with_subcommand(Command::new("remove")),
            )
    }

    #[test]
    fn test_resolve_flat_command() {
        let registry = registry();
        let positionals = args(&["greet", "remote", "add"]);

        let (path, rest) = registry.resolve(&positionals).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].name, "greet");
        assert_eq!(rest, ["remote", "add"]);
    }

    #[test]
    fn test_resolve_stops_at_unknown_subcommand() {
        let registry = registry();
        let positionals = args(&["remote", "rename", "add"]);

        let (path, rest) = registry.resolve(&positionals).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(rest, ["rename", "add"]);
    }

    #[test]
    fn test_resolve_unknown_or_empty() {
        let registry = registry();

        assert!(registry.resolve(&args(&["pull"])).is_none());
        assert!(registry.resolve(&[]).is_none());
    }
}
