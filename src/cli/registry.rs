use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub description: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        usage: &'static str,
        description: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases,
            usage,
            description,
            handler,
        }
    }
}

/// Lookup table mapping command names and aliases to their handlers while
/// preserving registration order for help output.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let index = self.entries.len();
        self.lookup.insert(entry.name, index);
        for alias in entry.aliases {
            self.lookup.insert(alias, index);
        }
        self.entries.push(entry);
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.lookup.get(name).map(|index| &self.entries[*index])
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// Entries in registration order (primary names only).
    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Every accepted spelling, aliases included.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.lookup.keys().copied()
    }

    /// Primary names for shell completion.
    pub fn primary_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }
}
