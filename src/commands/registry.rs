//! Name-sorted table of every command.

use std::collections::BTreeMap;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::docs;
use super::types::{Command, CommandDoc};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command /{0} is registered twice")]
    Duplicate(&'static str),
}

pub struct CommandEntry {
    command: Box<dyn Command>,
    doc: CommandDoc,
}

impl CommandEntry {
    pub fn name(&self) -> &'static str {
        self.command.name()
    }

    pub fn command(&self) -> &dyn Command {
        self.command.as_ref()
    }

    pub fn doc(&self) -> &CommandDoc {
        &self.doc
    }
}

/// Built once at startup and never modified afterwards.
pub struct Registry {
    commands: BTreeMap<&'static str, CommandEntry>,
}

impl Registry {
    /// Build a registry, resolving each command's documentation.
    pub fn new(commands: Vec<Box<dyn Command>>) -> Result<Self, RegistryError> {
        let mut table = BTreeMap::new();
        for command in commands {
            let name = command.name();
            if table.contains_key(name) {
                return Err(RegistryError::Duplicate(name));
            }
            let doc = docs::lookup(name).unwrap_or_else(|| CommandDoc::placeholder(name));
            table.insert(name, CommandEntry { command, doc });
        }
        Ok(Self { commands: table })
    }

    /// Registry of all built-in commands.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(super::builtins())
    }

    /// Case-sensitive exact lookup.
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    /// Entries sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry> {
        self.commands.values()
    }

    /// Sorted names starting with `prefix`.
    pub fn names_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.commands
            .keys()
            .copied()
            .filter(move |name| name.starts_with(prefix))
    }

    /// Best fuzzy match for a mistyped command name.
    pub fn closest(&self, typed: &str) -> Option<&'static str> {
        if typed.is_empty() {
            return None;
        }
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &'static str)> = self
            .commands
            .keys()
            .filter_map(|name| matcher.fuzzy_match(name, typed).map(|score| (score, *name)))
            .collect();
        // Stable sort keeps alphabetical order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.first().map(|(_, name)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandCategory;
    use crate::session::Session;

    struct Dummy(&'static str);

    impl Command for Dummy {
        fn name(&self) -> &'static str {
            self.0
        }

        fn run(&self, _session: &mut Session, _registry: &Registry, _args: &str) {}
    }

    #[test]
    fn builtin_registry_is_sorted_and_documented() {
        let registry = Registry::builtin().unwrap();
        let names: Vec<_> = registry.iter().map(|e| e.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        for entry in registry.iter() {
            assert_eq!(entry.doc().name, entry.name());
            assert_ne!(entry.doc().summary, crate::commands::NO_DOC, "/{}", entry.name());
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = Registry::builtin().unwrap();
        assert!(registry.get("open").is_some());
        assert!(registry.get("Open").is_none());
        assert!(registry.get("ope").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = Registry::new(vec![Box::new(Dummy("a")), Box::new(Dummy("a"))]);
        assert!(matches!(result, Err(RegistryError::Duplicate("a"))));
    }

    #[test]
    fn undocumented_command_gets_placeholder() {
        let registry = Registry::new(vec![Box::new(Dummy("zzz"))]).unwrap();
        let doc = registry.get("zzz").unwrap().doc();
        assert_eq!(doc.summary, crate::commands::NO_DOC);
        assert_eq!(doc.category, CommandCategory::Other);
        assert_eq!(doc.usage(), "/zzz");
    }

    #[test]
    fn prefix_listing() {
        let registry = Registry::builtin().unwrap();
        let names: Vec<_> = registry.names_with_prefix("h").collect();
        assert_eq!(names, vec!["help", "hset", "hunset"]);
    }

    #[test]
    fn closest_name() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.closest("qit"), Some("quit"));
        assert_eq!(registry.closest("qxz"), None);
    }
}
