//! Command system types.

use super::registry::Registry;
use crate::session::Session;

/// Summary shown for commands without a documentation entry.
pub const NO_DOC: &str = "No documentation available.";

/// Category for grouping commands in help display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCategory {
    Chat,
    Hubs,
    Settings,
    Transfers,
    Other,
}

impl CommandCategory {
    /// Display name for help headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Chat => "CHAT",
            Self::Hubs => "HUBS",
            Self::Settings => "SETTINGS",
            Self::Transfers => "SEARCH & TRANSFERS",
            Self::Other => "OTHER",
        }
    }

    /// Order for help display (lower = first).
    pub fn order(&self) -> u8 {
        match self {
            Self::Chat => 0,
            Self::Hubs => 1,
            Self::Settings => 2,
            Self::Transfers => 3,
            Self::Other => 4,
        }
    }
}

/// Help entry of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDoc {
    pub name: &'static str,
    /// Argument syntax, e.g. `[<key> [<value>]]`.
    pub args: &'static str,
    pub summary: &'static str,
    pub description: Option<&'static str>,
    pub category: CommandCategory,
}

impl CommandDoc {
    /// Entry for a command nobody documented.
    pub fn placeholder(name: &'static str) -> Self {
        Self {
            name,
            args: "",
            summary: NO_DOC,
            description: None,
            category: CommandCategory::Other,
        }
    }

    /// `/name args`
    pub fn usage(&self) -> String {
        if self.args.is_empty() {
            format!("/{}", self.name)
        } else {
            format!("/{} {}", self.name, self.args)
        }
    }
}

/// A command typed as `/<name> <arguments>`.
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run with the argument string. Outcomes, including failures, are
    /// reported through the session's message log.
    fn run(&self, session: &mut Session, registry: &Registry, args: &str);

    /// Completions for a partially typed argument string. Each candidate
    /// replaces the whole argument string. Must not block or mutate.
    fn suggest(&self, _session: &Session, _registry: &Registry, _args: &str) -> Vec<String> {
        Vec::new()
    }
}
