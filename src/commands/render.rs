//! Help text rendering.

use std::collections::HashMap;

use super::keys::KeySection;
use super::registry::{CommandEntry, Registry};
use super::types::{CommandCategory, CommandDoc};
use crate::vars::VarDef;

/// Every command, grouped by category.
pub fn command_list(registry: &Registry) -> Vec<String> {
    let mut by_category: HashMap<CommandCategory, Vec<&CommandEntry>> = HashMap::new();
    for entry in registry.iter() {
        by_category.entry(entry.doc().category).or_default().push(entry);
    }

    let mut categories: Vec<_> = by_category.keys().copied().collect();
    categories.sort_by_key(|c| c.order());

    let mut lines = vec!["Available commands:".to_string()];
    for category in categories {
        if let Some(entries) = by_category.get(&category) {
            lines.push(String::new());
            lines.push(format!("  {}", category.display_name()));
            for entry in entries {
                lines.push(format!("    /{:12} {}", entry.name(), entry.doc().summary));
            }
        }
    }
    lines.push(String::new());
    lines.push("Type /help <command> for more information about a command.".to_string());
    lines
}

pub fn command_help(doc: &CommandDoc) -> Vec<String> {
    let mut lines = vec![format!("Usage: {}", doc.usage()), format!("  {}", doc.summary)];
    if let Some(description) = doc.description {
        lines.push(String::new());
        lines.extend(description.lines().map(|l| format!("  {l}")));
    }
    lines
}

pub fn variable_help(def: &VarDef) -> Vec<String> {
    let mut lines = vec![format!(
        "Setting: {} {} ({})",
        def.name,
        def.kind.label(),
        def.scope.label()
    )];
    if let Some(default) = def.default {
        lines.push(format!("  Default: {default}"));
    }
    lines.push(String::new());
    lines.push(format!("  {}", def.doc));
    lines
}

/// Section list when no section is named, otherwise that section's bindings.
pub fn key_help(section: Option<KeySection>) -> Vec<String> {
    let Some(section) = section else {
        let mut lines = vec!["Key binding sections:".to_string()];
        for section in KeySection::all() {
            lines.push(format!("  {:12} {}", section.name(), section.title()));
        }
        lines.push(String::new());
        lines.push("Type /help keys <section> to list the bindings.".to_string());
        return lines;
    };

    let mut lines = vec![format!("{}:", section.title())];
    for shortcut in section.shortcuts() {
        lines.push(format!("  {:16} {}", shortcut.key_display(), shortcut.description()));
    }
    lines
}
