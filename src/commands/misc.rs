//! Help, version, clearing the screen and quitting.

use super::keys::KeySection;
use super::registry::Registry;
use super::render;
use super::types::Command;
use super::{COMMAND_MARKER, no_args};
use crate::session::Session;
use crate::vars::{DEFS, VarScope};

pub struct Help;

impl Help {
    fn keys(session: &mut Session, section: &str) {
        if section.is_empty() {
            session.info(render::key_help(None).join("\n"));
            return;
        }
        match KeySection::parse(section) {
            Some(section) => session.info(render::key_help(Some(section)).join("\n")),
            None => session.error(format!("Unknown key section '{section}'.")),
        }
    }

    fn setting(session: &mut Session, name: &str) {
        if name.is_empty() {
            session.error("No setting given. See /help help for more information.");
            return;
        }
        match session.vars.lookup(name) {
            Ok(def) => session.info(render::variable_help(def).join("\n")),
            Err(e) => session.error(e.to_string()),
        }
    }
}

impl Command for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn run(&self, session: &mut Session, registry: &Registry, args: &str) {
        if args.is_empty() {
            session.info(render::command_list(registry).join("\n"));
            return;
        }
        let (topic, rest) = args.split_once(' ').unwrap_or((args, ""));
        let rest = rest.trim();
        match topic {
            "keys" => Self::keys(session, rest),
            "set" | "hset" if !rest.is_empty() => Self::setting(session, rest),
            _ => {
                let name = topic.strip_prefix(COMMAND_MARKER).unwrap_or(topic);
                match registry.get(name) {
                    Some(entry) => session.info(render::command_help(entry.doc()).join("\n")),
                    None => session.error(format!("No help for unknown command '/{name}'.")),
                }
            }
        }
    }

    fn suggest(&self, _session: &Session, registry: &Registry, args: &str) -> Vec<String> {
        match args.split_once(' ') {
            None => {
                let mut topics: Vec<&str> = registry.names_with_prefix(args).collect();
                if "keys".starts_with(args) {
                    topics.push("keys");
                    topics.sort_unstable();
                }
                topics.into_iter().map(str::to_string).collect()
            }
            Some(("keys", fragment)) => KeySection::all()
                .into_iter()
                .map(|s| s.name())
                .filter(|name| name.starts_with(fragment))
                .map(|name| format!("keys {name}"))
                .collect(),
            Some((topic @ ("set" | "hset"), fragment)) => {
                let scope = if topic == "set" { VarScope::Global } else { VarScope::Hub };
                DEFS.iter()
                    .filter(|d| !d.hidden && d.name.starts_with(fragment))
                    .filter(|d| d.scope == scope || d.scope == VarScope::Both)
                    .map(|d| format!("{topic} {}", d.name))
                    .collect()
            }
            Some(_) => Vec::new(),
        }
    }
}

pub struct Clear;

impl Command for Clear {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        if no_args(session, args) {
            session.request_clear();
        }
    }
}

pub struct Quit;

impl Command for Quit {
    fn name(&self) -> &'static str {
        "quit"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        if no_args(session, args) {
            session.request_quit();
        }
    }
}

pub struct Version;

impl Command for Version {
    fn name(&self) -> &'static str {
        "version"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        if no_args(session, args) {
            session.info(format!("dcline {}", env!("CARGO_PKG_VERSION")));
        }
    }
}
