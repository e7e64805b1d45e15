//! Routing of input lines to commands.

use super::registry::Registry;
use crate::session::Session;

pub const COMMAND_MARKER: char = '/';

/// Command receiving lines that do not start with the marker.
pub const DEFAULT_COMMAND: &str = "say";

/// An input line split into command name and argument string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub name: &'a str,
    pub args: &'a str,
}

/// Split a line; `None` for a blank line.
///
/// Arguments are trimmed for every command except the default one, which
/// receives them untouched.
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let Some(rest) = trimmed.strip_prefix(COMMAND_MARKER) else {
        return Some(ParsedLine {
            name: DEFAULT_COMMAND,
            args: line,
        });
    };
    let (name, args) = rest.split_once(' ').unwrap_or((rest, ""));
    let args = if name == DEFAULT_COMMAND { args } else { args.trim() };
    Some(ParsedLine { name, args })
}

/// Run the command a line names, or report that it does not exist.
pub fn dispatch(registry: &Registry, session: &mut Session, line: &str) {
    let Some(parsed) = parse_line(line) else {
        return;
    };
    match registry.get(parsed.name) {
        Some(entry) => {
            tracing::debug!(command = parsed.name, "dispatching");
            entry.command().run(session, registry, parsed.args);
        }
        None => {
            let mut message = format!("Unknown command '/{}'.", parsed.name);
            if let Some(close) = registry.closest(parsed.name) {
                message.push_str(&format!(" Did you mean /{close}?"));
            }
            session.error(message);
        }
    }
}
