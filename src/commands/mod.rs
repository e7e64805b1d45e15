//! Command interpretation.
//!
//! # Architecture
//!
//! - `types`: the `Command` trait and help entry types
//! - `registry`: immutable, name-sorted table of commands
//! - `dispatch`: routing an input line to one command
//! - `suggest`: tab completion
//! - `docs`, `keys`, `render`: help text
//! - `chat`, `hub`, `settings`, `search`, `grant`, `misc`: the built-in commands

mod chat;
mod docs;
mod dispatch;
mod grant;
mod hub;
mod keys;
mod misc;
mod registry;
mod render;
mod search;
mod settings;
mod suggest;
mod types;

pub use dispatch::{COMMAND_MARKER, DEFAULT_COMMAND, ParsedLine, dispatch, parse_line};
pub use hub::autoconnect;
pub use keys::{KeySection, Shortcut};
pub use registry::{CommandEntry, Registry, RegistryError};
pub use suggest::{MAX_SUGGESTIONS, suggest};
pub use types::{Command, CommandCategory, CommandDoc, NO_DOC};

use crate::session::{HubId, Session, Tab};

fn builtins() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(chat::Say),
        Box::new(chat::Me),
        Box::new(chat::Msg),
        Box::new(hub::Open),
        Box::new(hub::Connect),
        Box::new(hub::Disconnect),
        Box::new(hub::Reconnect),
        Box::new(hub::Close),
        Box::new(hub::Kick),
        Box::new(hub::Whois),
        Box::new(hub::Password),
        Box::new(settings::Set::global()),
        Box::new(settings::Set::hub()),
        Box::new(settings::Unset::global()),
        Box::new(settings::Unset::hub()),
        Box::new(search::Search),
        Box::new(grant::Grant),
        Box::new(grant::Ungrant),
        Box::new(misc::Help),
        Box::new(misc::Clear),
        Box::new(misc::Quit),
        Box::new(misc::Version),
    ]
}

/// Hub of the current hub tab, or an error message.
fn require_hub_tab(session: &mut Session) -> Option<HubId> {
    match session.current_tab() {
        Tab::Hub(hub) => Some(*hub),
        _ => {
            session.error("This command can only be used on hub tabs.");
            None
        }
    }
}

/// Hub of the current hub or private-message tab, or an error message.
fn require_hub(session: &mut Session) -> Option<HubId> {
    let hub = session.current_hub();
    if hub.is_none() {
        session.error("This command can only be used on hub and user tabs.");
    }
    hub
}

/// Error for commands taking no arguments; true if `args` may proceed.
fn no_args(session: &mut Session, args: &str) -> bool {
    if args.is_empty() {
        return true;
    }
    session.error("This command does not accept any arguments.");
    false
}
