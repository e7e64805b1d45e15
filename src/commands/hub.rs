//! Hub tab and connection commands.

use std::sync::LazyLock;

use regex::Regex;

use super::registry::Registry;
use super::suggest::suggest_nick;
use super::types::Command;
use super::{no_args, require_hub, require_hub_tab};
use crate::address::{HubAddress, store_address, stored_address};
use crate::net::LinkState;
use crate::session::{HubId, Session, Tab};
use crate::units::format_size;
use crate::vars::Scope;

static HUB_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]{1,25}$").expect("hub name regex is valid"));

fn start_connect(session: &mut Session, hub: HubId, addr: &HubAddress) {
    session.info(format!("Connecting to {}...", addr.canonical()));
    tracing::info!(hub, address = %addr.canonical(), "connecting");
    session.link.connect(hub, addr);
}

fn disconnect(session: &mut Session, hub: HubId) {
    tracing::info!(hub, "disconnecting");
    session.link.disconnect(hub);
}

/// Hub id bound to `name`, allocating one for a new name.
fn hub_for_name(session: &mut Session, name: &str) -> Option<HubId> {
    if let Some(hub) = session.vars.find_hub(name) {
        return Some(hub);
    }
    let hub = session.vars.unused_hub_id()?;
    session.vars.set_raw(hub, "hubname", name);
    tracing::debug!(hub, name, "new hub");
    Some(hub)
}

/// Open and connect every stored hub with `autoconnect` enabled.
///
/// Tabs are opened in the background; the main tab keeps focus.
pub fn autoconnect(session: &mut Session) {
    for hub in session.vars.hub_ids() {
        if !session.vars.flag(Scope::Hub(hub), "autoconnect") {
            continue;
        }
        let Some(addr) = stored_address(&session.vars, hub) else {
            tracing::warn!(hub, "autoconnect enabled but no address stored");
            continue;
        };
        session.open_tab(Tab::Hub(hub));
        start_connect(session, hub, &addr);
    }
}

pub struct Open;

impl Command for Open {
    fn name(&self) -> &'static str {
        "open"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        let mut words = args.split_whitespace().peekable();
        let no_connect = words.next_if_eq(&"-n").is_some();
        let Some(name) = words.next() else {
            session.error("No hub name given. See /help open for more information.");
            return;
        };
        let addr = words.next();
        if words.next().is_some() {
            session.error("Too many arguments.");
            return;
        }
        if !HUB_NAME_RE.is_match(name) {
            session.error(
                "Invalid hub name, only letters, digits and _.- are allowed, up to 25 characters.",
            );
            return;
        }
        let addr = match addr.map(HubAddress::parse).transpose() {
            Ok(addr) => addr,
            Err(e) => {
                session.error(e.to_string());
                return;
            }
        };

        let Some(hub) = hub_for_name(session, name) else {
            session.error("No free hub id left.");
            return;
        };
        session.focus(Tab::Hub(hub));
        if let Some(addr) = &addr {
            store_address(&mut session.vars, hub, addr);
        }
        if no_connect {
            return;
        }

        if session.state(hub) != LinkState::Idle {
            if addr.is_some() {
                session.info("Already connected, use /reconnect to connect to the new address.");
            }
            return;
        }
        match stored_address(&session.vars, hub) {
            Some(addr) => start_connect(session, hub, &addr),
            None => session.info("No hub address configured. Use '/connect <address>' to do so."),
        }
    }

    fn suggest(&self, session: &Session, _registry: &Registry, args: &str) -> Vec<String> {
        let (head, fragment) = match args.strip_prefix("-n ") {
            Some(rest) => ("-n ", rest),
            None => ("", args),
        };
        if fragment.contains(' ') {
            return Vec::new();
        }
        let mut names: Vec<String> = session
            .vars
            .hub_ids()
            .into_iter()
            .filter_map(|hub| session.vars.get_raw(hub, "hubname"))
            .filter(|name| name.starts_with(fragment))
            .collect();
        names.sort();
        names.into_iter().map(|name| format!("{head}{name}")).collect()
    }
}

pub struct Connect;

impl Command for Connect {
    fn name(&self) -> &'static str {
        "connect"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        let Some(hub) = require_hub_tab(session) else {
            return;
        };
        if session.state(hub) != LinkState::Idle {
            session.error("Already connected (or connecting). You may want to /disconnect first.");
            return;
        }
        if !args.is_empty() {
            match HubAddress::parse(args) {
                Ok(addr) => store_address(&mut session.vars, hub, &addr),
                Err(e) => {
                    session.error(e.to_string());
                    return;
                }
            }
        }
        match stored_address(&session.vars, hub) {
            Some(addr) => start_connect(session, hub, &addr),
            None => session.error("No hub address configured. Use '/connect <address>' to do so."),
        }
    }
}

pub struct Disconnect;

impl Command for Disconnect {
    fn name(&self) -> &'static str {
        "disconnect"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        if !no_args(session, args) {
            return;
        }
        match session.current_tab().clone() {
            Tab::Main => {
                let active: Vec<HubId> = session
                    .open_hubs()
                    .into_iter()
                    .filter(|&hub| session.state(hub) != LinkState::Idle)
                    .collect();
                if active.is_empty() {
                    session.error("Not connected to any hub.");
                    return;
                }
                for &hub in &active {
                    disconnect(session, hub);
                }
                session.info(format!("Disconnected from {} hub(s).", active.len()));
            }
            Tab::Hub(hub) => {
                if session.state(hub) == LinkState::Idle {
                    session.error("Not connected.");
                    return;
                }
                disconnect(session, hub);
                session.info("Disconnected.");
            }
            Tab::Private { .. } => {
                session.error("This command can only be used on the main tab or hub tabs.")
            }
        }
    }
}

pub struct Reconnect;

impl Reconnect {
    fn reconnect(session: &mut Session, hub: HubId) -> bool {
        let Some(addr) = stored_address(&session.vars, hub) else {
            return false;
        };
        if session.state(hub) != LinkState::Idle {
            disconnect(session, hub);
        }
        start_connect(session, hub, &addr);
        true
    }
}

impl Command for Reconnect {
    fn name(&self) -> &'static str {
        "reconnect"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        if !no_args(session, args) {
            return;
        }
        match session.current_tab().clone() {
            Tab::Main => {
                let mut count = 0;
                for hub in session.open_hubs() {
                    if Self::reconnect(session, hub) {
                        count += 1;
                    }
                }
                if count == 0 {
                    session.error("No open hubs with a known address.");
                }
            }
            Tab::Hub(hub) => {
                if !Self::reconnect(session, hub) {
                    session.error("No hub address configured. Use '/connect <address>' to do so.");
                }
            }
            Tab::Private { .. } => {
                session.error("This command can only be used on the main tab or hub tabs.")
            }
        }
    }
}

pub struct Close;

impl Command for Close {
    fn name(&self) -> &'static str {
        "close"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        if !no_args(session, args) {
            return;
        }
        if let Tab::Hub(hub) = *session.current_tab()
            && session.state(hub) != LinkState::Idle
        {
            disconnect(session, hub);
        }
        if session.close_current().is_none() {
            session.error("Main tab cannot be closed.");
        }
    }
}

pub struct Kick;

impl Command for Kick {
    fn name(&self) -> &'static str {
        "kick"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        let Some(hub) = require_hub_tab(session) else {
            return;
        };
        if !session.is_connected(hub) {
            session.error("Not connected.");
            return;
        }
        if args.is_empty() {
            session.error("No user specified.");
            return;
        }
        let Some(user) = session.find_user(hub, args) else {
            session.error(format!("No user named '{args}' on this hub."));
            return;
        };
        session.link.kick(hub, user.uid);
        session.info(format!("Kick request for {} sent.", user.name));
    }

    fn suggest(&self, session: &Session, _registry: &Registry, args: &str) -> Vec<String> {
        suggest_nick(session, args, false)
    }
}

pub struct Whois;

impl Command for Whois {
    fn name(&self) -> &'static str {
        "whois"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        let Some(hub) = require_hub(session) else {
            return;
        };
        let nick = if !args.is_empty() {
            args.to_string()
        } else if let Tab::Private { nick, .. } = session.current_tab() {
            nick.clone()
        } else {
            session.error("No user specified.");
            return;
        };
        let Some(user) = session.find_user(hub, &nick) else {
            session.error(format!("No user named '{nick}' on this hub."));
            return;
        };

        let mut lines = vec![
            format!("User:        {}", user.name),
            format!("Id:          {:016x}", user.uid),
            format!("Share:       {}", format_size(user.share_size)),
        ];
        if let Some(description) = &user.description {
            lines.push(format!("Description: {description}"));
        }
        if user.is_op {
            lines.push("Operator:    yes".to_string());
        }
        session.info(lines.join("\n"));
    }

    fn suggest(&self, session: &Session, _registry: &Registry, args: &str) -> Vec<String> {
        suggest_nick(session, args, false)
    }
}

pub struct Password;

impl Command for Password {
    fn name(&self) -> &'static str {
        "password"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        let Some(hub) = require_hub_tab(session) else {
            return;
        };
        if args.is_empty() {
            session.error("No password given.");
            return;
        }
        if session.state(hub) == LinkState::Idle {
            session.error("Not connected.");
            return;
        }
        session.link.password(hub, args);
        session.info("Password sent.");
    }
}
