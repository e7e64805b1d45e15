//! Slot grant commands.

use super::registry::Registry;
use super::require_hub;
use super::types::Command;
use crate::session::Session;

pub struct Grant;

impl Command for Grant {
    fn name(&self) -> &'static str {
        "grant"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        if args.is_empty() {
            if session.grants.is_empty() {
                session.info("No slots granted.");
                return;
            }
            let lines: Vec<String> = session
                .grants
                .iter()
                .map(|g| format!("{} {} on #{}", g.hex_id(), g.name, session.hub_name(g.hub)))
                .collect();
            session.info(lines.join("\n"));
            return;
        }

        let Some(hub) = require_hub(session) else {
            return;
        };
        let Some(user) = session.find_user(hub, args) else {
            session.error(format!("No user named '{args}' on this hub."));
            return;
        };
        if session.grants.grant(hub, user.uid, &user.name) {
            session.info(format!("Slot granted to {}.", user.name));
        } else {
            session.info(format!("{} already has a granted slot.", user.name));
        }
    }

    fn suggest(&self, session: &Session, _registry: &Registry, args: &str) -> Vec<String> {
        super::suggest::suggest_nick(session, args, false)
    }
}

pub struct Ungrant;

impl Command for Ungrant {
    fn name(&self) -> &'static str {
        "ungrant"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        if args.is_empty() {
            session.error("No user specified. See /help ungrant for more information.");
            return;
        }
        match session.grants.revoke(args) {
            Ok(grant) => session.info(format!("Slot revoked from {}.", grant.name)),
            Err(e) => session.error(e.to_string()),
        }
    }

    fn suggest(&self, session: &Session, _registry: &Registry, args: &str) -> Vec<String> {
        session.grants.names(args)
    }
}
