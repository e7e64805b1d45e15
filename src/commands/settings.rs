//! Commands reading and writing variables.
//!
//! `/set` and `/unset` act on the global tier, `/hset` and `/hunset` on the
//! hub of the current tab.

use super::registry::Registry;
use super::types::Command;
use crate::session::Session;
use crate::vars::{Origin, Resolved, Scope, VarDef};

fn is_pattern(key: &str) -> bool {
    key.contains(['*', '?', '['])
}

/// Scope a command acts on. Hub commands need a hub on the current tab.
fn target_scope(session: &Session, hub: bool) -> Option<Scope> {
    match session.scope() {
        Scope::Global if hub => None,
        _ if !hub => Some(Scope::Global),
        scope => Some(scope),
    }
}

fn require_scope(session: &mut Session, hub: bool) -> Option<Scope> {
    let scope = target_scope(session, hub);
    if scope.is_none() {
        session.error("This command can only be used on hub and user tabs.");
    }
    scope
}

fn format_setting(def: &VarDef, value: &Resolved, scope: Scope) -> String {
    let origin = match (value.origin(), scope) {
        (Some(origin @ Origin::Global), Scope::Hub(_)) | (Some(origin @ Origin::Default), _) => {
            format!(" ({origin})")
        }
        _ => String::new(),
    };
    format!("{:<20} {value}{origin}", def.name)
}

pub struct Set {
    hub: bool,
}

impl Set {
    pub fn global() -> Self {
        Self { hub: false }
    }

    pub fn hub() -> Self {
        Self { hub: true }
    }

    fn show(&self, session: &mut Session, scope: Scope, key: &str) {
        let pattern = (!key.is_empty()).then_some(key);
        let listing = session.vars.list(scope, pattern);
        if !listing.is_empty() {
            let lines: Vec<String> = listing
                .iter()
                .map(|(def, value)| format_setting(def, value, scope))
                .collect();
            session.info(lines.join("\n"));
            return;
        }

        // Nothing listed: explain why, naming the other command when the
        // key belongs to the other tier.
        if is_pattern(key) {
            if session.vars.matches_elsewhere(scope, key) {
                let other = if self.hub { "/set" } else { "/hset" };
                session.error(format!("No matching settings at this tier, try {other}."));
            } else {
                session.error(format!("No settings matching '{key}'."));
            }
            return;
        }
        match session.vars.resolve(scope, key) {
            Ok(value) => session.info(format!("{key} {value}")),
            Err(e) => session.error(e.to_string()),
        }
    }
}

impl Command for Set {
    fn name(&self) -> &'static str {
        if self.hub { "hset" } else { "set" }
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        let Some(scope) = require_scope(session, self.hub) else {
            return;
        };
        let (key, value) = match args.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim()),
            None => (args, ""),
        };
        if value.is_empty() {
            self.show(session, scope, key);
            return;
        }
        match session.vars.assign(scope, key, value) {
            Ok(resolved) => session.info(format!("{key} set to {resolved}.")),
            Err(e) => session.error(e.to_string()),
        }
    }

    fn suggest(&self, session: &Session, _registry: &Registry, args: &str) -> Vec<String> {
        let Some(scope) = target_scope(session, self.hub) else {
            return Vec::new();
        };
        match args.split_once(' ') {
            None => session
                .vars
                .names(scope, args)
                .into_iter()
                .map(str::to_string)
                .collect(),
            Some((key, fragment)) => session
                .vars
                .suggest_value(scope, key, fragment)
                .into_iter()
                .map(|value| format!("{key} {value}"))
                .collect(),
        }
    }
}

pub struct Unset {
    hub: bool,
}

impl Unset {
    pub fn global() -> Self {
        Self { hub: false }
    }

    pub fn hub() -> Self {
        Self { hub: true }
    }
}

impl Command for Unset {
    fn name(&self) -> &'static str {
        if self.hub { "hunset" } else { "unset" }
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        let Some(scope) = require_scope(session, self.hub) else {
            return;
        };
        if args.is_empty() {
            session.error(format!("No setting given. See /help {} for more information.", self.name()));
            return;
        }
        match session.vars.clear(scope, args) {
            Ok(Resolved::Unset) => session.info(format!("{args} reset, now not set.")),
            Ok(resolved) => session.info(format!("{args} reset to {resolved}.")),
            Err(e) => session.error(e.to_string()),
        }
    }

    fn suggest(&self, session: &Session, _registry: &Registry, args: &str) -> Vec<String> {
        let Some(scope) = target_scope(session, self.hub) else {
            return Vec::new();
        };
        if args.contains(' ') {
            return Vec::new();
        }
        session
            .vars
            .names(scope, args)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
