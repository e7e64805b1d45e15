//! Chat commands.

use super::registry::Registry;
use super::suggest::suggest_nick;
use super::types::Command;
use super::require_hub;
use crate::session::{Session, Tab};

/// Send to the hub or private chat of the current tab.
fn send(session: &mut Session, message: &str, me: bool) {
    if message.trim().is_empty() {
        session.error("Message empty.");
        return;
    }
    match session.current_tab().clone() {
        Tab::Main => session.error("This command can only be used on hub and user tabs."),
        Tab::Hub(hub) => {
            if !session.is_connected(hub) {
                session.error("Not connected.");
                return;
            }
            session.link.say(hub, message, me);
        }
        Tab::Private { hub, uid, nick } => {
            if !session.is_connected(hub) {
                session.error("Not connected.");
                return;
            }
            if !session.link.users(hub).iter().any(|u| u.uid == uid) {
                session.error(format!("{nick} is not online."));
                return;
            }
            session.link.private_message(hub, uid, message, me);
        }
    }
}

pub struct Say;

impl Command for Say {
    fn name(&self) -> &'static str {
        "say"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        send(session, args, false);
    }

    fn suggest(&self, session: &Session, _registry: &Registry, args: &str) -> Vec<String> {
        suggest_nick(session, args, true)
    }
}

pub struct Me;

impl Command for Me {
    fn name(&self) -> &'static str {
        "me"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        send(session, args, true);
    }

    fn suggest(&self, session: &Session, _registry: &Registry, args: &str) -> Vec<String> {
        suggest_nick(session, args, false)
    }
}

pub struct Msg;

impl Command for Msg {
    fn name(&self) -> &'static str {
        "msg"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        let Some(hub) = require_hub(session) else {
            return;
        };
        let (nick, message) = args.split_once(' ').unwrap_or((args, ""));
        if nick.is_empty() {
            session.error("No user specified. See /help msg for more information.");
            return;
        }
        let Some(user) = session.find_user(hub, nick) else {
            session.error(format!("No user named '{nick}' on this hub."));
            return;
        };

        session.focus(Tab::Private {
            hub,
            uid: user.uid,
            nick: user.name,
        });
        if !message.trim().is_empty() {
            send(session, message, false);
        }
    }

    fn suggest(&self, session: &Session, _registry: &Registry, args: &str) -> Vec<String> {
        if args.contains(' ') {
            return Vec::new();
        }
        suggest_nick(session, args, false)
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{Registry, dispatch};
    use crate::session::Tab;
    use crate::test_helpers::{LinkCall, connected_hub, test_session, user};

    #[test]
    fn chat_requires_a_hub() {
        let registry = Registry::builtin().unwrap();
        let (mut session, hubs) = test_session();
        dispatch(&registry, &mut session, "hello");
        assert_eq!(
            session.log.last().unwrap().text,
            "This command can only be used on hub and user tabs."
        );
        assert!(hubs.lock().calls.is_empty());
    }

    #[test]
    fn chat_requires_a_connection() {
        let registry = Registry::builtin().unwrap();
        let (mut session, hubs) = test_session();
        let hub = connected_hub(&mut session, &hubs, "home");
        hubs.lock().disconnect_all();
        dispatch(&registry, &mut session, "hello");
        assert_eq!(session.log.last().unwrap().text, "Not connected.");
        assert!(hubs.lock().said(hub).is_empty());
    }

    #[test]
    fn me_sends_an_action() {
        let registry = Registry::builtin().unwrap();
        let (mut session, hubs) = test_session();
        let hub = connected_hub(&mut session, &hubs, "home");
        dispatch(&registry, &mut session, "/me waves");
        dispatch(&registry, &mut session, "/me   ");
        assert_eq!(hubs.lock().said(hub), vec![("waves".to_string(), true)]);
        assert_eq!(session.log.last().unwrap().text, "Message empty.");
    }

    #[test]
    fn msg_opens_private_tab_and_sends() {
        let registry = Registry::builtin().unwrap();
        let (mut session, hubs) = test_session();
        let hub = connected_hub(&mut session, &hubs, "home");
        hubs.lock().users.insert(hub, vec![user(5, "alice")]);

        dispatch(&registry, &mut session, "/msg alice hi  there");
        assert_eq!(
            session.current_tab(),
            &Tab::Private {
                hub,
                uid: 5,
                nick: "alice".into()
            }
        );
        assert_eq!(
            hubs.lock().calls,
            vec![LinkCall::Private(hub, 5, "hi  there".into(), false)]
        );

        // Plain lines on the private tab go to the same user.
        dispatch(&registry, &mut session, "again");
        assert_eq!(
            hubs.lock().calls.last(),
            Some(&LinkCall::Private(hub, 5, "again".into(), false))
        );
    }

    #[test]
    fn msg_unknown_user() {
        let registry = Registry::builtin().unwrap();
        let (mut session, hubs) = test_session();
        connected_hub(&mut session, &hubs, "home");
        dispatch(&registry, &mut session, "/msg nobody hi");
        assert_eq!(session.log.last().unwrap().text, "No user named 'nobody' on this hub.");
        dispatch(&registry, &mut session, "/msg");
        assert!(session.log.last().unwrap().text.starts_with("No user specified."));
    }

    #[test]
    fn private_chat_with_offline_user() {
        let registry = Registry::builtin().unwrap();
        let (mut session, hubs) = test_session();
        let hub = connected_hub(&mut session, &hubs, "home");
        hubs.lock().users.insert(hub, vec![user(5, "alice")]);
        dispatch(&registry, &mut session, "/msg alice");
        hubs.lock().users.clear();

        dispatch(&registry, &mut session, "still there?");
        assert_eq!(session.log.last().unwrap().text, "alice is not online.");
        assert!(hubs.lock().calls.is_empty());
    }
}
