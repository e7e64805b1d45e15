//! Tab completion.

use super::dispatch::{COMMAND_MARKER, DEFAULT_COMMAND};
use super::registry::Registry;
use crate::session::Session;

pub const MAX_SUGGESTIONS: usize = 20;

/// Completions for the text typed so far, each a full replacement line.
///
/// At most [`MAX_SUGGESTIONS`] candidates are returned, without duplicates
/// and without any candidate as long as the typed text.
pub fn suggest(registry: &Registry, session: &Session, input: &str) -> Vec<String> {
    let candidates = match input.strip_prefix(COMMAND_MARKER) {
        None => registry
            .get(DEFAULT_COMMAND)
            .map(|entry| entry.command().suggest(session, registry, input))
            .unwrap_or_default(),
        Some(rest) => match rest.split_once(' ') {
            None => registry
                .names_with_prefix(rest)
                .filter(|name| name.len() != rest.len())
                .map(|name| format!("{COMMAND_MARKER}{name} "))
                .collect(),
            Some((name, partial)) => match registry.get(name) {
                None => Vec::new(),
                Some(entry) => {
                    let head = &input[..input.len() - partial.len()];
                    entry
                        .command()
                        .suggest(session, registry, partial)
                        .into_iter()
                        .map(|candidate| format!("{head}{candidate}"))
                        .collect()
                }
            },
        },
    };
    cap(input, candidates)
}

fn cap(input: &str, candidates: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for candidate in candidates {
        if out.len() == MAX_SUGGESTIONS {
            break;
        }
        if candidate.len() != input.len() && !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

/// Complete the nick at the end of `args` against the users of the current
/// hub. The fragment starts after the last space, comma or colon.
///
/// With `address`, a nick completed at the very start gets a `": "` suffix.
pub fn suggest_nick(session: &Session, args: &str, address: bool) -> Vec<String> {
    let Some(hub) = session.current_hub() else {
        return Vec::new();
    };
    let start = args.rfind([' ', ',', ':']).map_or(0, |i| i + 1);
    let (head, fragment) = args.split_at(start);
    let fragment = fragment.to_lowercase();

    let mut names: Vec<String> = session
        .link
        .users(hub)
        .into_iter()
        .map(|u| u.name)
        .filter(|name| name.to_lowercase().starts_with(&fragment))
        .collect();
    names.sort_by_key(|name| name.to_lowercase());

    names
        .into_iter()
        .map(|name| {
            if address && head.is_empty() {
                format!("{name}: ")
            } else {
                format!("{head}{name}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{connected_hub, test_session, user};

    fn setup(names: &[&str]) -> (Registry, Session) {
        let registry = Registry::builtin().unwrap();
        let (mut session, hubs) = test_session();
        let hub = connected_hub(&mut session, &hubs, "home");
        let users = names
            .iter()
            .enumerate()
            .map(|(i, n)| user(i as u64 + 1, n))
            .collect();
        hubs.lock().users.insert(hub, users);
        (registry, session)
    }

    #[test]
    fn command_names() {
        let (registry, session) = setup(&[]);
        assert_eq!(suggest(&registry, &session, "/se"), vec!["/search ", "/set "]);
        assert_eq!(suggest(&registry, &session, "/hu"), vec!["/hunset "]);
        assert!(suggest(&registry, &session, "/set").is_empty());
        assert!(suggest(&registry, &session, "/xyz").is_empty());
    }

    #[test]
    fn unknown_command_arguments() {
        let (registry, session) = setup(&["alice"]);
        assert!(suggest(&registry, &session, "/nothing a").is_empty());
    }

    #[test]
    fn commands_without_suggester() {
        let (registry, session) = setup(&[]);
        assert!(suggest(&registry, &session, "/quit x").is_empty());
    }

    #[test]
    fn setting_names_and_values() {
        let (registry, mut session) = setup(&[]);
        assert_eq!(suggest(&registry, &session, "/set tls_p"), vec!["/set tls_policy"]);
        // Hub-only variables complete with /hset, global-only ones do not.
        assert_eq!(suggest(&registry, &session, "/hset autoc"), vec!["/hset autoconnect"]);
        assert!(suggest(&registry, &session, "/hset slot").is_empty());

        session
            .vars
            .assign(crate::vars::Scope::Global, "tls_policy", "allow")
            .unwrap();
        assert_eq!(suggest(&registry, &session, "/set tls_policy "), vec![
            "/set tls_policy allow",
            "/set tls_policy disabled",
            "/set tls_policy prefer"
        ]);
        assert_eq!(suggest(&registry, &session, "/set tls_policy d"), vec![
            "/set tls_policy disabled"
        ]);
    }

    #[test]
    fn nick_completion_in_chat() {
        let (registry, session) = setup(&["Alice", "albert", "bob"]);
        assert_eq!(suggest(&registry, &session, "al"), vec!["albert: ", "Alice: "]);
        assert_eq!(suggest(&registry, &session, "hi b"), vec!["hi bob"]);
        assert_eq!(suggest(&registry, &session, "bob,al"), vec!["bob,albert", "bob,Alice"]);
        assert_eq!(suggest(&registry, &session, "/say hey:b"), vec!["/say hey:bob"]);
    }

    #[test]
    fn nick_completion_for_commands() {
        let (registry, session) = setup(&["Alice", "bob"]);
        assert_eq!(suggest(&registry, &session, "/msg a"), vec!["/msg Alice"]);
        assert_eq!(suggest(&registry, &session, "/whois B"), vec!["/whois bob"]);
    }

    #[test]
    fn results_are_capped_and_unique() {
        let mut names: Vec<String> = (0..30).map(|i| format!("user{i:02}")).collect();
        names.push("user00".to_string());
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let (registry, session) = setup(&names);

        let result = suggest(&registry, &session, "/msg user");
        assert_eq!(result.len(), MAX_SUGGESTIONS);
        let mut unique = result.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), MAX_SUGGESTIONS);
        assert!(result.iter().all(|s| s.len() != "/msg user".len()));
        assert_eq!(result[0], "/msg user00");
    }

    #[test]
    fn complete_input_is_not_suggested_again() {
        let candidates = vec!["abc".to_string(), "abcd".to_string(), "abcd".to_string()];
        assert_eq!(cap("abc", candidates), vec!["abcd"]);
    }

    #[test]
    fn no_nicks_outside_hubs() {
        let registry = Registry::builtin().unwrap();
        let (session, _) = test_session();
        assert!(suggest(&registry, &session, "al").is_empty());
    }
}
