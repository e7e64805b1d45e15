//! `/search`: parses the query and sends it to the targeted hubs.

use super::registry::Registry;
use super::types::Command;
use crate::search::{SearchQuery, SearchScope};
use crate::session::{HubId, Session};

pub struct Search;

impl Command for Search {
    fn name(&self) -> &'static str {
        "search"
    }

    fn run(&self, session: &mut Session, _registry: &Registry, args: &str) {
        let query = match SearchQuery::parse(args) {
            Ok(query) => query,
            Err(e) => {
                session.error(e.to_string());
                return;
            }
        };

        let hubs: Vec<HubId> = match query.scope {
            SearchScope::CurrentHub => {
                let Some(hub) = session.current_hub() else {
                    session.error("Not on a hub tab. Use -all to search every connected hub.");
                    return;
                };
                if !session.is_connected(hub) {
                    session.error("Not connected.");
                    return;
                }
                vec![hub]
            }
            SearchScope::AllHubs => {
                let hubs: Vec<HubId> = session
                    .open_hubs()
                    .into_iter()
                    .filter(|&hub| session.is_connected(hub))
                    .collect();
                if hubs.is_empty() {
                    session.error("Not connected to any hub.");
                    return;
                }
                hubs
            }
        };

        tracing::debug!(?hubs, ?query, "search");
        session.link.search(&hubs, &query);
        session.info(format!("Search for {query} sent to {} hub(s).", hubs.len()));
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{Registry, dispatch};
    use crate::search::{FileType, SearchScope, SizeBound};
    use crate::session::Tab;
    use crate::test_helpers::{LinkCall, connected_hub, test_session};

    #[test]
    fn search_current_hub() {
        let registry = Registry::builtin().unwrap();
        let (mut session, hubs) = test_session();
        let hub = connected_hub(&mut session, &hubs, "home");
        dispatch(&registry, &mut session, "/search -t video -ge 10M foo bar");

        let calls = hubs.lock().calls.clone();
        let [LinkCall::Search(targets, query)] = calls.as_slice() else {
            panic!("unexpected calls: {calls:?}");
        };
        assert_eq!(targets, &vec![hub]);
        assert_eq!(query.terms, vec!["foo", "bar"]);
        assert_eq!(query.file_type, FileType::Video);
        assert_eq!(query.size, Some(SizeBound::AtLeast(10 << 20)));
        assert_eq!(query.scope, SearchScope::CurrentHub);
        assert_eq!(
            session.log.last().unwrap().text,
            "Search for 'foo bar' sent to 1 hub(s)."
        );
    }

    #[test]
    fn search_all_connected_hubs() {
        let registry = Registry::builtin().unwrap();
        let (mut session, hubs) = test_session();
        let one = connected_hub(&mut session, &hubs, "one");
        let two = connected_hub(&mut session, &hubs, "two");
        dispatch(&registry, &mut session, "/open -n three");
        session.focus(Tab::Main);

        dispatch(&registry, &mut session, "/search -all foo");
        let calls = hubs.lock().calls.clone();
        assert!(matches!(calls.as_slice(), [LinkCall::Search(targets, _)] if *targets == vec![one, two]));
    }

    #[test]
    fn search_errors() {
        let registry = Registry::builtin().unwrap();
        let (mut session, hubs) = test_session();
        dispatch(&registry, &mut session, "/search foo");
        assert!(session.log.last().unwrap().text.starts_with("Not on a hub tab."));
        dispatch(&registry, &mut session, "/search -all foo");
        assert_eq!(session.log.last().unwrap().text, "Not connected to any hub.");

        connected_hub(&mut session, &hubs, "home");
        dispatch(&registry, &mut session, "/search foo -ge");
        assert_eq!(
            session.log.last().unwrap().text,
            "Option -ge expects an argument."
        );
        dispatch(&registry, &mut session, "/search");
        assert_eq!(session.log.last().unwrap().text, "No search query given.");
        assert!(hubs.lock().calls.is_empty());
    }
}
