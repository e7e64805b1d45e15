//! Application context handed to every command.

use crate::grants::Grants;
use crate::messages::{Level, MessageLog};
use crate::net::{HubLink, HubUser, LinkState, UserId};
use crate::vars::{Scope, VarStore};

/// Identifies a hub and its tier of variable overrides. Never 0.
pub type HubId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tab {
    Main,
    Hub(HubId),
    Private { hub: HubId, uid: UserId, nick: String },
}

impl Tab {
    pub fn hub(&self) -> Option<HubId> {
        match self {
            Self::Main => None,
            Self::Hub(hub) | Self::Private { hub, .. } => Some(*hub),
        }
    }
}

pub struct Session {
    pub vars: VarStore,
    pub log: MessageLog,
    pub grants: Grants,
    pub link: Box<dyn HubLink>,
    tabs: Vec<Tab>,
    current: usize,
    quit: bool,
    clear: bool,
}

impl Session {
    pub fn new(vars: VarStore, link: Box<dyn HubLink>) -> Self {
        Self {
            vars,
            log: MessageLog::default(),
            grants: Grants::default(),
            link,
            tabs: vec![Tab::Main],
            current: 0,
            quit: false,
            clear: false,
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.log.push(Level::Info, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.log.push(Level::Error, text);
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn current_tab(&self) -> &Tab {
        &self.tabs[self.current]
    }

    /// Hub of the current hub or private-message tab.
    pub fn current_hub(&self) -> Option<HubId> {
        self.current_tab().hub()
    }

    /// Variable scope of the current tab.
    pub fn scope(&self) -> Scope {
        self.current_hub().map_or(Scope::Global, Scope::Hub)
    }

    /// Hubs with an open tab, in tab order.
    pub fn open_hubs(&self) -> Vec<HubId> {
        self.tabs
            .iter()
            .filter_map(|t| match t {
                Tab::Hub(hub) => Some(*hub),
                _ => None,
            })
            .collect()
    }

    pub fn hub_name(&self, hub: HubId) -> String {
        self.vars
            .get_raw(hub, "hubname")
            .unwrap_or_else(|| format!("hub{hub}"))
    }

    pub fn tab_title(&self, tab: &Tab) -> String {
        match tab {
            Tab::Main => "main".to_string(),
            Tab::Hub(hub) => format!("#{}", self.hub_name(*hub)),
            Tab::Private { nick, .. } => format!("~{nick}"),
        }
    }

    /// Open `tab` unless it already is, returning its position.
    pub fn open_tab(&mut self, tab: Tab) -> usize {
        if let Some(index) = self.tabs.iter().position(|t| *t == tab) {
            return index;
        }
        tracing::debug!(?tab, "opening tab");
        self.tabs.push(tab);
        self.tabs.len() - 1
    }

    pub fn focus(&mut self, tab: Tab) {
        self.current = self.open_tab(tab);
    }

    pub fn focus_next(&mut self) {
        self.current = (self.current + 1) % self.tabs.len();
    }

    pub fn focus_prev(&mut self) {
        self.current = (self.current + self.tabs.len() - 1) % self.tabs.len();
    }

    /// Close the current tab. Closing a hub tab also closes its private
    /// tabs. The main tab cannot be closed.
    pub fn close_current(&mut self) -> Option<Tab> {
        let closed = self.current_tab().clone();
        match &closed {
            Tab::Main => return None,
            Tab::Hub(hub) => self.tabs.retain(|t| *t == Tab::Main || t.hub() != Some(*hub)),
            Tab::Private { .. } => {
                self.tabs.remove(self.current);
            }
        }
        self.current = self.current.saturating_sub(1).min(self.tabs.len() - 1);
        Some(closed)
    }

    pub fn state(&self, hub: HubId) -> LinkState {
        self.link.state(hub)
    }

    pub fn is_connected(&self, hub: HubId) -> bool {
        self.link.state(hub) == LinkState::Connected
    }

    /// Online user with exactly this name.
    pub fn find_user(&self, hub: HubId, name: &str) -> Option<HubUser> {
        self.link.users(hub).into_iter().find(|u| u.name == name)
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_clear(&mut self) {
        self.clear = true;
    }

    /// Whether the screen should be cleared, resetting the request.
    pub fn take_clear_request(&mut self) -> bool {
        std::mem::take(&mut self.clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::OfflineLink;

    fn session() -> Session {
        Session::new(VarStore::default(), Box::new(OfflineLink::new()))
    }

    fn private(hub: HubId, nick: &str) -> Tab {
        Tab::Private {
            hub,
            uid: 42,
            nick: nick.to_string(),
        }
    }

    #[test]
    fn starts_on_main_tab() {
        let session = session();
        assert_eq!(session.current_tab(), &Tab::Main);
        assert_eq!(session.current_hub(), None);
        assert_eq!(session.scope(), Scope::Global);
    }

    #[test]
    fn focusing_an_open_tab_does_not_duplicate_it() {
        let mut session = session();
        session.focus(Tab::Hub(1));
        session.focus(Tab::Main);
        session.focus(Tab::Hub(1));
        assert_eq!(session.tabs().len(), 2);
        assert_eq!(session.scope(), Scope::Hub(1));
    }

    #[test]
    fn closing_a_hub_closes_its_private_tabs() {
        let mut session = session();
        session.open_tab(Tab::Hub(1));
        session.open_tab(Tab::Hub(2));
        session.open_tab(private(1, "alice"));
        session.open_tab(private(2, "bob"));
        session.focus(Tab::Hub(1));

        assert_eq!(session.close_current(), Some(Tab::Hub(1)));
        assert_eq!(session.tabs(), &[Tab::Main, Tab::Hub(2), private(2, "bob")]);
        assert_eq!(session.current_tab(), &Tab::Main);
    }

    #[test]
    fn main_tab_cannot_be_closed() {
        let mut session = session();
        assert_eq!(session.close_current(), None);
        assert_eq!(session.tabs(), &[Tab::Main]);
    }

    #[test]
    fn tab_cycling_wraps() {
        let mut session = session();
        session.open_tab(Tab::Hub(1));
        session.focus_prev();
        assert_eq!(session.current_tab(), &Tab::Hub(1));
        session.focus_next();
        assert_eq!(session.current_tab(), &Tab::Main);
    }

    #[test]
    fn titles() {
        let mut session = session();
        session.vars.set_raw(1, "hubname", "home");
        assert_eq!(session.tab_title(&Tab::Hub(1)), "#home");
        assert_eq!(session.tab_title(&private(1, "alice")), "~alice");
        assert_eq!(session.tab_title(&Tab::Hub(9)), "#hub9");
    }
}
