use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::address::HubAddress;
use crate::net::{HubLink, HubUser, LinkState, UserId};
use crate::search::SearchQuery;
use crate::session::{HubId, Session, Tab};
use crate::vars::VarStore;

/// A request made through [`RecordingLink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCall {
    Connect(HubId, String),
    Disconnect(HubId),
    Say(HubId, String, bool),
    Private(HubId, UserId, String, bool),
    Search(Vec<HubId>, SearchQuery),
    Kick(HubId, UserId),
    Password(HubId, String),
}

/// Hub state shared between a test and its session's link.
#[derive(Debug, Default)]
pub struct MockHubs {
    pub calls: Vec<LinkCall>,
    pub states: HashMap<HubId, LinkState>,
    pub users: HashMap<HubId, Vec<HubUser>>,
}

impl MockHubs {
    /// Chat messages sent to a hub, with their `/me` flag.
    pub fn said(&self, hub: HubId) -> Vec<(String, bool)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                LinkCall::Say(h, message, me) if *h == hub => Some((message.clone(), *me)),
                _ => None,
            })
            .collect()
    }

    pub fn disconnect_all(&mut self) {
        self.states.clear();
    }
}

/// Records every request; connections complete immediately.
pub struct RecordingLink(pub Arc<Mutex<MockHubs>>);

impl HubLink for RecordingLink {
    fn connect(&mut self, hub: HubId, addr: &HubAddress) {
        let mut hubs = self.0.lock();
        hubs.calls.push(LinkCall::Connect(hub, addr.to_string()));
        hubs.states.insert(hub, LinkState::Connected);
    }

    fn disconnect(&mut self, hub: HubId) {
        let mut hubs = self.0.lock();
        hubs.calls.push(LinkCall::Disconnect(hub));
        hubs.states.remove(&hub);
    }

    fn state(&self, hub: HubId) -> LinkState {
        self.0.lock().states.get(&hub).copied().unwrap_or_default()
    }

    fn say(&mut self, hub: HubId, message: &str, me: bool) {
        self.0
            .lock()
            .calls
            .push(LinkCall::Say(hub, message.to_string(), me));
    }

    fn private_message(&mut self, hub: HubId, user: UserId, message: &str, me: bool) {
        self.0
            .lock()
            .calls
            .push(LinkCall::Private(hub, user, message.to_string(), me));
    }

    fn users(&self, hub: HubId) -> Vec<HubUser> {
        self.0.lock().users.get(&hub).cloned().unwrap_or_default()
    }

    fn search(&mut self, hubs: &[HubId], query: &SearchQuery) {
        self.0
            .lock()
            .calls
            .push(LinkCall::Search(hubs.to_vec(), query.clone()));
    }

    fn kick(&mut self, hub: HubId, user: UserId) {
        self.0.lock().calls.push(LinkCall::Kick(hub, user));
    }

    fn password(&mut self, hub: HubId, password: &str) {
        self.0
            .lock()
            .calls
            .push(LinkCall::Password(hub, password.to_string()));
    }
}

/// A session on the main tab with an empty in-memory store.
pub fn test_session() -> (Session, Arc<Mutex<MockHubs>>) {
    let hubs = Arc::new(Mutex::new(MockHubs::default()));
    let session = Session::new(VarStore::default(), Box::new(RecordingLink(hubs.clone())));
    (session, hubs)
}

/// Create a named hub, mark it connected and focus its tab. Records no calls.
pub fn connected_hub(session: &mut Session, hubs: &Arc<Mutex<MockHubs>>, name: &str) -> HubId {
    let hub = session.vars.unused_hub_id().unwrap();
    session.vars.set_raw(hub, "hubname", name);
    hubs.lock().states.insert(hub, LinkState::Connected);
    session.focus(Tab::Hub(hub));
    hub
}

pub fn user(uid: UserId, name: &str) -> HubUser {
    HubUser {
        uid,
        name: name.to_string(),
        share_size: 0,
        description: None,
        is_op: false,
    }
}
