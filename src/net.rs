//! Interface to the hub protocol engine.
//!
//! Commands only initiate requests through [`HubLink`]; progress and results
//! arrive through the protocol engine's own event channel.

use std::collections::HashMap;

use crate::address::HubAddress;
use crate::search::SearchQuery;
use crate::session::HubId;

pub type UserId = u64;

/// A user as seen on a hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubUser {
    pub uid: UserId,
    pub name: String,
    pub share_size: u64,
    pub description: Option<String>,
    pub is_op: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Idle,
    Connecting,
    Connected,
}

pub trait HubLink: Send {
    fn connect(&mut self, hub: HubId, addr: &HubAddress);
    fn disconnect(&mut self, hub: HubId);
    fn state(&self, hub: HubId) -> LinkState;
    fn say(&mut self, hub: HubId, message: &str, me: bool);
    fn private_message(&mut self, hub: HubId, user: UserId, message: &str, me: bool);
    /// Users currently online. Must be cheap, it runs on every keystroke.
    fn users(&self, hub: HubId) -> Vec<HubUser>;
    fn search(&mut self, hubs: &[HubId], query: &SearchQuery);
    fn kick(&mut self, hub: HubId, user: UserId);
    fn password(&mut self, hub: HubId, password: &str);
}

/// Link used when no protocol engine is attached.
///
/// Requests are logged and connection attempts never complete.
#[derive(Debug, Default)]
pub struct OfflineLink {
    states: HashMap<HubId, LinkState>,
}

impl OfflineLink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HubLink for OfflineLink {
    fn connect(&mut self, hub: HubId, addr: &HubAddress) {
        tracing::info!(hub, address = %addr, "connect requested");
        self.states.insert(hub, LinkState::Connecting);
    }

    fn disconnect(&mut self, hub: HubId) {
        tracing::info!(hub, "disconnect requested");
        self.states.remove(&hub);
    }

    fn state(&self, hub: HubId) -> LinkState {
        self.states.get(&hub).copied().unwrap_or_default()
    }

    fn say(&mut self, hub: HubId, message: &str, me: bool) {
        tracing::debug!(hub, me, len = message.len(), "chat message dropped, no protocol engine");
    }

    fn private_message(&mut self, hub: HubId, user: UserId, _message: &str, _me: bool) {
        tracing::debug!(hub, user, "private message dropped, no protocol engine");
    }

    fn users(&self, _hub: HubId) -> Vec<HubUser> {
        Vec::new()
    }

    fn search(&mut self, hubs: &[HubId], query: &SearchQuery) {
        tracing::info!(?hubs, terms = ?query.terms, "search requested");
    }

    fn kick(&mut self, hub: HubId, user: UserId) {
        tracing::info!(hub, user, "kick requested");
    }

    fn password(&mut self, hub: HubId, _password: &str) {
        tracing::info!(hub, "password submitted");
    }
}
