//! Two-tier configuration variables.
//!
//! Every variable may hold a global value (scope id 0) and, if its
//! definition allows it, a per-hub override. Resolution prefers the hub
//! override, then the global value, then the definition's default.
//!
//! - `defs`: the immutable definition table
//! - `kind`: parse/format/suggest per value kind
//! - `store`: resolution, assignment and listing
//! - `backend`: where raw values live

mod backend;
mod defs;
mod kind;
mod store;

pub use backend::{MemoryBackend, StoredVar, VarBackend};
pub use defs::{DEFS, VarDef, VarScope};
pub use kind::{Attr, Color, ColorSpec, Value, VarKind};
pub use store::{Origin, Resolved, VarError, VarStore};

use crate::session::HubId;

/// The tier an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Hub(HubId),
}

impl Scope {
    /// Storage key: 0 for the global tier, the hub id otherwise.
    pub fn id(&self) -> u64 {
        match self {
            Self::Global => 0,
            Self::Hub(id) => *id,
        }
    }
}
