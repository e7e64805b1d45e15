//! Variable resolution, assignment and listing.

use std::collections::BTreeSet;
use std::fmt;

use super::backend::{MemoryBackend, StoredVar, VarBackend};
use super::defs::{self, DEFS, VarDef};
use super::kind::Value;
use super::Scope;
use crate::session::HubId;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VarError {
    #[error("No variable named '{0}'.")]
    Unknown(String),
    #[error("'{name}' is a global setting, use {hint} instead.")]
    GlobalOnly { name: String, hint: &'static str },
    #[error("'{name}' is a hub setting, use {hint} instead.")]
    HubOnly { name: String, hint: &'static str },
    #[error("{0}")]
    Invalid(String),
}

/// Which tier an effective value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Hub,
    Global,
    Default,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hub => "hub",
            Self::Global => "global",
            Self::Default => "default",
        })
    }
}

/// Effective value of a variable at some scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Set {
        raw: String,
        display: String,
        origin: Origin,
    },
    Unset,
}

impl Resolved {
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Set { raw, .. } => Some(raw),
            Self::Unset => None,
        }
    }

    pub fn origin(&self) -> Option<Origin> {
        match self {
            Self::Set { origin, .. } => Some(*origin),
            Self::Unset => None,
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { display, .. } => f.write_str(display),
            Self::Unset => f.write_str("not set"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Show,
    Assign,
    Clear,
}

/// Reject operations on a tier the definition does not allow, naming the
/// command that addresses the right tier.
fn check_scope(def: &VarDef, scope: Scope, action: Action) -> Result<(), VarError> {
    if def.scope.allows(scope) {
        return Ok(());
    }
    let name = def.name.to_string();
    match (scope, action) {
        (Scope::Hub(_), Action::Clear) => Err(VarError::GlobalOnly { name, hint: "/unset" }),
        (Scope::Hub(_), Action::Show | Action::Assign) => {
            Err(VarError::GlobalOnly { name, hint: "/set" })
        }
        (Scope::Global, Action::Clear) => Err(VarError::HubOnly { name, hint: "/hunset" }),
        (Scope::Global, Action::Show | Action::Assign) => {
            Err(VarError::HubOnly { name, hint: "/hset" })
        }
    }
}

/// Raw value chain for a definition: hub override, global value, default.
fn effective_raw(backend: &dyn VarBackend, def: &VarDef, scope: Scope) -> Option<(String, Origin)> {
    if let Scope::Hub(id) = scope
        && def.scope.allows_hub()
        && let Some(raw) = backend.get(id, def.name)
    {
        return Some((raw, Origin::Hub));
    }
    if def.scope.allows_global()
        && let Some(raw) = backend.get(0, def.name)
    {
        return Some((raw, Origin::Global));
    }
    def.default.map(|raw| (raw.to_string(), Origin::Default))
}

fn visible() -> impl Iterator<Item = &'static VarDef> {
    DEFS.iter().filter(|d| !d.hidden)
}

pub struct VarStore {
    backend: Box<dyn VarBackend>,
}

impl Default for VarStore {
    fn default() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }
}

impl VarStore {
    pub fn new(backend: Box<dyn VarBackend>) -> Self {
        Self { backend }
    }

    /// All stored values, for persisting.
    pub fn snapshot(&self) -> Vec<StoredVar> {
        self.backend.entries()
    }

    /// Look up a user-visible definition.
    pub fn lookup(&self, name: &str) -> Result<&'static VarDef, VarError> {
        defs::find(name)
            .filter(|d| !d.hidden)
            .ok_or_else(|| VarError::Unknown(name.to_string()))
    }

    fn effective(&self, def: &VarDef, scope: Scope) -> Resolved {
        let Some((raw, origin)) = effective_raw(self.backend.as_ref(), def, scope) else {
            return Resolved::Unset;
        };
        let display = match def.kind.parse(&raw) {
            Ok(value) => value.to_string(),
            Err(e) => {
                tracing::warn!(name = def.name, raw = %raw, error = %e, "stored value does not parse");
                raw.clone()
            }
        };
        Resolved::Set {
            raw,
            display,
            origin,
        }
    }

    /// Effective, formatted value of `name` at `scope`.
    pub fn resolve(&self, scope: Scope, name: &str) -> Result<Resolved, VarError> {
        let def = self.lookup(name)?;
        check_scope(def, scope, Action::Show)?;
        Ok(self.effective(def, scope))
    }

    /// Parse, validate and store a value, returning what is now effective.
    ///
    /// Nothing is stored when validation fails.
    pub fn assign(&mut self, scope: Scope, name: &str, raw: &str) -> Result<Resolved, VarError> {
        let def = self.lookup(name)?;
        check_scope(def, scope, Action::Assign)?;
        let value = def.kind.parse(raw).map_err(VarError::Invalid)?;
        let canonical = value.raw();
        if let Some(check) = def.check {
            check(&canonical).map_err(VarError::Invalid)?;
        }

        self.backend.set(scope.id(), def.name, &canonical);
        tracing::debug!(scope = scope.id(), name = def.name, value = %canonical, "variable assigned");
        Ok(self.effective(def, scope))
    }

    /// Remove the value at `scope`, returning the value it falls back to.
    pub fn clear(&mut self, scope: Scope, name: &str) -> Result<Resolved, VarError> {
        let def = self.lookup(name)?;
        check_scope(def, scope, Action::Clear)?;
        self.backend.unset(scope.id(), def.name);
        tracing::debug!(scope = scope.id(), name = def.name, "variable cleared");
        Ok(self.effective(def, scope))
    }

    /// Variables usable at `scope` matching a glob pattern (all when `None`).
    ///
    /// An empty result means nothing matched; it is not an error.
    pub fn list(&self, scope: Scope, pattern: Option<&str>) -> Vec<(&'static VarDef, Resolved)> {
        let pattern = match pattern.map(glob::Pattern::new) {
            Some(Ok(p)) => Some(p),
            Some(Err(_)) => return Vec::new(),
            None => None,
        };
        visible()
            .filter(|d| d.scope.allows(scope))
            .filter(|d| pattern.as_ref().is_none_or(|p| p.matches(d.name)))
            .map(|d| (d, self.effective(d, scope)))
            .collect()
    }

    /// Whether `pattern` matches variables that only exist at the other tier.
    pub fn matches_elsewhere(&self, scope: Scope, pattern: &str) -> bool {
        let Ok(pattern) = glob::Pattern::new(pattern) else {
            return false;
        };
        visible().any(|d| !d.scope.allows(scope) && pattern.matches(d.name))
    }

    /// Names of variables usable at `scope` starting with `prefix`.
    pub fn names(&self, scope: Scope, prefix: &str) -> Vec<&'static str> {
        visible()
            .filter(|d| d.scope.allows(scope) && d.name.starts_with(prefix))
            .map(|d| d.name)
            .collect()
    }

    /// Value completions: the current raw value first, then the kind's own.
    pub fn suggest_value(&self, scope: Scope, name: &str, fragment: &str) -> Vec<String> {
        let Some(def) = defs::find(name).filter(|d| !d.hidden && d.scope.allows(scope)) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if let Some((raw, _)) = effective_raw(self.backend.as_ref(), def, scope)
            && raw.starts_with(fragment)
        {
            out.push(raw);
        }
        for s in def.kind.suggest(fragment) {
            if !out.contains(&s) {
                out.push(s);
            }
        }
        out
    }

    /// Typed effective value, skipping scope checks. For internal consumers.
    pub fn value(&self, scope: Scope, name: &str) -> Option<Value> {
        let def = defs::find(name)?;
        let (raw, _) = effective_raw(self.backend.as_ref(), def, scope)?;
        def.kind.parse(&raw).ok()
    }

    pub fn flag(&self, scope: Scope, name: &str) -> bool {
        matches!(self.value(scope, name), Some(Value::Bool(true)))
    }

    /// Stored value at exactly this tier, without fallback.
    pub fn get_raw(&self, scope: u64, name: &str) -> Option<String> {
        self.backend.get(scope, name)
    }

    pub fn set_raw(&mut self, scope: u64, name: &str, value: &str) {
        self.backend.set(scope, name, value);
    }

    pub fn unset_raw(&mut self, scope: u64, name: &str) {
        self.backend.unset(scope, name);
    }

    /// Ids of all hubs known to the store.
    pub fn hub_ids(&self) -> Vec<HubId> {
        let mut ids: Vec<HubId> = self
            .backend
            .entries()
            .into_iter()
            .filter(|v| v.scope != 0 && v.name == "hubname")
            .map(|v| v.scope)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn find_hub(&self, name: &str) -> Option<HubId> {
        self.backend
            .entries()
            .into_iter()
            .find(|v| v.scope != 0 && v.name == "hubname" && v.value == name)
            .map(|v| v.scope)
    }

    /// A hub id not used by any stored value. Never 0, which is the
    /// global tier. Ids past the highest stored one are preferred; if that
    /// one is `HubId::MAX` the lowest free id is used instead.
    pub fn unused_hub_id(&self) -> Option<HubId> {
        let used: BTreeSet<HubId> = self.backend.entries().iter().map(|v| v.scope).collect();
        let next = used.last().copied().unwrap_or(0).checked_add(1);
        next.or_else(|| (1..=HubId::MAX).find(|id| !used.contains(id)))
    }
}
