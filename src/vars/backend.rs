//! Storage for variable values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A persisted `(scope, name) -> value` record. Scope 0 is the global tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredVar {
    pub scope: u64,
    pub name: String,
    pub value: String,
}

/// Key-value store holding canonical raw values.
pub trait VarBackend: Send {
    fn get(&self, scope: u64, name: &str) -> Option<String>;
    fn set(&mut self, scope: u64, name: &str, value: &str);
    fn unset(&mut self, scope: u64, name: &str);
    fn entries(&self) -> Vec<StoredVar>;
}

/// In-memory backend; snapshots are persisted by [`crate::config`].
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: BTreeMap<(u64, String), String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = StoredVar>) -> Self {
        let values = entries
            .into_iter()
            .map(|v| ((v.scope, v.name), v.value))
            .collect();
        Self { values }
    }
}

impl VarBackend for MemoryBackend {
    fn get(&self, scope: u64, name: &str) -> Option<String> {
        self.values.get(&(scope, name.to_string())).cloned()
    }

    fn set(&mut self, scope: u64, name: &str, value: &str) {
        self.values
            .insert((scope, name.to_string()), value.to_string());
    }

    fn unset(&mut self, scope: u64, name: &str) {
        self.values.remove(&(scope, name.to_string()));
    }

    fn entries(&self) -> Vec<StoredVar> {
        self.values
            .iter()
            .map(|((scope, name), value)| StoredVar {
                scope: *scope,
                name: name.clone(),
                value: value.clone(),
            })
            .collect()
    }
}
