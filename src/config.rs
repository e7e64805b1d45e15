use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::vars::{MemoryBackend, StoredVar, VarStore};

/// Persisted variable values.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub vars: Vec<StoredVar>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Settings location unknown: no home directory")]
    NoHome,
    #[error("Invalid JSON in {}: {msg}", .path.display())]
    InvalidJson { path: PathBuf, msg: String },
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join("dcline").join("settings.json"))
}

/// Load settings from `path`. A missing file yields empty settings.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, starting empty");
            return Ok(Settings::default());
        }
        Err(e) => return Err(ConfigError::io(path, e)),
    };
    let settings: Settings = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
        path: path.to_path_buf(),
        msg: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), count = settings.vars.len(), "settings loaded");
    Ok(settings)
}

impl Settings {
    pub fn from_store(vars: &VarStore) -> Self {
        Self {
            vars: vars.snapshot(),
        }
    }

    pub fn into_store(self) -> VarStore {
        VarStore::new(Box::new(MemoryBackend::from_entries(self.vars)))
    }

    /// Write to `path`, creating its directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidJson {
            path: path.to_path_buf(),
            msg: e.to_string(),
        })?;
        fs::write(path, content).map_err(|e| ConfigError::io(path, e))?;
        tracing::info!(path = %path.display(), count = self.vars.len(), "settings saved");
        Ok(())
    }
}
