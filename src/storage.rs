//! Key-value stores backing the persisted visitor record
//!
//! Storage failures (missing directories, denied permissions, unreadable
//! files) are absorbed here: callers only ever see `None` or `false`, never
//! an error. Worst case the visitor is treated as first-time, which is a
//! harmless degradation.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

/// Gateway to a persistent key-value store
///
/// Implementations must never propagate backend failures: a failed read is
/// `None`, a failed write or delete is `false`, with a logged warning.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> bool;
    fn remove(&mut self, key: &str) -> bool;
}

/// File-backed store: one `<key>.json` file per key inside a directory
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform config dir (e.g. `~/.config/portfolio`)
    pub fn default_location() -> Self {
        let mut dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push(crate::constants::storage::APP_DIR);
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn write_entry(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .context(format!("Failed to create store directory: {}", self.dir.display()))?;
        let path = self.entry_path(key);
        fs::write(&path, value)
            .context(format!("Failed to write store entry: {}", path.display()))?;
        Ok(())
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read store entry");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        match self.write_entry(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = ?e, "Store write failed");
                false
            }
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => true,
            // Removing an absent entry succeeds (reset is idempotent)
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Store remove failed");
                false
            }
        }
    }
}

/// In-memory store for tests and embedding without a filesystem
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key);
        true
    }
}
