//! Credential storage behind a small key-value trait.
//!
//! `FileSessionStore` persists to JSON; `MemorySessionStore` lives only as
//! long as the process and is what tests inject.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::utils;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key of the display name.
pub const USERNAME_KEY: &str = "username";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistent key-value storage for the logged-in session.
///
/// `clear` removes every key at once; there is no per-key removal, which
/// keeps `token` and `username` paired.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;

    /// The stored bearer token, if any.
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// The stored display name, if any.
    fn username(&self) -> Option<String> {
        self.get(USERNAME_KEY).filter(|u| !u.is_empty())
    }

    /// Store a fresh credential pair, replacing any previous one.
    fn save_credentials(&self, token: &str, username: &str) -> Result<(), StoreError> {
        self.clear()?;
        self.set(TOKEN_KEY, token)?;
        self.set(USERNAME_KEY, username)
    }
}

// ─────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with a credential pair.
    pub fn with_credentials(token: &str, username: &str) -> Self {
        let store = Self::new();
        {
            let mut entries = store.entries.write().unwrap();
            entries.insert(TOKEN_KEY.to_string(), token.to_string());
            entries.insert(USERNAME_KEY.to_string(), username.to_string());
        }
        store
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.entries.write().unwrap().clear();
        Ok(())
    }
}

// ─────────────────────────────────────────────
// File-backed store
// ─────────────────────────────────────────────

/// JSON file store with an in-memory cache.
///
/// Thread-safe via `RwLock`; the cache is loaded once at construction and
/// written through on every `set`.
pub struct FileSessionStore {
    path: PathBuf,
    cache: RwLock<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Open the store at `path` (defaults to `~/.bodhipilot/session.json`).
    ///
    /// A missing file is an empty session. An unreadable or corrupt file is
    /// also treated as empty, with a warning.
    pub fn open(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(utils::get_session_path);
        let entries = Self::load(&path);
        FileSessionStore {
            path,
            cache: RwLock::new(entries),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn load(path: &std::path::Path) -> BTreeMap<String, String> {
        if !path.exists() {
            return BTreeMap::new();
        }
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to read session file {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(entries) => {
                debug!("Loaded session from {}", path.display());
                entries
            }
            Err(e) => {
                warn!("Ignoring corrupt session file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        set_owner_only_permissions(&self.path)?;
        Ok(())
    }
}

/// The file holds a bearer token: owner read/write only.
#[cfg(unix)]
fn set_owner_only_permissions(path: &std::path::Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn set_owner_only_permissions(_path: &std::path::Path) -> std::io::Result<()> {
    Ok(())
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cache.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut cache = self.cache.write().unwrap();
        cache.insert(key.to_string(), value.to_string());
        self.persist(&cache)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut cache = self.cache.write().unwrap();
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            debug!("Deleted session file {}", self.path.display());
        }
        cache.clear();
        Ok(())
    }

    /// Written in one go, so the file never holds half a pair.
    fn save_credentials(&self, token: &str, username: &str) -> Result<(), StoreError> {
        let mut cache = self.cache.write().unwrap();
        let mut entries = BTreeMap::new();
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        entries.insert(USERNAME_KEY.to_string(), username.to_string());
        self.persist(&entries)?;
        *cache = entries;
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
