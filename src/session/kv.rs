//! Scoped key-value storage for session preferences.
//!
//! The dispatch core never assumes a specific browser/host storage API:
//! voice choice and the anonymous question budget go through this
//! capability instead. Two scopes:
//! - **Session** — lives for the navigation session, dropped on restart.
//! - **Persistent** — survives restarts (JSON file in the platform data
//!   directory for [`FileStore`]).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Lifetime of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Valid for the current navigation session only.
    Session,
    /// Survives application restarts.
    Persistent,
}

/// Minimal scoped string store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, scope: Scope, key: &str) -> Option<String>;
    fn set(&self, scope: Scope, key: &str, value: &str);
    fn remove(&self, scope: Scope, key: &str);
}

// ─── MemoryStore ────────────────────────────────────────────────────────────

/// In-memory store. Both scopes die with the process — the default for
/// embedded use where the host owns real persistence, and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    session: Mutex<HashMap<String, String>>,
    persistent: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, scope: Scope) -> &Mutex<HashMap<String, String>> {
        match scope {
            Scope::Session => &self.session,
            Scope::Persistent => &self.persistent,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        self.map(scope).lock().expect("kv lock").get(key).cloned()
    }

    fn set(&self, scope: Scope, key: &str, value: &str) {
        self.map(scope)
            .lock()
            .expect("kv lock")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, scope: Scope, key: &str) {
        self.map(scope).lock().expect("kv lock").remove(key);
    }
}

// ─── FileStore ──────────────────────────────────────────────────────────────

/// On-disk format for the persistent scope.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedValues {
    /// Version for forward compatibility.
    version: u32,
    values: HashMap<String, String>,
}

/// Store whose persistent scope is a JSON file (loaded on creation, saved
/// on mutation with an atomic temp-file rename). Session scope stays in
/// memory.
pub struct FileStore {
    session: Mutex<HashMap<String, String>>,
    persistent: Mutex<HashMap<String, String>>,
    persist_path: PathBuf,
}

impl FileStore {
    /// Open (or create) a store backed by `path`.
    pub fn open(path: PathBuf) -> Self {
        let store = Self {
            session: Mutex::new(HashMap::new()),
            persistent: Mutex::new(HashMap::new()),
            persist_path: path,
        };
        store.load_from_disk();
        store
    }

    /// Open the store at the platform-standard location
    /// (`<data_dir>/com.agora.portal/assistant_prefs.json`).
    pub fn open_default() -> Self {
        Self::open(default_persist_path())
    }

    fn load_from_disk(&self) {
        if !self.persist_path.exists() {
            return;
        }

        match std::fs::read_to_string(&self.persist_path) {
            Ok(content) => match serde_json::from_str::<PersistedValues>(&content) {
                Ok(persisted) => {
                    tracing::info!(
                        count = persisted.values.len(),
                        path = %self.persist_path.display(),
                        "loaded persistent assistant preferences"
                    );
                    *self.persistent.lock().expect("kv lock") = persisted.values;
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        path = %self.persist_path.display(),
                        "failed to parse preferences file, starting fresh"
                    );
                }
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.persist_path.display(),
                    "failed to read preferences file"
                );
            }
        }
    }

    fn save_to_disk(&self) {
        let persisted = PersistedValues {
            version: 1,
            values: self.persistent.lock().expect("kv lock").clone(),
        };

        let content = match serde_json::to_string_pretty(&persisted) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize preferences");
                return;
            }
        };

        if let Some(parent) = self.persist_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        // Write to temp file, then rename for atomicity
        let tmp_path = self.persist_path.with_extension("json.tmp");
        if let Err(e) = std::fs::write(&tmp_path, &content) {
            tracing::error!(error = %e, "failed to write preferences temp file");
            return;
        }
        if let Err(e) = std::fs::rename(&tmp_path, &self.persist_path) {
            tracing::error!(error = %e, "failed to rename preferences file");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        match scope {
            Scope::Session => self.session.lock().expect("kv lock").get(key).cloned(),
            Scope::Persistent => self.persistent.lock().expect("kv lock").get(key).cloned(),
        }
    }

    fn set(&self, scope: Scope, key: &str, value: &str) {
        match scope {
            Scope::Session => {
                self.session
                    .lock()
                    .expect("kv lock")
                    .insert(key.to_string(), value.to_string());
            }
            Scope::Persistent => {
                self.persistent
                    .lock()
                    .expect("kv lock")
                    .insert(key.to_string(), value.to_string());
                self.save_to_disk();
            }
        }
    }

    fn remove(&self, scope: Scope, key: &str) {
        match scope {
            Scope::Session => {
                self.session.lock().expect("kv lock").remove(key);
            }
            Scope::Persistent => {
                self.persistent.lock().expect("kv lock").remove(key);
                self.save_to_disk();
            }
        }
    }
}

/// Default path: platform-standard data directory / `assistant_prefs.json`.
fn default_persist_path() -> PathBuf {
    let base = dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".agora")
        })
        .join("com.agora.portal");
    base.join("assistant_prefs.json")
}

// ─── Tests ──────────────────────────────────────────────────────────────────
