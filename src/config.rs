//! Assistant configuration.
//!
//! Read from a YAML file (`assistant.yaml`) shipped alongside the host
//! application. Every field has a default so a missing or partial file
//! still yields a working assistant. The config is consumed at wiring
//! time: it opens the preference store and builds the session state and
//! quota gate the dispatcher is constructed with.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::session::quota::DEFAULT_QUESTION_BUDGET;
use crate::session::{FileStore, KeyValueStore, QuotaGate, SessionStore, VoiceProfile};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("failed to parse config at {path}: {reason}")]
    ParseFailed { path: String, reason: String },
}

/// Top-level assistant configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Voice used until the user picks another one.
    #[serde(default = "default_voice")]
    pub default_voice: VoiceProfile,

    /// Question budget for anonymous sessions.
    #[serde(default = "default_question_budget")]
    pub question_budget: u8,

    /// Override for the persistent preferences directory. When absent, the
    /// platform-standard data directory is used.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_voice() -> VoiceProfile {
    VoiceProfile::Alloy
}

fn default_question_budget() -> u8 {
    DEFAULT_QUESTION_BUDGET
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            default_voice: default_voice(),
            question_budget: default_question_budget(),
            data_dir: None,
        }
    }
}

impl AssistantConfig {
    /// Load from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load from a YAML file, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded assistant config");
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "using default assistant config");
                Self::default()
            }
        }
    }

    // ─── Wiring helpers ─────────────────────────────────────────────────

    /// Open the file-backed preference store at the configured (or
    /// platform-standard) location.
    pub fn open_store(&self) -> FileStore {
        match &self.data_dir {
            Some(dir) => FileStore::open(dir.join("assistant_prefs.json")),
            None => FileStore::open_default(),
        }
    }

    /// Build the session store over a preference store.
    pub fn session_store(&self, kv: Arc<dyn KeyValueStore>) -> SessionStore {
        SessionStore::new(kv, self.default_voice)
    }

    /// Build the anonymous-question quota gate over a preference store.
    pub fn quota_gate(&self, kv: Arc<dyn KeyValueStore>) -> QuotaGate {
        QuotaGate::new(kv, self.question_budget)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
