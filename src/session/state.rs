//! Session state owned by the dispatch core.
//!
//! One [`SessionStore`] per mounted assistant. The realtime transport
//! delivers tool calls serially, so the inner mutexes only guard short
//! synchronous critical sections — they are never held across an `.await`.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::collaborators::types::{DocumentRef, ExtractionReport};
use crate::session::kv::{KeyValueStore, Scope};

/// Session-scoped storage key for the chosen voice.
const VOICE_KEY: &str = "assistant.voice";

/// Synthesis voice offered by the realtime model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceProfile {
    Alloy,
    Echo,
    Shimmer,
}

impl VoiceProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            VoiceProfile::Alloy => "alloy",
            VoiceProfile::Echo => "echo",
            VoiceProfile::Shimmer => "shimmer",
        }
    }

    /// Parse a voice name from a tool argument. Unknown names are rejected
    /// rather than defaulted — the model should be told its choice is wrong.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "alloy" => Some(VoiceProfile::Alloy),
            "echo" => Some(VoiceProfile::Echo),
            "shimmer" => Some(VoiceProfile::Shimmer),
            _ => None,
        }
    }
}

/// Snapshot of the assistant's per-session state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub selected_voice: VoiceProfile,
    pub is_open: bool,
    pub presentation_mode: bool,
    pub pending_document: Option<DocumentRef>,
}

/// Owner of the session state, with voice choice persisted through the
/// session-scoped key-value store so it survives a page reload.
pub struct SessionStore {
    state: Mutex<SessionState>,
    extraction: Mutex<Option<ExtractionReport>>,
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Create a store, restoring the voice choice from the KV store when a
    /// previous reload left one behind.
    pub fn new(kv: Arc<dyn KeyValueStore>, default_voice: VoiceProfile) -> Self {
        let selected_voice = kv
            .get(Scope::Session, VOICE_KEY)
            .and_then(|s| VoiceProfile::parse(&s))
            .unwrap_or(default_voice);

        Self {
            state: Mutex::new(SessionState {
                selected_voice,
                is_open: false,
                presentation_mode: false,
                pending_document: None,
            }),
            extraction: Mutex::new(None),
            kv,
        }
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().expect("session lock").clone()
    }

    // ─── Chat panel ─────────────────────────────────────────────────────

    /// Open the conversational panel. Returns `true` when the flag changed.
    pub fn open_chat(&self) -> bool {
        let mut state = self.state.lock().expect("session lock");
        let changed = !state.is_open;
        state.is_open = true;
        changed
    }

    /// Close the conversational panel. Idempotent: closing an already
    /// closed panel is a no-op, not an error.
    pub fn close_chat(&self) -> bool {
        let mut state = self.state.lock().expect("session lock");
        let changed = state.is_open;
        state.is_open = false;
        changed
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().expect("session lock").is_open
    }

    // ─── Voice ──────────────────────────────────────────────────────────

    pub fn voice(&self) -> VoiceProfile {
        self.state.lock().expect("session lock").selected_voice
    }

    /// Set the voice and write it through to the session KV store.
    pub fn set_voice(&self, voice: VoiceProfile) {
        self.state.lock().expect("session lock").selected_voice = voice;
        self.kv.set(Scope::Session, VOICE_KEY, voice.as_str());
    }

    // ─── Presentation mode ──────────────────────────────────────────────

    /// Returns `true` when the flag changed.
    pub fn set_presentation(&self, active: bool) -> bool {
        let mut state = self.state.lock().expect("session lock");
        let changed = state.presentation_mode != active;
        state.presentation_mode = active;
        changed
    }

    pub fn presentation(&self) -> bool {
        self.state.lock().expect("session lock").presentation_mode
    }

    // ─── Pending correspondence ─────────────────────────────────────────

    /// Store the drafted letter. At most one is pending: an existing draft
    /// is replaced and returned so the caller can log the replacement.
    pub fn set_pending_document(&self, doc: DocumentRef) -> Option<DocumentRef> {
        let mut state = self.state.lock().expect("session lock");
        let previous = state.pending_document.replace(doc);
        if let Some(prev) = &previous {
            tracing::warn!(
                replaced = %prev.id,
                "pending correspondence replaced by a new draft"
            );
        }
        previous
    }

    pub fn pending_document(&self) -> Option<DocumentRef> {
        self.state
            .lock()
            .expect("session lock")
            .pending_document
            .clone()
    }

    /// Remove and return the pending letter.
    pub fn take_pending_document(&self) -> Option<DocumentRef> {
        self.state
            .lock()
            .expect("session lock")
            .pending_document
            .take()
    }

    // ─── Extraction report ──────────────────────────────────────────────

    pub fn set_extraction(&self, report: ExtractionReport) {
        *self.extraction.lock().expect("session lock") = Some(report);
    }

    pub fn extraction(&self) -> Option<ExtractionReport> {
        self.extraction.lock().expect("session lock").clone()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
