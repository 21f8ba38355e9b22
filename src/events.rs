//! Typed broadcast event bus — decoupled UI signaling.
//!
//! Handlers never call into UI components directly: panels, sidebars, the
//! document preview, and the mail composer mount and unmount independently
//! of the assistant's lifetime. Instead they emit a [`UiEvent`] on this
//! bus. Every event name carries a declared payload shape, checked at
//! compile time; delivery is best-effort (a bus with no subscribers is not
//! an error) and carries no acknowledgement. Events are advisory UI hints,
//! never the source of truth for session state.

use serde::Serialize;
use tokio::sync::broadcast;

/// Buffered events per subscriber before the oldest are dropped.
const EVENT_BUS_CAPACITY: usize = 64;

/// A fire-and-forget signal to the host UI.
///
/// The serialized form is tagged with the kebab-case event name the
/// frontend subscribes to, payload under `payload`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum UiEvent {
    /// The conversational panel was opened.
    ChatOpened,
    /// The conversational panel was closed.
    ChatClosed,
    /// The synthesis voice changed.
    #[serde(rename_all = "camelCase")]
    VoiceChanged { voice: String },
    /// Toggle the navigation sidebar.
    SidebarToggle,
    /// Switch the portal theme.
    #[serde(rename_all = "camelCase")]
    ThemeChanged { dark: bool },
    /// Presentation mode was started or stopped.
    #[serde(rename_all = "camelCase")]
    PresentationChanged { active: bool },
    /// A formal letter was drafted and should be shown in the preview panel.
    #[serde(rename_all = "camelCase")]
    DocumentCreated {
        document_id: String,
        file_name: String,
        local_url: String,
        recipient: String,
        subject: String,
    },
    /// A letter was filed locally (save/download side effect).
    #[serde(rename_all = "camelCase")]
    DocumentFiled {
        document_id: String,
        file_name: String,
    },
    /// A form field was filled on the user's behalf.
    #[serde(rename_all = "camelCase")]
    FillField { field: String, value: String },
    /// The registration form moved to another step.
    #[serde(rename_all = "camelCase")]
    NavigateStep { step: u8, direction: String },
    /// The registration form was handed over for submission.
    #[serde(rename_all = "camelCase")]
    FormSubmitted { form: String },
    /// Start an audio or video call.
    #[serde(rename_all = "camelCase")]
    StartCall { recipient: String, video: bool },
    /// Hang up the current call.
    EndCall,
    /// Open the mail composer pre-filled.
    #[serde(rename_all = "camelCase")]
    ComposeMail {
        recipient: String,
        subject: String,
        body: String,
        priority: String,
    },
    /// Open the document vault panel.
    #[serde(rename_all = "camelCase")]
    VaultOpened { import: bool },
    /// Start an interactive guide.
    #[serde(rename_all = "camelCase")]
    GuideStarted { topic: String },
    /// The anonymous question budget just ran out.
    QuotaExhausted,
    /// Surface the login dialog.
    LoginPrompted,
    /// The user asked to be signed out.
    LogoutRequested,
}

impl UiEvent {
    /// The kebab-case event name the frontend subscribes to.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::ChatOpened => "chat-opened",
            UiEvent::ChatClosed => "chat-closed",
            UiEvent::VoiceChanged { .. } => "voice-changed",
            UiEvent::SidebarToggle => "sidebar-toggle",
            UiEvent::ThemeChanged { .. } => "theme-changed",
            UiEvent::PresentationChanged { .. } => "presentation-changed",
            UiEvent::DocumentCreated { .. } => "document-created",
            UiEvent::DocumentFiled { .. } => "document-filed",
            UiEvent::FillField { .. } => "fill-field",
            UiEvent::NavigateStep { .. } => "navigate-step",
            UiEvent::FormSubmitted { .. } => "form-submitted",
            UiEvent::StartCall { .. } => "start-call",
            UiEvent::EndCall => "end-call",
            UiEvent::ComposeMail { .. } => "compose-mail",
            UiEvent::VaultOpened { .. } => "vault-opened",
            UiEvent::GuideStarted { .. } => "guide-started",
            UiEvent::QuotaExhausted => "quota-exhausted",
            UiEvent::LoginPrompted => "login-prompted",
            UiEvent::LogoutRequested => "logout-requested",
        }
    }
}

/// Broadcast channel the host UI subscribes to.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        Self { tx }
    }

    /// Emit an event. Best-effort: with no subscriber the event is dropped
    /// silently, which is the normal state before any panel has mounted.
    pub fn emit(&self, event: UiEvent) {
        tracing::debug!(event = event.name(), "ui event");
        let _ = self.tx.send(event);
    }

    /// Subscribe to the stream of UI events.
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
